//! Request and response bodies of the festival API.
use serde::{Deserialize, Serialize};

use crate::{LostStatus, UserId};
use crate::Lost;

/// Every response body is wrapped as `{ "data": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// `data` of `GET /losts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LostsPayload {
    #[serde(default)]
    pub losts: Vec<Lost>,
}

/// The draw endpoints answer with a single entry for `draw-one` and a list for `draw`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlacklistRequest {
    pub user_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreLostRequest {
    pub lost_status: LostStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Entry, EntryId, Lost};

    #[test]
    fn draw_one_response_is_a_single_entry() {
        let body = r#"{"data": {"entryId": 3, "userId": 9, "name": "n", "phone": "p", "winner": true}}"#;
        let envelope: Envelope<OneOrMany<Entry>> = serde_json::from_str(body).unwrap();
        let drawn = envelope.data.into_vec();
        assert_eq!(drawn.len(), 1);
        assert_eq!(drawn[0].entry_id, EntryId::from(3));
    }

    #[test]
    fn draw_all_response_is_a_list() {
        let body = r#"{"data": [
            {"entryId": 1, "userId": 1, "name": "a", "phone": "p", "winner": true},
            {"entryId": 2, "userId": 2, "name": "b", "phone": "p", "winner": true}
        ]}"#;
        let envelope: Envelope<OneOrMany<Entry>> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.data.into_vec().len(), 2);
    }

    #[test]
    fn losts_are_nested_under_data() {
        let body = r#"{"data": {"losts": []}}"#;
        let envelope: Envelope<LostsPayload> = serde_json::from_str(body).unwrap();
        assert!(envelope.data.losts.is_empty());
    }

    #[test]
    fn request_bodies_use_camel_case() {
        let restore = serde_json::to_value(RestoreLostRequest {
            lost_status: LostStatus::Published,
        })
        .unwrap();
        assert_eq!(restore, serde_json::json!({ "lostStatus": "PUBLISHED" }));
    }

    #[test]
    fn block_request_echoes_the_author_id_as_received() {
        let lost: Lost = serde_json::from_str(
            r#"{"lostId": 12, "userId": 5, "lostStatus": "PUBLISHED", "createdAt": "2024-05-21T10:00:00"}"#,
        )
        .unwrap();
        let body = serde_json::to_value(BlacklistRequest {
            user_id: lost.user_id,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "userId": 5 }));

        let lost: Lost = serde_json::from_str(
            r#"{"lostId": "12", "userId": "u-5", "lostStatus": "PUBLISHED", "createdAt": "2024-05-21T10:00:00"}"#,
        )
        .unwrap();
        let body = serde_json::to_value(BlacklistRequest {
            user_id: lost.user_id,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "userId": "u-5" }));
    }
}
