pub mod envelope;
pub mod format;
pub mod id;
pub mod prize;

use serde::{Deserialize, Serialize};

pub use envelope::{BlacklistRequest, Envelope, LostsPayload, OneOrMany, RestoreLostRequest};
pub use id::{EntryId, LostId, UserId};
pub use prize::{Prize, prize_param};

/// One raffle entrant for a prize.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub entry_id: EntryId,
    pub user_id: UserId,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub winner: bool,
}

impl Entry {
    pub fn status_label(&self) -> &'static str {
        if self.winner { "당첨" } else { "응모" }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, Hash, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LostStatus {
    Published,
    Deleted,
}

impl LostStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LostStatus::Published => "게시중",
            LostStatus::Deleted => "삭제됨",
        }
    }
}

impl std::fmt::Display for LostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let word = match self {
            LostStatus::Published => "PUBLISHED",
            LostStatus::Deleted => "DELETED",
        };
        write!(f, "{word}")
    }
}

/// A post on the lost-and-found board.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Lost {
    pub lost_id: LostId,
    pub user_id: UserId,
    #[serde(default)]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub lost_status: LostStatus,
    // older deployments send this as the string "true"
    #[serde(default, deserialize_with = "id::lenient_bool")]
    pub is_user_blocked: bool,
    pub created_at: String,
}

impl Lost {
    pub fn is_deleted(&self) -> bool {
        self.lost_status == LostStatus::Deleted
    }
}
