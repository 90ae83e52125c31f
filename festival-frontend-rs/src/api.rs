use festival_types::{
    BlacklistRequest, Entry, EntryId, Envelope, Lost, LostId, LostStatus, LostsPayload, OneOrMany,
    RestoreLostRequest, UserId,
};
use serde::de::DeserializeOwned;

use crate::auth::AuthContext;
use crate::error::ApiError;

/// The remote festival API, as seen by the admin views.
///
/// Views are generic over this so they can be driven by [`HttpAdminApi`] or by an
/// in-memory stand-in.
#[allow(async_fn_in_trait)]
pub trait AdminApi {
    /// `GET /admin/entries?prize={code}`
    async fn list_entries(
        &self,
        auth: &AuthContext,
        prize_code: &str,
    ) -> Result<Vec<Entry>, ApiError>;

    /// `POST /admin/draw-one?prize={code}`. Returns the drawn entry.
    async fn draw_one(&self, auth: &AuthContext, prize_code: &str) -> Result<Vec<Entry>, ApiError>;

    /// `POST /admin/draw?prize={code}`. Returns every entry drawn.
    async fn draw_all(&self, auth: &AuthContext, prize_code: &str) -> Result<Vec<Entry>, ApiError>;

    /// `DELETE /admin/entries/{entryId}`
    async fn cancel_winner(&self, auth: &AuthContext, entry_id: &EntryId) -> Result<(), ApiError>;

    /// `GET /losts`
    async fn list_losts(&self, auth: &AuthContext) -> Result<Vec<Lost>, ApiError>;

    /// `DELETE /admin/losts/{lostId}`
    async fn delete_lost(&self, auth: &AuthContext, lost_id: &LostId) -> Result<(), ApiError>;

    /// `PUT /admin/losts/{lostId}` with `{ lostStatus: "PUBLISHED" }`
    async fn restore_lost(&self, auth: &AuthContext, lost_id: &LostId) -> Result<(), ApiError>;

    /// `POST /admin/blacklist` with `{ userId }`
    async fn block_user(&self, auth: &AuthContext, user_id: &UserId) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpAdminApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAdminApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn request(
        &self,
        method: reqwest::Method,
        path: &str,
        auth: &AuthContext,
    ) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header(reqwest::header::AUTHORIZATION, auth.header_value())
    }

    async fn fetch_data<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = send(request).await?;
        decode_envelope(&body)
    }
}

async fn send(request: reqwest::RequestBuilder) -> Result<String, ApiError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

pub(crate) fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(|envelope| envelope.data)
        .map_err(|source| ApiError::Decode {
            source,
            body: body.to_string(),
        })
}

impl AdminApi for HttpAdminApi {
    async fn list_entries(
        &self,
        auth: &AuthContext,
        prize_code: &str,
    ) -> Result<Vec<Entry>, ApiError> {
        let request = self
            .request(reqwest::Method::GET, "/admin/entries", auth)
            .query(&[("prize", prize_code)]);
        self.fetch_data(request).await
    }

    async fn draw_one(&self, auth: &AuthContext, prize_code: &str) -> Result<Vec<Entry>, ApiError> {
        let request = self
            .request(reqwest::Method::POST, "/admin/draw-one", auth)
            .query(&[("prize", prize_code)]);
        let drawn: OneOrMany<Entry> = self.fetch_data(request).await?;
        Ok(drawn.into_vec())
    }

    async fn draw_all(&self, auth: &AuthContext, prize_code: &str) -> Result<Vec<Entry>, ApiError> {
        let request = self
            .request(reqwest::Method::POST, "/admin/draw", auth)
            .query(&[("prize", prize_code)]);
        let drawn: OneOrMany<Entry> = self.fetch_data(request).await?;
        Ok(drawn.into_vec())
    }

    async fn cancel_winner(&self, auth: &AuthContext, entry_id: &EntryId) -> Result<(), ApiError> {
        let path = format!("/admin/entries/{entry_id}");
        send(self.request(reqwest::Method::DELETE, &path, auth)).await?;
        Ok(())
    }

    async fn list_losts(&self, auth: &AuthContext) -> Result<Vec<Lost>, ApiError> {
        let payload: LostsPayload = self
            .fetch_data(self.request(reqwest::Method::GET, "/losts", auth))
            .await?;
        Ok(payload.losts)
    }

    async fn delete_lost(&self, auth: &AuthContext, lost_id: &LostId) -> Result<(), ApiError> {
        let path = format!("/admin/losts/{lost_id}");
        send(self.request(reqwest::Method::DELETE, &path, auth)).await?;
        Ok(())
    }

    async fn restore_lost(&self, auth: &AuthContext, lost_id: &LostId) -> Result<(), ApiError> {
        let path = format!("/admin/losts/{lost_id}");
        let body = RestoreLostRequest {
            lost_status: LostStatus::Published,
        };
        send(self.request(reqwest::Method::PUT, &path, auth).json(&body)).await?;
        Ok(())
    }

    async fn block_user(&self, auth: &AuthContext, user_id: &UserId) -> Result<(), ApiError> {
        let body = BlacklistRequest {
            user_id: user_id.clone(),
        };
        send(
            self.request(reqwest::Method::POST, "/admin/blacklist", auth)
                .json(&body),
        )
        .await?;
        Ok(())
    }
}
