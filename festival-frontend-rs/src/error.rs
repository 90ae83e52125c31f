use crate::entry_list::DrawKind;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP error: {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Response parsing error: {source}\nResponse body: {body}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode { .. } => None,
        }
    }

    /// The server refused the request on business grounds (e.g. the user is already blocked).
    pub fn is_conflict(&self) -> bool {
        matches!(self.status(), Some(400 | 409))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("the response arrived after a newer change and was discarded")]
    Stale,
    #[error("{0} is not available")]
    DrawDisabled(DrawKind),
    #[error("no item with id {0}")]
    UnknownItem(String),
    #[error("no action is waiting for confirmation")]
    NothingToConfirm,
}
