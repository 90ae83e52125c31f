#![deny(clippy::string_slice)]

pub mod api;
pub mod auth;
pub mod bottom_sheet;
pub mod entry_list;
mod error;
pub mod header;
pub mod makers;
pub mod map;
pub mod menu;
pub mod post_list;

pub use api::{AdminApi, HttpAdminApi};
pub use auth::{AuthContext, Session};
pub use entry_list::{DrawKind, EntryListView};
pub use error::{ApiError, ViewError};
pub use menu::{ConfirmPrompt, ItemMenu, MenuState};
pub use post_list::{ListenerKey, PostAction, PostListView};

pub use festival_types;
pub use paged_list::{DEFAULT_PAGE_SIZE, FetchState};
