//! The lost-and-found moderation board.

use festival_types::format::{format_created_at, format_user_id};
use festival_types::{Lost, LostId, LostStatus, UserId};
use paged_list::{PagedList, Settled, Ticket, stable_partition};
use slotmap::SlotMap;

use crate::api::AdminApi;
use crate::auth::AuthContext;
use crate::error::{ApiError, ViewError};
use crate::menu::{ConfirmPrompt, ItemMenu, MenuAction, Selection};

pub const NO_POSTS_MESSAGE: &str = "분실물 게시글이 존재하지 않습니다.";
pub const ALREADY_BLOCKED_ALERT: &str = "이미 차단된 사용자입니다.";
pub const BLOCK_FAILED_ALERT: &str = "사용자를 차단하지 못했습니다.";
pub const DELETE_AFTER_BLOCK_FAILED_ALERT: &str =
    "사용자는 차단되었지만 글을 삭제하지 못했습니다.";

slotmap::new_key_type! {
    pub struct ListenerKey;
}

/// Called after a post changes, with the pinned user (if any) and the posts now on screen.
pub type StatusListener = Box<dyn FnMut(Option<&UserId>, &[Lost])>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PostAction {
    Delete,
    BlockAndDelete,
    UndoDelete,
}

impl PostAction {
    pub fn label(&self) -> &'static str {
        match self {
            PostAction::Delete => "글 삭제",
            PostAction::BlockAndDelete => "차단하고 글 삭제",
            PostAction::UndoDelete => "삭제 취소",
        }
    }

    pub fn prompt(&self) -> ConfirmPrompt {
        let (message, confirm_text) = match self {
            PostAction::Delete => ("글을 삭제할까요?", "삭제"),
            PostAction::BlockAndDelete => ("사용자을 차단하고\n해당 글을 삭제할까요?", "차단 후 삭제"),
            PostAction::UndoDelete => ("삭제된 게시물을 복구할까요?", "복구"),
        };
        ConfirmPrompt {
            message,
            confirm_text,
            cancel_text: "취소",
        }
    }

    /// The options offered in a post's menu.
    pub fn available_for(lost: &Lost) -> &'static [PostAction] {
        if lost.is_deleted() {
            &[PostAction::UndoDelete]
        } else {
            &[PostAction::Delete, PostAction::BlockAndDelete]
        }
    }
}

impl MenuAction for PostAction {
    fn requires_confirmation(&self) -> bool {
        true
    }
}

/// A status change confirmed by the server, to be mirrored locally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LostChange {
    pub status: LostStatus,
    pub block: bool,
}

impl LostChange {
    pub fn status(status: LostStatus) -> Self {
        Self {
            status,
            block: false,
        }
    }

    pub fn is_applied_to(&self, lost: &Lost) -> bool {
        lost.lost_status == self.status && (!self.block || lost.is_user_blocked)
    }

    fn apply_to(&self, lost: &mut Lost) {
        lost.lost_status = self.status;
        if self.block {
            lost.is_user_blocked = true;
        }
    }
}

/// One user's posts, supplied by the caller instead of fetched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinnedPosts {
    pub user_id: UserId,
    pub posts: Vec<Lost>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostRow<'a> {
    pub lost: &'a Lost,
    pub status_label: &'static str,
    pub author: String,
    /// Blocked authors are struck through.
    pub author_blocked: bool,
    pub created_at: String,
}

pub struct PostListView {
    list: PagedList<Lost>,
    menu: ItemMenu<LostId, PostAction>,
    listeners: SlotMap<ListenerKey, StatusListener>,
    pinned: Option<PinnedPosts>,
    detail: Option<LostId>,
    alert: Option<&'static str>,
}

impl Default for PostListView {
    fn default() -> Self {
        Self::new()
    }
}

impl PostListView {
    pub fn new() -> Self {
        Self {
            list: PagedList::default(),
            menu: ItemMenu::new(),
            listeners: SlotMap::with_key(),
            pinned: None,
            detail: None,
            alert: None,
        }
    }

    pub fn list(&self) -> &PagedList<Lost> {
        &self.list
    }

    pub fn menu(&self) -> &ItemMenu<LostId, PostAction> {
        &self.menu
    }

    pub fn pinned(&self) -> Option<&PinnedPosts> {
        self.pinned.as_ref()
    }

    pub fn pin_user_posts(&mut self, user_id: UserId, posts: Vec<Lost>) {
        log::debug!("Showing {} posts by user {user_id}", posts.len());
        self.menu.close();
        self.pinned = Some(PinnedPosts { user_id, posts });
    }

    pub fn unpin(&mut self) -> Option<PinnedPosts> {
        self.menu.close();
        self.pinned.take()
    }

    /// The posts on screen: the pinned user's posts, or the paged window.
    pub fn visible(&self) -> &[Lost] {
        match &self.pinned {
            Some(pinned) => &pinned.posts,
            None => self.list.window(),
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = PostRow<'_>> {
        self.visible().iter().map(|lost| PostRow {
            lost,
            status_label: lost.lost_status.label(),
            author: format_user_id(&lost.user_id),
            author_blocked: lost.is_user_blocked,
            created_at: format_created_at(&lost.created_at),
        })
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.visible().is_empty().then_some(NO_POSTS_MESSAGE)
    }

    /// Pinned lists are shown whole, so they never page.
    pub fn shows_load_more(&self) -> bool {
        self.pinned.is_none() && self.list.has_more()
    }

    pub fn load_more(&mut self) -> bool {
        self.pinned.is_none() && self.list.load_more()
    }

    pub fn find(&self, lost_id: &LostId) -> Option<&Lost> {
        self.pinned
            .as_ref()
            .and_then(|pinned| pinned.posts.iter().find(|lost| lost.lost_id == *lost_id))
            .or_else(|| self.list.find(|lost| lost.lost_id == *lost_id))
    }

    /// Row click: shows the post's detail view. The menu button is not part of the row,
    /// so opening a menu never lands here.
    pub fn open_detail(&mut self, lost_id: LostId) -> Option<&Lost> {
        if self.find(&lost_id).is_none() {
            return None;
        }
        self.menu.close();
        self.detail = Some(lost_id);
        self.detail()
    }

    /// The post shown in the detail view, with any moderation changes applied.
    pub fn detail(&self) -> Option<&Lost> {
        self.detail.as_ref().and_then(|lost_id| self.find(lost_id))
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn subscribe(&mut self, listener: StatusListener) -> ListenerKey {
        self.listeners.insert(listener)
    }

    pub fn unsubscribe(&mut self, key: ListenerKey) {
        self.listeners.remove(key);
    }

    /// The alert raised by the last failed moderation action, if it hasn't been shown yet.
    pub fn take_alert(&mut self) -> Option<&'static str> {
        self.alert.take()
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.list.begin_fetch()
    }

    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        fetched: Result<Vec<Lost>, ApiError>,
    ) -> Result<(), ViewError> {
        let losts = match fetched {
            Ok(losts) => losts,
            Err(e) => {
                log::error!("Error fetching lost posts: {e}");
                let _ = self.list.fail_fetch(ticket);
                return Err(e.into());
            }
        };

        let losts = stable_partition(losts, |lost| !lost.is_deleted());
        match self.list.complete_fetch(ticket, losts) {
            Settled::Applied => {
                log::info!("Loaded {} lost posts", self.list.len());
                Ok(())
            }
            Settled::Stale => Err(ViewError::Stale),
        }
    }

    pub async fn load<A: AdminApi>(&mut self, api: &A, auth: &AuthContext) -> Result<(), ViewError> {
        let ticket = self.begin_load();
        let fetched = api.list_losts(auth).await;
        self.finish_load(ticket, fetched)
    }

    pub fn toggle_menu(&mut self, lost_id: LostId) {
        self.menu.toggle(lost_id);
    }

    pub fn outside_click(&mut self) {
        self.menu.outside_click();
    }

    /// Picks an option for the post whose menu is open and returns the prompt to show.
    pub fn select_action(&mut self, action: PostAction) -> Option<ConfirmPrompt> {
        let lost_id = self.menu.open_item()?.clone();
        let lost = self.find(&lost_id)?;
        if !PostAction::available_for(lost).contains(&action) {
            log::warn!("{} is not offered for post {lost_id}", action.label());
            return None;
        }
        match self.menu.select(action)? {
            Selection::AwaitingConfirmation => Some(action.prompt()),
            Selection::Run { .. } => None,
        }
    }

    pub fn cancel_prompt(&mut self) {
        self.menu.cancel();
    }

    /// Runs the action waiting in the confirmation prompt. The prompt closes once the
    /// requests settle, whatever the outcome.
    pub async fn confirm<A: AdminApi>(
        &mut self,
        api: &A,
        auth: &AuthContext,
    ) -> Result<bool, ViewError> {
        let (lost_id, action) = self.menu.confirming().ok_or(ViewError::NothingToConfirm)?;
        let outcome = self.run(api, auth, &lost_id, action).await;
        self.menu.settle();
        outcome
    }

    pub async fn run<A: AdminApi>(
        &mut self,
        api: &A,
        auth: &AuthContext,
        lost_id: &LostId,
        action: PostAction,
    ) -> Result<bool, ViewError> {
        match action {
            PostAction::Delete => self.soft_delete(api, auth, lost_id).await,
            PostAction::BlockAndDelete => self.delete_and_block(api, auth, lost_id).await,
            PostAction::UndoDelete => self.undo_delete(api, auth, lost_id).await,
        }
    }

    /// Marks a post deleted. Returns whether anything changed locally.
    pub async fn soft_delete<A: AdminApi>(
        &mut self,
        api: &A,
        auth: &AuthContext,
        lost_id: &LostId,
    ) -> Result<bool, ViewError> {
        let ticket = self.begin_change(lost_id)?;
        if let Err(e) = api.delete_lost(auth, lost_id).await {
            log::error!("Error deleting post {lost_id}: {e}");
            self.list.discard(ticket);
            return Err(e.into());
        }
        self.finish_change(ticket, lost_id, LostChange::status(LostStatus::Deleted))
    }

    pub async fn undo_delete<A: AdminApi>(
        &mut self,
        api: &A,
        auth: &AuthContext,
        lost_id: &LostId,
    ) -> Result<bool, ViewError> {
        let ticket = self.begin_change(lost_id)?;
        if let Err(e) = api.restore_lost(auth, lost_id).await {
            log::error!("Error undoing delete of post {lost_id}: {e}");
            self.list.discard(ticket);
            return Err(e.into());
        }
        self.finish_change(ticket, lost_id, LostChange::status(LostStatus::Published))
    }

    /// Blocks the author, then deletes the post.
    ///
    /// If the block fails nothing is touched and an alert is raised. If the block goes through
    /// but the delete doesn't, only the blocked flag is mirrored and an alert is raised.
    pub async fn delete_and_block<A: AdminApi>(
        &mut self,
        api: &A,
        auth: &AuthContext,
        lost_id: &LostId,
    ) -> Result<bool, ViewError> {
        let (user_id, status) = match self.find(lost_id) {
            Some(lost) => (lost.user_id.clone(), lost.lost_status),
            None => return Err(ViewError::UnknownItem(lost_id.to_string())),
        };
        let ticket = self.list.begin_mutation();

        if let Err(e) = api.block_user(auth, &user_id).await {
            if e.is_conflict() {
                log::warn!("User {user_id} is already blocked: {e}");
                self.alert = Some(ALREADY_BLOCKED_ALERT);
            } else {
                log::error!("Error blocking user {user_id}: {e}");
                self.alert = Some(BLOCK_FAILED_ALERT);
            }
            self.list.discard(ticket);
            return Err(e.into());
        }

        if let Err(e) = api.delete_lost(auth, lost_id).await {
            log::error!("Blocked user {user_id} but deleting post {lost_id} failed: {e}");
            self.alert = Some(DELETE_AFTER_BLOCK_FAILED_ALERT);
            let blocked = LostChange {
                status,
                block: true,
            };
            self.finish_change(ticket, lost_id, blocked)?;
            return Err(e.into());
        }

        self.finish_change(
            ticket,
            lost_id,
            LostChange {
                status: LostStatus::Deleted,
                block: true,
            },
        )
    }

    fn begin_change(&mut self, lost_id: &LostId) -> Result<Ticket, ViewError> {
        if self.find(lost_id).is_none() {
            return Err(ViewError::UnknownItem(lost_id.to_string()));
        }
        Ok(self.list.begin_mutation())
    }

    fn finish_change(
        &mut self,
        ticket: Ticket,
        lost_id: &LostId,
        change: LostChange,
    ) -> Result<bool, ViewError> {
        if self.find(lost_id).is_some_and(|lost| change.is_applied_to(lost)) {
            log::debug!("Post {lost_id} is already {}", change.status);
            self.list.discard(ticket);
            return Ok(false);
        }

        self.list
            .apply(ticket, |losts| {
                if let Some(lost) = losts.iter_mut().find(|lost| lost.lost_id == *lost_id) {
                    change.apply_to(lost);
                }
            })
            .ok_or(ViewError::Stale)?;
        if let Some(pinned) = &mut self.pinned {
            if let Some(lost) = pinned.posts.iter_mut().find(|lost| lost.lost_id == *lost_id) {
                change.apply_to(lost);
            }
        }

        log::info!("Post {lost_id} is now {}", change.status);
        self.notify();
        Ok(true)
    }

    fn notify(&mut self) {
        let (user_id, posts) = match &self.pinned {
            Some(pinned) => (Some(&pinned.user_id), pinned.posts.as_slice()),
            None => (None, self.list.window()),
        };
        for listener in self.listeners.values_mut() {
            listener(user_id, posts);
        }
    }
}
