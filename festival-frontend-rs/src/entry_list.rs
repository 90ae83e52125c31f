//! Raffle entrants for one prize, with winner draws.

use festival_types::format::format_phone_number;
use festival_types::{Entry, EntryId, prize_param};
use paged_list::{PagedList, Settled, Ticket, merge_by_key, partition_in_place};

use crate::api::AdminApi;
use crate::auth::AuthContext;
use crate::error::{ApiError, ViewError};
use crate::menu::{ItemMenu, MenuAction, Selection};

pub const NO_ENTRIES_MESSAGE: &str = "응모자가 존재하지 않습니다.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawKind {
    /// Draw one more winner.
    One,
    /// Draw every remaining winner at once.
    All,
}

impl std::fmt::Display for DrawKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawKind::One => write!(f, "single draw"),
            DrawKind::All => write!(f, "full draw"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawButton {
    pub kind: DrawKind,
    pub enabled: bool,
    pub complete: bool,
}

impl DrawButton {
    pub fn label(&self) -> &'static str {
        match (self.complete, self.kind) {
            (true, _) => "추첨 완료",
            (false, DrawKind::One) => "1인 추가 추첨",
            (false, DrawKind::All) => "전체 추첨",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawControls {
    pub single: DrawButton,
    pub full: DrawButton,
}

impl DrawControls {
    pub fn get(&self, kind: DrawKind) -> &DrawButton {
        match kind {
            DrawKind::One => &self.single,
            DrawKind::All => &self.full,
        }
    }

    fn derive(drawn_count: usize, quantity: usize) -> Self {
        let complete = drawn_count == quantity;
        DrawControls {
            single: DrawButton {
                kind: DrawKind::One,
                enabled: drawn_count < quantity,
                complete,
            },
            full: DrawButton {
                kind: DrawKind::All,
                enabled: drawn_count == 0,
                complete,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryAction {
    CancelWinner,
}

impl MenuAction for EntryAction {
    fn requires_confirmation(&self) -> bool {
        false
    }
}

/// One rendered row of the entry list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryRow<'a> {
    pub entry: &'a Entry,
    pub status_label: &'static str,
    pub phone: String,
    /// Winners get a cancel affordance.
    pub cancellable: bool,
}

#[derive(Debug)]
pub struct EntryListView {
    prize_name: String,
    title: String,
    description: Option<String>,
    quantity: usize,
    list: PagedList<Entry>,
    menu: ItemMenu<EntryId, EntryAction>,
}

impl EntryListView {
    pub fn new(prize_name: impl Into<String>, title: impl Into<String>, quantity: usize) -> Self {
        Self {
            prize_name: prize_name.into(),
            title: title.into(),
            description: None,
            quantity,
            list: PagedList::default(),
            menu: ItemMenu::new(),
        }
    }

    pub fn prize_name(&self) -> &str {
        &self.prize_name
    }

    pub fn prize_code(&self) -> &'static str {
        prize_param(&self.prize_name)
    }

    /// Sets the line shown under the heading.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn heading(&self) -> String {
        format!("[{}] 응모 목록", self.title)
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn quantity(&self) -> usize {
        self.quantity
    }

    /// Switches the view to another prize. The cached list (and anything still in flight
    /// for the old prize) is dropped; returns whether a reload is needed.
    pub fn set_prize(&mut self, prize_name: impl Into<String>, quantity: usize) -> bool {
        let prize_name = prize_name.into();
        self.quantity = quantity;
        if prize_name == self.prize_name {
            return false;
        }
        log::info!("Switching entry list from {} to {prize_name}", self.prize_name);
        self.prize_name = prize_name;
        self.list.reset();
        self.menu.close();
        true
    }

    pub fn list(&self) -> &PagedList<Entry> {
        &self.list
    }

    pub fn entries(&self) -> &[Entry] {
        self.list.items()
    }

    pub fn window(&self) -> &[Entry] {
        self.list.window()
    }

    pub fn has_more(&self) -> bool {
        self.list.has_more()
    }

    pub fn drawn_count(&self) -> usize {
        self.list.items().iter().filter(|entry| entry.winner).count()
    }

    pub fn draw_controls(&self) -> DrawControls {
        DrawControls::derive(self.drawn_count(), self.quantity)
    }

    /// Rows reserve room for the cancel button while any winner exists.
    pub fn shows_cancel_column(&self) -> bool {
        self.list.items().iter().any(|entry| entry.winner)
    }

    pub fn rows(&self) -> impl Iterator<Item = EntryRow<'_>> {
        self.list.window().iter().map(|entry| EntryRow {
            entry,
            status_label: entry.status_label(),
            phone: format_phone_number(&entry.phone),
            cancellable: entry.winner,
        })
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.list.is_empty().then_some(NO_ENTRIES_MESSAGE)
    }

    pub fn load_more(&mut self) -> bool {
        self.list.load_more()
    }

    pub fn menu(&self) -> &ItemMenu<EntryId, EntryAction> {
        &self.menu
    }

    pub fn toggle_menu(&mut self, entry_id: EntryId) {
        self.menu.toggle(entry_id);
    }

    pub fn outside_click(&mut self) {
        self.menu.outside_click();
    }

    /// Picks an action from the open menu. Returns the entry to act on.
    pub fn select_action(&mut self, action: EntryAction) -> Option<EntryId> {
        match self.menu.select(action)? {
            Selection::Run { item, .. } => Some(item),
            Selection::AwaitingConfirmation => None,
        }
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.list.begin_fetch()
    }

    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        fetched: Result<Vec<Entry>, ApiError>,
    ) -> Result<(), ViewError> {
        let entries = match fetched {
            Ok(entries) => entries,
            Err(e) => {
                log::error!("Error fetching entry details: {e}");
                let _ = self.list.fail_fetch(ticket);
                return Err(e.into());
            }
        };

        let mut entries = entries;
        partition_in_place(&mut entries, |entry| entry.winner);
        match self.list.complete_fetch(ticket, entries) {
            Settled::Applied => {
                log::info!(
                    "Loaded {} entries for {} ({} drawn)",
                    self.list.len(),
                    self.prize_name,
                    self.drawn_count()
                );
                Ok(())
            }
            Settled::Stale => Err(ViewError::Stale),
        }
    }

    pub async fn load<A: AdminApi>(&mut self, api: &A, auth: &AuthContext) -> Result<(), ViewError> {
        let ticket = self.begin_load();
        let fetched = api.list_entries(auth, self.prize_code()).await;
        self.finish_load(ticket, fetched)
    }

    /// Reserves a draw. Fails without a request when the button is disabled.
    pub fn begin_draw(&mut self, kind: DrawKind) -> Result<Ticket, ViewError> {
        if !self.draw_controls().get(kind).enabled {
            log::warn!("Ignoring {kind} for {}: not available", self.prize_name);
            return Err(ViewError::DrawDisabled(kind));
        }
        Ok(self.list.begin_mutation())
    }

    pub fn finish_draw(
        &mut self,
        ticket: Ticket,
        drawn: Result<Vec<Entry>, ApiError>,
    ) -> Result<(), ViewError> {
        let drawn = match drawn {
            Ok(drawn) => drawn,
            Err(e) => {
                log::error!("Error drawing winners: {e}");
                self.list.discard(ticket);
                return Err(e.into());
            }
        };

        let merged = self
            .list
            .apply(ticket, |entries| {
                let merged = merge_by_key(
                    entries,
                    &drawn,
                    |entry| &entry.entry_id,
                    |entry| &entry.entry_id,
                    |entry, result| entry.winner = result.winner,
                );
                partition_in_place(entries, |entry| entry.winner);
                merged
            })
            .ok_or(ViewError::Stale)?;

        if merged < drawn.len() {
            log::warn!(
                "{} drawn entries were not in the local list",
                drawn.len() - merged
            );
        }
        self.list.reset_page();
        log::info!("{} of {} winners drawn", self.drawn_count(), self.quantity);
        Ok(())
    }

    pub async fn draw<A: AdminApi>(
        &mut self,
        api: &A,
        auth: &AuthContext,
        kind: DrawKind,
    ) -> Result<(), ViewError> {
        let ticket = self.begin_draw(kind)?;
        let prize_code = self.prize_code();
        let drawn = match kind {
            DrawKind::One => api.draw_one(auth, prize_code).await,
            DrawKind::All => api.draw_all(auth, prize_code).await,
        };
        self.finish_draw(ticket, drawn)
    }

    pub fn begin_cancel(&mut self, entry_id: &EntryId) -> Result<Ticket, ViewError> {
        if self.list.find(|entry| entry.entry_id == *entry_id).is_none() {
            return Err(ViewError::UnknownItem(entry_id.to_string()));
        }
        Ok(self.list.begin_mutation())
    }

    pub fn finish_cancel(
        &mut self,
        ticket: Ticket,
        entry_id: &EntryId,
        cancelled: Result<(), ApiError>,
    ) -> Result<(), ViewError> {
        if let Err(e) = cancelled {
            log::error!("Error canceling winner: {e}");
            self.list.discard(ticket);
            return Err(e.into());
        }

        self.list
            .apply(ticket, |entries| {
                if let Some(entry) = entries.iter_mut().find(|entry| entry.entry_id == *entry_id) {
                    entry.winner = false;
                }
                partition_in_place(entries, |entry| entry.winner);
            })
            .ok_or(ViewError::Stale)?;
        self.list.reset_page();
        Ok(())
    }

    pub async fn cancel_winner<A: AdminApi>(
        &mut self,
        api: &A,
        auth: &AuthContext,
        entry_id: &EntryId,
    ) -> Result<(), ViewError> {
        let ticket = self.begin_cancel(entry_id)?;
        let cancelled = api.cancel_winner(auth, entry_id).await;
        self.finish_cancel(ticket, entry_id, cancelled)
    }
}
