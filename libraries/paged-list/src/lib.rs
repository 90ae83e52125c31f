//! A client-held mirror of a remote list, rendered one page at a time.
//!
//! Strategy:
//! 1. The full list is fetched once and kept as the *authoritative* copy.
//! 2. What the user sees is a *window*: the first `page * page_size` items of that copy.
//!    The window is never stored, it is recomputed from the list and the page counter.
//! 3. Mutations (a draw, a delete, ...) are sent to the server and, once they succeed, the
//!    same change is applied to the local copy instead of refetching everything.
//!
//! Requests can complete out of order, so every request gets a [`Ticket`] when it's issued.
//! A response is only applied if its ticket is newer than the last one applied to the list;
//! anything older would overwrite newer state and is dropped instead.

mod partition;
mod ticket;

pub use partition::{merge_by_key, partition_in_place, stable_partition};
pub use ticket::{Settled, Ticket, TicketKind};

use ticket::Generations;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Where the list is in its fetch lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FetchState {
    /// Nothing has been fetched yet (or the list was reset).
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Clone, Debug)]
pub struct PagedList<T> {
    items: Vec<T>,
    // 1-based
    page: usize,
    page_size: usize,
    fetch_state: FetchState,
    generations: Generations,
    // generation of the fetch that currently owns `FetchState::Loading`
    outstanding_fetch: Option<u64>,
    loaded_once: bool,
}

impl<T> Default for PagedList<T> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<T> PagedList<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            page_size: page_size.max(1),
            fetch_state: FetchState::Idle,
            generations: Generations::default(),
            outstanding_fetch: None,
            loaded_once: false,
        }
    }

    /// The authoritative list.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The part of the list currently shown.
    pub fn window(&self) -> &[T] {
        &self.items[..self.window_len()]
    }

    fn window_len(&self) -> usize {
        self.page
            .saturating_mul(self.page_size)
            .min(self.items.len())
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn fetch_state(&self) -> FetchState {
        self.fetch_state
    }

    pub fn is_loading(&self) -> bool {
        self.fetch_state == FetchState::Loading
    }

    /// Whether the window still hides part of the list.
    pub fn has_more(&self) -> bool {
        self.window_len() < self.items.len()
    }

    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|item| predicate(item))
    }

    /// Shows one more page. Does nothing while a fetch is in flight or once the whole
    /// list is visible; returns whether the window grew.
    pub fn load_more(&mut self) -> bool {
        if self.is_loading() || !self.has_more() {
            return false;
        }
        self.page += 1;
        log::debug!(
            "Showing page {} ({} of {} items)",
            self.page,
            self.window_len(),
            self.items.len()
        );
        true
    }

    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    /// Replaces the whole list and goes back to the first page.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.page = 1;
    }

    /// Forgets everything, including requests that are still in flight.
    pub fn reset(&mut self) {
        self.items.clear();
        self.page = 1;
        self.fetch_state = FetchState::Idle;
        self.outstanding_fetch = None;
        self.loaded_once = false;
        self.generations.invalidate();
    }

    pub fn begin_fetch(&mut self) -> Ticket {
        let ticket = self.generations.issue(TicketKind::Fetch);
        self.outstanding_fetch = Some(ticket.generation());
        self.fetch_state = FetchState::Loading;
        ticket
    }

    pub fn begin_mutation(&mut self) -> Ticket {
        self.generations.issue(TicketKind::Mutation)
    }

    /// Installs a fetched list, unless something newer was applied while it was in flight.
    pub fn complete_fetch(&mut self, ticket: Ticket, items: Vec<T>) -> Settled {
        let owns_loading = self.release_fetch(&ticket);

        if !self.generations.accept(&ticket) {
            log::warn!(
                "Discarding fetch #{} that finished after a newer change",
                ticket.generation()
            );
            if owns_loading {
                self.fetch_state = self.settled_state();
            }
            return Settled::Stale;
        }

        self.replace(items);
        self.loaded_once = true;
        self.fetch_state = FetchState::Loaded;
        Settled::Applied
    }

    /// Records a failed fetch. The list keeps whatever it held before.
    pub fn fail_fetch(&mut self, ticket: Ticket) -> Settled {
        let owns_loading = self.release_fetch(&ticket);

        if !self.generations.is_current(&ticket) {
            if owns_loading {
                self.fetch_state = self.settled_state();
            }
            return Settled::Stale;
        }

        if owns_loading {
            self.fetch_state = FetchState::Failed;
        }
        Settled::Applied
    }

    /// Runs `change` against the list if the ticket is still current.
    ///
    /// Returns `None` (and leaves the list alone) when a newer response was already applied.
    pub fn apply<R>(&mut self, ticket: Ticket, change: impl FnOnce(&mut Vec<T>) -> R) -> Option<R> {
        if !self.generations.accept(&ticket) {
            log::warn!(
                "Discarding {:?} #{} that finished after a newer change",
                ticket.kind(),
                ticket.generation()
            );
            return None;
        }
        Some(change(&mut self.items))
    }

    /// Settles a mutation whose request failed. Nothing changes locally.
    pub fn discard(&mut self, ticket: Ticket) {
        log::debug!(
            "{:?} #{} failed, keeping the list as it was",
            ticket.kind(),
            ticket.generation()
        );
    }

    fn release_fetch(&mut self, ticket: &Ticket) -> bool {
        if self.outstanding_fetch == Some(ticket.generation()) {
            self.outstanding_fetch = None;
            true
        } else {
            false
        }
    }

    fn settled_state(&self) -> FetchState {
        if self.loaded_once {
            FetchState::Loaded
        } else {
            FetchState::Idle
        }
    }
}
