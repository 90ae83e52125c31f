#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;

use festival_frontend_rs::festival_types::{Entry, EntryId, Lost, LostId, LostStatus, UserId};
use festival_frontend_rs::{AdminApi, ApiError, AuthContext};

/// An in-memory festival server.
#[derive(Default)]
pub struct FakeApi {
    pub quantity: usize,
    pub entries: RefCell<Vec<Entry>>,
    pub losts: RefCell<Vec<Lost>>,
    pub blocked: RefCell<HashSet<UserId>>,
    pub calls: RefCell<Vec<String>>,
    failing: RefCell<HashSet<&'static str>>,
}

impl FakeApi {
    pub fn with_entries(quantity: usize, entries: Vec<Entry>) -> Self {
        Self {
            quantity,
            entries: RefCell::new(entries),
            ..Default::default()
        }
    }

    pub fn with_losts(losts: Vec<Lost>) -> Self {
        Self {
            losts: RefCell::new(losts),
            ..Default::default()
        }
    }

    pub fn fail_on(&self, call: &'static str) {
        self.failing.borrow_mut().insert(call);
    }

    pub fn recover(&self, call: &'static str) {
        self.failing.borrow_mut().remove(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn server_lost(&self, lost_id: &LostId) -> Lost {
        self.losts
            .borrow()
            .iter()
            .find(|lost| lost.lost_id == *lost_id)
            .cloned()
            .expect("no such lost post on the fake server")
    }

    fn record(&self, call: &'static str, detail: impl std::fmt::Display) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(format!("{call} {detail}"));
        if self.failing.borrow().contains(call) {
            return Err(ApiError::Status {
                status: 500,
                body: "internal server error".to_string(),
            });
        }
        Ok(())
    }

    fn draw(&self, count: usize) -> Vec<Entry> {
        let mut entries = self.entries.borrow_mut();
        let mut drawn = Vec::new();
        for entry in entries.iter_mut().filter(|entry| !entry.winner).take(count) {
            entry.winner = true;
            drawn.push(entry.clone());
        }
        drawn
    }

    fn drawn_count(&self) -> usize {
        self.entries.borrow().iter().filter(|e| e.winner).count()
    }
}

impl AdminApi for FakeApi {
    async fn list_entries(
        &self,
        _auth: &AuthContext,
        prize_code: &str,
    ) -> Result<Vec<Entry>, ApiError> {
        self.record("list_entries", prize_code)?;
        Ok(self.entries.borrow().clone())
    }

    async fn draw_one(&self, _auth: &AuthContext, prize_code: &str) -> Result<Vec<Entry>, ApiError> {
        self.record("draw_one", prize_code)?;
        Ok(self.draw(1))
    }

    async fn draw_all(&self, _auth: &AuthContext, prize_code: &str) -> Result<Vec<Entry>, ApiError> {
        self.record("draw_all", prize_code)?;
        let remaining = self.quantity.saturating_sub(self.drawn_count());
        Ok(self.draw(remaining))
    }

    async fn cancel_winner(&self, _auth: &AuthContext, entry_id: &EntryId) -> Result<(), ApiError> {
        self.record("cancel_winner", entry_id)?;
        if let Some(entry) = self
            .entries
            .borrow_mut()
            .iter_mut()
            .find(|entry| entry.entry_id == *entry_id)
        {
            entry.winner = false;
        }
        Ok(())
    }

    async fn list_losts(&self, _auth: &AuthContext) -> Result<Vec<Lost>, ApiError> {
        self.record("list_losts", "")?;
        Ok(self.losts.borrow().clone())
    }

    async fn delete_lost(&self, _auth: &AuthContext, lost_id: &LostId) -> Result<(), ApiError> {
        self.record("delete_lost", lost_id)?;
        self.set_status(lost_id, LostStatus::Deleted);
        Ok(())
    }

    async fn restore_lost(&self, _auth: &AuthContext, lost_id: &LostId) -> Result<(), ApiError> {
        self.record("restore_lost", lost_id)?;
        self.set_status(lost_id, LostStatus::Published);
        Ok(())
    }

    async fn block_user(&self, _auth: &AuthContext, user_id: &UserId) -> Result<(), ApiError> {
        self.record("block_user", user_id)?;
        if !self.blocked.borrow_mut().insert(user_id.clone()) {
            return Err(ApiError::Status {
                status: 409,
                body: "already blocked".to_string(),
            });
        }
        for lost in self.losts.borrow_mut().iter_mut() {
            if lost.user_id == *user_id {
                lost.is_user_blocked = true;
            }
        }
        Ok(())
    }
}

impl FakeApi {
    fn set_status(&self, lost_id: &LostId, status: LostStatus) {
        if let Some(lost) = self
            .losts
            .borrow_mut()
            .iter_mut()
            .find(|lost| lost.lost_id == *lost_id)
        {
            lost.lost_status = status;
        }
    }
}

pub fn auth() -> AuthContext {
    AuthContext::bearer("test-token")
}

pub fn entrant(id: u64) -> Entry {
    Entry {
        entry_id: EntryId::from(id),
        user_id: UserId::from(1000 + id),
        name: format!("응모자{id}"),
        phone: format!("010-0000-{id:04}"),
        winner: false,
    }
}

pub fn post(id: u64, user: u64, status: LostStatus) -> Lost {
    Lost {
        lost_id: LostId::from(id),
        user_id: UserId::from(user),
        image_url: format!("https://img.example/losts/{id}.webp"),
        content: Some(format!("분실물 {id}")),
        lost_status: status,
        is_user_blocked: false,
        created_at: format!("2024-05-{:02}T10:00:00", 20 + id % 5),
    }
}
