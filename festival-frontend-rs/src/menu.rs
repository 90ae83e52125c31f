//! The per-item "more options" affordance shared by the admin lists.
//!
//! `Closed → MenuOpen → ConfirmPending → Closed`. At most one item has its menu open.

pub trait MenuAction: Copy {
    /// Whether choosing this action opens a confirmation prompt first.
    fn requires_confirmation(&self) -> bool;
}

/// Text of a confirmation popup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub message: &'static str,
    pub confirm_text: &'static str,
    pub cancel_text: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuState<K, A> {
    Closed,
    MenuOpen { item: K },
    ConfirmPending { item: K, action: A },
}

/// What happened when an action was picked from an open menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection<K, A> {
    /// The action needs no confirmation; the caller should run it now.
    Run { item: K, action: A },
    AwaitingConfirmation,
}

#[derive(Clone, Debug)]
pub struct ItemMenu<K, A> {
    state: MenuState<K, A>,
}

impl<K, A> Default for ItemMenu<K, A> {
    fn default() -> Self {
        Self {
            state: MenuState::Closed,
        }
    }
}

impl<K: Clone + PartialEq, A: MenuAction> ItemMenu<K, A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MenuState<K, A> {
        &self.state
    }

    /// The item whose menu is open, if any.
    pub fn open_item(&self) -> Option<&K> {
        match &self.state {
            MenuState::MenuOpen { item } => Some(item),
            _ => None,
        }
    }

    pub fn is_open_for(&self, item: &K) -> bool {
        matches!(&self.state, MenuState::MenuOpen { item: open } if open == item)
    }

    /// Click on an item's options affordance. Clicking the open item again closes it.
    pub fn toggle(&mut self, item: K) {
        self.state = match &self.state {
            MenuState::MenuOpen { item: open } if *open == item => MenuState::Closed,
            MenuState::Closed | MenuState::MenuOpen { .. } => MenuState::MenuOpen { item },
            // the prompt is modal
            MenuState::ConfirmPending { .. } => return,
        };
    }

    /// Click anywhere outside the open menu.
    pub fn outside_click(&mut self) {
        if matches!(self.state, MenuState::MenuOpen { .. }) {
            self.state = MenuState::Closed;
        }
    }

    pub fn select(&mut self, action: A) -> Option<Selection<K, A>> {
        let MenuState::MenuOpen { item } = &self.state else {
            return None;
        };
        let item = item.clone();
        if action.requires_confirmation() {
            self.state = MenuState::ConfirmPending { item, action };
            Some(Selection::AwaitingConfirmation)
        } else {
            self.state = MenuState::Closed;
            Some(Selection::Run { item, action })
        }
    }

    /// The item and action waiting for confirmation, if any.
    ///
    /// The menu stays in `ConfirmPending` until [`ItemMenu::settle`] is called.
    pub fn confirming(&self) -> Option<(K, A)> {
        match &self.state {
            MenuState::ConfirmPending { item, action } => Some((item.clone(), *action)),
            _ => None,
        }
    }

    /// The confirmed action has finished, successfully or not.
    pub fn settle(&mut self) {
        if matches!(self.state, MenuState::ConfirmPending { .. }) {
            self.state = MenuState::Closed;
        }
    }

    pub fn cancel(&mut self) {
        self.settle();
    }

    pub fn close(&mut self) {
        self.state = MenuState::Closed;
    }
}
