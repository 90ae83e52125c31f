//! Site header: logo, hamburger menu and, on admin pages, the admin navigation with logout.

use crate::auth::Session;
use crate::menu::ConfirmPrompt;

pub const HOME_PATH: &str = "/";

pub const LOGOUT_PROMPT: ConfirmPrompt = ConfirmPrompt {
    message: "로그아웃 할까요?",
    confirm_text: "로그아웃",
    cancel_text: "취소",
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdminRoute {
    LostBoard,
    Events,
}

impl AdminRoute {
    pub const ALL: [AdminRoute; 2] = [AdminRoute::LostBoard, AdminRoute::Events];

    pub fn path(&self) -> &'static str {
        match self {
            AdminRoute::LostBoard => "/admin",
            AdminRoute::Events => "/admin/event",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdminRoute::LostBoard => "분실물 게시판 관리",
            AdminRoute::Events => "이벤트 관리",
        }
    }

    pub fn from_path(path: &str) -> Option<AdminRoute> {
        AdminRoute::ALL.into_iter().find(|route| route.path() == path)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assets {
    /// White logo and menu icon over the dark festival backdrop.
    Light,
    /// Black logo and menu icon for the white admin pages.
    Dark,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    path: String,
    menu_open: bool,
    logout_prompt: bool,
}

impl Header {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            menu_open: false,
            logout_prompt: false,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_admin_path(&self) -> bool {
        AdminRoute::from_path(&self.path).is_some()
    }

    pub fn assets(&self) -> Assets {
        if self.is_admin_path() {
            Assets::Dark
        } else {
            Assets::Light
        }
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Admin links are only offered on admin pages.
    pub fn menu_routes(&self) -> &'static [AdminRoute] {
        if self.is_admin_path() {
            &AdminRoute::ALL
        } else {
            &[]
        }
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn outside_click(&mut self) {
        if !self.logout_prompt {
            self.menu_open = false;
        }
    }

    pub fn navigate(&mut self, route: AdminRoute) {
        log::debug!("Navigating to {}", route.path());
        self.path = route.path().to_string();
        self.menu_open = false;
    }

    pub fn go_home(&mut self) {
        self.path = HOME_PATH.to_string();
        self.menu_open = false;
    }

    pub fn logout_prompt(&self) -> Option<ConfirmPrompt> {
        self.logout_prompt.then_some(LOGOUT_PROMPT)
    }

    pub fn request_logout(&mut self) {
        if self.is_admin_path() && self.menu_open {
            self.logout_prompt = true;
        }
    }

    pub fn cancel_logout(&mut self) {
        self.logout_prompt = false;
    }

    /// Drops the session's credentials. Returns whether anyone was signed in.
    pub fn confirm_logout(&mut self, session: &mut Session) -> bool {
        if !self.logout_prompt {
            return false;
        }
        self.logout_prompt = false;
        self.menu_open = false;
        let signed_out = session.sign_out().is_some();
        if signed_out {
            log::info!("Admin signed out");
        }
        signed_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthContext;

    #[test]
    fn admin_pages_use_dark_assets() {
        assert_eq!(Header::new("/admin").assets(), Assets::Dark);
        assert_eq!(Header::new("/admin/event").assets(), Assets::Dark);
        assert_eq!(Header::new("/map").assets(), Assets::Light);
        assert!(Header::new("/admin/other").menu_routes().is_empty());
    }

    #[test]
    fn navigating_closes_the_menu() {
        let mut header = Header::new("/admin");
        header.toggle_menu();
        assert_eq!(
            header.menu_routes().iter().map(|r| r.label()).collect::<Vec<_>>(),
            vec!["분실물 게시판 관리", "이벤트 관리"]
        );
        header.navigate(AdminRoute::Events);
        assert_eq!(header.path(), "/admin/event");
        assert!(!header.is_menu_open());
    }

    #[test]
    fn logout_needs_confirmation() {
        let mut session = Session::signed_in(AuthContext::bearer("token"));
        let mut header = Header::new("/admin");
        header.toggle_menu();
        header.request_logout();
        assert_eq!(header.logout_prompt(), Some(LOGOUT_PROMPT));

        // the prompt keeps the menu up
        header.outside_click();
        assert!(header.is_menu_open());

        header.cancel_logout();
        assert!(session.is_signed_in());

        header.request_logout();
        assert!(header.confirm_logout(&mut session));
        assert!(!session.is_signed_in());
        assert!(!header.is_menu_open());
        assert_eq!(header.logout_prompt(), None);
    }

    #[test]
    fn logout_is_not_offered_outside_admin() {
        let mut header = Header::new("/");
        header.toggle_menu();
        header.request_logout();
        assert_eq!(header.logout_prompt(), None);
    }
}
