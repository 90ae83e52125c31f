/// Credentials for one admin request. Passed explicitly to every call that talks to the API.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthContext {
    token: String,
}

impl AuthContext {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext").finish_non_exhaustive()
    }
}

/// The admin console's login state.
#[derive(Debug, Default)]
pub struct Session {
    auth: Option<AuthContext>,
}

impl Session {
    pub fn signed_in(auth: AuthContext) -> Self {
        Self { auth: Some(auth) }
    }

    pub fn auth(&self) -> Option<&AuthContext> {
        self.auth.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.auth.is_some()
    }

    pub fn sign_out(&mut self) -> Option<AuthContext> {
        self.auth.take()
    }
}
