// Admin login check

/// Decides whether a username/password pair may use the admin actions.
pub trait AuthProvider {
    fn authenticate(&self, user: &str, password: &str) -> bool;
}

/// Plain comparison against a fixed credential pair.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    user: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

impl Default for StaticCredentials {
    /// The archive's built-in administrator account.
    fn default() -> Self {
        Self::new("ECON_ADMIN", "123")
    }
}

impl AuthProvider for StaticCredentials {
    fn authenticate(&self, user: &str, password: &str) -> bool {
        user == self.user && password == self.password
    }
}
