use serde::{Deserialize, Serialize};

/// A person who can log in. Loaded once from the users file.
#[derive(Clone, Debug, Deserialize)]
pub struct User {
    /// Unique login name, also used as the key on lists, gifts and comments
    pub username: String,
    /// Argon2 PHC string
    pub password_hash: String,
    /// Name shown to other users
    pub display_name: String,
}

impl User {
    pub fn new(username: &str, password_hash: String, display_name: &str) -> Self {
        Self {
            username: username.to_string(),
            password_hash,
            display_name: display_name.to_string(),
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            username: self.username.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

/// Public part of a user, safe to send to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub display_name: String,
}
