use crate::core::error::ConfigError;
use crate::models::user::{User, UserProfile};
use crate::utils::auth::{is_valid_hash, verify_password};
use serde::Deserialize;
use std::path::Path;

// Verified against when the username is unknown, so both failure paths run
// one argon2 verification.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$2a0uXmx4Gq2Qn4Tf2lKLGmkZpVV8mrpPdXTxQ3L5XfM";

#[derive(Deserialize)]
struct UsersFile {
    users: Vec<User>,
}

/// The fixed set of people who can log in, loaded once at startup.
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    /// Load `{"users": [...]}` from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let file: UsersFile = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_users(file.users)
    }

    /// Usernames must be unique and every hash must be a PHC string
    pub fn from_users(users: Vec<User>) -> Result<Self, ConfigError> {
        for (index, user) in users.iter().enumerate() {
            if user.username.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("user #{index} has an empty username")));
            }

            if users[..index].iter().any(|u| u.username == user.username) {
                return Err(ConfigError::Invalid(format!("duplicate username '{}'", user.username)));
            }

            if !is_valid_hash(&user.password_hash) {
                return Err(ConfigError::Invalid(format!(
                    "user '{}' has an invalid password_hash (generate one with `giftlist hash-password`)",
                    user.username
                )));
            }
        }

        Ok(Self { users })
    }

    /// Linear scan for the username, then verify the password against its hash
    pub fn authenticate(&self, username: &str, password: &str) -> Option<&User> {
        match self.get(username) {
            Some(user) => verify_password(password, &user.password_hash).then_some(user),
            None => {
                verify_password(password, DUMMY_HASH);
                None
            }
        }
    }

    pub fn get(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|user| user.username == username)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.get(username).is_some()
    }

    pub fn profiles(&self) -> Vec<UserProfile> {
        self.users.iter().map(User::profile).collect()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
