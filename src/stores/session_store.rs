use dashmap::DashMap;
use rand::Rng;

/// Bearer tokens issued at login, mapped to the username they belong to.
/// Sessions last until logout or restart.
pub struct SessionStore {
    sessions: DashMap<String, String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Start a session and return its token (32 random bytes, hex-encoded)
    pub fn create(&self, username: &str) -> String {
        let mut bytes = [0u8; 32];
        rand::rng().fill(&mut bytes);
        let token = hex::encode(bytes);

        self.sessions.insert(token.clone(), username.to_string());
        token
    }

    pub fn username(&self, token: &str) -> Option<String> {
        self.sessions.get(token).map(|entry| entry.value().clone())
    }

    /// End a session. Returns the username it belonged to.
    pub fn revoke(&self, token: &str) -> Option<String> {
        self.sessions.remove(token).map(|(_, username)| username)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
