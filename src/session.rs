//! Session Persistence
//!
//! Bearer token and signed-in user stored in local storage.

use crate::models::{AuthResponse, User};
use crate::storage::{self, KeyValueStore};

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl From<AuthResponse> for Session {
    fn from(auth: AuthResponse) -> Self {
        Self { token: auth.token, user: auth.user }
    }
}

pub struct SessionStore<'a, S: KeyValueStore> {
    store: &'a S,
}

impl<'a, S: KeyValueStore> SessionStore<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Both a non-empty token and a readable user are required
    pub fn load(&self) -> Option<Session> {
        let token = self.token()?;
        let user = storage::load_json::<User>(self.store, USER_KEY)?;
        Some(Session { token, user })
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.trim().is_empty())
    }

    pub fn save(&self, session: &Session) {
        self.store.set(TOKEN_KEY, &session.token);
        storage::save_json(self.store, USER_KEY, &session.user);
    }

    pub fn clear(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::storage::MemoryStorage;

    fn session() -> Session {
        Session {
            token: "jwt-abc".to_string(),
            user: User {
                id: "1".into(),
                name: "Owner".into(),
                email: "owner@shop.in".into(),
                role: Role::Admin,
            },
        }
    }

    #[test]
    fn test_save_load_clear() {
        let store = MemoryStorage::default();
        let sessions = SessionStore::new(&store);
        assert_eq!(sessions.load(), None);

        sessions.save(&session());
        assert_eq!(sessions.load(), Some(session()));
        assert_eq!(sessions.token().as_deref(), Some("jwt-abc"));

        sessions.clear();
        assert!(!store.contains("token"));
        assert!(!store.contains("user"));
        assert_eq!(sessions.load(), None);
    }

    #[test]
    fn test_incomplete_session_is_ignored() {
        let store = MemoryStorage::default();
        store.set("token", "jwt");
        store.set("user", "not json");
        assert_eq!(SessionStore::new(&store).load(), None);

        store.set("token", " ");
        store.set("user", r#"{"name":"A","email":"a@b.in"}"#);
        assert_eq!(SessionStore::new(&store).load(), None);
    }
}
