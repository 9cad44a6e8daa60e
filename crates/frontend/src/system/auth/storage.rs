use contracts::system::auth::UserProfile;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use web_sys::window;

const TOKEN_KEY: &str = "ramtech_token";
const USER_KEY: &str = "ramtech_user";
const LOGGED_IN_KEY: &str = "ramtech_logged_in";

/// Minimal string key-value store, shaped after `window.localStorage`.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// Browser `localStorage`; silently unavailable outside a window.
pub struct LocalStore;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Option<String> {
        get_local_storage()?.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// Persisted login: bearer token, user profile and the logged-in flag.
/// The three keys are always written and cleared together.
#[derive(Clone)]
pub struct Session {
    store: Rc<dyn KeyValueStore>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}

impl Session {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn browser() -> Self {
        Self::new(Rc::new(LocalStore))
    }

    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStore::default()))
    }

    pub fn save(&self, token: &str, user: &UserProfile) {
        self.store.set_item(TOKEN_KEY, token);
        match serde_json::to_string(user) {
            Ok(json) => self.store.set_item(USER_KEY, &json),
            Err(e) => log::warn!("Failed to persist user profile: {}", e),
        }
        self.store.set_item(LOGGED_IN_KEY, "true");
    }

    pub fn access_token(&self) -> Option<String> {
        self.store
            .get_item(TOKEN_KEY)
            .filter(|token| !token.trim().is_empty())
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        let raw = self.store.get_item(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("Error parsing stored user data: {}", e);
                None
            }
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.store.get_item(LOGGED_IN_KEY).as_deref() == Some("true")
            && self.access_token().is_some()
    }

    /// Clear all authentication data
    pub fn clear(&self) {
        self.store.remove_item(TOKEN_KEY);
        self.store.remove_item(USER_KEY);
        self.store.remove_item(LOGGED_IN_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> UserProfile {
        UserProfile {
            username: Some("admin".into()),
            role: Some("admin".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_save_and_restore() {
        let session = Session::in_memory();
        assert!(!session.is_logged_in());

        session.save("t0k", &admin());
        assert!(session.is_logged_in());
        assert_eq!(session.access_token().as_deref(), Some("t0k"));
        assert_eq!(session.current_user(), Some(admin()));
    }

    #[test]
    fn test_clear_removes_everything() {
        let store = Rc::new(MemoryStore::default());
        let session = Session::new(store.clone());
        session.save("t0k", &admin());
        session.clear();

        assert!(!session.is_logged_in());
        assert_eq!(store.get_item(TOKEN_KEY), None);
        assert_eq!(store.get_item(USER_KEY), None);
        assert_eq!(store.get_item(LOGGED_IN_KEY), None);
    }

    #[test]
    fn test_corrupt_profile_is_ignored() {
        let store = Rc::new(MemoryStore::default());
        store.set_item(USER_KEY, "{not json");
        let session = Session::new(store);
        assert_eq!(session.current_user(), None);
    }
}
