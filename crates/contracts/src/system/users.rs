use serde::{Deserialize, Serialize};

use crate::domain::common::{full_name, text_or, Draft, Entity};
use crate::shared::lenient;
use crate::shared::validation::{is_valid_email, require, Validate, ValidationError};

pub const USER_ROLES: [&str; 3] = ["admin", "manager", "employee"];
pub const DEFAULT_USER_ROLE: &str = "employee";

/// Account as listed by `/users/getusers`.
///
/// The backend also sends `password_hash`; it is deliberately not a field
/// here, so it can never reach the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "lenient::id")]
    pub user_id: i64,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub last_login: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        full_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

impl Entity for User {
    type Draft = UserDraft;

    const PLURAL: &'static str = "users";
    const SINGULAR: &'static str = "user";
    const LABEL: &'static str = "User";
    const REQUIRES_AUTH: bool = true;

    fn id(&self) -> i64 {
        self.user_id
    }

    fn search_fields(&self) -> Vec<&str> {
        [&self.username, &self.first_name, &self.last_name, &self.email]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .collect()
    }

    fn category(&self) -> Option<&str> {
        Some(text_or(self.role.as_deref(), DEFAULT_USER_ROLE))
    }

    fn display_name(&self) -> String {
        self.username
            .clone()
            .unwrap_or_else(|| self.full_name())
    }

    fn status_path(id: i64) -> Option<String> {
        Some(format!("/users/{}/status", id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDraft {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    /// Omitted on edit to keep the current password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl Validate for UserDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.username, "username", "Username")?;
        require(&self.email, "email", "Email")?;
        require(&self.first_name, "first_name", "First name")?;
        require(&self.last_name, "last_name", "Last name")?;
        if !is_valid_email(self.email.trim()) {
            return Err(ValidationError::new(
                "email",
                "Please enter a valid email address",
            ));
        }
        let has_password = self.password.as_deref().is_some_and(|p| !p.is_empty());
        if self.user_id.is_none() && !has_password {
            return Err(ValidationError::new(
                "password",
                "Password is required for new users!",
            ));
        }
        Ok(())
    }
}

impl Draft for UserDraft {
    fn set_id(&mut self, id: i64) {
        self.user_id = Some(id);
    }
}

/// Body of `PATCH /users/{id}/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStatusUpdate {
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> UserDraft {
        UserDraft {
            username: "ann".into(),
            email: "ann@example.com".into(),
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            role: DEFAULT_USER_ROLE.into(),
            password: Some("secret".into()),
            user_id: None,
        }
    }

    #[test]
    fn test_password_hash_is_dropped() {
        let u: User = serde_json::from_str(
            r#"{"user_id":1,"username":"ann","password_hash":"$2b$10$abc","is_active":1}"#,
        )
        .unwrap();
        assert!(u.is_active);
        let back = serde_json::to_string(&u).unwrap();
        assert!(!back.contains("password_hash"));
        assert!(!back.contains("$2b$"));
    }

    #[test]
    fn test_password_required_only_on_create() {
        let mut d = draft();
        d.password = None;
        assert_eq!(d.validate().unwrap_err().field, "password");
        d.set_id(4);
        assert!(d.validate().is_ok());
        assert!(serde_json::to_value(&d).unwrap().get("password").is_none());
    }

    #[test]
    fn test_email_checked() {
        let mut d = draft();
        d.email = "ann.example.com".into();
        assert_eq!(d.validate().unwrap_err().to_string(), "Please enter a valid email address");
    }

    #[test]
    fn test_missing_role_files_under_default() {
        let u: User = serde_json::from_str(r#"{"user_id":2,"username":"bo"}"#).unwrap();
        assert_eq!(u.category(), Some(DEFAULT_USER_ROLE));
    }

    #[test]
    fn test_status_endpoint() {
        assert_eq!(User::status_path(3).as_deref(), Some("/users/3/status"));
        assert_eq!(User::list_path(), "/users/getusers");
    }
}
