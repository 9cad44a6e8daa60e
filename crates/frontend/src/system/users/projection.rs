use contracts::system::users::{User, UserDraft, DEFAULT_USER_ROLE, USER_ROLES};
use contracts::shared::validation::ValidationError;

use crate::shared::date_utils::format_datetime;
use crate::shared::form::{
    text, values, EntityForm, FieldKind, FormField, FormValues, SelectOption,
};
use crate::shared::table::{or_default, or_na, Cell, TableProjection};

pub fn role_class(role: &str) -> &'static str {
    match role {
        "admin" => "badge--admin",
        "manager" => "badge--manager",
        _ => "badge--employee",
    }
}

/// Passwords are taken verbatim, blank means "not given".
fn password(values: &FormValues, key: &str) -> Option<String> {
    values.get(key).filter(|p| !p.is_empty()).cloned()
}

impl EntityForm for User {
    type Context = ();

    fn form_fields(_ctx: &(), editing: bool) -> Vec<FormField> {
        let mut password = FormField::new("password", "Password", FieldKind::Password);
        let mut confirm = FormField::new("confirm_password", "Confirm Password", FieldKind::Password);
        if !editing {
            password = password.required();
            confirm = confirm.required();
        }
        vec![
            FormField::text("username", "Username").required(),
            FormField::text("first_name", "First Name").required(),
            FormField::text("last_name", "Last Name").required(),
            FormField::new("email", "Email", FieldKind::Email).required(),
            FormField::new("role", "Role", FieldKind::Select(SelectOption::plain(&USER_ROLES))),
            password,
            confirm,
        ]
    }

    fn blank_form(_ctx: &()) -> FormValues {
        values([("role", DEFAULT_USER_ROLE.to_string())])
    }

    fn form_values(&self) -> FormValues {
        values([
            ("username", self.username.clone().unwrap_or_default()),
            ("first_name", self.first_name.clone().unwrap_or_default()),
            ("last_name", self.last_name.clone().unwrap_or_default()),
            ("email", self.email.clone().unwrap_or_default()),
            ("role", or_default(self.role.as_deref(), DEFAULT_USER_ROLE)),
        ])
    }

    fn draft_from_form(values: &FormValues, _ctx: &()) -> Result<UserDraft, ValidationError> {
        let new_password = password(values, "password");
        if let Some(p) = &new_password {
            if password(values, "confirm_password").as_ref() != Some(p) {
                return Err(ValidationError::new(
                    "confirm_password",
                    "Passwords do not match!",
                ));
            }
        }
        let role = text(values, "role");
        Ok(UserDraft {
            username: text(values, "username"),
            email: text(values, "email"),
            first_name: text(values, "first_name"),
            last_name: text(values, "last_name"),
            role: if role.is_empty() {
                DEFAULT_USER_ROLE.to_string()
            } else {
                role
            },
            password: new_password,
            user_id: None,
        })
    }
}

impl TableProjection for User {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Username", "Name", "Email", "Role", "Status", "Last Login"]
    }

    fn cells(&self, _ctx: &()) -> Vec<Cell> {
        let role = or_default(self.role.as_deref(), DEFAULT_USER_ROLE);
        let role_badge = Cell::badge(role.clone(), role_class(&role));
        let status = if self.is_active {
            Cell::badge("Active", "badge--success")
        } else {
            Cell::badge("Inactive", "badge--danger")
        };
        let last_login = match self.last_login.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => format_datetime(value),
            _ => "Never".to_string(),
        };
        vec![
            Cell::text(self.user_id.to_string()),
            Cell::Strong(or_na(self.username.as_deref())),
            Cell::text(self.full_name()),
            Cell::text(or_na(self.email.as_deref())),
            role_badge,
            status,
            Cell::text(last_login),
        ]
    }

    fn active_flag(&self) -> Option<bool> {
        Some(self.is_active)
    }
}
