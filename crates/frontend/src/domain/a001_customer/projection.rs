use contracts::domain::a001_customer::aggregate::{
    Customer, CustomerDraft, CUSTOMER_TYPES, DEFAULT_CUSTOMER_TYPE,
};
use contracts::shared::validation::ValidationError;

use crate::shared::form::{
    optional_text, text, values, EntityForm, FieldKind, FormField, FormValues, SelectOption,
};
use crate::shared::table::{or_default, or_na, Cell, TableProjection};

impl EntityForm for Customer {
    type Context = ();

    fn form_fields(_ctx: &(), _editing: bool) -> Vec<FormField> {
        vec![
            FormField::text("F_name", "First Name").required(),
            FormField::text("L_name", "Last Name"),
            FormField::text("contact", "Contact"),
            FormField::new("email", "Email", FieldKind::Email),
            FormField::new(
                "customer_type",
                "Customer Type",
                FieldKind::Select(SelectOption::plain(&CUSTOMER_TYPES)),
            ),
        ]
    }

    fn blank_form(_ctx: &()) -> FormValues {
        values([("customer_type", DEFAULT_CUSTOMER_TYPE.to_string())])
    }

    fn form_values(&self) -> FormValues {
        values([
            ("F_name", self.first_name.clone().unwrap_or_default()),
            ("L_name", self.last_name.clone().unwrap_or_default()),
            ("contact", self.contact.clone().unwrap_or_default()),
            ("email", self.email.clone().unwrap_or_default()),
            (
                "customer_type",
                self.customer_type
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CUSTOMER_TYPE.to_string()),
            ),
        ])
    }

    fn draft_from_form(values: &FormValues, _ctx: &()) -> Result<CustomerDraft, ValidationError> {
        Ok(CustomerDraft {
            first_name: text(values, "F_name"),
            last_name: text(values, "L_name"),
            contact: text(values, "contact"),
            email: text(values, "email"),
            customer_type: optional_text(values, "customer_type")
                .unwrap_or_else(|| DEFAULT_CUSTOMER_TYPE.to_string()),
            customer_id: None,
        })
    }
}

impl TableProjection for Customer {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Contact", "Email", "Type"]
    }

    fn cells(&self, _ctx: &()) -> Vec<Cell> {
        vec![
            Cell::text(self.customer_id.to_string()),
            Cell::Strong(self.full_name()),
            Cell::text(or_na(self.contact.as_deref())),
            Cell::text(or_na(self.email.as_deref())),
            Cell::text(or_default(self.customer_type.as_deref(), "Regular")),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::validation::Validate;

    #[test]
    fn test_blank_form_defaults_type() {
        let form = Customer::blank_form(&());
        let draft = Customer::draft_from_form(&form, &()).unwrap();
        assert_eq!(draft.customer_type, "Retailler");
        assert_eq!(draft.validate().unwrap_err().to_string(), "First name is required!");
    }

    #[test]
    fn test_edit_form_round_trips_fields() {
        let customer: Customer = serde_json::from_str(
            r#"{"customer_id":3,"F_name":"Ann","L_name":"Lee","contact":"024","customer_type":"Constructor"}"#,
        )
        .unwrap();
        let mut form = customer.form_values();
        form.insert("F_name", "  Anna ".into());
        let draft = Customer::draft_from_form(&form, &()).unwrap();
        assert_eq!(draft.first_name, "Anna");
        assert_eq!(draft.last_name, "Lee");
        assert_eq!(draft.email, "");
        assert_eq!(draft.customer_type, "Constructor");
    }

    #[test]
    fn test_cells_use_fallbacks() {
        let customer: Customer = serde_json::from_str(r#"{"customer_id":9,"F_name":"Bo"}"#).unwrap();
        let cells: Vec<String> = customer
            .cells(&())
            .iter()
            .map(|c| c.as_text().to_string())
            .collect();
        assert_eq!(cells, vec!["9", "Bo", "N/A", "N/A", "Regular"]);
        assert_eq!(Customer::headers().len(), cells.len());
    }
}
