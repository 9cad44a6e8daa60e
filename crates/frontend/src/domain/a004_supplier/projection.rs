use contracts::domain::a004_supplier::aggregate::{Supplier, SupplierDraft};
use contracts::shared::validation::ValidationError;

use crate::shared::form::{text, values, EntityForm, FieldKind, FormField, FormValues};
use crate::shared::table::{or_na, Cell, TableProjection};

impl EntityForm for Supplier {
    type Context = ();

    fn form_fields(_ctx: &(), _editing: bool) -> Vec<FormField> {
        vec![
            FormField::text("f_name", "First Name").required(),
            FormField::text("l_name", "Last Name"),
            FormField::text("contact", "Contact"),
            FormField::new("email", "Email", FieldKind::Email),
            FormField::text("address", "Address"),
            FormField::text("product_supplied", "Product Supplied"),
        ]
    }

    fn blank_form(_ctx: &()) -> FormValues {
        FormValues::new()
    }

    fn form_values(&self) -> FormValues {
        values([
            ("f_name", self.f_name.clone().unwrap_or_default()),
            ("l_name", self.l_name.clone().unwrap_or_default()),
            ("contact", self.contact.clone().unwrap_or_default()),
            ("email", self.email.clone().unwrap_or_default()),
            ("address", self.address.clone().unwrap_or_default()),
            (
                "product_supplied",
                self.product_supplied.clone().unwrap_or_default(),
            ),
        ])
    }

    fn draft_from_form(values: &FormValues, _ctx: &()) -> Result<SupplierDraft, ValidationError> {
        Ok(SupplierDraft {
            f_name: text(values, "f_name"),
            l_name: text(values, "l_name"),
            contact: text(values, "contact"),
            email: text(values, "email"),
            address: text(values, "address"),
            product_supplied: text(values, "product_supplied"),
            supplier_id: None,
        })
    }
}

impl TableProjection for Supplier {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Contact", "Email", "Address", "Product Supplied"]
    }

    fn cells(&self, _ctx: &()) -> Vec<Cell> {
        vec![
            Cell::text(self.supplier_id.to_string()),
            Cell::Strong(self.full_name()),
            Cell::text(or_na(self.contact.as_deref())),
            Cell::text(or_na(self.email.as_deref())),
            Cell::text(or_na(self.address.as_deref())),
            Cell::text(or_na(self.product_supplied.as_deref())),
        ]
    }
}
