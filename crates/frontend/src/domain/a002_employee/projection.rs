use contracts::domain::a002_employee::aggregate::{Employee, EmployeeDraft};
use contracts::shared::validation::ValidationError;

use crate::shared::date_utils::to_input_date;
use crate::shared::form::{
    number, number_input, optional_text, text, values, EntityForm, FieldKind, FormField,
    FormValues,
};
use crate::shared::table::{date_or, money, or_na, Cell, TableProjection};

impl EntityForm for Employee {
    type Context = ();

    fn form_fields(_ctx: &(), _editing: bool) -> Vec<FormField> {
        vec![
            FormField::text("f_name", "First Name").required(),
            FormField::text("l_name", "Last Name").required(),
            FormField::text("contact", "Contact"),
            FormField::text("position", "Position"),
            FormField::new("salary", "Salary", FieldKind::Number),
            FormField::new("hire_date", "Hire Date", FieldKind::Date),
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
            ("position", self.position.clone().unwrap_or_default()),
            ("salary", number_input(self.salary)),
            ("hire_date", to_input_date(self.hire_date.as_deref().unwrap_or_default())),
        ])
    }

    fn draft_from_form(values: &FormValues, _ctx: &()) -> Result<EmployeeDraft, ValidationError> {
        Ok(EmployeeDraft {
            f_name: text(values, "f_name"),
            l_name: text(values, "l_name"),
            contact: text(values, "contact"),
            position: text(values, "position"),
            salary: number(values, "salary"),
            hire_date: optional_text(values, "hire_date"),
            employee_id: None,
        })
    }
}

impl TableProjection for Employee {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Contact", "Position", "Salary", "Hire Date"]
    }

    fn cells(&self, _ctx: &()) -> Vec<Cell> {
        let salary = match self.salary.filter(|s| *s != 0.0) {
            Some(s) => money(Some(s)),
            None => "N/A".to_string(),
        };
        vec![
            Cell::text(self.employee_id.to_string()),
            Cell::Strong(self.full_name()),
            Cell::text(or_na(self.contact.as_deref())),
            Cell::text(or_na(self.position.as_deref())),
            Cell::text(salary),
            Cell::text(date_or(self.hire_date.as_deref(), "N/A")),
        ]
    }
}
