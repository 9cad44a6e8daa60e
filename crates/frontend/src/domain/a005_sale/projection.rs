use async_trait::async_trait;
use contracts::domain::a005_sale::aggregate::{
    Sale, SaleDraft, DEFAULT_PAYMENT_METHOD, DEFAULT_SALE_STATUS, PAYMENT_METHODS, SALE_STATUSES,
};
use contracts::shared::validation::ValidationError;

use super::lookup::SaleLookup;
use crate::shared::api_client::ApiClient;
use crate::shared::date_utils::{to_input_date, today_iso};
use crate::shared::error::ApiError;
use crate::shared::form::{
    integer, number, number_input, text, values, EntityForm, FieldKind, FormField, FormValues,
    SelectOption,
};
use crate::shared::list_utils::matches_any;
use crate::shared::table::{date_or, money, or_default, or_na, Cell, TableProjection};

/// Badge modifier for a sale status.
pub fn status_class(status: &str) -> &'static str {
    match status {
        "Completed" => "badge--success",
        "Pending" => "badge--warning",
        "Cancelled" => "badge--danger",
        _ => "badge--neutral",
    }
}

fn with_default(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

#[async_trait(?Send)]
impl EntityForm for Sale {
    type Context = SaleLookup;

    async fn load_context(api: &ApiClient) -> Result<SaleLookup, ApiError> {
        SaleLookup::fetch(api).await
    }

    fn form_fields(ctx: &SaleLookup, _editing: bool) -> Vec<FormField> {
        vec![
            FormField::new("customer_id", "Customer", FieldKind::Select(ctx.customer_options()))
                .required(),
            FormField::new("product_id", "Product", FieldKind::Select(ctx.product_options()))
                .required(),
            FormField::new("quantity", "Quantity", FieldKind::Number).required(),
            FormField::new("unit_price", "Unit Price", FieldKind::Number).required(),
            FormField::new("total_amount", "Total Amount", FieldKind::Number).readonly(),
            FormField::new("sale_date", "Sale Date", FieldKind::Date),
            FormField::new(
                "payment_method",
                "Payment Method",
                FieldKind::Select(SelectOption::plain(&PAYMENT_METHODS)),
            ),
            FormField::new(
                "status",
                "Status",
                FieldKind::Select(SelectOption::plain(&SALE_STATUSES)),
            ),
        ]
    }

    fn blank_form(_ctx: &SaleLookup) -> FormValues {
        values([
            ("quantity", "1".to_string()),
            ("sale_date", today_iso()),
            ("payment_method", DEFAULT_PAYMENT_METHOD.to_string()),
            ("status", DEFAULT_SALE_STATUS.to_string()),
        ])
    }

    fn form_values(&self) -> FormValues {
        values([
            (
                "customer_id",
                self.customer_id.map(|id| id.to_string()).unwrap_or_default(),
            ),
            (
                "product_id",
                self.product_id.map(|id| id.to_string()).unwrap_or_default(),
            ),
            (
                "quantity",
                self.quantity.map(|q| q.to_string()).unwrap_or_default(),
            ),
            ("unit_price", number_input(self.unit_price)),
            ("total_amount", number_input(self.total_amount)),
            (
                "sale_date",
                to_input_date(self.sale_date.as_deref().unwrap_or_default()),
            ),
            (
                "payment_method",
                or_default(self.payment_method.as_deref(), DEFAULT_PAYMENT_METHOD),
            ),
            (
                "status",
                or_default(self.status.as_deref(), DEFAULT_SALE_STATUS),
            ),
        ])
    }

    fn draft_from_form(values: &FormValues, _ctx: &SaleLookup) -> Result<SaleDraft, ValidationError> {
        let quantity = integer(values, "quantity");
        let unit_price = number(values, "unit_price");
        Ok(SaleDraft {
            customer_id: integer(values, "customer_id"),
            product_id: integer(values, "product_id"),
            quantity,
            unit_price,
            total_amount: SaleDraft::line_total(quantity, unit_price),
            sale_date: with_default(text(values, "sale_date"), &today_iso()),
            payment_method: with_default(text(values, "payment_method"), DEFAULT_PAYMENT_METHOD),
            status: with_default(text(values, "status"), DEFAULT_SALE_STATUS),
            sale_id: None,
        })
    }

    fn form_changed(values: &mut FormValues, key: &str, ctx: &SaleLookup) {
        if key == "product_id" {
            let picked = Some(integer(values, "product_id"));
            if let Some(price) = ctx.product(picked).and_then(|p| p.price) {
                values.insert("unit_price", number_input(Some(price)));
            }
        }
        if matches!(key, "product_id" | "quantity" | "unit_price") {
            let total = SaleDraft::line_total(integer(values, "quantity"), number(values, "unit_price"));
            values.insert("total_amount", number_input(Some(total)));
        }
    }
}

impl TableProjection for Sale {
    fn headers() -> Vec<&'static str> {
        vec![
            "ID",
            "Customer",
            "Product",
            "Qty",
            "Unit Price",
            "Total",
            "Date",
            "Payment",
            "Status",
        ]
    }

    fn cells(&self, ctx: &SaleLookup) -> Vec<Cell> {
        let status = or_default(self.status.as_deref(), DEFAULT_SALE_STATUS);
        let class = status_class(&status);
        vec![
            Cell::text(self.sale_id.to_string()),
            Cell::Strong(or_na(ctx.customer_name(self.customer_id))),
            Cell::text(or_na(ctx.product_name(self.product_id))),
            Cell::text(self.quantity.unwrap_or(0).to_string()),
            Cell::text(money(self.unit_price)),
            Cell::text(money(self.total_amount)),
            Cell::text(date_or(self.sale_date.as_deref(), "N/A")),
            Cell::text(or_default(
                self.payment_method.as_deref(),
                DEFAULT_PAYMENT_METHOD,
            )),
            Cell::badge(status, class),
        ]
    }

    fn matches_in(&self, query: &str, ctx: &SaleLookup) -> bool {
        let id = self.sale_id.to_string();
        let fields = [
            Some(id.as_str()),
            ctx.customer_name(self.customer_id),
            ctx.product_name(self.product_id),
        ];
        matches_any(fields.into_iter().flatten(), query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_customer::aggregate::Customer;
    use contracts::domain::a003_product::aggregate::Product;
    use contracts::shared::validation::Validate;

    fn lookup() -> SaleLookup {
        let customers: Vec<Customer> =
            serde_json::from_str(r#"[{"customer_id":1,"F_name":"Ann","L_name":"Lee"}]"#).unwrap();
        let products: Vec<Product> = serde_json::from_str(
            r#"[{"product_id":7,"product_name":"Cable","unit_price":"12.50"}]"#,
        )
        .unwrap();
        SaleLookup::new(&customers, &products)
    }

    fn sale() -> Sale {
        serde_json::from_str(
            r#"{"sale_id":31,"customer_id":1,"product_id":7,"quantity":2,"unit_price":"12.50","total_amount":"25.00","sale_date":"2024-05-01"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_picking_a_product_fills_price_and_total() {
        let ctx = lookup();
        let mut form = Sale::blank_form(&ctx);
        form.insert("quantity", "3".into());
        form.insert("product_id", "7".into());
        Sale::form_changed(&mut form, "product_id", &ctx);
        assert_eq!(form["unit_price"], "12.50");
        assert_eq!(form["total_amount"], "37.50");

        form.insert("quantity", "4".into());
        Sale::form_changed(&mut form, "quantity", &ctx);
        assert_eq!(form["total_amount"], "50.00");
    }

    #[test]
    fn test_blank_form_defaults() {
        let form = Sale::blank_form(&lookup());
        assert_eq!(form["payment_method"], "Cash");
        assert_eq!(form["status"], "Completed");
        assert_eq!(form["sale_date"], today_iso());
    }

    #[test]
    fn test_draft_recomputes_total_and_validates() {
        let ctx = lookup();
        let mut form = Sale::blank_form(&ctx);
        form.insert("customer_id", "1".into());
        form.insert("product_id", "7".into());
        form.insert("quantity", "2".into());
        form.insert("unit_price", "12.5".into());
        form.insert("total_amount", "999".into());
        let draft = Sale::draft_from_form(&form, &ctx).unwrap();
        assert_eq!(draft.total_amount, 25.0);
        assert!(draft.validate().is_ok());

        form.insert("unit_price", "0".into());
        let draft = Sale::draft_from_form(&form, &ctx).unwrap();
        assert_eq!(
            draft.validate().unwrap_err().to_string(),
            "Unit price must be greater than 0"
        );

        form.insert("customer_id", "".into());
        let draft = Sale::draft_from_form(&form, &ctx).unwrap();
        assert_eq!(draft.validate().unwrap_err().field, "quantity");
    }

    #[test]
    fn test_search_uses_resolved_names() {
        let ctx = lookup();
        let sale = sale();
        assert!(sale.matches_in("ann", &ctx));
        assert!(sale.matches_in("CABLE", &ctx));
        assert!(sale.matches_in("31", &ctx));
        assert!(!sale.matches_in("bo", &ctx));
        assert!(sale.matches_in("  ", &ctx));
    }

    #[test]
    fn test_cells_fallbacks() {
        let ctx = lookup();
        let cells: Vec<String> = sale().cells(&ctx).iter().map(|c| c.as_text().to_string()).collect();
        assert_eq!(
            cells,
            vec!["31", "Ann Lee", "Cable", "2", "GHc 12.50", "GHc 25.00", "01/05/2024", "Cash", "Completed"]
        );

        let bare: Sale = serde_json::from_str(r#"{"sale_id":2,"customer_id":9}"#).unwrap();
        let cells = bare.cells(&ctx);
        assert_eq!(cells[1].as_text(), "N/A");
        assert_eq!(cells[3].as_text(), "0");
        assert_eq!(cells[8], Cell::badge("Completed", "badge--success"));
    }
}
