use async_trait::async_trait;
use contracts::domain::a003_product::aggregate::{Product, ProductDraft, DEFAULT_PRODUCT_CATEGORY};
use contracts::domain::a004_supplier::aggregate::Supplier;
use contracts::shared::validation::ValidationError;

use crate::shared::api_client::ApiClient;
use crate::shared::error::ApiError;
use crate::shared::form::{
    integer, number, number_input, reference, text, values, EntityForm, FieldKind, FormField,
    FormValues, SelectOption,
};
use crate::shared::table::{money, or_na, Cell, TableProjection};

/// Suppliers offered by the product form, `(supplier_id, name)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupplierOptions {
    pub suppliers: Vec<(i64, String)>,
}

impl SupplierOptions {
    pub fn from_suppliers(suppliers: &[Supplier]) -> Self {
        Self {
            suppliers: suppliers
                .iter()
                .map(|s| (s.supplier_id, s.full_name()))
                .collect(),
        }
    }

    pub fn name(&self, id: i64) -> Option<&str> {
        self.suppliers
            .iter()
            .find(|(sid, _)| *sid == id)
            .map(|(_, name)| name.as_str())
    }
}

#[async_trait(?Send)]
impl EntityForm for Product {
    type Context = SupplierOptions;

    async fn load_context(api: &ApiClient) -> Result<SupplierOptions, ApiError> {
        let listing = api.fetch_collection::<Supplier>().await?;
        Ok(SupplierOptions::from_suppliers(&listing.records))
    }

    fn form_fields(ctx: &SupplierOptions, _editing: bool) -> Vec<FormField> {
        let suppliers = ctx
            .suppliers
            .iter()
            .map(|(id, name)| SelectOption::new(id.to_string(), name.clone()))
            .collect();
        vec![
            FormField::text("product_name", "Product Name").required(),
            FormField::text("product_description", "Description"),
            FormField::text("category", "Category"),
            FormField::new("unit_price", "Unit Price", FieldKind::Number),
            FormField::new("supplier_id", "Supplier", FieldKind::Select(suppliers)),
            FormField::new("current_stock", "Current Stock", FieldKind::Number),
        ]
    }

    fn blank_form(_ctx: &SupplierOptions) -> FormValues {
        values([("category", DEFAULT_PRODUCT_CATEGORY.to_string())])
    }

    fn form_values(&self) -> FormValues {
        values([
            ("product_name", self.product_name.clone().unwrap_or_default()),
            (
                "product_description",
                self.product_description.clone().unwrap_or_default(),
            ),
            ("category", self.category.clone().unwrap_or_default()),
            ("unit_price", number_input(self.unit_price)),
            (
                "supplier_id",
                self.supplier_id.map(|id| id.to_string()).unwrap_or_default(),
            ),
            (
                "current_stock",
                self.current_stock.map(|s| s.to_string()).unwrap_or_default(),
            ),
        ])
    }

    fn draft_from_form(
        values: &FormValues,
        _ctx: &SupplierOptions,
    ) -> Result<ProductDraft, ValidationError> {
        Ok(ProductDraft {
            product_name: text(values, "product_name"),
            product_description: text(values, "product_description"),
            category: text(values, "category"),
            unit_price: number(values, "unit_price"),
            supplier_id: reference(values, "supplier_id"),
            current_stock: integer(values, "current_stock"),
            product_id: None,
        })
    }
}

impl TableProjection for Product {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Description", "Category", "Unit Price", "Supplier", "Stock"]
    }

    fn cells(&self, ctx: &SupplierOptions) -> Vec<Cell> {
        let price = match self.unit_price.filter(|p| *p != 0.0) {
            Some(p) => money(Some(p)),
            None => "N/A".to_string(),
        };
        let supplier = match self.supplier_id {
            Some(id) => ctx
                .name(id)
                .map(str::to_string)
                .unwrap_or_else(|| id.to_string()),
            None => "N/A".to_string(),
        };
        vec![
            Cell::text(self.product_id.to_string()),
            Cell::Strong(or_na(self.product_name.as_deref())),
            Cell::text(or_na(self.product_description.as_deref())),
            Cell::text(or_na(self.category.as_deref())),
            Cell::text(price),
            Cell::text(supplier),
            Cell::text(self.current_stock.unwrap_or(0).to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::validation::Validate;

    fn lookup() -> SupplierOptions {
        SupplierOptions {
            suppliers: vec![(4, "Kwame Electric".to_string())],
        }
    }

    #[test]
    fn test_validation_uses_the_name_actually_read() {
        let mut form = Product::blank_form(&lookup());
        form.insert("product_name", "   ".into());
        let draft = Product::draft_from_form(&form, &lookup()).unwrap();
        assert_eq!(draft.validate().unwrap_err().to_string(), "Product name is required!");

        form.insert("product_name", "Cable 2.5mm".into());
        let draft = Product::draft_from_form(&form, &lookup()).unwrap();
        assert!(draft.validate().is_ok());
        assert_eq!(draft.category, "Electrical");
    }

    #[test]
    fn test_numbers_default_to_zero() {
        let mut form = Product::blank_form(&lookup());
        form.insert("product_name", "Socket".into());
        form.insert("unit_price", "".into());
        form.insert("current_stock", "many".into());
        let draft = Product::draft_from_form(&form, &lookup()).unwrap();
        assert_eq!(draft.unit_price, 0.0);
        assert_eq!(draft.current_stock, 0);
        assert_eq!(draft.supplier_id, None);
    }

    #[test]
    fn test_supplier_column_resolves_names() {
        let product: Product = serde_json::from_str(
            r#"{"product_id":1,"product_name":"Bulb","unit_price":"12.5","supplier_id":4}"#,
        )
        .unwrap();
        let cells: Vec<String> = product.cells(&lookup()).iter().map(|c| c.as_text().to_string()).collect();
        assert_eq!(cells, vec!["1", "Bulb", "N/A", "N/A", "GHc 12.50", "Kwame Electric", "0"]);

        let unknown: Product = serde_json::from_str(r#"{"product_id":2,"supplier_id":7}"#).unwrap();
        assert_eq!(unknown.cells(&lookup())[5].as_text(), "7");
    }
}
