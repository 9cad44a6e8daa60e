pub mod a001_customer;
pub mod a002_employee;
pub mod a003_product;
pub mod a004_supplier;
pub mod a005_sale;
pub mod common;
