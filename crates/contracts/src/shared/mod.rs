pub mod envelope;
pub mod lenient;
pub mod validation;
