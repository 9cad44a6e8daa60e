pub mod projection;
pub mod ui;
