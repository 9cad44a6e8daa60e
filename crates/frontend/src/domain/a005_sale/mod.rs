pub mod lookup;
pub mod projection;
pub mod ui;
