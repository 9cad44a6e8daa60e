//! Generic list-view controller: one instance per entity page owns the
//! collection, filter, page position and mutation lifecycle.

pub mod controller;
pub mod state;

pub use controller::{ListViewController, Outcome};
pub use state::{FilterState, Matcher, MutationState, Page, PageState};
