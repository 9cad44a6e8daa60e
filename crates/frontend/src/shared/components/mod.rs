pub mod confirm_dialog;
pub mod entity_form;
pub mod entity_list;
pub mod filter_panel;
pub mod pagination_controls;
