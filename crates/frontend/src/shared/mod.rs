pub mod api_client;
pub mod api_utils;
pub mod components;
pub mod config;
pub mod context;
pub mod date_utils;
pub mod error;
pub mod form;
pub mod http;
pub mod icons;
pub mod list_utils;
pub mod list_view;
pub mod modal;
pub mod notify;
pub mod table;

#[cfg(test)]
pub mod testing;
