use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::api_client::ApiClient;
use crate::shared::config::{load_config, ClientConfig};
use crate::shared::context::provide_app_context;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let config = load_config().unwrap_or_else(|e| {
        log::error!("Invalid embedded configuration, using defaults: {}", e);
        ClientConfig::default()
    });
    log::info!(
        "Backend {} (timeout {}s, page size {})",
        config.api.base_url,
        config.api.timeout_secs,
        config.page_size()
    );

    let api = ApiClient::browser(&config);
    provide_app_context(config, api);
    provide_context(AppGlobalContext::new());

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
    }
}
