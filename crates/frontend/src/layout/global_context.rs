use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Pages reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppPage {
    Dashboard,
    Customers,
    Employees,
    Products,
    Suppliers,
    Sales,
    Users,
}

impl AppPage {
    pub const ALL: [AppPage; 7] = [
        AppPage::Dashboard,
        AppPage::Customers,
        AppPage::Employees,
        AppPage::Products,
        AppPage::Suppliers,
        AppPage::Sales,
        AppPage::Users,
    ];

    /// Value of the `?active=` query parameter
    pub fn key(self) -> &'static str {
        match self {
            AppPage::Dashboard => "dashboard",
            AppPage::Customers => "customers",
            AppPage::Employees => "employees",
            AppPage::Products => "products",
            AppPage::Suppliers => "suppliers",
            AppPage::Sales => "sales",
            AppPage::Users => "users",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AppPage::Dashboard => "Dashboard",
            AppPage::Customers => "Customers",
            AppPage::Employees => "Employees",
            AppPage::Products => "Products",
            AppPage::Suppliers => "Suppliers",
            AppPage::Sales => "Sales",
            AppPage::Users => "Users",
        }
    }

    /// Icon names match the page keys.
    pub fn icon(self) -> &'static str {
        self.key()
    }

    pub fn from_key(key: &str) -> Option<AppPage> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<AppPage>,
    pub left_open: RwSignal<bool>,
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(AppPage::Dashboard),
            left_open: RwSignal::new(true),
        }
    }

    pub fn open(&self, page: AppPage) {
        log::debug!("Opening page {}", page.key());
        self.active.set(page);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|open| *open = !*open);
    }

    /// Restore the active page from `?active=` and keep the URL in sync.
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        if let Some(page) = page_from_query(&search) {
            self.active.set(page);
        }

        let this = *self;
        Effect::new(move |_| {
            let page = this.active.get();
            let query_string = serde_qs::to_string(&HashMap::from([("active", page.key())]))
                .unwrap_or_default();
            let new_url = format!("?{}", query_string);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current_search == new_url {
                return;
            }
            if let Some(w) = window() {
                if let Ok(history) = w.history() {
                    let _ = history.replace_state_with_url(
                        &wasm_bindgen::JsValue::NULL,
                        "",
                        Some(&new_url),
                    );
                }
            }
        });
    }
}

fn page_from_query(search: &str) -> Option<AppPage> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get("active").and_then(|key| AppPage::from_key(key))
}
