//! Application-wide handles provided through the Leptos context.

use contracts::domain::common::Entity;
use leptos::prelude::*;

use super::api_client::ApiClient;
use super::config::ClientConfig;
use super::list_view::ListViewController;

#[derive(Clone, Copy)]
pub struct AppContext {
    api: StoredValue<ApiClient, LocalStorage>,
    config: StoredValue<ClientConfig>,
}

pub fn provide_app_context(config: ClientConfig, api: ApiClient) {
    provide_context(AppContext {
        api: StoredValue::new_local(api),
        config: StoredValue::new(config),
    });
}

/// Shared API client (one session, one 401 hook).
pub fn use_api() -> ApiClient {
    expect_context::<AppContext>().api.get_value()
}

pub fn use_config() -> ClientConfig {
    expect_context::<AppContext>().config.get_value()
}

/// Fresh controller for one list page, sized from the configuration.
pub fn use_list_controller<E: Entity>() -> ListViewController<E> {
    ListViewController::new(use_api(), use_config().page_size())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::testing::{FakeBackend, BASE_URL};
    use crate::system::auth::storage::Session;
    use contracts::domain::a001_customer::aggregate::Customer;
    use contracts::system::users::User;

    #[test]
    fn test_list_controllers_share_client_and_page_size() {
        let owner = Owner::new();
        owner.with(|| {
            let mut config = ClientConfig::default();
            config.list.page_size = 4;
            let api = ApiClient::new(FakeBackend::new(), BASE_URL, Session::in_memory());
            provide_app_context(config, api);

            let customers = use_list_controller::<Customer>();
            let users = use_list_controller::<User>();
            assert_eq!(customers.page_size(), 4);
            assert_eq!(users.page_size(), 4);
            assert_eq!(customers.api().url("/x"), users.api().url("/x"));
        });
    }
}
