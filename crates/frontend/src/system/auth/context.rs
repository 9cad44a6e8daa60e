use contracts::system::auth::UserProfile;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use crate::shared::api_client::ApiClient;
use crate::shared::context::use_api;

/// Signed-in user, `None` while the login page is shown.
#[derive(Clone, Copy)]
pub struct AuthState {
    user: RwSignal<Option<UserProfile>>,
}

impl AuthState {
    pub fn user(&self) -> Option<UserProfile> {
        self.user.get()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.with(Option::is_some)
    }

    /// Only admins may add users.
    pub fn is_admin(&self) -> bool {
        self.user.with(|u| u.as_ref().is_some_and(UserProfile::is_admin))
    }

    pub fn signed_in(&self, user: UserProfile) {
        self.user.set(Some(user));
    }

    pub fn signed_out(&self) {
        self.user.set(None);
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let api = use_api();
    let session = api.session().clone();

    let restored = session
        .is_logged_in()
        .then(|| session.current_user().unwrap_or_default());
    let state = AuthState {
        user: RwSignal::new(restored),
    };

    // A 401 anywhere drops back to the login page
    api.on_unauthorized(move || state.signed_out());

    if session.is_logged_in() {
        spawn_local(async move {
            if let Err(e) = api::verify(&api).await {
                log::warn!("Stored session rejected: {}", e);
                api::logout(&api).await;
                state.signed_out();
            }
        });
    }

    provide_context(state);
    children()
}

/// Hook to access auth state
pub fn use_auth() -> AuthState {
    expect_context::<AuthState>()
}

/// Helper: Perform logout
pub fn do_logout(api: ApiClient, state: AuthState) {
    spawn_local(async move {
        api::logout(&api).await;
        state.signed_out();
    });
}
