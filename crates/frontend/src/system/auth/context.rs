use contracts::system::auth::{UserInfo, UserProfile};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
    pub profile: Option<UserProfile>,
    /// Stored session is being validated
    pub restoring: bool,
}

impl AuthState {
    pub fn signed_in(access_token: String, user_info: UserInfo) -> Self {
        Self {
            access_token: Some(access_token),
            user_info: Some(user_info),
            profile: None,
            restoring: false,
        }
    }
}

/// Restores a stored session: the access token is checked first, then the
/// refresh token. Any failure leaves the user signed out.
async fn restore_session() -> Option<AuthState> {
    let access_token = storage::get_access_token()?;
    if let Ok(user_info) = api::get_current_user(&access_token).await {
        return Some(AuthState::signed_in(access_token, user_info));
    }

    let refresh_token = storage::get_refresh_token()?;
    let response = api::refresh_token(refresh_token).await.ok()?;
    storage::save_access_token(&response.access_token);
    let user_info = api::get_current_user(&response.access_token).await.ok()?;
    Some(AuthState::signed_in(response.access_token, user_info))
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState {
        restoring: storage::get_access_token().is_some(),
        ..Default::default()
    });

    Effect::new(move |_| {
        spawn_local(async move {
            if storage::get_access_token().is_none() {
                return;
            }
            match restore_session().await {
                Some(state) => set_auth_state.set(state),
                None => {
                    log::info!("Stored session is no longer valid");
                    storage::clear_tokens();
                    set_auth_state.set(AuthState::default());
                }
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Sign in and store the tokens
pub async fn do_login(
    username: String,
    password: String,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), String> {
    let response = api::login(username, password).await?;

    storage::save_access_token(&response.access_token);
    storage::save_refresh_token(&response.refresh_token);

    set_auth_state.set(AuthState::signed_in(response.access_token, response.user));
    Ok(())
}

/// Sign out; the refresh token is revoked on a best-effort basis
pub async fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    if let Some(refresh_token) = storage::get_refresh_token() {
        if let Err(e) = api::logout(refresh_token).await {
            log::warn!("Logout request failed: {}", e);
        }
    }

    storage::clear_tokens();
    set_auth_state.set(AuthState::default());
}
