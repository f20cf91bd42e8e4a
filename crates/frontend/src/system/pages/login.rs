use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::system::auth::context::{do_login, use_auth};

/// Trimmed username and the password, or the message for an incomplete form
fn credentials(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() {
        return Err("Informe o usuário");
    }
    if password.is_empty() {
        return Err("Informe a senha");
    }
    Ok((username.to_string(), password.to_string()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);

    let (_, set_auth_state) = use_auth();

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let (user, pass) = match credentials(&username.get_untracked(), &password.get_untracked()) {
            Ok(pair) => pair,
            Err(message) => {
                error.set(Some(message.to_string()));
                return;
            }
        };

        submitting.set(true);
        error.set(None);
        spawn_local(async move {
            // On success the auth state swaps this page for the dashboard
            if let Err(e) = do_login(user, pass, set_auth_state).await {
                password.set(String::new());
                error.set(Some(e));
            }
            submitting.set(false);
        });
    };

    view! {
        <div class="login">
            <form class="login__card" on:submit=submit>
                <h1 class="login__brand">"Comex Dashboard"</h1>
                <p class="login__subtitle">"Embarques de importação"</p>

                {move || error.get().map(|e| view! { <div class="warning-box warning-box--error">{e}</div> })}

                <label class="login__field">
                    <span>"Usuário"</span>
                    <input
                        type="text"
                        autocomplete="username"
                        prop:value=username
                        on:input=move |ev| username.set(event_target_value(&ev))
                        disabled=move || submitting.get()
                    />
                </label>
                <label class="login__field">
                    <span>"Senha"</span>
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=password
                        on:input=move |ev| password.set(event_target_value(&ev))
                        disabled=move || submitting.get()
                    />
                </label>

                <button type="submit" class="login__submit" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Entrando..." } else { "Entrar" }}
                </button>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_trim_username_only() {
        assert_eq!(
            credentials("  admin ", " pw "),
            Ok(("admin".to_string(), " pw ".to_string()))
        );
    }

    #[test]
    fn test_credentials_require_both_fields() {
        assert_eq!(credentials("   ", "x"), Err("Informe o usuário"));
        assert_eq!(credentials("admin", ""), Err("Informe a senha"));
    }
}
