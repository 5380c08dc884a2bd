//! Login Page
//!
//! Sign-in and registration forms shown while unauthenticated.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiClient};
use crate::context::{use_app_context, NoticeKind};
use crate::error::ApiError;
use crate::models::{LoginRequest, RegisterRequest, Role};
use crate::validation;

#[derive(Debug, Clone, Copy, PartialEq)]
enum AuthMode {
    Login,
    Register,
}

/// Check the auth form before any request is sent
fn validate_form(mode: AuthMode, name: &str, email: &str, password: &str) -> Result<(), String> {
    let name_check = match mode {
        AuthMode::Register => validation::required("Name", name),
        AuthMode::Login => Ok(()),
    };
    validation::first_error([
        name_check,
        validation::required("Email", email),
        validation::email(email),
        validation::required("Password", password),
        validation::password(password),
    ])
}

/// Inline text for a failed sign-in or registration
fn auth_error_text(error: &ApiError) -> String {
    match error {
        ApiError::Unauthorized { message } => {
            message.clone().unwrap_or_else(|| "Invalid email or password".to_string())
        }
        other => other.banner(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();
    let client = expect_context::<ApiClient>();

    let (mode, set_mode) = signal(AuthMode::Login);
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (role, set_role) = signal(Role::Staff);
    let (error, set_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let current_mode = mode.get();
        let (name, email, password) = (name.get(), email.get().trim().to_string(), password.get());

        if let Err(message) = validate_form(current_mode, &name, &email, &password) {
            set_error.set(Some(message));
            return;
        }
        set_error.set(None);
        set_submitting.set(true);

        let client = client.clone();
        let role = role.get();
        spawn_local(async move {
            let result = match current_mode {
                AuthMode::Login => {
                    let args = LoginRequest { email: &email, password: &password };
                    api::login(&client, &args).await
                }
                AuthMode::Register => {
                    let args = RegisterRequest {
                        name: name.trim(),
                        email: &email,
                        password: &password,
                        role,
                    };
                    api::register(&client, &args).await
                }
            };
            set_submitting.set(false);
            match result {
                Ok(auth) => {
                    ctx.login(auth.into());
                    if current_mode == AuthMode::Register {
                        ctx.notify(NoticeKind::Success, "Account created");
                    }
                }
                Err(e) => {
                    log::warn!("Authentication failed: {}", e);
                    set_error.set(Some(auth_error_text(&e)));
                }
            }
        });
    };

    view! {
        <div class="login-screen">
            <form class="card login-card" on:submit=on_submit>
                <h1>{move || if mode.get() == AuthMode::Login { "Sign in" } else { "Create account" }}</h1>

                <Show when=move || mode.get() == AuthMode::Register>
                    <label>
                        "Name"
                        <input
                            type="text"
                            prop:value=move || name.get()
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                        />
                    </label>
                </Show>

                <label>
                    "Email"
                    <input
                        type="email"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Password"
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>

                <Show when=move || mode.get() == AuthMode::Register>
                    <label>
                        "Role"
                        <select on:change=move |ev| {
                            let picked = event_target_value(&ev);
                            set_role.set(if picked == "admin" { Role::Admin } else { Role::Staff })
                        }>
                            <option value="staff" selected=move || role.get() == Role::Staff>"Staff"</option>
                            <option value="admin" selected=move || role.get() == Role::Admin>"Admin"</option>
                        </select>
                    </label>
                </Show>

                {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}

                <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                    {move || match (mode.get(), submitting.get()) {
                        (_, true) => "Please wait...",
                        (AuthMode::Login, false) => "Sign in",
                        (AuthMode::Register, false) => "Register",
                    }}
                </button>

                <button
                    type="button"
                    class="link-btn"
                    on:click=move |_| {
                        set_error.set(None);
                        set_mode.update(|m| {
                            *m = match *m {
                                AuthMode::Login => AuthMode::Register,
                                AuthMode::Register => AuthMode::Login,
                            }
                        });
                    }
                >
                    {move || if mode.get() == AuthMode::Login {
                        "No account? Register"
                    } else {
                        "Already registered? Sign in"
                    }}
                </button>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_ignores_name() {
        assert!(validate_form(AuthMode::Login, "", "owner@shop.in", "secret1").is_ok());
    }

    #[test]
    fn test_register_requires_name_and_valid_fields() {
        assert_eq!(
            validate_form(AuthMode::Register, " ", "owner@shop.in", "secret1"),
            Err("Name is required".to_string())
        );
        assert!(validate_form(AuthMode::Register, "Asha", "owner", "secret1").is_err());
        assert!(validate_form(AuthMode::Register, "Asha", "owner@shop.in", "123").is_err());
        assert!(validate_form(AuthMode::Register, "Asha", "owner@shop.in", "123456").is_ok());
    }

    #[test]
    fn test_rejected_credentials_text() {
        let rejected =
            crate::api::classify_status(401, r#"{"message":"Account is disabled"}"#).unwrap_err();
        assert_eq!(auth_error_text(&rejected), "Account is disabled");
        let bare = ApiError::Unauthorized { message: None };
        assert_eq!(auth_error_text(&bare), "Invalid email or password");
        assert!(auth_error_text(&ApiError::Server { status: 500 }).contains("server"));
    }
}
