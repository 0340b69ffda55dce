//! Auth Page Component
//!
//! Login and register forms sharing one card. A successful login switches
//! the session; a successful registration returns to the login form.

use kanban_core::notice::messages;
use kanban_core::validation::{AuthMode, Credentials};
use kanban_core::Notice;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::store::{store_push_notice, use_app_store};

#[component]
pub fn AuthPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let toast_ms = ctx.toast_ms();

    let (mode, set_mode) = signal(AuthMode::Login);
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (name, set_name) = signal(String::new());
    let (error, set_error) = signal(None::<String>);
    let (submitting, set_submitting) = signal(false);

    let is_register = move || mode.get() == AuthMode::Register;

    let toggle_mode = move |_| {
        set_mode.update(|m| {
            *m = match m {
                AuthMode::Login => AuthMode::Register,
                AuthMode::Register => AuthMode::Login,
            }
        });
        set_error.set(None);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let current_mode = mode.get_untracked();
        let credentials = Credentials {
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            name: name.get_untracked().trim().to_string(),
        };
        if let Err(invalid) = credentials.validate(current_mode) {
            set_error.set(Some(invalid.to_string()));
            return;
        }
        set_error.set(None);
        set_submitting.set(true);

        let ctx = ctx.clone();
        spawn_local(async move {
            match current_mode {
                AuthMode::Login => match ctx.auth.sign_in(&credentials).await {
                    Ok(session) => {
                        ctx.session.set(session);
                        store_push_notice(&store, Notice::success(messages::WELCOME), toast_ms);
                    }
                    Err(e) => {
                        set_error.set(Some(e.message.clone()));
                        store_push_notice(&store, Notice::error(e.message), toast_ms);
                    }
                },
                AuthMode::Register => match ctx.auth.sign_up(&credentials).await {
                    Ok(()) => {
                        store_push_notice(&store, Notice::success(messages::ACCOUNT_CREATED), toast_ms);
                        set_password.set(String::new());
                        set_mode.set(AuthMode::Login);
                    }
                    Err(e) => {
                        set_error.set(Some(e.message.clone()));
                        store_push_notice(&store, Notice::error(e.message), toast_ms);
                    }
                },
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>{move || if is_register() { "Crear cuenta" } else { "Iniciar sesión" }}</h1>

                <Show when=is_register>
                    <label>
                        "Nombre"
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
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </label>

                <label>
                    "Contraseña"
                    <input
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>

                {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}

                <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                    {move || match (is_register(), submitting.get()) {
                        (_, true) => "Enviando...",
                        (true, false) => "Registrarse",
                        (false, false) => "Entrar",
                    }}
                </button>

                <button type="button" class="link-btn" on:click=toggle_mode>
                    {move || if is_register() { "¿Ya tienes cuenta? Inicia sesión" } else { "¿No tienes cuenta? Regístrate" }}
                </button>
            </form>
        </div>
    }
}
