//! Profile Settings Component
//!
//! Modal to edit the locally stored profile (name and avatar URL).

use kanban_core::notice::messages;
use kanban_core::profile::{initials, Profile};
use kanban_core::{AuthUser, Notice};
use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{store_push_notice, use_app_store};

#[component]
pub fn ProfileSettings(user: AuthUser, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let toast_ms = ctx.toast_ms();

    let profile = match ctx.profiles.load(&user.id) {
        Ok(profile) => profile,
        Err(e) => {
            log::warn!("[PROFILE] load failed for {}: {}", user.id, e);
            store_push_notice(&store, Notice::error(messages::PROFILE_LOAD_FAILED), toast_ms);
            Profile::new(&user.id)
        }
    };

    let (full_name, set_full_name) = signal(profile.full_name.clone().unwrap_or_default());
    let (avatar_url, set_avatar_url) = signal(profile.avatar_url.clone().unwrap_or_default());

    let email = user.email.clone();
    let avatar = move || {
        let url = avatar_url.get();
        if url.trim().is_empty() {
            view! { <span class="avatar avatar-initials">{initials(&full_name.get(), &email)}</span> }.into_any()
        } else {
            view! { <img class="avatar" src=url alt="Avatar" /> }.into_any()
        }
    };

    let on_save = move |_| {
        let edited = profile.edited(&full_name.get_untracked(), &avatar_url.get_untracked());
        match ctx.profiles.save(&edited) {
            Ok(()) => {
                store_push_notice(&store, Notice::success(messages::PROFILE_SAVED), toast_ms);
                on_close.run(());
            }
            Err(e) => {
                log::warn!("[PROFILE] save failed: {}", e);
                store_push_notice(&store, Notice::error(messages::PROFILE_SAVE_FAILED), toast_ms);
            }
        }
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <div class="modal profile-settings" on:click=|ev| ev.stop_propagation()>
                <h2>"Perfil"</h2>
                <div class="profile-avatar">{avatar}</div>
                <p class="profile-email">{user.email.clone()}</p>

                <label>
                    "Nombre completo"
                    <input
                        type="text"
                        prop:value=move || full_name.get()
                        on:input=move |ev| set_full_name.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "URL del avatar"
                    <input
                        type="url"
                        prop:value=move || avatar_url.get()
                        on:input=move |ev| set_avatar_url.set(event_target_value(&ev))
                    />
                </label>

                <div class="modal-actions">
                    <button class="primary-btn" on:click=on_save>"Guardar"</button>
                    <button class="cancel-btn" on:click=move |_| on_close.run(())>"Cancelar"</button>
                </div>
            </div>
        </div>
    }
}
