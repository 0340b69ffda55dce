//! Confirm Button Component
//!
//! Two-step button for destructive actions: the first click arms it, the
//! second runs the action.

use leptos::prelude::*;

/// Button that asks before running `on_confirm`.
///
/// # Arguments
/// * `button_class` - CSS class of the idle button
/// * `label` - idle button text
/// * `prompt` - question shown while armed (e.g. "¿Vaciar el tablero?")
/// * `on_confirm` - runs once the user confirms
#[component]
pub fn ConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into)] label: String,
    #[prop(into)] prompt: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let armed = RwSignal::new(false);
    let idle_title = prompt.clone();

    let idle = move || {
        view! {
            <button
                class=button_class.clone()
                title=idle_title.clone()
                on:click=move |ev| {
                    ev.stop_propagation();
                    armed.set(true);
                }
            >
                {label.clone()}
            </button>
        }
    };

    view! {
        <Show when=move || armed.get() fallback=idle>
            <span class="confirm-prompt" role="alertdialog">
                <span class="confirm-prompt-text">{prompt.clone()}</span>
                <button
                    class="confirm-btn"
                    title="Confirmar"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        armed.set(false);
                        on_confirm.run(());
                    }
                >
                    "Sí"
                </button>
                <button
                    class="cancel-btn"
                    title="Cancelar"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        armed.set(false);
                    }
                >
                    "No"
                </button>
            </span>
        </Show>
    }
}
