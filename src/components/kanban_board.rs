//! Kanban Board Component
//!
//! Header with the board title and user actions, the three columns, and
//! the overlay that follows the pointer while a card is dragged.

use kanban_core::notice::messages;
use kanban_core::{AuthUser, BoardState, ColumnId, Notice};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{ConfirmButton, KanbanColumn, ProfileSettings};
use crate::context::{use_app_context, use_board_dnd};
use crate::store::{store_clear_board, store_push_notice, store_set_board, use_app_store, AppStateStoreFields};

#[component]
pub fn KanbanBoard(user: AuthUser) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let dnd = use_board_dnd();
    let toast_ms = ctx.toast_ms();

    let (show_profile, set_show_profile) = signal(false);

    // Load board on mount
    {
        let ctx = ctx.clone();
        Effect::new(move |_| {
            let ctx = ctx.clone();
            store.loading().set(true);
            spawn_local(async move {
                let Some(result) = ctx.board.load().await else {
                    return;
                };
                store_set_board(&store, result.board);
                if let Some(notice) = result.notice {
                    store_push_notice(&store, notice, ctx.toast_ms());
                }
                store.loading().set(false);
            });
        });
    }

    let on_clear = {
        let ctx = ctx.clone();
        Callback::new(move |_| {
            let ctx = ctx.clone();
            spawn_local(async move {
                match ctx.board.clear_all().await {
                    Ok(()) => {
                        store_clear_board(&store);
                        store_push_notice(&store, Notice::success(messages::BOARD_CLEARED), ctx.toast_ms());
                    }
                    Err(notice) => store_push_notice(&store, notice, ctx.toast_ms()),
                }
            });
        })
    };

    let on_logout = {
        let ctx = ctx.clone();
        move |_| {
            log::info!("[AUTH] sign out");
            let signed_out = ctx.auth.sign_out();
            store_set_board(&store, BoardState::empty());
            ctx.session.set(signed_out);
        }
    };

    let dragged_title = move || {
        let id = dnd.dragging_id_read.get()?;
        store.board().with(|board| board.card(&id).map(|card| card.title.clone()))
    };

    let display_name = if user.name.is_empty() { user.email.clone() } else { user.name.clone() };
    let profile_user = user.clone();

    view! {
        <div class="board-layout">
            <header class="board-header">
                <h1 class="board-title">{move || store.board().with(|board| board.title.clone())}</h1>
                <div class="board-user">
                    <span class="board-user-name" title=user.email.clone()>{display_name}</span>
                    <button class="profile-btn" on:click=move |_| set_show_profile.set(true)>"Perfil"</button>
                    <ConfirmButton
                        button_class="clear-board-btn"
                        label="Vaciar tablero"
                        prompt="¿Borrar todas las tareas?"
                        on_confirm=on_clear
                    />
                    <button class="logout-btn" on:click=on_logout>"Cerrar sesión"</button>
                </div>
            </header>

            <Show when=move || store.loading().get()>
                <p class="board-loading">"Cargando tareas..."</p>
            </Show>

            <main class="board-columns">
                {ColumnId::ALL
                    .into_iter()
                    .map(|column| view! { <KanbanColumn column=column /> })
                    .collect_view()}
            </main>

            {move || dragged_title().map(|title| {
                let (x, y) = dnd.pointer_read.get();
                view! {
                    <div
                        class="task-card drag-overlay"
                        style=format!("position: fixed; left: {}px; top: {}px; pointer-events: none;", x + 8, y + 8)
                    >
                        <span class="task-title">{title}</span>
                    </div>
                }
            })}

            <Show when=move || show_profile.get()>
                <ProfileSettings
                    user=profile_user.clone()
                    on_close=move |_| set_show_profile.set(false)
                />
            </Show>
        </div>
    }
}
