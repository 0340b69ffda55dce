//! Kanban Frontend App
//!
//! Root component: provides context, restores the session and switches
//! between the auth page and the board.

use kanban_core::{CardId, DropTarget, SessionState};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::*;
use reactive_stores::Store;

use crate::components::{AuthPage, KanbanBoard, Toaster};
use crate::config::AppConfig;
use crate::context::{AppContext, BoardDnd};
use crate::store::{store_drag_end, store_drag_over, store_drag_start, store_push_notice, AppState, AppStore};

/// Drag handlers wired to the reconciler. The gesture is applied locally
/// first; the single remote update follows.
fn create_board_dnd(ctx: &AppContext, store: AppStore) -> BoardDnd {
    let board = ctx.board.clone();
    let toast_ms = ctx.toast_ms();
    let handlers = DndHandlers {
        // The card's own slot is where it rests until the pointer moves on
        on_start: Callback::new(move |card_id: CardId| {
            store_drag_start(&store, &card_id);
            Some(DropTarget::Card(card_id))
        }),
        on_over: Callback::new(move |(_, target): (CardId, DropTarget)| store_drag_over(&store, &target)),
        on_drop: Callback::new(move |(card_id, target): (CardId, Option<DropTarget>)| {
            log::debug!("[DND] drop {} on {:?}", card_id, target);
            let Some(moved) = store_drag_end(&store, target.as_ref()) else {
                return;
            };
            let board = board.clone();
            spawn_local(async move {
                if let Err(notice) = board.persist_move(&moved).await {
                    store_push_notice(&store, notice, toast_ms);
                }
            });
        }),
    };
    create_dnd_signals(handlers)
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let ctx = AppContext::new(config);
    let store = Store::new(AppState::default());
    let session = ctx.session;

    // Document listeners live for the page, so the DnD is set up here once
    let dnd = create_board_dnd(&ctx, store);
    bind_global_mouseup(dnd);

    provide_context(store);
    provide_context(dnd);
    provide_context(ctx.clone());

    // Restore session on mount
    Effect::new(move |_| {
        let auth = ctx.auth.clone();
        spawn_local(async move {
            let restored = auth.restore().await;
            session.set(restored);
        });
    });

    view! {
        {move || match session.get() {
            SessionState::Loading => view! { <div class="loading-screen">"Cargando..."</div> }.into_any(),
            SessionState::SignedOut => view! { <AuthPage /> }.into_any(),
            SessionState::SignedIn(user) => view! { <KanbanBoard user=user /> }.into_any(),
        }}
        <Toaster />
    }
}
