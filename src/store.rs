//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use gloo_timers::future::TimeoutFuture;
use kanban_core::{BoardState, Card, CardMove, DragReconciler, DropTarget, Notice};
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

/// A visible notice
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub notice: Notice,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Columns and cards of the signed-in user's board
    pub board: BoardState,
    /// Gesture in progress, if any
    pub drag: DragReconciler,
    pub toasts: Vec<Toast>,
    /// Board fetch in flight
    pub loading: bool,
    pub next_toast_id: u32,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_set_board(store: &AppStore, board: BoardState) {
    store.drag().set(DragReconciler::new());
    store.board().set(board);
}

pub fn store_insert_card(store: &AppStore, card: Card) {
    store.board().write().insert_card(card);
}

pub fn store_remove_card(store: &AppStore, card_id: &str) {
    store.board().write().remove_card(card_id);
}

pub fn store_clear_board(store: &AppStore) {
    store.board().write().clear();
}

/// Show a notice, dismissed after `duration_ms`
pub fn store_push_notice(store: &AppStore, notice: Notice, duration_ms: u32) {
    let id = store.next_toast_id().get_untracked();
    store.next_toast_id().set(id.wrapping_add(1));
    store.toasts().write().push(Toast { id, notice });

    let store = *store;
    spawn_local(async move {
        TimeoutFuture::new(duration_ms).await;
        store_dismiss_toast(&store, id);
    });
}

pub fn store_dismiss_toast(store: &AppStore, toast_id: u32) {
    store.toasts().write().retain(|toast| toast.id != toast_id);
}

// ========================
// Drag Gesture
// ========================
//
// The reconciler and the board are separate fields; each step works on
// copies and writes back only what changed.

pub fn store_drag_start(store: &AppStore, card_id: &str) {
    let mut drag = store.drag().get_untracked();
    let mut board = store.board().get_untracked();
    let had_preview = drag.is_dragging();
    if drag.drag_start(&mut board, card_id) || had_preview {
        store.board().set(board);
    }
    store.drag().set(drag);
}

pub fn store_drag_over(store: &AppStore, target: &DropTarget) {
    let mut drag = store.drag().get_untracked();
    let mut board = store.board().get_untracked();
    if drag.drag_over(&mut board, target) {
        store.board().set(board);
    }
}

/// Finish the gesture; returns the move to persist
pub fn store_drag_end(store: &AppStore, target: Option<&DropTarget>) -> Option<CardMove> {
    let mut drag = store.drag().get_untracked();
    let mut board = store.board().get_untracked();
    let moved = drag.drag_end(&mut board, target);
    store.board().set(board);
    store.drag().set(drag);
    moved
}
