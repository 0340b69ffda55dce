//! Task Card Component
//!
//! A draggable card. While dragged it ignores the pointer, so the card
//! underneath can become the drop target; until then the card's own slot
//! is the target and releasing in place changes nothing.

use kanban_core::notice::messages;
use kanban_core::{Card, ColumnId, DropTarget, Notice};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::*;

use crate::components::ConfirmButton;
use crate::context::{use_app_context, use_board_dnd};
use crate::store::{store_push_notice, store_remove_card, use_app_store};

#[component]
pub fn TaskCard(card: Card, column: ColumnId) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let dnd = use_board_dnd();

    let id = card.id.clone();
    let on_mousedown = make_on_mousedown(dnd, id.clone());
    let on_mouseenter = make_on_target_enter(dnd, DropTarget::Card(id.clone()));
    // Leaving a card lands back on its column; the dragged card keeps its slot
    let on_mouseleave = make_on_item_leave(dnd, id.clone(), Some(DropTarget::Column(column)));

    let is_dragging = {
        let id = id.clone();
        move || dnd.dragging_id_read.get().as_deref() == Some(id.as_str())
    };
    let is_drop_target = {
        let id = id.clone();
        move || matches!(dnd.drop_target_read.get(), Some(DropTarget::Card(tid)) if tid == id)
    };
    let card_class = {
        let is_dragging = is_dragging.clone();
        move || {
            let mut c = String::from("task-card");
            if is_dragging() { c.push_str(" dragging"); }
            if is_drop_target() && !is_dragging() { c.push_str(" drop-target"); }
            c
        }
    };

    let on_delete = Callback::new(move |_| {
        let ctx = ctx.clone();
        let id = id.clone();
        spawn_local(async move {
            match ctx.board.remove_card(&id).await {
                Ok(()) => {
                    store_remove_card(&store, &id);
                    store_push_notice(&store, Notice::success(messages::TASK_DELETED), ctx.toast_ms());
                }
                Err(notice) => store_push_notice(&store, notice, ctx.toast_ms()),
            }
        });
    });

    view! {
        <div
            class=card_class
            style:pointer-events=move || if is_dragging() { "none" } else { "auto" }
            on:mousedown=on_mousedown
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        >
            <div class="task-card-header">
                <span class="task-title">{card.title.clone()}</span>
                <ConfirmButton
                    button_class="card-delete-btn"
                    label="×"
                    prompt="¿Eliminar tarea?"
                    on_confirm=on_delete
                />
            </div>
            {card.description.clone().map(|text| view! { <p class="task-description">{text}</p> })}
        </div>
    }
}
