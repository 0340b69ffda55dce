//! Kanban Column Component
//!
//! One fixed column: its cards in position order, a drop target for the
//! board drag, and an inline form to add a task at the end.

use kanban_core::notice::messages;
use kanban_core::{Card, ColumnId, DropTarget, Notice};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::*;

use crate::components::TaskCard;
use crate::context::{use_app_context, use_board_dnd};
use crate::store::{store_insert_card, store_push_notice, use_app_store, AppStateStoreFields};

#[component]
pub fn KanbanColumn(column: ColumnId) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let dnd = use_board_dnd();

    let (adding, set_adding) = signal(false);
    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (saving, set_saving) = signal(false);

    let cards = move || {
        store
            .board()
            .with(|board| board.cards_in(column).into_iter().cloned().collect::<Vec<Card>>())
    };
    let count = move || store.board().with(|board| board.count_in(column));

    let is_drop_target = move || match dnd.drop_target_read.get() {
        Some(DropTarget::Column(c)) => c == column,
        Some(DropTarget::Card(id)) => store
            .board()
            .with_untracked(|board| board.card(&id).map(|card| card.column))
            == Some(column),
        None => false,
    };

    let cancel = move || {
        set_adding.set(false);
        set_title.set(String::new());
        set_description.set(String::new());
    };

    let submit = move || {
        let text = title.get_untracked();
        if text.trim().is_empty() || saving.get_untracked() {
            return;
        }
        let desc = description.get_untracked();
        let desc = (!desc.trim().is_empty()).then(|| desc.trim().to_string());
        set_saving.set(true);

        let ctx = ctx.clone();
        spawn_local(async move {
            match ctx.board.add_card(column, &text, desc).await {
                Ok(card) => {
                    store_insert_card(&store, card);
                    store_push_notice(&store, Notice::success(messages::TASK_CREATED), ctx.toast_ms());
                    cancel();
                }
                Err(notice) => store_push_notice(&store, notice, ctx.toast_ms()),
            }
            set_saving.set(false);
        });
    };

    let on_keydown = {
        let submit = submit.clone();
        move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
            "Enter" => {
                ev.prevent_default();
                submit();
            }
            "Escape" => cancel(),
            _ => {}
        }
    };

    view! {
        <section
            class=move || if is_drop_target() { "kanban-column drop-over" } else { "kanban-column" }
            on:mouseenter=make_on_target_enter(dnd, DropTarget::Column(column))
            on:mouseleave=make_on_target_leave(dnd, None)
        >
            <header class="column-header">
                <h2>{column.title()}</h2>
                <span class="column-count">{count}</span>
            </header>

            <div class="column-cards">
                <For
                    each=cards
                    key=|card| card.id.clone()
                    children=move |card| view! { <TaskCard card=card column=column /> }
                />
                <Show when=move || count() == 0>
                    <p class="column-empty">"Sin tareas"</p>
                </Show>
            </div>

            <Show
                when=move || adding.get()
                fallback=move || view! {
                    <button class="add-task-btn" on:click=move |_| set_adding.set(true)>"+ Añadir tarea"</button>
                }
            >
                <div class="add-task-form">
                    <input
                        type="text"
                        placeholder="Título de la tarea"
                        autofocus=true
                        prop:value=move || title.get()
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                        on:keydown=on_keydown.clone()
                    />
                    <input
                        type="text"
                        placeholder="Descripción (opcional)"
                        prop:value=move || description.get()
                        on:input=move |ev| set_description.set(event_target_value(&ev))
                        on:keydown=on_keydown.clone()
                    />
                    <div class="add-task-actions">
                        <button
                            class="primary-btn"
                            disabled=move || saving.get()
                            on:click={
                                let submit = submit.clone();
                                move |_| submit()
                            }
                        >
                            "Añadir"
                        </button>
                        <button class="cancel-btn" on:click=move |_| cancel()>"Cancelar"</button>
                    </div>
                </div>
            </Show>
        </section>
    }
}
