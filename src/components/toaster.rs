//! Toaster Component
//!
//! Stack of transient notices; click to dismiss early.

use kanban_core::NoticeKind;
use leptos::prelude::*;

use crate::store::{store_dismiss_toast, use_app_store, AppStateStoreFields};

fn kind_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Success => "toast toast-success",
        NoticeKind::Warning => "toast toast-warning",
        NoticeKind::Error => "toast toast-error",
    }
}

#[component]
pub fn Toaster() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toaster">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div
                            class=kind_class(toast.notice.kind)
                            role="status"
                            on:click=move |_| store_dismiss_toast(&store, id)
                        >
                            {toast.notice.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
