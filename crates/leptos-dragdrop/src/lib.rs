//! Leptos DragDrop Utilities
//!
//! Simple drag-and-drop for Leptos using mouse events.
//! Uses movement threshold to distinguish click from drag.
//!
//! Generic over the dragged item id `I` and the drop target `T`. Targets
//! announce themselves on mouseenter; a target nested inside another (a
//! card inside a column) hands the pointer back to its parent on leave.
//! The dragged item's own slot is the target until the pointer reaches
//! another one, so releasing in place drops the item on itself.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Bounds for ids and targets kept in signals
pub trait DndKey: Clone + PartialEq + Send + Sync + 'static {}

impl<K: Clone + PartialEq + Send + Sync + 'static> DndKey for K {}

/// Gesture callbacks
pub struct DndHandlers<I: DndKey, T: DndKey> {
    /// Pointer moved past the threshold with an item held. Returns the
    /// target the item rests on.
    pub on_start: Callback<I, Option<T>>,
    /// Pointer entered a different target while dragging
    pub on_over: Callback<(I, T)>,
    /// Button released while dragging; `None` when over no target
    pub on_drop: Callback<(I, Option<T>)>,
}

impl<I: DndKey, T: DndKey> Clone for DndHandlers<I, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: DndKey, T: DndKey> Copy for DndHandlers<I, T> {}

/// DnD state signals
pub struct DndSignals<I: DndKey, T: DndKey> {
    pub dragging_id_read: ReadSignal<Option<I>>,
    pub dragging_id_write: WriteSignal<Option<I>>,
    pub drop_target_read: ReadSignal<Option<T>>,
    pub drop_target_write: WriteSignal<Option<T>>,
    /// Pending item id (mousedown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<I>>,
    pub pending_id_write: WriteSignal<Option<I>>,
    /// Start position for movement detection
    pub start_read: ReadSignal<(i32, i32)>,
    pub start_write: WriteSignal<(i32, i32)>,
    /// Last pointer position, for drag overlays
    pub pointer_read: ReadSignal<(i32, i32)>,
    pub pointer_write: WriteSignal<(i32, i32)>,
    pub handlers: DndHandlers<I, T>,
}

impl<I: DndKey, T: DndKey> Clone for DndSignals<I, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: DndKey, T: DndKey> Copy for DndSignals<I, T> {}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 8;

pub fn create_dnd_signals<I: DndKey, T: DndKey>(handlers: DndHandlers<I, T>) -> DndSignals<I, T> {
    let (dragging_id_read, dragging_id_write) = signal(None::<I>);
    let (drop_target_read, drop_target_write) = signal(None::<T>);
    let (pending_id_read, pending_id_write) = signal(None::<I>);
    let (start_read, start_write) = signal((0i32, 0i32));
    let (pointer_read, pointer_write) = signal((0i32, 0i32));
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        pending_id_read,
        pending_id_write,
        start_read,
        start_write,
        pointer_read,
        pointer_write,
        handlers,
    }
}

/// End drag operation
pub fn end_drag<I: DndKey, T: DndKey>(dnd: &DndSignals<I, T>) {
    dnd.dragging_id_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_id_write.set(None);
}

/// Point `dnd` at `target`, announcing it when it changed
fn enter_target<I: DndKey, T: DndKey>(dnd: &DndSignals<I, T>, target: Option<T>) {
    let Some(dragging) = dnd.dragging_id_read.get_untracked() else {
        return;
    };
    if dnd.drop_target_read.get_untracked() == target {
        return;
    }
    dnd.drop_target_write.set(target.clone());
    if let Some(target) = target {
        dnd.handlers.on_over.run((dragging, target));
    }
}

/// Record a pending drag at the pointer position
fn press<I: DndKey, T: DndKey>(dnd: &DndSignals<I, T>, item_id: I, x: i32, y: i32) {
    dnd.pending_id_write.set(Some(item_id));
    dnd.start_write.set((x, y));
    dnd.pointer_write.set((x, y));
}

/// Track the pointer; promote the pending item to a drag past the threshold
fn track_pointer<I: DndKey, T: DndKey>(dnd: &DndSignals<I, T>, x: i32, y: i32) {
    let Some(pending) = dnd.pending_id_read.get_untracked() else {
        return;
    };
    dnd.pointer_write.set((x, y));
    if dnd.dragging_id_read.get_untracked().is_some() {
        return;
    }
    let (start_x, start_y) = dnd.start_read.get_untracked();
    if (x - start_x).abs() > DRAG_THRESHOLD_PX || (y - start_y).abs() > DRAG_THRESHOLD_PX {
        dnd.dragging_id_write.set(Some(pending.clone()));
        let home = dnd.handlers.on_start.run(pending);
        dnd.drop_target_write.set(home);
    }
}

/// Leave an item that is also a target. The dragged item keeps its slot.
fn leave_item<I: DndKey, T: DndKey>(dnd: &DndSignals<I, T>, item_id: &I, parent: Option<T>) {
    if dnd.dragging_id_read.get_untracked().as_ref() == Some(item_id) {
        return;
    }
    enter_target(dnd, parent);
}

/// Button released: reset, then report the drop if a drag was running
fn release<I: DndKey, T: DndKey>(dnd: &DndSignals<I, T>) {
    let dragging_id = dnd.dragging_id_read.get_untracked();
    let drop_target = dnd.drop_target_read.get_untracked();

    end_drag(dnd);

    // Only a real drag drops; a plain click falls through
    if let Some(dragged) = dragging_id {
        dnd.handlers.on_drop.run((dragged, drop_target));
    }
}

/// Create mousedown handler for draggable items
/// Records pending drag with start position
pub fn make_on_mousedown<I: DndKey, T: DndKey>(dnd: DndSignals<I, T>, item_id: I) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is a form control
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            }
            // Keep the browser from selecting text while dragging
            ev.prevent_default();
            press(&dnd, item_id.clone(), ev.client_x(), ev.client_y());
        }
    }
}

/// Create mouseenter handler for a drop target
pub fn make_on_target_enter<I: DndKey, T: DndKey>(dnd: DndSignals<I, T>, target: T) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |_ev: web_sys::MouseEvent| {
        enter_target(&dnd, Some(target.clone()));
    }
}

/// Create mouseleave handler. `parent` is the enclosing target the
/// pointer is still inside, if any.
pub fn make_on_target_leave<I: DndKey, T: DndKey>(dnd: DndSignals<I, T>, parent: Option<T>) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |_ev: web_sys::MouseEvent| {
        enter_target(&dnd, parent.clone());
    }
}

/// Create mouseleave handler for a draggable item that is also a target
pub fn make_on_item_leave<I: DndKey, T: DndKey>(dnd: DndSignals<I, T>, item_id: I, parent: Option<T>) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |_ev: web_sys::MouseEvent| {
        leave_item(&dnd, &item_id, parent.clone());
    }
}

/// Bind mousemove on document - tracks the pointer and starts the drag
/// once it moved far enough
pub fn bind_global_mousemove<I: DndKey, T: DndKey>(dnd: DndSignals<I, T>) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        track_pointer(&dnd, ev.client_x(), ev.client_y());
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        }
    }
    on_mousemove.forget();
}

/// Bind global mouseup handler for drop detection.
/// Listeners live for the page; call once per `DndSignals`.
pub fn bind_global_mouseup<I: DndKey, T: DndKey>(dnd: DndSignals<I, T>) {
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        release(&dnd);
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        }
    }
    on_mouseup.forget();

    // Also bind global mousemove
    bind_global_mousemove(dnd);
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Spot {
        Slot(u32),
        Lane(u8),
    }

    type Events = Arc<Mutex<Vec<String>>>;

    fn setup() -> (Owner, DndSignals<u32, Spot>, Events) {
        let owner = Owner::new();
        owner.set();
        let events: Events = Arc::new(Mutex::new(Vec::new()));
        let over_events = events.clone();
        let drop_events = events.clone();
        let dnd = create_dnd_signals(DndHandlers {
            on_start: Callback::new(|id: u32| Some(Spot::Slot(id))),
            on_over: Callback::new(move |(id, target): (u32, Spot)| {
                over_events.lock().unwrap().push(format!("over {} {:?}", id, target));
            }),
            on_drop: Callback::new(move |(id, target): (u32, Option<Spot>)| {
                drop_events.lock().unwrap().push(format!("drop {} {:?}", id, target));
            }),
        });
        (owner, dnd, events)
    }

    fn recorded(events: &Events) -> Vec<String> {
        events.lock().unwrap().clone()
    }

    #[test]
    fn test_click_without_movement_does_not_drop() {
        let (_owner, dnd, events) = setup();
        press(&dnd, 1, 100, 100);
        track_pointer(&dnd, 104, 97);
        release(&dnd);
        assert!(recorded(&events).is_empty());
        assert_eq!(dnd.pending_id_read.get_untracked(), None);
    }

    #[test]
    fn test_release_in_place_drops_on_itself() {
        let (_owner, dnd, events) = setup();
        press(&dnd, 1, 100, 100);
        track_pointer(&dnd, 100, 120);
        assert_eq!(dnd.drop_target_read.get_untracked(), Some(Spot::Slot(1)));

        // The dragged item stops taking the pointer; its leave is ignored
        leave_item(&dnd, &1, Some(Spot::Lane(0)));
        release(&dnd);

        assert_eq!(recorded(&events), vec!["drop 1 Some(Slot(1))"]);
        assert_eq!(dnd.dragging_id_read.get_untracked(), None);
    }

    #[test]
    fn test_leaving_other_item_falls_back_to_parent() {
        let (_owner, dnd, events) = setup();
        press(&dnd, 1, 0, 0);
        track_pointer(&dnd, 20, 0);

        enter_target(&dnd, Some(Spot::Slot(2)));
        leave_item(&dnd, &2, Some(Spot::Lane(0)));
        release(&dnd);

        assert_eq!(
            recorded(&events),
            vec!["over 1 Slot(2)", "over 1 Lane(0)", "drop 1 Some(Lane(0))"]
        );
    }

    #[test]
    fn test_leaving_outer_target_clears_it() {
        let (_owner, dnd, events) = setup();
        press(&dnd, 1, 0, 0);
        track_pointer(&dnd, 0, 30);

        enter_target(&dnd, Some(Spot::Lane(2)));
        enter_target(&dnd, None);
        release(&dnd);

        assert_eq!(recorded(&events), vec!["over 1 Lane(2)", "drop 1 None"]);
    }

    #[test]
    fn test_targets_ignored_before_drag_starts() {
        let (_owner, dnd, events) = setup();
        press(&dnd, 1, 0, 0);
        enter_target(&dnd, Some(Spot::Lane(1)));
        assert_eq!(dnd.drop_target_read.get_untracked(), None);
        release(&dnd);
        assert!(recorded(&events).is_empty());
    }
}
