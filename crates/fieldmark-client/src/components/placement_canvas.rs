//! Placement canvas: the rendered page surface and its draggable field chips.
//!
//! Pointer-down on a chip starts a drag session with the canvas metrics
//! frozen for the gesture. While a session is active, `pointermove` and
//! `pointerup` listeners live on the document (the pointer may leave the
//! canvas mid-drag); they are held by a guard that detaches them when the
//! session ends or the component unmounts.

use fieldmark_core::{CanvasMetrics, DragSession, Field};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use yew::prelude::*;

/// Unscaled page surface in px (US Letter at 96dpi).
pub const PAGE_WIDTH_PX: f64 = 816.0;
pub const PAGE_HEIGHT_PX: f64 = 1056.0;

/// Result of a finished drag, handed to the persistence layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DragOutcome {
    pub field_id: String,
    /// Final clamped position read back from the store.
    pub x: f64,
    pub y: f64,
    /// Pre-drag position, for compensating rollback on commit failure.
    pub origin: (f64, f64),
}

#[derive(Properties, PartialEq)]
pub struct PlacementCanvasProps {
    /// Fields on the active page, in store order.
    pub fields: Vec<Field>,
    pub selected_field: Option<String>,
    pub zoom: f64,
    pub loading: bool,
    pub on_select: Callback<Option<String>>,
    /// Synchronous local-only position update, fired on every pointer-move.
    pub on_drag_move: Callback<(String, f64, f64)>,
    /// Fired once on pointer-up with the final position.
    pub on_drag_end: Callback<DragOutcome>,
}

/// Document-level listener pair scoped to one drag session.
///
/// Dropping the guard detaches both listeners, so repeated drags cannot
/// leak handlers and unmount during a drag cleans up with the effect.
struct DragListenerGuard {
    document: web_sys::Document,
    on_move: Closure<dyn FnMut(web_sys::PointerEvent)>,
    on_up: Closure<dyn FnMut(web_sys::PointerEvent)>,
}

impl DragListenerGuard {
    fn attach(
        on_move: Closure<dyn FnMut(web_sys::PointerEvent)>,
        on_up: Closure<dyn FnMut(web_sys::PointerEvent)>,
    ) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        document
            .add_event_listener_with_callback("pointermove", on_move.as_ref().unchecked_ref())
            .ok()?;
        document
            .add_event_listener_with_callback("pointerup", on_up.as_ref().unchecked_ref())
            .ok()?;
        Some(Self {
            document,
            on_move,
            on_up,
        })
    }
}

impl Drop for DragListenerGuard {
    fn drop(&mut self) {
        let _ = self.document.remove_event_listener_with_callback(
            "pointermove",
            self.on_move.as_ref().unchecked_ref(),
        );
        let _ = self
            .document
            .remove_event_listener_with_callback("pointerup", self.on_up.as_ref().unchecked_ref());
    }
}

#[function_component(PlacementCanvas)]
pub fn placement_canvas(props: &PlacementCanvasProps) -> Html {
    let page_ref = use_node_ref();
    // Exactly one session may be active; the Option is replaced, not
    // mutated, on each transition.
    let session = use_mut_ref(|| None::<DragSession>);
    // Mirror of the rendered fields for the document listeners, which
    // outlive any single render.
    let fields_ref = use_mut_ref(Vec::<Field>::new);
    let dragging_field_id = use_state(|| None::<String>);

    *fields_ref.borrow_mut() = props.fields.clone();

    // Attach document listeners only while a session is active; the guard
    // is dropped (and the listeners detached) by the effect cleanup.
    {
        let session = session.clone();
        let fields_ref = fields_ref.clone();
        let on_drag_move = props.on_drag_move.clone();
        let on_drag_end = props.on_drag_end.clone();
        let on_select = props.on_select.clone();
        let dragging_setter = dragging_field_id.clone();

        use_effect_with((*dragging_field_id).clone(), move |dragging| {
            let guard = if dragging.is_some() {
                let move_cb = {
                    let session = session.clone();
                    let fields_ref = fields_ref.clone();
                    let on_drag_move = on_drag_move.clone();
                    Closure::wrap(Box::new(move |event: web_sys::PointerEvent| {
                        let session = session.borrow();
                        let Some(active) = session.as_ref() else {
                            return;
                        };
                        let fields = fields_ref.borrow();
                        let Some(field) = fields.iter().find(|f| f.id == active.field_id()) else {
                            return;
                        };
                        let (x, y) = active.track(
                            f64::from(event.client_x()),
                            f64::from(event.client_y()),
                            field.width,
                            field.height,
                        );
                        on_drag_move.emit((field.id.clone(), x, y));
                    }) as Box<dyn FnMut(web_sys::PointerEvent)>)
                };

                let up_cb = {
                    let session = session.clone();
                    let fields_ref = fields_ref.clone();
                    let on_drag_end = on_drag_end.clone();
                    let on_select = on_select.clone();
                    let dragging_setter = dragging_setter.clone();
                    Closure::wrap(Box::new(move |_event: web_sys::PointerEvent| {
                        let Some(finished) = session.borrow_mut().take() else {
                            return;
                        };
                        dragging_setter.set(None);

                        // Read the final clamped position back from the
                        // store mirror; release always commits, even when
                        // the position is unchanged.
                        let fields = fields_ref.borrow();
                        let Some(field) = fields.iter().find(|f| f.id == finished.field_id())
                        else {
                            return;
                        };
                        on_drag_end.emit(DragOutcome {
                            field_id: field.id.clone(),
                            x: field.x,
                            y: field.y,
                            origin: finished.origin(),
                        });
                        on_select.emit(Some(field.id.clone()));
                    }) as Box<dyn FnMut(web_sys::PointerEvent)>)
                };

                DragListenerGuard::attach(move_cb, up_cb)
            } else {
                None
            };

            move || drop(guard)
        });
    }

    let on_chip_pointer_down = {
        let page_ref = page_ref.clone();
        let session = session.clone();
        let dragging_field_id = dragging_field_id.clone();
        let on_select = props.on_select.clone();
        let zoom = props.zoom;
        Callback::from(move |(event, field): (PointerEvent, Field)| {
            event.stop_propagation();
            let Some(page) = page_ref.cast::<web_sys::Element>() else {
                return;
            };
            if session.borrow().is_some() {
                // Pointer capture makes a second pointer-down during an
                // active session unreachable in practice; ignore it rather
                // than clobber the session.
                tracing::warn!("pointer-down while a drag session is active");
                return;
            }
            // Metrics are captured once here and stay frozen for the
            // whole gesture, even if the page reflows or zoom changes.
            let rect = page.get_bounding_client_rect();
            let metrics =
                CanvasMetrics::from_rect(rect.left(), rect.top(), rect.width(), rect.height(), zoom);
            let grabbed = DragSession::grab(
                &field,
                f64::from(event.client_x()),
                f64::from(event.client_y()),
                metrics,
            );
            *session.borrow_mut() = Some(grabbed);
            dragging_field_id.set(Some(field.id.clone()));
            on_select.emit(Some(field.id));
        })
    };

    let on_canvas_click = {
        let on_select = props.on_select.clone();
        Callback::from(move |_: MouseEvent| {
            on_select.emit(None);
        })
    };

    let page_style = format!(
        "position: relative; width: {PAGE_WIDTH_PX}px; min-height: {PAGE_HEIGHT_PX}px; \
         transform: scale({}); transform-origin: top left;",
        props.zoom
    );

    html! {
        <div class="canvas-viewport" onclick={on_canvas_click}>
            <div class="canvas-page" style={page_style} ref={page_ref}>
                if props.loading {
                    <div class="canvas-overlay-message">{ "Loading fields..." }</div>
                } else if props.fields.is_empty() {
                    <div class="canvas-overlay-message">
                        { "No fields on this page yet. Use the buttons above to add one." }
                    </div>
                }
                { for props.fields.iter().map(|field| {
                    let is_selected = props.selected_field.as_deref() == Some(field.id.as_str());
                    let chip_style = format!(
                        "position: absolute; left: {}%; top: {}%; width: {}%; height: {}%;",
                        field.x, field.y, field.width, field.height
                    );
                    let class = classes!(
                        "field-chip",
                        format!("field-chip-{}", field.kind.as_str()),
                        is_selected.then_some("field-chip-selected"),
                    );
                    let onpointerdown = {
                        let on_chip_pointer_down = on_chip_pointer_down.clone();
                        let field = field.clone();
                        Callback::from(move |event: PointerEvent| {
                            on_chip_pointer_down.emit((event, field.clone()));
                        })
                    };
                    let onclick = {
                        let on_select = props.on_select.clone();
                        let field_id = field.id.clone();
                        Callback::from(move |event: MouseEvent| {
                            event.stop_propagation();
                            on_select.emit(Some(field_id.clone()));
                        })
                    };
                    html! {
                        <div key={field.id.clone()} {class} style={chip_style} {onpointerdown} {onclick}>
                            <span>{ field.display_label() }</span>
                        </div>
                    }
                }) }
            </div>
        </div>
    }
}
