//! Edit panel for the selected field.
//!
//! Size and page edits go through the same clamping as drags, so a field
//! can never be pushed outside the page from here either.

use fieldmark_core::{clamp_position, Field, FieldKind, FieldPatch, MIN_HEIGHT, MIN_WIDTH};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_icons::{Icon, IconData};

#[derive(Properties, PartialEq)]
pub struct PropertyPanelProps {
    pub field: Field,
    pub on_edit: Callback<(String, FieldPatch)>,
    pub on_delete: Callback<String>,
}

fn input_value(event: &InputEvent) -> Option<String> {
    event
        .target_dyn_into::<HtmlInputElement>()
        .map(|input| input.value())
}

/// Resize patch that keeps the field inside the page: the new extent is
/// clamped to `[min, 100]`, then the position is re-clamped against it.
fn resize_patch(field: &Field, width: Option<f64>, height: Option<f64>) -> FieldPatch {
    let width = width.unwrap_or(field.width).clamp(MIN_WIDTH, 100.0);
    let height = height.unwrap_or(field.height).clamp(MIN_HEIGHT, 100.0);
    let (x, y) = clamp_position(field.x, field.y, width, height);
    FieldPatch {
        width: Some(width),
        height: Some(height),
        x: Some(x),
        y: Some(y),
        ..FieldPatch::default()
    }
}

#[function_component(PropertyPanel)]
pub fn property_panel(props: &PropertyPanelProps) -> Html {
    let field = &props.field;
    let field_id = field.id.clone();

    let emit_patch = {
        let on_edit = props.on_edit.clone();
        let field_id = field_id.clone();
        Callback::from(move |patch: FieldPatch| {
            if !patch.is_empty() {
                on_edit.emit((field_id.clone(), patch));
            }
        })
    };

    let on_kind_change = {
        let emit_patch = emit_patch.clone();
        Callback::from(move |event: Event| {
            let Some(select) = event.target_dyn_into::<HtmlSelectElement>() else {
                return;
            };
            emit_patch.emit(FieldPatch {
                kind: Some(FieldKind::from_str_lossy(&select.value())),
                ..FieldPatch::default()
            });
        })
    };

    let on_role_input = {
        let emit_patch = emit_patch.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(value) = input_value(&event) {
                emit_patch.emit(FieldPatch {
                    signer_role: Some(value),
                    ..FieldPatch::default()
                });
            }
        })
    };

    let on_label_input = {
        let emit_patch = emit_patch.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(value) = input_value(&event) {
                // Empty input clears the label instead of storing "".
                let label = if value.is_empty() { None } else { Some(value) };
                emit_patch.emit(FieldPatch {
                    label: Some(label),
                    ..FieldPatch::default()
                });
            }
        })
    };

    let on_page_input = {
        let emit_patch = emit_patch.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(page) = input_value(&event).and_then(|v| v.parse::<u32>().ok()) {
                emit_patch.emit(FieldPatch {
                    page: Some(page.max(1)),
                    ..FieldPatch::default()
                });
            }
        })
    };

    let on_width_input = {
        let emit_patch = emit_patch.clone();
        let field = field.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(width) = input_value(&event).and_then(|v| v.parse::<f64>().ok()) {
                emit_patch.emit(resize_patch(&field, Some(width), None));
            }
        })
    };

    let on_height_input = {
        let emit_patch = emit_patch.clone();
        let field = field.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(height) = input_value(&event).and_then(|v| v.parse::<f64>().ok()) {
                emit_patch.emit(resize_patch(&field, None, Some(height)));
            }
        })
    };

    let on_required_change = {
        let emit_patch = emit_patch.clone();
        Callback::from(move |event: Event| {
            let Some(input) = event.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            emit_patch.emit(FieldPatch {
                required: Some(input.checked()),
                ..FieldPatch::default()
            });
        })
    };

    let on_delete_click = {
        let on_delete = props.on_delete.clone();
        let field_id = field_id.clone();
        Callback::from(move |_: MouseEvent| {
            // Deletion is not optimistic and not undoable; ask first.
            let confirmed = web_sys::window()
                .and_then(|window| {
                    window
                        .confirm_with_message("Are you sure you want to remove this signature field?")
                        .ok()
                })
                .unwrap_or(false);
            if confirmed {
                on_delete.emit(field_id.clone());
            }
        })
    };

    html! {
        <aside class="property-panel">
            <h3>{ "Field properties" }</h3>

            <label class="property-row">
                { "Type" }
                <select onchange={on_kind_change}>
                    { for FieldKind::ALL.iter().map(|kind| html! {
                        <option
                            value={kind.as_str()}
                            selected={*kind == field.kind}
                        >
                            { kind.display_name() }
                        </option>
                    }) }
                </select>
            </label>

            <label class="property-row">
                { "Signer role" }
                <input
                    type="text"
                    value={field.signer_role.clone()}
                    oninput={on_role_input}
                />
            </label>

            <label class="property-row">
                { "Label" }
                <input
                    type="text"
                    placeholder={field.display_label()}
                    value={field.label.clone().unwrap_or_default()}
                    oninput={on_label_input}
                />
            </label>

            <label class="property-row">
                { "Page" }
                <input
                    type="number"
                    min="1"
                    value={field.page.to_string()}
                    oninput={on_page_input}
                />
            </label>

            <label class="property-row">
                { "Width (%)" }
                <input
                    type="number"
                    min={MIN_WIDTH.to_string()}
                    max="100"
                    step="0.5"
                    value={field.width.to_string()}
                    oninput={on_width_input}
                />
            </label>

            <label class="property-row">
                { "Height (%)" }
                <input
                    type="number"
                    min={MIN_HEIGHT.to_string()}
                    max="100"
                    step="0.5"
                    value={field.height.to_string()}
                    oninput={on_height_input}
                />
            </label>

            <label class="property-row property-row-inline">
                <input
                    type="checkbox"
                    checked={field.required}
                    onchange={on_required_change}
                />
                { "Required" }
            </label>

            <button class="danger" onclick={on_delete_click}>
                <Icon data={IconData::LUCIDE_TRASH_2} />
                { "Delete field" }
            </button>
        </aside>
    }
}
