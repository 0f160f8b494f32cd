//! The field placement editor.
//!
//! Owns the wiring between the view-model hook, the gRPC sync layer, and
//! the presentational components. Every mutation follows the same rhythm:
//! apply locally first (except create/delete, which wait for the store),
//! then commit in the background and compensate on failure.

use fieldmark_core::{
    Field, FieldKind, FieldPatch, DEFAULT_HEIGHT, DEFAULT_POSITION, DEFAULT_WIDTH,
};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::page_selector::PageSelector;
use crate::components::placement_canvas::{DragOutcome, PlacementCanvas};
use crate::components::property_panel::PropertyPanel;
use crate::components::toast::Toast;
use crate::components::toolbar::Toolbar;
use crate::hooks::{use_field_service, use_field_store};
use crate::routes::Route;
use crate::services::sync;

const DEFAULT_SIGNER_ROLE: &str = "executive";

#[derive(Properties, PartialEq)]
pub struct EditorPageProps {
    pub template_id: String,
}

#[function_component(EditorPage)]
pub fn editor_page(props: &EditorPageProps) -> Html {
    let client = use_field_service();
    let fields = use_field_store();
    let zoom = use_state(|| 1.0_f64);
    let error = use_state(|| None::<String>);

    let on_error = {
        let error = error.clone();
        Callback::from(move |message: String| error.set(Some(message)))
    };

    // Initial fetch, re-run when the route's template changes.
    {
        let client = client.clone();
        let on_loaded = fields.on_loaded.clone();
        let on_load_failed = fields.on_load_failed.clone();
        let on_error = on_error.clone();
        use_effect_with(props.template_id.clone(), move |template_id| {
            let on_fetch_error = Callback::from(move |message: String| {
                on_error.emit(message);
                on_load_failed.emit(());
            });
            sync::fetch_fields(&client, template_id, on_loaded, on_fetch_error);
        });
    }

    let page_fields: Vec<Field> = fields
        .store
        .fields_on_page(fields.active_page)
        .into_iter()
        .cloned()
        .collect();

    let on_add = {
        let client = client.clone();
        let template_id = props.template_id.clone();
        let active_page = fields.active_page;
        let on_created = fields.on_insert.clone();
        let on_error = on_error.clone();
        Callback::from(move |kind: FieldKind| {
            let prototype = Field {
                id: String::new(),
                kind,
                signer_role: DEFAULT_SIGNER_ROLE.to_string(),
                page: active_page,
                x: DEFAULT_POSITION.0,
                y: DEFAULT_POSITION.1,
                width: DEFAULT_WIDTH,
                height: DEFAULT_HEIGHT,
                label: Some(kind.default_label().to_string()),
                required: true,
            };
            sync::commit_create(
                &client,
                &template_id,
                prototype,
                on_created.clone(),
                on_error.clone(),
            );
        })
    };

    let on_drag_move = {
        let on_upsert_local = fields.on_upsert_local.clone();
        Callback::from(move |(field_id, x, y): (String, f64, f64)| {
            on_upsert_local.emit((field_id, FieldPatch::position(x, y)));
        })
    };

    let on_drag_end = {
        let client = client.clone();
        let on_revert = fields.on_revert_position.clone();
        let on_error = on_error.clone();
        Callback::from(move |outcome: DragOutcome| {
            sync::commit_position(
                &client,
                &outcome.field_id,
                (outcome.x, outcome.y),
                outcome.origin,
                on_revert.clone(),
                on_error.clone(),
            );
        })
    };

    let on_edit = {
        let client = client.clone();
        let on_upsert_local = fields.on_upsert_local.clone();
        let on_follow_page = fields.on_follow_page.clone();
        let on_error = on_error.clone();
        Callback::from(move |(field_id, patch): (String, FieldPatch)| {
            on_upsert_local.emit((field_id.clone(), patch.clone()));
            // Moving a field to another page switches the view with it,
            // so the edited field never vanishes off screen.
            if let Some(page) = patch.page {
                on_follow_page.emit(page);
            }
            sync::commit_update(&client, &field_id, patch, on_error.clone());
        })
    };

    let on_delete = {
        let client = client.clone();
        let on_removed = fields.on_remove.clone();
        let on_error = on_error.clone();
        Callback::from(move |field_id: String| {
            sync::commit_delete(&client, &field_id, on_removed.clone(), on_error.clone());
        })
    };

    let on_zoom = {
        let zoom = zoom.clone();
        Callback::from(move |level: f64| zoom.set(level))
    };

    let on_dismiss_error = {
        let error = error.clone();
        Callback::from(move |(): ()| error.set(None))
    };

    html! {
        <div class="editor-page">
            <header class="editor-header">
                <Link<Route> to={Route::Home} classes="editor-back-link">
                    { "Templates" }
                </Link<Route>>
                <h2>{ format!("Template {}", props.template_id) }</h2>
            </header>
            <Toolbar zoom={*zoom} on_add={on_add} on_zoom={on_zoom} />
            <PageSelector
                active_page={fields.active_page}
                max_page={fields.store.max_page()}
                on_select={fields.on_set_page.clone()}
            />
            <div class="editor-body">
                <PlacementCanvas
                    fields={page_fields}
                    selected_field={fields.selected_field.clone()}
                    zoom={*zoom}
                    loading={fields.loading}
                    on_select={fields.on_select.clone()}
                    on_drag_move={on_drag_move}
                    on_drag_end={on_drag_end}
                />
                if let Some(selected) = fields.selected() {
                    <PropertyPanel
                        field={selected.clone()}
                        on_edit={on_edit}
                        on_delete={on_delete}
                    />
                }
            </div>
            <Toast message={(*error).clone()} on_dismiss={on_dismiss_error} />
        </div>
    }
}
