//! Write-through persistence for the field editor.
//!
//! Every call is fire-and-forget: the optimistic local state is already
//! visible before the gRPC call resolves. Failures are caught here, logged,
//! and surfaced to the caller's callbacks; nothing propagates. There is no
//! retry, backoff, or request de-duplication — overlapping commits to
//! distinct fields race harmlessly and the last write wins at the store.

use std::cell::RefCell;
use std::rc::Rc;

use fieldmark_core::{Field, FieldKind, FieldPatch};
use fieldmark_proto::field::{
    self, CreateFieldRequest, DeleteFieldRequest, ListFieldsRequest, UpdateFieldRequest,
    field_service_client::FieldServiceClient,
};
use tonic_web_wasm_client::Client;
use wasm_bindgen_futures::spawn_local;
use yew::Callback;

pub type FieldClient = Rc<RefCell<FieldServiceClient<Client>>>;

/// Fetch the authoritative field list for a template.
///
/// On failure the list is left alone (empty on initial load) and the error
/// is surfaced; the caller may retry by re-invoking.
pub fn fetch_fields(
    client: &FieldClient,
    template_id: &str,
    on_loaded: Callback<Vec<Field>>,
    on_error: Callback<String>,
) {
    let client = client.clone();
    let template_id = template_id.to_string();
    spawn_local(async move {
        let request = ListFieldsRequest {
            template_id: template_id.clone(),
        };
        let result = client.borrow_mut().list_fields(request).await;
        match result {
            Ok(response) => {
                let fields = response
                    .into_inner()
                    .fields
                    .into_iter()
                    .map(from_proto_field)
                    .collect();
                on_loaded.emit(fields);
            }
            Err(status) => {
                tracing::error!(template_id = %template_id, error = %status, "Failed to fetch fields");
                on_error.emit("Failed to load signature fields".to_string());
            }
        }
    });
}

/// Commit a drag's final position.
///
/// On failure the caller's revert callback puts just this field back to its
/// pre-drag origin; other uncommitted local edits are left intact.
pub fn commit_position(
    client: &FieldClient,
    field_id: &str,
    position: (f64, f64),
    origin: (f64, f64),
    on_revert: Callback<(String, (f64, f64))>,
    on_error: Callback<String>,
) {
    let client = client.clone();
    let field_id = field_id.to_string();
    spawn_local(async move {
        let request = UpdateFieldRequest {
            field_id: field_id.clone(),
            patch: Some(field::FieldPatch {
                x: Some(position.0),
                y: Some(position.1),
                ..field::FieldPatch::default()
            }),
        };
        if let Err(status) = client.borrow_mut().update_field(request).await {
            tracing::error!(field_id = %field_id, error = %status, "Failed to persist field position");
            on_error.emit("Failed to save new field position".to_string());
            on_revert.emit((field_id, origin));
        }
    });
}

/// Create a field; the store assigns the id. Not optimistic: the local
/// insert happens only once the created record comes back.
pub fn commit_create(
    client: &FieldClient,
    template_id: &str,
    prototype: Field,
    on_created: Callback<Field>,
    on_error: Callback<String>,
) {
    let client = client.clone();
    let template_id = template_id.to_string();
    spawn_local(async move {
        let request = CreateFieldRequest {
            template_id: template_id.clone(),
            field: Some(to_proto_field(prototype)),
        };
        let result = client.borrow_mut().create_field(request).await;
        match result.map(|r| r.into_inner().field) {
            Ok(Some(created)) => on_created.emit(from_proto_field(created)),
            Ok(None) => {
                tracing::error!(template_id = %template_id, "CreateField returned no field");
                on_error.emit("Failed to add field".to_string());
            }
            Err(status) => {
                tracing::error!(template_id = %template_id, error = %status, "Failed to add field");
                on_error.emit("Failed to add field".to_string());
            }
        }
    });
}

/// Commit a form edit. The local state has already been updated; a failure
/// surfaces an error and leaves the local copy as-is until the next fetch.
pub fn commit_update(
    client: &FieldClient,
    field_id: &str,
    patch: FieldPatch,
    on_error: Callback<String>,
) {
    let client = client.clone();
    let field_id = field_id.to_string();
    spawn_local(async move {
        let request = UpdateFieldRequest {
            field_id: field_id.clone(),
            patch: Some(to_proto_patch(patch)),
        };
        if let Err(status) = client.borrow_mut().update_field(request).await {
            tracing::error!(field_id = %field_id, error = %status, "Failed to update field");
            on_error.emit("Failed to update field".to_string());
        }
    });
}

/// Delete a field. Not optimistic: the local record is removed only once
/// the store confirms.
pub fn commit_delete(
    client: &FieldClient,
    field_id: &str,
    on_deleted: Callback<String>,
    on_error: Callback<String>,
) {
    let client = client.clone();
    let field_id = field_id.to_string();
    spawn_local(async move {
        let request = DeleteFieldRequest {
            field_id: field_id.clone(),
        };
        match client.borrow_mut().delete_field(request).await {
            Ok(_) => on_deleted.emit(field_id),
            Err(status) => {
                tracing::error!(field_id = %field_id, error = %status, "Failed to remove field");
                on_error.emit("Failed to remove field".to_string());
            }
        }
    });
}

fn to_proto_field(field: Field) -> field::Field {
    field::Field {
        id: field.id,
        kind: field.kind.as_str().to_string(),
        signer_role: field.signer_role,
        page: field.page,
        x: field.x,
        y: field.y,
        width: field.width,
        height: field.height,
        label: field.label,
        required: field.required,
    }
}

fn from_proto_field(field: field::Field) -> Field {
    Field {
        id: field.id,
        kind: FieldKind::from_str_lossy(&field.kind),
        signer_role: field.signer_role,
        page: field.page,
        x: field.x,
        y: field.y,
        width: field.width,
        height: field.height,
        label: field.label,
        required: field.required,
    }
}

fn to_proto_patch(patch: FieldPatch) -> field::FieldPatch {
    field::FieldPatch {
        kind: patch.kind.map(|k| k.as_str().to_string()),
        signer_role: patch.signer_role,
        page: patch.page,
        x: patch.x,
        y: patch.y,
        width: patch.width,
        height: patch.height,
        label: patch.label.clone().flatten(),
        clear_label: matches!(patch.label, Some(None)),
        required: patch.required,
    }
}
