use fieldmark_proto::field::{self, *};
use tonic::{Request, Response, Status};

use crate::{
    service::database::Database,
    util::{self, required_str},
};

pub struct FieldServiceImpl {
    database: Database,
}

impl FieldServiceImpl {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[tonic::async_trait]
impl field::field_service_server::FieldService for FieldServiceImpl {
    async fn list_fields(
        &self,
        request: Request<ListFieldsRequest>,
    ) -> Result<Response<ListFieldsResponse>, Status> {
        let req = request.into_inner();
        required_str(&req.template_id, "Template ID is required, but got empty string")?;

        let fields = self
            .database
            .list_fields(&req.template_id)
            .into_iter()
            .map(to_proto_field)
            .collect();

        Ok(Response::new(ListFieldsResponse { fields }))
    }

    async fn create_field(
        &self,
        request: Request<CreateFieldRequest>,
    ) -> Result<Response<CreateFieldResponse>, Status> {
        let req = request.into_inner();
        required_str(&req.template_id, "Template ID is required, but got empty string")?;
        let prototype = util::tonic_required!(req.field)?;

        let created = self
            .database
            .create_field(&req.template_id, from_proto_field(prototype));

        tracing::info!(
            template_id = %req.template_id,
            field_id = %created.id,
            kind = created.kind.as_str(),
            page = created.page,
            "Field created"
        );

        Ok(Response::new(CreateFieldResponse {
            field: Some(to_proto_field(created)),
        }))
    }

    async fn update_field(
        &self,
        request: Request<UpdateFieldRequest>,
    ) -> Result<Response<UpdateFieldResponse>, Status> {
        let req = request.into_inner();
        required_str(&req.field_id, "Field ID is required, but got empty string")?;
        let patch = util::tonic_required!(req.patch)?;

        let updated = self
            .database
            .update_field(&req.field_id, &from_proto_patch(patch))?;

        tracing::info!(
            field_id = %req.field_id,
            x = updated.x,
            y = updated.y,
            page = updated.page,
            "Field updated"
        );

        Ok(Response::new(UpdateFieldResponse {}))
    }

    async fn delete_field(
        &self,
        request: Request<DeleteFieldRequest>,
    ) -> Result<Response<DeleteFieldResponse>, Status> {
        let req = request.into_inner();
        required_str(&req.field_id, "Field ID is required, but got empty string")?;

        self.database.delete_field(&req.field_id)?;

        tracing::info!(field_id = %req.field_id, "Field deleted");

        Ok(Response::new(DeleteFieldResponse {}))
    }
}

fn to_proto_field(field: fieldmark_core::Field) -> Field {
    Field {
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

fn from_proto_field(field: Field) -> fieldmark_core::Field {
    fieldmark_core::Field {
        id: field.id,
        kind: fieldmark_core::FieldKind::from_str_lossy(&field.kind),
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

fn from_proto_patch(patch: FieldPatch) -> fieldmark_core::FieldPatch {
    fieldmark_core::FieldPatch {
        kind: patch
            .kind
            .as_deref()
            .map(fieldmark_core::FieldKind::from_str_lossy),
        signer_role: patch.signer_role,
        page: patch.page,
        x: patch.x,
        y: patch.y,
        width: patch.width,
        height: patch.height,
        label: if patch.clear_label {
            Some(None)
        } else {
            patch.label.map(Some)
        },
        required: patch.required,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_label_semantics() {
        // Absent label leaves the field untouched
        let none = from_proto_patch(FieldPatch::default());
        assert_eq!(none.label, None);

        // Present label sets it
        let set = from_proto_patch(FieldPatch {
            label: Some("Witness".to_string()),
            ..FieldPatch::default()
        });
        assert_eq!(set.label, Some(Some("Witness".to_string())));

        // clear_label wins over a provided label
        let cleared = from_proto_patch(FieldPatch {
            label: Some("ignored".to_string()),
            clear_label: true,
            ..FieldPatch::default()
        });
        assert_eq!(cleared.label, Some(None));
    }

    #[test]
    fn test_field_round_trip() {
        let field = fieldmark_core::Field {
            id: "f-1".to_string(),
            kind: fieldmark_core::FieldKind::Date,
            signer_role: "witness".to_string(),
            page: 3,
            x: 12.0,
            y: 34.0,
            width: 24.0,
            height: 12.0,
            label: Some("Execution Date".to_string()),
            required: false,
        };
        assert_eq!(from_proto_field(to_proto_field(field.clone())), field);
    }
}
