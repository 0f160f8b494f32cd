//! In-memory field database.
//!
//! Authoritative copy of every template's signature fields. Writes take the
//! lock briefly and are last-write-wins; the editor issues no version or
//! ETag checks, so overlapping commits to the same field resolve in arrival
//! order.

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use fieldmark_core::{Field, FieldPatch};
use parking_lot::RwLock;
use thiserror::Error;

/// A stored field plus its creation timestamp, the secondary ordering key.
#[derive(Debug, Clone)]
struct StoredField {
    field: Field,
    created_at: DateTime<Utc>,
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Field not found: {0}")]
    FieldNotFound(String),
}

impl DatabaseError {
    fn to_code(&self) -> tonic::Code {
        match self {
            DatabaseError::FieldNotFound(_) => tonic::Code::NotFound,
        }
    }
}

impl From<DatabaseError> for tonic::Status {
    fn from(err: DatabaseError) -> Self {
        tonic::Status::new(err.to_code(), err.to_string())
    }
}

#[derive(Clone, Default)]
pub struct Database {
    templates: Arc<RwLock<HashMap<String, Vec<StoredField>>>>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields for one template, ordered by page then creation time.
    pub fn list_fields(&self, template_id: &str) -> Vec<Field> {
        let templates = self.templates.read();
        let Some(stored) = templates.get(template_id) else {
            return Vec::new();
        };
        let mut stored: Vec<&StoredField> = stored.iter().collect();
        stored.sort_by(|a, b| {
            a.field
                .page
                .cmp(&b.field.page)
                .then(a.created_at.cmp(&b.created_at))
        });
        stored.into_iter().map(|s| s.field.clone()).collect()
    }

    /// Insert a new field, assigning its id. The prototype's id is ignored.
    pub fn create_field(&self, template_id: &str, prototype: Field) -> Field {
        let field = Field {
            id: uuid::Uuid::new_v4().to_string(),
            page: prototype.page.max(1),
            ..prototype
        };
        let mut templates = self.templates.write();
        templates
            .entry(template_id.to_string())
            .or_default()
            .push(StoredField {
                field: field.clone(),
                created_at: Utc::now(),
            });
        field
    }

    /// Apply a partial update. Idempotent: re-applying the same patch
    /// leaves the field unchanged.
    pub fn update_field(&self, field_id: &str, patch: &FieldPatch) -> Result<Field, DatabaseError> {
        let mut templates = self.templates.write();
        for stored in templates.values_mut() {
            if let Some(entry) = stored.iter_mut().find(|s| s.field.id == field_id) {
                patch.apply(&mut entry.field);
                return Ok(entry.field.clone());
            }
        }
        Err(DatabaseError::FieldNotFound(field_id.to_string()))
    }

    pub fn delete_field(&self, field_id: &str) -> Result<(), DatabaseError> {
        let mut templates = self.templates.write();
        for stored in templates.values_mut() {
            if let Some(index) = stored.iter().position(|s| s.field.id == field_id) {
                stored.remove(index);
                return Ok(());
            }
        }
        Err(DatabaseError::FieldNotFound(field_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmark_core::FieldKind;

    fn prototype(page: u32, x: f64) -> Field {
        Field {
            id: String::new(),
            kind: FieldKind::Signature,
            signer_role: "executive".to_string(),
            page,
            x,
            y: 70.0,
            width: 24.0,
            height: 12.0,
            label: None,
            required: true,
        }
    }

    #[test]
    fn test_create_assigns_id_and_lists_in_order() {
        let db = Database::new();
        let b = db.create_field("t1", prototype(2, 10.0));
        let a = db.create_field("t1", prototype(1, 20.0));
        let c = db.create_field("t1", prototype(2, 30.0));
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);

        // Page ascending, creation order within a page
        let listed: Vec<String> = db.list_fields("t1").into_iter().map(|f| f.id).collect();
        assert_eq!(listed, vec![a.id, b.id, c.id]);
    }

    #[test]
    fn test_list_unknown_template_is_empty() {
        let db = Database::new();
        assert!(db.list_fields("nope").is_empty());
    }

    #[test]
    fn test_update_is_partial_and_idempotent() {
        let db = Database::new();
        let field = db.create_field("t1", prototype(1, 40.0));

        let patch = FieldPatch::position(55.0, 60.0);
        db.update_field(&field.id, &patch).unwrap();
        let after_first = db.list_fields("t1")[0].clone();

        // Committing the same position twice leaves the store unchanged
        db.update_field(&field.id, &patch).unwrap();
        let after_second = db.list_fields("t1")[0].clone();
        assert_eq!(after_first, after_second);
        assert_eq!(after_second.position(), (55.0, 60.0));
        assert_eq!(after_second.width, 24.0);
    }

    #[test]
    fn test_failed_commit_leaves_stored_position() {
        let db = Database::new();
        let field = db.create_field("t1", prototype(1, 40.0));

        // A commit against a bogus id fails; the stored field keeps its
        // pre-drag position, which is what a rollback refetch returns.
        let err = db.update_field("missing", &FieldPatch::position(90.0, 90.0));
        assert!(matches!(err, Err(DatabaseError::FieldNotFound(_))));
        assert_eq!(db.list_fields("t1")[0].position(), (40.0, 70.0));
        let _ = field;
    }

    #[test]
    fn test_delete() {
        let db = Database::new();
        let field = db.create_field("t1", prototype(1, 40.0));
        db.delete_field(&field.id).unwrap();
        assert!(db.list_fields("t1").is_empty());
        assert!(db.delete_field(&field.id).is_err());
    }

    #[test]
    fn test_create_clamps_page_to_one() {
        let db = Database::new();
        let field = db.create_field("t1", prototype(0, 0.0));
        assert_eq!(field.page, 1);
    }
}
