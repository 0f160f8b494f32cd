//! In-memory field store (view-model).
//!
//! The per-template working cache the UI reads and mutates. Drags and form
//! edits write here optimistically; [`FieldStore::replace_all`] reconciles
//! with the backing store after a fetch, discarding local-only divergence.

use serde::{Deserialize, Serialize};

use crate::field::{Field, FieldPatch};

/// Ordered collection of the fields on one template.
///
/// Fields keep the order the backing store returns them in (page, then
/// creation time); local inserts append, which matches creation order for
/// newly created fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FieldStore {
    fields: Vec<Field>,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn get(&self, field_id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    /// Fields anchored to `page`, in stable (page, creation) order.
    pub fn fields_on_page(&self, page: u32) -> Vec<&Field> {
        self.fields.iter().filter(|f| f.page == page).collect()
    }

    /// Highest page any field is anchored to, at least 1.
    pub fn max_page(&self) -> u32 {
        self.fields.iter().map(|f| f.page).max().unwrap_or(1).max(1)
    }

    /// Synchronous local mutation; returns false if the field is unknown.
    pub fn upsert_local(&mut self, field_id: &str, patch: &FieldPatch) -> bool {
        match self.fields.iter_mut().find(|f| f.id == field_id) {
            Some(field) => {
                patch.apply(field);
                true
            }
            None => false,
        }
    }

    /// Full reconciliation after a fetch. Discards any uncommitted
    /// local-only state, including an in-progress gesture's.
    pub fn replace_all(&mut self, fields: Vec<Field>) {
        self.fields = fields;
    }

    pub fn insert(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn remove(&mut self, field_id: &str) -> Option<Field> {
        let index = self.fields.iter().position(|f| f.id == field_id)?;
        Some(self.fields.remove(index))
    }

    /// Compensating action for a failed position commit: put just this
    /// field back where it was before the drag, leaving every other local
    /// edit intact.
    pub fn revert_position(&mut self, field_id: &str, origin: (f64, f64)) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.id == field_id) {
            field.x = origin.0;
            field.y = origin.1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    fn field(id: &str, page: u32, x: f64) -> Field {
        Field {
            id: id.to_string(),
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
    fn test_fields_on_page_filters_and_keeps_order() {
        let mut store = FieldStore::new();
        store.insert(field("a", 1, 10.0));
        store.insert(field("b", 2, 20.0));
        store.insert(field("c", 1, 30.0));

        let page1: Vec<&str> = store
            .fields_on_page(1)
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(page1, vec!["a", "c"]);
        assert_eq!(store.fields_on_page(3).len(), 0);
    }

    #[test]
    fn test_max_page() {
        let mut store = FieldStore::new();
        assert_eq!(store.max_page(), 1);
        store.insert(field("a", 1, 0.0));
        store.insert(field("b", 4, 0.0));
        assert_eq!(store.max_page(), 4);
    }

    #[test]
    fn test_upsert_local_partial_update() {
        let mut store = FieldStore::new();
        store.insert(field("a", 1, 10.0));

        assert!(store.upsert_local("a", &FieldPatch::position(55.0, 44.0)));
        let updated = store.get("a").unwrap();
        assert_eq!(updated.x, 55.0);
        assert_eq!(updated.y, 44.0);
        assert_eq!(updated.width, 24.0);

        assert!(!store.upsert_local("missing", &FieldPatch::position(0.0, 0.0)));
    }

    #[test]
    fn test_replace_all_discards_local_state() {
        let mut store = FieldStore::new();
        store.insert(field("a", 1, 10.0));
        store.upsert_local("a", &FieldPatch::position(90.0, 90.0));

        // Server truth comes back with the pre-drag position
        store.replace_all(vec![field("a", 1, 10.0)]);
        assert_eq!(store.get("a").unwrap().x, 10.0);
    }

    #[test]
    fn test_revert_position_touches_only_the_failed_field() {
        let mut store = FieldStore::new();
        store.insert(field("a", 1, 10.0));
        store.insert(field("b", 1, 20.0));

        store.upsert_local("a", &FieldPatch::position(60.0, 60.0));
        store.upsert_local("b", &FieldPatch::position(80.0, 80.0));

        // Commit for "a" failed; its pre-drag origin is restored while
        // "b" keeps its uncommitted local change.
        store.revert_position("a", (10.0, 70.0));
        assert_eq!(store.get("a").unwrap().position(), (10.0, 70.0));
        assert_eq!(store.get("b").unwrap().position(), (80.0, 80.0));
    }

    #[test]
    fn test_remove() {
        let mut store = FieldStore::new();
        store.insert(field("a", 1, 10.0));
        assert!(store.remove("a").is_some());
        assert!(store.remove("a").is_none());
        assert!(store.is_empty());
    }
}
