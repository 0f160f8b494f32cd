//! Field store state management hook.

use std::rc::Rc;

use fieldmark_core::{Field, FieldPatch, FieldStore};
use yew::prelude::*;

/// Editor view-model state: the working field cache plus UI selection.
#[derive(Clone, PartialEq)]
pub struct FieldsState {
    /// Per-template working cache, mutated optimistically.
    pub store: FieldStore,
    /// Field shown in the properties panel.
    pub selected_field: Option<String>,
    /// 1-based page currently displayed.
    pub active_page: u32,
    /// Whether the initial fetch is still in flight.
    pub loading: bool,
}

impl Default for FieldsState {
    fn default() -> Self {
        Self {
            store: FieldStore::new(),
            selected_field: None,
            active_page: 1,
            loading: true,
        }
    }
}

/// State transitions for the field view-model.
pub enum FieldsAction {
    /// Initial load finished: adopt server truth, reset page and selection.
    Loaded(Vec<Field>),
    /// Reconcile with server truth, keeping the current page and selection.
    Replace(Vec<Field>),
    /// Synchronous local-only mutation (drag move or form edit).
    UpsertLocal { field_id: String, patch: FieldPatch },
    /// A create commit succeeded; adopt the store-assigned record.
    Insert(Field),
    /// A delete commit succeeded.
    Remove(String),
    /// Select a field for the properties panel.
    Select(Option<String>),
    /// Switch the displayed page; clears the selection.
    SetPage(u32),
    /// Switch the displayed page while keeping the selection, as when a
    /// field is edited onto another page and the view follows it.
    FollowPage(u32),
    /// Compensating action for a failed position commit.
    RevertPosition { field_id: String, origin: (f64, f64) },
    /// Initial fetch failed; stop showing the loading state.
    LoadFailed,
}

impl Reducible for FieldsState {
    type Action = FieldsAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            FieldsAction::Loaded(fields) => {
                let mut store = FieldStore::new();
                store.replace_all(fields);
                Rc::new(Self {
                    store,
                    selected_field: None,
                    active_page: 1,
                    loading: false,
                })
            }
            FieldsAction::Replace(fields) => {
                let mut store = self.store.clone();
                store.replace_all(fields);
                let selected_field = self
                    .selected_field
                    .clone()
                    .filter(|id| store.get(id).is_some());
                Rc::new(Self {
                    store,
                    selected_field,
                    loading: false,
                    ..(*self).clone()
                })
            }
            FieldsAction::UpsertLocal { field_id, patch } => {
                let mut store = self.store.clone();
                store.upsert_local(&field_id, &patch);
                Rc::new(Self {
                    store,
                    ..(*self).clone()
                })
            }
            FieldsAction::Insert(field) => {
                let mut store = self.store.clone();
                let id = field.id.clone();
                store.insert(field);
                Rc::new(Self {
                    store,
                    selected_field: Some(id),
                    ..(*self).clone()
                })
            }
            FieldsAction::Remove(field_id) => {
                let mut store = self.store.clone();
                store.remove(&field_id);
                let selected_field = self.selected_field.clone().filter(|id| *id != field_id);
                Rc::new(Self {
                    store,
                    selected_field,
                    ..(*self).clone()
                })
            }
            FieldsAction::Select(field_id) => Rc::new(Self {
                selected_field: field_id,
                ..(*self).clone()
            }),
            FieldsAction::SetPage(page) => Rc::new(Self {
                active_page: page.max(1),
                selected_field: None,
                ..(*self).clone()
            }),
            FieldsAction::FollowPage(page) => Rc::new(Self {
                active_page: page.max(1),
                ..(*self).clone()
            }),
            FieldsAction::RevertPosition { field_id, origin } => {
                let mut store = self.store.clone();
                store.revert_position(&field_id, origin);
                Rc::new(Self {
                    store,
                    ..(*self).clone()
                })
            }
            FieldsAction::LoadFailed => Rc::new(Self {
                loading: false,
                ..(*self).clone()
            }),
        }
    }
}

/// Field state handle returned by `use_field_store`.
#[derive(Clone)]
pub struct FieldStoreHandle {
    pub store: FieldStore,
    pub selected_field: Option<String>,
    pub active_page: u32,
    pub loading: bool,
    pub on_loaded: Callback<Vec<Field>>,
    pub on_load_failed: Callback<()>,
    pub on_replace: Callback<Vec<Field>>,
    pub on_upsert_local: Callback<(String, FieldPatch)>,
    pub on_insert: Callback<Field>,
    pub on_remove: Callback<String>,
    pub on_select: Callback<Option<String>>,
    pub on_set_page: Callback<u32>,
    pub on_follow_page: Callback<u32>,
    pub on_revert_position: Callback<(String, (f64, f64))>,
}

impl FieldStoreHandle {
    pub fn selected(&self) -> Option<&Field> {
        self.selected_field.as_deref().and_then(|id| self.store.get(id))
    }
}

/// Hook for managing the editor's field view-model.
#[hook]
pub fn use_field_store() -> FieldStoreHandle {
    let state = use_reducer(FieldsState::default);

    let on_loaded = {
        let state = state.clone();
        Callback::from(move |fields: Vec<Field>| {
            state.dispatch(FieldsAction::Loaded(fields));
        })
    };

    let on_load_failed = {
        let state = state.clone();
        Callback::from(move |(): ()| {
            state.dispatch(FieldsAction::LoadFailed);
        })
    };

    let on_replace = {
        let state = state.clone();
        Callback::from(move |fields: Vec<Field>| {
            state.dispatch(FieldsAction::Replace(fields));
        })
    };

    let on_upsert_local = {
        let state = state.clone();
        Callback::from(move |(field_id, patch): (String, FieldPatch)| {
            state.dispatch(FieldsAction::UpsertLocal { field_id, patch });
        })
    };

    let on_insert = {
        let state = state.clone();
        Callback::from(move |field: Field| {
            state.dispatch(FieldsAction::Insert(field));
        })
    };

    let on_remove = {
        let state = state.clone();
        Callback::from(move |field_id: String| {
            state.dispatch(FieldsAction::Remove(field_id));
        })
    };

    let on_select = {
        let state = state.clone();
        Callback::from(move |field_id: Option<String>| {
            state.dispatch(FieldsAction::Select(field_id));
        })
    };

    let on_set_page = {
        let state = state.clone();
        Callback::from(move |page: u32| {
            state.dispatch(FieldsAction::SetPage(page));
        })
    };

    let on_follow_page = {
        let state = state.clone();
        Callback::from(move |page: u32| {
            state.dispatch(FieldsAction::FollowPage(page));
        })
    };

    let on_revert_position = {
        let state = state.clone();
        Callback::from(move |(field_id, origin): (String, (f64, f64))| {
            state.dispatch(FieldsAction::RevertPosition { field_id, origin });
        })
    };

    FieldStoreHandle {
        store: state.store.clone(),
        selected_field: state.selected_field.clone(),
        active_page: state.active_page,
        loading: state.loading,
        on_loaded,
        on_load_failed,
        on_replace,
        on_upsert_local,
        on_insert,
        on_remove,
        on_select,
        on_set_page,
        on_follow_page,
        on_revert_position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmark_core::FieldKind;

    fn field(id: &str, page: u32) -> Field {
        Field {
            id: id.to_string(),
            kind: FieldKind::Signature,
            signer_role: "executive".to_string(),
            page,
            x: 40.0,
            y: 70.0,
            width: 24.0,
            height: 12.0,
            label: None,
            required: true,
        }
    }

    fn state_with_selection() -> Rc<FieldsState> {
        let mut store = FieldStore::new();
        store.insert(field("f-1", 1));
        Rc::new(FieldsState {
            store,
            selected_field: Some("f-1".to_string()),
            active_page: 1,
            loading: false,
        })
    }

    #[test]
    fn test_set_page_clears_selection() {
        let next = state_with_selection().reduce(FieldsAction::SetPage(3));
        assert_eq!(next.active_page, 3);
        assert_eq!(next.selected_field, None);
    }

    #[test]
    fn test_follow_page_keeps_selection() {
        let next = state_with_selection().reduce(FieldsAction::FollowPage(3));
        assert_eq!(next.active_page, 3);
        assert_eq!(next.selected_field.as_deref(), Some("f-1"));
    }

    #[test]
    fn test_follow_page_floors_at_one() {
        let next = state_with_selection().reduce(FieldsAction::FollowPage(0));
        assert_eq!(next.active_page, 1);
    }
}
