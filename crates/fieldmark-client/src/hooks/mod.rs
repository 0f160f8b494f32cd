//! Custom hooks for the fieldmark client.

mod use_field_service;
mod use_field_store;

pub use use_field_service::use_field_service;
pub use use_field_store::{FieldStoreHandle, use_field_store};
