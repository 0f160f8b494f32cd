//! Fieldmark Core Library
//!
//! The placement engine behind the signature-field editor: a
//! resolution-independent coordinate model, saturating bounds clamping,
//! a single-gesture drag session, and the in-memory field store that the
//! UI mutates optimistically.
//!
//! Everything in this crate is synchronous and platform-neutral; the wasm
//! front end and the gRPC backend both build on these types.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod field;
pub mod geometry;
pub mod session;
pub mod store;

pub use field::{Field, FieldKind, FieldPatch, DEFAULT_HEIGHT, DEFAULT_POSITION, DEFAULT_WIDTH};
pub use geometry::{
    clamp_position, snap_zoom, CanvasMetrics, MAX_ZOOM, MIN_HEIGHT, MIN_WIDTH, MIN_ZOOM, ZOOM_STEP,
};
pub use session::DragSession;
pub use store::FieldStore;
