//! Fieldmark Protocol Library
//!
//! Generated protobuf types and gRPC service definitions for the
//! field backing store.
//!
//! # Features
//! - `client`: gRPC client codegen (wasm-compatible, no transport)
//! - `server`: gRPC server codegen (requires tokio runtime)

#[allow(clippy::pedantic)]
pub mod field {
    #[cfg(feature = "server")]
    tonic::include_proto!("field");

    #[cfg(not(feature = "server"))]
    include!(concat!(env!("OUT_DIR"), "/field.rs"));
}
