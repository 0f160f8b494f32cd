//! Client-side services.

pub mod sync;
