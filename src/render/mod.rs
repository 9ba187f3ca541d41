//! Rendering module for writing results.

mod json;

pub use json::{to_json, JsonFormat};
