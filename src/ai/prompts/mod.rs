//! Prompt templates for the recipe generation gateway.
//!
//! Each prompt family lives in its own module with a render function and a
//! stable name used for cache keys.

pub mod adapt;
pub mod assist;
pub mod generate;
pub mod translate;
