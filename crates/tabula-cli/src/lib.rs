//! CLI library components for tabula.

pub mod logging;
pub mod render;
pub mod source;
