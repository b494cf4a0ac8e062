//! Rate table sources: the chart compiled into the crate and JSON overrides.

pub mod builtin;
pub mod json_file;
