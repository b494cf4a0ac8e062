//! Input and output adapters around the engine: CSV batches, timestamps and
//! the plain-text summaries shown to staff.

pub mod csv;
pub mod summary;
pub mod timestamp;
