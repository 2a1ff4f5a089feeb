//! Dataset input and output.

pub mod export;
pub mod loader;

pub use export::write_cleaned_csv;
pub use loader::{DatasetLoader, LoadOptions};
