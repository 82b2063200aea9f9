//! Data models for the processing client.

mod crop;
mod operation;
mod selection;

pub use crop::CropParameters;
pub use operation::{Operation, ProcessedImage};
pub use selection::{SelectedFile, Selection, sniff_mime};
