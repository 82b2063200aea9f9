//! imgproc-client - image processing service client
//!
//! Picks an image, previews it locally and sends it to a remote service for
//! cropping, grayscale conversion or convolution. Runs in the browser (WASM)
//! and as a native command-line tool.

pub mod arbiter;
pub mod config;
pub mod constants;
pub mod data_url;
pub mod dispatcher;
pub mod error;
pub mod model;
pub mod preview;
pub mod request;
pub mod transport;
pub mod view;

#[cfg(test)]
mod test_support;

pub use arbiter::{RequestArbiter, RequestId};
pub use config::{ClientConfig, ConfigError, LogLevel};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use error::ProcessingError;
pub use model::{CropParameters, Operation, ProcessedImage, SelectedFile, Selection};
pub use preview::{PreviewHandler, PreviewOutcome};
pub use request::{FormPart, FormPayload, OperationRequest};
pub use transport::{Transport, TransportResponse};
pub use view::{ImageView, Notifier};

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(not(target_arch = "wasm32"))]
pub use transport::HttpTransport;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
mod wasm_file;

#[cfg(target_arch = "wasm32")]
pub use transport::FetchTransport;
#[cfg(target_arch = "wasm32")]
pub use wasm::*;
