//! HTTP transports for the processing service.
//!
//! The dispatcher only needs a status code and a body back; interpreting
//! them happens in one place regardless of platform.

use std::future::Future;

use crate::error::ProcessingError;
use crate::model::ProcessedImage;
use crate::request::OperationRequest;

#[cfg(target_arch = "wasm32")]
mod fetch;
#[cfg(not(target_arch = "wasm32"))]
mod http;

#[cfg(target_arch = "wasm32")]
pub use fetch::FetchTransport;
#[cfg(not(target_arch = "wasm32"))]
pub use http::HttpTransport;

/// Raw HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Interpret the response as a processed image.
    pub fn into_image(self) -> Result<ProcessedImage, ProcessingError> {
        if !self.is_success() {
            return Err(ProcessingError::Status {
                status: self.status,
            });
        }
        ProcessedImage::from_json(&self.body)
    }
}

/// Sends an assembled request and returns the server's raw answer.
///
/// Any failure to obtain a response at all is reported as
/// [`ProcessingError::Network`].
pub trait Transport {
    fn send(
        &self,
        request: &OperationRequest,
    ) -> impl Future<Output = Result<TransportResponse, ProcessingError>>;
}
