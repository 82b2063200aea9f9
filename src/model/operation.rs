//! Remote operations and their results.

use serde::Deserialize;

use super::CropParameters;
use crate::constants::RESULT_MIME;
use crate::data_url;
use crate::error::ProcessingError;

/// An operation the processing service can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Cut out a rectangle
    Crop(CropParameters),
    /// Convert to grayscale
    Grayscale,
    /// Blur with a box convolution kernel
    Convolution,
}

impl Operation {
    /// Endpoint name appended to the service base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Operation::Crop(_) => "crop",
            Operation::Grayscale => "grayscale",
            Operation::Convolution => "convolution",
        }
    }
}

/// Image returned by the service, as carried in the response JSON.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProcessedImage {
    /// Base64-encoded JPEG
    pub image_base64: String,
}

impl ProcessedImage {
    /// Parse a response body.
    pub fn from_json(body: &str) -> Result<Self, ProcessingError> {
        Ok(serde_json::from_str(body)?)
    }

    /// The image as a JPEG data URL.
    pub fn data_url(&self) -> String {
        data_url::from_base64(RESULT_MIME, &self.image_base64)
    }
}
