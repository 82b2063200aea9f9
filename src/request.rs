//! Multipart request assembly.
//!
//! Requests are described here in a platform-neutral form; each transport
//! turns a [`FormPayload`] into its own multipart body.

use crate::arbiter::RequestId;
use crate::constants::fields;
use crate::model::{Operation, SelectedFile};

/// One field of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    /// Binary file field
    File {
        name: String,
        filename: String,
        mime: String,
        bytes: Vec<u8>,
    },
    /// Plain text field
    Text { name: String, value: String },
}

impl FormPart {
    /// Field name.
    pub fn name(&self) -> &str {
        match self {
            FormPart::File { name, .. } | FormPart::Text { name, .. } => name,
        }
    }
}

/// Ordered multipart form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    parts: Vec<FormPart>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file field.
    pub fn push_file(&mut self, name: &str, file: &SelectedFile) {
        self.parts.push(FormPart::File {
            name: name.to_string(),
            filename: file.name.clone(),
            mime: file.mime.clone(),
            bytes: file.bytes.clone(),
        });
    }

    /// Append a text field.
    pub fn push_text(&mut self, name: &str, value: impl Into<String>) {
        self.parts.push(FormPart::Text {
            name: name.to_string(),
            value: value.into(),
        });
    }

    /// All fields in insertion order.
    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// Value of the first text field with this name.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// First file field with this name.
    pub fn file(&self, name: &str) -> Option<&FormPart> {
        self.parts
            .iter()
            .find(|part| matches!(part, FormPart::File { .. }) && part.name() == name)
    }
}

/// A fully assembled POST to the processing service.
#[derive(Debug, Clone)]
pub struct OperationRequest {
    /// Arbitration ticket
    pub id: RequestId,
    /// Operation being requested
    pub operation: Operation,
    /// Absolute endpoint URL
    pub url: String,
    /// Multipart body
    pub payload: FormPayload,
}

impl OperationRequest {
    /// Build the request for `operation` on `file`.
    pub fn build(id: RequestId, base_url: &str, operation: Operation, file: &SelectedFile) -> Self {
        let mut payload = FormPayload::new();
        payload.push_file(fields::IMAGE_FILE, file);

        if let Operation::Crop(crop) = &operation {
            for (name, value) in crop.to_fields() {
                payload.push_text(name, value);
            }
        }

        Self {
            id,
            operation,
            url: endpoint_url(base_url, operation.endpoint()),
            payload,
        }
    }
}

/// Join the service base address and an endpoint name.
pub fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    if base_url.ends_with('/') {
        format!("{base_url}{endpoint}")
    } else {
        format!("{base_url}/{endpoint}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbiter::RequestArbiter;
    use crate::constants::DEFAULT_BASE_URL;
    use crate::model::CropParameters;

    fn sample_file() -> SelectedFile {
        SelectedFile::new("cat.png", "image/png", vec![1, 2, 3])
    }

    #[test]
    fn test_endpoint_url() {
        assert_eq!(
            endpoint_url(DEFAULT_BASE_URL, "grayscale"),
            "http://localhost:8000/grayscale"
        );
        assert_eq!(
            endpoint_url("http://example.com:9000", "crop"),
            "http://example.com:9000/crop"
        );
    }

    #[test]
    fn test_crop_request_fields() {
        let arbiter = RequestArbiter::new();
        let crop = Operation::Crop(CropParameters::new(10, 20, 100, 50));
        let request = OperationRequest::build(arbiter.issue(), DEFAULT_BASE_URL, crop, &sample_file());

        assert_eq!(request.url, "http://localhost:8000/crop");
        assert_eq!(request.payload.text("x"), Some("10"));
        assert_eq!(request.payload.text("y"), Some("20"));
        assert_eq!(request.payload.text("width"), Some("100"));
        assert_eq!(request.payload.text("height"), Some("50"));

        match request.payload.file("image_file") {
            Some(FormPart::File {
                filename,
                mime,
                bytes,
                ..
            }) => {
                assert_eq!(filename, "cat.png");
                assert_eq!(mime, "image/png");
                assert_eq!(bytes, &vec![1, 2, 3]);
            }
            other => panic!("missing image_file part: {other:?}"),
        }

        // The file always goes first, followed by the bounds
        let names: Vec<_> = request.payload.parts().iter().map(FormPart::name).collect();
        assert_eq!(names, ["image_file", "x", "y", "width", "height"]);
    }

    #[test]
    fn test_parameterless_requests_only_carry_file() {
        let arbiter = RequestArbiter::new();
        for operation in [Operation::Grayscale, Operation::Convolution] {
            let request =
                OperationRequest::build(arbiter.issue(), DEFAULT_BASE_URL, operation, &sample_file());
            assert_eq!(request.payload.parts().len(), 1);
            assert!(request.payload.file("image_file").is_some());
            assert!(request.url.ends_with(operation.endpoint()));
        }
    }
}
