//! Global constants for the image processing client

/// Default address of the processing service. Endpoint names are appended directly.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/";

/// MIME type of every image the service returns.
pub const RESULT_MIME: &str = "image/jpeg";

/// MIME type used when a picked file's type cannot be determined.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Alert shown for any failed processing request.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while processing the image";

/// Alert shown when an operation is triggered with nothing selected.
pub const NO_FILE_MESSAGE: &str = "Select an image before choosing an operation.";

/// Alert shown when the picked file cannot be read.
pub const FILE_READ_MESSAGE: &str = "The selected image could not be read.";

/// Multipart field names understood by the service.
pub mod fields {
    pub const IMAGE_FILE: &str = "image_file";
    pub const X: &str = "x";
    pub const Y: &str = "y";
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
}

/// DOM element ids the browser front end binds to.
pub mod dom_ids {
    pub const IMAGE_INPUT: &str = "imageInput";
    pub const PREVIEW: &str = "preview";
    pub const RESULT: &str = "result";
    pub const CROP_X: &str = "cropX";
    pub const CROP_Y: &str = "cropY";
    pub const CROP_WIDTH: &str = "cropWidth";
    pub const CROP_HEIGHT: &str = "cropHeight";
    pub const CROP_BUTTON: &str = "cropButton";
    pub const GRAYSCALE_BUTTON: &str = "grayscaleButton";
    pub const CONVOLUTION_BUTTON: &str = "convolutionButton";
}
