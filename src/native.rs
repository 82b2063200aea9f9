//! Native (desktop/CLI) platform support.
//!
//! File picking and alerts go through `rfd`; images are written to disk
//! instead of being shown in an element.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::config::LogLevel;
use crate::data_url;
use crate::error::ProcessingError;
use crate::model::SelectedFile;
use crate::view::{ImageView, Notifier};

/// Supported image file extensions.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff", "tif"];

/// Initialize env_logger at `level`. `RUST_LOG` still takes precedence.
pub fn init_logging(level: LogLevel) {
    let result = env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .try_init();
    if let Err(e) = result {
        eprintln!("Logger already initialized: {}", e);
    }
}

/// Ask the user for an image with a native file dialog.
pub fn pick_image() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select an image")
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file()
}

/// Read an image file from disk.
pub async fn load_file(path: &Path) -> Result<SelectedFile, ProcessingError> {
    let bytes = std::fs::read(path)
        .map_err(|e| ProcessingError::file_read(format!("{}: {}", path.display(), e)))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    log::info!("📂 Read {} ({} bytes)", name, bytes.len());
    Ok(SelectedFile::sniffed(name, bytes))
}

/// Writes the decoded image behind each source it receives to a file.
pub struct FileImageView {
    path: PathBuf,
    last_error: RefCell<Option<ProcessingError>>,
}

impl FileImageView {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_error: RefCell::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The error from the most recent write, if it failed.
    pub fn take_error(&self) -> Option<ProcessingError> {
        self.last_error.borrow_mut().take()
    }

    fn write(&self, src: &str) -> Result<(), ProcessingError> {
        let (_, bytes) = data_url::decode(src)?;
        std::fs::write(&self.path, &bytes)?;
        log::info!("Wrote {} bytes to {:?}", bytes.len(), self.path);
        Ok(())
    }
}

impl ImageView for FileImageView {
    fn set_source(&self, src: &str) {
        let result = self.write(src);
        if let Err(e) = &result {
            log::error!("Failed to write {:?}: {}", self.path, e);
        }
        *self.last_error.borrow_mut() = result.err();
    }
}

/// Stores the source itself (the data URL text) in a file, if a path is set.
pub struct DataUrlFileView {
    path: Option<PathBuf>,
}

impl DataUrlFileView {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl ImageView for DataUrlFileView {
    fn set_source(&self, src: &str) {
        let Some(path) = &self.path else {
            return;
        };
        match std::fs::write(path, src) {
            Ok(()) => log::info!("Wrote preview data URL to {:?}", path),
            Err(e) => log::error!("Failed to write preview {:?}: {}", path, e),
        }
    }
}

/// Where user-facing errors are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeNotifier {
    /// Blocking message dialog
    Dialog,
    /// Plain stderr, for scripts and terminals without a display
    Stderr,
}

impl Notifier for NativeNotifier {
    fn alert(&self, message: &str) {
        match self {
            NativeNotifier::Dialog => {
                rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Error)
                    .set_title("imgproc-client")
                    .set_description(message)
                    .set_buttons(rfd::MessageButtons::Ok)
                    .show();
            }
            NativeNotifier::Stderr => eprintln!("{}", message),
        }
    }
}
