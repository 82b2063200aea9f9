//! Local preview of the picked file.
//!
//! Reading a file is asynchronous on the web, so two quick picks can finish
//! out of order. Each read gets a ticket from a [`RequestArbiter`] and an
//! older read never replaces a newer preview.

use std::future::Future;

use crate::arbiter::{RequestArbiter, RequestId};
use crate::error::ProcessingError;
use crate::model::SelectedFile;
use crate::view::ImageView;

/// Result of one preview read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// The preview shows this file; it should become the selection
    Shown(SelectedFile),
    /// A newer pick was already shown
    Superseded(RequestId),
    /// The read failed; the preview is unchanged
    Failed {
        id: RequestId,
        /// Message suitable for showing to the user
        message: String,
    },
}

/// Shows picked files in a preview view without any network traffic.
#[derive(Debug, Default)]
pub struct PreviewHandler {
    arbiter: RequestArbiter,
}

impl PreviewHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a read that is about to start.
    pub fn begin(&self) -> RequestId {
        self.arbiter.issue()
    }

    /// Drop every read still in flight, e.g. when the picker is cleared.
    pub fn invalidate(&self) {
        let id = self.arbiter.issue();
        self.arbiter.try_apply(id);
        log::debug!("Pending preview reads invalidated at {}", id);
    }

    /// Apply a finished read.
    pub fn complete(
        &self,
        id: RequestId,
        read: Result<SelectedFile, ProcessingError>,
        preview: &impl ImageView,
    ) -> PreviewOutcome {
        match read {
            Ok(file) => {
                if self.arbiter.try_apply(id) {
                    log::debug!("Previewing {} ({})", file.name, file.mime);
                    preview.set_source(&file.to_data_url());
                    PreviewOutcome::Shown(file)
                } else {
                    log::debug!("Preview read {} superseded", id);
                    PreviewOutcome::Superseded(id)
                }
            }
            Err(err) => {
                log::warn!("Could not read picked file: {}", err);
                PreviewOutcome::Failed {
                    id,
                    message: err.user_message(),
                }
            }
        }
    }

    /// Await `read` and show the file it produces.
    pub async fn show<F>(&self, read: F, preview: &impl ImageView) -> PreviewOutcome
    where
        F: Future<Output = Result<SelectedFile, ProcessingError>>,
    {
        let id = self.begin();
        let file = read.await;
        self.complete(id, file, preview)
    }
}
