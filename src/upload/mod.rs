//! Upload pipeline: prepare an image locally, then send it as multipart.
//!
//! The two stages fail independently and are logged apart
//! (`stage = "transform"` vs `stage = "transfer"`), but the admin sees the
//! same toast for both. Nothing downstream is touched unless both succeed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::traits::BinaryUploader;
use crate::api::{UploadFile, UploadedAsset};
use crate::config::UploadConfig;
use crate::error::AdminError;
use crate::notify::Notifications;

pub mod image;

pub use self::image::{jpeg_file_name, prepare_image, PreparedImage, TransformError};

/// Progress reported to the view while an upload runs
#[derive(Clone, Debug, Default, PartialEq)]
pub enum UploadStatus {
    #[default]
    Idle,
    Transforming,
    Transferring,
    /// Carries the server-assigned URL
    Done(String),
    Failed(String),
}

impl UploadStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, UploadStatus::Transforming | UploadStatus::Transferring)
    }

    pub fn label(&self) -> &str {
        match self {
            UploadStatus::Idle => "",
            UploadStatus::Transforming => "Optimizing image...",
            UploadStatus::Transferring => "Uploading...",
            UploadStatus::Done(_) => "Uploaded",
            UploadStatus::Failed(msg) => msg,
        }
    }
}

/// A file picked by the admin, as read from the input
#[derive(Clone, Debug)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Clears the in-flight flag however the run ends
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct UploadPipeline<U: BinaryUploader> {
    uploader: Arc<U>,
    config: UploadConfig,
    notifications: Notifications,
    in_flight: Arc<AtomicBool>,
}

impl<U: BinaryUploader> Clone for UploadPipeline<U> {
    fn clone(&self) -> Self {
        Self {
            uploader: Arc::clone(&self.uploader),
            config: self.config.clone(),
            notifications: self.notifications.clone(),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

impl<U: BinaryUploader> UploadPipeline<U> {
    pub fn new(uploader: Arc<U>, config: UploadConfig, notifications: Notifications) -> Self {
        Self {
            uploader,
            config,
            notifications,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Stage one: decode, bound, re-encode and rename
    pub fn transform(&self, file: &SelectedFile) -> Result<UploadFile, AdminError> {
        let prepared = prepare_image(&file.bytes, &file.name, &self.config).map_err(|e| {
            warn!(stage = "transform", file = %file.name, error = %e, "image preparation failed");
            AdminError::UploadTransformFailed(e.to_string())
        })?;
        debug!(
            file = %file.name,
            original_bytes = file.bytes.len(),
            bytes = prepared.bytes.len(),
            width = prepared.width,
            height = prepared.height,
            quality = prepared.quality,
            "image prepared"
        );
        Ok(UploadFile {
            file_name: jpeg_file_name(&file.name),
            content_type: self::image::OUTPUT_CONTENT_TYPE.to_string(),
            bytes: prepared.bytes,
        })
    }

    /// Transform then transfer, reporting each step through `on_status`.
    ///
    /// Returns the uploaded asset's URL. A second run while one is active
    /// fails with `Busy` and reports nothing.
    pub async fn run(
        &self,
        file: SelectedFile,
        metadata: Vec<(String, String)>,
        mut on_status: impl FnMut(UploadStatus),
    ) -> Result<UploadedAsset, AdminError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(AdminError::Busy);
        }
        let _in_flight = InFlight(Arc::clone(&self.in_flight));

        on_status(UploadStatus::Transforming);
        let prepared = match self.transform(&file) {
            Ok(prepared) => prepared,
            Err(e) => return Err(self.fail(e, &mut on_status)),
        };

        on_status(UploadStatus::Transferring);
        let file_name = prepared.file_name.clone();
        match self.uploader.upload_binary(prepared, metadata).await {
            Ok(asset) => {
                info!(file = %file_name, url = %asset.url, "image uploaded");
                self.notifications.success("Image uploaded successfully");
                on_status(UploadStatus::Done(asset.url.clone()));
                Ok(asset)
            }
            Err(e) => {
                warn!(stage = "transfer", file = %file_name, kind = e.kind(), error = %e, "image upload failed");
                Err(self.fail(AdminError::UploadTransferFailed(e), &mut on_status))
            }
        }
    }

    fn fail(&self, err: AdminError, on_status: &mut impl FnMut(UploadStatus)) -> AdminError {
        let message = err.user_message();
        self.notifications.error(message.clone());
        on_status(UploadStatus::Failed(message));
        err
    }
}
