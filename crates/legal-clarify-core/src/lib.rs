#![warn(missing_docs)]
//! # legal-clarify-core
//!
//! ## Purpose
//! Defines the pure data model shared across the `legal-clarify` workspace.
//!
//! ## Responsibilities
//! - Describe a selected document by its declared metadata ([`DocumentFile`]).
//! - Track one document through the upload pipeline ([`UploadedFile`]).
//! - Encode the legal status transitions of that pipeline.
//!
//! ## Data flow
//! The upload page turns a user selection into a [`DocumentFile`]. Once the
//! file passes validation it is wrapped in an [`UploadedFile`] and mutated by
//! simulation timers through [`UploadedFile::advance_status`] and
//! [`UploadedFile::raise_progress`].
//!
//! ## Ownership and lifetimes
//! Entries own their strings so they can outlive the selection event that
//! created them and be dropped wholesale on page teardown.
//!
//! ## Error model
//! Attempts to move backwards through the pipeline or to lower progress return
//! [`CoreError`] instead of silently corrupting state.
//!
//! ## Example
//! ```rust
//! use legal_clarify_core::{DocumentFile, FileId, UploadStatus, UploadedFile};
//!
//! let file = DocumentFile::new("lease.pdf", "application/pdf", 2 * 1024 * 1024);
//! let mut entry = UploadedFile::new(FileId::new("abc123xyz"), file);
//! assert_eq!(entry.status, UploadStatus::Uploading);
//! entry.advance_status(UploadStatus::Analyzing).unwrap();
//! assert!(entry.advance_status(UploadStatus::Uploading).is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound of the progress scale.
pub const PROGRESS_COMPLETE: u8 = 100;

/// Declared metadata of a user-selected document.
///
/// Only the browser-reported media type and byte size are known; contents are
/// never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFile {
    /// Original file name.
    pub name: String,
    /// Declared media type (for example `application/pdf`).
    pub media_type: String,
    /// Size in bytes.
    pub size_bytes: u64,
}

impl DocumentFile {
    /// Creates a document descriptor.
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size_bytes,
        }
    }

    /// Size in mebibytes, formatted with two decimals (`"2.00"`).
    pub fn size_mb_label(&self) -> String {
        format!("{:.2}", self.size_bytes as f64 / 1024.0 / 1024.0)
    }
}

/// Opaque identifier of one tracked upload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    /// Wraps an identifier string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrows the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pipeline status of one tracked upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UploadStatus {
    /// Bytes are (notionally) being transferred.
    Uploading,
    /// Upload finished; analysis is pending.
    Analyzing,
    /// Analysis produced a result.
    Completed,
    /// Analysis failed; terminal.
    Error,
}

impl UploadStatus {
    /// Returns `true` when moving from `self` to `next` is allowed.
    ///
    /// `Analyzing -> Analyzing` is accepted because the progress tick and the
    /// upload-completion timer may both write it.
    pub fn can_transition_to(self, next: UploadStatus) -> bool {
        matches!(
            (self, next),
            (UploadStatus::Uploading, UploadStatus::Analyzing)
                | (UploadStatus::Analyzing, UploadStatus::Analyzing)
                | (UploadStatus::Analyzing, UploadStatus::Completed)
                | (UploadStatus::Analyzing, UploadStatus::Error)
        )
    }

    /// Returns `true` for `Completed` and `Error`.
    pub fn is_terminal(self) -> bool {
        matches!(self, UploadStatus::Completed | UploadStatus::Error)
    }

    /// Short lowercase label used in list rows and logs.
    pub fn label(self) -> &'static str {
        match self {
            UploadStatus::Uploading => "uploading",
            UploadStatus::Analyzing => "analyzing",
            UploadStatus::Completed => "completed",
            UploadStatus::Error => "error",
        }
    }
}

/// One document tracked by the upload page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Selected document.
    pub file: DocumentFile,
    /// Tracking identifier.
    pub id: FileId,
    /// Upload progress in `[0, 100]`.
    pub progress: u8,
    /// Current pipeline status.
    pub status: UploadStatus,
}

impl UploadedFile {
    /// Creates a fresh entry at progress 0 in `Uploading`.
    pub fn new(id: FileId, file: DocumentFile) -> Self {
        Self {
            file,
            id,
            progress: 0,
            status: UploadStatus::Uploading,
        }
    }

    /// Moves the entry to `next`.
    ///
    /// # Errors
    /// Returns [`CoreError::IllegalTransition`] when the move is not permitted
    /// by [`UploadStatus::can_transition_to`].
    pub fn advance_status(&mut self, next: UploadStatus) -> Result<(), CoreError> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::IllegalTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Raises progress to `value`.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidProgress`] when `value` exceeds 100 or is
    /// below the current progress.
    pub fn raise_progress(&mut self, value: u8) -> Result<(), CoreError> {
        if value > PROGRESS_COMPLETE || value < self.progress {
            return Err(CoreError::InvalidProgress {
                current: self.progress,
                requested: value,
            });
        }
        self.progress = value;
        Ok(())
    }
}

/// Error type for data-model invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Status change would violate pipeline ordering.
    #[error("illegal status transition: {from:?} -> {to:?}")]
    IllegalTransition {
        /// Status before the attempted change.
        from: UploadStatus,
        /// Requested status.
        to: UploadStatus,
    },
    /// Progress must stay within `[0, 100]` and never decrease.
    #[error("invalid progress: current {current}, requested {requested}")]
    InvalidProgress {
        /// Progress before the attempted change.
        current: u8,
        /// Requested progress.
        requested: u8,
    },
}
