#![warn(missing_docs)]
//! # legal-clarify-upload
//!
//! ## Purpose
//! Validates selected documents and simulates their upload and analysis.
//!
//! ## Responsibilities
//! - Enforce the accepted media types and the 10 MiB size ceiling.
//! - Track accepted files through `Uploading -> Analyzing -> Completed`.
//! - Drive progress and completion from cancellable timers keyed by file id.
//! - Hand finished uploads to the configured [`AnalysisProvider`].
//!
//! ## Data flow
//! Selection -> [`validate_file`] -> [`UploadSimulator::begin_simulation`] arms
//! a progress interval and an upload-completion timer -> the UI loop calls
//! [`UploadSimulator::advance_to`] -> upload completion arms the analysis timer
//! -> analysis completion stores the provider's [`AnalysisResult`].
//!
//! ## Ownership and lifetimes
//! The simulator owns its tracked files, timers, and the latest result. The
//! whole set is dropped by [`UploadSimulator::teardown`] when the upload view
//! goes away, so no timer can act on discarded state.
//!
//! ## Error model
//! Rejections are synchronous [`UploadError`] values and never create a tracked
//! entry. A provider failure at analysis completion moves that file to
//! `Error`; there is no retry.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//!
//! use legal_clarify_analysis::MockAnalysisProvider;
//! use legal_clarify_core::{DocumentFile, UploadStatus};
//! use legal_clarify_upload::{SimulationConfig, UploadSimulator};
//!
//! let mut simulator = UploadSimulator::new(
//!     SimulationConfig::default(),
//!     Arc::new(MockAnalysisProvider::with_seed(1)),
//! )
//! .unwrap();
//! let id = simulator
//!     .begin_simulation(DocumentFile::new("lease.pdf", "application/pdf", 2 << 20), 0)
//!     .unwrap();
//! simulator.advance_to(3_500);
//! assert_eq!(simulator.file(&id).unwrap().status, UploadStatus::Completed);
//! assert!(simulator.analysis_result().is_some());
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use legal_clarify_analysis::{AnalysisProvider, AnalysisResult};
use legal_clarify_core::{
    CoreError, DocumentFile, FileId, PROGRESS_COMPLETE, UploadStatus, UploadedFile,
};
use legal_clarify_timers::{TimerError, TimerId, TimerQueue};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Media types accepted for analysis (PDF, DOCX, DOC, TXT, RTF).
pub const ACCEPTED_MEDIA_TYPES: [&str; 5] = [
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/msword",
    "text/plain",
    "text/rtf",
];

/// Largest accepted document, in bytes (10 MiB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// User-facing message for unsupported media types.
pub const UNSUPPORTED_TYPE_MESSAGE: &str =
    "File type not supported. Please upload PDF, DOCX, DOC, TXT, or RTF files.";

/// User-facing message for oversized documents.
pub const TOO_LARGE_MESSAGE: &str = "File size too large. Please upload files smaller than 10MB.";

const FILE_ID_LEN: usize = 9;
const FILE_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Checks declared media type, then size. Contents are never inspected.
///
/// # Errors
/// Returns [`UploadError::UnsupportedType`] for media types outside
/// [`ACCEPTED_MEDIA_TYPES`] and [`UploadError::TooLarge`] above
/// [`MAX_FILE_SIZE_BYTES`].
pub fn validate_file(file: &DocumentFile) -> Result<(), UploadError> {
    if !ACCEPTED_MEDIA_TYPES.contains(&file.media_type.as_str()) {
        return Err(UploadError::UnsupportedType {
            media_type: file.media_type.clone(),
        });
    }

    if file.size_bytes > MAX_FILE_SIZE_BYTES {
        return Err(UploadError::TooLarge {
            size_bytes: file.size_bytes,
            limit_bytes: MAX_FILE_SIZE_BYTES,
        });
    }

    Ok(())
}

/// Timing and step constants of the simulated pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Period of the progress interval.
    pub tick_interval_ms: u64,
    /// Progress points added per tick.
    pub progress_step: u8,
    /// Delay from begin until upload is forced complete.
    pub upload_complete_after_ms: u64,
    /// Delay from upload completion until analysis completes.
    pub analysis_complete_after_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 200,
            progress_step: 15,
            upload_complete_after_ms: 1_500,
            analysis_complete_after_ms: 2_000,
        }
    }
}

impl SimulationConfig {
    /// Checks that ticks have a positive period and make progress.
    ///
    /// # Errors
    /// Returns [`UploadError::InvalidConfig`] otherwise.
    pub fn validate(&self) -> Result<(), UploadError> {
        if self.tick_interval_ms == 0 {
            return Err(UploadError::InvalidConfig(
                "tick_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.progress_step == 0 {
            return Err(UploadError::InvalidConfig(
                "progress_step must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SimulationTimer {
    ProgressTick,
    UploadComplete,
    AnalysisComplete,
}

/// What happened to one tracked file during [`UploadSimulator::advance_to`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEventKind {
    /// Progress rose to the given value.
    Progress(u8),
    /// Status moved between two distinct states.
    StatusChanged {
        /// Previous status.
        from: UploadStatus,
        /// New status.
        to: UploadStatus,
    },
    /// A result for the given document type became current.
    AnalysisReady {
        /// Document type reported by the provider.
        document_type: String,
    },
    /// The provider failed; the file is now in `Error`.
    AnalysisFailed {
        /// Provider error text.
        reason: String,
    },
}

/// Timestamped simulation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadEvent {
    /// Logical time the triggering timer was due.
    pub at_ms: u64,
    /// Affected file.
    pub id: FileId,
    /// Event detail.
    pub kind: UploadEventKind,
}

/// Result of offering one selected file to the simulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// File passed validation and is now tracked.
    Accepted(FileId),
    /// File was refused; nothing is tracked for it.
    Rejected {
        /// Name of the refused file.
        file_name: String,
        /// Reason, displayable to the user.
        error: UploadError,
    },
}

/// Timer-driven upload and analysis simulation for one upload view.
pub struct UploadSimulator {
    config: SimulationConfig,
    provider: Arc<dyn AnalysisProvider>,
    files: Vec<UploadedFile>,
    tick_timers: HashMap<FileId, TimerId>,
    timers: TimerQueue<FileId, SimulationTimer>,
    result: Option<AnalysisResult>,
    show_analysis: bool,
    id_rng: StdRng,
}

impl UploadSimulator {
    /// Creates an empty simulator.
    ///
    /// # Errors
    /// Returns [`UploadError::InvalidConfig`] when `config` fails
    /// [`SimulationConfig::validate`].
    pub fn new(
        config: SimulationConfig,
        provider: Arc<dyn AnalysisProvider>,
    ) -> Result<Self, UploadError> {
        config.validate()?;
        Ok(Self {
            config,
            provider,
            files: Vec::new(),
            tick_timers: HashMap::new(),
            timers: TimerQueue::new(),
            result: None,
            show_analysis: false,
            id_rng: StdRng::from_os_rng(),
        })
    }

    /// Validates and begins simulation for each file, in selection order.
    pub fn select_files<I>(&mut self, files: I, now_ms: u64) -> Vec<SelectionOutcome>
    where
        I: IntoIterator<Item = DocumentFile>,
    {
        files
            .into_iter()
            .map(|file| {
                let file_name = file.name.clone();
                let started =
                    validate_file(&file).and_then(|()| self.begin_simulation(file, now_ms));
                match started {
                    Ok(id) => SelectionOutcome::Accepted(id),
                    Err(error) => {
                        tracing::warn!(file = %file_name, %error, "file rejected");
                        SelectionOutcome::Rejected { file_name, error }
                    }
                }
            })
            .collect()
    }

    /// Starts tracking `file` at progress 0 in `Uploading`.
    ///
    /// Callers are expected to have run [`validate_file`] first;
    /// [`UploadSimulator::select_files`] does both.
    ///
    /// # Errors
    /// Returns [`UploadError::Timer`] if the progress interval cannot be armed.
    pub fn begin_simulation(
        &mut self,
        file: DocumentFile,
        now_ms: u64,
    ) -> Result<FileId, UploadError> {
        let id = self.next_file_id();
        let tick = self.timers.schedule_interval(
            id.clone(),
            now_ms,
            self.config.tick_interval_ms,
            SimulationTimer::ProgressTick,
        )?;
        self.timers.schedule_once(
            id.clone(),
            now_ms,
            self.config.upload_complete_after_ms,
            SimulationTimer::UploadComplete,
        );
        self.tick_timers.insert(id.clone(), tick);

        tracing::info!(
            file_id = %id,
            file = %file.name,
            size_mb = %file.size_mb_label(),
            "upload simulation started"
        );
        self.files.push(UploadedFile::new(id.clone(), file));
        Ok(id)
    }

    /// Fires every timer due at or before `now_ms` and reports what changed.
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<UploadEvent> {
        let mut events = Vec::new();
        while let Some(fired) = self.timers.pop_due(now_ms) {
            match fired.event {
                SimulationTimer::ProgressTick => {
                    self.on_progress_tick(&fired.key, fired.due_ms, &mut events)
                }
                SimulationTimer::UploadComplete => {
                    self.on_upload_complete(&fired.key, fired.due_ms, &mut events)
                }
                SimulationTimer::AnalysisComplete => {
                    self.on_analysis_complete(&fired.key, fired.due_ms, &mut events)
                }
            }
        }
        events
    }

    /// Cancels all pending timers and discards tracked files and the result.
    ///
    /// Returns the number of cancelled timers.
    pub fn teardown(&mut self) -> usize {
        let cancelled = self.timers.cancel_all();
        self.tick_timers.clear();
        self.files.clear();
        self.result = None;
        self.show_analysis = false;
        tracing::info!(cancelled, "upload view torn down");
        cancelled
    }

    /// Hides the results view ("Analyze Another Document").
    pub fn dismiss_analysis(&mut self) {
        self.show_analysis = false;
    }

    /// Tracked files in selection order.
    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    /// Looks up one tracked file.
    pub fn file(&self, id: &FileId) -> Option<&UploadedFile> {
        self.files.iter().find(|entry| &entry.id == id)
    }

    /// Most recent analysis result, if any.
    pub fn analysis_result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Returns `true` while the results view should be shown.
    pub fn is_showing_analysis(&self) -> bool {
        self.show_analysis && self.result.is_some()
    }

    /// Number of armed timers across all files.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Earliest logical time at which something will happen.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.timers.next_due_ms()
    }

    /// Active configuration.
    pub fn config(&self) -> SimulationConfig {
        self.config
    }

    fn on_progress_tick(&mut self, id: &FileId, at_ms: u64, events: &mut Vec<UploadEvent>) {
        let Some(index) = self.index_of(id) else {
            self.cancel_tick(id);
            return;
        };

        let entry = &mut self.files[index];
        if entry.status != UploadStatus::Uploading {
            self.cancel_tick(id);
            return;
        }

        let next = entry
            .progress
            .saturating_add(self.config.progress_step)
            .min(PROGRESS_COMPLETE);
        if let Err(error) = raise_progress(entry, next, at_ms, events) {
            tracing::error!(file_id = %id, %error, "progress tick rejected");
            return;
        }
        tracing::debug!(file_id = %id, progress = next, "progress tick");

        if next >= PROGRESS_COMPLETE {
            if let Err(error) = change_status(entry, UploadStatus::Analyzing, at_ms, events) {
                tracing::error!(file_id = %id, %error, "status change rejected");
            }
            self.cancel_tick(id);
        }
    }

    fn on_upload_complete(&mut self, id: &FileId, at_ms: u64, events: &mut Vec<UploadEvent>) {
        self.cancel_tick(id);
        let Some(index) = self.index_of(id) else {
            return;
        };

        let entry = &mut self.files[index];
        let forced = raise_progress(entry, PROGRESS_COMPLETE, at_ms, events)
            .and_then(|()| change_status(entry, UploadStatus::Analyzing, at_ms, events));
        if let Err(error) = forced {
            tracing::error!(file_id = %id, %error, "upload completion rejected");
            return;
        }

        self.timers.schedule_once(
            id.clone(),
            at_ms,
            self.config.analysis_complete_after_ms,
            SimulationTimer::AnalysisComplete,
        );
    }

    fn on_analysis_complete(&mut self, id: &FileId, at_ms: u64, events: &mut Vec<UploadEvent>) {
        let Some(index) = self.index_of(id) else {
            return;
        };

        let outcome = self.provider.analyze(&self.files[index].file);
        let entry = &mut self.files[index];
        match outcome {
            Ok(result) => {
                if let Err(error) = change_status(entry, UploadStatus::Completed, at_ms, events) {
                    tracing::error!(file_id = %id, %error, "completion rejected");
                    return;
                }
                tracing::info!(
                    file_id = %id,
                    document_type = %result.document_type,
                    risk_level = %result.risk_level,
                    "analysis completed"
                );
                events.push(UploadEvent {
                    at_ms,
                    id: id.clone(),
                    kind: UploadEventKind::AnalysisReady {
                        document_type: result.document_type.clone(),
                    },
                });
                self.result = Some(result);
                self.show_analysis = true;
            }
            Err(error) => {
                tracing::warn!(file_id = %id, %error, "analysis failed");
                if let Err(status_error) =
                    change_status(entry, UploadStatus::Error, at_ms, events)
                {
                    tracing::error!(
                        file_id = %id,
                        error = %status_error,
                        "failure status rejected"
                    );
                    return;
                }
                events.push(UploadEvent {
                    at_ms,
                    id: id.clone(),
                    kind: UploadEventKind::AnalysisFailed {
                        reason: error.to_string(),
                    },
                });
            }
        }
    }

    fn index_of(&self, id: &FileId) -> Option<usize> {
        self.files.iter().position(|entry| &entry.id == id)
    }

    fn cancel_tick(&mut self, id: &FileId) {
        if let Some(timer) = self.tick_timers.remove(id) {
            self.timers.cancel(timer);
        }
    }

    fn next_file_id(&mut self) -> FileId {
        loop {
            let raw: String = (0..FILE_ID_LEN)
                .map(|_| {
                    let index = self.id_rng.random_range(0..FILE_ID_ALPHABET.len());
                    FILE_ID_ALPHABET[index] as char
                })
                .collect();
            let id = FileId::new(raw);
            if self.index_of(&id).is_none() {
                return id;
            }
        }
    }
}

fn raise_progress(
    entry: &mut UploadedFile,
    value: u8,
    at_ms: u64,
    events: &mut Vec<UploadEvent>,
) -> Result<(), CoreError> {
    if entry.progress == value {
        return Ok(());
    }
    entry.raise_progress(value)?;
    events.push(UploadEvent {
        at_ms,
        id: entry.id.clone(),
        kind: UploadEventKind::Progress(value),
    });
    Ok(())
}

fn change_status(
    entry: &mut UploadedFile,
    next: UploadStatus,
    at_ms: u64,
    events: &mut Vec<UploadEvent>,
) -> Result<(), CoreError> {
    let from = entry.status;
    entry.advance_status(next)?;
    if from != next {
        tracing::info!(
            file_id = %entry.id,
            from = from.label(),
            to = next.label(),
            "status changed"
        );
        events.push(UploadEvent {
            at_ms,
            id: entry.id.clone(),
            kind: UploadEventKind::StatusChanged { from, to: next },
        });
    }
    Ok(())
}

/// Upload validation and simulation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// Declared media type is not accepted.
    #[error("File type not supported. Please upload PDF, DOCX, DOC, TXT, or RTF files.")]
    UnsupportedType {
        /// Rejected media type.
        media_type: String,
    },
    /// Document exceeds the size ceiling.
    #[error("File size too large. Please upload files smaller than 10MB.")]
    TooLarge {
        /// Declared size.
        size_bytes: u64,
        /// Ceiling in effect.
        limit_bytes: u64,
    },
    /// Simulation timing constants are unusable.
    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),
    /// A simulation timer could not be armed.
    #[error("simulation timer error: {0}")]
    Timer(#[from] TimerError),
}
