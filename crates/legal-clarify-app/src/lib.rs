#![warn(missing_docs)]
//! # legal-clarify-app
//!
//! ## Purpose
//! Orchestrates routing, the auth session, the upload page, and result
//! presentation for the `legal-clarify` shell.
//!
//! ## Responsibilities
//! - Own the application-root context: [`Router`], [`AuthSession`],
//!   notification sink, and analysis provider.
//! - Create the upload simulator when `/upload` becomes visible to a signed-in
//!   user and tear it down (cancelling its timers) when it stops being visible.
//! - Surface rejected files through a [`Notifier`].
//! - Load configuration from the environment.
//! - Run the whole pipeline headlessly for the CLI.
//!
//! ## Data flow
//! Navigation / sign-in -> [`AppShell::sync_page`] -> upload simulator
//! lifecycle. File selection -> [`AppShell::select_files`] -> simulator or
//! notifier. UI loop clock -> [`AppShell::tick`] -> simulator events ->
//! [`AppShell::analysis_view`].
//!
//! ## Ownership and lifetimes
//! The shell owns the simulator outright so dropping it drops every pending
//! timer. Router and notifier are shared through `Arc` with the session and
//! with callers that render.
//!
//! ## Error model
//! Subsystem failures are wrapped in [`AppError`].

use std::sync::{Arc, Mutex};

use legal_clarify_analysis::{
    AnalysisError, AnalysisProvider, AnalysisResult, AnalysisTransport, MockAnalysisProvider,
    RemoteAnalysisProvider,
};
use legal_clarify_auth::{AuthSession, Navigator, Route};
use legal_clarify_core::{DocumentFile, UploadStatus};
use legal_clarify_ui::{
    AnalysisView, DashboardDocument, DashboardStats, PageAccess, UploadRow, dashboard_stats,
    page_access, upload_rows,
};
use legal_clarify_upload::{
    SelectionOutcome, SimulationConfig, UploadError, UploadEvent, UploadSimulator,
};
use serde::Serialize;
use thiserror::Error;

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("LEGAL_CLARIFY_VERSION");

/// Environment variable naming a remote analysis endpoint.
pub const ENV_ANALYSIS_ENDPOINT: &str = "LEGAL_CLARIFY_ANALYSIS_ENDPOINT";

/// Environment variable holding a seed for the mock provider.
pub const ENV_RNG_SEED: &str = "LEGAL_CLARIFY_RNG_SEED";

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Runtime configuration of the shell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    /// HTTPS endpoint of a remote analysis service; mock analysis when unset.
    pub analysis_endpoint: Option<String>,
    /// Seed for the mock provider; OS entropy when unset.
    pub rng_seed: Option<u64>,
    /// Simulation timing.
    pub simulation: SimulationConfig,
}

impl AppConfig {
    /// Reads configuration from process environment.
    ///
    /// # Errors
    /// See [`AppConfig::from_lookup`].
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    /// Returns [`AppError::Config`] when the seed is not a `u64`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let rng_seed = read(ENV_RNG_SEED)
            .map(|raw| {
                raw.parse::<u64>()
                    .map_err(|error| AppError::Config(format!("{ENV_RNG_SEED}={raw}: {error}")))
            })
            .transpose()?;

        Ok(Self {
            analysis_endpoint: read(ENV_ANALYSIS_ENDPOINT),
            rng_seed,
            simulation: SimulationConfig::default(),
        })
    }
}

/// Selects the analysis provider for `config`.
///
/// # Errors
/// Returns [`AppError::Config`] when an endpoint is configured but no
/// transport is supplied, and [`AppError::Analysis`] when the endpoint is
/// rejected.
pub fn build_provider(
    config: &AppConfig,
    transport: Option<Arc<dyn AnalysisTransport>>,
) -> Result<Arc<dyn AnalysisProvider>, AppError> {
    let provider: Arc<dyn AnalysisProvider> = match (&config.analysis_endpoint, transport) {
        (Some(endpoint), Some(transport)) => {
            tracing::info!(endpoint = %endpoint, "using remote analysis provider");
            Arc::new(RemoteAnalysisProvider::new(endpoint.clone(), transport)?)
        }
        (Some(_), None) => {
            return Err(AppError::Config(format!(
                "{ENV_ANALYSIS_ENDPOINT} is set but no analysis transport is available"
            )));
        }
        (None, _) => {
            tracing::info!(seeded = config.rng_seed.is_some(), "using mock analysis provider");
            match config.rng_seed {
                Some(seed) => Arc::new(MockAnalysisProvider::with_seed(seed)),
                None => Arc::new(MockAnalysisProvider::new()),
            }
        }
    };
    Ok(provider)
}

/// In-memory router: current route plus full navigation history.
#[derive(Debug)]
pub struct Router {
    history: Mutex<Vec<Route>>,
}

impl Router {
    /// Creates a router positioned at `initial`.
    pub fn new(initial: Route) -> Self {
        Self {
            history: Mutex::new(vec![initial]),
        }
    }

    /// Current route.
    pub fn current(&self) -> Route {
        self.history
            .lock()
            .ok()
            .and_then(|history| history.last().cloned())
            .unwrap_or(Route::Home)
    }

    /// Every route visited, initial route first.
    pub fn history(&self) -> Vec<Route> {
        self.history
            .lock()
            .map(|history| history.clone())
            .unwrap_or_default()
    }
}

impl Navigator for Router {
    fn navigate(&self, route: Route) {
        tracing::debug!(path = %route, "navigate");
        if let Ok(mut history) = self.history.lock() {
            history.push(route);
        }
    }
}

/// Toast/notification facility.
pub trait Notifier: Send + Sync {
    /// Shows `message` to the user.
    fn notify(&self, message: &str);
}

/// Notifier that records messages and mirrors them to the log.
#[derive(Debug, Default)]
pub struct ToastLog {
    messages: Mutex<Vec<String>>,
}

impl ToastLog {
    /// Messages shown so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

impl Notifier for ToastLog {
    fn notify(&self, message: &str) {
        tracing::warn!(%message, "toast");
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

/// Application root.
pub struct AppShell {
    config: AppConfig,
    router: Arc<Router>,
    session: AuthSession,
    notifier: Arc<dyn Notifier>,
    provider: Arc<dyn AnalysisProvider>,
    upload: Option<UploadSimulator>,
    documents: Vec<DashboardDocument>,
}

impl AppShell {
    /// Creates a signed-out shell on the home page.
    pub fn new(
        config: AppConfig,
        provider: Arc<dyn AnalysisProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let router = Arc::new(Router::new(Route::Home));
        let session = AuthSession::init(router.clone());
        Self {
            config,
            router,
            session,
            notifier,
            provider,
            upload: None,
            documents: Vec::new(),
        }
    }

    /// Shared router handle.
    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    /// Current route.
    pub fn current_route(&self) -> Route {
        self.router.current()
    }

    /// Returns `true` while signed in.
    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    /// Access decision for the current route.
    pub fn page_access(&self) -> PageAccess {
        page_access(&self.current_route(), self.session.is_logged_in())
    }

    /// Navigates to `route` and applies page lifecycle rules.
    ///
    /// # Errors
    /// Propagates simulator construction failures.
    pub fn navigate(&mut self, route: Route) -> Result<(), AppError> {
        self.router.navigate(route);
        self.sync_page()
    }

    /// Signs in (navigating to the dashboard).
    ///
    /// # Errors
    /// Propagates simulator construction failures.
    pub fn login(&mut self) -> Result<(), AppError> {
        self.session.login();
        self.sync_page()
    }

    /// Signs out (navigating home).
    ///
    /// # Errors
    /// Propagates simulator construction failures.
    pub fn logout(&mut self) -> Result<(), AppError> {
        self.session.logout();
        self.sync_page()
    }

    /// Applies redirects and creates or tears down the upload simulator to
    /// match the current route and session.
    ///
    /// # Errors
    /// Returns [`AppError::Upload`] if the simulator cannot be built.
    pub fn sync_page(&mut self) -> Result<(), AppError> {
        if let PageAccess::RedirectTo(target) = self.page_access() {
            self.router.navigate(target);
        }

        let upload_visible =
            self.current_route() == Route::Upload && self.page_access() == PageAccess::Render;

        match (upload_visible, self.upload.is_some()) {
            (true, false) => {
                self.upload = Some(UploadSimulator::new(
                    self.config.simulation,
                    self.provider.clone(),
                )?);
                tracing::debug!("upload view mounted");
            }
            (false, true) => {
                if let Some(mut simulator) = self.upload.take() {
                    simulator.teardown();
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Offers selected files to the upload page. Rejections are shown through
    /// the notifier and listed in the returned outcomes.
    ///
    /// # Errors
    /// Returns [`AppError::UploadUnavailable`] when the upload page is not
    /// mounted.
    pub fn select_files<I>(
        &mut self,
        files: I,
        now_ms: u64,
    ) -> Result<Vec<SelectionOutcome>, AppError>
    where
        I: IntoIterator<Item = DocumentFile>,
    {
        let simulator = self.upload.as_mut().ok_or(AppError::UploadUnavailable)?;
        let outcomes = simulator.select_files(files, now_ms);
        for outcome in &outcomes {
            if let SelectionOutcome::Rejected { error, .. } = outcome {
                self.notifier.notify(&error.to_string());
            }
        }
        Ok(outcomes)
    }

    /// Advances the upload page clock. Returns no events when it is not
    /// mounted.
    pub fn tick(&mut self, now_ms: u64) -> Vec<UploadEvent> {
        self.upload
            .as_mut()
            .map(|simulator| simulator.advance_to(now_ms))
            .unwrap_or_default()
    }

    /// Mounted upload simulator, if any.
    pub fn upload(&self) -> Option<&UploadSimulator> {
        self.upload.as_ref()
    }

    /// Rows of the "Processing Files" list.
    pub fn upload_rows(&self) -> Vec<UploadRow> {
        self.upload
            .as_ref()
            .map(|simulator| upload_rows(simulator.files()))
            .unwrap_or_default()
    }

    /// Result view when the upload page is showing an analysis.
    pub fn analysis_view(&self) -> Option<AnalysisView> {
        let simulator = self.upload.as_ref()?;
        if !simulator.is_showing_analysis() {
            return None;
        }
        simulator.analysis_result().cloned().map(AnalysisView::new)
    }

    /// "Analyze Another Document".
    pub fn analyze_another(&mut self) {
        if let Some(simulator) = self.upload.as_mut() {
            simulator.dismiss_analysis();
        }
    }

    /// Dashboard stat cards. The document list starts empty.
    pub fn dashboard_stats(&self) -> DashboardStats {
        dashboard_stats(&self.documents)
    }

    /// Tears down the upload page and the session.
    pub fn shutdown(&mut self) {
        if let Some(mut simulator) = self.upload.take() {
            simulator.teardown();
        }
        self.session.teardown();
        tracing::info!("shell shut down");
    }
}

/// Final state of one file after a headless run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    /// File name.
    pub name: String,
    /// Final status label.
    pub status: String,
    /// Final progress.
    pub progress: u8,
}

/// Outcome of [`run_headless_simulation`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    /// App version.
    pub version: String,
    /// Tracked files in selection order.
    pub files: Vec<FileReport>,
    /// Rejection messages, one per refused file.
    pub rejected: Vec<String>,
    /// Logical time at which the last timer fired.
    pub finished_at_ms: u64,
    /// Latest analysis result.
    pub analysis: Option<AnalysisResult>,
}

impl SimulationReport {
    /// Returns `true` when every tracked file reached `Completed`.
    pub fn all_completed(&self) -> bool {
        self.files
            .iter()
            .all(|file| file.status == UploadStatus::Completed.label())
    }
}

/// Signs in, opens the upload page, selects `files` at time 0, and runs the
/// logical clock until no timers remain.
///
/// # Errors
/// Propagates provider selection and shell failures.
pub fn run_headless_simulation(
    config: AppConfig,
    files: Vec<DocumentFile>,
    transport: Option<Arc<dyn AnalysisTransport>>,
) -> Result<SimulationReport, AppError> {
    let provider = build_provider(&config, transport)?;
    let toasts = Arc::new(ToastLog::default());
    let mut shell = AppShell::new(config, provider, toasts.clone());

    shell.login()?;
    shell.navigate(Route::Upload)?;
    shell.select_files(files, 0)?;

    let mut finished_at_ms = 0;
    while let Some(due) = shell.upload().and_then(UploadSimulator::next_due_ms) {
        shell.tick(due);
        finished_at_ms = due;
    }

    let simulator = shell.upload().ok_or(AppError::UploadUnavailable)?;
    let report = SimulationReport {
        version: app_version().to_string(),
        files: simulator
            .files()
            .iter()
            .map(|entry| FileReport {
                name: entry.file.name.clone(),
                status: entry.status.label().to_string(),
                progress: entry.progress,
            })
            .collect(),
        rejected: toasts.messages(),
        finished_at_ms,
        analysis: simulator.analysis_result().cloned(),
    };
    shell.shutdown();
    Ok(report)
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Upload subsystem error.
    #[error("upload error: {0}")]
    Upload(#[from] UploadError),
    /// Analysis provider error.
    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),
    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),
    /// File selection outside a mounted upload page.
    #[error("upload page is not active")]
    UploadUnavailable,
}
