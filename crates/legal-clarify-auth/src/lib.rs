#![warn(missing_docs)]
//! # legal-clarify-auth
//!
//! ## Purpose
//! Holds the signed-in flag of the application shell and performs the
//! navigation that accompanies sign-in and sign-out.
//!
//! ## Responsibilities
//! - Name the navigable pages ([`Route`]) and map them to and from paths.
//! - Provide an explicitly passed session context ([`AuthSession`]) with an
//!   init/teardown lifecycle owned by the application root.
//! - Fire exactly one navigation per [`AuthSession::login`] or
//!   [`AuthSession::logout`] call through the injected [`Navigator`].
//!
//! ## Data flow
//! Login/signup page -> [`AuthSession::login`] -> flag set -> navigator moves
//! to `/dashboard`. Layout sign-out -> [`AuthSession::logout`] -> flag cleared
//! -> navigator moves to `/`.
//!
//! ## Ownership and lifetimes
//! The session shares its navigator through `Arc` so the router stays owned by
//! the application root.
//!
//! ## Error model
//! Sign-in is unconditional; there are no credentials to reject.
//!
//! ## Security and privacy notes
//! Nothing is persisted. The session carries no identity, token, or expiry.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use legal_clarify_auth::{AuthSession, Navigator, Route};
//!
//! #[derive(Default)]
//! struct Recorder(Mutex<Vec<Route>>);
//!
//! impl Navigator for Recorder {
//!     fn navigate(&self, route: Route) {
//!         self.0.lock().unwrap().push(route);
//!     }
//! }
//!
//! let recorder = Arc::new(Recorder::default());
//! let mut session = AuthSession::init(recorder.clone());
//! session.login();
//! assert!(session.is_logged_in());
//! assert_eq!(*recorder.0.lock().unwrap(), vec![Route::Dashboard]);
//! ```

use std::fmt;
use std::sync::Arc;

/// Navigable pages of the application shell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Marketing home page (`/`).
    Home,
    /// Sign-in form (`/login`).
    Login,
    /// Account creation form (`/signup`).
    Signup,
    /// Features placeholder (`/features`).
    Features,
    /// About placeholder (`/about`).
    About,
    /// Signed-in dashboard (`/dashboard`).
    Dashboard,
    /// Document upload and analysis (`/upload`).
    Upload,
    /// Any unknown path.
    NotFound(String),
}

impl Route {
    /// Resolves a path; unknown paths map to [`Route::NotFound`].
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "" => Route::Home,
            "/login" => Route::Login,
            "/signup" => Route::Signup,
            "/features" => Route::Features,
            "/about" => Route::About,
            "/dashboard" => Route::Dashboard,
            "/upload" => Route::Upload,
            other => Route::NotFound(other.to_string()),
        }
    }

    /// Canonical path of this route.
    pub fn path(&self) -> &str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Features => "/features",
            Route::About => "/about",
            Route::Dashboard => "/dashboard",
            Route::Upload => "/upload",
            Route::NotFound(path) => path,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Programmatic navigation facility supplied by the router.
pub trait Navigator: Send + Sync {
    /// Moves the shell to `route`.
    fn navigate(&self, route: Route);
}

/// Signed-in state of the shell.
pub struct AuthSession {
    logged_in: bool,
    navigator: Arc<dyn Navigator>,
}

impl AuthSession {
    /// Creates a signed-out session bound to `navigator`.
    pub fn init(navigator: Arc<dyn Navigator>) -> Self {
        tracing::debug!("auth session initialized");
        Self {
            logged_in: false,
            navigator,
        }
    }

    /// Returns `true` while signed in.
    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Signs in and navigates to the dashboard.
    pub fn login(&mut self) {
        self.logged_in = true;
        tracing::info!("signed in");
        self.navigator.navigate(Route::Dashboard);
    }

    /// Signs out and navigates to the home page.
    pub fn logout(&mut self) {
        self.logged_in = false;
        tracing::info!("signed out");
        self.navigator.navigate(Route::Home);
    }

    /// Resets to signed out without navigating. Called when the shell shuts
    /// down.
    pub fn teardown(&mut self) {
        self.logged_in = false;
        tracing::debug!("auth session torn down");
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("logged_in", &self.logged_in)
            .finish_non_exhaustive()
    }
}
