//! Headless client for the ATS resume-optimization service.
//!
//! The page controllers (upload, form, analysis, toast, rendering) live on a
//! single owned [`session::Session`]; the HTTP collaborator sits behind the
//! [`core::AnalysisService`] trait.

pub mod cli;
pub mod core;
pub mod error;
pub mod form;
pub mod normalizer;
pub mod render;
pub mod session;
pub mod toast;
pub mod types;
pub mod upload;
pub mod utils;

pub use error::ClientError;
pub use session::{Session, SubmitOutcome};

/// Level-dispatching logging shorthand used across the crate.
///
/// `app_log!(info, "Loaded {}", path)` expands to `tracing::info!(...)`.
#[macro_export]
macro_rules! app_log {
    ($level:ident, $($arg:tt)+) => {
        ::tracing::$level!($($arg)+)
    };
}
