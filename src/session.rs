// src/session.rs
//! One page session: the current file, the form, the last result and the
//! view they paint into.

use chrono::{DateTime, Utc};
use tracing::Instrument;
use uuid::Uuid;

use crate::app_log;
use crate::core::{download_url, AnalysisService};
use crate::error::ClientError;
use crate::form::{word_count_label, JobContext};
use crate::normalizer::{normalize, NormalizedResult};
use crate::render::{Renderer, Tab, UploadZone, View};
use crate::toast::ToastNotifier;
use crate::types::{AnalysisRequest, AnalysisResult, DownloadFormat, DownloadRequest, ResultKind};
use crate::upload::{UploadValidator, UploadedFile};

pub const SUCCESS_MESSAGE: &str = "Resume analyzed successfully!";

/// Which exit path a submission took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rendered,
    ServerError(String),
    Failed(String),
}

/// The most recently displayed result, kept so downloads can reuse it.
#[derive(Debug, Clone)]
pub struct CachedResult {
    pub result: AnalysisResult,
    pub normalized: NormalizedResult,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct Session {
    id: Uuid,
    file: Option<UploadedFile>,
    job: JobContext,
    cache: Option<CachedResult>,
    view: View,
    toasts: ToastNotifier,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            file: None,
            job: JobContext::default(),
            cache: None,
            view: View::default(),
            toasts: ToastNotifier::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn toasts(&self) -> &ToastNotifier {
        &self.toasts
    }

    pub fn file(&self) -> Option<&UploadedFile> {
        self.file.as_ref()
    }

    pub fn job(&self) -> &JobContext {
        &self.job
    }

    pub fn cached_result(&self) -> Option<&CachedResult> {
        self.cache.as_ref()
    }

    // ===== Upload =====

    /// File picker change (or click-to-browse). A rejected file leaves the
    /// current selection and the upload zone as they were.
    pub fn select_file(&mut self, file: UploadedFile) -> Result<(), ClientError> {
        if let Err(e) = UploadValidator::validate(&file) {
            self.toasts.error(e.message.clone());
            return Err(e.into());
        }

        app_log!(info, "Selected resume {} ({})", file.name, file.display_size());
        self.view.upload_zone = UploadZone::FileSummary {
            name: file.name.clone(),
            size_label: file.display_size(),
        };
        self.file = Some(file);
        self.refresh_readiness();
        Ok(())
    }

    /// Drag-and-drop onto the upload zone.
    pub fn drop_file(&mut self, file: UploadedFile) -> Result<(), ClientError> {
        app_log!(debug, "File dropped: {}", file.name);
        self.select_file(file)
    }

    pub fn remove_file(&mut self) {
        if let Some(file) = self.file.take() {
            app_log!(info, "Removed resume {}", file.name);
        }
        self.view.upload_zone = UploadZone::DropTarget;
        self.refresh_readiness();
    }

    // ===== Form =====

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.job.title = title.into();
        self.refresh_readiness();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.job.description = description.into();
        self.view.word_count = word_count_label(self.job.word_count());
        self.refresh_readiness();
    }

    pub fn form_ready(&self) -> bool {
        self.file.is_some() && self.job.is_complete()
    }

    fn refresh_readiness(&mut self) {
        self.view.submit_enabled = self.form_ready();
    }

    // ===== Tabs =====

    pub fn select_tab(&mut self, tab: Tab) {
        self.view.tabs.select(tab);
    }

    /// Select by the `data-tab` key; unknown keys change nothing.
    pub fn select_tab_id(&mut self, id: &str) -> bool {
        match Tab::from_id(id) {
            Some(tab) => {
                self.select_tab(tab);
                true
            }
            None => false,
        }
    }

    // ===== Analysis =====

    /// Send the current file and job details for analysis.
    ///
    /// Readiness is not re-checked here; only a missing file stops the
    /// request. The loading state is torn down on every path.
    pub async fn submit(
        &mut self,
        service: &dyn AnalysisService,
    ) -> Result<SubmitOutcome, ClientError> {
        let Some(file) = self.file.clone() else {
            let err = ClientError::FormIncomplete;
            self.toasts.error(err.to_string());
            return Err(err);
        };

        let request = AnalysisRequest {
            file,
            job_title: self.job.trimmed_title().to_string(),
            job_description: self.job.trimmed_description().to_string(),
        };

        self.enter_loading();
        let outcome = self.run_analysis(service, request).await;
        self.exit_loading();

        Ok(outcome)
    }

    async fn run_analysis(
        &mut self,
        service: &dyn AnalysisService,
        request: AnalysisRequest,
    ) -> SubmitOutcome {
        let span = tracing::info_span!("analysis", session = %self.id);
        let response = service.process(request).instrument(span).await;

        match response {
            Ok(result) => {
                if let Some(message) = result.error_message() {
                    app_log!(warn, "Analysis rejected by server: {}", message);
                    self.toasts.error(ClientError::Server(message.clone()).to_string());
                    return SubmitOutcome::ServerError(message);
                }

                self.show_results(result);
                self.toasts.success(SUCCESS_MESSAGE);
                SubmitOutcome::Rendered
            }
            Err(e) => {
                let message = format!("{:#}", e);
                app_log!(error, "Analysis request failed: {}", message);
                self.toasts
                    .error(ClientError::Transport(message.clone()).to_string());
                SubmitOutcome::Failed(message)
            }
        }
    }

    fn enter_loading(&mut self) {
        self.view.submit_visible = false;
        self.view.loading_visible = true;
        self.view.results_visible = false;
        self.view.results_scrolled_into_view = false;
    }

    fn exit_loading(&mut self) {
        self.view.submit_visible = true;
        self.view.loading_visible = false;
    }

    fn show_results(&mut self, result: AnalysisResult) {
        let normalized = normalize(&result);
        Renderer::paint(&mut self.view, &normalized);

        app_log!(
            info,
            "Analysis complete: score {} ({})",
            normalized.score.value,
            normalized.score.tier
        );

        self.cache = Some(CachedResult {
            result,
            normalized,
            analyzed_at: Utc::now(),
        });
        self.view.results_visible = true;
        self.view.results_scrolled_into_view = true;
    }

    /// Animate the score reveal for the cached result.
    pub async fn play_reveal<F>(&mut self, on_frame: F)
    where
        F: FnMut(&View),
    {
        let Some(target) = self.cache.as_ref().map(|c| c.normalized.score.value) else {
            return;
        };
        Renderer::play_reveal(&mut self.view, target, on_frame).await;
    }

    /// Skip the reveal and show the final values.
    pub fn settle_reveal(&mut self) {
        if let Some(target) = self.cache.as_ref().map(|c| c.normalized.score.value) {
            Renderer::settle(&mut self.view, target);
        }
    }

    // ===== Download =====

    /// Build the download for one of the cached texts.
    pub fn download_request(
        &self,
        base_url: &str,
        format: DownloadFormat,
        kind: ResultKind,
    ) -> Result<DownloadRequest, ClientError> {
        let cached = self.cache.as_ref().ok_or_else(|| {
            self.toasts.error(ClientError::NoResults.to_string());
            ClientError::NoResults
        })?;

        // The download route rejects an empty `text`.
        let text = match kind {
            ResultKind::Cleaned => cached.result.cleaned.as_deref(),
            ResultKind::Optimized => cached.result.rewritten.as_deref(),
            ResultKind::Final => cached.result.final_text.as_deref(),
        }
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| {
            let err = ClientError::EmptyResult(kind);
            self.toasts.error(err.to_string());
            err
        })?;

        download_url(base_url, format, kind, text)
            .map_err(|e| ClientError::Transport(format!("{:#}", e)))
    }
}
