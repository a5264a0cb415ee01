// src/core/service_client.rs
//! HTTP client for the resume-optimization backend

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use std::time::Duration;

use crate::app_log;
use crate::types::{
    download::download_file_name, AnalysisRequest, AnalysisResult, DownloadFormat,
    DownloadRequest, ResultKind,
};
use crate::utils::guess_content_type;

const PROCESS_ENDPOINT: &str = "/process";
const DOWNLOAD_ENDPOINT: &str = "/download";

/// The analysis backend as seen by the orchestrator.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// `POST /process`. `Err` means the exchange itself failed (network
    /// error or a body that is not JSON); a server-reported `error` field
    /// comes back inside `Ok`.
    async fn process(&self, request: AnalysisRequest) -> Result<AnalysisResult>;
}

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Create new service client. `timeout` is `None` unless configured:
    /// the page never timed out a running analysis.
    pub fn new(base_url: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a download and return its bytes
    pub async fn download(&self, request: &DownloadRequest) -> Result<Vec<u8>> {
        app_log!(info, "Downloading {}", request.file_name);

        let response = self
            .client
            .get(request.url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to GET {}", request.file_name))?;

        let status = response.status();
        if status.is_success() {
            let bytes = response
                .bytes()
                .await
                .context("Failed to read download body")?;
            Ok(bytes.to_vec())
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<AnalysisResult>(&error_text)
                .ok()
                .and_then(|r| r.error_message())
                .unwrap_or(error_text);

            app_log!(error, "Download failed with status {}: {}", status, message);
            anyhow::bail!("Download failed with status {}: {}", status, message)
        }
    }

    fn build_form(request: AnalysisRequest) -> Result<Form> {
        let AnalysisRequest {
            file,
            job_title,
            job_description,
        } = request;

        let mime = if file.mime.is_empty() {
            guess_content_type(&file.name).to_string()
        } else {
            file.mime
        };

        let part = Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str(&mime)
            .context("Failed to create multipart")?;

        Ok(Form::new()
            .part("resume", part)
            .text("job_title", job_title)
            .text("job_description", job_description))
    }
}

#[async_trait]
impl AnalysisService for ServiceClient {
    async fn process(&self, request: AnalysisRequest) -> Result<AnalysisResult> {
        let url = format!("{}{}", self.base_url, PROCESS_ENDPOINT);
        let file_name = request.file.name.clone();
        let form = Self::build_form(request)?;

        app_log!(info, "Calling analysis service: {} ({})", url, file_name);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .context("HTTP request failed")?;

        let status = response.status();
        app_log!(trace, "Response status: {}", status);

        // Error replies carry a JSON `error` body too, so parse regardless of status.
        let response_text = response
            .text()
            .await
            .context("Failed to read response text")?;

        app_log!(debug, "Raw analysis response: {}", response_text);

        let body: serde_json::Value = serde_json::from_str(&response_text).with_context(|| {
            format!(
                "Failed to parse analysis response (status {}): {}",
                status, response_text
            )
        })?;

        Ok(AnalysisResult::from_json(body))
    }
}

/// `{base}/download/{format}/{type}?text=...` with the text percent-encoded.
pub fn download_url(
    base_url: &str,
    format: DownloadFormat,
    kind: ResultKind,
    text: &str,
) -> Result<DownloadRequest> {
    let raw = format!(
        "{}{}/{}/{}",
        base_url.trim_end_matches('/'),
        DOWNLOAD_ENDPOINT,
        format,
        kind
    );
    let mut url = Url::parse(&raw).with_context(|| format!("Invalid service URL: {}", raw))?;

    url.query_pairs_mut().append_pair("text", text);
    // Form encoding writes spaces as '+'; a literal '+' is already %2B.
    if let Some(query) = url.query().map(|q| q.replace('+', "%20")) {
        url.set_query(Some(&query));
    }

    Ok(DownloadRequest {
        url,
        file_name: download_file_name(format, kind),
    })
}
