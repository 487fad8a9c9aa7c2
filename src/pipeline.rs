// src/pipeline.rs
//! The sequential application pipeline: fetch the job posting, read the
//! resume, compose the prompt, call the model. No branching beyond error
//! short-circuiting, no retries, one in-flight request per run.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::error;

use crate::agents::{Supervisor, WorkflowReport};
use crate::config::AppConfig;
use crate::fetcher::{JobPostFetcher, JobPosting};
use crate::llm::{ChatClient, ChatMessage};
use crate::prompts;
use crate::resume::{read_resume, ResumeDocument};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRequest {
    pub job_url: String,
    /// Accepted for compatibility with older callers, never crawled.
    #[serde(default)]
    pub company_url: Option<String>,
    pub resume_path: String,
}

/// The pipeline's sole output: exactly one of `result` or `error`,
/// serializing to `{"result": ...}` or `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApplicationOutcome {
    Completed { result: String },
    Failed { error: String },
}

impl ApplicationOutcome {
    pub fn completed(result: impl Into<String>) -> Self {
        Self::Completed {
            result: result.into(),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Outcome of the agent workflow variant.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum WorkflowOutcome {
    Completed { result: WorkflowReport },
    Failed { error: String },
}

pub struct ApplicationPipeline {
    fetcher: JobPostFetcher,
    chat: ChatClient,
}

impl ApplicationPipeline {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            fetcher: JobPostFetcher::new(&config.crawler)?,
            chat: ChatClient::new(&config.llm)?,
        })
    }

    /// Run the full analysis pipeline.
    ///
    /// A missing resume file is the one precondition checked up front: it
    /// aborts with an error before any network activity, producing no
    /// outcome object. Every later failure is converted into a `Failed`
    /// outcome instead of propagating.
    pub async fn process_application(
        &self,
        request: &ApplicationRequest,
    ) -> Result<ApplicationOutcome> {
        let resume_path = self.require_resume(request)?;

        let (posting, resume) = match self.gather_inputs(request, resume_path).await {
            Ok(inputs) => inputs,
            Err(error) => return Ok(ApplicationOutcome::failed(error)),
        };

        let prompt =
            prompts::application_analysis_prompt(&posting.extracted_text, &resume.extracted_text);
        let messages = [
            ChatMessage::system(prompts::ANALYST_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ];

        match self.chat.complete(&messages).await {
            Ok(text) => Ok(ApplicationOutcome::completed(text)),
            Err(e) => {
                error!("Error during processing: {:#}", e);
                Ok(ApplicationOutcome::failed(format!("Processing error: {}", e)))
            }
        }
    }

    /// Run the analyzer/optimizer workflow over the same inputs.
    pub async fn run_workflow(&self, request: &ApplicationRequest) -> Result<WorkflowOutcome> {
        let resume_path = self.require_resume(request)?;

        let (posting, resume) = match self.gather_inputs(request, resume_path).await {
            Ok(inputs) => inputs,
            Err(error) => return Ok(WorkflowOutcome::Failed { error }),
        };

        let supervisor = Supervisor::new(self.chat.clone());
        match supervisor
            .run(&posting.extracted_text, &resume.extracted_text)
            .await
        {
            Ok(report) => Ok(WorkflowOutcome::Completed { result: report }),
            Err(e) => {
                error!("Error during processing: {:#}", e);
                Ok(WorkflowOutcome::Failed {
                    error: format!("Processing error: {}", e),
                })
            }
        }
    }

    fn require_resume<'a>(&self, request: &'a ApplicationRequest) -> Result<&'a Path> {
        let resume_path = Path::new(&request.resume_path);
        if !resume_path.exists() {
            anyhow::bail!("Resume file not found at {}", request.resume_path);
        }
        Ok(resume_path)
    }

    /// Fetch the job posting and read the resume. Fetch failures and empty
    /// extraction are already shaped into their outcome error strings here.
    async fn gather_inputs(
        &self,
        request: &ApplicationRequest,
        resume_path: &Path,
    ) -> Result<(JobPosting, ResumeDocument), String> {
        let posting = match self.fetcher.fetch(&request.job_url).await {
            Ok(posting) => posting,
            Err(e) => {
                error!("Crawler error details: {:#}", e);
                return Err(format!("Crawling error: {}", e));
            }
        };

        if posting.extracted_text.is_empty() {
            return Err("Could not extract job content".to_string());
        }

        let resume = read_resume(resume_path).await;

        Ok((posting, resume))
    }
}
