// src/web/handlers.rs
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::pipeline::{
    ApplicationOutcome, ApplicationPipeline, ApplicationRequest, WorkflowOutcome,
};
use crate::web::types::{
    DataResponse, StandardErrorResponse, StandardRequest, TextResponse, WithConversationId,
};

pub async fn analyze_application_handler(
    request: Json<StandardRequest<ApplicationRequest>>,
    config: &State<AppConfig>,
) -> Result<Json<TextResponse>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    let request_id = Uuid::new_v4();

    info!(
        "[{}] Analyzing application for job: {}",
        request_id, request.data.job_url
    );

    let pipeline = build_pipeline(config, conversation_id.clone())?;

    let outcome = match pipeline.process_application(&request.data).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("[{}] Application analysis aborted: {}", request_id, e);
            return Err(Json(StandardErrorResponse::new(
                e.to_string(),
                "RESUME_ERROR".to_string(),
                vec![
                    "Check the resume path on the server".to_string(),
                    "Upload the resume before requesting analysis".to_string(),
                ],
                conversation_id,
            )));
        }
    };

    match outcome {
        ApplicationOutcome::Completed { result } => {
            info!("[{}] Application analysis completed", request_id);
            Ok(Json(TextResponse::success(result, conversation_id)))
        }
        ApplicationOutcome::Failed { error } => {
            error!("[{}] Application analysis failed: {}", request_id, error);
            let (error_code, suggestions) = categorize_error(&error);
            Err(Json(StandardErrorResponse::new(
                error,
                error_code,
                suggestions,
                conversation_id,
            )))
        }
    }
}

pub async fn optimize_application_handler(
    request: Json<StandardRequest<ApplicationRequest>>,
    config: &State<AppConfig>,
) -> Result<Json<DataResponse<crate::agents::WorkflowReport>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    let request_id = Uuid::new_v4();

    info!(
        "[{}] Running optimization workflow for job: {}",
        request_id, request.data.job_url
    );

    let pipeline = build_pipeline(config, conversation_id.clone())?;

    let outcome = match pipeline.run_workflow(&request.data).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("[{}] Optimization workflow aborted: {}", request_id, e);
            return Err(Json(StandardErrorResponse::new(
                e.to_string(),
                "RESUME_ERROR".to_string(),
                vec!["Check the resume path on the server".to_string()],
                conversation_id,
            )));
        }
    };

    match outcome {
        WorkflowOutcome::Completed { result } => {
            info!("[{}] Optimization workflow completed", request_id);
            Ok(Json(DataResponse::success(
                "Resume optimization workflow completed".to_string(),
                result,
                conversation_id,
            )))
        }
        WorkflowOutcome::Failed { error } => {
            error!("[{}] Optimization workflow failed: {}", request_id, error);
            let (error_code, suggestions) = categorize_error(&error);
            Err(Json(StandardErrorResponse::new(
                error,
                error_code,
                suggestions,
                conversation_id,
            )))
        }
    }
}

pub async fn health_handler() -> Json<TextResponse> {
    Json(TextResponse::success(
        "Job application assistant API is running".to_string(),
        None,
    ))
}

fn build_pipeline(
    config: &State<AppConfig>,
    conversation_id: Option<String>,
) -> Result<ApplicationPipeline, Json<StandardErrorResponse>> {
    ApplicationPipeline::new(config).map_err(|e| {
        error!("Failed to initialize pipeline: {}", e);
        Json(StandardErrorResponse::new(
            "Service configuration error".to_string(),
            "CONFIG_ERROR".to_string(),
            vec!["Contact system administrator".to_string()],
            conversation_id,
        ))
    })
}

fn categorize_error(error_msg: &str) -> (String, Vec<String>) {
    if error_msg.contains("Crawling error") || error_msg.contains("extract job content") {
        (
            "SCRAPING_ERROR".to_string(),
            vec![
                "Verify the job posting URL is accessible".to_string(),
                "The job post may be behind authentication or no longer available".to_string(),
                "Try a different job posting URL".to_string(),
            ],
        )
    } else if error_msg.contains("Processing error") {
        (
            "LLM_ERROR".to_string(),
            vec![
                "The analysis service is temporarily unavailable".to_string(),
                "Try again in a few moments".to_string(),
            ],
        )
    } else if error_msg.contains("Resume file not found") {
        (
            "RESUME_ERROR".to_string(),
            vec!["Check the resume path on the server".to_string()],
        )
    } else {
        (
            "ANALYSIS_ERROR".to_string(),
            vec![
                "Try again in a few moments".to_string(),
                "Contact support if the problem persists".to_string(),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_crawl_errors() {
        let (code, suggestions) = categorize_error("Crawling error: timeout");
        assert_eq!(code, "SCRAPING_ERROR");
        assert!(!suggestions.is_empty());

        let (code, _) = categorize_error("Could not extract job content");
        assert_eq!(code, "SCRAPING_ERROR");
    }

    #[test]
    fn test_categorize_processing_errors() {
        let (code, _) = categorize_error("Processing error: 503 Service Unavailable");
        assert_eq!(code, "LLM_ERROR");
    }

    #[test]
    fn test_categorize_unknown_errors() {
        let (code, _) = categorize_error("something else went wrong");
        assert_eq!(code, "ANALYSIS_ERROR");
    }
}
