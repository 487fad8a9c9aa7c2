// src/web/mod.rs
pub mod handlers;
pub mod types;

pub use types::*;

use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Request, Response, State};
use tracing::info;

use crate::config::AppConfig;
use crate::pipeline::ApplicationRequest;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[post("/analyze-application", data = "<request>")]
pub async fn analyze_application(
    request: Json<StandardRequest<ApplicationRequest>>,
    config: &State<AppConfig>,
) -> Result<Json<TextResponse>, Json<StandardErrorResponse>> {
    handlers::analyze_application_handler(request, config).await
}

#[post("/optimize-application", data = "<request>")]
pub async fn optimize_application(
    request: Json<StandardRequest<ApplicationRequest>>,
    config: &State<AppConfig>,
) -> Result<Json<DataResponse<crate::agents::WorkflowReport>>, Json<StandardErrorResponse>> {
    handlers::optimize_application_handler(request, config).await
}

#[get("/health")]
pub async fn health() -> Json<TextResponse> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options_route() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
        None,
    ))
}

// Main server start function
pub async fn start_web_server(config: AppConfig, port: u16) -> Result<()> {
    info!("Starting job application assistant API server");
    info!("Model: {} via {}", config.llm.model, config.llm.api_url);
    info!("Server: http://0.0.0.0:{}", port);

    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    let _rocket = rocket::custom(figment)
        .attach(Cors)
        .manage(config)
        .register("/api", catchers![bad_request, internal_error])
        .mount(
            "/api",
            routes![
                analyze_application,
                optimize_application,
                health,
                options_route,
            ],
        )
        .launch()
        .await?;

    Ok(())
}
