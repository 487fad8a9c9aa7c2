// src/cli.rs
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::error;

use crate::config::AppConfig;
use crate::pipeline::{ApplicationOutcome, ApplicationPipeline, ApplicationRequest};
use crate::utils;
use crate::web::start_web_server;

#[derive(Parser)]
#[command(name = "jobfit")]
#[command(about = "Analyze and optimize job applications with an LLM")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze how well a resume matches a job posting
    Analyze {
        /// URL of the job posting to fetch
        #[arg(long)]
        job_url: String,
        /// Path to the resume PDF
        #[arg(long)]
        resume: PathBuf,
        /// Company page URL, accepted but currently not crawled
        #[arg(long)]
        company_url: Option<String>,
        /// Write the analysis report into the configured output directory
        #[arg(long)]
        save_report: bool,
        /// Override the report output directory, implies --save-report
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Run the analyzer/optimizer agent workflow
    Workflow {
        /// URL of the job posting to fetch
        #[arg(long)]
        job_url: String,
        /// Path to the resume PDF
        #[arg(long)]
        resume: PathBuf,
    },
    /// Start the HTTP API server
    Serve {
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
}

pub async fn handle_command(cli: Cli, config: AppConfig) -> Result<()> {
    match cli.command {
        Command::Analyze {
            job_url,
            resume,
            company_url,
            save_report,
            output_dir,
        } => {
            let request = ApplicationRequest {
                job_url,
                company_url,
                resume_path: resume.display().to_string(),
            };

            let pipeline = ApplicationPipeline::new(&config)?;
            let outcome = match pipeline.process_application(&request).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    // The resume precondition failed: no outcome to print.
                    error!("Application analysis aborted: {}", e);
                    println!("❌ {}", e);
                    std::process::exit(1);
                }
            };

            println!("{}", serde_json::to_string_pretty(&outcome)?);

            if let ApplicationOutcome::Completed { result } = &outcome {
                if save_report || output_dir.is_some() {
                    let dir = output_dir.unwrap_or_else(|| config.output_path.clone());
                    let report_path = utils::report_file_path(&dir, "analysis");
                    let report = format!(
                        "# Application analysis\n\nJob posting: {}\nResume: {}\n\n{}\n",
                        request.job_url, request.resume_path, result
                    );
                    utils::write_file_content(&report_path, &report).await?;
                    println!("✓ Report written to {}", report_path.display());
                }
            }

            if !outcome.is_success() {
                std::process::exit(1);
            }
            Ok(())
        }

        Command::Workflow { job_url, resume } => {
            let request = ApplicationRequest {
                job_url,
                company_url: None,
                resume_path: resume.display().to_string(),
            };

            let pipeline = ApplicationPipeline::new(&config)?;
            let outcome = match pipeline.run_workflow(&request).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("Optimization workflow aborted: {}", e);
                    println!("❌ {}", e);
                    std::process::exit(1);
                }
            };

            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(())
        }

        Command::Serve { port } => start_web_server(config, port).await,
    }
}
