// src/agents.rs
//! The two-agent re-expression of the analysis pipeline. Only two
//! operations ever exist, so the "tool" abstraction is a closed enum
//! dispatched by an explicit sequential supervisor.

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::llm::{ChatClient, ChatMessage};
use crate::prompts;

/// The closed set of operations an agent can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    AnalyzeJobRequirements,
    OptimizeResume,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::AnalyzeJobRequirements => "analyze_job_requirements",
            ToolKind::OptimizeResume => "optimize_resume",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Agent {
    pub name: &'static str,
    pub system_prompt: &'static str,
    pub tool: ToolKind,
}

pub fn analyzer_agent() -> Agent {
    Agent {
        name: "analyzer",
        system_prompt: "You are an expert analyst. Analyze job requirements.",
        tool: ToolKind::AnalyzeJobRequirements,
    }
}

pub fn optimizer_agent() -> Agent {
    Agent {
        name: "optimizer",
        system_prompt: "You are a resume optimization expert. Suggest improvements based on job requirements.",
        tool: ToolKind::OptimizeResume,
    }
}

/// Workflow role description, carried in each report for transparency.
/// The actual call order is fixed in `Supervisor::run`.
pub const SUPERVISOR_INSTRUCTIONS: &str = "You are a team supervisor managing a resume optimization workflow.\n\
1. Use analyzer to analyze job requirements\n\
2. Use optimizer to suggest resume improvements\n\
Coordinate the agents to optimize resumes effectively.";

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowStep {
    pub agent: String,
    pub tool: String,
    pub output: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowReport {
    pub instructions: String,
    pub steps: Vec<WorkflowStep>,
    pub summary: String,
}

/// Runs the registered agents in their fixed order, feeding the analyzer's
/// requirement summary into the optimizer.
pub struct Supervisor {
    chat: ChatClient,
    agents: Vec<Agent>,
}

impl Supervisor {
    pub fn new(chat: ChatClient) -> Self {
        Self {
            chat,
            agents: vec![analyzer_agent(), optimizer_agent()],
        }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub async fn run(&self, job_text: &str, resume_text: &str) -> Result<WorkflowReport> {
        let mut steps = Vec::new();
        let mut requirements = String::new();
        let mut summary = String::new();

        for agent in &self.agents {
            let prompt = match agent.tool {
                ToolKind::AnalyzeJobRequirements => prompts::job_requirements_prompt(job_text),
                ToolKind::OptimizeResume => {
                    prompts::resume_optimization_prompt(resume_text, &requirements)
                }
            };

            let output = self.invoke(agent, prompt).await?;

            match agent.tool {
                ToolKind::AnalyzeJobRequirements => requirements = output.clone(),
                ToolKind::OptimizeResume => summary = output.clone(),
            }

            steps.push(WorkflowStep {
                agent: agent.name.to_string(),
                tool: agent.tool.name().to_string(),
                output,
            });
        }

        Ok(WorkflowReport {
            instructions: SUPERVISOR_INSTRUCTIONS.to_string(),
            steps,
            summary,
        })
    }

    async fn invoke(&self, agent: &Agent, prompt: String) -> Result<String> {
        info!(
            "Supervisor dispatching tool '{}' to agent '{}'",
            agent.tool.name(),
            agent.name
        );
        let messages = [
            ChatMessage::system(agent.system_prompt),
            ChatMessage::user(prompt),
        ];
        self.chat.complete(&messages).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LlmConfig;

    #[test]
    fn test_tool_names() {
        assert_eq!(
            ToolKind::AnalyzeJobRequirements.name(),
            "analyze_job_requirements"
        );
        assert_eq!(ToolKind::OptimizeResume.name(), "optimize_resume");
    }

    #[test]
    fn test_supervisor_registers_analyzer_before_optimizer() {
        let chat = ChatClient::new(&LlmConfig::default()).unwrap();
        let supervisor = Supervisor::new(chat);
        let agents = supervisor.agents();

        assert_eq!(agents.len(), 2);
        assert_eq!(agents[0].name, "analyzer");
        assert_eq!(agents[0].tool, ToolKind::AnalyzeJobRequirements);
        assert_eq!(agents[1].name, "optimizer");
        assert_eq!(agents[1].tool, ToolKind::OptimizeResume);
    }

    #[test]
    fn test_supervisor_instructions_describe_call_order() {
        assert!(SUPERVISOR_INSTRUCTIONS.contains("1. Use analyzer"));
        assert!(SUPERVISOR_INSTRUCTIONS.contains("2. Use optimizer"));
    }
}
