// src/prompts.rs
//! Prompt templates. All functions here are pure: the same inputs always
//! produce the same string, and empty inputs are legal.

pub const ANALYST_SYSTEM_PROMPT: &str = "You are a professional resume optimization assistant.";

/// The single-shot application analysis request: match rating, suggested
/// improvements, skills to emphasize.
pub fn application_analysis_prompt(job_text: &str, resume_text: &str) -> String {
    format!(
        r#"Please analyze this resume for the following job posting:

JOB POSTING:
{job_text}

RESUME:
{resume_text}

Please provide:
1. Analysis of match between resume and job requirements
2. Suggested improvements to the resume
3. Key skills to emphasize"#
    )
}

/// Requirement extraction request used by the analyzer agent.
pub fn job_requirements_prompt(job_content: &str) -> String {
    format!(
        r#"Analyze the following job posting and extract key requirements including:
- Required technical skills
- Required experience
- Education requirements
- Soft skills
- Any other important qualifications

Job posting:
{job_content}"#
    )
}

/// Resume optimization request used by the optimizer agent, fed with the
/// analyzer's requirement summary.
pub fn resume_optimization_prompt(resume_text: &str, requirements: &str) -> String {
    format!(
        r#"Review the following resume and provide specific optimization suggestions based on the job requirements:

Job Requirements:
{requirements}

Current Resume:
{resume_text}

Please provide:
1. Specific content improvements
2. Skills to emphasize
3. Experience alignments
4. Format suggestions
5. Keywords to include"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_prompt_is_deterministic() {
        let a = application_analysis_prompt("job", "resume");
        let b = application_analysis_prompt("job", "resume");
        assert_eq!(a, b);
    }

    #[test]
    fn test_analysis_prompt_embeds_inputs_verbatim() {
        let job = "Senior Engineer, 5 years Python";
        let resume = "3 years Python, 2 years Go";
        let prompt = application_analysis_prompt(job, resume);

        assert!(prompt.contains(job));
        assert!(prompt.contains(resume));
        assert!(prompt.contains("1. Analysis of match between resume and job requirements"));
        assert!(prompt.contains("2. Suggested improvements to the resume"));
        assert!(prompt.contains("3. Key skills to emphasize"));
    }

    #[test]
    fn test_analysis_prompt_accepts_empty_inputs() {
        let prompt = application_analysis_prompt("", "");
        assert!(prompt.contains("JOB POSTING:"));
        assert!(prompt.contains("RESUME:"));
    }

    #[test]
    fn test_requirements_prompt_embeds_job_content() {
        let prompt = job_requirements_prompt("We need a Rust developer");
        assert!(prompt.contains("We need a Rust developer"));
        assert!(prompt.contains("Required technical skills"));
    }

    #[test]
    fn test_optimization_prompt_embeds_both_inputs() {
        let prompt = resume_optimization_prompt("my resume", "the requirements");
        assert!(prompt.contains("my resume"));
        assert!(prompt.contains("the requirements"));
        assert!(prompt.contains("5. Keywords to include"));
    }
}
