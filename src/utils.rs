// src/utils.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Build a timestamped report file path inside `base`.
pub fn report_file_path(base: &Path, kind: &str) -> PathBuf {
    base.join(format!(
        "{}_{}.md",
        kind,
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    ))
}

/// Ensure directory exists
pub async fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        tokio::fs::create_dir_all(path)
            .await
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Write file content with proper error context
pub async fn write_file_content(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent).await?;
    }

    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_file_path_shape() {
        let path = report_file_path(Path::new("out"), "analysis");
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("analysis_"));
        assert!(name.ends_with(".md"));
        assert_eq!(path.parent().unwrap(), Path::new("out"));
    }

    #[tokio::test]
    async fn test_write_file_content_creates_parent() {
        let dir = std::env::temp_dir().join("jobfit_utils_test");
        let path = dir.join("nested").join("report.md");

        write_file_content(&path, "content").await.unwrap();
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "content");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
