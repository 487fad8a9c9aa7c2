// src/resume.rs
//! Resume text extraction from paged PDF documents.
//!
//! Page-level failures are tolerated: a page that cannot be read is logged
//! and skipped. Only when nothing at all is extractable does the document
//! degrade to a sentinel string, so prompt composition can still run.

use pdf::file::FileOptions;
use std::path::Path;
use tracing::{info, warn};

/// Fixed sentinel used when no page yields any text.
pub const EMPTY_RESUME_SENTINEL: &str = "Error: Could not extract text from PDF";

#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub path: String,
    pub extracted_text: String,
}

/// Read a resume PDF into a `ResumeDocument`. Never fails: unreadable
/// documents produce an error placeholder as their text.
pub async fn read_resume(path: &Path) -> ResumeDocument {
    let extracted_text = match tokio::fs::read(path).await {
        Ok(data) => match extract_page_texts(&data) {
            Ok(pages) => assemble_resume_text(pages),
            Err(e) => {
                warn!("Error reading PDF {}: {}", path.display(), e);
                format!("Error reading PDF: {}", e)
            }
        },
        Err(e) => {
            warn!("Error reading PDF {}: {}", path.display(), e);
            format!("Error reading PDF: {}", e)
        }
    };

    info!(
        "Read resume from {} ({} characters)",
        path.display(),
        extracted_text.len()
    );

    ResumeDocument {
        path: path.display().to_string(),
        extracted_text,
    }
}

/// Extract text per page. The outer error covers an unparseable document;
/// inner errors cover individual pages.
fn extract_page_texts(data: &[u8]) -> Result<Vec<Result<String, String>>, String> {
    let file = FileOptions::cached()
        .load(data)
        .map_err(|e| e.to_string())?;
    let resolver = file.resolver();

    let mut pages = Vec::new();
    for page_num in 0..file.num_pages() {
        let page_text: Result<String, String> = (|| {
            let page = file.get_page(page_num).map_err(|e| e.to_string())?;
            let mut text = String::new();
            if let Some(content) = &page.contents {
                let operations = content.operations(&resolver).map_err(|e| e.to_string())?;
                for op in operations.iter() {
                    if let pdf::content::Op::TextDraw { text: fragment } = op {
                        text.push_str(&fragment.to_string_lossy());
                    }
                }
            }
            Ok(text)
        })();
        pages.push(page_text);
    }

    Ok(pages)
}

/// Concatenate the successful pages in page order; failed pages contribute
/// nothing. An overall empty result becomes the sentinel.
fn assemble_resume_text(pages: Vec<Result<String, String>>) -> String {
    let mut text = String::new();

    for (index, page) in pages.into_iter().enumerate() {
        match page {
            Ok(page_text) => {
                if page_text.trim().is_empty() {
                    continue;
                }
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&page_text);
            }
            Err(e) => {
                warn!("Could not extract text from page {}: {}", index + 1, e);
            }
        }
    }

    if text.trim().is_empty() {
        EMPTY_RESUME_SENTINEL.to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_keeps_successful_pages_in_order() {
        let pages = vec![
            Ok("3 years Python".to_string()),
            Err("damaged page".to_string()),
            Ok("2 years Go".to_string()),
        ];
        assert_eq!(assemble_resume_text(pages), "3 years Python\n2 years Go");
    }

    #[test]
    fn test_assemble_all_pages_failed_yields_sentinel() {
        let pages: Vec<Result<String, String>> =
            vec![Err("bad".to_string()), Err("worse".to_string())];
        assert_eq!(assemble_resume_text(pages), EMPTY_RESUME_SENTINEL);
    }

    #[test]
    fn test_assemble_empty_pages_yield_sentinel() {
        let pages = vec![Ok(String::new()), Ok("   ".to_string())];
        assert_eq!(assemble_resume_text(pages), EMPTY_RESUME_SENTINEL);
    }

    #[test]
    fn test_assemble_no_pages_yields_sentinel() {
        assert_eq!(assemble_resume_text(Vec::new()), EMPTY_RESUME_SENTINEL);
    }

    #[tokio::test]
    async fn test_read_resume_garbage_bytes() {
        let dir = std::env::temp_dir().join("jobfit_resume_test");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("not_a_pdf.pdf");
        tokio::fs::write(&path, b"this is not a pdf").await.unwrap();

        let document = read_resume(&path).await;
        assert!(document.extracted_text.starts_with("Error reading PDF:"));

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_read_resume_missing_file() {
        let document = read_resume(Path::new("/nonexistent/resume.pdf")).await;
        assert!(document.extracted_text.starts_with("Error reading PDF:"));
    }
}
