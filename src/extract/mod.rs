//! Document Text Extraction
//!
//! Pure Rust text extraction used by the content date strategy.
//!
//! ## Supported Formats
//! - PDF: via pdf-extract
//! - Spreadsheets: .xlsx, .xlsm, .xls, .ods via calamine
//! - Word: .docx via docx-rs
//! - Text: .txt, .md, .csv, .json, .xml, .html and friends (direct read)

use crate::error::ExtractError;
use calamine::{open_workbook_auto, Reader};
use std::path::Path;

/// Maximum text length to keep (dates are taken from the start anyway)
const MAX_TEXT_LENGTH: usize = 500_000;

/// File path to plain text
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractError>;
}

/// Extractor dispatching on file extension
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentParser;

impl DocumentParser {
    pub fn new() -> Self {
        Self
    }

    /// Check if extension is plain text
    fn is_plain_text_ext(ext: &str) -> bool {
        matches!(
            ext,
            "txt" | "md" | "csv" | "tsv" | "json" | "xml" | "yaml" | "yml" | "log" | "ini"
                | "cfg" | "conf" | "toml" | "html" | "htm" | "eml" | "rtf"
        )
    }

    fn is_workbook_ext(ext: &str) -> bool {
        matches!(ext, "xlsx" | "xlsm" | "xls" | "ods")
    }

    fn read_plain_text(&self, path: &Path) -> Result<String, ExtractError> {
        let bytes = std::fs::read(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Extract text from PDF using pdf-extract
    /// Wrapped in catch_unwind to handle panics from malformed PDFs
    fn extract_pdf(&self, path: &Path) -> Result<String, ExtractError> {
        let bytes = std::fs::read(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("[DocumentParser] PDF file size: {} bytes", bytes.len());

        // pdf_extract (and its cff-parser dependency) can panic on certain fonts/glyphs
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(&bytes)
        })) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(ExtractError::Parse {
                format: "PDF",
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(_panic) => Err(ExtractError::Panicked {
                format: "PDF",
                path: path.to_path_buf(),
            }),
        }
    }

    /// Extract cell text from any calamine-supported workbook, sheet by sheet
    fn extract_workbook(&self, path: &Path) -> Result<String, ExtractError> {
        let mut workbook = open_workbook_auto(path).map_err(|e| ExtractError::Parse {
            format: "spreadsheet",
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut all_text = String::new();
        for sheet_name in workbook.sheet_names() {
            let Ok(range) = workbook.worksheet_range(&sheet_name) else {
                continue;
            };

            for row in range.rows() {
                let cells: Vec<String> = row
                    .iter()
                    .map(|cell| cell.to_string())
                    .filter(|s| !s.is_empty())
                    .collect();

                if !cells.is_empty() {
                    all_text.push_str(&cells.join(" | "));
                    all_text.push('\n');
                }
            }
        }

        Ok(all_text)
    }

    /// Extract text from DOCX using docx-rs
    fn extract_docx(&self, path: &Path) -> Result<String, ExtractError> {
        let bytes = std::fs::read(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let doc = docx_rs::read_docx(&bytes).map_err(|e| ExtractError::Parse {
            format: "DOCX",
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut all_text = String::new();
        for child in &doc.document.children {
            match child {
                docx_rs::DocumentChild::Paragraph(para) => {
                    Self::push_paragraph(para, &mut all_text);
                    all_text.push('\n');
                }
                docx_rs::DocumentChild::Table(table) => {
                    for row in &table.rows {
                        let docx_rs::TableChild::TableRow(tr) = row;
                        for cell in &tr.cells {
                            let docx_rs::TableRowChild::TableCell(tc) = cell;
                            for content in &tc.children {
                                if let docx_rs::TableCellContent::Paragraph(para) = content {
                                    Self::push_paragraph(para, &mut all_text);
                                    all_text.push_str(" | ");
                                }
                            }
                        }
                        all_text.push('\n');
                    }
                }
                _ => {}
            }
        }

        Ok(all_text)
    }

    /// Append the text runs of a paragraph, including hyperlink runs
    fn push_paragraph(para: &docx_rs::Paragraph, output: &mut String) {
        for child in &para.children {
            match child {
                docx_rs::ParagraphChild::Run(run) => Self::push_run(run, output),
                docx_rs::ParagraphChild::Hyperlink(link) => {
                    for inner in &link.children {
                        if let docx_rs::ParagraphChild::Run(run) = inner {
                            Self::push_run(run, output);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn push_run(run: &docx_rs::Run, output: &mut String) {
        for run_child in &run.children {
            if let docx_rs::RunChild::Text(text) = run_child {
                output.push_str(&text.text);
            }
        }
    }

    /// Trim lines and drop blank ones
    fn clean_text(text: &str) -> String {
        text.lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Truncate text to max length, preserving word boundaries
    fn truncate_text(text: String) -> String {
        if text.len() <= MAX_TEXT_LENGTH {
            return text;
        }

        let mut cut = MAX_TEXT_LENGTH;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        let truncated = &text[..cut];

        match truncated.rfind(char::is_whitespace) {
            Some(pos) => truncated[..pos].to_string(),
            None => truncated.to_string(),
        }
    }
}

impl TextExtractor for DocumentParser {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase());

        let raw = match ext.as_deref() {
            Some(e) if Self::is_plain_text_ext(e) => self.read_plain_text(path)?,
            Some(e) if Self::is_workbook_ext(e) => self.extract_workbook(path)?,
            Some("pdf") => self.extract_pdf(path)?,
            Some("docx") => self.extract_docx(path)?,
            _ => return Err(ExtractError::Unsupported(ext)),
        };

        let text = Self::truncate_text(Self::clean_text(&raw));
        tracing::debug!(
            "[DocumentParser] Extracted {} chars from {}",
            text.len(),
            path.display()
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_plain_text_parsing() {
        let mut file = NamedTempFile::with_suffix(".txt").unwrap();
        writeln!(file, "  Minutes of the meeting  ").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "Held on 3 March 2020.").unwrap();

        let text = DocumentParser::new().extract_text(file.path()).unwrap();
        assert_eq!(text, "Minutes of the meeting\nHeld on 3 March 2020.");
    }

    #[test]
    fn test_unsupported_extension() {
        let file = NamedTempFile::with_suffix(".exe").unwrap();
        let err = DocumentParser::new().extract_text(file.path()).unwrap_err();
        assert!(matches!(err, ExtractError::Unsupported(Some(ref e)) if e == "exe"));
    }

    #[test]
    fn test_corrupt_docx_is_a_parse_error() {
        let mut file = NamedTempFile::with_suffix(".docx").unwrap();
        file.write_all(b"definitely not a zip archive").unwrap();

        let err = DocumentParser::new().extract_text(file.path()).unwrap_err();
        assert!(matches!(err, ExtractError::Parse { format: "DOCX", .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DocumentParser::new()
            .extract_text(&dir.path().join("gone.txt"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
    }

    #[test]
    fn test_truncate_text() {
        let long_text = "a ".repeat(300_000);
        let truncated = DocumentParser::truncate_text(long_text);
        assert!(truncated.len() <= MAX_TEXT_LENGTH);
        assert!(!truncated.ends_with(' '));
    }
}
