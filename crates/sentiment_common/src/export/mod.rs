//! Export formatters.
//!
//! Each format is a stateless function of the result list producing the
//! bytes of a file with a fixed name.

mod csv_export;
mod json_export;
mod pdf_export;

pub use csv_export::{to_csv, CSV_HEADERS};
pub use json_export::to_json;
pub use pdf_export::{to_pdf, PDF_COLUMNS, PDF_TITLE};

use crate::error::ExportError;
use crate::types::AnalysisResult;
use std::fmt;
use std::str::FromStr;

const FILE_STEM: &str = "sentiment_analysis_results";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Json,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Json, ExportFormat::Pdf];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Fixed download name, e.g. `sentiment_analysis_results.csv`
    pub fn file_name(&self) -> String {
        format!("{}.{}", FILE_STEM, self.extension())
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
            ExportFormat::Pdf => "PDF",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

/// Render `results` in `format`
pub fn export(format: ExportFormat, results: &[AnalysisResult]) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Csv => to_csv(results).map(String::into_bytes),
        ExportFormat::Json => to_json(results).map(String::into_bytes),
        ExportFormat::Pdf => to_pdf(results),
    }
}
