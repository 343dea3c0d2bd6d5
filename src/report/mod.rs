pub mod json;
pub mod md;

use crate::error::SongrecError;
use crate::types::report::RecommendationReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(report: &RecommendationReport, format: OutputFormat) -> Result<String, SongrecError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(SongrecError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}
