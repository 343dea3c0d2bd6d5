use crate::profile::AgeGroup;
use crate::types::track::Track;
use serde::Serialize;

/// Which stage of the age heuristic produced the candidate rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadeLevel {
    Full,
    GenreOnly,
    Catalog,
}

impl CascadeLevel {
    pub fn is_fallback(self) -> bool {
        !matches!(self, CascadeLevel::Full)
    }

    pub fn label(self) -> &'static str {
        match self {
            CascadeLevel::Full => "genre and audio thresholds",
            CascadeLevel::GenreOnly => "genre only (thresholds relaxed)",
            CascadeLevel::Catalog => "whole catalog (no genre match)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Age,
    Similar,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarityScore {
    pub similarity: f64,
    pub popularity: f64,
    pub combined: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedTrack {
    pub rank: usize,
    pub track: Track,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<SimilarityScore>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationReport {
    pub mode: Mode,
    pub age: u32,
    pub group: AgeGroup,
    pub description: String,
    pub cascade: CascadeLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Track>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_size: Option<usize>,
    pub recommendations: Vec<RankedTrack>,
}
