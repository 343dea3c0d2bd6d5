pub mod scaling;
pub mod similar;

use crate::catalog::Catalog;
use crate::profile::{AgeGroup, Preferences};
use crate::types::report::{CascadeLevel, Mode, RankedTrack, RecommendationReport};
use crate::types::track::Track;

/// Rows picked by the age heuristic, in catalog order.
#[derive(Debug, Clone)]
pub struct Filtered<'a> {
    pub level: CascadeLevel,
    pub tracks: Vec<&'a Track>,
}

/// Genre plus thresholds, then genre only, then the whole catalog.
pub fn filter_for_group<'a>(catalog: &'a Catalog, prefs: &Preferences) -> Filtered<'a> {
    let full = catalog
        .tracks()
        .iter()
        .filter(|track| prefs.matches_all(track))
        .collect::<Vec<_>>();
    if !full.is_empty() {
        return Filtered {
            level: CascadeLevel::Full,
            tracks: full,
        };
    }

    let genre_only = catalog
        .tracks()
        .iter()
        .filter(|track| prefs.matches_genre(track))
        .collect::<Vec<_>>();
    if !genre_only.is_empty() {
        return Filtered {
            level: CascadeLevel::GenreOnly,
            tracks: genre_only,
        };
    }

    Filtered {
        level: CascadeLevel::Catalog,
        tracks: catalog.tracks().iter().collect(),
    }
}

/// Most popular first; the sort is stable so ties keep catalog order.
pub fn top_by_popularity<'a>(mut tracks: Vec<&'a Track>, count: usize) -> Vec<&'a Track> {
    tracks.sort_by(|a, b| b.popularity.cmp(&a.popularity));
    tracks.truncate(count);
    tracks
}

pub fn recommend(catalog: &Catalog, age: u32, count: usize) -> RecommendationReport {
    let group = AgeGroup::for_age(age);
    let prefs = group.preferences();
    let filtered = filter_for_group(catalog, prefs);
    tracing::info!(
        group = %group,
        level = ?filtered.level,
        matched = filtered.tracks.len(),
        "age heuristic applied"
    );

    let recommendations = top_by_popularity(filtered.tracks, count)
        .into_iter()
        .enumerate()
        .map(|(index, track)| RankedTrack {
            rank: index + 1,
            track: track.clone(),
            score: None,
        })
        .collect();

    RecommendationReport {
        mode: Mode::Age,
        age,
        group,
        description: prefs.description.to_string(),
        cascade: filtered.level,
        reference: None,
        pool_size: None,
        recommendations,
    }
}
