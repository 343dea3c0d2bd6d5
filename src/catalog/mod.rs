pub mod loader;

use crate::error::{Result, SongrecError};
use crate::types::track::Track;
use std::collections::HashSet;

pub use loader::load;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tracks: Vec<Track>,
    skipped: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogStats {
    pub total: usize,
    pub genres: usize,
    pub average_popularity: f64,
}

/// How the reference song for similarity ranking is picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackSelector {
    Id(String),
    Query(String),
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks, skipped: 0 }
    }

    pub fn with_skipped(mut self, skipped: usize) -> Self {
        self.skipped = skipped;
        self
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn stats(&self) -> CatalogStats {
        let genres = self
            .tracks
            .iter()
            .map(|track| track.track_genre.as_str())
            .filter(|genre| !genre.is_empty())
            .collect::<HashSet<_>>()
            .len();
        let average_popularity = if self.tracks.is_empty() {
            0.0
        } else {
            self.tracks
                .iter()
                .map(|track| f64::from(track.popularity))
                .sum::<f64>()
                / self.tracks.len() as f64
        };

        CatalogStats {
            total: self.tracks.len(),
            genres,
            average_popularity,
        }
    }

    /// Case-insensitive substring match on track name or artists, in catalog order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Track> {
        let needle = query.to_lowercase();
        self.tracks
            .iter()
            .filter(|track| {
                contains_folded(&track.track_name, &needle)
                    || contains_folded(&track.artists, &needle)
            })
            .take(limit)
            .collect()
    }

    pub fn find(&self, track_id: &str) -> Option<&Track> {
        self.tracks.iter().find(|track| track.track_id == track_id)
    }

    pub fn select(&self, selector: &TrackSelector) -> Result<&Track> {
        match selector {
            TrackSelector::Id(id) => self
                .find(id)
                .ok_or_else(|| SongrecError::UnknownTrack(format!("track id {id}"))),
            TrackSelector::Query(query) => self
                .search(query, 1)
                .into_iter()
                .next()
                .ok_or_else(|| SongrecError::UnknownTrack(format!("query '{query}'"))),
        }
    }
}

fn contains_folded(field: &str, needle: &str) -> bool {
    !field.is_empty() && field.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::track::fixtures::track;

    fn sample() -> Catalog {
        let mut first = track("1", "pop", 80, 0.7, 0.8, 0.6);
        first.track_name = "Blinding Lights".to_string();
        first.artists = "The Weeknd".to_string();
        let mut second = track("2", "rock", 40, 0.4, 0.9, 0.3);
        second.track_name = "Lights Out".to_string();
        second.artists = "Band".to_string();
        let mut third = track("3", "pop", 60, 0.5, 0.5, 0.5);
        third.track_name = "Other".to_string();
        third.artists = "weekend crew".to_string();
        let mut blank = track("4", "", 0, 0.1, 0.1, 0.1);
        blank.track_name = String::new();
        blank.artists = String::new();
        Catalog::new(vec![first, second, third, blank])
    }

    #[test]
    fn stats_count_distinct_genres_and_average_popularity() {
        let stats = sample().stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.genres, 2);
        assert!((stats.average_popularity - 45.0).abs() < 1e-9);
    }

    #[test]
    fn stats_of_empty_catalog_are_zero() {
        let stats = Catalog::default().stats();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.genres, 0);
        assert_eq!(stats.average_popularity, 0.0);
    }

    #[test]
    fn search_matches_title_or_artist_case_insensitively() {
        let catalog = sample();
        let hits = catalog.search("LIGHTS", 20);
        let ids = hits.iter().map(|t| t.track_id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["1", "2"]);

        let hits = catalog.search("week", 20);
        let ids = hits.iter().map(|t| t.track_id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn search_respects_limit_and_skips_blank_fields() {
        let catalog = sample();
        assert_eq!(catalog.search("", 2).len(), 2);
        assert_eq!(catalog.search("", 20).len(), 3);
        assert!(catalog.search("nothing here", 20).is_empty());
    }

    #[test]
    fn select_by_id_or_first_query_hit() {
        let catalog = sample();
        let by_id = catalog
            .select(&TrackSelector::Id("2".to_string()))
            .expect("id should resolve");
        assert_eq!(by_id.track_name, "Lights Out");

        let by_query = catalog
            .select(&TrackSelector::Query("lights".to_string()))
            .expect("query should resolve");
        assert_eq!(by_query.track_id, "1");
    }

    #[test]
    fn select_unknown_track_is_an_error() {
        let catalog = sample();
        let err = catalog
            .select(&TrackSelector::Id("missing".to_string()))
            .expect_err("unknown id should fail");
        assert!(err.to_string().contains("track id missing"));
        assert!(catalog
            .select(&TrackSelector::Query("zzz".to_string()))
            .is_err());
    }
}
