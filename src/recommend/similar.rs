use crate::catalog::Catalog;
use crate::profile::{AgeGroup, Preferences};
use crate::recommend::scaling::{cosine_similarity, StandardScaler};
use crate::recommend::{filter_for_group, top_by_popularity};
use crate::types::config::SimilaritySettings;
use crate::types::report::{
    CascadeLevel, Mode, RankedTrack, RecommendationReport, SimilarityScore,
};
use crate::types::track::Track;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct CandidatePool<'a> {
    pub level: CascadeLevel,
    pub tracks: Vec<&'a Track>,
}

/// Age-filtered candidates without the reference song, one row per track id,
/// sized to `target`.
///
/// A pool larger than `target` is sampled down with a seeded RNG and keeps
/// catalog order. A smaller pool is topped up with the most popular tracks
/// whose id is not already present.
pub fn candidate_pool<'a>(
    catalog: &'a Catalog,
    reference: &Track,
    prefs: &Preferences,
    target: usize,
    seed: u64,
) -> CandidatePool<'a> {
    let filtered = filter_for_group(catalog, prefs);
    // One row per track id; the catalog lists a song once per genre.
    let mut seen = HashSet::new();
    seen.insert(reference.track_id.as_str());
    let mut tracks = filtered
        .tracks
        .into_iter()
        .filter(|&track| seen.insert(track.track_id.as_str()))
        .collect::<Vec<_>>();

    if tracks.len() > target {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut picked = rand::seq::index::sample(&mut rng, tracks.len(), target).into_vec();
        picked.sort_unstable();
        tracks = picked.into_iter().map(|index| tracks[index]).collect();
    } else if tracks.len() < target {
        let needed = target - tracks.len();
        let extras = top_by_popularity(catalog.tracks().iter().collect(), usize::MAX)
            .into_iter()
            .filter(|&track| seen.insert(track.track_id.as_str()))
            .take(needed)
            .collect::<Vec<_>>();
        tracing::debug!(added = extras.len(), "expanded candidate pool");
        tracks.extend(extras);
    }

    CandidatePool {
        level: filtered.level,
        tracks,
    }
}

pub fn score_candidates(
    reference: &Track,
    candidates: &[&Track],
    settings: &SimilaritySettings,
) -> Vec<SimilarityScore> {
    let mut rows = candidates
        .iter()
        .map(|track| track.features())
        .collect::<Vec<_>>();
    rows.push(reference.features());
    let scaler = StandardScaler::fit(&rows);
    let reference_scaled = scaler.transform(&reference.features());

    candidates
        .iter()
        .zip(&rows)
        .map(|(track, row)| {
            let similarity = cosine_similarity(&reference_scaled, &scaler.transform(row));
            let popularity = (f64::from(track.popularity) / 100.0).clamp(0.0, 1.0);
            SimilarityScore {
                similarity,
                popularity,
                combined: f64::from(settings.similarity_weight) * similarity
                    + f64::from(settings.popularity_weight) * popularity,
            }
        })
        .collect()
}

pub fn similar(
    catalog: &Catalog,
    reference: &Track,
    age: u32,
    count: usize,
    settings: &SimilaritySettings,
) -> RecommendationReport {
    let group = AgeGroup::for_age(age);
    let prefs = group.preferences();
    let pool = candidate_pool(catalog, reference, prefs, settings.pool_size, settings.seed);
    tracing::info!(
        group = %group,
        level = ?pool.level,
        candidates = pool.tracks.len(),
        reference = %reference.track_id,
        "candidate pool built"
    );

    let scores = score_candidates(reference, &pool.tracks, settings);
    let mut ranked = pool.tracks.iter().zip(scores).collect::<Vec<_>>();
    // Stable: equal scores and popularity keep pool order.
    ranked.sort_by(|(a_track, a), (b_track, b)| {
        b.combined
            .total_cmp(&a.combined)
            .then_with(|| b_track.popularity.cmp(&a_track.popularity))
    });

    let recommendations = ranked
        .into_iter()
        .take(count)
        .enumerate()
        .map(|(index, (track, score))| RankedTrack {
            rank: index + 1,
            track: (*track).clone(),
            score: Some(score),
        })
        .collect();

    RecommendationReport {
        mode: Mode::Similar,
        age,
        group,
        description: prefs.description.to_string(),
        cascade: pool.level,
        reference: Some(reference.clone()),
        pool_size: Some(pool.tracks.len()),
        recommendations,
    }
}
