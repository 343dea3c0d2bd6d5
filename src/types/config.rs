use crate::error::SongrecError;
use serde::Deserialize;

pub const DEFAULT_CATALOG_PATH: &str = "cleaned_genres_data.csv";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongrecConfig {
    pub catalog: Option<CatalogConfig>,
    pub recommend: Option<RecommendConfig>,
    pub similarity: Option<SimilarityConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendConfig {
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimilarityConfig {
    pub similarity_weight: Option<f32>,
    pub popularity_weight: Option<f32>,
    pub pool_size: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilaritySettings {
    pub similarity_weight: f32,
    pub popularity_weight: f32,
    pub pool_size: usize,
    pub seed: u64,
}

impl Default for SimilaritySettings {
    fn default() -> Self {
        Self {
            similarity_weight: 0.7,
            popularity_weight: 0.3,
            pool_size: 1000,
            seed: 42,
        }
    }
}

impl SongrecConfig {
    pub fn catalog_path(&self) -> String {
        self.catalog
            .as_ref()
            .and_then(|catalog| catalog.path.clone())
            .unwrap_or_else(|| DEFAULT_CATALOG_PATH.to_string())
    }

    pub fn count(&self) -> u32 {
        self.recommend
            .as_ref()
            .and_then(|recommend| recommend.count)
            .unwrap_or(10)
    }

    pub fn similarity_settings(&self) -> SimilaritySettings {
        let defaults = SimilaritySettings::default();
        match &self.similarity {
            Some(similarity) => SimilaritySettings {
                similarity_weight: similarity
                    .similarity_weight
                    .unwrap_or(defaults.similarity_weight),
                popularity_weight: similarity
                    .popularity_weight
                    .unwrap_or(defaults.popularity_weight),
                pool_size: similarity.pool_size.unwrap_or(defaults.pool_size),
                seed: similarity.seed.unwrap_or(defaults.seed),
            },
            None => defaults,
        }
    }

    pub fn validate(&self) -> Result<(), SongrecError> {
        if let Some(path) = self.catalog.as_ref().and_then(|catalog| catalog.path.as_ref()) {
            if path.trim().is_empty() {
                return Err(SongrecError::ConfigParse(
                    "catalog.path must not be empty".to_string(),
                ));
            }
        }

        let count = self.count();
        if !(1..=100).contains(&count) {
            return Err(SongrecError::ConfigParse(format!(
                "recommend.count must be between 1 and 100 (found {count})"
            )));
        }

        let settings = self.similarity_settings();
        for (key, weight) in [
            ("similarity_weight", settings.similarity_weight),
            ("popularity_weight", settings.popularity_weight),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(SongrecError::ConfigParse(format!(
                    "similarity.{key} must be between 0.0 and 1.0"
                )));
            }
        }
        let weight_sum = settings.similarity_weight + settings.popularity_weight;
        if (weight_sum - 1.0).abs() > 0.001 {
            return Err(SongrecError::ConfigParse(format!(
                "similarity weights must sum to 1.0 (found {:.3})",
                weight_sum
            )));
        }
        if settings.pool_size == 0 {
            return Err(SongrecError::ConfigParse(
                "similarity.pool_size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
