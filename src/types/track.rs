use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// danceability, energy, loudness, speechiness, acousticness,
/// instrumentalness, liveness, valence, tempo
pub const FEATURE_COUNT: usize = 9;

pub type FeatureVector = [f64; FEATURE_COUNT];

/// One catalog row. Unknown CSV columns are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub track_id: String,
    #[serde(default)]
    pub artists: String,
    #[serde(default)]
    pub album_name: String,
    #[serde(default)]
    pub track_name: String,
    pub popularity: u32,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub explicit: bool,
    pub danceability: f32,
    pub energy: f32,
    pub loudness: f32,
    pub speechiness: f32,
    pub acousticness: f32,
    pub instrumentalness: f32,
    pub liveness: f32,
    pub valence: f32,
    pub tempo: f32,
    #[serde(default)]
    pub track_genre: String,
}

impl Track {
    pub fn features(&self) -> FeatureVector {
        [
            self.danceability,
            self.energy,
            self.loudness,
            self.speechiness,
            self.acousticness,
            self.instrumentalness,
            self.liveness,
            self.valence,
            self.tempo,
        ]
        .map(f64::from)
    }

    pub fn has_finite_features(&self) -> bool {
        self.features().iter().all(|value| value.is_finite())
    }

    pub fn duration_display(&self) -> String {
        format_duration(self.duration_ms)
    }

    pub fn genre_display(&self) -> String {
        title_case(&self.track_genre)
    }
}

/// Accepts pandas-style `True`/`False` as well as `true`/`false` and `1`/`0`.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        other => Err(de::Error::custom(format!("invalid explicit flag: {other}"))),
    }
}

pub fn format_duration(duration_ms: u64) -> String {
    format!(
        "{}:{:02}",
        duration_ms / 60_000,
        (duration_ms % 60_000) / 1000
    )
}

/// Capitalizes the first letter of every alphabetic run, so `hip-hop` becomes `Hip-Hop`.
pub fn title_case(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut previous_alphabetic = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if previous_alphabetic {
                output.extend(ch.to_lowercase());
            } else {
                output.extend(ch.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            output.push(ch);
            previous_alphabetic = false;
        }
    }
    output
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::Track;

    pub fn track(
        id: &str,
        genre: &str,
        popularity: u32,
        dance: f32,
        energy: f32,
        valence: f32,
    ) -> Track {
        Track {
            track_id: id.to_string(),
            artists: format!("Artist {id}"),
            album_name: format!("Album {id}"),
            track_name: format!("Song {id}"),
            popularity,
            duration_ms: 210_000,
            explicit: false,
            danceability: dance,
            energy,
            loudness: -6.0,
            speechiness: 0.05,
            acousticness: 0.2,
            instrumentalness: 0.0,
            liveness: 0.1,
            valence,
            tempo: 120.0,
            track_genre: genre.to_string(),
        }
    }
}
