use crate::types::track::Track;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AgeGroup {
    Teen,
    #[serde(rename = "Young Adult")]
    YoungAdult,
    Adult,
    Senior,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preferences {
    pub genres: &'static [&'static str],
    pub min_danceability: f32,
    pub min_energy: f32,
    pub min_valence: f32,
    pub description: &'static str,
}

static TEEN: Preferences = Preferences {
    genres: &["pop", "hip-hop", "edm", "dance", "electronic"],
    min_danceability: 0.6,
    min_energy: 0.7,
    min_valence: 0.5,
    description: "High energy, danceable pop and hip-hop hits",
};

static YOUNG_ADULT: Preferences = Preferences {
    genres: &["pop", "indie", "rock", "alternative", "hip-hop"],
    min_danceability: 0.5,
    min_energy: 0.6,
    min_valence: 0.4,
    description: "Mix of popular and indie tracks with good energy",
};

static ADULT: Preferences = Preferences {
    genres: &["rock", "jazz", "acoustic", "blues", "folk", "country"],
    min_danceability: 0.4,
    min_energy: 0.5,
    min_valence: 0.3,
    description: "More mature sounds with acoustic and rock elements",
};

static SENIOR: Preferences = Preferences {
    genres: &["classical", "jazz", "acoustic", "blues", "folk", "oldies"],
    min_danceability: 0.3,
    min_energy: 0.4,
    min_valence: 0.3,
    description: "Timeless classics and acoustic sounds",
};

impl AgeGroup {
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::Teen,
        AgeGroup::YoungAdult,
        AgeGroup::Adult,
        AgeGroup::Senior,
    ];

    pub fn for_age(age: u32) -> Self {
        if age < 20 {
            AgeGroup::Teen
        } else if age < 30 {
            AgeGroup::YoungAdult
        } else if age < 50 {
            AgeGroup::Adult
        } else {
            AgeGroup::Senior
        }
    }

    pub fn preferences(self) -> &'static Preferences {
        match self {
            AgeGroup::Teen => &TEEN,
            AgeGroup::YoungAdult => &YOUNG_ADULT,
            AgeGroup::Adult => &ADULT,
            AgeGroup::Senior => &SENIOR,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AgeGroup::Teen => "Teen",
            AgeGroup::YoungAdult => "Young Adult",
            AgeGroup::Adult => "Adult",
            AgeGroup::Senior => "Senior",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Preferences {
    pub fn matches_genre(&self, track: &Track) -> bool {
        let genre = track.track_genre.trim();
        self.genres
            .iter()
            .any(|preferred| preferred.eq_ignore_ascii_case(genre))
    }

    /// Genre membership plus the three inclusive audio thresholds.
    pub fn matches_all(&self, track: &Track) -> bool {
        self.matches_genre(track)
            && track.danceability >= self.min_danceability
            && track.energy >= self.min_energy
            && track.valence >= self.min_valence
    }
}
