use crate::catalog::CatalogStats;
use crate::config::{origin_label, Origins};
use crate::profile::AgeGroup;
use crate::types::config::SongrecConfig;
use crate::types::report::{Mode, RecommendationReport};
use crate::types::track::Track;

pub fn to_markdown(report: &RecommendationReport) -> String {
    let mut output = String::new();
    match report.mode {
        Mode::Age => output.push_str("# Song Recommendations\n\n"),
        Mode::Similar => output.push_str("# Similar Songs\n\n"),
    }
    output.push_str(&format!(
        "Found {} songs for **{}** ({} years old)\n\n",
        report.recommendations.len(),
        report.group,
        report.age
    ));
    output.push_str(&format!("Profile: {}\n", report.description));
    output.push_str(&format!("Filter: {}\n", report.cascade.label()));
    if let Some(pool_size) = report.pool_size {
        output.push_str(&format!("Candidates scored: {pool_size}\n"));
    }
    if let Some(reference) = &report.reference {
        output.push_str(&format!(
            "Reference: {} by {} ({})\n",
            reference.track_name,
            reference.artists,
            reference.genre_display()
        ));
    }
    output.push('\n');

    output.push_str("## Recommended Songs\n\n");
    if report.recommendations.is_empty() {
        output.push_str("- none\n");
        return output;
    }

    for ranked in &report.recommendations {
        let track = &ranked.track;
        output.push_str(&format!(
            "{}. **{}** by *{}* - {} (popularity {})\n",
            ranked.rank,
            track.track_name,
            track.artists,
            track.genre_display(),
            track.popularity
        ));
        output.push_str(&format!(
            "   - Album: {} | Duration: {} | Explicit: {}\n",
            track.album_name,
            track.duration_display(),
            if track.explicit { "Yes" } else { "No" }
        ));
        output.push_str(&format!(
            "   - Danceability: {:.2} | Energy: {:.2} | Valence: {:.2}\n",
            track.danceability, track.energy, track.valence
        ));
        if let Some(score) = &ranked.score {
            output.push_str(&format!(
                "   - Similarity: {:.3} | Combined score: {:.3}\n",
                score.similarity, score.combined
            ));
        }
    }

    output
}

pub fn search_markdown(query: &str, hits: &[&Track]) -> String {
    let mut output = format!("# Search: {query}\n\nFound {} results:\n\n", hits.len());
    for track in hits {
        output.push_str(&format!(
            "- **{}** [{}]\n  *{}* - Popularity: {}\n",
            track.track_name, track.track_id, track.artists, track.popularity
        ));
    }
    output
}

pub fn info_markdown(stats: &CatalogStats) -> String {
    format!(
        "# Dataset Info\n\n- Total Songs: {}\n- Genres: {}\n- Average Popularity: {:.1}\n",
        group_thousands(stats.total),
        stats.genres,
        stats.average_popularity
    )
}

pub fn profiles_markdown() -> String {
    let mut output = String::from("# Age Groups\n\n");
    for (group, ages) in AgeGroup::ALL
        .iter()
        .zip(["under 20", "20-29", "30-49", "50 and over"])
    {
        let prefs = group.preferences();
        output.push_str(&format!("## {group} ({ages})\n\n"));
        output.push_str(&format!("{}\n\n", prefs.description));
        output.push_str(&format!("- Genres: {}\n", prefs.genres.join(", ")));
        output.push_str(&format!(
            "- Minimum danceability: {:.1} | energy: {:.1} | valence: {:.1}\n\n",
            prefs.min_danceability, prefs.min_energy, prefs.min_valence
        ));
    }
    output
}

pub fn config_markdown(config: &SongrecConfig, origins: &Origins) -> String {
    let settings = config.similarity_settings();
    let rows = [
        ("catalog.path", config.catalog_path()),
        ("recommend.count", config.count().to_string()),
        (
            "similarity.similarity_weight",
            settings.similarity_weight.to_string(),
        ),
        (
            "similarity.popularity_weight",
            settings.popularity_weight.to_string(),
        ),
        ("similarity.pool_size", settings.pool_size.to_string()),
        ("similarity.seed", settings.seed.to_string()),
    ];

    let mut output = String::from("# Effective Config\n\n");
    for (key, value) in rows {
        output.push_str(&format!(
            "- {key} = {value} ({})\n",
            origin_label(origins, key)
        ));
    }
    output
}

fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut output = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            output.push(',');
        }
        output.push(ch);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::{age_report, similar_report};
    use crate::types::track::fixtures::track;

    #[test]
    fn markdown_report_contains_sections_and_details() {
        let rendered = to_markdown(&age_report());
        assert!(rendered.contains("# Song Recommendations"));
        assert!(rendered.contains("Found 1 songs for **Teen** (17 years old)"));
        assert!(rendered.contains("Profile: High energy, danceable pop and hip-hop hits"));
        assert!(rendered.contains("1. **Anthem** by *MC Test* - Hip-Hop (popularity 88)"));
        assert!(rendered.contains("Duration: 3:05 | Explicit: Yes"));
        assert!(rendered.contains("Danceability: 0.73 | Energy: 0.81 | Valence: 0.60"));
        assert!(!rendered.contains("Similarity:"));
    }

    #[test]
    fn markdown_similar_report_shows_reference_and_scores() {
        let rendered = to_markdown(&similar_report());
        assert!(rendered.contains("# Similar Songs"));
        assert!(rendered.contains("Reference: Song ref by Artist ref (Pop)"));
        assert!(rendered.contains("Candidates scored: 42"));
        assert!(rendered.contains("Filter: genre only"));
        assert!(rendered.contains("Similarity: 0.912 | Combined score: 0.903"));
    }

    #[test]
    fn markdown_empty_report_says_none() {
        let mut report = age_report();
        report.recommendations.clear();
        assert!(to_markdown(&report).contains("- none"));
    }

    #[test]
    fn search_lists_hits() {
        let hit = track("x1", "pop", 70, 0.5, 0.5, 0.5);
        let rendered = search_markdown("song", &[&hit]);
        assert!(rendered.contains("Found 1 results:"));
        assert!(rendered.contains("**Song x1** [x1]"));
        assert!(rendered.contains("Popularity: 70"));
    }

    #[test]
    fn info_groups_thousands() {
        let rendered = info_markdown(&CatalogStats {
            total: 114_000,
            genres: 114,
            average_popularity: 33.2385,
        });
        assert!(rendered.contains("Total Songs: 114,000"));
        assert!(rendered.contains("Genres: 114"));
        assert!(rendered.contains("Average Popularity: 33.2"));
    }

    #[test]
    fn thousands_separator_edges() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn config_lists_values_with_their_layer() {
        let config: SongrecConfig = toml::from_str(
            r#"
[similarity]
seed = 9
"#,
        )
        .expect("config should parse");
        let mut origins = Origins::new();
        origins.insert(
            "similarity.seed".to_string(),
            crate::config::ConfigLayer::Local,
        );

        let rendered = config_markdown(&config, &origins);
        assert!(rendered.contains("- similarity.seed = 9 (local)"));
        assert!(rendered.contains("- similarity.similarity_weight = 0.7 (default)"));
        assert!(rendered.contains("- catalog.path = cleaned_genres_data.csv (default)"));
    }

    #[test]
    fn profiles_list_every_group() {
        let rendered = profiles_markdown();
        for group in AgeGroup::ALL {
            assert!(rendered.contains(&format!("## {group}")));
        }
        assert!(rendered.contains("classical, jazz, acoustic, blues, folk, oldies"));
    }
}
