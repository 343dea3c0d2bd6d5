use crate::catalog::Catalog;
use crate::error::{Result, SongrecError};
use crate::types::track::Track;
use std::io::Read;
use std::path::Path;

pub fn load(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Err(SongrecError::CatalogNotFound(path.display().to_string()));
    }
    let file = std::fs::File::open(path)?;
    let catalog = load_from_reader(file, &path.display().to_string())?;
    tracing::info!(
        path = %path.display(),
        tracks = catalog.len(),
        skipped = catalog.skipped(),
        "catalog loaded"
    );
    Ok(catalog)
}

pub fn load_from_reader<R: Read>(input: R, source: &str) -> Result<Catalog> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut tracks = Vec::new();
    let mut skipped = 0;
    for (index, record) in reader.deserialize::<Track>().enumerate() {
        match record {
            Ok(track) if track.has_finite_features() => tracks.push(track),
            Ok(track) => {
                skipped += 1;
                tracing::warn!(
                    source = source,
                    line = index + 2,
                    track_id = %track.track_id,
                    "skipping row with non-finite audio feature"
                );
            }
            Err(e) if e.is_io_error() => return Err(SongrecError::Csv(e)),
            Err(e) => {
                skipped += 1;
                // +2: header line plus 1-based numbering.
                tracing::warn!(source = source, line = index + 2, error = %e, "skipping malformed row");
            }
        }
    }

    if tracks.is_empty() {
        return Err(SongrecError::CatalogEmpty(source.to_string()));
    }
    Ok(Catalog::new(tracks).with_skipped(skipped))
}
