//! CSV loading for news source datasets.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::LoadError;
use crate::normalize::normalize_time;
use crate::sources::SourceSpec;
use crate::types::NewsItem;

/// Load one news source file and normalize it to the `NewsItem` shape.
///
/// A present-but-empty file yields zero rows. Rows keep empty headlines at
/// this stage; [`crate::combine_sources`] drops them during cleaning.
///
/// # Errors
///
/// - [`LoadError::Io`] if the file is missing or unreadable.
/// - [`LoadError::MissingColumn`] if the spec's time or headline column is
///   not in the file header.
/// - [`LoadError::Csv`] if a record is structurally malformed.
pub fn load_source(path: &Path, spec: &SourceSpec) -> Result<Vec<NewsItem>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_source_from_reader(file, spec)
}

/// Load a news source from any reader. Seam for tests with in-memory CSV.
///
/// # Errors
///
/// Same as [`load_source`], minus the file-open failure.
pub fn load_source_from_reader<R: Read>(
    reader: R,
    spec: &SourceSpec,
) -> Result<Vec<NewsItem>, LoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|source| LoadError::Csv {
            source_name: spec.name.to_string(),
            source,
        })?
        .clone();

    // An entirely empty file has no header row; treat it as zero rows.
    if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
        return Ok(Vec::new());
    }

    let column_index = |name: &str| headers.iter().position(|h| h == name);

    let headline_idx =
        column_index(spec.headline_column).ok_or_else(|| LoadError::MissingColumn {
            source_name: spec.name.to_string(),
            column: spec.headline_column.to_string(),
        })?;

    let time_idx = match spec.time_column {
        Some(column) => Some(column_index(column).ok_or_else(|| LoadError::MissingColumn {
            source_name: spec.name.to_string(),
            column: column.to_string(),
        })?),
        None => None,
    };

    // Description is optional in the data model: a mapped-but-absent column
    // degrades to null descriptions rather than failing the source.
    let description_idx = spec.description_column.and_then(|column| {
        let idx = column_index(column);
        if idx.is_none() {
            tracing::warn!(
                source = spec.name,
                column,
                "description column not found; descriptions will be null"
            );
        }
        idx
    });

    let mut items = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|source| LoadError::Csv {
            source_name: spec.name.to_string(),
            source,
        })?;

        let time = normalize_time(time_idx.and_then(|i| record.get(i)));
        let headline = record.get(headline_idx).unwrap_or_default().to_string();
        let description = description_idx
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        items.push(NewsItem {
            time,
            headline,
            description,
            source: spec.name.to_string(),
            sentiment: None,
        });
    }

    tracing::debug!(source = spec.name, rows = items.len(), "loaded news source");
    Ok(items)
}
