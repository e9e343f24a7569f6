//! Registry of known news source column mappings.
//!
//! Each provider ships its own column names; a [`SourceSpec`] maps the
//! canonical {time, headline, description} fields onto them (or marks a
//! field as absent). Adding a source is a new registry entry, not new code.

/// Column mapping for one news source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpec {
    /// Canonical source name used to tag rows.
    pub name: &'static str,
    /// Column holding the raw time string, if the source has one.
    pub time_column: Option<&'static str>,
    /// Column holding the headline text.
    pub headline_column: &'static str,
    /// Column holding the description text, if the source has one.
    pub description_column: Option<&'static str>,
}

const KNOWN_SOURCES: &[SourceSpec] = &[
    SourceSpec {
        name: "Guardian",
        time_column: Some("Time"),
        headline_column: "Headlines",
        description_column: None,
    },
    SourceSpec {
        name: "Reuters",
        time_column: Some("Time"),
        headline_column: "Headlines",
        description_column: Some("Description"),
    },
    SourceSpec {
        name: "CNBC",
        time_column: Some("Time"),
        headline_column: "Headlines",
        description_column: Some("Description"),
    },
];

/// Look up the column mapping for a source by name (case-insensitive).
#[must_use]
pub fn source_spec(name: &str) -> Option<&'static SourceSpec> {
    KNOWN_SOURCES
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name))
}
