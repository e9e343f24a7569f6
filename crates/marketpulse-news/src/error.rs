use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read news source file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {source_name}: {source}")]
    Csv {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    #[error("source {source_name} is missing mapped column '{column}'")]
    MissingColumn { source_name: String, column: String },

    #[error("unknown news source '{0}' (no column mapping registered)")]
    UnknownSource(String),
}
