use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("failed to read lecture file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("lecture file is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("invalid lecture content: {0}")]
    Invalid(String),
}
