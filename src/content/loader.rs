//! Loader for the RON combat tuning file.

use std::fs;
use std::path::{Path, PathBuf};

use ron::Options;
use thiserror::Error;

use super::data::CombatConfig;

/// Error type for configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

fn parse_at(contents: &str, path: &Path) -> Result<CombatConfig, ConfigError> {
    ron_options()
        .from_str(contents)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Parse tuning from an in-memory RON document.
pub fn parse_combat_config(contents: &str) -> Result<CombatConfig, ConfigError> {
    parse_at(contents, Path::new("<inline>"))
}

/// Read and parse a tuning file from disk.
pub fn load_combat_config(path: &Path) -> Result<CombatConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_at(&contents, path)
}
