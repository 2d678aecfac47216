//! Common CLI utility functions shared across commands.

use std::path::Path;

use anyhow::{Context, Result};
use osudb_core::{DecodeOptions, Strictness};
use serde::{Deserialize, Serialize};

use crate::cli::DbKind;

/// Contents of the `--config` file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    decode: DecodeOptions,
}

/// Decode options from the config file, with `--lenient` applied on top.
pub fn load_options(config: Option<&Path>, lenient: bool) -> Result<DecodeOptions> {
    let mut options = match config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            parse_options(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        }
        None => DecodeOptions::default(),
    };
    if lenient {
        options.strictness = Strictness::Lenient;
    }
    tracing::debug!(
        strictness = %options.strictness,
        version_policy = %options.version_policy,
        "Decode options"
    );
    Ok(options)
}

fn parse_options(content: &str) -> Result<DecodeOptions> {
    let config: FileConfig = toml::from_str(content)?;
    Ok(config.decode)
}

pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Infers the database kind from the client's file names.
pub fn detect_kind(path: &Path) -> Option<DbKind> {
    let name = path.file_name()?.to_str()?.to_ascii_lowercase();
    match name.as_str() {
        "osu!.db" => Some(DbKind::Beatmaps),
        "collection.db" => Some(DbKind::Collections),
        "scores.db" => Some(DbKind::Scores),
        _ => None,
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use osudb_core::VersionPolicy;
    use std::io::Write;

    #[test]
    fn test_detect_kind() {
        assert_eq!(detect_kind(Path::new("/games/osu!/osu!.db")), Some(DbKind::Beatmaps));
        assert_eq!(detect_kind(Path::new("Collection.db")), Some(DbKind::Collections));
        assert_eq!(detect_kind(Path::new("scores.db")), Some(DbKind::Scores));
        assert_eq!(detect_kind(Path::new("presence.db")), None);
    }

    #[test]
    fn test_parse_options_defaults() {
        assert_eq!(parse_options("").unwrap(), DecodeOptions::default());
        assert_eq!(parse_options("[decode]\n").unwrap(), DecodeOptions::default());
    }

    #[test]
    fn test_load_options_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[decode]\nstrictness = \"lenient\"\nversion_policy = \"reject\"").unwrap();

        let options = load_options(Some(file.path()), false).unwrap();
        assert_eq!(options.strictness, Strictness::Lenient);
        assert_eq!(options.version_policy, VersionPolicy::Reject);
    }

    #[test]
    fn test_lenient_flag_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[decode]\nstrictness = \"strict\"").unwrap();

        let options = load_options(Some(file.path()), true).unwrap();
        assert_eq!(options.strictness, Strictness::Lenient);
        assert_eq!(options.version_policy, VersionPolicy::Warn);
    }

    #[test]
    fn test_invalid_config_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[decode]\nstrictness = \"sloppy\"").unwrap();
        assert!(load_options(Some(file.path()), false).is_err());
        assert!(load_options(Some(Path::new("/nonexistent/osudb.toml")), false).is_err());
    }
}
