use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::ClustermatchConfig;
use crate::errors::{Error, Result};

/// File name searched for in the current directory and its ancestors.
pub const CONFIG_FILE_NAME: &str = ".clustermatch.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse config from TOML string
pub fn parse_config(contents: &str) -> Result<ClustermatchConfig> {
    Ok(toml::from_str::<ClustermatchConfig>(contents)?)
}

/// Try loading config from a specific path, logging instead of failing
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<ClustermatchConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("Ignoring {}: {}. Using defaults.", config_path.display(), e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Directory ancestors of `start`, closest first, up to `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Load an explicitly requested config file; errors are not swallowed.
pub fn load_config_from(path: &Path) -> Result<ClustermatchConfig> {
    let contents = read_config_file(path)?;
    parse_config(&contents).map_err(|e| match e {
        Error::Toml(e) => Error::Configuration(format!("{}: {}", path.display(), e)),
        other => other,
    })
}

/// Search for `.clustermatch.toml` from the current directory upwards.
///
/// Falls back to the defaults when no readable, valid file is found.
pub fn load_config() -> ClustermatchConfig {
    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return ClustermatchConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            ClustermatchConfig::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(indoc! {r#"
            [parallel]
            n_jobs = 4
            n_jobs_low = 2

            [coefficient]
            internal_n_clusters = [2, 3, 5]
        "#})
        .unwrap();

        assert_eq!(config.parallel.n_jobs, Some(4));
        assert_eq!(config.parallel.n_jobs_low, Some(2));
        assert_eq!(config.coefficient.internal_n_clusters, Some(vec![2, 3, 5]));
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config, ClustermatchConfig::default());
    }

    #[test]
    fn test_parse_invalid_toml() {
        assert!(matches!(
            parse_config("[parallel\nn_jobs = 1"),
            Err(Error::Toml(_))
        ));
    }

    #[test]
    fn test_directory_ancestors() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c"), 10).collect();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/a/b/c"),
                PathBuf::from("/a/b"),
                PathBuf::from("/a"),
                PathBuf::from("/"),
            ]
        );
        assert_eq!(directory_ancestors(PathBuf::from("/a/b/c"), 2).count(), 2);
    }

    #[test]
    fn test_try_load_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(try_load_config_from_path(&dir.path().join(CONFIG_FILE_NAME)).is_none());
    }

    #[test]
    fn test_try_load_invalid_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[coefficient]\ninternal_n_clusters = \"two\"\n").unwrap();
        assert!(try_load_config_from_path(&path).is_none());
    }

    #[test]
    fn test_load_config_from_reports_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "parallel = 3").unwrap();

        assert!(matches!(load_config_from(&path), Err(Error::Configuration(_))));
        assert!(matches!(
            load_config_from(&dir.path().join("missing.toml")),
            Err(Error::Io(_))
        ));
    }
}
