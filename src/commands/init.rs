use crate::config::{ClustermatchConfig, CONFIG_FILE_NAME};
use crate::io;
use anyhow::Result;
use std::path::Path;

pub fn init_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, ClustermatchConfig::default_toml())?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_default_config() {
        let dir = TempDir::new().unwrap();
        init_config(dir.path(), false).unwrap();

        let contents = std::fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(contents, ClustermatchConfig::default_toml());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "# mine").unwrap();

        assert!(init_config(dir.path(), false).is_err());
        init_config(dir.path(), true).unwrap();
    }
}
