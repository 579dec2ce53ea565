use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration surface consumed by the translation core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Gate for annotation/attribute processing. Disabling it must not
    /// alter any other node's structure.
    #[serde(default = "default_process_annotations")]
    pub process_annotations: bool,
}

fn default_process_annotations() -> bool {
    true
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            process_annotations: true,
        }
    }
}

impl TranslationConfig {
    /// Set the annotation-processing gate.
    pub fn with_annotations(mut self, process_annotations: bool) -> Self {
        self.process_annotations = process_annotations;
        self
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("cppgraph.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<TranslationConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: TranslationConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &TranslationConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TranslationConfig::default();
        assert!(config.process_annotations);
        assert!(!config.with_annotations(false).process_annotations);
    }

    #[test]
    fn test_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cppgraph.toml");

        let config = TranslationConfig::default().with_annotations(false);
        write_config(&path, &config, false).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert!(!loaded.process_annotations);
    }

    #[test]
    fn test_write_refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cppgraph.toml");

        let config = TranslationConfig::default();
        write_config(&path, &config, false).unwrap();
        assert!(write_config(&path, &config, false).is_err());
        assert!(write_config(&path, &config, true).is_ok());
    }

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(load_config(Some(&path)).unwrap().is_none());
    }
}
