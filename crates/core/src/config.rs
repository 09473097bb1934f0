//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services, so
//! environment variables are never read while handling a request.

use crate::constants::DEFAULT_PROFILE_DATA_DIR;
use crate::error::{LabelError, LabelResult};
use crate::profiles::JsonProfileStore;
use crate::taxonomy::Taxonomy;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    profile_data_dir: PathBuf,
    taxonomy_path: Option<PathBuf>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `LabelError::InvalidInput` if `profile_data_dir` is empty.
    pub fn new(profile_data_dir: PathBuf, taxonomy_path: Option<PathBuf>) -> LabelResult<Self> {
        if profile_data_dir.as_os_str().is_empty() {
            return Err(LabelError::InvalidInput(
                "profile data directory cannot be empty".into(),
            ));
        }

        Ok(Self {
            profile_data_dir,
            taxonomy_path,
        })
    }

    /// Build a config from raw environment values. Blank values fall back to the defaults.
    pub fn from_env_values(
        profile_data_dir: Option<String>,
        taxonomy_path: Option<String>,
    ) -> LabelResult<Self> {
        let non_blank = |value: Option<String>| {
            value
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        Self::new(
            PathBuf::from(
                non_blank(profile_data_dir).unwrap_or_else(|| DEFAULT_PROFILE_DATA_DIR.into()),
            ),
            non_blank(taxonomy_path).map(PathBuf::from),
        )
    }

    pub fn profile_data_dir(&self) -> &Path {
        &self.profile_data_dir
    }

    pub fn taxonomy_path(&self) -> Option<&Path> {
        self.taxonomy_path.as_deref()
    }

    /// Load the configured taxonomy, or the bundled one when no path is set.
    pub fn resolve_taxonomy(&self) -> LabelResult<Arc<Taxonomy>> {
        match &self.taxonomy_path {
            Some(path) => Taxonomy::load(path).map(Arc::new),
            None => Ok(Taxonomy::shared()),
        }
    }

    /// Open the JSON profile store under the configured data directory.
    pub fn open_profile_store(&self) -> LabelResult<JsonProfileStore> {
        JsonProfileStore::open(&self.profile_data_dir)
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            profile_data_dir: PathBuf::from(DEFAULT_PROFILE_DATA_DIR),
            taxonomy_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::{HealthProfile, ProfileStore};
    use tempfile::TempDir;

    #[test]
    fn blank_env_values_use_defaults() {
        let cfg = CoreConfig::from_env_values(Some("  ".into()), Some(String::new())).unwrap();
        assert_eq!(cfg.profile_data_dir(), Path::new(DEFAULT_PROFILE_DATA_DIR));
        assert!(cfg.taxonomy_path().is_none());
    }

    #[test]
    fn empty_profile_dir_is_rejected() {
        assert!(matches!(
            CoreConfig::new(PathBuf::new(), None),
            Err(LabelError::InvalidInput(_))
        ));
    }

    #[test]
    fn resolves_bundled_taxonomy_without_path() {
        let taxonomy = CoreConfig::default().resolve_taxonomy().unwrap();
        assert!(Arc::ptr_eq(&taxonomy, &Taxonomy::shared()));
    }

    #[test]
    fn resolves_taxonomy_from_yaml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("taxonomy.yaml");
        std::fs::write(&path, Taxonomy::bundled().to_yaml().unwrap()).unwrap();

        let cfg = CoreConfig::new(dir.path().join("profiles"), Some(path)).unwrap();
        assert_eq!(&*cfg.resolve_taxonomy().unwrap(), Taxonomy::bundled());
    }

    #[test]
    fn missing_taxonomy_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let cfg = CoreConfig::new(dir.path().into(), Some(dir.path().join("nope.yaml"))).unwrap();
        assert!(matches!(
            cfg.resolve_taxonomy(),
            Err(LabelError::FileRead(_))
        ));
    }

    #[test]
    fn opens_profile_store_in_data_dir() {
        let dir = TempDir::new().unwrap();
        let cfg = CoreConfig::new(dir.path().join("data"), None).unwrap();
        let store = cfg.open_profile_store().unwrap();
        store
            .upsert(&HealthProfile::new("Ada", 30, vec![]).unwrap())
            .unwrap();
        assert!(dir.path().join("data").is_dir());
        assert_eq!(store.list_profiles().unwrap().len(), 1);
    }
}
