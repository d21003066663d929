//! Provider descriptor loading from JSON and TOML files.
//!
//! Descriptors live one per file anywhere below the providers directory.
//! The file stem is the lookup key for [`ProviderLoader::load`].

use crate::{
    definition::{ProviderConfig, ProviderDescriptor},
    error::{ProviderError, Result},
};
use scout_core::{ProviderId, ProvidersConfig};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const EXTENSIONS: [&str; 2] = ["json", "toml"];

/// Loader for provider descriptors.
#[derive(Debug, Clone)]
pub struct ProviderLoader {
    /// Base directory containing descriptors
    providers_dir: PathBuf,
}

impl ProviderLoader {
    /// Create a new loader with the given descriptor directory.
    ///
    /// # Errors
    /// Returns error if the directory doesn't exist.
    pub fn new(providers_dir: impl Into<PathBuf>) -> Result<Self> {
        let providers_dir = providers_dir.into();

        if !providers_dir.is_dir() {
            return Err(ProviderError::DirectoryNotFound {
                path: providers_dir.display().to_string(),
            });
        }

        Ok(Self { providers_dir })
    }

    /// Create a loader for the directory named in the application config.
    ///
    /// # Errors
    /// Returns error if the directory doesn't exist.
    pub fn from_config(config: &ProvidersConfig) -> Result<Self> {
        Self::new(&config.dir)
    }

    /// Directory this loader reads from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.providers_dir
    }

    /// Load a single provider descriptor by name.
    ///
    /// Looks for `<name>.json`, then `<name>.toml`, in any subdirectory.
    ///
    /// # Errors
    /// Returns `NotFound` if no such file exists, or a load/parse/validation
    /// error if it does but is unusable.
    pub fn load(&self, name: &str) -> Result<ProviderConfig> {
        let not_found = || ProviderError::NotFound {
            provider: name.to_string(),
        };

        // Names that can't be IDs can't be file stems either
        if ProviderId::new(name).is_err() {
            return Err(not_found());
        }

        for ext in EXTENSIONS {
            let filename = format!("{name}.{ext}");
            if let Some(path) = Self::find_file_recursive(&self.providers_dir, &filename)? {
                let config = Self::load_from_path(&path)?;
                debug!(
                    provider = %config.id,
                    path = %path.display(),
                    "loaded provider descriptor"
                );
                return Ok(config);
            }
        }

        Err(not_found())
    }

    /// Load every descriptor below the directory.
    ///
    /// A single malformed or duplicate descriptor fails the whole batch.
    ///
    /// # Errors
    /// Returns error if the directory can't be read or any descriptor is
    /// invalid.
    pub fn load_all(&self) -> Result<Vec<ProviderConfig>> {
        let mut paths = Vec::new();
        Self::collect_descriptor_paths(&self.providers_dir, &mut paths)?;
        paths.sort();

        let mut seen = HashSet::new();
        let mut configs = Vec::with_capacity(paths.len());

        for path in paths {
            let config = Self::load_from_path(&path)?;
            if !seen.insert(config.id.clone()) {
                return Err(ProviderError::ValidationError {
                    provider: config.id.to_string(),
                    reason: format!("duplicate provider name in {}", path.display()),
                });
            }
            configs.push(config);
        }

        info!(
            count = configs.len(),
            dir = %self.providers_dir.display(),
            "loaded provider descriptors"
        );

        Ok(configs)
    }

    fn is_descriptor(path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| EXTENSIONS.contains(&ext))
    }

    /// Recursively collect descriptor file paths.
    fn collect_descriptor_paths(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<()> {
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();

            if path.is_dir() {
                Self::collect_descriptor_paths(&path, paths)?;
            } else if Self::is_descriptor(&path) {
                paths.push(path);
            }
        }

        Ok(())
    }

    /// Recursively search for a file by name.
    fn find_file_recursive(dir: &Path, filename: &str) -> Result<Option<PathBuf>> {
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();

            if path.is_dir() {
                if let Some(found) = Self::find_file_recursive(&path, filename)? {
                    return Ok(Some(found));
                }
            } else if path.file_name().and_then(|s| s.to_str()) == Some(filename) {
                return Ok(Some(path));
            }
        }

        Ok(None)
    }

    /// Load and validate a descriptor from a specific file path.
    fn load_from_path(path: &Path) -> Result<ProviderConfig> {
        let contents = std::fs::read_to_string(path).map_err(|e| ProviderError::LoadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let descriptor: ProviderDescriptor =
            if path.extension().and_then(|s| s.to_str()) == Some("toml") {
                toml::from_str(&contents).map_err(|e| ProviderError::TomlParseError {
                    path: path.display().to_string(),
                    source: e,
                })?
            } else {
                serde_json::from_str(&contents).map_err(|e| ProviderError::JsonParseError {
                    path: path.display().to_string(),
                    source: e,
                })?
            };

        ProviderConfig::from_descriptor(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::Transport;
    use tempfile::TempDir;

    fn write_api_descriptor(dir: &Path, name: &str, enabled: bool) -> PathBuf {
        std::fs::create_dir_all(dir).expect("create descriptor dir");
        let file_path = dir.join(format!("{name}.json"));

        let content = format!(
            r#"{{
    "name": "{name}",
    "url": "https://{name}.example",
    "searchUrl": "/q.php?q={{query}}",
    "enabled": {enabled},
    "type": "api",
    "trackers": ["udp://tracker.example:1337/announce"]
}}"#
        );

        std::fs::write(&file_path, content).expect("write test file");
        file_path
    }

    #[test]
    fn test_loader_new_with_existing_dir() {
        let temp_dir = TempDir::new().expect("create temp dir");
        assert!(ProviderLoader::new(temp_dir.path()).is_ok());
    }

    #[test]
    fn test_loader_new_with_nonexistent_dir() {
        let loader = ProviderLoader::new("/nonexistent/path/to/providers");
        assert!(matches!(
            loader,
            Err(ProviderError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_load_single_provider() {
        let temp_dir = TempDir::new().expect("create temp dir");
        write_api_descriptor(&temp_dir.path().join("api"), "tpb", true);

        let loader = ProviderLoader::new(temp_dir.path()).expect("create loader");
        let config = loader.load("tpb").expect("load provider");

        assert_eq!(config.name(), "tpb");
        assert_eq!(config.transport, Transport::Api);
        assert_eq!(config.base_url, "https://tpb.example");
    }

    #[test]
    fn test_load_toml_provider() {
        let temp_dir = TempDir::new().expect("create temp dir");
        std::fs::write(
            temp_dir.path().join("yts.toml"),
            r#"
name = "yts"
url = "https://yts.example"
searchUrl = "/api/v2/list_movies.json?query_term={query}"
enabled = true
type = "api"
"#,
        )
        .expect("write toml descriptor");

        let loader = ProviderLoader::new(temp_dir.path()).expect("create loader");
        let config = loader.load("yts").expect("load provider");
        assert_eq!(config.name(), "yts");
    }

    #[test]
    fn test_load_nonexistent_provider() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let loader = ProviderLoader::new(temp_dir.path()).expect("create loader");

        let result = loader.load("nonexistent");
        assert!(matches!(result, Err(ProviderError::NotFound { .. })));

        let result = loader.load("../escape");
        assert!(matches!(result, Err(ProviderError::NotFound { .. })));
    }

    #[test]
    fn test_load_all_providers() {
        let temp_dir = TempDir::new().expect("create temp dir");

        write_api_descriptor(temp_dir.path(), "alpha", true);
        write_api_descriptor(&temp_dir.path().join("nested"), "beta", false);
        write_api_descriptor(&temp_dir.path().join("nested").join("deeper"), "gamma", true);
        std::fs::write(temp_dir.path().join("README.md"), "not a descriptor")
            .expect("write readme");

        let loader = ProviderLoader::new(temp_dir.path()).expect("create loader");
        let configs = loader.load_all().expect("load all providers");

        assert_eq!(configs.len(), 3);
        let names: HashSet<_> = configs.iter().map(ProviderConfig::name).collect();
        assert!(names.contains("alpha") && names.contains("beta") && names.contains("gamma"));
    }

    #[test]
    fn test_load_all_fails_on_malformed() {
        let temp_dir = TempDir::new().expect("create temp dir");

        write_api_descriptor(temp_dir.path(), "valid", true);
        std::fs::write(temp_dir.path().join("broken.json"), "{ not json")
            .expect("write invalid file");

        let loader = ProviderLoader::new(temp_dir.path()).expect("create loader");
        let result = loader.load_all();

        assert!(matches!(result, Err(ProviderError::JsonParseError { .. })));
    }

    #[test]
    fn test_load_all_fails_on_invalid() {
        let temp_dir = TempDir::new().expect("create temp dir");
        std::fs::write(
            temp_dir.path().join("noquery.json"),
            r#"{"name": "noquery", "url": "https://x.example", "searchUrl": "/s", "type": "api"}"#,
        )
        .expect("write descriptor");

        let loader = ProviderLoader::new(temp_dir.path()).expect("create loader");
        let result = loader.load_all();

        assert!(matches!(result, Err(ProviderError::ValidationError { .. })));
    }

    #[test]
    fn test_load_all_rejects_duplicate_names() {
        let temp_dir = TempDir::new().expect("create temp dir");
        write_api_descriptor(temp_dir.path(), "dup", true);
        write_api_descriptor(&temp_dir.path().join("other"), "dup", true);

        let loader = ProviderLoader::new(temp_dir.path()).expect("create loader");
        let result = loader.load_all();

        assert!(matches!(result, Err(ProviderError::ValidationError { .. })));
    }

    #[test]
    fn test_find_file_in_nested_directories() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let nested_dir = temp_dir.path().join("scrape").join("movies");
        std::fs::create_dir_all(&nested_dir).expect("create nested dir");

        let file_path = nested_dir.join("nested.json");
        std::fs::write(&file_path, "test").expect("write file");

        let found = ProviderLoader::find_file_recursive(temp_dir.path(), "nested.json")
            .expect("search for file");

        assert_eq!(found, Some(file_path));
    }
}
