//! Editor settings and project configuration.
//!
//! Two sources contribute path aliases:
//!
//! - [`Settings`] - the editor's `vueComponent` settings section, handed to
//!   every request as an immutable snapshot
//! - [`ProjectConfig`] - `compilerOptions.paths` of `jsconfig.json` (or
//!   `tsconfig.json`) at the project root

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::{LoupeError, LoupeResult};

/// Project configuration files, in lookup order.
pub const PROJECT_CONFIG_FILES: [&str; 2] = ["jsconfig.json", "tsconfig.json"];

/// Editor-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Alias prefix to replacement root, e.g. `"@/": "src/"`.
    pub aliases: IndexMap<String, String>,

    /// Glob of files hidden from component discovery. Carried for the host's
    /// file discovery; resolution itself never consults it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
}

impl Settings {
    /// Parse the settings section from its JSON form.
    pub fn from_json(json: &str) -> LoupeResult<Self> {
        serde_json::from_str(json).map_err(|e| LoupeError::config("settings", e))
    }

    pub fn with_alias(mut self, prefix: impl Into<String>, root: impl Into<String>) -> Self {
        self.aliases.insert(prefix.into(), root.into());
        self
    }
}

/// Aliases declared by the project's `jsconfig.json` / `tsconfig.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    /// The file the aliases were read from.
    pub path: Option<PathBuf>,
    pub aliases: IndexMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawProjectConfig {
    compiler_options: RawCompilerOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawCompilerOptions {
    base_url: Option<String>,
    paths: IndexMap<String, Vec<String>>,
}

impl ProjectConfig {
    /// Locate the project configuration file under `root`.
    pub fn find(root: &Path) -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(|name| root.join(name))
            .find(|path| path.is_file())
    }

    /// Read and parse the configuration file under `root`. A project without
    /// one has no aliases.
    pub fn load(root: &Path) -> LoupeResult<Self> {
        let Some(path) = Self::find(root) else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(&path).map_err(|e| LoupeError::io(&path, e))?;
        let mut config = Self::parse(&content).map_err(|e| match e {
            LoupeError::Config { message, .. } => {
                LoupeError::config(path.display().to_string(), message)
            }
            other => other,
        })?;
        config.path = Some(path);
        Ok(config)
    }

    /// Parse configuration text.
    ///
    /// `"@/*": ["src/*"]` becomes prefix `"@/"` with root `"src/"`: the first
    /// target wins and `*` is dropped from both sides. A `baseUrl` is
    /// prefixed to every target.
    pub fn parse(content: &str) -> LoupeResult<Self> {
        let raw: RawProjectConfig =
            serde_json::from_str(content).map_err(|e| LoupeError::config("project config", e))?;

        let base_url = raw
            .compiler_options
            .base_url
            .as_deref()
            .map(|base| base.trim_start_matches("./"))
            .filter(|base| !base.is_empty() && *base != ".");

        let aliases = raw
            .compiler_options
            .paths
            .into_iter()
            .filter_map(|(pattern, targets)| {
                let target = targets.into_iter().next()?;
                let prefix = pattern.replacen('*', "", 1);
                let root = target.replacen('*', "", 1);
                let root = match base_url {
                    Some(base) => format!("{}/{}", base.trim_end_matches('/'), root),
                    None => root,
                };
                Some((prefix, root))
            })
            .collect();

        Ok(Self {
            path: None,
            aliases,
        })
    }
}

struct CachedConfig {
    path: PathBuf,
    modified: Option<SystemTime>,
    config: Arc<ProjectConfig>,
}

/// Project configuration, re-read only when the file changes.
#[derive(Default)]
pub struct ProjectConfigCache {
    cached: Mutex<Option<CachedConfig>>,
}

impl ProjectConfigCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current configuration for `root`. A missing or malformed file yields an
    /// empty configuration.
    pub fn get(&self, root: &Path) -> Arc<ProjectConfig> {
        let Some(path) = ProjectConfig::find(root) else {
            *self.cached.lock() = None;
            return Arc::default();
        };
        let modified = std::fs::metadata(&path).and_then(|m| m.modified()).ok();

        if let Some(cached) = self.cached.lock().as_ref() {
            if cached.path == path && cached.modified.is_some() && cached.modified == modified {
                return Arc::clone(&cached.config);
            }
        }

        let config = match ProjectConfig::load(root) {
            Ok(config) => Arc::new(config),
            Err(e) => {
                tracing::warn!("ignoring project config: {}", e);
                Arc::new(ProjectConfig {
                    path: Some(path.clone()),
                    ..Default::default()
                })
            }
        };

        *self.cached.lock() = Some(CachedConfig {
            path,
            modified,
            config: Arc::clone(&config),
        });
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_json() {
        let settings = Settings::from_json(
            r#"{ "aliases": { "@/": "src/", "~/": "/abs/root/" }, "exclude": "**/node_modules/**" }"#,
        )
        .unwrap();
        assert_eq!(settings.aliases.get("@/").map(String::as_str), Some("src/"));
        assert_eq!(settings.aliases.len(), 2);
        assert_eq!(settings.exclude.as_deref(), Some("**/node_modules/**"));

        let empty = Settings::from_json("{}").unwrap();
        assert_eq!(empty, Settings::default());

        assert!(matches!(
            Settings::from_json("{ \"aliases\": 1 }"),
            Err(LoupeError::Config { .. })
        ));
    }

    #[test]
    fn test_parse_paths() {
        let config = ProjectConfig::parse(
            r##"{
  "compilerOptions": {
    "paths": {
      "@/*": ["src/*", "lib/*"],
      "#shared/*": ["shared/*"],
      "empty": []
    }
  }
}"##,
        )
        .unwrap();

        let aliases: Vec<_> = config
            .aliases
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(aliases, vec![("@/", "src/"), ("#shared/", "shared/")]);
    }

    #[test]
    fn test_parse_base_url() {
        let config = ProjectConfig::parse(
            r#"{ "compilerOptions": { "baseUrl": "./app", "paths": { "@/*": ["src/*"] } } }"#,
        )
        .unwrap();
        assert_eq!(config.aliases.get("@/").map(String::as_str), Some("app/src/"));

        let config = ProjectConfig::parse(
            r#"{ "compilerOptions": { "baseUrl": ".", "paths": { "@/*": ["src/*"] } } }"#,
        )
        .unwrap();
        assert_eq!(config.aliases.get("@/").map(String::as_str), Some("src/"));
    }

    #[test]
    fn test_parse_without_paths() {
        let config = ProjectConfig::parse(r#"{ "include": ["src"] }"#).unwrap();
        assert!(config.aliases.is_empty());
        assert!(ProjectConfig::parse("not json").is_err());
    }

    #[test]
    fn test_load_prefers_jsconfig() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("tsconfig.json"),
            r#"{ "compilerOptions": { "paths": { "~/*": ["ts/*"] } } }"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("jsconfig.json"),
            r#"{ "compilerOptions": { "paths": { "@/*": ["src/*"] } } }"#,
        )
        .unwrap();

        let config = ProjectConfig::load(dir.path()).unwrap();
        assert_eq!(config.path, Some(dir.path().join("jsconfig.json")));
        assert!(config.aliases.contains_key("@/"));
        assert!(!config.aliases.contains_key("~/"));
    }

    #[test]
    fn test_cache_tolerates_missing_and_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ProjectConfigCache::new();
        assert!(cache.get(dir.path()).aliases.is_empty());

        std::fs::write(dir.path().join("jsconfig.json"), "{ broken").unwrap();
        let config = cache.get(dir.path());
        assert!(config.aliases.is_empty());
        assert_eq!(config.path, Some(dir.path().join("jsconfig.json")));
    }

    #[test]
    fn test_cache_reuses_unchanged_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("jsconfig.json"),
            r#"{ "compilerOptions": { "paths": { "@/*": ["src/*"] } } }"#,
        )
        .unwrap();

        let cache = ProjectConfigCache::new();
        let first = cache.get(dir.path());
        let second = cache.get(dir.path());
        assert!(Arc::ptr_eq(&first, &second));
    }
}
