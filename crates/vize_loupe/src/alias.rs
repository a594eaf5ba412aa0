//! Import specifier resolution.
//!
//! A specifier is resolved in three tiers:
//!
//! 1. **Alias** - the longest matching prefix of the merged [`AliasTable`] is
//!    replaced by its root, and the result is resolved against the project root.
//! 2. **Relative** - `./` and `../` specifiers resolve against the importing
//!    file's directory.
//! 3. **Bare** - anything else is left for the dependency directory lookup
//!    (`<root>/node_modules/<specifier>`). This is a heuristic, not a package
//!    resolver: `package.json` fields and `exports` maps are never read.

use std::path::{Component, Path, PathBuf};

use indexmap::IndexMap;
use vize_carton::CompactString;

/// Extensions that are never re-suffixed with a default extension.
pub const KNOWN_EXTENSIONS: [&str; 7] = ["vue", "js", "mjs", "cjs", "ts", "jsx", "tsx"];

/// Default dependency directory name.
pub const DEFAULT_DEPENDENCY_DIR: &str = "node_modules";

/// What a specifier is expected to point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    /// A single-file component (`.vue`).
    Component,
    /// A script-only mixin (`.js`).
    Mixin,
}

impl ModuleKind {
    /// Extension appended to specifiers that carry no known extension.
    pub fn default_extension(self) -> &'static str {
        match self {
            ModuleKind::Component => ".vue",
            ModuleKind::Mixin => ".js",
        }
    }
}

/// Alias prefixes ordered longest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<(String, String)>,
}

impl AliasTable {
    /// Merge editor settings with project configuration. On a shared prefix
    /// the project configuration wins.
    pub fn merged(settings: &IndexMap<String, String>, project: &IndexMap<String, String>) -> Self {
        let mut merged: IndexMap<&str, &str> = IndexMap::new();
        for (prefix, root) in settings.iter().chain(project.iter()) {
            if !prefix.is_empty() {
                merged.insert(prefix, root);
            }
        }

        let mut entries: Vec<(String, String)> = merged
            .into_iter()
            .map(|(prefix, root)| (prefix.to_string(), root.to_string()))
            .collect();
        // Stable: equal lengths keep insertion order.
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { entries }
    }

    /// The alias matching `specifier`, as `(prefix, root)`.
    pub fn lookup(&self, specifier: &str) -> Option<(&str, &str)> {
        self.entries
            .iter()
            .find(|(prefix, _)| specifier.starts_with(prefix.as_str()))
            .map(|(prefix, root)| (prefix.as_str(), root.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, r)| (p.as_str(), r.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of resolving a specifier without touching the file system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// An absolute path, default extension applied.
    Path(PathBuf),
    /// A bare module specifier, default extension applied.
    Bare(CompactString),
}

/// Resolves import specifiers for one request.
#[derive(Debug, Clone)]
pub struct AliasResolver {
    root: PathBuf,
    aliases: AliasTable,
    dependency_dir: String,
}

impl AliasResolver {
    pub fn new(root: impl Into<PathBuf>, aliases: AliasTable) -> Self {
        Self {
            root: root.into(),
            aliases,
            dependency_dir: DEFAULT_DEPENDENCY_DIR.to_string(),
        }
    }

    pub fn with_dependency_dir(mut self, dir: impl Into<String>) -> Self {
        self.dependency_dir = dir.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Resolve `specifier` imported from `importer`, without probing the file
    /// system.
    pub fn resolve(&self, specifier: &str, importer: &Path, kind: ModuleKind) -> Resolution {
        let relative = is_relative(specifier);
        // `.` and `..` name a directory; import its index module.
        let specifier = match specifier {
            "." | ".." => with_default_extension(&format!("{specifier}/index"), kind),
            _ => with_default_extension(specifier, kind),
        };

        if let Some((prefix, root)) = self.aliases.lookup(&specifier) {
            let replaced = format!("{}{}", root, &specifier[prefix.len()..]);
            return Resolution::Path(normalize_path(&self.root.join(replaced)));
        }

        if relative {
            let dir = importer.parent().unwrap_or(Path::new(""));
            return Resolution::Path(normalize_path(&dir.join(specifier.as_str())));
        }

        Resolution::Bare(specifier)
    }

    /// Resolve `specifier` to an existing file.
    ///
    /// Candidates, in order: the resolved path, its `index` file when the
    /// extension was defaulted, then both again under the dependency directory.
    pub fn locate(&self, specifier: &str, importer: &Path, kind: ModuleKind) -> Option<PathBuf> {
        let specifier = specifier.trim_end_matches('/');
        let defaulted = !has_known_extension(specifier);

        let primary = match self.resolve(specifier, importer, kind) {
            Resolution::Path(path) => path,
            Resolution::Bare(name) => self.root.join(&self.dependency_dir).join(name.as_str()),
        };
        let fallback = self.dependency_fallback(&primary);

        let found = std::iter::once(primary)
            .chain(fallback)
            .flat_map(|base| {
                let index = defaulted.then(|| index_candidate(&base, kind));
                std::iter::once(base).chain(index)
            })
            .find(|candidate| candidate.is_file());

        if found.is_none() {
            tracing::debug!(
                "unresolved {:?} specifier '{}' from {}",
                kind,
                specifier,
                importer.display()
            );
        }
        found
    }

    /// `<root>/a/b` -> `<root>/node_modules/a/b`, for paths inside the project
    /// that are not already under the dependency directory.
    fn dependency_fallback(&self, path: &Path) -> Option<PathBuf> {
        let relative = path.strip_prefix(&self.root).ok()?;
        if relative.starts_with(&self.dependency_dir) {
            return None;
        }
        Some(self.root.join(&self.dependency_dir).join(relative))
    }
}

/// `./Foo.vue` for `./Foo` -> `./Foo/index.vue`.
fn index_candidate(path: &Path, kind: ModuleKind) -> PathBuf {
    let stem = path
        .to_string_lossy()
        .strip_suffix(kind.default_extension())
        .map(PathBuf::from)
        .unwrap_or_else(|| path.to_path_buf());
    stem.join(format!("index{}", kind.default_extension()))
}

fn is_relative(specifier: &str) -> bool {
    matches!(specifier, "." | "..") || specifier.starts_with("./") || specifier.starts_with("../")
}

fn has_known_extension(specifier: &str) -> bool {
    Path::new(specifier)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| KNOWN_EXTENSIONS.contains(&ext))
}

fn with_default_extension(specifier: &str, kind: ModuleKind) -> CompactString {
    if has_known_extension(specifier) {
        CompactString::new(specifier)
    } else {
        let mut out = CompactString::new(specifier);
        out.push_str(kind.default_extension());
        out
    }
}

/// Lexically normalize `.` and `..` components.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !out.has_root() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(aliases: &[(&str, &str)]) -> AliasResolver {
        let settings: IndexMap<String, String> = aliases
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AliasResolver::new("/project", AliasTable::merged(&settings, &IndexMap::new()))
    }

    #[test]
    fn test_alias_resolution_appends_extension() {
        let resolver = resolver(&[("@/", "/project/src/")]);
        assert_eq!(
            resolver.resolve(
                "@/components/Foo",
                Path::new("/project/src/pages/Bar.vue"),
                ModuleKind::Component
            ),
            Resolution::Path(PathBuf::from("/project/src/components/Foo.vue"))
        );
    }

    #[test]
    fn test_relative_alias_root_joins_project_root() {
        let resolver = resolver(&[("@/", "src/")]);
        assert_eq!(
            resolver.resolve("@/mixins/form", Path::new("/elsewhere/X.vue"), ModuleKind::Mixin),
            Resolution::Path(PathBuf::from("/project/src/mixins/form.js"))
        );
    }

    #[test]
    fn test_relative_resolution() {
        let resolver = resolver(&[]);
        assert_eq!(
            resolver.resolve(
                "../shared/Mix",
                Path::new("/project/src/pages/Bar.vue"),
                ModuleKind::Mixin
            ),
            Resolution::Path(PathBuf::from("/project/src/shared/Mix.js"))
        );
        assert_eq!(
            resolver.resolve("./Card.vue", Path::new("/project/src/pages/Bar.vue"), ModuleKind::Component),
            Resolution::Path(PathBuf::from("/project/src/pages/Card.vue"))
        );
    }

    #[test]
    fn test_directory_specifiers_resolve_to_index() {
        let resolver = resolver(&[]);
        let importer = Path::new("/project/src/pages/Bar.vue");
        assert_eq!(
            resolver.resolve("..", importer, ModuleKind::Mixin),
            Resolution::Path(PathBuf::from("/project/src/index.js"))
        );
        assert_eq!(
            resolver.resolve(".", importer, ModuleKind::Component),
            Resolution::Path(PathBuf::from("/project/src/pages/index.vue"))
        );
    }

    #[test]
    fn test_bare_specifier_is_left_unresolved() {
        let resolver = resolver(&[("@/", "src/")]);
        assert_eq!(
            resolver.resolve("ui-kit/Button", Path::new("/project/src/A.vue"), ModuleKind::Component),
            Resolution::Bare("ui-kit/Button.vue".into())
        );
    }

    #[test]
    fn test_known_extensions_are_kept() {
        let resolver = resolver(&[]);
        let importer = Path::new("/project/src/A.vue");
        assert_eq!(
            resolver.resolve("./mixin.ts", importer, ModuleKind::Mixin),
            Resolution::Path(PathBuf::from("/project/src/mixin.ts"))
        );
        assert_eq!(
            resolver.resolve("./user.mixin", importer, ModuleKind::Mixin),
            Resolution::Path(PathBuf::from("/project/src/user.mixin.js"))
        );
    }

    #[test]
    fn test_longest_prefix_wins() {
        let resolver = resolver(&[("@/", "src/"), ("@/components/", "ui/")]);
        assert_eq!(
            resolver.resolve("@/components/Foo", Path::new("/project/A.vue"), ModuleKind::Component),
            Resolution::Path(PathBuf::from("/project/ui/Foo.vue"))
        );
    }

    #[test]
    fn test_project_config_overrides_settings() {
        let settings: IndexMap<String, String> =
            [("@/".to_string(), "settings/".to_string())].into_iter().collect();
        let project: IndexMap<String, String> =
            [("@/".to_string(), "src/".to_string())].into_iter().collect();
        let table = AliasTable::merged(&settings, &project);
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("@/x"), Some(("@/", "src/")));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("/a/b/./c/../d")),
            PathBuf::from("/a/b/d")
        );
        assert_eq!(normalize_path(Path::new("../x")), PathBuf::from("../x"));
    }

    #[test]
    fn test_locate_tries_index_and_dependency_dir() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("src/components/Table")).unwrap();
        std::fs::create_dir_all(root.join("node_modules/ui-kit")).unwrap();
        std::fs::write(root.join("src/components/Table/index.vue"), "").unwrap();
        std::fs::write(root.join("src/components/Card.vue"), "").unwrap();
        std::fs::write(root.join("node_modules/ui-kit/Button.vue"), "").unwrap();

        let settings: IndexMap<String, String> =
            [("@/".to_string(), "src/".to_string())].into_iter().collect();
        let resolver = AliasResolver::new(root, AliasTable::merged(&settings, &IndexMap::new()));
        let importer = root.join("src/App.vue");

        assert_eq!(
            resolver.locate("@/components/Card", &importer, ModuleKind::Component),
            Some(root.join("src/components/Card.vue"))
        );
        assert_eq!(
            resolver.locate("./components/Table", &importer, ModuleKind::Component),
            Some(root.join("src/components/Table/index.vue"))
        );
        assert_eq!(
            resolver.locate("ui-kit/Button", &importer, ModuleKind::Component),
            Some(root.join("node_modules/ui-kit/Button.vue"))
        );
        assert_eq!(
            resolver.locate("./Missing", &importer, ModuleKind::Component),
            None
        );
    }

    #[test]
    fn test_locate_parent_directory_index() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("src/pages")).unwrap();
        std::fs::write(root.join("src/index.js"), "").unwrap();

        let resolver = AliasResolver::new(root, AliasTable::default());
        let importer = root.join("src/pages/Bar.vue");
        for specifier in ["..", "../"] {
            assert_eq!(
                resolver.locate(specifier, &importer, ModuleKind::Mixin),
                Some(root.join("src/index.js"))
            );
        }
    }
}
