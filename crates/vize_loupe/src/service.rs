//! The resolution service: cached metadata lookups for files and buffers.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::UNIX_EPOCH;

use vize_carton::Fingerprint;

use crate::alias::{AliasResolver, AliasTable, DEFAULT_DEPENDENCY_DIR};
use crate::cache::{CacheStats, FingerprintCache};
use crate::config::{ProjectConfigCache, Settings};
use crate::extract::{extract, MetadataProvider};
use crate::metadata::{ComponentSource, ExtractKind, Metadata};

/// Default capacity of the on-disk file cache.
pub const DEFAULT_FILE_CACHE_CAPACITY: usize = 100;

/// Default capacity of the editor buffer cache.
pub const DEFAULT_BUFFER_CACHE_CAPACITY: usize = 10;

/// Construction options of a [`ResolutionService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceOptions {
    /// Root that aliases and the dependency directory are resolved against.
    pub project_root: PathBuf,
    pub file_cache_capacity: usize,
    pub buffer_cache_capacity: usize,
    /// Directory under the project root holding third-party packages.
    pub dependency_dir: String,
}

impl ServiceOptions {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            file_cache_capacity: DEFAULT_FILE_CACHE_CAPACITY,
            buffer_cache_capacity: DEFAULT_BUFFER_CACHE_CAPACITY,
            dependency_dir: DEFAULT_DEPENDENCY_DIR.to_string(),
        }
    }

    pub fn with_file_cache_capacity(mut self, capacity: usize) -> Self {
        self.file_cache_capacity = capacity;
        self
    }

    pub fn with_buffer_cache_capacity(mut self, capacity: usize) -> Self {
        self.buffer_cache_capacity = capacity;
        self
    }

    pub fn with_dependency_dir(mut self, dir: impl Into<String>) -> Self {
        self.dependency_dir = dir.into();
        self
    }
}

/// Cached metadata resolution for one project.
///
/// Every lookup returns metadata, empty when the file is missing or cannot be
/// analyzed. Results are shared: two lookups with the same fingerprint return
/// the same `Arc`.
///
/// An entry remembers the fingerprints of every mixin folded into it, directly
/// or through other mixins. Editing one of those files on disk invalidates the
/// entry on its next lookup.
///
/// Inside a mixin cycle the file entered first sees the whole chain; the files
/// entered after it see it only partially. Those partial results are returned
/// to the current call but never cached.
///
/// The caches are the only shared state; the service is `Send + Sync` and may
/// be queried from several threads.
pub struct ResolutionService {
    options: ServiceOptions,
    files: FingerprintCache<Arc<Entry>>,
    buffers: FingerprintCache<Arc<Entry>>,
    project_config: ProjectConfigCache,
}

impl ResolutionService {
    pub fn new(options: ServiceOptions) -> Self {
        Self {
            files: FingerprintCache::new("file", options.file_cache_capacity),
            buffers: FingerprintCache::new("buffer", options.buffer_cache_capacity),
            project_config: ProjectConfigCache::new(),
            options,
        }
    }

    pub fn options(&self) -> &ServiceOptions {
        &self.options
    }

    /// Metadata of an on-disk file. `.vue` files are read as components,
    /// anything else as a mixin.
    pub fn resolve_file(&self, path: &Path, settings: &Settings) -> Arc<Metadata> {
        self.resolve_file_as(path, ExtractKind::for_path(path), settings)
    }

    /// Metadata of an on-disk file read as `kind`.
    pub fn resolve_file_as(&self, path: &Path, kind: ExtractKind, settings: &Settings) -> Arc<Metadata> {
        self.request(settings)
            .file(path, kind)
            .map(|(_, entry)| entry.metadata.clone())
            .unwrap_or_default()
    }

    /// Components map of the document being edited, which may be unsaved.
    /// `path` locates the document for relative imports.
    pub fn resolve_buffer(&self, text: &str, path: &Path, settings: &Settings) -> Arc<Metadata> {
        self.request(settings).buffer(text, path).metadata.clone()
    }

    /// Path of the child component `tag` registered by the edited document.
    pub fn component_path(
        &self,
        text: &str,
        path: &Path,
        tag: &str,
        settings: &Settings,
    ) -> Option<PathBuf> {
        self.resolve_buffer(text, path, settings)
            .component(tag)
            .map(Path::to_path_buf)
    }

    /// Full metadata of the child component `tag` registered by the edited
    /// document. The child is read by its extension, like [`resolve_file`].
    ///
    /// [`resolve_file`]: Self::resolve_file
    pub fn component_metadata(
        &self,
        text: &str,
        path: &Path,
        tag: &str,
        settings: &Settings,
    ) -> Option<Arc<Metadata>> {
        let request = self.request(settings);
        let buffer = request.buffer(text, path);
        let child = buffer.metadata.component(tag)?;
        request
            .file(child, ExtractKind::for_path(child))
            .map(|(_, entry)| entry.metadata.clone())
    }

    /// The resolver a request with `settings` would use.
    pub fn alias_resolver(&self, settings: &Settings) -> AliasResolver {
        let project = self.project_config.get(&self.options.project_root);
        let aliases = AliasTable::merged(&settings.aliases, &project.aliases);
        AliasResolver::new(&self.options.project_root, aliases)
            .with_dependency_dir(&self.options.dependency_dir)
    }

    pub fn file_cache_stats(&self) -> CacheStats {
        self.files.stats()
    }

    pub fn buffer_cache_stats(&self) -> CacheStats {
        self.buffers.stats()
    }

    /// Drop every cached result.
    pub fn clear(&self) {
        self.files.clear();
        self.buffers.clear();
    }

    fn request(&self, settings: &Settings) -> Request<'_> {
        Request {
            service: self,
            resolver: self.alias_resolver(settings),
            stack: RefCell::new(Vec::new()),
        }
    }
}

/// A cached result and the mixin files it was folded from.
#[derive(Debug, Default)]
struct Entry {
    metadata: Arc<Metadata>,
    mixins: Vec<(PathBuf, Fingerprint)>,
}

impl Entry {
    /// Whether every folded mixin still has the fingerprint it was read with.
    fn is_current(&self) -> bool {
        self.mixins
            .iter()
            .all(|(path, key)| file_key(path, ExtractKind::Mixin) == Some(*key))
    }
}

/// Fingerprint of an on-disk file read as `kind`: its mtime, path and kind.
/// `None` when the file does not exist.
fn file_key(path: &Path, kind: ExtractKind) -> Option<Fingerprint> {
    let stat = std::fs::metadata(path).ok().filter(|stat| stat.is_file())?;
    let mtime = stat
        .modified()
        .ok()
        .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    Some(
        Fingerprint::builder()
            .u128(mtime)
            .str(&path.to_string_lossy())
            .str(kind.as_str())
            .finish(),
    )
}

/// One file being extracted.
#[derive(Default)]
struct Frame {
    path: PathBuf,
    mixins: Vec<(PathBuf, Fingerprint)>,
    /// A mixin cycle cut this extraction short.
    partial: bool,
}

/// State of one public call: the resolver built from that call's settings
/// snapshot and the files currently being extracted.
struct Request<'s> {
    service: &'s ResolutionService,
    resolver: AliasResolver,
    stack: RefCell<Vec<Frame>>,
}

impl Request<'_> {
    /// `None` when the file does not exist.
    fn file(&self, path: &Path, kind: ExtractKind) -> Option<(Fingerprint, Arc<Entry>)> {
        let Some(key) = file_key(path, kind) else {
            tracing::debug!("missing file {}", path.display());
            return None;
        };

        let entry = self.service.files.get_or_refresh(
            key,
            |entry| entry.is_current(),
            || {
                let source = match ComponentSource::read(path) {
                    Ok(source) => source,
                    Err(e) => {
                        tracing::warn!("failed to read {}: {}", path.display(), e);
                        return (Arc::default(), true);
                    }
                };
                self.extract_guarded(&source, kind)
            },
        );
        Some((key, entry))
    }

    fn buffer(&self, text: &str, path: &Path) -> Arc<Entry> {
        let key = Fingerprint::builder()
            .str(text)
            .str(&path.to_string_lossy())
            .finish();

        self.service.buffers.get_or_refresh(
            key,
            |entry| entry.is_current(),
            || {
                let source = ComponentSource::new(text, path);
                self.extract_guarded(&source, ExtractKind::ComponentsOnly)
            },
        )
    }

    /// Extract with `source` on the resolution stack, degrading any failure
    /// to empty metadata. The flag is false when the result must not be
    /// cached.
    fn extract_guarded(&self, source: &ComponentSource<'_>, kind: ExtractKind) -> (Arc<Entry>, bool) {
        self.stack.borrow_mut().push(Frame {
            path: source.path.to_path_buf(),
            ..Default::default()
        });
        let result = extract(source, kind, self);
        let frame = self.stack.borrow_mut().pop().unwrap_or_default();

        let metadata = match result {
            Ok(metadata) => Arc::new(metadata),
            Err(e) => {
                tracing::debug!("no metadata for {}: {}", source.path.display(), e);
                Arc::default()
            }
        };
        if frame.partial {
            tracing::debug!("not caching {}: inside a mixin cycle", source.path.display());
        }
        let entry = Entry {
            metadata,
            mixins: frame.mixins,
        };
        (Arc::new(entry), !frame.partial)
    }
}

impl MetadataProvider for Request<'_> {
    fn resolver(&self) -> &AliasResolver {
        &self.resolver
    }

    fn mixin_metadata(&self, path: &Path) -> Option<Arc<Metadata>> {
        {
            let mut stack = self.stack.borrow_mut();
            if let Some(start) = stack.iter().position(|frame| frame.path == path) {
                for frame in &mut stack[start + 1..] {
                    frame.partial = true;
                }
                tracing::warn!("mixin cycle through {}, skipping", path.display());
                return None;
            }
        }

        let (key, entry) = self.file(path, ExtractKind::Mixin)?;
        if let Some(frame) = self.stack.borrow_mut().last_mut() {
            frame.mixins.push((path.to_path_buf(), key));
            frame.mixins.extend(entry.mixins.iter().cloned());
        }
        Some(entry.metadata.clone())
    }
}
