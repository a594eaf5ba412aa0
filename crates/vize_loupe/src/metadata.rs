//! The metadata model.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use vize_carton::{to_pascal_case, CompactString};
use vize_croquis::PropMap;

use crate::alias::ModuleKind;

/// Registered child components: PascalCase name to absolute file path.
pub type ComponentMap = IndexMap<CompactString, PathBuf>;

/// Props, child components and events of one component or mixin file.
///
/// Child component paths are not followed; their metadata is resolved on
/// demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub props: PropMap,
    pub components: ComponentMap,
    pub events: IndexSet<CompactString>,
}

impl Metadata {
    pub fn is_empty(&self) -> bool {
        self.props.is_empty() && self.components.is_empty() && self.events.is_empty()
    }

    /// Names of props declared `required: true`, in declaration order.
    pub fn required_props(&self) -> Vec<&str> {
        self.props
            .iter()
            .filter(|(_, prop)| prop.required)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Path of a registered child component. `tag` may be written in
    /// kebab-case or PascalCase.
    pub fn component(&self, tag: &str) -> Option<&Path> {
        self.components
            .get(tag)
            .or_else(|| self.components.get(to_pascal_case(tag).as_str()))
            .map(PathBuf::as_path)
    }

    /// Fold in what a mixin contributes. Entries already present are kept, so
    /// with mixins folded in declaration order the first declaration wins.
    pub(crate) fn inherit(&mut self, mixin: &Metadata, kind: ExtractKind) {
        if kind.reads_props() {
            for (name, prop) in &mixin.props {
                self.props.entry(name.clone()).or_insert_with(|| prop.clone());
            }
        }
        for (name, path) in &mixin.components {
            self.components
                .entry(name.clone())
                .or_insert_with(|| path.clone());
        }
        if kind.reads_events() {
            self.events.extend(mixin.events.iter().cloned());
        }
    }
}

/// Which parts of a file an extraction pass reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtractKind {
    /// A single-file component: every option.
    Component,
    /// A script-only mixin. Its `components` are resolved relative to the
    /// mixin file and registered on every component that mixes it in.
    Mixin,
    /// A component read for navigation only: just the components map.
    ComponentsOnly,
}

impl ExtractKind {
    /// Infer the kind of an on-disk file from its extension.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("vue") => ExtractKind::Component,
            _ => ExtractKind::Mixin,
        }
    }

    /// Whether the source is a component file to be split into regions.
    pub fn splits_source(self) -> bool {
        self != ExtractKind::Mixin
    }

    pub fn reads_props(self) -> bool {
        self != ExtractKind::ComponentsOnly
    }

    pub fn reads_events(self) -> bool {
        self != ExtractKind::ComponentsOnly
    }

    /// Stable tag mixed into cache fingerprints.
    pub fn as_str(self) -> &'static str {
        match self {
            ExtractKind::Component => "component",
            ExtractKind::Mixin => "mixin",
            ExtractKind::ComponentsOnly => "components-only",
        }
    }
}

impl From<ModuleKind> for ExtractKind {
    fn from(kind: ModuleKind) -> Self {
        match kind {
            ModuleKind::Component => ExtractKind::Component,
            ModuleKind::Mixin => ExtractKind::Mixin,
        }
    }
}

/// Raw text of one file and where it lives. Dropped as soon as its metadata
/// has been extracted.
#[derive(Debug, Clone)]
pub struct ComponentSource<'a> {
    pub text: Cow<'a, str>,
    pub path: Cow<'a, Path>,
}

impl<'a> ComponentSource<'a> {
    pub fn new(text: impl Into<Cow<'a, str>>, path: impl Into<Cow<'a, Path>>) -> Self {
        Self {
            text: text.into(),
            path: path.into(),
        }
    }

    /// Read a file from disk.
    pub fn read(path: &Path) -> std::io::Result<ComponentSource<'static>> {
        let text = std::fs::read_to_string(path)?;
        Ok(ComponentSource {
            text: Cow::Owned(text),
            path: Cow::Owned(path.to_path_buf()),
        })
    }

    /// File name used to pick the parser dialect of a plain script file.
    pub fn script_filename(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("script.js")
    }
}
