//! Metadata extraction for a single file.
//!
//! One pass, parameterized by [`ExtractKind`]:
//!
//! 1. Split the component into regions (mixins are all script).
//! 2. Parse the script and locate `export default { ... }`.
//! 3. Fold in `extends` and `mixins`, each resolved through the
//!    [`MetadataProvider`] so nested results are shared.
//! 4. Apply local `props` over the inherited ones.
//! 5. Apply local `components` over the inherited ones, mixins included.
//! 6. Union declared `emits` and scanned `$emit('...')` names.
//!
//! The allocator, AST and split regions are dropped before returning.

use std::path::Path;
use std::sync::Arc;

use oxc_allocator::Allocator;
use vize_atelier_sfc::split_component;
use vize_croquis::{
    interpret_components, interpret_emits, interpret_extends, interpret_mixins, interpret_props,
    scan_emitted_event_names, ComponentTarget, ScriptAst,
};

use crate::alias::{AliasResolver, ModuleKind};
use crate::error::{LoupeError, LoupeResult};
use crate::metadata::{ComponentSource, ExtractKind, Metadata};

/// Access to the resolver and to mixin metadata during extraction.
pub trait MetadataProvider {
    fn resolver(&self) -> &AliasResolver;

    /// Metadata of the mixin file at `path`, or `None` when it cannot be
    /// read or is already being resolved further up the chain.
    fn mixin_metadata(&self, path: &Path) -> Option<Arc<Metadata>>;
}

/// Extract metadata from `source`.
///
/// Returns an error when the source cannot be split, the script does not
/// parse, or no default-exported options object exists. Unresolvable mixins
/// and components are skipped.
pub fn extract(
    source: &ComponentSource<'_>,
    kind: ExtractKind,
    provider: &dyn MetadataProvider,
) -> LoupeResult<Metadata> {
    let text: &str = &source.text;

    let (script, filename) = if kind.splits_source() {
        let regions = split_component(text)?;
        let filename = regions.script.virtual_filename();
        (regions.script.content, filename)
    } else {
        (text.into(), source.script_filename())
    };

    let allocator = Allocator::default();
    let ast = ScriptAst::parse(&allocator, &script, filename)?;
    let options = ast
        .default_export_options()
        .ok_or(LoupeError::NoDefaultExport)?;

    let resolver = provider.resolver();
    let importer: &Path = &source.path;
    let mut metadata = Metadata::default();

    // `extends` behaves as the first mixin.
    let mixin_names = options
        .option("extends")
        .and_then(|value| interpret_extends(&value))
        .into_iter()
        .chain(
            options
                .option("mixins")
                .map(|value| interpret_mixins(&value))
                .unwrap_or_default(),
        );

    for name in mixin_names {
        let Some(import) = ast.import_for(&name) else {
            tracing::debug!("mixin '{}' is not imported in {}", name, importer.display());
            continue;
        };
        let Some(path) = resolver.locate(&import.specifier, importer, ModuleKind::Mixin) else {
            continue;
        };
        if let Some(mixin) = provider.mixin_metadata(&path) {
            metadata.inherit(&mixin, kind);
        }
    }

    if kind.reads_props() {
        if let Some(value) = options.option("props") {
            metadata.props.extend(interpret_props(&value));
        }
    }

    if let Some(value) = options.option("components") {
        for binding in interpret_components(&value) {
            let specifier = match &binding.target {
                ComponentTarget::Local(local) => match ast.import_for(local) {
                    Some(import) => import.specifier,
                    None => {
                        tracing::debug!(
                            "component '{}' is not imported in {}",
                            binding.name,
                            importer.display()
                        );
                        continue;
                    }
                },
                ComponentTarget::Specifier(specifier) => specifier.clone(),
            };
            if let Some(path) = resolver.locate(&specifier, importer, ModuleKind::Component) {
                metadata.components.insert(binding.name, path);
            }
        }
    }

    if kind.reads_events() {
        if let Some(value) = options.option("emits") {
            metadata.events.extend(interpret_emits(&value));
        }
        // The whole file: templates emit too (`@click="$emit('close')"`).
        metadata.events.extend(scan_emitted_event_names(text));
    }

    tracing::trace!(
        "extracted {} props, {} components, {} events from {}",
        metadata.props.len(),
        metadata.components.len(),
        metadata.events.len(),
        importer.display()
    );
    Ok(metadata)
}
