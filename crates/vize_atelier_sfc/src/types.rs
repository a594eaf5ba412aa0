//! SFC type definitions.
//!
//! Zero-copy design using borrowed strings; block contents are slices of the
//! original source.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use vize_carton::FxHashMap;

/// Attribute map of a block's opening tag.
pub type BlockAttrs<'a> = FxHashMap<Cow<'a, str>, Cow<'a, str>>;

/// SFC Descriptor - every top-level block found in a `.vue` file.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SfcDescriptor<'a> {
    /// Template block
    pub template: Option<SfcBlock<'a>>,

    /// Script block (options API or <script> without setup)
    pub script: Option<SfcScriptBlock<'a>>,

    /// Script setup block
    pub script_setup: Option<SfcScriptBlock<'a>>,

    /// Style blocks
    pub styles: Vec<SfcBlock<'a>>,

    /// Tag names of custom blocks (e.g. `i18n`, `docs`)
    pub custom_blocks: Vec<Cow<'a, str>>,
}

impl<'a> SfcDescriptor<'a> {
    /// Reduce the descriptor to the regions metadata extraction needs.
    ///
    /// A plain `<script>` is preferred; `<script setup>` is used only when no
    /// plain script exists. Fails when neither is present.
    pub fn into_regions(self) -> Result<SfcRegions<'a>, SfcError> {
        let script = match (self.script, self.script_setup) {
            (Some(script), _) => script,
            (None, Some(setup)) => setup,
            (None, None) => {
                return Err(SfcError::new(
                    "SFC has no <script> block",
                    SfcErrorCode::MissingScript,
                    None,
                ))
            }
        };

        Ok(SfcRegions {
            template: self.template,
            script,
            styles: self.styles,
        })
    }
}

/// The template, script and style regions of one component source.
#[derive(Debug, Clone)]
pub struct SfcRegions<'a> {
    pub template: Option<SfcBlock<'a>>,
    pub script: SfcScriptBlock<'a>,
    pub styles: Vec<SfcBlock<'a>>,
}

/// Template, style, or any other non-script block.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SfcBlock<'a> {
    /// Block content
    pub content: Cow<'a, str>,

    /// Block location in source
    pub loc: BlockLocation,

    /// Block language (`lang` attribute)
    pub lang: Option<Cow<'a, str>>,

    /// Additional attributes
    pub attrs: BlockAttrs<'a>,
}

/// Script block
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SfcScriptBlock<'a> {
    /// Block content
    pub content: Cow<'a, str>,

    /// Block location in source
    pub loc: BlockLocation,

    /// Script language (js/ts/tsx/jsx)
    pub lang: Option<Cow<'a, str>>,

    /// Source attribute for external script
    pub src: Option<Cow<'a, str>>,

    /// Whether this is script setup
    pub setup: bool,

    /// Additional attributes
    pub attrs: BlockAttrs<'a>,
}

impl SfcScriptBlock<'_> {
    /// Whether the script should be parsed as TypeScript.
    pub fn is_ts(&self) -> bool {
        matches!(self.lang.as_deref(), Some("ts" | "tsx"))
    }

    /// Virtual file name carrying the script language, for parsers that pick
    /// their dialect from an extension.
    pub fn virtual_filename(&self) -> &'static str {
        match self.lang.as_deref() {
            Some("ts") => "script.ts",
            Some("tsx") => "script.tsx",
            _ => "script.jsx",
        }
    }
}

/// Location information for a block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockLocation {
    /// Start offset of the content in source
    pub start: usize,

    /// End offset of the content in source
    pub end: usize,

    /// Start line of the opening tag (1-based)
    pub start_line: usize,

    /// End line of the closing tag (1-based)
    pub end_line: usize,
}

/// Machine-readable SFC error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SfcErrorCode {
    DuplicateTemplate,
    DuplicateScript,
    DuplicateScriptSetup,
    MissingScript,
}

/// SFC error
#[derive(Debug, Clone, thiserror::Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct SfcError {
    /// Error message
    pub message: String,

    /// Error code
    pub code: SfcErrorCode,

    /// Location
    #[serde(default)]
    pub loc: Option<BlockLocation>,
}

impl SfcError {
    pub(crate) fn new(
        message: impl Into<String>,
        code: SfcErrorCode,
        loc: Option<BlockLocation>,
    ) -> Self {
        Self {
            message: message.into(),
            code,
            loc,
        }
    }
}
