//! SFC block scanner.
//!
//! Byte-level scan of the top level of a `.vue` file. Only block boundaries
//! and opening-tag attributes are read; contents are borrowed untouched.

use crate::types::*;
use memchr::{memchr, memmem};
use std::borrow::Cow;

const CLOSING_TEMPLATE: &[u8] = b"</template>";
const CLOSING_SCRIPT: &[u8] = b"</script>";
const CLOSING_STYLE: &[u8] = b"</style>";

const TAG_TEMPLATE: &[u8] = b"template";
const TAG_SCRIPT: &[u8] = b"script";
const TAG_STYLE: &[u8] = b"style";

/// Split a component source into its template, script and style regions.
///
/// Fails when the source has no script block at all.
pub fn split_component(source: &str) -> Result<SfcRegions<'_>, SfcError> {
    parse_sfc(source)?.into_regions()
}

/// Parse a Vue SFC into a descriptor with zero-copy strings
pub fn parse_sfc(source: &str) -> Result<SfcDescriptor<'_>, SfcError> {
    let mut descriptor = SfcDescriptor::default();
    let mut scanner = Scanner::new(source);

    while let Some(block) = scanner.next_block() {
        let loc = block.loc.clone();

        if tag_name_eq(block.tag, TAG_TEMPLATE) {
            if descriptor.template.is_some() {
                return Err(SfcError::new(
                    "SFC can only contain one <template> block",
                    SfcErrorCode::DuplicateTemplate,
                    Some(loc),
                ));
            }
            descriptor.template = Some(block.into_block());
        } else if tag_name_eq(block.tag, TAG_SCRIPT) {
            let script = block.into_script();
            if script.setup {
                if descriptor.script_setup.is_some() {
                    return Err(SfcError::new(
                        "SFC can only contain one <script setup> block",
                        SfcErrorCode::DuplicateScriptSetup,
                        Some(loc),
                    ));
                }
                descriptor.script_setup = Some(script);
            } else {
                if descriptor.script.is_some() {
                    return Err(SfcError::new(
                        "SFC can only contain one <script> block",
                        SfcErrorCode::DuplicateScript,
                        Some(loc),
                    ));
                }
                descriptor.script = Some(script);
            }
        } else if tag_name_eq(block.tag, TAG_STYLE) {
            descriptor.styles.push(block.into_block());
        } else {
            descriptor.custom_blocks.push(Cow::Borrowed(block.tag_str()));
        }
    }

    Ok(descriptor)
}

/// One top-level block as found by the scanner.
struct RawBlock<'a> {
    tag: &'a [u8],
    source: &'a str,
    attrs: BlockAttrs<'a>,
    loc: BlockLocation,
}

impl<'a> RawBlock<'a> {
    fn tag_str(&self) -> &'a str {
        // Tag names are ASCII by construction (see `is_tag_name_char`).
        std::str::from_utf8(self.tag).unwrap_or_default()
    }

    fn content(&self) -> Cow<'a, str> {
        Cow::Borrowed(&self.source[self.loc.start..self.loc.end])
    }

    fn into_block(self) -> SfcBlock<'a> {
        SfcBlock {
            content: self.content(),
            lang: self.attrs.get("lang").cloned(),
            loc: self.loc,
            attrs: self.attrs,
        }
    }

    fn into_script(self) -> SfcScriptBlock<'a> {
        SfcScriptBlock {
            content: self.content(),
            lang: self.attrs.get("lang").cloned(),
            src: self.attrs.get("src").cloned(),
            setup: self.attrs.contains_key("setup"),
            loc: self.loc,
            attrs: self.attrs,
        }
    }
}

struct Scanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
        }
    }

    /// Move to `target`, counting the newlines skipped over.
    fn advance_to(&mut self, target: usize) {
        let target = target.min(self.bytes.len());
        self.line += memchr::memchr_iter(b'\n', &self.bytes[self.pos..target]).count();
        self.pos = target;
    }

    fn next_block(&mut self) -> Option<RawBlock<'a>> {
        loop {
            let lt = memchr(b'<', &self.bytes[self.pos..])?;
            self.advance_to(self.pos + lt);

            let rest = &self.bytes[self.pos..];
            if rest.starts_with(b"<!--") {
                let end = memmem::find(rest, b"-->")
                    .map(|i| self.pos + i + 3)
                    .unwrap_or(self.bytes.len());
                self.advance_to(end);
                continue;
            }

            let start_line = self.line;
            match self.parse_block(start_line) {
                Some(block) => return Some(block),
                None => self.advance_to(self.pos + 1),
            }
        }
    }

    /// Parse a block whose opening `<` is at the current position.
    /// On success the scanner is left just after the closing tag.
    fn parse_block(&mut self, start_line: usize) -> Option<RawBlock<'a>> {
        let bytes = self.bytes;
        let len = bytes.len();
        let mut pos = self.pos + 1;

        let tag_start = pos;
        while pos < len && is_tag_name_char(bytes[pos]) {
            pos += 1;
        }
        if pos == tag_start {
            return None;
        }
        let tag = &bytes[tag_start..pos];

        let (attrs, after_attrs) = parse_attrs(self.source, pos);
        pos = after_attrs;

        // Self-closing block: `<script src="./x.js" />`
        if pos > 0 && pos < len && bytes[pos - 1] == b'/' && bytes[pos] == b'>' {
            let end = pos + 1;
            self.advance_to(end);
            return Some(RawBlock {
                tag,
                source: self.source,
                attrs,
                loc: BlockLocation {
                    start: end,
                    end,
                    start_line,
                    end_line: self.line,
                },
            });
        }

        if pos >= len || bytes[pos] != b'>' {
            return None;
        }
        let content_start = pos + 1;

        let (content_end, close_len) = if tag_name_eq(tag, TAG_TEMPLATE) {
            (find_template_end(bytes, content_start)?, CLOSING_TEMPLATE.len())
        } else if tag_name_eq(tag, TAG_SCRIPT) {
            (find_closing(bytes, content_start, CLOSING_SCRIPT)?, CLOSING_SCRIPT.len())
        } else if tag_name_eq(tag, TAG_STYLE) {
            (find_closing(bytes, content_start, CLOSING_STYLE)?, CLOSING_STYLE.len())
        } else {
            find_custom_block_end(bytes, content_start, tag)?
        };

        self.advance_to(content_end + close_len);
        Some(RawBlock {
            tag,
            source: self.source,
            attrs,
            loc: BlockLocation {
                start: content_start,
                end: content_end,
                start_line,
                end_line: self.line,
            },
        })
    }
}

/// Parse opening-tag attributes starting right after the tag name.
/// Returns the attributes and the position of the terminating `>` (or the
/// `/` of `/>`).
fn parse_attrs(source: &str, mut pos: usize) -> (BlockAttrs<'_>, usize) {
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut attrs = BlockAttrs::default();

    while pos < len && bytes[pos] != b'>' {
        while pos < len && is_whitespace(bytes[pos]) {
            pos += 1;
        }
        if pos >= len || bytes[pos] == b'>' {
            break;
        }
        if bytes[pos] == b'/' {
            if pos + 1 < len && bytes[pos + 1] == b'>' {
                return (attrs, pos + 1);
            }
            pos += 1;
            continue;
        }

        let name_start = pos;
        while pos < len && !matches!(bytes[pos], b'=' | b'>' | b'/') && !is_whitespace(bytes[pos]) {
            pos += 1;
        }
        let name = &source[name_start..pos];

        while pos < len && matches!(bytes[pos], b' ' | b'\t') {
            pos += 1;
        }

        let value: Cow<'_, str> = if pos < len && bytes[pos] == b'=' {
            pos += 1;
            while pos < len && matches!(bytes[pos], b' ' | b'\t') {
                pos += 1;
            }
            if pos < len && (bytes[pos] == b'"' || bytes[pos] == b'\'') {
                let quote = bytes[pos];
                let value_start = pos + 1;
                let value_end = memchr(quote, &bytes[value_start..])
                    .map(|i| value_start + i)
                    .unwrap_or(len);
                pos = (value_end + 1).min(len);
                Cow::Borrowed(&source[value_start..value_end])
            } else {
                let value_start = pos;
                while pos < len && !matches!(bytes[pos], b'>' | b'/') && !is_whitespace(bytes[pos]) {
                    pos += 1;
                }
                Cow::Borrowed(&source[value_start..pos])
            }
        } else {
            // Boolean attribute
            Cow::Borrowed("")
        };

        if !name.is_empty() {
            attrs.insert(Cow::Borrowed(name), value);
        }
    }

    (attrs, pos)
}

/// Find the `</template>` matching the outer template, skipping nested
/// `<template>` elements.
fn find_template_end(bytes: &[u8], mut pos: usize) -> Option<usize> {
    let len = bytes.len();
    let mut depth = 1usize;

    while pos < len {
        pos += memchr(b'<', &bytes[pos..])?;

        if starts_with_ignore_case(&bytes[pos..], CLOSING_TEMPLATE) {
            depth -= 1;
            if depth == 0 {
                return Some(pos);
            }
            pos += CLOSING_TEMPLATE.len();
            continue;
        }

        let after_name = pos + 1 + TAG_TEMPLATE.len();
        if starts_with_ignore_case(&bytes[pos + 1..], TAG_TEMPLATE)
            && after_name < len
            && (is_whitespace(bytes[after_name]) || bytes[after_name] == b'>')
        {
            let tag_end = memchr(b'>', &bytes[after_name..]).map(|i| after_name + i)?;
            if bytes[tag_end - 1] != b'/' {
                depth += 1;
            }
            pos = tag_end;
            continue;
        }

        pos += 1;
    }

    None
}

/// Find a fixed closing tag, case-insensitively.
fn find_closing(bytes: &[u8], mut pos: usize, closing: &[u8]) -> Option<usize> {
    while pos < bytes.len() {
        pos += memchr(b'<', &bytes[pos..])?;
        if starts_with_ignore_case(&bytes[pos..], closing) {
            return Some(pos);
        }
        pos += 1;
    }
    None
}

/// Find `</tag>` for a custom block. Returns the content end and the length
/// of the closing tag.
fn find_custom_block_end(bytes: &[u8], mut pos: usize, tag: &[u8]) -> Option<(usize, usize)> {
    let len = bytes.len();
    while pos < len {
        pos += memchr(b'<', &bytes[pos..])?;
        let name_start = pos + 2;
        let name_end = name_start + tag.len();
        if bytes.get(pos + 1) == Some(&b'/')
            && name_end < len
            && bytes[name_start..name_end].eq_ignore_ascii_case(tag)
            && bytes[name_end] == b'>'
        {
            return Some((pos, name_end + 1 - pos));
        }
        pos += 1;
    }
    None
}

#[inline(always)]
fn tag_name_eq(name: &[u8], expected: &[u8]) -> bool {
    name.eq_ignore_ascii_case(expected)
}

#[inline(always)]
fn starts_with_ignore_case(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.len() >= needle.len() && haystack[..needle.len()].eq_ignore_ascii_case(needle)
}

#[inline(always)]
fn is_tag_name_char(b: u8) -> bool {
    matches!(b, b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_')
}

#[inline(always)]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}
