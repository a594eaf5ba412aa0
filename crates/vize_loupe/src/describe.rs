//! Plain-text renderings of metadata for editor features.
//!
//! Hosts wrap these in their own hover, completion and snippet types.

use vize_carton::{hyphenate, to_pascal_case};

use crate::metadata::Metadata;

/// One hover line per prop, then one per event, in declaration order:
///
/// ```text
/// prop (required) title: String
/// prop size: String | Number
/// event close
/// ```
pub fn hover_lines(metadata: &Metadata) -> Vec<String> {
    let props = metadata.props.iter().map(|(name, prop)| {
        let required = if prop.required { "(required) " } else { "" };
        match &prop.type_tag {
            Some(tag) => format!("prop {required}{name}: {tag}"),
            None => format!("prop {required}{name}"),
        }
    });
    let events = metadata.events.iter().map(|event| format!("event {event}"));
    props.chain(events).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
    Prop,
    Event,
}

/// An attribute completion inside a child component's tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub kind: CompletionKind,
    /// `p-<prop>` or `e-<event>`.
    pub label: String,
    /// Snippet text with a `$0` cursor stop.
    pub insert_text: String,
}

/// Binding completions for every prop (`:kebab-name="$0"`) and listener
/// completions for every event (`@kebab-name="$0"`).
pub fn attribute_completions(metadata: &Metadata) -> Vec<Completion> {
    let props = metadata.props.keys().map(|name| Completion {
        kind: CompletionKind::Prop,
        label: format!("p-{name}"),
        insert_text: format!(":{}=\"$0\"", hyphenate(name)),
    });
    let events = metadata.events.iter().map(|event| Completion {
        kind: CompletionKind::Event,
        label: format!("e-{event}"),
        insert_text: format!("@{}=\"$0\"", hyphenate(event)),
    });
    props.chain(events).collect()
}

/// Snippet for a new `<Name>` element with every required prop bound to a
/// numbered tab stop.
pub fn component_snippet(name: &str, metadata: &Metadata) -> String {
    let tag = to_pascal_case(name);
    let attrs: String = metadata
        .required_props()
        .into_iter()
        .enumerate()
        .map(|(i, prop)| format!(" :{}=\"${}\"", hyphenate(prop), i + 1))
        .collect();
    format!("<{tag}{attrs}>$0</{tag}>")
}
