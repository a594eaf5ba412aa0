//! Prop declarations of the `props` option.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use vize_carton::{camelize, CompactString};

use crate::literal::{evaluate_literal, LiteralValue};
use crate::script_parser::OptionValue;

/// Props declared by one file, in declaration order. Names are camelCase.
pub type PropMap = IndexMap<CompactString, PropDescriptor>;

/// Symbolic runtime type of a prop: the constructor name(s) it was declared
/// with. Constructors are never resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TypeTag {
    Single(CompactString),
    Union(Vec<CompactString>),
}

impl TypeTag {
    fn from_literal(value: &LiteralValue) -> Option<Self> {
        match value {
            LiteralValue::Reference(name) => Some(TypeTag::Single(name.clone())),
            LiteralValue::Array(items) => {
                let names: Vec<CompactString> = items
                    .iter()
                    .filter_map(|item| item.as_reference().map(CompactString::new))
                    .collect();
                match names.len() {
                    0 => None,
                    1 => names.into_iter().next().map(TypeTag::Single),
                    _ => Some(TypeTag::Union(names)),
                }
            }
            _ => None,
        }
    }

    /// Constructor names, one per union member.
    pub fn names(&self) -> &[CompactString] {
        match self {
            TypeTag::Single(name) => std::slice::from_ref(name),
            TypeTag::Union(names) => names,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.names().iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

/// Shape of one declared prop. `PropDescriptor::default()` is the
/// unconstrained shape of a prop declared by name only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropDescriptor {
    pub required: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_tag: Option<TypeTag>,
    /// Source-like rendering of the `default` value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<CompactString>,
}

impl PropDescriptor {
    /// Interpret the value of one entry of an object-style `props` option.
    ///
    /// - `title: String` / `title: [String, Number]` - type only
    /// - `title: { type, required, default }` - full shape
    /// - `title: null` and anything else - unconstrained
    pub fn from_literal(value: &LiteralValue) -> Self {
        match value {
            LiteralValue::Object(_) => PropDescriptor {
                required: value
                    .get("required")
                    .and_then(LiteralValue::as_bool)
                    .unwrap_or(false),
                type_tag: value.get("type").and_then(TypeTag::from_literal),
                default: value.get("default").map(|v| CompactString::new(v.to_string())),
            },
            other => PropDescriptor {
                type_tag: TypeTag::from_literal(other),
                ..Default::default()
            },
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        *self == PropDescriptor::default()
    }
}

/// Interpret a `props` option: `['a', 'b']` or `{ a: String, b: {...} }`.
pub fn interpret_props(value: &OptionValue<'_, '_>) -> PropMap {
    let literal = evaluate_literal(value.expression(), value.script_source());
    props_from_literal(&literal)
}

/// Interpret an already evaluated `props` value.
pub fn props_from_literal(literal: &LiteralValue) -> PropMap {
    match literal {
        LiteralValue::Array(items) => items
            .iter()
            .filter_map(LiteralValue::as_str)
            .map(|name| (camelize(name), PropDescriptor::default()))
            .collect(),
        LiteralValue::Object(entries) => entries
            .iter()
            .map(|(name, value)| (camelize(name), PropDescriptor::from_literal(value)))
            .collect(),
        _ => PropMap::default(),
    }
}
