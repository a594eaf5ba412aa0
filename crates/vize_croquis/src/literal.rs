//! Restricted literal evaluation.
//!
//! Interprets option values without executing them. The accepted grammar is
//! object and array literals, string/number/boolean/null literals,
//! substitution-free template strings, and bare identifiers or member paths,
//! which are kept as symbolic references (`String`, `Vue.PropTypes.x`).
//! Anything else (functions, calls, operators) is kept verbatim as
//! [`LiteralValue::Opaque`] source text.

use std::fmt;

use indexmap::IndexMap;
use oxc_ast::ast::{ArrayExpressionElement, Expression, ObjectPropertyKind};
use oxc_span::GetSpan;
use serde::Serialize;
use vize_carton::CompactString;

use crate::script_parser::{property_key_name, slice, strip_wrappers};

/// Value of a literal expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum LiteralValue {
    Null,
    Undefined,
    Bool(bool),
    Number(f64),
    String(CompactString),
    /// Identifier or member path referring to something defined elsewhere.
    Reference(CompactString),
    Array(Vec<LiteralValue>),
    Object(IndexMap<CompactString, LiteralValue>),
    /// Source text of an expression outside the literal grammar.
    Opaque(CompactString),
}

impl LiteralValue {
    /// Look up an object entry.
    pub fn get(&self, key: &str) -> Option<&LiteralValue> {
        match self {
            LiteralValue::Object(entries) => entries.get(key),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            LiteralValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LiteralValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&str> {
        match self {
            LiteralValue::Reference(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

/// Evaluate `expr` (whose text lives in `source`) under the literal grammar.
pub fn evaluate_literal(expr: &Expression<'_>, source: &str) -> LiteralValue {
    match strip_wrappers(expr) {
        Expression::NullLiteral(_) => LiteralValue::Null,
        Expression::BooleanLiteral(b) => LiteralValue::Bool(b.value),
        Expression::NumericLiteral(n) => LiteralValue::Number(n.value),
        Expression::StringLiteral(s) => LiteralValue::String(CompactString::new(s.value.as_str())),
        Expression::TemplateLiteral(tpl) if tpl.expressions.is_empty() => {
            let text = tpl
                .quasis
                .first()
                .map(|quasi| quasi.value.raw.as_str())
                .unwrap_or_default();
            LiteralValue::String(CompactString::new(text))
        }
        Expression::Identifier(id) if id.name.as_str() == "undefined" => LiteralValue::Undefined,
        Expression::Identifier(id) => LiteralValue::Reference(CompactString::new(id.name.as_str())),
        member @ Expression::StaticMemberExpression(_) => {
            LiteralValue::Reference(CompactString::new(slice(source, member.span())))
        }
        Expression::ArrayExpression(arr) => LiteralValue::Array(
            arr.elements
                .iter()
                .filter_map(|elem| match elem {
                    ArrayExpressionElement::SpreadElement(_) | ArrayExpressionElement::Elision(_) => {
                        None
                    }
                    _ => elem.as_expression().map(|e| evaluate_literal(e, source)),
                })
                .collect(),
        ),
        Expression::ObjectExpression(obj) => {
            let mut entries = IndexMap::with_capacity(obj.properties.len());
            for prop in obj.properties.iter() {
                let ObjectPropertyKind::ObjectProperty(p) = prop else {
                    continue;
                };
                let Some(key) = property_key_name(&p.key) else {
                    continue;
                };
                let value = if p.method {
                    LiteralValue::Opaque(CompactString::new(slice(source, p.span)))
                } else {
                    evaluate_literal(&p.value, source)
                };
                entries.insert(CompactString::new(key), value);
            }
            LiteralValue::Object(entries)
        }
        other => LiteralValue::Opaque(CompactString::new(slice(source, other.span()))),
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Null => f.write_str("null"),
            LiteralValue::Undefined => f.write_str("undefined"),
            LiteralValue::Bool(b) => write!(f, "{b}"),
            LiteralValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            LiteralValue::Number(n) => write!(f, "{n}"),
            LiteralValue::String(s) => write!(f, "'{s}'"),
            LiteralValue::Reference(name) | LiteralValue::Opaque(name) => f.write_str(name),
            LiteralValue::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            LiteralValue::Object(entries) if entries.is_empty() => f.write_str("{}"),
            LiteralValue::Object(entries) => {
                f.write_str("{ ")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str(" }")
            }
        }
    }
}
