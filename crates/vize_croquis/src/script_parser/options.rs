//! Default-export options object lookup.

use oxc_ast::ast::{
    Argument, Expression, ObjectExpression, ObjectPropertyKind, Program, PropertyKey, Statement,
};
use oxc_span::GetSpan;
use vize_carton::CompactString;

/// The object literal a component or mixin default-exports.
#[derive(Clone, Copy)]
pub struct OptionsNode<'b, 'a> {
    object: &'b ObjectExpression<'a>,
    source: &'a str,
}

/// The value of one named option.
#[derive(Clone, Copy)]
pub struct OptionValue<'b, 'a> {
    expression: &'b Expression<'a>,
    source: &'a str,
}

/// Structural view of one options entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    pub key: CompactString,
    /// Source text of the value (for methods, the whole method).
    pub value_source: CompactString,
    pub shorthand: bool,
    pub method: bool,
}

impl<'b, 'a> OptionsNode<'b, 'a> {
    /// Read a named option, e.g. `props`, `components`, `mixins`.
    ///
    /// When an option is declared more than once the last declaration wins,
    /// matching object literal semantics.
    pub fn option(&self, name: &str) -> Option<OptionValue<'b, 'a>> {
        self.object
            .properties
            .iter()
            .rev()
            .find_map(|prop| match prop {
                ObjectPropertyKind::ObjectProperty(p) if property_key_name(&p.key) == Some(name) => {
                    Some(OptionValue {
                        expression: &p.value,
                        source: self.source,
                    })
                }
                _ => None,
            })
    }

    /// Literal source text of a named option's value, or `None` when the
    /// option is not declared.
    pub fn read_option_source(&self, name: &str) -> Option<&'a str> {
        self.option(name).map(|value| value.source_text())
    }

    /// Enumerate every statically keyed entry, in declaration order.
    /// Spread entries and computed keys are skipped.
    pub fn entries(&self) -> Vec<OptionEntry> {
        self.object
            .properties
            .iter()
            .filter_map(|prop| {
                let ObjectPropertyKind::ObjectProperty(p) = prop else {
                    return None;
                };
                let key = property_key_name(&p.key)?;
                let span = if p.method { p.span } else { p.value.span() };
                Some(OptionEntry {
                    key: CompactString::new(key),
                    value_source: CompactString::new(slice(self.source, span)),
                    shorthand: p.shorthand,
                    method: p.method,
                })
            })
            .collect()
    }
}

impl<'b, 'a> OptionValue<'b, 'a> {
    /// The value expression, with parentheses and TypeScript assertions
    /// (`as`, `satisfies`, `!`) removed.
    pub fn expression(&self) -> &'b Expression<'a> {
        strip_wrappers(self.expression)
    }

    /// Source text of the value as written.
    pub fn source_text(&self) -> &'a str {
        slice(self.source, self.expression.span())
    }

    /// The script text the value belongs to.
    pub fn script_source(&self) -> &'a str {
        self.source
    }
}

/// Find `export default { ... }`, `export default defineComponent({ ... })`
/// or `export default Options` where `const Options = { ... }`.
pub(super) fn find_default_export_options<'b, 'a>(
    program: &'b Program<'a>,
    source: &'a str,
) -> Option<OptionsNode<'b, 'a>> {
    let declaration = program.body.iter().find_map(|stmt| match stmt {
        Statement::ExportDefaultDeclaration(export) => export.declaration.as_expression(),
        _ => None,
    })?;

    let object = options_object(program, declaration)?;
    Some(OptionsNode { object, source })
}

fn options_object<'b, 'a>(
    program: &'b Program<'a>,
    expr: &'b Expression<'a>,
) -> Option<&'b ObjectExpression<'a>> {
    match strip_wrappers(expr) {
        Expression::ObjectExpression(obj) => Some(obj),
        // defineComponent({...}), Vue.extend({...})
        Expression::CallExpression(call) => match call.arguments.first()? {
            Argument::ObjectExpression(obj) => Some(obj),
            _ => None,
        },
        Expression::Identifier(id) => {
            let init = top_level_const_init(program, id.name.as_str())?;
            match strip_wrappers(init) {
                // Avoid following `const a = b` chains.
                Expression::Identifier(_) => None,
                other => options_object(program, other),
            }
        }
        _ => None,
    }
}

fn top_level_const_init<'b, 'a>(program: &'b Program<'a>, name: &str) -> Option<&'b Expression<'a>> {
    program.body.iter().find_map(|stmt| {
        let Statement::VariableDeclaration(decl) = stmt else {
            return None;
        };
        decl.declarations.iter().find_map(|declarator| {
            let id = declarator.id.get_identifier_name()?;
            if id.as_str() == name {
                declarator.init.as_ref()
            } else {
                None
            }
        })
    })
}

pub(crate) fn strip_wrappers<'b, 'a>(expr: &'b Expression<'a>) -> &'b Expression<'a> {
    match expr {
        Expression::ParenthesizedExpression(paren) => strip_wrappers(&paren.expression),
        Expression::TSAsExpression(ts_as) => strip_wrappers(&ts_as.expression),
        Expression::TSSatisfiesExpression(ts_satisfies) => strip_wrappers(&ts_satisfies.expression),
        Expression::TSNonNullExpression(ts_non_null) => strip_wrappers(&ts_non_null.expression),
        _ => expr,
    }
}

pub(crate) fn property_key_name<'b>(key: &'b PropertyKey<'_>) -> Option<&'b str> {
    match key {
        PropertyKey::StaticIdentifier(id) => Some(id.name.as_str()),
        PropertyKey::StringLiteral(s) => Some(s.value.as_str()),
        _ => None,
    }
}

#[inline]
pub(crate) fn slice(source: &str, span: oxc_span::Span) -> &str {
    source
        .get(span.start as usize..span.end as usize)
        .unwrap_or_default()
}
