//! Interpretation of the `components`, `mixins`, `extends` and `emits`
//! options.

use oxc_ast::ast::{Argument, ArrayExpressionElement, Expression, ObjectPropertyKind, Statement};
use serde::Serialize;
use vize_carton::{to_pascal_case, CompactString};

use crate::script_parser::{property_key_name, strip_wrappers, OptionValue};

/// Where a registered child component comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ComponentTarget {
    /// A local name, normally bound by an import.
    Local(CompactString),
    /// A module specifier of an async component: `() => import('./X.vue')`.
    Specifier(CompactString),
}

/// One entry of a `components` option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentBinding {
    /// Registered name, normalized to PascalCase.
    pub name: CompactString,
    pub target: ComponentTarget,
}

/// Interpret `components: { Foo, 'bar-baz': Bar, Lazy: () => import('./Lazy.vue') }`.
pub fn interpret_components(value: &OptionValue<'_, '_>) -> Vec<ComponentBinding> {
    let Expression::ObjectExpression(obj) = value.expression() else {
        return Vec::new();
    };

    obj.properties
        .iter()
        .filter_map(|prop| {
            let ObjectPropertyKind::ObjectProperty(p) = prop else {
                return None;
            };
            let key = property_key_name(&p.key)?;
            let target = component_target(&p.value)?;
            Some(ComponentBinding {
                name: to_pascal_case(key),
                target,
            })
        })
        .collect()
}

fn component_target(expr: &Expression<'_>) -> Option<ComponentTarget> {
    match strip_wrappers(expr) {
        Expression::Identifier(id) => Some(ComponentTarget::Local(CompactString::new(
            id.name.as_str(),
        ))),
        Expression::ArrowFunctionExpression(arrow) => {
            let Some(Statement::ExpressionStatement(stmt)) = arrow.body.statements.first() else {
                return None;
            };
            if !arrow.expression {
                return None;
            }
            import_specifier(&stmt.expression).map(ComponentTarget::Specifier)
        }
        // defineAsyncComponent(() => import('./X.vue'))
        Expression::CallExpression(call) => {
            let arg = call.arguments.first()?;
            if let Argument::SpreadElement(_) = arg {
                return None;
            }
            component_target(arg.as_expression()?)
        }
        _ => None,
    }
}

fn import_specifier(expr: &Expression<'_>) -> Option<CompactString> {
    match strip_wrappers(expr) {
        Expression::ImportExpression(import) => match &import.source {
            Expression::StringLiteral(lit) => Some(CompactString::new(lit.value.as_str())),
            _ => None,
        },
        _ => None,
    }
}

/// Interpret `mixins: [A, B]` into the local names of the mixins.
pub fn interpret_mixins(value: &OptionValue<'_, '_>) -> Vec<CompactString> {
    let Expression::ArrayExpression(arr) = value.expression() else {
        return Vec::new();
    };

    arr.elements
        .iter()
        .filter_map(|elem| match elem {
            ArrayExpressionElement::Identifier(id) => Some(CompactString::new(id.name.as_str())),
            _ => None,
        })
        .collect()
}

/// Interpret `extends: Base` into the local name of the base options.
pub fn interpret_extends(value: &OptionValue<'_, '_>) -> Option<CompactString> {
    match value.expression() {
        Expression::Identifier(id) => Some(CompactString::new(id.name.as_str())),
        _ => None,
    }
}

/// Interpret `emits: ['open', 'close']` or `emits: { open: null, close: (v) => true }`.
pub fn interpret_emits(value: &OptionValue<'_, '_>) -> Vec<CompactString> {
    match value.expression() {
        Expression::ArrayExpression(arr) => arr
            .elements
            .iter()
            .filter_map(|elem| match elem {
                ArrayExpressionElement::StringLiteral(s) => Some(CompactString::new(s.value.as_str())),
                _ => None,
            })
            .collect(),
        Expression::ObjectExpression(obj) => obj
            .properties
            .iter()
            .filter_map(|prop| match prop {
                ObjectPropertyKind::ObjectProperty(p) => {
                    property_key_name(&p.key).map(CompactString::new)
                }
                ObjectPropertyKind::SpreadProperty(_) => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script_parser::ScriptAst;
    use oxc_allocator::Allocator;

    const SCRIPT: &str = r#"
import Base from './base'
import FormMixin from '@/mixins/form'
import LogMixin from '../mixins/log'
import UserCard from '@/components/UserCard'
import Avatar from 'ui-kit/Avatar.vue'
import { defineAsyncComponent } from 'vue'

export default {
  extends: Base,
  mixins: [FormMixin, LogMixin, makeMixin()],
  components: {
    UserCard,
    'ui-avatar': Avatar,
    LazyChart: () => import('./LazyChart.vue'),
    Heavy: defineAsyncComponent(() => import('./Heavy.vue')),
    Inline: { template: '<div/>' },
  },
  emits: ['open', 'close'],
}
"#;

    fn with_options<R>(f: impl FnOnce(&crate::script_parser::OptionsNode<'_, '_>) -> R) -> R {
        let allocator = Allocator::default();
        let ast = ScriptAst::parse(&allocator, SCRIPT, "a.js").unwrap();
        let options = ast.default_export_options().unwrap();
        f(&options)
    }

    #[test]
    fn test_components() {
        let bindings = with_options(|o| interpret_components(&o.option("components").unwrap()));
        let names: Vec<_> = bindings.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["UserCard", "UiAvatar", "LazyChart", "Heavy"]);

        assert_eq!(bindings[0].target, ComponentTarget::Local("UserCard".into()));
        assert_eq!(bindings[1].target, ComponentTarget::Local("Avatar".into()));
        assert_eq!(
            bindings[2].target,
            ComponentTarget::Specifier("./LazyChart.vue".into())
        );
        assert_eq!(bindings[3].target, ComponentTarget::Specifier("./Heavy.vue".into()));
    }

    #[test]
    fn test_mixins_and_extends() {
        let mixins = with_options(|o| interpret_mixins(&o.option("mixins").unwrap()));
        assert_eq!(mixins, vec!["FormMixin", "LogMixin"]);

        let base = with_options(|o| interpret_extends(&o.option("extends").unwrap()));
        assert_eq!(base.as_deref(), Some("Base"));
    }

    #[test]
    fn test_emits_array_and_object() {
        let emits = with_options(|o| interpret_emits(&o.option("emits").unwrap()));
        assert_eq!(emits, vec!["open", "close"]);

        let allocator = Allocator::default();
        let source = "export default { emits: { submit: (payload) => !!payload, 'update:modelValue': null } }";
        let ast = ScriptAst::parse(&allocator, source, "a.js").unwrap();
        let options = ast.default_export_options().unwrap();
        let emits = interpret_emits(&options.option("emits").unwrap());
        assert_eq!(emits, vec!["submit", "update:modelValue"]);
    }
}
