//! Top-level import bindings.

use oxc_ast::ast::{ImportDeclarationSpecifier, Program, Statement};
use serde::Serialize;
use vize_carton::CompactString;

/// How a local name was imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportKind {
    /// `import Foo from '...'`
    Default,
    /// `import { Foo } from '...'` / `import { Bar as Foo } from '...'`
    Named,
    /// `import * as Foo from '...'`
    Namespace,
}

/// One local name introduced by an import declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBinding {
    pub local_name: CompactString,
    pub specifier: CompactString,
    pub kind: ImportKind,
    pub type_only: bool,
}

pub(super) fn list_import_bindings(program: &Program<'_>) -> Vec<ImportBinding> {
    let mut bindings = Vec::new();

    for stmt in program.body.iter() {
        let Statement::ImportDeclaration(import) = stmt else {
            continue;
        };
        let Some(specifiers) = &import.specifiers else {
            // Side-effect import: `import './styles.css'`
            continue;
        };

        let specifier = CompactString::new(import.source.value.as_str());
        let declaration_type_only = import.import_kind.is_type();

        for spec in specifiers.iter() {
            let (local, kind, type_only) = match spec {
                ImportDeclarationSpecifier::ImportSpecifier(s) => (
                    s.local.name.as_str(),
                    ImportKind::Named,
                    s.import_kind.is_type(),
                ),
                ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                    (s.local.name.as_str(), ImportKind::Default, false)
                }
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                    (s.local.name.as_str(), ImportKind::Namespace, false)
                }
            };

            bindings.push(ImportBinding {
                local_name: CompactString::new(local),
                specifier: specifier.clone(),
                kind,
                type_only: declaration_type_only || type_only,
            });
        }
    }

    bindings
}

#[cfg(test)]
mod tests {
    use crate::script_parser::ScriptAst;
    use oxc_allocator::Allocator;

    use super::*;

    #[test]
    fn test_list_import_bindings() {
        let source = r#"
import Foo from '@/components/Foo'
import { helper, other as renamed } from '../utils'
import * as all from 'lodash'
import './side-effect.css'
export default {}
"#;
        let allocator = Allocator::default();
        let ast = ScriptAst::parse(&allocator, source, "a.js").unwrap();
        let bindings = ast.import_bindings();

        let names: Vec<_> = bindings
            .iter()
            .map(|b| (b.local_name.as_str(), b.specifier.as_str(), b.kind))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Foo", "@/components/Foo", ImportKind::Default),
                ("helper", "../utils", ImportKind::Named),
                ("renamed", "../utils", ImportKind::Named),
                ("all", "lodash", ImportKind::Namespace),
            ]
        );
    }

    #[test]
    fn test_type_only_imports() {
        let source = "import type { Props } from './types'\nimport { type A, B } from './x'";
        let allocator = Allocator::default();
        let ast = ScriptAst::parse(&allocator, source, "a.ts").unwrap();
        let bindings = ast.import_bindings();

        assert!(bindings[0].type_only);
        assert!(bindings[1].type_only);
        assert!(!bindings[2].type_only);
    }
}
