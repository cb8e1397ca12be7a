//! AST extraction of import, require and re-export statements.

use std::path::Path;

use indexmap::IndexSet;
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Argument, CallExpression, ExportAllDeclaration, ExportNamedDeclaration, Expression,
    ImportDeclaration, ImportDeclarationSpecifier, ImportExpression, ImportOrExportKind,
    ModuleExportName,
};
use oxc_ast_visit::{Visit, walk};
use oxc_parser::Parser;
use oxc_span::SourceType;

use super::{DependencyKind, ImportKind, SpecifierKind};

/// A binding introduced or re-exported by one statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawSpecifier {
    pub kind: SpecifierKind,
    pub local: String,
    pub imported: Option<String>,
    pub exported: Option<String>,
}

/// One dependency statement as written, before resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawDependency {
    pub source: String,
    pub kind: DependencyKind,
    pub import_kind: ImportKind,
    pub specifiers: Vec<RawSpecifier>,
}

/// Statements found in one file plus any parser diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub dependencies: Vec<RawDependency>,
    pub parse_errors: Vec<String>,
}

/// Plain `.js`/`.mjs`/`.cjs` files in a Next.js project routinely carry JSX,
/// so those are parsed with JSX enabled.
fn source_type_for(path: &Path) -> SourceType {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    match ext {
        "js" | "mjs" | "cjs" => SourceType::from_path(path)
            .map(|t| t.with_jsx(true))
            .unwrap_or_else(|_| SourceType::jsx()),
        _ => SourceType::from_path(path).unwrap_or_else(|_| SourceType::mjs().with_jsx(true)),
    }
}

/// Parse `source` and collect its dependency statements in source order.
///
/// Structurally identical statements collapse to one entry. If the parser
/// reports any error the file contributes no dependencies and the
/// diagnostics are returned instead.
pub fn extract_dependencies(path: &Path, source: &str) -> Extraction {
    let allocator = Allocator::default();
    let source_type = source_type_for(path);
    let parsed = Parser::new(&allocator, source, source_type).parse();

    if parsed.panicked || !parsed.errors.is_empty() {
        let mut parse_errors: Vec<String> = parsed.errors.iter().map(|e| e.to_string()).collect();
        if parse_errors.is_empty() {
            parse_errors.push(format!("Parser aborted on {}", path.display()));
        }
        return Extraction {
            dependencies: Vec::new(),
            parse_errors,
        };
    }

    let mut collector = DependencyCollector::default();
    collector.visit_program(&parsed.program);

    Extraction {
        dependencies: collector.found.into_iter().collect(),
        parse_errors: Vec::new(),
    }
}

#[derive(Default)]
struct DependencyCollector {
    found: IndexSet<RawDependency>,
}

impl DependencyCollector {
    fn push(
        &mut self,
        source: &str,
        kind: DependencyKind,
        import_kind: ImportKind,
        specifiers: Vec<RawSpecifier>,
    ) {
        self.found.insert(RawDependency {
            source: source.to_string(),
            kind,
            import_kind,
            specifiers,
        });
    }
}

fn export_name(name: &ModuleExportName) -> String {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
        ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
        ModuleExportName::StringLiteral(lit) => lit.value.to_string(),
    }
}

fn import_kind_of(kind: ImportOrExportKind) -> ImportKind {
    if kind.is_type() {
        ImportKind::Type
    } else {
        ImportKind::Value
    }
}

impl<'a> Visit<'a> for DependencyCollector {
    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        let specifiers = decl
            .specifiers
            .iter()
            .flatten()
            .map(|spec| match spec {
                ImportDeclarationSpecifier::ImportDefaultSpecifier(default) => RawSpecifier {
                    kind: SpecifierKind::Default,
                    local: default.local.name.to_string(),
                    imported: Some("default".to_string()),
                    exported: None,
                },
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(namespace) => RawSpecifier {
                    kind: SpecifierKind::Namespace,
                    local: namespace.local.name.to_string(),
                    imported: Some("*".to_string()),
                    exported: None,
                },
                ImportDeclarationSpecifier::ImportSpecifier(named) => RawSpecifier {
                    kind: SpecifierKind::Named,
                    local: named.local.name.to_string(),
                    imported: Some(export_name(&named.imported)),
                    exported: None,
                },
            })
            .collect();

        self.push(
            decl.source.value.as_str(),
            DependencyKind::Import,
            import_kind_of(decl.import_kind),
            specifiers,
        );
        walk::walk_import_declaration(self, decl);
    }

    fn visit_import_expression(&mut self, expr: &ImportExpression<'a>) {
        if let Expression::StringLiteral(lit) = &expr.source {
            self.push(
                lit.value.as_str(),
                DependencyKind::DynamicImport,
                ImportKind::Value,
                Vec::new(),
            );
        }
        walk::walk_import_expression(self, expr);
    }

    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        let is_require =
            matches!(&call.callee, Expression::Identifier(ident) if ident.name.as_str() == "require");
        if is_require {
            if let Some(Argument::StringLiteral(lit)) = call.arguments.first() {
                self.push(
                    lit.value.as_str(),
                    DependencyKind::Require,
                    ImportKind::Value,
                    Vec::new(),
                );
            }
        }
        walk::walk_call_expression(self, call);
    }

    fn visit_export_named_declaration(&mut self, decl: &ExportNamedDeclaration<'a>) {
        if let Some(source) = &decl.source {
            let specifiers = decl
                .specifiers
                .iter()
                .map(|spec| RawSpecifier {
                    kind: SpecifierKind::Export,
                    local: export_name(&spec.local),
                    imported: None,
                    exported: Some(export_name(&spec.exported)),
                })
                .collect();
            self.push(
                source.value.as_str(),
                DependencyKind::ExportFrom,
                import_kind_of(decl.export_kind),
                specifiers,
            );
        }
        walk::walk_export_named_declaration(self, decl);
    }

    fn visit_export_all_declaration(&mut self, decl: &ExportAllDeclaration<'a>) {
        let specifiers = decl
            .exported
            .as_ref()
            .map(|name| RawSpecifier {
                kind: SpecifierKind::Namespace,
                local: "*".to_string(),
                imported: None,
                exported: Some(export_name(name)),
            })
            .into_iter()
            .collect();
        self.push(
            decl.source.value.as_str(),
            DependencyKind::ExportAllFrom,
            import_kind_of(decl.export_kind),
            specifiers,
        );
        walk::walk_export_all_declaration(self, decl);
    }
}
