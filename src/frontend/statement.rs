//! Statement builder
//!
//! Compound blocks drive the scope stack; declaration statements realize
//! comma-separated multi-declarator syntax sharing one base type.

use super::Translator;
use crate::diagnostics::BuilderCategory;
use crate::graph::{DeclId, Declaration, DeclarationKind, ExprId, Statement, StatementKind, StmtId};
use crate::types::TypeId;
use tree_sitter::Node;

/// Dispatch classes for statement syntax.
enum StmtKind {
    Compound,
    Declaration,
    Expression,
    Return,
}

impl StmtKind {
    fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "compound_statement" => Some(Self::Compound),
            // field declarations inside records share the declaration logic
            "declaration" | "field_declaration" => Some(Self::Declaration),
            "expression_statement" => Some(Self::Expression),
            "return_statement" => Some(Self::Return),
            _ => None,
        }
    }
}

/// Shape modifiers a declarator can apply to one declared name.
enum DeclaratorShape {
    Name,
    Init,
    Pointer,
    Array,
    Reference,
}

impl DeclaratorShape {
    fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "identifier" | "field_identifier" => Some(Self::Name),
            "init_declarator" => Some(Self::Init),
            "pointer_declarator" => Some(Self::Pointer),
            "array_declarator" => Some(Self::Array),
            "reference_declarator" => Some(Self::Reference),
            _ => None,
        }
    }
}

impl Translator<'_> {
    /// Build a statement from a syntax node, falling back to a placeholder
    /// for unrecognized kinds.
    pub(crate) fn handle_statement(&mut self, node: Node) -> StmtId {
        match StmtKind::from_kind(node.kind()) {
            Some(StmtKind::Compound) => self.handle_compound_statement(node),
            Some(StmtKind::Declaration) => self.handle_declaration_statement(node),
            Some(StmtKind::Expression) => self.handle_expression_statement(node),
            Some(StmtKind::Return) => self.handle_return_statement(node),
            None => {
                self.unhandled(BuilderCategory::Statement, &node);
                self.graph.alloc_stmt(Statement {
                    info: self.node_info(&node),
                    kind: StatementKind::Problem,
                })
            }
        }
    }

    fn handle_compound_statement(&mut self, node: Node) -> StmtId {
        self.scopes.enter_scope(node.id());

        // Source order is intended execution order
        let mut statements = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            statements.push(self.handle_statement(child));
        }

        // Block declarations already live in the declaration statements;
        // the block scope itself is discarded
        self.scopes.leave_scope(node.id());

        self.graph.alloc_stmt(Statement {
            info: self.node_info(&node),
            kind: StatementKind::Compound { statements },
        })
    }

    fn handle_declaration_statement(&mut self, node: Node) -> StmtId {
        // One base type shared by every declarator in the statement. If
        // resolving it declared a record inline, the record travels with
        // the statement as a side output.
        let (base, record) = self.resolve_qualified_type(node);

        let mut declarations = Vec::new();
        let mut declarator = node.child_by_field_name("declarator");
        let designated = declarator.map(|first| first.id());
        while let Some(current) = declarator {
            // Default values and bitfield sizes are siblings of the
            // declarator chain; stop at the first non-declarator. An
            // unrecognized shape in the designated declarator slot itself
            // (e.g. a block-local prototype) is degraded, not dropped.
            if DeclaratorShape::from_kind(current.kind()).is_none() {
                if designated == Some(current.id()) {
                    self.unhandled(BuilderCategory::Declaration, &current);
                }
                break;
            }

            let decl = self.build_variable(current, base);
            let name = self.graph.decl(decl).name.clone();
            self.scopes.add_declaration(name, decl);
            declarations.push(decl);

            declarator = current.next_named_sibling();
        }

        // Attributes on the statement apply to every declared variable
        let annotations = self.process_attributes(node);
        if !annotations.is_empty() {
            for decl in &declarations {
                self.graph.decl_mut(*decl).annotations = annotations.clone();
            }
        }

        self.graph.alloc_stmt(Statement {
            info: self.node_info(&node),
            kind: StatementKind::Declarations {
                declarations,
                record,
            },
        })
    }

    fn handle_expression_statement(&mut self, node: Node) -> StmtId {
        // Forward the single child to the expression builder
        let Some(child) = node.named_child(0) else {
            self.unhandled(BuilderCategory::Statement, &node);
            return self.graph.alloc_stmt(Statement {
                info: self.node_info(&node),
                kind: StatementKind::Problem,
            });
        };

        let expression = self.handle_expression(child);
        self.graph.alloc_stmt(Statement {
            info: self.node_info(&node),
            kind: StatementKind::Expression { expression },
        })
    }

    fn handle_return_statement(&mut self, node: Node) -> StmtId {
        let value = node.named_child(0).map(|child| self.handle_expression(child));

        self.graph.alloc_stmt(Statement {
            info: self.node_info(&node),
            kind: StatementKind::Return { value },
        })
    }

    fn build_variable(&mut self, declarator: Node, base: TypeId) -> DeclId {
        let mut ty = base;
        let mut name = String::new();
        let mut initializer = None;
        self.process_declarator(declarator, &mut ty, &mut name, &mut initializer);

        self.graph.alloc_decl(Declaration {
            info: self.node_info(&declarator),
            name,
            kind: DeclarationKind::Variable { ty, initializer },
            annotations: Vec::new(),
        })
    }

    /// Apply one declarator's name and type-shape modifiers. Shape
    /// adjustments never touch the shared base type of the statement.
    pub(crate) fn process_declarator(
        &mut self,
        node: Node,
        ty: &mut TypeId,
        name: &mut String,
        initializer: &mut Option<ExprId>,
    ) {
        match DeclaratorShape::from_kind(node.kind()) {
            Some(DeclaratorShape::Name) => {
                if let Some(code) = self.code_of(&node) {
                    *name = code;
                }
            }
            Some(DeclaratorShape::Init) => {
                if let Some(inner) = node.child_by_field_name("declarator") {
                    self.process_declarator(inner, ty, name, initializer);
                }
                if let Some(value) = node.child_by_field_name("value") {
                    *initializer = Some(self.handle_expression(value));
                }
            }
            Some(DeclaratorShape::Pointer) => {
                *ty = self.adjusted_type(*ty, "*");
                if let Some(inner) = node.child_by_field_name("declarator") {
                    self.process_declarator(inner, ty, name, initializer);
                }
            }
            Some(DeclaratorShape::Array) => {
                *ty = self.adjusted_type(*ty, "[]");
                if let Some(inner) = node.child_by_field_name("declarator") {
                    self.process_declarator(inner, ty, name, initializer);
                }
            }
            Some(DeclaratorShape::Reference) => {
                *ty = self.adjusted_type(*ty, "&");
                let inner = node
                    .child_by_field_name("declarator")
                    .or_else(|| node.named_child(0));
                if let Some(inner) = inner {
                    self.process_declarator(inner, ty, name, initializer);
                }
            }
            None => {
                self.unhandled(BuilderCategory::Declaration, &node);
            }
        }
    }

    /// Intern the type spelling with a declarator shape suffix appended.
    pub(crate) fn adjusted_type(&mut self, ty: TypeId, suffix: &str) -> TypeId {
        let spelling = format!("{}{}", self.registry.spelling(ty), suffix);
        self.registry.intern(spelling)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::TranslationConfig;
    use crate::frontend::Frontend;
    use crate::graph::{DeclarationKind, ExpressionKind, StatementKind, TranslationUnit};

    fn translate(source: &str) -> TranslationUnit {
        Frontend::new(TranslationConfig::default())
            .translate(source, "test.cpp")
            .unwrap()
    }

    fn variable_names(unit: &TranslationUnit) -> Vec<(String, String)> {
        unit.graph
            .decls()
            .filter_map(|(_, decl)| match &decl.kind {
                DeclarationKind::Variable { ty, .. } => {
                    Some((decl.name.clone(), unit.types.spelling(*ty).to_string()))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_multi_declarator_shares_base_type() {
        let unit = translate("void f() { int a, b; }\n");

        let variables = variable_names(&unit);
        assert_eq!(
            variables,
            vec![
                ("a".to_string(), "int".to_string()),
                ("b".to_string(), "int".to_string())
            ]
        );

        let declaration = unit
            .graph
            .stmts()
            .find_map(|(_, stmt)| match &stmt.kind {
                StatementKind::Declarations { declarations, .. } => Some(declarations.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(declaration.len(), 2, "one variable per declarator");
    }

    #[test]
    fn test_pointer_shape_does_not_leak_into_siblings() {
        let unit = translate("void f() { int *p, i; }\n");

        let variables = variable_names(&unit);
        assert_eq!(
            variables,
            vec![
                ("p".to_string(), "int*".to_string()),
                ("i".to_string(), "int".to_string())
            ]
        );
    }

    #[test]
    fn test_initializer_goes_through_the_expression_builder() {
        let unit = translate("void f() { int x = 1 + 2; }\n");

        let initializer = unit
            .graph
            .decls()
            .find_map(|(_, decl)| match &decl.kind {
                DeclarationKind::Variable { initializer, .. } if decl.name == "x" => *initializer,
                _ => None,
            })
            .unwrap();
        let expression = unit.graph.expr(initializer);
        assert_eq!(expression.kind, ExpressionKind::Binary);
        assert_eq!(expression.info.code.as_deref(), Some("1 + 2"));
    }

    #[test]
    fn test_nested_blocks_shadow() {
        let unit = translate("void f() { int x; { int x; } }\n");

        // Both declarations exist as distinct graph nodes named `x`
        let xs: Vec<_> = unit
            .graph
            .decls()
            .filter(|(_, decl)| decl.name == "x")
            .collect();
        assert_eq!(xs.len(), 2);
    }

    #[test]
    fn test_return_with_and_without_value() {
        let unit = translate("void f() { return; }\nint g() { return 1; }\n");

        let returns: Vec<_> = unit
            .graph
            .stmts()
            .filter_map(|(_, stmt)| match &stmt.kind {
                StatementKind::Return { value } => Some(value.is_some()),
                _ => None,
            })
            .collect();
        assert_eq!(returns, vec![false, true]);
    }

    #[test]
    fn test_expression_statement_forwards_its_child() {
        let unit = translate("void f(int x) { x; }\n");

        let expression = unit
            .graph
            .stmts()
            .find_map(|(_, stmt)| match &stmt.kind {
                StatementKind::Expression { expression } => Some(*expression),
                _ => None,
            })
            .unwrap();
        assert_eq!(unit.graph.expr(expression).info.code.as_deref(), Some("x"));
    }

    #[test]
    fn test_unrecognized_statement_is_a_placeholder() {
        let unit = translate("void f() { for (;;) { } }\n");

        let placeholder = unit
            .graph
            .stmts()
            .any(|(_, stmt)| matches!(stmt.kind, StatementKind::Problem));
        assert!(placeholder);
        assert!(unit
            .diagnostics
            .iter()
            .any(|diagnostic| diagnostic.kind == "for_statement"));
    }

    #[test]
    fn test_unrecognized_declarator_records_a_diagnostic() {
        // Block-local prototypes carry a function declarator, which the
        // variable path has no shape for
        let unit = translate("void g() { int f(); }\n");

        let empty = unit.graph.stmts().any(|(_, stmt)| {
            matches!(
                &stmt.kind,
                StatementKind::Declarations { declarations, .. } if declarations.is_empty()
            )
        });
        assert!(empty);
        assert!(unit
            .diagnostics
            .iter()
            .any(|diagnostic| diagnostic.kind == "function_declarator"));
    }

    #[test]
    fn test_compound_keeps_source_order() {
        let unit = translate("void f() { int a; int b; return; }\n");

        let DeclarationKind::Function { body: Some(body), .. } =
            &unit.declaration_named("f").unwrap().kind
        else {
            panic!("expected a function with a body");
        };
        let StatementKind::Compound { statements } = &unit.graph.stmt(*body).kind else {
            panic!("expected a compound body");
        };

        assert_eq!(statements.len(), 3);
        assert!(matches!(
            unit.graph.stmt(statements[0]).kind,
            StatementKind::Declarations { .. }
        ));
        assert!(matches!(
            unit.graph.stmt(statements[2]).kind,
            StatementKind::Return { .. }
        ));
    }
}
