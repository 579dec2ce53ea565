//! Expression builder (interface boundary)
//!
//! Operator-specific graph shapes belong to the expression-construction
//! subsystem; here every expression becomes an opaque leaf carrying a
//! coarse category, its code slice and its location. The dispatch and
//! degradation policy match the other builders.

use super::Translator;
use crate::diagnostics::BuilderCategory;
use crate::graph::{ExprId, Expression, ExpressionKind};
use tree_sitter::Node;

fn classify(kind: &str) -> Option<ExpressionKind> {
    match kind {
        "identifier" | "field_identifier" | "qualified_identifier" | "this" => {
            Some(ExpressionKind::Reference)
        }
        "field_expression" => Some(ExpressionKind::Member),
        "call_expression" => Some(ExpressionKind::Call),
        "binary_expression" => Some(ExpressionKind::Binary),
        "unary_expression" | "pointer_expression" | "update_expression" => {
            Some(ExpressionKind::Unary)
        }
        "assignment_expression" => Some(ExpressionKind::Assignment),
        "number_literal" | "string_literal" | "char_literal" | "concatenated_string" | "true"
        | "false" | "null" | "nullptr" | "user_defined_literal" => Some(ExpressionKind::Literal),
        _ => None,
    }
}

impl Translator<'_> {
    /// Build an expression from a syntax node, falling back to a
    /// placeholder for unrecognized kinds.
    pub(crate) fn handle_expression(&mut self, node: Node) -> ExprId {
        // Parentheses carry no meaning of their own
        if node.kind() == "parenthesized_expression" {
            if let Some(inner) = node.named_child(0) {
                return self.handle_expression(inner);
            }
        }

        let kind = match classify(node.kind()) {
            Some(kind) => kind,
            None => {
                self.unhandled(BuilderCategory::Expression, &node);
                ExpressionKind::Problem
            }
        };

        // Plain references get a lexical lookup against the active scopes;
        // an unresolved name is a normal result at this stage
        let declaration = if kind == ExpressionKind::Reference {
            self.code_of(&node)
                .and_then(|name| self.scopes.resolve(&name))
        } else {
            None
        };

        self.graph.alloc_expr(Expression {
            info: self.node_info(&node),
            kind,
            declaration,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::config::TranslationConfig;
    use crate::frontend::Frontend;
    use crate::graph::{ExpressionKind, TranslationUnit};

    fn translate(source: &str) -> TranslationUnit {
        Frontend::new(TranslationConfig::default())
            .translate(source, "test.cpp")
            .unwrap()
    }

    fn kinds(unit: &TranslationUnit) -> Vec<ExpressionKind> {
        (0..unit.graph.expr_count() as u32)
            .map(|i| unit.graph.expr(crate::graph::ExprId(i)).kind)
            .collect()
    }

    #[test]
    fn test_classification() {
        let unit = translate("void f(int x) { x = 1; g(x); x + 1; }\n");

        let kinds = kinds(&unit);
        assert!(kinds.contains(&ExpressionKind::Assignment));
        assert!(kinds.contains(&ExpressionKind::Call));
        assert!(kinds.contains(&ExpressionKind::Binary));
    }

    #[test]
    fn test_parentheses_unwrap() {
        let unit = translate("int f() { return (42); }\n");

        let kinds = kinds(&unit);
        assert_eq!(kinds, vec![ExpressionKind::Literal]);
    }

    #[test]
    fn test_reference_resolves_to_innermost_declaration() {
        let unit = translate("void f() { int x; { int x; x; } x; }\n");

        let xs: Vec<_> = unit
            .graph
            .decls()
            .filter(|(_, decl)| decl.name == "x")
            .map(|(id, _)| id)
            .collect();
        assert_eq!(xs.len(), 2);
        let (outer, inner) = (xs[0], xs[1]);

        let references: Vec<_> = (0..unit.graph.expr_count() as u32)
            .map(|i| unit.graph.expr(crate::graph::ExprId(i)))
            .filter(|expr| expr.kind == ExpressionKind::Reference)
            .map(|expr| expr.declaration)
            .collect();

        // Inside the inner block the inner declaration shadows the outer;
        // after it closes, only the outer one is visible
        assert_eq!(references, vec![Some(inner), Some(outer)]);
    }

    #[test]
    fn test_unresolved_reference_is_not_an_error() {
        let unit = translate("void f() { undeclared; }\n");

        let reference = (0..unit.graph.expr_count() as u32)
            .map(|i| unit.graph.expr(crate::graph::ExprId(i)))
            .find(|expr| expr.kind == ExpressionKind::Reference)
            .unwrap();
        assert_eq!(reference.declaration, None);
        assert!(unit.diagnostics.is_empty());
    }

    #[test]
    fn test_unrecognized_expression_degrades() {
        // Lambdas have no expression handler in this pass
        let unit = translate("void f() { [](){}; }\n");

        assert!(kinds(&unit).contains(&ExpressionKind::Problem));
        assert!(unit
            .diagnostics
            .iter()
            .any(|diagnostic| diagnostic.kind == "lambda_expression"));
    }
}
