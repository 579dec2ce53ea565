//! Declaration builder
//!
//! Builds function, record and variable declarations. The record case is
//! the recursive anchor for inline types: resolving a `struct`/`class`
//! specifier in type position re-enters this builder, which may open a
//! scope, walk members and close it again before type resolution finishes.

use super::Translator;
use crate::diagnostics::BuilderCategory;
use crate::graph::{DeclId, Declaration, DeclarationKind, RecordTag};
use tree_sitter::Node;

/// Dispatch classes for declaration syntax.
pub(crate) enum DeclKind {
    Function,
    Record(RecordTag),
}

impl DeclKind {
    pub(crate) fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "function_definition" => Some(Self::Function),
            // class and struct resolve to the same record-building logic
            "class_specifier" => Some(Self::Record(RecordTag::Class)),
            "struct_specifier" => Some(Self::Record(RecordTag::Struct)),
            _ => None,
        }
    }
}

impl Translator<'_> {
    /// Build a declaration from a syntax node, falling back to a
    /// placeholder for unrecognized kinds.
    pub(crate) fn handle_declaration(&mut self, node: Node) -> DeclId {
        match DeclKind::from_kind(node.kind()) {
            Some(DeclKind::Function) => self.handle_function_definition(node),
            Some(DeclKind::Record(tag)) => self.handle_record_specifier(node, tag),
            None => {
                self.unhandled(BuilderCategory::Declaration, &node);
                self.graph.alloc_decl(Declaration {
                    info: self.node_info(&node),
                    name: String::new(),
                    kind: DeclarationKind::Problem,
                    annotations: Vec::new(),
                })
            }
        }
    }

    fn handle_function_definition(&mut self, node: Node) -> DeclId {
        let (mut return_type, _) = self.resolve_qualified_type(node);

        // Pointer and reference returns wrap the function declarator; each
        // layer shapes the return type on the way down to it
        let mut declarator = node.child_by_field_name("declarator");
        while let Some(current) = declarator {
            match current.kind() {
                "pointer_declarator" => return_type = self.adjusted_type(return_type, "*"),
                "reference_declarator" => return_type = self.adjusted_type(return_type, "&"),
                _ => break,
            }
            declarator = current
                .child_by_field_name("declarator")
                .or_else(|| current.named_child(0));
        }

        let name = declarator
            .and_then(|function_declarator| function_declarator.child_by_field_name("declarator"))
            .and_then(|name_node| self.code_of(&name_node))
            .unwrap_or_default();

        // Parameters and the body share the function scope
        self.scopes.enter_scope(node.id());

        let mut parameters = Vec::new();
        if let Some(list) = declarator.and_then(|d| d.child_by_field_name("parameters")) {
            let mut cursor = list.walk();
            for parameter in list.named_children(&mut cursor) {
                if parameter.kind() == "parameter_declaration" {
                    parameters.push(self.handle_parameter(parameter));
                }
            }
        }

        let body = node
            .child_by_field_name("body")
            .map(|body| self.handle_statement(body));

        self.scopes.leave_scope(node.id());

        let annotations = self.process_attributes(node);
        self.graph.alloc_decl(Declaration {
            info: self.node_info(&node),
            name,
            kind: DeclarationKind::Function {
                return_type,
                parameters,
                body,
            },
            annotations,
        })
    }

    fn handle_parameter(&mut self, node: Node) -> DeclId {
        let (base, _) = self.resolve_qualified_type(node);

        let mut ty = base;
        let mut name = String::new();
        let mut initializer = None;
        if let Some(declarator) = node.child_by_field_name("declarator") {
            self.process_declarator(declarator, &mut ty, &mut name, &mut initializer);
        }

        let id = self.graph.alloc_decl(Declaration {
            info: self.node_info(&node),
            name: name.clone(),
            kind: DeclarationKind::Variable { ty, initializer },
            annotations: Vec::new(),
        });
        self.scopes.add_declaration(name, id);
        id
    }

    fn handle_record_specifier(&mut self, node: Node, tag: RecordTag) -> DeclId {
        let name = node
            .child_by_field_name("name")
            .and_then(|name_node| self.code_of(&name_node))
            .unwrap_or_default();

        self.scopes.enter_scope(node.id());

        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            for member in body.named_children(&mut cursor) {
                if DeclKind::from_kind(member.kind()).is_some() {
                    // Methods and nested records go through this builder
                    let id = self.handle_declaration(member);
                    let member_name = self.graph.decl(id).name.clone();
                    self.scopes.add_declaration(member_name, id);
                } else {
                    // Field declarations register their variables themselves
                    self.handle_statement(member);
                }
            }
        }

        // The member list mirrors the harvested scope contents, in source
        // order
        let members = self.scopes.leave_scope(node.id());

        let annotations = self.process_attributes(node);
        self.graph.alloc_decl(Declaration {
            info: self.node_info(&node),
            name,
            kind: DeclarationKind::Record { tag, members },
            annotations,
        })
    }
}
