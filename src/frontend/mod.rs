//! Translation frontend
//!
//! The [`Frontend`] drives translation of one source unit: it invokes the
//! tree-sitter parser, then walks the concrete syntax tree top to bottom
//! through the declaration, statement and expression builders. All per-unit
//! state (type registry, scope manager, graph arenas, diagnostics) lives in
//! a [`Translator`] created fresh for every call, so independent units can
//! be translated concurrently without shared mutable state.

pub mod declaration;
pub mod expression;
pub mod statement;

use crate::config::TranslationConfig;
use crate::diagnostics::{BuilderCategory, Diagnostic};
use crate::graph::{Annotation, AnnotationMember, DeclId, NodeInfo, ProgramGraph, TranslationUnit};
use crate::location::Region;
use crate::scope::ScopeManager;
use crate::types::{TypeId, TypeRegistry};
use crate::{Error, Result};
use tree_sitter::{Node, Parser};

/// Expected kind tag of the parse root.
const TRANSLATION_UNIT_KIND: &str = "translation_unit";

/// C++ language frontend based on tree-sitter.
#[derive(Debug, Default)]
pub struct Frontend {
    config: TranslationConfig,
}

impl Frontend {
    /// Create a frontend with the given configuration.
    pub fn new(config: TranslationConfig) -> Self {
        Self { config }
    }

    /// Read and translate a source file.
    pub fn translate_file(&self, path: &std::path::Path) -> Result<TranslationUnit> {
        let source = std::fs::read_to_string(path)?;
        self.translate(&source, &path.to_string_lossy())
    }

    /// Translate one source unit into a program graph.
    ///
    /// Fails only on unit-fatal conditions (parser failure, unexpected root
    /// kind, unreadable file). Unrecognized syntax inside the unit degrades
    /// to placeholder nodes and diagnostics on the returned
    /// [`TranslationUnit`].
    pub fn translate(&self, source: &str, path: &str) -> Result<TranslationUnit> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_cpp::LANGUAGE.into())?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| Error::Parse(path.to_string()))?;
        let root = tree.root_node();

        if root.kind() != TRANSLATION_UNIT_KIND {
            return Err(Error::UnexpectedRoot {
                kind: root.kind().to_string(),
            });
        }

        let mut translator = Translator::new(source, &self.config);
        translator.scopes.reset_to_global(root.id());

        let mut declarations = Vec::new();
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            let decl = translator.handle_declaration(child);
            let name = translator.graph.decl(decl).name.clone();
            translator.scopes.add_declaration(name, decl);
            declarations.push(decl);
        }

        Ok(TranslationUnit {
            path: path.to_string(),
            info: translator.node_info(&root),
            declarations,
            graph: translator.graph,
            types: translator.registry,
            diagnostics: translator.diagnostics,
        })
    }
}

/// Dispatch classes for type syntax.
enum TypeKind {
    /// A type fully described by its source spelling
    Spelled,
    /// Inline class/struct specifier declaring a record at point of use
    Record,
    /// `auto` - deliberately left unresolved in this pass
    Auto,
}

impl TypeKind {
    fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "primitive_type"
            | "type_identifier"
            | "scoped_type_identifier"
            | "type_descriptor"
            | "template_type" => Some(Self::Spelled),
            "class_specifier" | "struct_specifier" => Some(Self::Record),
            "auto" => Some(Self::Auto),
            _ => None,
        }
    }
}

/// Per-unit translation context threaded through every builder call.
pub(crate) struct Translator<'src> {
    source: &'src str,
    config: &'src TranslationConfig,
    pub(crate) registry: TypeRegistry,
    pub(crate) scopes: ScopeManager,
    pub(crate) graph: ProgramGraph,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl<'src> Translator<'src> {
    pub(crate) fn new(source: &'src str, config: &'src TranslationConfig) -> Self {
        Self {
            source,
            config,
            registry: TypeRegistry::new(),
            scopes: ScopeManager::new(),
            graph: ProgramGraph::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Verbatim source slice covered by a node.
    pub(crate) fn code_of(&self, node: &Node) -> Option<String> {
        node.utf8_text(self.source.as_bytes())
            .ok()
            .map(str::to_string)
    }

    /// Code slice plus 1-based location for a node.
    pub(crate) fn node_info(&self, node: &Node) -> NodeInfo {
        NodeInfo {
            code: self.code_of(node),
            location: Some(Region::from_node(node)),
        }
    }

    /// Uniform degradation policy: log, record a diagnostic, and let the
    /// caller substitute a placeholder node.
    pub(crate) fn unhandled(&mut self, category: BuilderCategory, node: &Node) {
        tracing::warn!(
            "Not handling {} of kind `{}` yet: {:?}",
            category,
            node.kind(),
            self.code_of(node)
        );
        self.diagnostics.push(Diagnostic {
            category,
            kind: node.kind().to_string(),
            code: self.code_of(node),
            region: Some(Region::from_node(node)),
        });
    }

    /// Resolve type syntax to a canonical handle.
    ///
    /// Returns the handle plus any record declaration that resolving the
    /// type produced as a side output (inline class/struct at point of use).
    pub(crate) fn resolve_type(
        &mut self,
        node: Option<Node>,
        qualifier: &str,
    ) -> (TypeId, Option<DeclId>) {
        let Some(node) = node else {
            return (TypeId::UNKNOWN, None);
        };

        match TypeKind::from_kind(node.kind()) {
            Some(TypeKind::Spelled) => match self.code_of(&node) {
                Some(code) => (self.registry.intern(format!("{qualifier}{code}")), None),
                None => (TypeId::UNKNOWN, None),
            },
            Some(TypeKind::Record) => {
                let record = self.handle_declaration(node);
                let name = self.graph.decl(record).name.clone();
                let spelling = if name.is_empty() {
                    // Anonymous record: the raw specifier text is the only
                    // spelling there is, qualified like the named case
                    format!("{qualifier}{}", self.code_of(&node).unwrap_or_default())
                } else {
                    format!("{qualifier}{name}")
                };
                (self.registry.intern_record(spelling, record), Some(record))
            }
            Some(TypeKind::Auto) => (TypeId::UNKNOWN, None),
            None => {
                self.unhandled(BuilderCategory::Type, &node);
                (TypeId::UNKNOWN, None)
            }
        }
    }

    /// Resolve the `type` field of a node, folding a leading `type_qualifier`
    /// sibling (e.g. `const`) into the canonical spelling.
    ///
    /// Qualifiers and the type they modify are parsed as siblings, but must
    /// collapse into one spelling so `const int` and `int` intern to
    /// distinct handles. Qualifiers appearing after the core type are left
    /// alone.
    pub(crate) fn resolve_qualified_type(&mut self, node: Node) -> (TypeId, Option<DeclId>) {
        let type_child = node.child_by_field_name("type");

        let mut qualifier = String::new();
        for i in 0..node.named_child_count() {
            let Some(child) = node.named_child(i) else {
                continue;
            };
            if type_child.is_some_and(|tc| tc.id() == child.id()) {
                break;
            }
            if child.kind() == "type_qualifier" {
                if let Some(code) = self.code_of(&child) {
                    qualifier = code + " ";
                }
                break;
            }
        }

        self.resolve_type(type_child, &qualifier)
    }

    /// Extract annotations from any `attribute_declaration` children of a
    /// declaration node. No-op (empty result) when annotation processing is
    /// disabled.
    pub(crate) fn process_attributes(&mut self, node: Node) -> Vec<Annotation> {
        if !self.config.process_annotations {
            return Vec::new();
        }

        let mut annotations = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() != "attribute_declaration" {
                continue;
            }
            let mut attributes = child.walk();
            for attribute in child.named_children(&mut attributes) {
                if attribute.kind() == "attribute" {
                    let annotation = self.handle_attribute(attribute);
                    annotations.push(annotation);
                }
            }
        }
        annotations
    }

    fn handle_attribute(&mut self, attribute: Node) -> Annotation {
        let name = attribute
            .child_by_field_name("name")
            .and_then(|name_node| self.code_of(&name_node))
            .unwrap_or_default();

        let mut members = Vec::new();
        let mut cursor = attribute.walk();
        for child in attribute.named_children(&mut cursor) {
            if child.kind() != "argument_list" {
                continue;
            }
            let mut arguments = child.walk();
            for argument in child.named_children(&mut arguments) {
                let value = self.handle_expression(argument);
                members.push(AnnotationMember {
                    name: String::new(),
                    value,
                    code: self.code_of(&argument),
                });
            }
        }

        Annotation {
            name,
            code: self.code_of(&attribute),
            members,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DeclarationKind, StatementKind};

    fn translate(source: &str) -> TranslationUnit {
        Frontend::new(TranslationConfig::default())
            .translate(source, "test.cpp")
            .unwrap()
    }

    #[test]
    fn test_unit_roots_the_graph() {
        let unit = translate("int answer() { return 42; }\n");

        assert_eq!(unit.path, "test.cpp");
        assert_eq!(unit.declarations.len(), 1);
        assert!(unit.diagnostics.is_empty());
    }

    #[test]
    fn test_text_round_trip() {
        let source = "int answer() { return 42; }\n";
        let unit = translate(source);

        // Every recorded code slice must be a verbatim substring of the
        // input.
        for (_, decl) in unit.graph.decls() {
            if let Some(code) = &decl.info.code {
                assert!(source.contains(code.as_str()), "code slice not verbatim: {code}");
            }
        }
        let function = unit.declaration_named("answer").unwrap();
        assert_eq!(function.info.code.as_deref(), Some("int answer() { return 42; }"));
    }

    #[test]
    fn test_location_shift() {
        let unit = translate("int x;\n");

        let function = unit.graph.decl(unit.declarations[0]);
        let region = function.info.location.unwrap();
        // tree-sitter says row 0, col 0; consumers see line 1, col 1
        assert_eq!(region.start_line, 1);
        assert_eq!(region.start_column, 1);
        assert_eq!(region.end_line, 1);
    }

    #[test]
    fn test_type_interning_across_the_unit() {
        let unit = translate("void f() { int a; int b; const int c; }\n");

        let mut int_ids = Vec::new();
        let mut const_int_ids = Vec::new();
        for (_, decl) in unit.graph.decls() {
            if let DeclarationKind::Variable { ty, .. } = &decl.kind {
                match decl.name.as_str() {
                    "a" | "b" => int_ids.push(*ty),
                    "c" => const_int_ids.push(*ty),
                    _ => {}
                }
            }
        }

        assert_eq!(int_ids.len(), 2);
        assert_eq!(int_ids[0], int_ids[1], "identical spellings must share a handle");
        assert_eq!(const_int_ids.len(), 1);
        assert_ne!(int_ids[0], const_int_ids[0], "qualified spelling must be distinct");
        assert_eq!(unit.types.spelling(int_ids[0]), "int");
        assert_eq!(unit.types.spelling(const_int_ids[0]), "const int");
    }

    #[test]
    fn test_anonymous_record_spelling_keeps_the_qualifier() {
        let unit = translate("void f() { const struct { int x; } s; }\n");

        let ty = unit
            .graph
            .decls()
            .find_map(|(_, decl)| match &decl.kind {
                DeclarationKind::Variable { ty, .. } if decl.name == "s" => Some(*ty),
                _ => None,
            })
            .unwrap();
        // Anonymous spellings fold the qualifier like named ones do
        assert!(unit.types.spelling(ty).starts_with("const struct"));
        assert!(unit.types.get(ty).record.is_some());
    }

    #[test]
    fn test_annotation_gate_disabled_is_structurally_identical() {
        let annotated = "[[deprecated]] void f() { }\n";
        let plain = "void f() { }\n";

        let frontend = Frontend::new(TranslationConfig::default().with_annotations(false));
        let gated = frontend.translate(annotated, "test.cpp").unwrap();
        let baseline = Frontend::new(TranslationConfig::default())
            .translate(plain, "test.cpp")
            .unwrap();

        let gated_fn = gated.declaration_named("f").unwrap();
        let baseline_fn = baseline.declaration_named("f").unwrap();

        assert!(gated_fn.annotations.is_empty());
        assert!(matches!(gated_fn.kind, DeclarationKind::Function { .. }));
        assert_eq!(
            matches!(&gated_fn.kind, DeclarationKind::Function { body: Some(_), .. }),
            matches!(&baseline_fn.kind, DeclarationKind::Function { body: Some(_), .. }),
        );
    }

    #[test]
    fn test_annotation_extraction() {
        let unit = translate("[[myattr(1, 2)]] void f() { }\n");

        let function = unit.declaration_named("f").unwrap();
        assert_eq!(function.annotations.len(), 1);

        let annotation = &function.annotations[0];
        assert_eq!(annotation.name, "myattr");
        assert_eq!(annotation.members.len(), 2);
        assert_eq!(annotation.members[0].code.as_deref(), Some("1"));
        assert_eq!(annotation.members[1].code.as_deref(), Some("2"));
    }

    #[test]
    fn test_degraded_unit_is_still_a_success() {
        // goto has no statement handler; the unit must still translate
        let unit = translate("void f() { goto out; out: ; }\n");

        assert!(!unit.diagnostics.is_empty());
        let function = unit.declaration_named("f").unwrap();
        let DeclarationKind::Function { body: Some(body), .. } = &function.kind else {
            panic!("expected a function with a body");
        };
        assert!(matches!(
            unit.graph.stmt(*body).kind,
            StatementKind::Compound { .. }
        ));
    }

    #[test]
    fn test_fresh_state_per_unit() {
        let frontend = Frontend::new(TranslationConfig::default());

        let first = frontend.translate("struct A { int x; };\n", "a.cpp").unwrap();
        let second = frontend.translate("int y;\n", "b.cpp").unwrap();

        // Nothing from the first unit leaks into the second
        assert!(second.declaration_named("A").is_none());
        assert!(first.declaration_named("A").is_some());
    }
}
