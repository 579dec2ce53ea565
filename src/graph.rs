//! Program graph - arena-backed representation of one translated unit
//!
//! All graph entities produced for a unit live in typed arenas inside a
//! [`ProgramGraph`]; tree structure is expressed through index handles
//! (`DeclId`, `StmtId`, `ExprId`) rather than owning pointers. The
//! [`TranslationUnit`] roots the graph and owns the arenas.

use crate::diagnostics::Diagnostic;
use crate::location::Region;
use crate::types::{TypeId, TypeRegistry};
use serde::{Deserialize, Serialize};

/// Handle to a declaration in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeclId(pub u32);

/// Handle to a statement in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StmtId(pub u32);

/// Handle to an expression in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExprId(pub u32);

/// Metadata every graph node carries: an optional verbatim source slice and
/// an optional 1-based location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeInfo {
    /// Verbatim source text covered by the originating syntax node
    pub code: Option<String>,
    /// 1-based source region
    pub location: Option<Region>,
}

/// Record tag - whether a record was introduced as a class or a struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordTag {
    Class,
    Struct,
}

/// The declaration-specific payload of a [`Declaration`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum DeclarationKind {
    /// Class/struct declaration; members mirror the harvested scope
    /// contents in source order.
    Record {
        tag: RecordTag,
        members: Vec<DeclId>,
    },
    /// Function definition with its parameters and compound body.
    Function {
        return_type: TypeId,
        parameters: Vec<DeclId>,
        body: Option<StmtId>,
    },
    /// Variable (or field/parameter) with its resolved type.
    Variable {
        ty: TypeId,
        initializer: Option<ExprId>,
    },
    /// Placeholder for an unrecognized declaration kind; a diagnostic is
    /// recorded alongside.
    Problem,
}

/// A declaration node in the program graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Declaration {
    pub info: NodeInfo,
    /// Declared name; empty when the syntax carried none
    pub name: String,
    #[serde(flatten)]
    pub kind: DeclarationKind,
    /// Attribute-derived annotations, populated only when annotation
    /// processing is enabled
    pub annotations: Vec<Annotation>,
}

/// The statement-specific payload of a [`Statement`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum StatementKind {
    /// Block statement; children in source order (intended execution order).
    Compound { statements: Vec<StmtId> },
    /// Declaration statement. Multi-declarator statements yield one variable
    /// per declarator, sharing one base type. If resolving the base type
    /// declared a record inline, it is attached as a side output.
    Declarations {
        declarations: Vec<DeclId>,
        record: Option<DeclId>,
    },
    /// Expression statement wrapping a single expression.
    Expression { expression: ExprId },
    /// Return, with or without a value.
    Return { value: Option<ExprId> },
    /// Placeholder for an unrecognized statement kind; a diagnostic is
    /// recorded alongside.
    Problem,
}

/// A statement node in the program graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statement {
    pub info: NodeInfo,
    #[serde(flatten)]
    pub kind: StatementKind,
}

/// Coarse classification of an expression.
///
/// Operator-specific graph shapes belong to the expression-construction
/// subsystem; this frontend records expressions as opaque leaves with a
/// category, code slice and location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpressionKind {
    Reference,
    Member,
    Call,
    Binary,
    Unary,
    Assignment,
    Literal,
    Problem,
}

/// An expression node in the program graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expression {
    pub info: NodeInfo,
    pub kind: ExpressionKind,
    /// For references: the declaration lexical lookup found while the
    /// expression's scope was active. Absence is normal; full resolution
    /// may happen in a later pass.
    pub declaration: Option<DeclId>,
}

/// One argument of an annotation, wrapping the built expression and its
/// verbatim source text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationMember {
    /// Member name; attribute arguments are positional, so usually empty
    pub name: String,
    pub value: ExprId,
    pub code: Option<String>,
}

/// An annotation derived from C++ attribute syntax (`[[name(args)]]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    pub name: String,
    pub code: Option<String>,
    pub members: Vec<AnnotationMember>,
}

/// Typed arenas holding every node produced for one translation unit.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProgramGraph {
    decls: Vec<Declaration>,
    stmts: Vec<Statement>,
    exprs: Vec<Expression>,
}

impl ProgramGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration, returning its handle.
    pub fn alloc_decl(&mut self, decl: Declaration) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        self.decls.push(decl);
        id
    }

    /// Add a statement, returning its handle.
    pub fn alloc_stmt(&mut self, stmt: Statement) -> StmtId {
        let id = StmtId(self.stmts.len() as u32);
        self.stmts.push(stmt);
        id
    }

    /// Add an expression, returning its handle.
    pub fn alloc_expr(&mut self, expr: Expression) -> ExprId {
        let id = ExprId(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    /// Get a declaration by handle.
    pub fn decl(&self, id: DeclId) -> &Declaration {
        &self.decls[id.0 as usize]
    }

    /// Get a declaration by handle, mutably.
    pub fn decl_mut(&mut self, id: DeclId) -> &mut Declaration {
        &mut self.decls[id.0 as usize]
    }

    /// Get a statement by handle.
    pub fn stmt(&self, id: StmtId) -> &Statement {
        &self.stmts[id.0 as usize]
    }

    /// Get an expression by handle.
    pub fn expr(&self, id: ExprId) -> &Expression {
        &self.exprs[id.0 as usize]
    }

    /// All declarations in allocation order.
    pub fn decls(&self) -> impl Iterator<Item = (DeclId, &Declaration)> {
        self.decls
            .iter()
            .enumerate()
            .map(|(i, d)| (DeclId(i as u32), d))
    }

    /// All statements in allocation order.
    pub fn stmts(&self) -> impl Iterator<Item = (StmtId, &Statement)> {
        self.stmts
            .iter()
            .enumerate()
            .map(|(i, s)| (StmtId(i as u32), s))
    }

    /// Number of declarations in the graph.
    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }

    /// Number of statements in the graph.
    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    /// Number of expressions in the graph.
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }
}

/// The graph root produced from one source input.
///
/// Owns the node arenas and the diagnostics collected while building them.
/// A unit with diagnostics is still a valid (degraded) result; fatal
/// conditions surface as [`crate::Error`] instead.
#[derive(Debug, Serialize, Deserialize)]
pub struct TranslationUnit {
    /// Path of the source unit, as given by the caller
    pub path: String,
    pub info: NodeInfo,
    /// Top-level declarations in source order
    pub declarations: Vec<DeclId>,
    pub graph: ProgramGraph,
    /// Canonical types interned while building this unit
    pub types: TypeRegistry,
    /// Non-fatal degradation reports (unrecognized syntax-node kinds)
    pub diagnostics: Vec<Diagnostic>,
}

impl TranslationUnit {
    /// Find a top-level declaration by name.
    pub fn declaration_named(&self, name: &str) -> Option<&Declaration> {
        self.declarations
            .iter()
            .map(|id| self.graph.decl(*id))
            .find(|decl| decl.name == name)
    }
}
