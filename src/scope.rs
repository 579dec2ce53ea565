//! Scope manager - hierarchical symbol table for one translation unit
//!
//! The scope tree mirrors lexical nesting. Scopes live in an arena and hold
//! a non-owning parent index, avoiding cyclic ownership while keeping
//! O(depth) lookup. A stack of active scope ids tracks the current nesting
//! during the walk; it is always non-empty between `reset_to_global` and the
//! end of translation.
//!
//! Enter/leave imbalance is a builder contract bug, not a user-facing error:
//! it is guarded by debug assertions only.

use crate::graph::DeclId;

/// Index of a scope in the manager's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

impl ScopeId {
    /// The global (root) scope of a unit.
    pub fn global() -> Self {
        Self(0)
    }
}

/// One lexical scope: the syntax node that introduced it, its parent and
/// the declarations registered directly in it, in source order.
#[derive(Debug)]
pub struct Scope {
    /// Identity of the introducing syntax node (`tree_sitter::Node::id`)
    introduced_by: usize,
    parent: Option<ScopeId>,
    declarations: Vec<(String, DeclId)>,
}

/// Hierarchical symbol table driven as a stack during the walk.
#[derive(Debug, Default)]
pub struct ScopeManager {
    scopes: Vec<Scope>,
    stack: Vec<ScopeId>,
}

impl ScopeManager {
    /// Create a manager with no scopes; `reset_to_global` must run before
    /// any other operation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all previous state and push a fresh global scope owned by
    /// the unit whose root node is `introduced_by`. Called exactly once per
    /// translation, at the very start.
    pub fn reset_to_global(&mut self, introduced_by: usize) {
        self.scopes.clear();
        self.stack.clear();
        self.scopes.push(Scope {
            introduced_by,
            parent: None,
            declarations: Vec::new(),
        });
        self.stack.push(ScopeId::global());
    }

    /// Push a new child scope under the current top, associated 1:1 with
    /// the introducing syntax node.
    pub fn enter_scope(&mut self, introduced_by: usize) -> ScopeId {
        debug_assert!(!self.stack.is_empty(), "enter_scope before reset_to_global");
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            introduced_by,
            parent: self.stack.last().copied(),
            declarations: Vec::new(),
        });
        self.stack.push(id);
        id
    }

    /// Pop the top scope and hand back the declarations it collected, in
    /// source order. Must match a prior `enter_scope` on the same node.
    pub fn leave_scope(&mut self, introduced_by: usize) -> Vec<DeclId> {
        debug_assert!(self.stack.len() > 1, "leave_scope would pop the global scope");
        let top = self.stack.pop().map(|id| &self.scopes[id.0 as usize]);
        debug_assert_eq!(
            top.map(|scope| scope.introduced_by),
            Some(introduced_by),
            "leave_scope does not match the entered scope"
        );
        top.map(|scope| scope.declarations.iter().map(|(_, id)| *id).collect())
            .unwrap_or_default()
    }

    /// Append a declaration to the current top scope, in call order.
    pub fn add_declaration(&mut self, name: impl Into<String>, decl: DeclId) {
        debug_assert!(!self.stack.is_empty(), "add_declaration outside any scope");
        if let Some(top) = self.stack.last() {
            self.scopes[top.0 as usize]
                .declarations
                .push((name.into(), decl));
        }
    }

    /// Resolve a name from the innermost active scope outwards.
    ///
    /// Absence is a normal, non-error result: not every reference resolves
    /// during this pass. Within one scope the latest declaration of a name
    /// wins.
    pub fn resolve(&self, name: &str) -> Option<DeclId> {
        for scope_id in self.stack.iter().rev() {
            let scope = &self.scopes[scope_id.0 as usize];
            if let Some((_, decl)) = scope
                .declarations
                .iter()
                .rev()
                .find(|(declared, _)| declared == name)
            {
                return Some(*decl);
            }
        }
        None
    }

    /// Current active scope, innermost first.
    pub fn current(&self) -> Option<ScopeId> {
        self.stack.last().copied()
    }

    /// Parent of a scope, if it is not the root.
    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes[scope.0 as usize].parent
    }

    /// Depth of the active-scope stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Declarations registered directly in a scope, in source order.
    pub fn declarations_in(&self, scope: ScopeId) -> Vec<DeclId> {
        self.scopes[scope.0 as usize]
            .declarations
            .iter()
            .map(|(_, id)| *id)
            .collect()
    }
}
