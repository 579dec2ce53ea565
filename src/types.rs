//! Type registry - interned, value-comparable type handles
//!
//! Every type spelling observed during translation is interned exactly once:
//! two handles are equal iff their canonical spelling (including any
//! qualifier prefix) is equal. Handles backed by a record declaration
//! additionally reference the record they denote.
//!
//! A registry lives inside one unit's translation context and is dropped
//! with it; nothing is shared across units.

use crate::graph::DeclId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Spelling used for the unknown-type sentinel.
pub const UNKNOWN_TYPE_NAME: &str = "UNKNOWN";

/// Interned handle to a canonical type.
///
/// Plain index into the owning [`TypeRegistry`]. Comparing two handles from
/// the same registry compares canonical spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeId(pub u32);

impl TypeId {
    /// The sentinel handle for unresolvable or absent types.
    pub const UNKNOWN: TypeId = TypeId(0);

    /// Whether this is the unknown-type sentinel.
    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }
}

/// Canonical information for one interned type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeInfo {
    /// Canonical spelling, qualifier prefix included (e.g. `const int`)
    pub spelling: String,
    /// The record declaration this type denotes, for record-backed types
    pub record: Option<DeclId>,
}

/// Interning store for canonical type handles.
#[derive(Debug, Serialize, Deserialize)]
pub struct TypeRegistry {
    types: Vec<TypeInfo>,
    by_spelling: HashMap<String, TypeId>,
}

impl TypeRegistry {
    /// Create a fresh registry with the unknown sentinel pre-seeded at id 0.
    pub fn new() -> Self {
        let mut registry = Self {
            types: Vec::new(),
            by_spelling: HashMap::new(),
        };
        registry.intern(UNKNOWN_TYPE_NAME);
        registry
    }

    /// Intern a spelling, returning the identical handle for identical
    /// spellings.
    pub fn intern(&mut self, spelling: impl Into<String>) -> TypeId {
        let spelling = spelling.into();
        if let Some(id) = self.by_spelling.get(&spelling) {
            return *id;
        }
        let id = TypeId(self.types.len() as u32);
        self.by_spelling.insert(spelling.clone(), id);
        self.types.push(TypeInfo {
            spelling,
            record: None,
        });
        id
    }

    /// Intern a record-backed type, attaching the record declaration.
    ///
    /// If the spelling was interned before without a backing record, the
    /// record is attached to the existing handle.
    pub fn intern_record(&mut self, spelling: impl Into<String>, record: DeclId) -> TypeId {
        let id = self.intern(spelling);
        let info = &mut self.types[id.0 as usize];
        if info.record.is_none() && !id.is_unknown() {
            info.record = Some(record);
        }
        id
    }

    /// Get the canonical information for a handle.
    pub fn get(&self, id: TypeId) -> &TypeInfo {
        &self.types[id.0 as usize]
    }

    /// Get the canonical spelling for a handle.
    pub fn spelling(&self, id: TypeId) -> &str {
        &self.get(id).spelling
    }

    /// Number of interned types, sentinel included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry holds only the sentinel.
    pub fn is_empty(&self) -> bool {
        self.types.len() <= 1
    }

    /// All interned types in interning order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeInfo)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, info)| (TypeId(i as u32), info))
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
