//! The declaration index.
//!
//! Records which type declarations are schema-eligible and which field
//! numbers each struct declaration has claimed. Both only grow during a
//! run.

use std::collections::{BTreeSet, HashMap, HashSet};

use protogo_foundation::DeclId;

/// Registry of exported types and their claimed field numbers.
#[derive(Clone, Debug, Default)]
pub struct DeclarationIndex {
    exported: HashSet<DeclId>,
    field_tags: HashMap<DeclId, BTreeSet<u32>>,
}

impl DeclarationIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a declaration as exported. Returns false if it already was.
    pub fn register(&mut self, id: DeclId) -> bool {
        self.exported.insert(id)
    }

    /// Returns true if the declaration has been registered.
    #[must_use]
    pub fn is_exported(&self, id: DeclId) -> bool {
        self.exported.contains(&id)
    }

    /// Starts an empty tag set for a struct declaration.
    pub fn begin_struct(&mut self, id: DeclId) {
        self.field_tags.entry(id).or_default();
    }

    /// Claims a field number for a struct declaration.
    ///
    /// Returns false if the number was already claimed by that declaration.
    pub fn claim_tag(&mut self, id: DeclId, number: u32) -> bool {
        self.field_tags.entry(id).or_default().insert(number)
    }

    /// Returns the numbers claimed by a struct declaration.
    #[must_use]
    pub fn tags_of(&self, id: DeclId) -> Option<&BTreeSet<u32>> {
        self.field_tags.get(&id)
    }

    /// Returns every registered declaration, in id order.
    #[must_use]
    pub fn exported_types(&self) -> Vec<DeclId> {
        let mut ids: Vec<_> = self.exported.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Returns the number of registered declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.exported.len()
    }

    /// Returns true if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exported.is_empty()
    }
}
