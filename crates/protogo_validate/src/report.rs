//! The outcome of a successful validation run.

use protogo_foundation::DeclId;

#[cfg(feature = "serde")]
use serde::Serialize;

/// A schema-eligible type of a validated package.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SchemaType {
    /// Declaration id.
    pub id: DeclId,
    /// Declared name.
    pub name: String,
    /// True for struct declarations.
    pub is_struct: bool,
    /// Field numbers claimed by the struct's exported fields, ascending.
    pub tags: Vec<u32>,
}

/// Every schema-eligible type of a package that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ValidatedPackage {
    /// The package name.
    pub package_name: String,
    /// Registered types in declaration order.
    pub types: Vec<SchemaType>,
}

impl ValidatedPackage {
    /// Looks up a type by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SchemaType> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Returns the number of struct types.
    #[must_use]
    pub fn struct_count(&self) -> usize {
        self.types.iter().filter(|t| t.is_struct).count()
    }
}
