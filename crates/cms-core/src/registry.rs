//! # Type Registry
//!
//! The set of declared content types, fixed at startup. Order follows the
//! configuration so that `/api/describe` reports types the way they were
//! declared.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::types::TypeDef;

/// Immutable, ordered collection of content types.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: Vec<TypeDef>,
    by_name: HashMap<String, usize>,
}

impl TypeRegistry {
    /// Build a registry, rejecting invalid or duplicate declarations.
    pub fn new(types: Vec<TypeDef>) -> CoreResult<Self> {
        let mut by_name = HashMap::with_capacity(types.len());
        for (idx, def) in types.iter().enumerate() {
            def.check()?;
            if by_name.insert(def.name().to_string(), idx).is_some() {
                return Err(CoreError::DuplicateType(def.name().to_string()));
            }
        }
        Ok(Self { types, by_name })
    }

    /// Look up a type by name.
    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.by_name.get(name).map(|&idx| &self.types[idx])
    }

    /// Types in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl IntoIterator for TypeRegistry {
    type Item = TypeDef;
    type IntoIter = std::vec::IntoIter<TypeDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.into_iter()
    }
}
