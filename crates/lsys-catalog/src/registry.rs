use crate::builtin::BUILTIN;
use crate::error::{CatalogError, Result};
use crate::fractal::FractalDef;

/// Ordered set of fractal definitions, looked up by slug.
#[derive(Debug, Clone)]
pub struct Registry {
    fractals: Vec<&'static FractalDef>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Registry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fractals: Vec::new(),
        }
    }

    /// The built-in fractals in menu order.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            fractals: BUILTIN.to_vec(),
        }
    }

    /// Add a definition. A definition with the same slug is replaced in place.
    pub fn register(&mut self, def: &'static FractalDef) {
        match self.fractals.iter_mut().find(|f| f.slug == def.slug) {
            Some(slot) => *slot = def,
            None => self.fractals.push(def),
        }
    }

    pub fn get(&self, slug: &str) -> Result<&'static FractalDef> {
        self.fractals
            .iter()
            .copied()
            .find(|f| f.slug == slug)
            .ok_or_else(|| CatalogError::unknown(slug))
    }

    /// Definition at menu position `index`.
    #[must_use]
    pub fn nth(&self, index: usize) -> Option<&'static FractalDef> {
        self.fractals.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static FractalDef> + '_ {
        self.fractals.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fractals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fractals.is_empty()
    }
}
