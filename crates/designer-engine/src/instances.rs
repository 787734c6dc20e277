//! Instance registry: the declared forest of component instances.

use designer_model::{ComponentInstance, DashboardDsl};

/// Holds the declared component trees for one session.
///
/// The registry is swapped wholesale on reconfiguration; individual
/// instances are never mutated in place.
#[derive(Debug, Clone, Default)]
pub struct InstanceRegistry {
    roots: Vec<ComponentInstance>,
}

impl InstanceRegistry {
    pub fn new(roots: Vec<ComponentInstance>) -> Self {
        Self { roots }
    }

    pub fn from_dsl(dsl: DashboardDsl) -> Self {
        Self::new(dsl.component_instances)
    }

    pub fn roots(&self) -> &[ComponentInstance] {
        &self.roots
    }

    /// Resolves an id anywhere in the forest, depth-first.
    ///
    /// An unknown id returns `None`; callers render a visible fallback,
    /// this is not an exceptional condition.
    pub fn resolve(&self, id: &str) -> Option<&ComponentInstance> {
        self.iter().find(|instance| instance.id == id)
    }

    /// All instances including descendants, in declaration (preorder)
    /// order.
    pub fn iter(&self) -> InstanceIter<'_> {
        InstanceIter {
            stack: self.roots.iter().rev().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// Preorder iterator over an instance forest.
pub struct InstanceIter<'a> {
    stack: Vec<&'a ComponentInstance>,
}

impl<'a> Iterator for InstanceIter<'a> {
    type Item = &'a ComponentInstance;

    fn next(&mut self) -> Option<Self::Item> {
        let instance = self.stack.pop()?;
        self.stack.extend(instance.children.iter().rev());
        Some(instance)
    }
}
