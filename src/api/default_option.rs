use std::sync::Arc;

use tracing::trace;

use crate::core::{OptionObject, deep_merge};

use super::{ComponentClass, ComponentRegistry};

impl ComponentRegistry {
    /// Inheritance-merged default option of `class`.
    ///
    /// Declared classes return their own default option. Extended classes
    /// merge the chain from the most-base class down, derived fields winning,
    /// and memoize the result by class id until [`ComponentRegistry::reset`].
    #[must_use]
    pub fn default_option(&self, class: &ComponentClass) -> Arc<OptionObject> {
        if !class.is_extended() {
            return Arc::clone(class.own_default_option());
        }
        if let Some(cached) = self.default_option_cache.borrow().get(&class.id()) {
            return Arc::clone(cached);
        }

        let mut chain: Vec<&ComponentClass> = Vec::new();
        let mut current = Some(class);
        while let Some(step) = current {
            chain.push(step);
            current = step.super_class().map(Arc::as_ref);
        }

        let mut merged = OptionObject::new();
        for step in chain.iter().rev() {
            deep_merge(&mut merged, step.own_default_option(), true);
        }
        trace!(
            class = %class.type_id(),
            chain_len = chain.len(),
            "merged inherited default option"
        );

        let merged = Arc::new(merged);
        self.default_option_cache
            .borrow_mut()
            .insert(class.id(), Arc::clone(&merged));
        merged
    }

    /// Number of memoized default options.
    #[must_use]
    pub fn cached_default_option_count(&self) -> usize {
        self.default_option_cache.borrow().len()
    }
}
