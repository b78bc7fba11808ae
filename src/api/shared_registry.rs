use std::cell::RefCell;

use super::ComponentRegistry;

thread_local! {
    static SHARED_REGISTRY: RefCell<ComponentRegistry> = RefCell::new(ComponentRegistry::new());
}

/// Reads the shared registry of the current thread.
///
/// Component kinds are expected to be registered through
/// [`with_registry_mut`] before any document is resolved. Calling either
/// accessor from inside the closure of the other panics.
pub fn with_registry<T>(f: impl FnOnce(&ComponentRegistry) -> T) -> T {
    SHARED_REGISTRY.with(|registry| f(&registry.borrow()))
}

/// Mutates the shared registry of the current thread.
pub fn with_registry_mut<T>(f: impl FnOnce(&mut ComponentRegistry) -> T) -> T {
    SHARED_REGISTRY.with(|registry| f(&mut registry.borrow_mut()))
}

/// Clears the shared registry of the current thread.
pub fn reset_registry() {
    with_registry_mut(ComponentRegistry::reset);
}
