//! Built-in component kinds.
//!
//! Nothing registers itself: hosts call [`register_builtin_components`] once
//! on their registry before resolving documents.

pub mod axis;
pub mod data_zoom;
pub mod layout_components;
pub mod legend;

use tracing::debug;

use crate::api::ComponentRegistry;

pub use axis::{AXIS_MAIN_TYPES, AXIS_SUB_TYPES, register_axes};
pub use data_zoom::{DataZoomRangeBehavior, register_data_zoom};
pub use layout_components::{register_dataset, register_grid, register_title};
pub use legend::{LegendSelectionBehavior, register_legend};

/// Registers every built-in component kind and its sub type defaulter.
pub fn register_builtin_components(registry: &mut ComponentRegistry) {
    register_dataset(registry);
    register_grid(registry);
    register_title(registry);
    register_legend(registry);
    register_axes(registry);
    register_data_zoom(registry);
    debug!(
        main_types = registry.main_types().len(),
        "registered builtin components"
    );
}
