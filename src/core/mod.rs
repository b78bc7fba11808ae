pub mod layout;
pub mod option;
pub mod type_id;

pub use layout::{LOCATION_PARAMS, LayoutMode, get_layout_params, merge_layout_param};
pub use option::{OptionObject, deep_merge, deep_merge_value, get_path, has_value};
pub use type_id::{ComponentTypeId, TYPE_DELIMITER};
