use std::sync::Arc;

use tracing::trace;

use crate::core::{OptionObject, deep_merge, deep_merge_value, get_layout_params, merge_layout_param};

use super::{ComponentModel, ThemeSource};

impl ComponentModel {
    /// Fills `option` with the theme fragment of this main type, then the
    /// default option, never touching fields `option` already has.
    ///
    /// With a layout mode, the position fields the caller supplied are
    /// reconciled back on top so a default edge cannot over-constrain them.
    pub fn merge_default_and_theme(&self, option: &mut OptionObject, theme: &dyn ThemeSource) {
        let layout_mode = self.class.layout_mode();
        let input_position = layout_mode.map(|_| get_layout_params(option));

        if let Some(fragment) = theme.get(self.main_type()) {
            deep_merge_value(option, fragment, false);
        }
        deep_merge(option, self.get_default_option(), false);

        if let (Some(mode), Some(input_position)) = (layout_mode, input_position) {
            merge_layout_param(option, &input_position, mode);
        }
    }

    /// Patches the resolved option with `new_option`, incoming fields winning,
    /// then reruns layout reconciliation and the `option_updated` hook.
    pub fn merge_option(&mut self, new_option: &OptionObject) {
        deep_merge(&mut self.option, new_option, true);
        if let Some(mode) = self.class.layout_mode() {
            merge_layout_param(&mut self.option, new_option, mode);
        }
        trace!(
            main_type = %self.main_type(),
            index = self.component_index(),
            fields = new_option.len(),
            "merged component option"
        );

        let behavior = Arc::clone(self.class.behavior());
        behavior.option_updated(self, new_option, false);
    }
}
