use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{FillError, FillResult};

/// Per-run switches chosen by the trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillOptions {
    /// Fill only fields carrying a required marker.
    pub only_required: bool,
    /// Leave fields that already hold a value or selection alone.
    pub skip_filled: bool,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            only_required: false,
            skip_filled: true,
        }
    }
}

impl FillOptions {
    /// Overlay the fields present in `patch`.
    pub fn merged(self, patch: &FillOptionsPatch) -> Self {
        Self {
            only_required: patch.only_required.unwrap_or(self.only_required),
            skip_filled: patch.skip_filled.unwrap_or(self.skip_filled),
        }
    }
}

/// Partial options as delivered in a trigger message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillOptionsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_filled: Option<bool>,
}

/// Pauses between simulated steps, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// After clicking a dropdown toggle.
    pub open_menu: u64,
    /// After clicking a dropdown item.
    pub pick_option: u64,
    /// After clicking the toggle again to close a multi-select.
    pub close_menu: u64,
    /// After every filled field.
    pub between_fields: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            open_menu: 500,
            pick_option: 200,
            close_menu: 200,
            between_fields: 300,
        }
    }
}

impl Timings {
    pub fn open_menu(&self) -> Duration {
        Duration::from_millis(self.open_menu)
    }

    pub fn pick_option(&self) -> Duration {
        Duration::from_millis(self.pick_option)
    }

    pub fn close_menu(&self) -> Duration {
        Duration::from_millis(self.close_menu)
    }

    pub fn between_fields(&self) -> Duration {
        Duration::from_millis(self.between_fields)
    }

    /// All pauses set to zero.
    pub fn immediate() -> Self {
        Self {
            open_menu: 0,
            pick_option: 0,
            close_menu: 0,
            between_fields: 0,
        }
    }
}

/// Class and structure fingerprints of the supported widget library.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSelectors {
    pub select_wrapper: String,
    pub single_select_input: String,
    pub multi_select_input: String,
    pub toggle: String,
    pub menu: String,
    pub menu_item: String,
    pub selected_item: String,
    pub checkbox_label: String,
    pub checkbox_unchecked_class: String,
    pub checkbox_checked_class: String,
    pub radio_group: String,
    pub radio_option: String,
    pub number_wrapper: String,
    pub library_date_input: String,
    pub datetime_picker: String,
    pub date_range_picker: String,
    pub field_wrapper: String,
    pub field_label: String,
    pub required_marker: String,
}

impl Default for WidgetSelectors {
    fn default() -> Self {
        Self {
            select_wrapper: ".egisz-select-wrapper".into(),
            single_select_input: "input.n2o-inp".into(),
            multi_select_input: "textarea.n2o-inp--multi".into(),
            toggle: ".n2o-input-select__toggle".into(),
            menu: ".n2o-input-select__menu".into(),
            menu_item: "button.dropdown-item".into(),
            selected_item: ".n2o-input-select__selected-item".into(),
            checkbox_label: "label.zireael-checkbox".into(),
            checkbox_unchecked_class: "zireael-checkbox_unchecked".into(),
            checkbox_checked_class: "zireael-checkbox_checked".into(),
            radio_group: ".zireael-radio-group".into(),
            radio_option: "label.zireael-radio".into(),
            number_wrapper: ".n2o-input-number".into(),
            library_date_input: "input.zireael-input".into(),
            datetime_picker: ".zireael-datepicker".into(),
            date_range_picker: ".zireael-date-range-picker".into(),
            field_wrapper: ".zireael-field".into(),
            field_label: ".zireael-field__label".into(),
            required_marker: ".zireael-field_required".into(),
        }
    }
}

impl WidgetSelectors {
    fn entries(&self) -> [(&'static str, &str); 19] {
        [
            ("select_wrapper", self.select_wrapper.as_str()),
            ("single_select_input", self.single_select_input.as_str()),
            ("multi_select_input", self.multi_select_input.as_str()),
            ("toggle", self.toggle.as_str()),
            ("menu", self.menu.as_str()),
            ("menu_item", self.menu_item.as_str()),
            ("selected_item", self.selected_item.as_str()),
            ("checkbox_label", self.checkbox_label.as_str()),
            ("checkbox_unchecked_class", self.checkbox_unchecked_class.as_str()),
            ("checkbox_checked_class", self.checkbox_checked_class.as_str()),
            ("radio_group", self.radio_group.as_str()),
            ("radio_option", self.radio_option.as_str()),
            ("number_wrapper", self.number_wrapper.as_str()),
            ("library_date_input", self.library_date_input.as_str()),
            ("datetime_picker", self.datetime_picker.as_str()),
            ("date_range_picker", self.date_range_picker.as_str()),
            ("field_wrapper", self.field_wrapper.as_str()),
            ("field_label", self.field_label.as_str()),
            ("required_marker", self.required_marker.as_str()),
        ]
    }
}

/// Engine tuning, loaded as the `engine` section of the configuration file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub timings: Timings,
    /// Repeat the sweep when it changed something.
    pub recheck_new_fields: bool,
    /// Upper bound of items added to a multi-select per run.
    pub multi_select_picks: usize,
    /// Click the toggle again after picking multi-select items.
    pub close_multi_select: bool,
    /// Type through the platform value setter so intercepting frameworks see each key.
    pub native_setter_typing: bool,
    pub selectors: WidgetSelectors,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timings: Timings::default(),
            recheck_new_fields: true,
            multi_select_picks: 2,
            close_multi_select: true,
            native_setter_typing: true,
            selectors: WidgetSelectors::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    pub fn with_recheck(mut self, recheck: bool) -> Self {
        self.recheck_new_fields = recheck;
        self
    }

    pub fn with_native_setter_typing(mut self, enabled: bool) -> Self {
        self.native_setter_typing = enabled;
        self
    }

    pub fn validate(&self) -> FillResult<()> {
        if self.multi_select_picks == 0 {
            return Err(FillError::InvalidConfig(
                "multi_select_picks must be at least 1".into(),
            ));
        }
        for (name, value) in self.selectors.entries() {
            if value.trim().is_empty() {
                return Err(FillError::InvalidConfig(format!(
                    "selectors.{name} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_overrides_only_present_fields() {
        let patch: FillOptionsPatch = serde_json::from_str(r#"{"onlyRequired": true}"#).unwrap();
        let merged = FillOptions::default().merged(&patch);
        assert!(merged.only_required);
        assert!(merged.skip_filled);
    }

    #[test]
    fn partial_engine_config_keeps_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"timings": {"open_menu": 50}, "multi_select_picks": 3}"#)
                .unwrap();
        assert_eq!(config.timings.open_menu, 50);
        assert_eq!(config.timings.pick_option, 200);
        assert_eq!(config.multi_select_picks, 3);
        assert_eq!(config.selectors.menu_item, "button.dropdown-item");
    }

    #[test]
    fn validate_rejects_empty_selector() {
        let mut config = EngineConfig::default();
        assert!(config.validate().is_ok());
        config.selectors.menu = " ".into();
        assert_eq!(
            config.validate(),
            Err(FillError::InvalidConfig("selectors.menu must not be empty".into()))
        );
    }
}
