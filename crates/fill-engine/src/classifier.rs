//! Priority-ordered widget classification.
//!
//! Structural facts about a field are read once ([`FieldFacts::gather`]); the
//! category is then a pure function of those facts ([`classify`]).

use std::fmt;

use dom_port::{DomPort, DomResult, ElementInfo, NodeRef};
use serde::{Deserialize, Serialize};

use crate::config::WidgetSelectors;
use crate::semantic;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetCategory {
    NativeText,
    NativeSelect,
    NativeCheckboxRadio,
    LibrarySingleSelect,
    LibraryMultiSelect,
    LibraryCheckbox,
    LibraryRadioGroup,
    LibraryNumberInput,
    LibraryDateInput,
    LibraryDateTimeInput,
    GenericDateByLabel,
}

impl WidgetCategory {
    /// Library widgets that render a readonly input by design.
    pub fn readonly_by_design(self) -> bool {
        matches!(
            self,
            WidgetCategory::LibrarySingleSelect
                | WidgetCategory::LibraryMultiSelect
                | WidgetCategory::LibraryDateInput
                | WidgetCategory::LibraryDateTimeInput
        )
    }
}

impl fmt::Display for WidgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WidgetCategory::NativeText => "native_text",
            WidgetCategory::NativeSelect => "native_select",
            WidgetCategory::NativeCheckboxRadio => "native_checkbox_radio",
            WidgetCategory::LibrarySingleSelect => "library_single_select",
            WidgetCategory::LibraryMultiSelect => "library_multi_select",
            WidgetCategory::LibraryCheckbox => "library_checkbox",
            WidgetCategory::LibraryRadioGroup => "library_radio_group",
            WidgetCategory::LibraryNumberInput => "library_number_input",
            WidgetCategory::LibraryDateInput => "library_date_input",
            WidgetCategory::LibraryDateTimeInput => "library_date_time_input",
            WidgetCategory::GenericDateByLabel => "generic_date_by_label",
        };
        f.write_str(name)
    }
}

/// Structural facts about one field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldFacts {
    pub node: NodeRef,
    pub info: ElementInfo,
    pub select_wrapper: Option<NodeRef>,
    pub single_select_input: bool,
    pub multi_select_input: bool,
    pub checkbox_label: Option<NodeRef>,
    pub radio_group: Option<NodeRef>,
    pub number_wrapper: Option<NodeRef>,
    pub library_date_input: bool,
    pub datetime_picker: Option<NodeRef>,
    pub date_range_picker: Option<NodeRef>,
    pub required_marker: bool,
    pub semantic_label: String,
}

impl FieldFacts {
    pub async fn gather(
        dom: &dyn DomPort,
        node: NodeRef,
        info: ElementInfo,
        selectors: &WidgetSelectors,
    ) -> DomResult<Self> {
        let semantic_label = semantic::semantic_label(dom, node, &info, selectors).await?;
        Ok(Self {
            node,
            select_wrapper: dom.closest(node, &selectors.select_wrapper).await?,
            single_select_input: dom.matches(node, &selectors.single_select_input).await?,
            multi_select_input: dom.matches(node, &selectors.multi_select_input).await?,
            checkbox_label: dom.closest(node, &selectors.checkbox_label).await?,
            radio_group: dom.closest(node, &selectors.radio_group).await?,
            number_wrapper: dom.closest(node, &selectors.number_wrapper).await?,
            library_date_input: dom.matches(node, &selectors.library_date_input).await?,
            datetime_picker: dom.closest(node, &selectors.datetime_picker).await?,
            date_range_picker: dom.closest(node, &selectors.date_range_picker).await?,
            required_marker: dom.closest(node, &selectors.required_marker).await?.is_some(),
            semantic_label,
            info,
        })
    }

    /// Plain text-entry control: textarea or a keyboard-typed input type.
    pub fn is_text_like(&self) -> bool {
        if self.info.is_tag("textarea") {
            return true;
        }
        matches!(
            self.info.input_type.as_deref(),
            Some("text" | "search" | "email" | "tel" | "url" | "password")
        )
    }
}

type Rule = (fn(&FieldFacts) -> bool, WidgetCategory);

/// Evaluated top to bottom, first match wins.
const RULES: &[Rule] = &[
    (
        |f: &FieldFacts| f.multi_select_input && f.select_wrapper.is_some(),
        WidgetCategory::LibraryMultiSelect,
    ),
    (
        |f: &FieldFacts| f.single_select_input && f.select_wrapper.is_some(),
        WidgetCategory::LibrarySingleSelect,
    ),
    (
        |f: &FieldFacts| f.info.is_input_type("checkbox") && f.checkbox_label.is_some(),
        WidgetCategory::LibraryCheckbox,
    ),
    (|f: &FieldFacts| f.radio_group.is_some(), WidgetCategory::LibraryRadioGroup),
    (
        |f: &FieldFacts| f.info.is_tag("input") && f.number_wrapper.is_some(),
        WidgetCategory::LibraryNumberInput,
    ),
    (
        |f: &FieldFacts| f.library_date_input && f.datetime_picker.is_some(),
        WidgetCategory::LibraryDateTimeInput,
    ),
    (
        |f: &FieldFacts| f.library_date_input && f.date_range_picker.is_some(),
        WidgetCategory::LibraryDateInput,
    ),
    (
        |f: &FieldFacts| f.is_text_like() && semantic::is_date_label(&f.semantic_label),
        WidgetCategory::GenericDateByLabel,
    ),
    (|f: &FieldFacts| f.info.is_tag("select"), WidgetCategory::NativeSelect),
    (
        |f: &FieldFacts| f.info.is_input_type("checkbox") || f.info.is_input_type("radio"),
        WidgetCategory::NativeCheckboxRadio,
    ),
];

pub fn classify(facts: &FieldFacts) -> WidgetCategory {
    RULES
        .iter()
        .find(|(applies, _)| applies(facts))
        .map(|(_, category)| *category)
        .unwrap_or(WidgetCategory::NativeText)
}
