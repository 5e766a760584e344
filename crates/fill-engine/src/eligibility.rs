use dom_port::ElementInfo;

use crate::classifier::{FieldFacts, WidgetCategory};
use crate::config::FillOptions;
use crate::model::SkipReason;

/// Input types that never receive test data.
pub(crate) const EXCLUDED_INPUT_TYPES: &[&str] =
    &["hidden", "submit", "button", "reset", "image", "file"];

/// Checks that need only the element snapshot.
pub(crate) fn precheck(info: &ElementInfo) -> Option<SkipReason> {
    if EXCLUDED_INPUT_TYPES
        .iter()
        .any(|kind| info.is_input_type(kind))
    {
        return Some(SkipReason::ExcludedType);
    }
    if info.disabled {
        return Some(SkipReason::Disabled);
    }
    if !info.visible {
        return Some(SkipReason::Invisible);
    }
    None
}

/// Checks that depend on the widget category and the run options.
pub(crate) fn exclusion(
    facts: &FieldFacts,
    category: WidgetCategory,
    options: &FillOptions,
) -> Option<SkipReason> {
    if facts.info.readonly && !category.readonly_by_design() {
        return Some(SkipReason::Readonly);
    }
    if options.only_required && !is_required(facts) {
        return Some(SkipReason::NotRequired);
    }
    None
}

fn is_required(facts: &FieldFacts) -> bool {
    facts.info.required || facts.info.aria_required || facts.required_marker
}
