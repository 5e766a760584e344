//! One fill protocol per widget category.
//!
//! A strategy returns `Ok(false)` when an element it expected (menu, option, label)
//! is missing: the field is left as is and the run goes on.

mod select;
mod text;
mod toggle;

use std::time::Duration;

use dom_port::{DomPort, DomResult};

use crate::classifier::{FieldFacts, WidgetCategory};
use crate::config::EngineConfig;
use crate::simulator::Simulator;


pub(crate) struct StrategyContext<'a> {
    pub dom: &'a dyn DomPort,
    pub config: &'a EngineConfig,
    pub sim: Simulator<'a>,
}

impl<'a> StrategyContext<'a> {
    pub fn new(dom: &'a dyn DomPort, config: &'a EngineConfig) -> Self {
        Self {
            dom,
            config,
            sim: Simulator::new(dom, config.native_setter_typing),
        }
    }

    pub async fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Run the strategy for `category`. `true` when the field was changed.
pub(crate) async fn fill(
    ctx: &StrategyContext<'_>,
    category: WidgetCategory,
    facts: &FieldFacts,
) -> DomResult<bool> {
    match category {
        WidgetCategory::LibraryMultiSelect => select::fill_multi_select(ctx, facts).await,
        WidgetCategory::LibrarySingleSelect => select::fill_single_select(ctx, facts).await,
        WidgetCategory::NativeSelect => select::fill_native_select(ctx, facts).await,
        WidgetCategory::LibraryCheckbox => toggle::fill_library_checkbox(ctx, facts).await,
        WidgetCategory::LibraryRadioGroup => toggle::fill_radio_group(ctx, facts).await,
        WidgetCategory::NativeCheckboxRadio => toggle::fill_native_toggle(ctx, facts).await,
        WidgetCategory::LibraryNumberInput => text::fill_number(ctx, facts).await,
        WidgetCategory::LibraryDateTimeInput => text::fill_library_date_time(ctx, facts).await,
        WidgetCategory::LibraryDateInput => text::fill_library_date_range(ctx, facts).await,
        WidgetCategory::GenericDateByLabel => text::fill_date_by_label(ctx, facts).await,
        WidgetCategory::NativeText => text::fill_text(ctx, facts).await,
    }
}

/// Whether the field already carries a value or selection, judged the way its
/// category displays one.
pub(crate) async fn is_filled(
    ctx: &StrategyContext<'_>,
    category: WidgetCategory,
    facts: &FieldFacts,
) -> DomResult<bool> {
    let selectors = &ctx.config.selectors;
    match category {
        WidgetCategory::LibraryMultiSelect => {
            if facts.info.has_value() {
                return Ok(true);
            }
            match facts.select_wrapper {
                Some(wrapper) => Ok(ctx
                    .dom
                    .query(wrapper, &selectors.selected_item)
                    .await?
                    .is_some()),
                None => Ok(false),
            }
        }
        WidgetCategory::LibraryRadioGroup => match facts.radio_group {
            Some(group) => Ok(ctx.dom.query(group, "input:checked").await?.is_some()),
            None => Ok(false),
        },
        WidgetCategory::LibraryCheckbox => match facts.checkbox_label {
            Some(label) => Ok(ctx
                .dom
                .inspect(label)
                .await?
                .has_class(&selectors.checkbox_checked_class)),
            None => Ok(false),
        },
        WidgetCategory::NativeCheckboxRadio => Ok(facts.info.checked),
        _ => Ok(facts.info.has_value()),
    }
}
