use dom_port::DomResult;

use super::StrategyContext;
use crate::classifier::FieldFacts;

/// Click the library checkbox label while it shows the unchecked state.
pub(super) async fn fill_library_checkbox(
    ctx: &StrategyContext<'_>,
    facts: &FieldFacts,
) -> DomResult<bool> {
    let Some(label) = facts.checkbox_label else {
        return Ok(false);
    };
    let unchecked = ctx
        .dom
        .inspect(label)
        .await?
        .has_class(&ctx.config.selectors.checkbox_unchecked_class);
    if !unchecked {
        return Ok(false);
    }
    ctx.sim.click(label).await?;
    Ok(true)
}

pub(super) async fn fill_radio_group(
    ctx: &StrategyContext<'_>,
    facts: &FieldFacts,
) -> DomResult<bool> {
    let Some(group) = facts.radio_group else {
        return Ok(false);
    };
    let Some(first) = ctx
        .dom
        .query(group, &ctx.config.selectors.radio_option)
        .await?
    else {
        return Ok(false);
    };
    ctx.sim.click(first).await?;
    Ok(true)
}

/// Native checkbox or radio: click only when unchecked.
pub(super) async fn fill_native_toggle(
    ctx: &StrategyContext<'_>,
    facts: &FieldFacts,
) -> DomResult<bool> {
    if facts.info.checked {
        return Ok(false);
    }
    ctx.sim.click(facts.node).await?;
    Ok(true)
}
