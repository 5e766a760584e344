use dom_port::{DomResult, NodeRef};
use tracing::debug;

use super::StrategyContext;
use crate::classifier::FieldFacts;

/// Wrapper and toggle of a library dropdown, if both are present.
async fn dropdown_parts(
    ctx: &StrategyContext<'_>,
    facts: &FieldFacts,
) -> DomResult<Option<(NodeRef, NodeRef)>> {
    let Some(wrapper) = facts.select_wrapper else {
        return Ok(None);
    };
    let toggle = ctx.dom.query(wrapper, &ctx.config.selectors.toggle).await?;
    Ok(toggle.map(|toggle| (wrapper, toggle)))
}

pub(super) async fn fill_single_select(
    ctx: &StrategyContext<'_>,
    facts: &FieldFacts,
) -> DomResult<bool> {
    let selectors = &ctx.config.selectors;
    let Some((wrapper, toggle)) = dropdown_parts(ctx, facts).await? else {
        debug!(field = %facts.node, "select toggle missing");
        return Ok(false);
    };

    ctx.sim.click(toggle).await?;
    ctx.pause(ctx.config.timings.open_menu()).await;

    let Some(menu) = ctx.dom.query(wrapper, &selectors.menu).await? else {
        debug!(field = %facts.node, "dropdown menu did not open");
        return Ok(false);
    };
    let Some(item) = ctx.dom.query(menu, &selectors.menu_item).await? else {
        return Ok(false);
    };

    ctx.sim.click(item).await?;
    ctx.pause(ctx.config.timings.pick_option()).await;
    Ok(true)
}

/// Open the menu and add up to `multi_select_picks` items that are not selected yet.
pub(super) async fn fill_multi_select(
    ctx: &StrategyContext<'_>,
    facts: &FieldFacts,
) -> DomResult<bool> {
    let selectors = &ctx.config.selectors;
    let Some((wrapper, toggle)) = dropdown_parts(ctx, facts).await? else {
        debug!(field = %facts.node, "multi-select toggle missing");
        return Ok(false);
    };

    ctx.sim.click(toggle).await?;
    ctx.pause(ctx.config.timings.open_menu()).await;

    let mut selected = Vec::new();
    for tag in ctx.dom.query_all(wrapper, &selectors.selected_item).await? {
        selected.push(ctx.dom.text(tag).await?.trim().to_string());
    }

    let mut picked = 0;
    while picked < ctx.config.multi_select_picks {
        // The menu may re-render after every pick, so look it up again each time.
        let Some(menu) = ctx.dom.query(wrapper, &selectors.menu).await? else {
            break;
        };
        let mut next = None;
        for item in ctx.dom.query_all(menu, &selectors.menu_item).await? {
            let text = ctx.dom.text(item).await?.trim().to_string();
            if !selected.contains(&text) {
                next = Some((item, text));
                break;
            }
        }
        let Some((item, text)) = next else {
            break;
        };

        ctx.sim.click(item).await?;
        ctx.pause(ctx.config.timings.pick_option()).await;
        selected.push(text);
        picked += 1;
    }

    if ctx.config.close_multi_select && ctx.dom.query(wrapper, &selectors.menu).await?.is_some() {
        ctx.sim.click(toggle).await?;
        ctx.pause(ctx.config.timings.close_menu()).await;
    }

    debug!(field = %facts.node, picked, "multi-select filled");
    Ok(picked > 0)
}

/// Select the first enabled option with a non-empty value.
pub(super) async fn fill_native_select(
    ctx: &StrategyContext<'_>,
    facts: &FieldFacts,
) -> DomResult<bool> {
    let options = ctx.dom.options(facts.node).await?;
    let Some(index) = options
        .iter()
        .position(|option| !option.disabled && !option.value.is_empty())
    else {
        return Ok(false);
    };

    ctx.dom.select_index(facts.node, index).await?;
    ctx.dom
        .dispatch(facts.node, dom_port::DomEvent::Change)
        .await?;
    Ok(true)
}
