use dom_port::DomResult;
use rand::Rng;
use value_generators::{generate, RecentDate, ValueKind};

use super::StrategyContext;
use crate::classifier::FieldFacts;
use crate::semantic;

/// Range used when a number field declares no bounds.
const DEFAULT_NUMBER_RANGE: (i64, i64) = (1, 20);
/// Width of the range drawn from above the lower bound.
const NUMBER_SPAN: i64 = 50;

fn parse_bound(raw: Option<&str>, round_up: bool) -> Option<i64> {
    let raw = raw?.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }
    let value = raw.parse::<f64>().ok().filter(|v| v.is_finite())?;
    let rounded = if round_up { value.ceil() } else { value.floor() };
    Some(rounded as i64)
}

/// Inclusive range for a random integer given the declared `min`/`max` attributes.
///
/// With a lower bound the range is `[min, min(max, min + 50)]`. With only an upper
/// bound the lower end is `min(1, max)`. An inverted range collapses to its lower end.
pub fn number_bounds(min: Option<&str>, max: Option<&str>) -> (i64, i64) {
    let min = parse_bound(min, true);
    let max = parse_bound(max, false);
    if min.is_none() && max.is_none() {
        return DEFAULT_NUMBER_RANGE;
    }
    let lower = min.unwrap_or_else(|| max.map_or(1, |max| max.min(1)));
    let ceiling = lower.saturating_add(NUMBER_SPAN);
    let upper = max.map_or(ceiling, |max| max.min(ceiling));
    (lower, upper.max(lower))
}

fn random_number(facts: &FieldFacts) -> String {
    let (lower, upper) = number_bounds(facts.info.min.as_deref(), facts.info.max.as_deref());
    rand::thread_rng().gen_range(lower..=upper).to_string()
}

pub(super) async fn fill_number(ctx: &StrategyContext<'_>, facts: &FieldFacts) -> DomResult<bool> {
    ctx.sim.type_text(facts.node, &random_number(facts)).await?;
    Ok(true)
}

/// `DD.MM.YYYY HH:MM:SS` with a working-hours time.
fn library_date_time_value() -> String {
    let mut rng = rand::thread_rng();
    format!(
        "{} {:02}:{:02}:{:02}",
        RecentDate::random().display(),
        rng.gen_range(8..=20),
        rng.gen_range(0..=59),
        rng.gen_range(0..=59)
    )
}

fn library_date_range_value() -> String {
    let date = RecentDate::random().display();
    format!("{date} — {date}")
}

pub(super) async fn fill_library_date_time(
    ctx: &StrategyContext<'_>,
    facts: &FieldFacts,
) -> DomResult<bool> {
    ctx.sim
        .write_direct(facts.node, &library_date_time_value())
        .await?;
    Ok(true)
}

pub(super) async fn fill_library_date_range(
    ctx: &StrategyContext<'_>,
    facts: &FieldFacts,
) -> DomResult<bool> {
    ctx.sim
        .write_direct(facts.node, &library_date_range_value())
        .await?;
    Ok(true)
}

pub(super) async fn fill_date_by_label(
    ctx: &StrategyContext<'_>,
    facts: &FieldFacts,
) -> DomResult<bool> {
    ctx.sim
        .type_text(facts.node, &RecentDate::random().display())
        .await?;
    Ok(true)
}

/// Value kind for a text field: label keywords first, then the input type.
fn text_kind(facts: &FieldFacts) -> ValueKind {
    if let Some(kind) = semantic::keyword_kind(&facts.semantic_label) {
        return kind;
    }
    match facts.info.input_type.as_deref() {
        Some("email") => ValueKind::Email,
        Some("tel") => ValueKind::Phone,
        _ => ValueKind::Generic,
    }
}

pub(super) async fn fill_text(ctx: &StrategyContext<'_>, facts: &FieldFacts) -> DomResult<bool> {
    match facts.info.input_type.as_deref() {
        // Native pickers reject per-character typing.
        Some("date") => {
            let value = RecentDate::random().iso_date();
            ctx.sim.write_direct(facts.node, &value).await?;
        }
        Some("datetime-local") => {
            let value = RecentDate::random().iso_date_time_local();
            ctx.sim.write_direct(facts.node, &value).await?;
        }
        Some("number" | "range") if semantic::keyword_kind(&facts.semantic_label).is_none() => {
            ctx.sim.type_text(facts.node, &random_number(facts)).await?;
        }
        _ => {
            let value = generate(text_kind(facts));
            ctx.sim.type_text(facts.node, &value).await?;
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_follow_declared_limits() {
        assert_eq!(number_bounds(None, None), (1, 20));
        assert_eq!(number_bounds(Some("5"), Some("200")), (5, 55));
        assert_eq!(number_bounds(Some("5"), Some("10")), (5, 10));
        assert_eq!(number_bounds(Some("100"), None), (100, 150));
        assert_eq!(number_bounds(None, Some("8")), (1, 8));
        assert_eq!(number_bounds(None, Some("-3")), (-3, -3));
    }

    #[test]
    fn inverted_or_fractional_bounds_are_normalised() {
        assert_eq!(number_bounds(Some("10"), Some("2")), (10, 10));
        assert_eq!(number_bounds(Some("1.5"), Some("9.9")), (2, 9));
        assert_eq!(number_bounds(Some("abc"), None), (1, 20));
    }

    #[test]
    fn date_time_value_uses_working_hours() {
        for _ in 0..200 {
            let value = library_date_time_value();
            let (date, time) = value.split_once(' ').unwrap();
            assert_eq!(date.len(), 10);
            let hour: u32 = time[..2].parse().unwrap();
            assert!((8..=20).contains(&hour), "{value}");
            assert_eq!(time.len(), 8);
        }
    }

    #[test]
    fn date_range_repeats_the_same_day() {
        let value = library_date_range_value();
        let (from, to) = value.split_once(" — ").unwrap();
        assert_eq!(from, to);
    }
}
