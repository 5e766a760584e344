use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classifier::WidgetCategory;
use crate::config::FillOptions;

/// Why a field was left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Input type that never receives test data (hidden, submit, file, …).
    ExcludedType,
    Disabled,
    Invisible,
    Readonly,
    NotRequired,
    AlreadyFilled,
}

/// Result of processing one field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum FieldOutcome {
    Skipped { reason: SkipReason },
    /// The strategy ran and changed the field.
    Filled { category: WidgetCategory },
    /// The strategy ran but found nothing to do, e.g. the menu never opened.
    Unchanged { category: WidgetCategory },
}

/// Summary of one sweep over the page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassResult {
    pub pass: u32,
    pub any_field_changed: bool,
    pub fields_seen: usize,
    pub filled: usize,
    pub skipped: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl PassResult {
    pub(crate) fn new(pass: u32) -> Self {
        Self {
            pass,
            ..Default::default()
        }
    }

    pub(crate) fn record(&mut self, outcome: &FieldOutcome) {
        match outcome {
            FieldOutcome::Skipped { .. } => self.skipped += 1,
            FieldOutcome::Filled { .. } => {
                self.filled += 1;
                self.any_field_changed = true;
            }
            FieldOutcome::Unchanged { .. } => self.unchanged += 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub options: FillOptions,
    pub passes: Vec<PassResult>,
}

impl RunReport {
    pub(crate) fn new(options: FillOptions) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            options,
            passes: Vec::new(),
        }
    }

    pub fn total_filled(&self) -> usize {
        self.passes.iter().map(|pass| pass.filled).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.passes.iter().map(|pass| pass.failed).sum()
    }
}
