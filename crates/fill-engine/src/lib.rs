//! Form fill engine.
//!
//! The [`Orchestrator`] walks every form control of a page through a [`DomPort`]:
//! filters out ineligible fields, classifies the rest into a [`WidgetCategory`] and
//! runs the strategy for that category, repeating the sweep once when it changed
//! something so conditionally revealed fields are caught too.
//!
//! [`DomPort`]: dom_port::DomPort

pub mod classifier;
pub mod config;
pub mod errors;
pub mod model;
pub mod orchestrator;
pub mod semantic;
pub mod simulator;
pub mod trigger;

mod eligibility;
mod strategies;

pub use classifier::{classify, FieldFacts, WidgetCategory};
pub use config::{EngineConfig, FillOptions, FillOptionsPatch, Timings, WidgetSelectors};
pub use errors::{FillError, FillResult};
pub use model::{FieldOutcome, PassResult, RunReport, SkipReason};
pub use orchestrator::{Orchestrator, MAX_PASSES};
pub use simulator::Simulator;
pub use trigger::{TriggerMessage, FILL_FORM_ACTION};
