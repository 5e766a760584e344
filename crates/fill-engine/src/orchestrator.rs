use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dom_port::{DomPort, NodeRef};
use tracing::{debug, info, warn};

use crate::classifier::{classify, FieldFacts};
use crate::config::{EngineConfig, FillOptions};
use crate::eligibility;
use crate::errors::{FillError, FillResult};
use crate::model::{FieldOutcome, PassResult, RunReport, SkipReason};
use crate::strategies::{self, StrategyContext};
use crate::trigger::TriggerMessage;

/// Upper bound of sweeps per run.
pub const MAX_PASSES: u32 = 2;

/// Drives fill runs against one page.
///
/// At most one run is active at a time; a trigger arriving meanwhile is rejected
/// with [`FillError::AlreadyRunning`].
pub struct Orchestrator {
    dom: Arc<dyn DomPort>,
    config: EngineConfig,
    defaults: FillOptions,
    running: AtomicBool,
}

/// Returns the orchestrator to idle when the run ends, however it ends.
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Orchestrator {
    pub fn new(dom: Arc<dyn DomPort>, config: EngineConfig) -> Self {
        Self {
            dom,
            config,
            defaults: FillOptions::default(),
            running: AtomicBool::new(false),
        }
    }

    /// Options a trigger without explicit options runs with.
    pub fn with_default_options(mut self, defaults: FillOptions) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Resolve a trigger message and run.
    pub async fn handle_trigger(&self, message: &TriggerMessage) -> FillResult<RunReport> {
        let options = message.resolve(self.defaults)?;
        self.run(options).await
    }

    /// Sweep the page, repeating once when the sweep changed something.
    pub async fn run(&self, options: FillOptions) -> FillResult<RunReport> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("fill trigger rejected, a run is in progress");
            return Err(FillError::AlreadyRunning);
        }
        let _guard = RunningGuard(&self.running);

        let mut report = RunReport::new(options);
        info!(
            run_id = %report.run_id,
            only_required = options.only_required,
            skip_filled = options.skip_filled,
            "fill run started"
        );

        for pass in 1..=MAX_PASSES {
            let result = self.fill_pass(pass, &options).await?;
            let changed = result.any_field_changed;
            info!(
                run_id = %report.run_id,
                pass,
                filled = result.filled,
                skipped = result.skipped,
                failed = result.failed,
                "fill pass finished"
            );
            report.passes.push(result);
            if !self.config.recheck_new_fields || !changed {
                break;
            }
        }

        info!(
            run_id = %report.run_id,
            passes = report.passes.len(),
            filled = report.total_filled(),
            "fill run finished"
        );
        Ok(report)
    }

    async fn fill_pass(&self, pass: u32, options: &FillOptions) -> FillResult<PassResult> {
        let ctx = StrategyContext::new(self.dom.as_ref(), &self.config);
        let controls = self.dom.form_controls().await?;
        let mut result = PassResult::new(pass);
        result.fields_seen = controls.len();

        for node in controls {
            match self.fill_field(&ctx, node, options).await {
                Ok(outcome) => {
                    if let FieldOutcome::Skipped { reason } = outcome {
                        debug!(field = %node, ?reason, "field skipped");
                    }
                    result.record(&outcome);
                    if matches!(outcome, FieldOutcome::Filled { .. }) {
                        ctx.pause(self.config.timings.between_fields()).await;
                    }
                }
                Err(err) => {
                    warn!(field = %node, error = %err, "field failed, skipping");
                    result.failed += 1;
                }
            }
        }
        Ok(result)
    }

    async fn fill_field(
        &self,
        ctx: &StrategyContext<'_>,
        node: NodeRef,
        options: &FillOptions,
    ) -> FillResult<FieldOutcome> {
        let info = self.dom.inspect(node).await?;
        if let Some(reason) = eligibility::precheck(&info) {
            return Ok(FieldOutcome::Skipped { reason });
        }

        let facts = FieldFacts::gather(self.dom.as_ref(), node, info, &self.config.selectors).await?;
        let category = classify(&facts);
        if let Some(reason) = eligibility::exclusion(&facts, category, options) {
            return Ok(FieldOutcome::Skipped { reason });
        }
        if options.skip_filled && strategies::is_filled(ctx, category, &facts).await? {
            return Ok(FieldOutcome::Skipped {
                reason: SkipReason::AlreadyFilled,
            });
        }

        debug!(field = %node, %category, label = %facts.semantic_label, "filling field");
        let changed = strategies::fill(ctx, category, &facts).await?;
        Ok(if changed {
            FieldOutcome::Filled { category }
        } else {
            FieldOutcome::Unchanged { category }
        })
    }
}
