use anyhow::{Context, Result};
use clap::Args;
use fill_engine::{FillOptions, FillOptionsPatch, Orchestrator, RunReport};
use tracing::info;

use crate::cli::context::CliContext;
use crate::session::BrowserSession;

#[derive(Args, Clone, Debug, Default)]
pub struct FillArgs {
    /// Page to open before filling; the current page is used when omitted
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// DevTools endpoint of an already running browser
    #[arg(long, value_name = "WS_URL")]
    pub endpoint: Option<String>,

    /// Only fill controls marked as required
    #[arg(long)]
    pub only_required: bool,

    /// Also overwrite controls that already hold a value
    #[arg(long)]
    pub include_filled: bool,

    /// Run the launched browser without a window
    #[arg(long)]
    pub headless: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

impl FillArgs {
    /// Flags that were given on the command line. Unset flags defer to the config file.
    pub fn options_patch(&self) -> FillOptionsPatch {
        FillOptionsPatch {
            only_required: self.only_required.then_some(true),
            skip_filled: self.include_filled.then_some(false),
        }
    }
}

pub async fn cmd_fill(args: FillArgs, ctx: &CliContext) -> Result<()> {
    let config = ctx.config();
    let mut browser = config.browser.clone();
    if args.endpoint.is_some() {
        browser.endpoint = args.endpoint.clone();
    }
    if args.headless {
        browser.headless = true;
    }
    let options = config.fill.merged(&args.options_patch());

    let session = BrowserSession::open(&browser).await?;
    let outcome = fill_page(&session, &args, ctx, options).await;
    session.close().await;
    let report = outcome?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

async fn fill_page(
    session: &BrowserSession,
    args: &FillArgs,
    ctx: &CliContext,
    options: FillOptions,
) -> Result<RunReport> {
    if let Some(url) = args.url.as_deref() {
        session.navigate(url).await?;
    }
    let orchestrator = Orchestrator::new(session.dom(), ctx.config().engine.clone())
        .with_default_options(ctx.config().fill);
    info!(?options, "filling current page");
    let report = orchestrator.run(options).await.context("fill run failed")?;
    Ok(report)
}

fn print_summary(report: &RunReport) {
    println!("Run {}", report.run_id);
    for pass in &report.passes {
        println!(
            "  pass {}: {} seen, {} filled, {} unchanged, {} skipped, {} failed",
            pass.pass, pass.fields_seen, pass.filled, pass.unchanged, pass.skipped, pass.failed
        );
    }
    println!(
        "Filled {} field(s), {} failure(s)",
        report.total_filled(),
        report.total_failed()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_flags_keep_configured_options() {
        let configured = FillOptions {
            only_required: true,
            skip_filled: false,
        };
        let merged = configured.merged(&FillArgs::default().options_patch());
        assert_eq!(merged, configured);
    }

    #[test]
    fn include_filled_disables_skip_filled() {
        let args = FillArgs {
            include_filled: true,
            ..Default::default()
        };
        let merged = FillOptions::default().merged(&args.options_patch());
        assert!(!merged.skip_filled);
        assert!(!merged.only_required);
    }
}
