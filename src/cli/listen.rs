use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use fill_engine::{FillError, FillResult, Orchestrator, RunReport, TriggerMessage};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::cli::context::CliContext;
use crate::session::BrowserSession;

#[derive(Args, Clone, Debug, Default)]
pub struct ListenArgs {
    /// Page to open before accepting triggers
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// DevTools endpoint of an already running browser
    #[arg(long, value_name = "WS_URL")]
    pub endpoint: Option<String>,

    /// Run the launched browser without a window
    #[arg(long)]
    pub headless: bool,
}

/// One line written back for every trigger line read.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Reply {
    Ok { report: RunReport },
    Rejected { error: String },
    Failed { error: String },
}

impl Reply {
    pub fn from_result(result: FillResult<RunReport>) -> Self {
        match result {
            Ok(report) => Reply::Ok { report },
            Err(err) => Reply::from_error(err),
        }
    }

    pub fn from_error(err: FillError) -> Self {
        if err.is_rejection() {
            Reply::Rejected {
                error: err.to_string(),
            }
        } else {
            Reply::Failed {
                error: err.to_string(),
            }
        }
    }
}

pub async fn cmd_listen(args: ListenArgs, ctx: &CliContext) -> Result<()> {
    let config = ctx.config();
    let mut browser = config.browser.clone();
    if args.endpoint.is_some() {
        browser.endpoint = args.endpoint.clone();
    }
    if args.headless {
        browser.headless = true;
    }

    let session = BrowserSession::open(&browser).await?;
    if let Some(url) = args.url.as_deref() {
        if let Err(err) = session.navigate(url).await {
            session.close().await;
            return Err(err);
        }
    }

    let orchestrator = Arc::new(
        Orchestrator::new(session.dom(), config.engine.clone()).with_default_options(config.fill),
    );
    let (tx, mut rx) = mpsc::channel::<Reply>(16);
    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(reply) = rx.recv().await {
            let mut line = serde_json::to_string(&reply)?;
            line.push('\n');
            stdout.write_all(line.as_bytes()).await?;
            stdout.flush().await?;
        }
        Ok::<_, anyhow::Error>(())
    });

    info!("listening for fill triggers on stdin");
    let served = serve_triggers(
        orchestrator.clone(),
        BufReader::new(tokio::io::stdin()),
        tx,
    )
    .await;
    drop(orchestrator);
    let written = writer.await.context("reply writer stopped")?;
    session.close().await;

    let handled = served?;
    written?;
    info!(handled, "trigger input closed");
    Ok(())
}

/// Answer every JSON line of `input` on `replies`. Runs execute concurrently, so a
/// trigger arriving mid-run is rejected by the orchestrator. Returns the number of
/// non-empty lines read.
pub async fn serve_triggers<R>(
    orchestrator: Arc<Orchestrator>,
    input: R,
    replies: mpsc::Sender<Reply>,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut runs = JoinSet::new();
    let mut handled = 0;

    while let Some(line) = lines.next_line().await.context("reading trigger input")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        handled += 1;
        let message = match TriggerMessage::parse(line) {
            Ok(message) => message,
            Err(err) => {
                warn!(error = %err, "ignoring trigger");
                replies.send(Reply::from_error(err)).await.ok();
                continue;
            }
        };
        debug!(action = %message.action, "trigger received");

        let orchestrator = orchestrator.clone();
        let replies = replies.clone();
        runs.spawn(async move {
            let result = orchestrator.handle_trigger(&message).await;
            if let Err(err) = &result {
                warn!(error = %err, "trigger not served");
            }
            replies.send(Reply::from_result(result)).await.ok();
        });
    }

    finish_runs(runs).await?;
    Ok(handled)
}

/// Wait for every run, even after one panicked, so no run still holds the page when
/// the session closes.
async fn finish_runs(mut runs: JoinSet<()>) -> Result<()> {
    let mut first_failure = None;
    while let Some(joined) = runs.join_next().await {
        if let Err(err) = joined {
            warn!(error = %err, "fill task did not finish");
            first_failure.get_or_insert(err);
        }
    }
    match first_failure {
        Some(err) => Err(anyhow::Error::new(err).context("fill task panicked")),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_port::{ElementSpec, MemoryDom};
    use fill_engine::{EngineConfig, Timings};

    fn page() -> (MemoryDom, dom_port::NodeRef) {
        let dom = MemoryDom::new();
        let input = dom.build(|tree| {
            let root = tree.root();
            let field = tree.append(root, ElementSpec::new("div").class("zireael-field"));
            tree.append(
                field,
                ElementSpec::new("div")
                    .class("zireael-field__label")
                    .text("Email"),
            );
            tree.append(field, ElementSpec::input("text").class("n2o-input"))
        });
        (dom, input)
    }

    async fn serve(dom: &MemoryDom, input: &str) -> Vec<serde_json::Value> {
        let config = EngineConfig::default().with_timings(Timings::immediate());
        let orchestrator = Arc::new(Orchestrator::new(Arc::new(dom.clone()), config));
        let (tx, mut rx) = mpsc::channel(8);
        serve_triggers(orchestrator, BufReader::new(input.as_bytes()), tx)
            .await
            .unwrap();
        let mut replies = Vec::new();
        while let Some(reply) = rx.recv().await {
            replies.push(serde_json::to_value(reply).unwrap());
        }
        replies
    }

    #[tokio::test]
    async fn fill_form_line_is_answered_with_report() {
        let (dom, input) = page();
        let replies = serve(&dom, "{\"action\":\"FILL_FORM\"}\n").await;
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0]["status"], "ok");
        assert!(replies[0]["report"]["passes"].is_array());
        assert!(dom.value(input).contains('@'));
    }

    #[tokio::test]
    async fn a_panicked_run_does_not_cut_the_others_short() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::time::Duration;

        let finished = Arc::new(AtomicBool::new(false));
        let mut runs = JoinSet::new();
        runs.spawn(async { panic!("run blew up") });
        let flag = finished.clone();
        runs.spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            flag.store(true, Ordering::SeqCst);
        });

        let err = finish_runs(runs).await.unwrap_err();
        assert!(err.to_string().contains("panicked"));
        assert!(finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn bad_lines_are_rejected_without_touching_the_page() {
        let (dom, input) = page();
        let replies = serve(&dom, "not json\n\n{\"action\":\"CLEAR_FORM\"}\n").await;
        assert_eq!(replies.len(), 2);
        assert!(replies.iter().all(|reply| reply["status"] == "rejected"));
        assert_eq!(dom.value(input), "");
    }
}
