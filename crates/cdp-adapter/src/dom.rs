use std::sync::Arc;

use async_trait::async_trait;
use dom_port::{DomError, DomEvent, DomPort, DomResult, ElementInfo, NodeRef, SelectOption, ValueSetter};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, trace};

use crate::bridge::{invocation, BridgeReply, BRIDGE_SOURCE};
use crate::error::{AdapterError, AdapterErrorKind};
use crate::transport::CdpTransport;

/// [`DomPort`] backed by a live page.
///
/// The page bridge is installed on first use and again whenever a call finds it
/// missing, which happens after every navigation.
pub struct CdpDom {
    transport: Arc<dyn CdpTransport>,
}

impl CdpDom {
    pub fn new(transport: Arc<dyn CdpTransport>) -> Self {
        Self { transport }
    }

    async fn install(&self) -> DomResult<()> {
        let reply = self.transport.evaluate(BRIDGE_SOURCE.to_string()).await?;
        if reply.get("installed").and_then(Value::as_bool) != Some(true) {
            return Err(AdapterError::new(AdapterErrorKind::Bridge)
                .with_hint(format!("unexpected install reply {reply}"))
                .into());
        }
        debug!(target: "cdp-dom", "page bridge installed");
        Ok(())
    }

    async fn call(&self, method: &str, args: &[Value]) -> DomResult<Value> {
        let expression = invocation(method, args);
        for attempt in 0..2 {
            let raw = self.transport.evaluate(expression.clone()).await?;
            let reply = BridgeReply::decode(raw).map_err(|err| {
                DomError::Bridge(format!("malformed reply to {method}: {err}"))
            })?;
            trace!(target: "cdp-dom", method, attempt, ?reply, "bridge reply");
            match reply {
                BridgeReply::Ok { value } => return Ok(value),
                BridgeReply::Stale { handle } => return Err(DomError::StaleNode(NodeRef(handle))),
                BridgeReply::Error { kind, message } if kind == "SyntaxError" => {
                    return Err(DomError::Selector(message))
                }
                BridgeReply::Error { kind, message } => {
                    return Err(DomError::Bridge(format!("{method}: {kind}: {message}")))
                }
                BridgeReply::BridgeMissing => self.install().await?,
            }
        }
        Err(DomError::Bridge(format!(
            "bridge disappeared while calling {method}"
        )))
    }

    async fn call_as<T: DeserializeOwned>(&self, method: &str, args: &[Value]) -> DomResult<T> {
        let value = self.call(method, args).await?;
        serde_json::from_value(value)
            .map_err(|err| DomError::Bridge(format!("unexpected {method} result: {err}")))
    }
}

fn handles(raw: Vec<u64>) -> Vec<NodeRef> {
    raw.into_iter().map(NodeRef).collect()
}

#[async_trait]
impl DomPort for CdpDom {
    async fn form_controls(&self) -> DomResult<Vec<NodeRef>> {
        Ok(handles(self.call_as("formControls", &[]).await?))
    }

    async fn inspect(&self, node: NodeRef) -> DomResult<ElementInfo> {
        self.call_as("inspect", &[json!(node.0)]).await
    }

    async fn closest(&self, node: NodeRef, selector: &str) -> DomResult<Option<NodeRef>> {
        let found: Option<u64> = self.call_as("closest", &[json!(node.0), json!(selector)]).await?;
        Ok(found.map(NodeRef))
    }

    async fn query_all(&self, scope: NodeRef, selector: &str) -> DomResult<Vec<NodeRef>> {
        Ok(handles(
            self.call_as("queryAll", &[json!(scope.0), json!(selector)])
                .await?,
        ))
    }

    async fn text(&self, node: NodeRef) -> DomResult<String> {
        self.call_as("text", &[json!(node.0)]).await
    }

    async fn label_text(&self, node: NodeRef) -> DomResult<Option<String>> {
        self.call_as("labelText", &[json!(node.0)]).await
    }

    async fn options(&self, select: NodeRef) -> DomResult<Vec<SelectOption>> {
        self.call_as("options", &[json!(select.0)]).await
    }

    async fn select_index(&self, select: NodeRef, index: usize) -> DomResult<()> {
        self.call("selectIndex", &[json!(select.0), json!(index)])
            .await
            .map(drop)
    }

    async fn dispatch(&self, node: NodeRef, event: DomEvent) -> DomResult<()> {
        self.call("dispatch", &[json!(node.0), json!(event.name())])
            .await
            .map(drop)
    }

    async fn focus(&self, node: NodeRef) -> DomResult<()> {
        self.call("focus", &[json!(node.0)]).await.map(drop)
    }

    async fn blur(&self, node: NodeRef) -> DomResult<()> {
        self.call("blur", &[json!(node.0)]).await.map(drop)
    }

    async fn set_value(&self, node: NodeRef, value: &str, setter: ValueSetter) -> DomResult<()> {
        let platform = setter == ValueSetter::Platform;
        self.call("setValue", &[json!(node.0), json!(value), json!(platform)])
            .await
            .map(drop)
    }
}
