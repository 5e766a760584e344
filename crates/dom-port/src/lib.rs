//! DOM port for the form filler.
//!
//! The engine never talks to a browser directly. Everything it reads or mutates goes
//! through [`DomPort`], which has two implementations:
//! - `cdp-adapter::CdpDom` drives a live Chromium page
//! - [`memory::MemoryDom`] keeps an owned element tree, used by tests and dry runs

pub mod errors;
pub mod memory;
mod selector;
pub mod types;

use async_trait::async_trait;

pub use errors::{DomError, DomResult};
pub use memory::{DomTree, ElementSpec, EventRecord, MemoryDom};
pub use types::{DomEvent, ElementInfo, NodeRef, SelectOption, ValueSetter};

/// Selector matching every candidate form control.
pub const FORM_CONTROL_SELECTOR: &str = "input, textarea, select";

/// Narrow DOM surface the fill engine is built on.
///
/// Selectors are CSS compound selectors (tag, `.class`, `#id`, `:checked`) optionally
/// joined by commas. Implementations may accept more, callers must not rely on it.
#[async_trait]
pub trait DomPort: Send + Sync {
    /// All `input`, `textarea` and `select` elements in document order.
    async fn form_controls(&self) -> DomResult<Vec<NodeRef>>;

    async fn inspect(&self, node: NodeRef) -> DomResult<ElementInfo>;

    /// Nearest inclusive ancestor matching `selector`.
    async fn closest(&self, node: NodeRef, selector: &str) -> DomResult<Option<NodeRef>>;

    /// Descendants of `scope` matching `selector`, in document order.
    async fn query_all(&self, scope: NodeRef, selector: &str) -> DomResult<Vec<NodeRef>>;

    async fn query(&self, scope: NodeRef, selector: &str) -> DomResult<Option<NodeRef>> {
        Ok(self.query_all(scope, selector).await?.into_iter().next())
    }

    /// Whether the element itself matches `selector`.
    async fn matches(&self, node: NodeRef, selector: &str) -> DomResult<bool> {
        Ok(self.closest(node, selector).await? == Some(node))
    }

    /// Rendered text of the element and its descendants.
    async fn text(&self, node: NodeRef) -> DomResult<String>;

    /// Text of the `<label>` associated with a control, if any.
    async fn label_text(&self, node: NodeRef) -> DomResult<Option<String>>;

    async fn options(&self, select: NodeRef) -> DomResult<Vec<SelectOption>>;

    /// Make the option at `index` the selected one. Dispatches nothing.
    async fn select_index(&self, select: NodeRef, index: usize) -> DomResult<()>;

    async fn dispatch(&self, node: NodeRef, event: DomEvent) -> DomResult<()>;

    async fn focus(&self, node: NodeRef) -> DomResult<()>;

    async fn blur(&self, node: NodeRef) -> DomResult<()>;

    /// Write `value` through the element property or the platform-level setter.
    async fn set_value(&self, node: NodeRef, value: &str, setter: ValueSetter) -> DomResult<()>;
}
