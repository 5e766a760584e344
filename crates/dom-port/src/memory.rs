//! Owned element tree implementing [`DomPort`].
//!
//! Widget behaviour is attached by registering listeners that mutate the tree, the
//! way page scripts would. Default actions the browser performs on `click`
//! (checkbox toggling, radio selection, label activation) are built in, as is a model
//! of a framework value tracker: a property write updates the tracker so the following
//! `input` event is ignored, a platform write leaves it stale so `input` commits.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::trace;

use crate::errors::{DomError, DomResult};
use crate::selector::{Candidate, SelectorList};
use crate::types::{DomEvent, ElementInfo, NodeRef, SelectOption, ValueSetter};
use crate::{DomPort, FORM_CONTROL_SELECTOR};

/// Callback run when an event reaches the node it was registered on. Receives the
/// event target.
pub type Listener = Arc<dyn Fn(&mut DomTree, NodeRef) + Send + Sync>;

/// Declarative description of an element to append.
#[derive(Clone, Debug, Default)]
pub struct ElementSpec {
    tag: String,
    attrs: Vec<(String, String)>,
    classes: Vec<String>,
    text: String,
    value: String,
    checked: bool,
    hidden: bool,
    tracked: bool,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn input(kind: &str) -> Self {
        Self::new("input").attr("type", kind)
    }

    /// Adds one or more whitespace-separated classes.
    pub fn class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            if !self.classes.iter().any(|c| c == class) {
                self.classes.push(class.to_string());
            }
        }
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.retain(|(n, _)| n != name);
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    /// Boolean attribute such as `disabled` or `required`.
    pub fn flag(self, name: &str) -> Self {
        self.attr(name, "")
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Install a framework value tracker on this control.
    pub fn tracked(mut self) -> Self {
        self.tracked = true;
        self
    }
}

#[derive(Clone, Debug, Default)]
struct Tracker {
    last_seen: String,
    committed: String,
}

struct NodeData {
    tag: String,
    attrs: Vec<(String, String)>,
    classes: Vec<String>,
    text: String,
    value: String,
    checked: bool,
    hidden: bool,
    attached: bool,
    parent: Option<NodeRef>,
    children: Vec<NodeRef>,
    tracker: Option<Tracker>,
}

impl NodeData {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn is_form_control(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea" | "select")
    }

    fn input_type(&self) -> Option<String> {
        (self.tag == "input")
            .then(|| self.attr("type").unwrap_or("text").to_ascii_lowercase())
    }
}

/// One dispatched event, with the target's value at dispatch time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRecord {
    pub target: NodeRef,
    pub event: DomEvent,
    pub value: String,
}

pub struct DomTree {
    nodes: Vec<NodeData>,
    listeners: HashMap<(NodeRef, DomEvent), Vec<Listener>>,
    log: Vec<EventRecord>,
    focused: Option<NodeRef>,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    pub fn new() -> Self {
        let body = NodeData {
            tag: "body".to_string(),
            attrs: Vec::new(),
            classes: Vec::new(),
            text: String::new(),
            value: String::new(),
            checked: false,
            hidden: false,
            attached: true,
            parent: None,
            children: Vec::new(),
            tracker: None,
        };
        Self {
            nodes: vec![body],
            listeners: HashMap::new(),
            log: Vec::new(),
            focused: None,
        }
    }

    pub fn root(&self) -> NodeRef {
        NodeRef(0)
    }

    fn node(&self, node: NodeRef) -> DomResult<&NodeData> {
        self.nodes
            .get(node.0 as usize)
            .filter(|data| data.attached)
            .ok_or(DomError::StaleNode(node))
    }

    fn node_mut(&mut self, node: NodeRef) -> DomResult<&mut NodeData> {
        self.nodes
            .get_mut(node.0 as usize)
            .filter(|data| data.attached)
            .ok_or(DomError::StaleNode(node))
    }

    /// Append `spec` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeRef, spec: ElementSpec) -> NodeRef {
        let handle = NodeRef(self.nodes.len() as u64);
        let attached = self.node(parent).is_ok();
        let tracker = spec.tracked.then(|| Tracker {
            last_seen: spec.value.clone(),
            committed: spec.value.clone(),
        });
        self.nodes.push(NodeData {
            tag: spec.tag,
            attrs: spec.attrs,
            classes: spec.classes,
            text: spec.text,
            value: spec.value,
            checked: spec.checked,
            hidden: spec.hidden,
            attached,
            parent: Some(parent),
            children: Vec::new(),
            tracker,
        });
        if let Some(parent) = self.nodes.get_mut(parent.0 as usize) {
            parent.children.push(handle);
        }
        handle
    }

    /// Detach `node` and its subtree. Handles into it become stale.
    pub fn remove(&mut self, node: NodeRef) {
        let parent = self.nodes.get(node.0 as usize).and_then(|d| d.parent);
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(p.0 as usize)) {
            parent.children.retain(|child| *child != node);
        }
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(data) = self.nodes.get_mut(current.0 as usize) {
                data.attached = false;
                stack.extend(data.children.iter().copied());
            }
        }
        if self.focused == Some(node) {
            self.focused = None;
        }
    }

    pub fn children(&self, node: NodeRef) -> Vec<NodeRef> {
        self.node(node)
            .map(|data| data.children.clone())
            .unwrap_or_default()
    }

    pub fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        self.node(node).ok().and_then(|data| data.parent)
    }

    fn descendants(&self, scope: NodeRef) -> Vec<NodeRef> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeRef> = self.children(scope).into_iter().rev().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).into_iter().rev());
        }
        out
    }

    fn matches(&self, node: NodeRef, selector: &SelectorList) -> bool {
        let Ok(data) = self.node(node) else {
            return false;
        };
        selector.matches(&Candidate {
            tag: &data.tag,
            id: data.attr("id"),
            classes: &data.classes,
            checked: data.checked,
        })
    }

    pub fn query_all(&self, scope: NodeRef, selector: &str) -> DomResult<Vec<NodeRef>> {
        let selector = SelectorList::parse(selector)?;
        self.node(scope)?;
        Ok(self
            .descendants(scope)
            .into_iter()
            .filter(|node| self.matches(*node, &selector))
            .collect())
    }

    pub fn query(&self, scope: NodeRef, selector: &str) -> DomResult<Option<NodeRef>> {
        Ok(self.query_all(scope, selector)?.into_iter().next())
    }

    pub fn closest(&self, node: NodeRef, selector: &str) -> DomResult<Option<NodeRef>> {
        let selector = SelectorList::parse(selector)?;
        let mut current = Some(node);
        self.node(node)?;
        while let Some(candidate) = current {
            if self.matches(candidate, &selector) {
                return Ok(Some(candidate));
            }
            current = self.parent(candidate);
        }
        Ok(None)
    }

    pub fn attr(&self, node: NodeRef, name: &str) -> Option<String> {
        self.node(node)
            .ok()
            .and_then(|data| data.attr(name).map(str::to_string))
    }

    pub fn set_attr(&mut self, node: NodeRef, name: &str, value: &str) {
        if let Ok(data) = self.node_mut(node) {
            data.attrs.retain(|(n, _)| n != name);
            data.attrs.push((name.to_string(), value.to_string()));
        }
    }

    pub fn has_class(&self, node: NodeRef, class: &str) -> bool {
        self.node(node)
            .map(|data| data.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn add_class(&mut self, node: NodeRef, class: &str) {
        if let Ok(data) = self.node_mut(node) {
            if !data.classes.iter().any(|c| c == class) {
                data.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, node: NodeRef, class: &str) {
        if let Ok(data) = self.node_mut(node) {
            data.classes.retain(|c| c != class);
        }
    }

    /// Own text followed by descendant text, whitespace-joined.
    pub fn text(&self, node: NodeRef) -> String {
        std::iter::once(node)
            .chain(self.descendants(node))
            .filter_map(|n| self.node(n).ok())
            .map(|data| data.text.trim())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn value(&self, node: NodeRef) -> String {
        self.node(node)
            .map(|data| data.value.clone())
            .unwrap_or_default()
    }

    /// Assignment performed by page code itself; frameworks observe it.
    pub fn set_value(&mut self, node: NodeRef, value: &str) {
        if let Ok(data) = self.node_mut(node) {
            data.value = value.to_string();
            if let Some(tracker) = data.tracker.as_mut() {
                tracker.last_seen = value.to_string();
                tracker.committed = value.to_string();
            }
        }
    }

    /// Value the framework believes the control holds, for tracked controls.
    pub fn committed_value(&self, node: NodeRef) -> Option<String> {
        self.node(node)
            .ok()
            .and_then(|data| data.tracker.as_ref().map(|t| t.committed.clone()))
    }

    pub fn checked(&self, node: NodeRef) -> bool {
        self.node(node).map(|data| data.checked).unwrap_or(false)
    }

    pub fn set_checked(&mut self, node: NodeRef, checked: bool) {
        if let Ok(data) = self.node_mut(node) {
            data.checked = checked;
        }
    }

    pub fn set_hidden(&mut self, node: NodeRef, hidden: bool) {
        if let Ok(data) = self.node_mut(node) {
            data.hidden = hidden;
        }
    }

    /// Attached and neither the node nor any ancestor is hidden.
    pub fn is_visible(&self, node: NodeRef) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            match self.node(n) {
                Ok(data) if !data.hidden => current = data.parent,
                _ => return false,
            }
        }
        true
    }

    pub fn on<F>(&mut self, node: NodeRef, event: DomEvent, listener: F)
    where
        F: Fn(&mut DomTree, NodeRef) + Send + Sync + 'static,
    {
        self.listeners
            .entry((node, event))
            .or_default()
            .push(Arc::new(listener));
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.log
    }

    pub fn focused(&self) -> Option<NodeRef> {
        self.focused
    }

    fn info(&self, node: NodeRef) -> DomResult<ElementInfo> {
        let data = self.node(node)?;
        let attr = |name: &str| data.attr(name).map(str::to_string);
        Ok(ElementInfo {
            tag: data.tag.clone(),
            input_type: data.input_type(),
            id: attr("id"),
            name: attr("name"),
            placeholder: attr("placeholder"),
            classes: data.classes.clone(),
            value: data.value.clone(),
            checked: data.checked,
            disabled: data.attr("disabled").is_some(),
            readonly: data.attr("readonly").is_some(),
            required: data.attr("required").is_some(),
            aria_required: data.attr("aria-required") == Some("true"),
            visible: self.is_visible(node),
            min: attr("min"),
            max: attr("max"),
        })
    }

    fn label_text(&self, node: NodeRef) -> DomResult<Option<String>> {
        let data = self.node(node)?;
        let by_for = data.attr("id").and_then(|id| {
            self.descendants(self.root()).into_iter().find(|candidate| {
                self.node(*candidate)
                    .map(|label| label.tag == "label" && label.attr("for") == Some(id))
                    .unwrap_or(false)
            })
        });
        let label = match by_for {
            Some(label) => Some(label),
            None => self.closest(node, "label")?,
        };
        Ok(label
            .map(|label| self.text(label))
            .filter(|text| !text.is_empty()))
    }

    fn options(&self, select: NodeRef) -> DomResult<Vec<NodeRef>> {
        let data = self.node(select)?;
        if data.tag != "select" {
            return Err(DomError::Unsupported {
                node: select,
                operation: "options",
            });
        }
        Ok(data
            .children
            .iter()
            .copied()
            .filter(|child| self.node(*child).map(|o| o.tag == "option").unwrap_or(false))
            .collect())
    }

    fn option_value(&self, option: NodeRef) -> String {
        self.attr(option, "value")
            .unwrap_or_else(|| self.text(option))
    }

    fn write_value(&mut self, node: NodeRef, value: &str, setter: ValueSetter) -> DomResult<()> {
        let data = self.node_mut(node)?;
        if !data.is_form_control() {
            return Err(DomError::Unsupported {
                node,
                operation: "set_value",
            });
        }
        data.value = value.to_string();
        if let (ValueSetter::Property, Some(tracker)) = (setter, data.tracker.as_mut()) {
            tracker.last_seen = value.to_string();
        }
        Ok(())
    }

    fn commit_tracked(&mut self, node: NodeRef) {
        if let Ok(data) = self.node_mut(node) {
            if let Some(tracker) = data.tracker.as_mut() {
                if tracker.last_seen != data.value {
                    tracker.last_seen = data.value.clone();
                    tracker.committed = data.value.clone();
                }
            }
        }
    }

    fn dispatch(&mut self, target: NodeRef, event: DomEvent) -> DomResult<()> {
        let value = self.node(target)?.value.clone();
        trace!(node = %target, event = event.name(), "memory dispatch");
        self.log.push(EventRecord {
            target,
            event,
            value,
        });

        match event {
            DomEvent::Input => self.commit_tracked(target),
            DomEvent::Focus => self.focused = Some(target),
            DomEvent::Blur if self.focused == Some(target) => self.focused = None,
            _ => {}
        }

        let mut path = vec![target];
        if event.bubbles() {
            let mut current = self.parent(target);
            while let Some(node) = current {
                path.push(node);
                current = self.parent(node);
            }
        }
        for node in path {
            let listeners = self
                .listeners
                .get(&(node, event))
                .cloned()
                .unwrap_or_default();
            for listener in listeners {
                listener(&mut *self, target);
            }
        }

        if event == DomEvent::Click {
            self.activate(target)?;
        }
        Ok(())
    }

    /// Browser default action for a click on `target`.
    fn activate(&mut self, target: NodeRef) -> DomResult<()> {
        let Ok(data) = self.node(target) else {
            return Ok(());
        };
        let disabled = data.attr("disabled").is_some();
        match data.input_type().as_deref() {
            Some("checkbox") if !disabled => {
                let checked = !data.checked;
                self.set_checked(target, checked);
                self.dispatch(target, DomEvent::Input)?;
                self.dispatch(target, DomEvent::Change)?;
            }
            Some("radio") if !disabled && !data.checked => {
                let name = data.attr("name").map(str::to_string);
                if let Some(name) = name {
                    for other in self.query_all(self.root(), "input")? {
                        if self.attr(other, "name").as_deref() == Some(name.as_str()) {
                            self.set_checked(other, false);
                        }
                    }
                }
                self.set_checked(target, true);
                self.dispatch(target, DomEvent::Input)?;
                self.dispatch(target, DomEvent::Change)?;
            }
            _ if !data.is_form_control() => {
                if let Some(control) = self.labeled_control(target)? {
                    self.dispatch(control, DomEvent::Click)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn labeled_control(&self, target: NodeRef) -> DomResult<Option<NodeRef>> {
        let Some(label) = self.closest(target, "label")? else {
            return Ok(None);
        };
        if let Some(id) = self.attr(label, "for") {
            let by_id = self
                .descendants(self.root())
                .into_iter()
                .find(|node| self.attr(*node, "id").as_deref() == Some(id.as_str()));
            return Ok(by_id);
        }
        self.query(label, FORM_CONTROL_SELECTOR)
    }
}

/// Shareable, thread-safe in-memory DOM.
#[derive(Clone, Default)]
pub struct MemoryDom {
    tree: Arc<Mutex<DomTree>>,
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutate the tree, e.g. to build a fixture or register listeners.
    pub fn build<R>(&self, f: impl FnOnce(&mut DomTree) -> R) -> R {
        f(&mut self.tree.lock())
    }

    pub fn read<R>(&self, f: impl FnOnce(&DomTree) -> R) -> R {
        f(&self.tree.lock())
    }

    pub fn root(&self) -> NodeRef {
        self.read(|tree| tree.root())
    }

    pub fn value(&self, node: NodeRef) -> String {
        self.read(|tree| tree.value(node))
    }

    pub fn committed_value(&self, node: NodeRef) -> Option<String> {
        self.read(|tree| tree.committed_value(node))
    }

    pub fn checked(&self, node: NodeRef) -> bool {
        self.read(|tree| tree.checked(node))
    }

    pub fn has_class(&self, node: NodeRef, class: &str) -> bool {
        self.read(|tree| tree.has_class(node, class))
    }

    pub fn events(&self) -> Vec<EventRecord> {
        self.read(|tree| tree.events().to_vec())
    }

    /// Events dispatched at `node`, in order.
    pub fn events_for(&self, node: NodeRef) -> Vec<DomEvent> {
        self.read(|tree| {
            tree.events()
                .iter()
                .filter(|record| record.target == node)
                .map(|record| record.event)
                .collect()
        })
    }
}

#[async_trait]
impl DomPort for MemoryDom {
    async fn form_controls(&self) -> DomResult<Vec<NodeRef>> {
        self.read(|tree| tree.query_all(tree.root(), FORM_CONTROL_SELECTOR))
    }

    async fn inspect(&self, node: NodeRef) -> DomResult<ElementInfo> {
        self.read(|tree| tree.info(node))
    }

    async fn closest(&self, node: NodeRef, selector: &str) -> DomResult<Option<NodeRef>> {
        self.read(|tree| tree.closest(node, selector))
    }

    async fn query_all(&self, scope: NodeRef, selector: &str) -> DomResult<Vec<NodeRef>> {
        self.read(|tree| tree.query_all(scope, selector))
    }

    async fn text(&self, node: NodeRef) -> DomResult<String> {
        self.read(|tree| {
            tree.node(node)?;
            Ok(tree.text(node))
        })
    }

    async fn label_text(&self, node: NodeRef) -> DomResult<Option<String>> {
        self.read(|tree| tree.label_text(node))
    }

    async fn options(&self, select: NodeRef) -> DomResult<Vec<SelectOption>> {
        self.read(|tree| {
            Ok(tree
                .options(select)?
                .into_iter()
                .map(|option| SelectOption {
                    value: tree.option_value(option),
                    text: tree.text(option),
                    disabled: tree.attr(option, "disabled").is_some(),
                })
                .collect())
        })
    }

    async fn select_index(&self, select: NodeRef, index: usize) -> DomResult<()> {
        self.build(|tree| {
            let options = tree.options(select)?;
            let chosen = *options.get(index).ok_or(DomError::Unsupported {
                node: select,
                operation: "select_index",
            })?;
            for option in &options {
                tree.set_checked(*option, *option == chosen);
            }
            let value = tree.option_value(chosen);
            tree.write_value(select, &value, ValueSetter::Property)
        })
    }

    async fn dispatch(&self, node: NodeRef, event: DomEvent) -> DomResult<()> {
        self.build(|tree| tree.dispatch(node, event))
    }

    async fn focus(&self, node: NodeRef) -> DomResult<()> {
        self.build(|tree| tree.dispatch(node, DomEvent::Focus))
    }

    async fn blur(&self, node: NodeRef) -> DomResult<()> {
        self.build(|tree| tree.dispatch(node, DomEvent::Blur))
    }

    async fn set_value(&self, node: NodeRef, value: &str, setter: ValueSetter) -> DomResult<()> {
        self.build(|tree| tree.write_value(node, value, setter))
    }
}
