//! Synthetic user interaction primitives.

use dom_port::{DomEvent, DomPort, DomResult, NodeRef, ValueSetter};
use tracing::trace;

/// Event sequences that make a framework treat a change as user input.
#[derive(Clone, Copy)]
pub struct Simulator<'a> {
    dom: &'a dyn DomPort,
    typing_setter: ValueSetter,
}

impl<'a> Simulator<'a> {
    /// `native_setter_typing` routes every keystroke through the platform setter so
    /// frameworks that intercept the `value` property still see the change.
    pub fn new(dom: &'a dyn DomPort, native_setter_typing: bool) -> Self {
        let typing_setter = if native_setter_typing {
            ValueSetter::Platform
        } else {
            ValueSetter::Property
        };
        Self { dom, typing_setter }
    }

    /// `mousedown`, `mouseup`, `click`.
    pub async fn click(&self, node: NodeRef) -> DomResult<()> {
        trace!(node = %node, "synthetic click");
        for event in [DomEvent::MouseDown, DomEvent::MouseUp, DomEvent::Click] {
            self.dom.dispatch(node, event).await?;
        }
        Ok(())
    }

    /// Focus, clear, then append one character at a time with an `input` event per
    /// character; finally `change` and blur.
    pub async fn type_text(&self, node: NodeRef, text: &str) -> DomResult<()> {
        trace!(node = %node, chars = text.chars().count(), "synthetic typing");
        self.dom.focus(node).await?;
        self.dom.set_value(node, "", self.typing_setter).await?;
        self.dom.dispatch(node, DomEvent::Input).await?;

        let mut typed = String::with_capacity(text.len());
        for ch in text.chars() {
            typed.push(ch);
            self.dom.set_value(node, &typed, self.typing_setter).await?;
            self.dom.dispatch(node, DomEvent::Input).await?;
        }

        self.dom.dispatch(node, DomEvent::Change).await?;
        self.dom.blur(node).await
    }

    /// Write the whole value through the platform setter, then `input`, `change` and
    /// blur. For masked widgets that reformat keystrokes.
    pub async fn write_direct(&self, node: NodeRef, value: &str) -> DomResult<()> {
        trace!(node = %node, "direct value write");
        self.dom.focus(node).await?;
        self.dom.set_value(node, value, ValueSetter::Platform).await?;
        self.dom.dispatch(node, DomEvent::Input).await?;
        self.dom.dispatch(node, DomEvent::Change).await?;
        self.dom.blur(node).await
    }
}

#[cfg(test)]
mod tests {
    use dom_port::{ElementSpec, MemoryDom};

    use super::*;

    fn tracked_input(dom: &MemoryDom) -> NodeRef {
        dom.build(|tree| {
            let root = tree.root();
            tree.append(root, ElementSpec::input("text").tracked())
        })
    }

    #[tokio::test]
    async fn click_dispatches_mouse_sequence() {
        let dom = MemoryDom::new();
        let button = dom.build(|tree| {
            let root = tree.root();
            tree.append(root, ElementSpec::new("button"))
        });
        Simulator::new(&dom, true).click(button).await.unwrap();
        assert_eq!(
            dom.events_for(button),
            vec![DomEvent::MouseDown, DomEvent::MouseUp, DomEvent::Click]
        );
    }

    #[tokio::test]
    async fn typing_emits_one_input_per_character() {
        let dom = MemoryDom::new();
        let input = tracked_input(&dom);
        Simulator::new(&dom, true)
            .type_text(input, "Иван")
            .await
            .unwrap();

        let events = dom.events();
        let inputs: Vec<&str> = events
            .iter()
            .filter(|record| record.event == DomEvent::Input)
            .map(|record| record.value.as_str())
            .collect();
        assert_eq!(inputs, vec!["", "И", "Ив", "Ива", "Иван"]);
        assert_eq!(
            dom.events_for(input).last().copied(),
            Some(DomEvent::Blur)
        );
        assert_eq!(dom.committed_value(input).as_deref(), Some("Иван"));
    }

    #[tokio::test]
    async fn property_typing_is_lost_on_intercepting_frameworks() {
        let dom = MemoryDom::new();
        let input = tracked_input(&dom);
        Simulator::new(&dom, false)
            .type_text(input, "abc")
            .await
            .unwrap();
        assert_eq!(dom.value(input), "abc");
        assert_eq!(dom.committed_value(input).as_deref(), Some(""));
    }

    #[tokio::test]
    async fn direct_write_commits_in_one_step() {
        let dom = MemoryDom::new();
        let input = tracked_input(&dom);
        Simulator::new(&dom, false)
            .write_direct(input, "01.02.2024 — 01.02.2024")
            .await
            .unwrap();
        assert_eq!(
            dom.committed_value(input).as_deref(),
            Some("01.02.2024 — 01.02.2024")
        );
        assert_eq!(
            dom.events_for(input),
            vec![DomEvent::Focus, DomEvent::Input, DomEvent::Change, DomEvent::Blur]
        );
    }
}
