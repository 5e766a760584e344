use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle to one element.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeRef(pub u64);

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Snapshot of the attributes and state the engine decides on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementInfo {
    /// Lower-case tag name.
    pub tag: String,
    /// Lower-case `type` for `<input>`, `None` for other tags.
    pub input_type: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub placeholder: Option<String>,
    pub classes: Vec<String>,
    pub value: String,
    pub checked: bool,
    pub disabled: bool,
    pub readonly: bool,
    pub required: bool,
    pub aria_required: bool,
    pub visible: bool,
    pub min: Option<String>,
    pub max: Option<String>,
}

impl ElementInfo {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    pub fn is_input_type(&self, kind: &str) -> bool {
        self.input_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case(kind))
    }

    pub fn has_value(&self) -> bool {
        !self.value.trim().is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
    pub disabled: bool,
}

/// Synthetic events the engine dispatches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomEvent {
    MouseDown,
    MouseUp,
    Click,
    Input,
    Change,
    Focus,
    Blur,
}

impl DomEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DomEvent::MouseDown => "mousedown",
            DomEvent::MouseUp => "mouseup",
            DomEvent::Click => "click",
            DomEvent::Input => "input",
            DomEvent::Change => "change",
            DomEvent::Focus => "focus",
            DomEvent::Blur => "blur",
        }
    }

    pub fn is_mouse(&self) -> bool {
        matches!(self, DomEvent::MouseDown | DomEvent::MouseUp | DomEvent::Click)
    }

    pub fn bubbles(&self) -> bool {
        !matches!(self, DomEvent::Focus | DomEvent::Blur)
    }

    /// Mouse events are cancelable, form events are not.
    pub fn cancelable(&self) -> bool {
        self.is_mouse()
    }
}

/// How a value reaches the element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSetter {
    /// Plain `el.value = ...`, visible to any interception a framework installed.
    #[default]
    Property,
    /// The prototype's own setter, bypassing per-instance interception.
    Platform,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_match_dom() {
        assert_eq!(DomEvent::MouseDown.name(), "mousedown");
        assert_eq!(DomEvent::Change.name(), "change");
        assert!(DomEvent::Click.cancelable());
        assert!(!DomEvent::Input.cancelable());
        assert!(!DomEvent::Blur.bubbles());
    }

    #[test]
    fn whitespace_only_value_is_empty() {
        let info = ElementInfo {
            value: "   ".into(),
            ..Default::default()
        };
        assert!(!info.has_value());
    }
}
