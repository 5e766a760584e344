use serde::{Deserialize, Serialize};

use crate::config::{FillOptions, FillOptionsPatch};
use crate::errors::{FillError, FillResult};

/// The only action a trigger may request.
pub const FILL_FORM_ACTION: &str = "FILL_FORM";

/// Message delivered by a trigger source (keyboard shortcut or options panel).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerMessage {
    pub action: String,
    #[serde(default)]
    pub options: Option<FillOptionsPatch>,
}

impl TriggerMessage {
    pub fn fill_form(options: Option<FillOptionsPatch>) -> Self {
        Self {
            action: FILL_FORM_ACTION.to_string(),
            options,
        }
    }

    pub fn parse(raw: &str) -> FillResult<Self> {
        serde_json::from_str(raw).map_err(|err| FillError::MalformedTrigger(err.to_string()))
    }

    /// Options for the run this message requests, merged over `defaults`.
    pub fn resolve(&self, defaults: FillOptions) -> FillResult<FillOptions> {
        if self.action != FILL_FORM_ACTION {
            return Err(FillError::UnsupportedAction(self.action.clone()));
        }
        Ok(match &self.options {
            Some(patch) => defaults.merged(patch),
            None => defaults,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_options_use_defaults() {
        let message = TriggerMessage::parse(r#"{"action": "FILL_FORM"}"#).unwrap();
        assert_eq!(
            message.resolve(FillOptions::default()).unwrap(),
            FillOptions {
                only_required: false,
                skip_filled: true
            }
        );
    }

    #[test]
    fn options_from_panel_override_defaults() {
        let message = TriggerMessage::parse(
            r#"{"action": "FILL_FORM", "options": {"onlyRequired": true, "skipFilled": false}}"#,
        )
        .unwrap();
        let options = message.resolve(FillOptions::default()).unwrap();
        assert!(options.only_required);
        assert!(!options.skip_filled);
    }

    #[test]
    fn unknown_action_is_rejected() {
        let message = TriggerMessage::parse(r#"{"action": "CLEAR_FORM"}"#).unwrap();
        assert_eq!(
            message.resolve(FillOptions::default()),
            Err(FillError::UnsupportedAction("CLEAR_FORM".into()))
        );
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            TriggerMessage::parse("fill please"),
            Err(FillError::MalformedTrigger(_))
        ));
    }
}
