//! Minimal CSS selector engine for the in-memory DOM.
//!
//! Supports comma-separated compound selectors built from a tag (or `*`), `.class`,
//! `#id` and the `:checked` pseudo-class. Combinators and attribute selectors are
//! rejected.

use crate::errors::{DomError, DomResult};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    checked: bool,
}

/// Element facts a selector is matched against.
pub(crate) struct Candidate<'a> {
    pub tag: &'a str,
    pub id: Option<&'a str>,
    pub classes: &'a [String],
    pub checked: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SelectorList(Vec<Compound>);

impl SelectorList {
    pub fn parse(source: &str) -> DomResult<Self> {
        let compounds = source
            .split(',')
            .map(|part| parse_compound(part.trim(), source))
            .collect::<DomResult<Vec<_>>>()?;
        Ok(Self(compounds))
    }

    pub fn matches(&self, candidate: &Candidate<'_>) -> bool {
        self.0.iter().any(|compound| compound.matches(candidate))
    }
}

impl Compound {
    fn matches(&self, candidate: &Candidate<'_>) -> bool {
        if let Some(tag) = &self.tag {
            if !tag.eq_ignore_ascii_case(candidate.tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if candidate.id != Some(id.as_str()) {
                return false;
            }
        }
        if self.checked && !candidate.checked {
            return false;
        }
        self.classes
            .iter()
            .all(|class| candidate.classes.iter().any(|c| c == class))
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn parse_compound(part: &str, source: &str) -> DomResult<Compound> {
    let unsupported = || DomError::Selector(source.to_string());
    if part.is_empty() {
        return Err(unsupported());
    }

    let mut compound = Compound::default();
    let mut rest = part;

    let tag_len = rest
        .find(|c: char| !is_ident_char(c) && c != '*')
        .unwrap_or(rest.len());
    if tag_len > 0 {
        let tag = &rest[..tag_len];
        if tag != "*" {
            if tag.contains('*') {
                return Err(unsupported());
            }
            compound.tag = Some(tag.to_ascii_lowercase());
        }
        rest = &rest[tag_len..];
    }

    while let Some(marker) = rest.chars().next() {
        let body = &rest[marker.len_utf8()..];
        let len = body.find(|c: char| !is_ident_char(c)).unwrap_or(body.len());
        if len == 0 {
            return Err(unsupported());
        }
        let ident = &body[..len];
        match marker {
            '.' => compound.classes.push(ident.to_string()),
            '#' => compound.id = Some(ident.to_string()),
            ':' if ident == "checked" => compound.checked = true,
            _ => return Err(unsupported()),
        }
        rest = &body[len..];
    }

    Ok(compound)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate<'a>(tag: &'a str, classes: &'a [String], checked: bool) -> Candidate<'a> {
        Candidate {
            tag,
            id: Some("main"),
            classes,
            checked,
        }
    }

    #[test]
    fn tag_and_classes_must_all_match() {
        let classes = vec!["dropdown-item".to_string(), "active".to_string()];
        let list = SelectorList::parse("button.dropdown-item").unwrap();
        assert!(list.matches(&candidate("button", &classes, false)));
        assert!(list.matches(&candidate("BUTTON", &classes, false)));
        assert!(!list.matches(&candidate("a", &classes, false)));
    }

    #[test]
    fn comma_list_matches_any() {
        let none: Vec<String> = Vec::new();
        let list = SelectorList::parse("input, textarea, select").unwrap();
        assert!(list.matches(&candidate("textarea", &none, false)));
        assert!(!list.matches(&candidate("label", &none, false)));
    }

    #[test]
    fn checked_and_id_are_supported() {
        let none: Vec<String> = Vec::new();
        let list = SelectorList::parse("input:checked").unwrap();
        assert!(list.matches(&candidate("input", &none, true)));
        assert!(!list.matches(&candidate("input", &none, false)));
        assert!(SelectorList::parse("#main")
            .unwrap()
            .matches(&candidate("div", &none, false)));
    }

    #[test]
    fn combinators_are_rejected() {
        assert!(matches!(
            SelectorList::parse("div .menu"),
            Err(DomError::Selector(_))
        ));
        assert!(SelectorList::parse("a > b").is_err());
        assert!(SelectorList::parse("input[type=text]").is_err());
        assert!(SelectorList::parse("a,").is_err());
    }
}
