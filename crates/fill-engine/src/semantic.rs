//! Free-text hints used to guess what a field expects.

use dom_port::{DomPort, DomResult, ElementInfo, NodeRef};
use value_generators::ValueKind;

use crate::config::WidgetSelectors;

/// How a keyword is compared against the words of a label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyword {
    /// Start of a word: `фам` matches `фамилия`, not `нефамильный`.
    Stem(&'static str),
    /// Whole word, or consecutive words when the keyword has several.
    Word(&'static str),
}

impl Keyword {
    fn matches(&self, words: &[&str]) -> bool {
        match *self {
            Keyword::Stem(stem) => words.iter().any(|word| word.starts_with(stem)),
            Keyword::Word(phrase) => {
                let wanted = split_words(phrase);
                !wanted.is_empty()
                    && words
                        .windows(wanted.len())
                        .any(|window| window == wanted.as_slice())
            }
        }
    }
}

/// Keyword buckets, checked in order. The first bucket with a keyword found in the
/// label decides.
pub const KEYWORD_BUCKETS: &[(ValueKind, &[Keyword])] = &[
    (
        ValueKind::LastName,
        &[
            Keyword::Stem("фам"),
            Keyword::Word("surname"),
            Keyword::Word("last name"),
            Keyword::Word("lastname"),
        ],
    ),
    (
        ValueKind::Patronymic,
        &[
            Keyword::Stem("отче"),
            Keyword::Word("patronymic"),
            Keyword::Word("middle"),
        ],
    ),
    (
        ValueKind::FirstName,
        &[
            Keyword::Stem("имя"),
            Keyword::Word("first name"),
            Keyword::Word("firstname"),
        ],
    ),
    (
        ValueKind::Email,
        &[
            Keyword::Word("email"),
            Keyword::Word("e mail"),
            Keyword::Stem("почт"),
        ],
    ),
    (
        ValueKind::Phone,
        &[
            Keyword::Stem("телеф"),
            Keyword::Word("тел"),
            Keyword::Word("phone"),
            Keyword::Word("telephone"),
        ],
    ),
    (
        ValueKind::Snils,
        &[Keyword::Stem("снилс"), Keyword::Word("snils")],
    ),
    (ValueKind::Date, &[Keyword::Stem("дата"), Keyword::Word("date")]),
];

/// Words of a label; anything that is not a letter or digit separates them.
fn split_words(label: &str) -> Vec<&str> {
    label
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect()
}

fn bucket_matches(keywords: &[Keyword], words: &[&str]) -> bool {
    keywords.iter().any(|keyword| keyword.matches(words))
}

/// Value kind suggested by a lower-cased semantic label.
pub fn keyword_kind(label: &str) -> Option<ValueKind> {
    let words = split_words(label);
    KEYWORD_BUCKETS
        .iter()
        .find(|(_, keywords)| bucket_matches(keywords, &words))
        .map(|(kind, _)| *kind)
}

/// True when the label carries a date keyword, whatever else it mentions.
pub fn is_date_label(label: &str) -> bool {
    let words = split_words(label);
    KEYWORD_BUCKETS
        .iter()
        .filter(|(kind, _)| *kind == ValueKind::Date)
        .any(|(_, keywords)| bucket_matches(keywords, &words))
}

/// Library field caption, associated `<label>`, placeholder, name, id and classes,
/// lower-cased and space-joined.
pub async fn semantic_label(
    dom: &dyn DomPort,
    node: NodeRef,
    info: &ElementInfo,
    selectors: &WidgetSelectors,
) -> DomResult<String> {
    let mut parts: Vec<String> = Vec::new();

    if let Some(field) = dom.closest(node, &selectors.field_wrapper).await? {
        if let Some(caption) = dom.query(field, &selectors.field_label).await? {
            parts.push(dom.text(caption).await?);
        }
    }
    if let Some(label) = dom.label_text(node).await? {
        parts.push(label);
    }
    parts.extend(info.placeholder.iter().cloned());
    parts.extend(info.name.iter().cloned());
    parts.extend(info.id.iter().cloned());
    parts.extend(info.classes.iter().cloned());

    Ok(parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase())
}
