//! Article entity and the form validation rules applied before any write.

use std::collections::BTreeMap;

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 40;
pub const BODY_MIN_CHARS: usize = 10;

pub const TITLE_FIELD: &str = "title";
pub const BODY_FIELD: &str = "body";

pub const TITLE_REQUIRED: &str = "title required";
pub const TITLE_LENGTH_OUT_OF_RANGE: &str = "title length out of range";
pub const BODY_REQUIRED: &str = "body required";
pub const BODY_TOO_SHORT: &str = "body too short";

/// A persisted blog article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    pub id: i64,
    pub title: String,
    pub body: String,
}

/// Title and body as submitted through the article form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleInput {
    pub title: String,
    pub body: String,
}

impl ArticleInput {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn validate(&self) -> FieldErrors {
        validate_article(&self.title, &self.body)
    }
}

/// Field name to message mapping. Any entry means the submission is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: BTreeMap<&'static str, &'static str>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: &'static str) {
        self.entries.insert(field, message);
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.entries.get(field).copied()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().map(|(field, message)| (*field, *message))
    }
}

/// Check a submitted title and body, returning one message per failing field.
///
/// Lengths are counted in Unicode scalar values so multi-byte titles are not
/// penalised.
pub fn validate_article(title: &str, body: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if title.is_empty() {
        errors.insert(TITLE_FIELD, TITLE_REQUIRED);
    } else {
        let chars = title.chars().count();
        if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&chars) {
            errors.insert(TITLE_FIELD, TITLE_LENGTH_OUT_OF_RANGE);
        }
    }

    if body.is_empty() {
        errors.insert(BODY_FIELD, BODY_REQUIRED);
    } else if body.chars().count() < BODY_MIN_CHARS {
        errors.insert(BODY_FIELD, BODY_TOO_SHORT);
    }

    errors
}
