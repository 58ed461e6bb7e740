//! Declarative field lookup across the `fields` and `data` sections of a record.
//!
//! Each attribute owns an ordered list of [`Candidate`] locations. Lookups walk
//! the list and return the first acceptable value, so supporting another
//! naming variant means adding an entry to a table here.

use serde_json::Value;

use crate::record::RawRecord;

/// Which part of a record a candidate reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Fields,
    Data,
}

/// A single location an attribute may be stored at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub section: Section,
    pub key: &'static str,
}

impl Candidate {
    pub const fn fields(key: &'static str) -> Self {
        Self { section: Section::Fields, key }
    }

    pub const fn data(key: &'static str) -> Self {
        Self { section: Section::Data, key }
    }
}

pub const COLLECTION_NAME: &[Candidate] = &[Candidate::fields("name"), Candidate::data("name")];

pub const LINK_TESTIMONIAL: &[Candidate] = &[Candidate::fields("Testimonial"), Candidate::data("Testimonial")];
pub const LINK_ORDER: &[Candidate] = &[Candidate::fields("Order"), Candidate::data("Order")];

pub const NAME: &[Candidate] = &[Candidate::fields("name"), Candidate::data("name")];
pub const EMAIL: &[Candidate] = &[Candidate::fields("email"), Candidate::data("email")];
pub const RATING: &[Candidate] = &[Candidate::fields("rating"), Candidate::data("rating")];
pub const TEXT: &[Candidate] = &[Candidate::fields("text"), Candidate::data("text")];
pub const PHOTO: &[Candidate] = &[Candidate::fields("photo"), Candidate::data("photo")];
pub const JOB: &[Candidate] = &[Candidate::fields("job"), Candidate::data("job")];
pub const COMPANY: &[Candidate] = &[Candidate::fields("company"), Candidate::data("company")];
pub const WEBSITE: &[Candidate] = &[Candidate::fields("website"), Candidate::data("website")];

/// Keys tried, in order, when an attachment arrives as an object.
const ATTACHMENT_URL_KEYS: &[&str] = &["url", "href"];

/// Whether a value counts as set: non-empty strings, non-zero numbers, `true`,
/// and any array or object.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a scalar as text. Arrays, objects and null have no text form.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read a finite number, accepting numeric strings.
pub fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Normalize an attachment field into a list of URLs.
///
/// List items may be plain strings or objects carrying `url`/`href`; items
/// yielding nothing are dropped. A non-list value becomes a single entry.
pub fn url_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(attachment_url).collect(),
        other => scalar_text(other).into_iter().collect(),
    }
}

fn attachment_url(item: &Value) -> Option<String> {
    let url = match item {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => ATTACHMENT_URL_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find(|v| is_truthy(v))
            .and_then(scalar_text),
        _ => None,
    };
    url.filter(|u| !u.is_empty())
}

impl RawRecord {
    /// Value stored at a single candidate location.
    pub fn lookup(&self, candidate: &Candidate) -> Option<&Value> {
        let section = match candidate.section {
            Section::Fields => self.fields.as_ref(),
            Section::Data => self.data.as_ref(),
        };
        section.and_then(|map| map.get(candidate.key))
    }

    /// First candidate value that is present and not null.
    pub fn first_present(&self, candidates: &[Candidate]) -> Option<&Value> {
        candidates
            .iter()
            .filter_map(|c| self.lookup(c))
            .find(|v| !v.is_null())
    }

    /// First candidate value that is truthy (see [`is_truthy`]).
    pub fn first_non_empty(&self, candidates: &[Candidate]) -> Option<&Value> {
        candidates
            .iter()
            .filter_map(|c| self.lookup(c))
            .find(|v| is_truthy(v))
    }

    pub fn text(&self, candidates: &[Candidate]) -> Option<String> {
        self.first_non_empty(candidates).and_then(scalar_text)
    }

    pub fn number(&self, candidates: &[Candidate]) -> Option<f64> {
        self.first_non_empty(candidates).and_then(as_number)
    }

    pub fn urls(&self, candidates: &[Candidate]) -> Vec<String> {
        self.first_non_empty(candidates).map(url_list).unwrap_or_default()
    }
}
