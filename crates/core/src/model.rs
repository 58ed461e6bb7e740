//! Domain types mapped out of raw table records.

use serde::{Deserialize, Serialize};

use crate::fields::{self, as_number, scalar_text};
use crate::record::RawRecord;

/// A named grouping of testimonials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub id: String,
    pub name: Option<String>,
}

impl Collection {
    pub fn from_record(record: &RawRecord) -> Self {
        Self { id: record.id.clone(), name: record.text(fields::COLLECTION_NAME) }
    }

    /// Whether the name contains `needle`, or equals `exact` outright.
    pub fn matches(&self, needle: &str, exact: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|name| name.contains(needle) || name == exact)
    }
}

/// Join row placing a testimonial in a collection at a display position.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionLink {
    pub testimonial_id: Option<String>,
    pub order: f64,
}

impl CollectionLink {
    pub fn new(testimonial_id: impl Into<String>, order: f64) -> Self {
        Self { testimonial_id: Some(testimonial_id.into()), order }
    }

    /// Read the testimonial reference and order from a join record.
    ///
    /// Linked-record columns arrive as lists; only the first id is used.
    pub fn from_record(record: &RawRecord) -> Self {
        let testimonial_id = record
            .first_non_empty(fields::LINK_TESTIMONIAL)
            .and_then(|value| match value {
                serde_json::Value::Array(ids) => ids.first().and_then(scalar_text),
                other => scalar_text(other),
            });
        let order = record
            .first_present(fields::LINK_ORDER)
            .and_then(as_number)
            .unwrap_or(0.0);

        Self { testimonial_id, order }
    }

    /// `"<testimonialId>:<order>"`, the unit the change hash is built from.
    pub fn fingerprint(&self) -> String {
        format!("{}:{}", self.testimonial_id.as_deref().unwrap_or_default(), self.order)
    }
}

/// A testimonial ready to be served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    pub email: String,
    pub rating: f64,
    pub text: String,
    pub photo: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub order: f64,
}

impl Testimonial {
    /// Map a full testimonial record, taking `order` from its join record.
    pub fn from_record(record: &RawRecord, order: f64) -> Self {
        Self {
            id: record.id.clone(),
            name: record.text(fields::NAME).unwrap_or_default(),
            email: record.text(fields::EMAIL).unwrap_or_default(),
            rating: record.number(fields::RATING).unwrap_or(0.0),
            text: record.text(fields::TEXT).unwrap_or_default(),
            photo: record.urls(fields::PHOTO),
            job: record.text(fields::JOB),
            company: record.text(fields::COMPANY),
            website: record.text(fields::WEBSITE),
            order,
        }
    }
}
