//! Join collection links to full testimonial records.

use std::collections::HashMap;

use kudos_core::{CollectionLink, RawRecord, Testimonial};

/// Full testimonial records fetched in the single materialization call.
pub const TESTIMONIALS_LIMIT: u32 = 200;

/// Resolve links into testimonials sorted by display order.
///
/// Links are visited in the order they were fetched. A link whose testimonial
/// is missing from `records` is dropped; records without an id never join.
/// The sort is stable, so equal orders keep their fetch order.
pub fn materialize(links: &[CollectionLink], records: &[RawRecord]) -> Vec<Testimonial> {
    let by_id: HashMap<&str, &RawRecord> = records
        .iter()
        .filter(|r| !r.id.is_empty())
        .map(|r| (r.id.as_str(), r))
        .collect();

    let mut testimonials: Vec<Testimonial> = links
        .iter()
        .filter_map(|link| {
            let id = link.testimonial_id.as_deref()?;
            let Some(record) = by_id.get(id) else {
                tracing::debug!(testimonial_id = id, "dropping link to unknown testimonial");
                return None;
            };
            Some(Testimonial::from_record(record, link.order))
        })
        .collect();

    testimonials.sort_by(|a, b| a.order.total_cmp(&b.order));
    testimonials
}
