//! Change-detection fingerprint for a collection's membership and order.

use sha2::{Digest, Sha256};

use crate::model::CollectionLink;

const SEPARATOR: &str = "|";

/// Compute the fingerprint of a collection's join records.
///
/// Each link contributes `"<testimonialId>:<order>"`; the parts are sorted
/// before joining so the result does not depend on the order the backend
/// returned them in. Only membership and order are covered: editing a linked
/// testimonial's own content leaves the fingerprint unchanged.
pub fn compute_change_hash(links: &[CollectionLink]) -> String {
    let mut parts: Vec<String> = links.iter().map(CollectionLink::fingerprint).collect();
    parts.sort_unstable();

    let mut hasher = Sha256::new();
    hasher.update(parts.join(SEPARATOR).as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links() -> Vec<CollectionLink> {
        vec![CollectionLink::new("recA", 1.0), CollectionLink::new("recB", 2.0), CollectionLink::new("recC", 3.0)]
    }

    #[test]
    fn test_hash_stability() {
        assert_eq!(compute_change_hash(&links()), compute_change_hash(&links()));
    }

    #[test]
    fn test_hash_ignores_input_order() {
        let mut shuffled = links();
        shuffled.reverse();
        shuffled.swap(0, 1);
        assert_eq!(compute_change_hash(&links()), compute_change_hash(&shuffled));
    }

    #[test]
    fn test_hash_changes_with_order_value() {
        let mut moved = links();
        moved[1].order = 5.0;
        assert_ne!(compute_change_hash(&links()), compute_change_hash(&moved));
    }

    #[test]
    fn test_hash_changes_when_orders_swap() {
        let mut swapped = links();
        swapped[0].order = 2.0;
        swapped[1].order = 1.0;
        assert_ne!(compute_change_hash(&links()), compute_change_hash(&swapped));
    }

    #[test]
    fn test_hash_changes_with_membership() {
        let mut added = links();
        added.push(CollectionLink::new("recD", 4.0));
        assert_ne!(compute_change_hash(&links()), compute_change_hash(&added));

        let mut removed = links();
        removed.pop();
        assert_ne!(compute_change_hash(&links()), compute_change_hash(&removed));
    }

    #[test]
    fn test_hash_format() {
        let hash = compute_change_hash(&links());
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_of_empty_set_is_defined() {
        assert_eq!(compute_change_hash(&[]), compute_change_hash(&[]));
        assert_ne!(compute_change_hash(&[]), compute_change_hash(&links()));
    }
}
