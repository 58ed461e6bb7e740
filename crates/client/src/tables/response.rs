//! Response body of the `records/list` endpoint.

use kudos_core::RawRecord;
use serde::Deserialize;

/// Raw response from `records/list`.
#[derive(Debug, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub records: Option<Vec<RawRecord>>,
}

impl ListResponse {
    /// Records in response order; a missing or null list reads as empty.
    pub fn into_records(self) -> Vec<RawRecord> {
        self.records.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE_JSON: &str = r#"{
        "records": [
            {
                "id": "recT1",
                "fields": {
                    "name": "Ada Lovelace",
                    "rating": 5,
                    "photo": [{"url": "https://cdn.example.com/ada.png", "filename": "ada.png"}]
                }
            },
            {
                "id": "recT2",
                "data": {"name": "Grace Hopper"}
            }
        ],
        "hasMore": false
    }"#;

    #[test]
    fn test_deserialize_list_response() {
        let response: ListResponse = serde_json::from_str(FIXTURE_JSON).unwrap();
        let records = response.into_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "recT1");
        assert!(records[0].fields.is_some());
        assert!(records[1].data.is_some());
    }

    #[test]
    fn test_row_without_id_does_not_fail_the_list() {
        let response: ListResponse =
            serde_json::from_str(r#"{"records": [{"fields": {"name": "Orphan"}}, {"id": "recT1", "fields": {}}]}"#)
                .unwrap();
        let records = response.into_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id, "recT1");
    }

    #[test]
    fn test_missing_records() {
        let response: ListResponse = serde_json::from_str("{}").unwrap();
        assert!(response.into_records().is_empty());
    }

    #[test]
    fn test_null_records() {
        let response: ListResponse = serde_json::from_str(r#"{"records": null}"#).unwrap();
        assert!(response.into_records().is_empty());
    }
}
