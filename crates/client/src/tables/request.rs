//! Request body for the `records/list` endpoint.

use std::collections::BTreeMap;

use serde::Serialize;

/// Filter condition on a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    /// Column text contains the value.
    Contains(String),
    /// Column (usually a linked-record column) references any of the ids.
    In(Vec<String>),
}

/// Body of `POST /bases/{db}/tables/{table}/records/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRequest {
    /// Column filters, keyed by column name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<String, Condition>,

    /// Maximum number of records returned.
    pub limit: u32,
}

impl ListRequest {
    pub fn new(limit: u32) -> Self {
        Self { filters: BTreeMap::new(), limit }
    }

    pub fn filter(mut self, column: impl Into<String>, condition: Condition) -> Self {
        self.filters.insert(column.into(), condition);
        self
    }

    /// Validate the request parameters.
    pub fn validate(&self) -> Result<(), crate::tables::TablesError> {
        use crate::tables::TablesError;

        if self.limit == 0 {
            return Err(TablesError::InvalidRequest("limit must be greater than 0".to_string()));
        }

        if let Some(column) = self.filters.keys().find(|c| c.is_empty()) {
            return Err(TablesError::InvalidRequest(format!("empty filter column name: {column:?}")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::TablesError;

    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_contains_filter() {
        let req = ListRequest::new(10).filter("name", Condition::Contains("DNC Reviews".into()));
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"filters": {"name": {"contains": "DNC Reviews"}}, "limit": 10})
        );
    }

    #[test]
    fn test_serialize_in_filter() {
        let req = ListRequest::new(100).filter("Collection", Condition::In(vec!["recC".into()]));
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"filters": {"Collection": {"in": ["recC"]}}, "limit": 100})
        );
    }

    #[test]
    fn test_serialize_without_filters() {
        let req = ListRequest::new(200);
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({"limit": 200}));
    }

    #[test]
    fn test_zero_limit_rejected() {
        assert!(matches!(ListRequest::new(0).validate(), Err(TablesError::InvalidRequest(_))));
    }

    #[test]
    fn test_empty_column_rejected() {
        let req = ListRequest::new(1).filter("", Condition::Contains("x".into()));
        assert!(matches!(req.validate(), Err(TablesError::InvalidRequest(_))));
    }

    #[test]
    fn test_valid_request() {
        assert!(ListRequest::new(1).validate().is_ok());
    }
}
