//! Wire types for the `/api/views` resource.

use serde::{Deserialize, Serialize};

/// Response body for `GET /api/views`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewsResponse {
    /// Current total view count.
    pub views: u64,
}

/// Response body for `POST /api/views`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordVisitResponse {
    /// Total view count after this request.
    pub views: u64,
    /// Whether this request counted as a new visit.
    pub is_new_visit: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_visit_uses_camel_case() {
        let body = RecordVisitResponse {
            views: 824,
            is_new_visit: true,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "views": 824, "isNewVisit": true }));
    }
}
