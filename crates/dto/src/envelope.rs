use serde::Serialize;

/// Success envelope. `message`, `data`, and `meta` are all optional and
/// omitted from the JSON when absent.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl<T: Serialize> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            meta: None,
        }
    }
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
    pub fn meta(mut self, meta: impl Serialize) -> Self {
        self.meta = Some(serde_json::to_value(meta).expect("meta serializes"));
        self
    }
}

/// Pagination block carried under `meta.pagination` on list responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(pager: Pager, total: i64) -> Self {
        let pages = (total + pager.limit - 1) / pager.limit;
        Self {
            page: pager.page,
            limit: pager.limit,
            total,
            pages,
            has_next: pager.page < pages,
            has_prev: pager.page > 1,
        }
    }
    /// `meta` value combining pagination with the filters that produced it.
    pub fn meta(self, filters: impl Serialize) -> serde_json::Value {
        serde_json::json!({
            "pagination": self,
            "filters": filters,
        })
    }
}

/// Client-requested page window, clamped server-side.
///
/// The limit ceiling depends on the endpoint (50 for personal history,
/// 100 for the leaderboard and lesson lists) and wins over whatever the
/// client asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page: i64,
    pub limit: i64,
}

impl Pager {
    pub fn clamped(page: Option<i64>, limit: Option<i64>, max: i64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(10).clamp(1, max),
        }
    }
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_omits_absent_fields() {
        let json = serde_json::to_value(Envelope::data(7)).expect("json");
        assert_eq!(json, serde_json::json!({"success": true, "data": 7}));
    }

    #[test]
    fn envelope_carries_message_and_meta() {
        let json = serde_json::to_value(
            Envelope::data(vec![1, 2])
                .message("ok")
                .meta(serde_json::json!({"k": "v"})),
        )
        .expect("json");
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "ok");
        assert_eq!(json["meta"]["k"], "v");
    }

    #[test]
    fn pager_clamps_oversized_limit() {
        let pager = Pager::clamped(None, Some(500), 50);
        assert_eq!(pager.limit, 50);
        assert_eq!(pager.page, 1);
        let pager = Pager::clamped(Some(3), Some(500), 100);
        assert_eq!(pager.limit, 100);
        assert_eq!(pager.offset(), 200);
    }

    #[test]
    fn pager_floors_nonsense_input() {
        let pager = Pager::clamped(Some(-2), Some(0), 50);
        assert_eq!(pager.page, 1);
        assert_eq!(pager.limit, 1);
    }

    #[test]
    fn pagination_counts_pages() {
        let p = Pagination::new(Pager { page: 2, limit: 10 }, 35);
        assert_eq!(p.pages, 4);
        assert!(p.has_next);
        assert!(p.has_prev);
        let last = Pagination::new(Pager { page: 4, limit: 10 }, 35);
        assert!(!last.has_next);
    }
}
