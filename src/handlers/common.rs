use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Page selector for listing endpoints. Carried as a string so that absent
/// or non-numeric values fall back to page 1 instead of rejecting the
/// request.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn page_number(&self) -> u64 {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|&p| p > 0)
            .unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(raw: Option<&str>) -> PageQuery {
        PageQuery {
            page: raw.map(str::to_string),
        }
    }

    #[test]
    fn absent_or_garbage_page_defaults_to_one() {
        assert_eq!(query(None).page_number(), 1);
        assert_eq!(query(Some("")).page_number(), 1);
        assert_eq!(query(Some("abc")).page_number(), 1);
        assert_eq!(query(Some("0")).page_number(), 1);
        assert_eq!(query(Some("-3")).page_number(), 1);
    }

    #[test]
    fn numeric_page_parses() {
        assert_eq!(query(Some("2")).page_number(), 2);
        assert_eq!(query(Some(" 7 ")).page_number(), 7);
    }
}
