//! Teachers resource handlers
//!
//! The four operations over the teacher store: list, get by id, create and
//! delete. Success responses are JSON; validation and lookup failures answer
//! with plain text.

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, Response, StatusCode};
use serde_json::Value;
use std::sync::Arc;

use super::response::{json_response, text_response};
use crate::config::AppState;
use crate::logger;
use crate::store::{Teacher, TeacherStore};

const NOT_FOUND_MSG: &str = "Teacher not found";
const VALIDATION_MSG: &str = "Name and age are required";

/// GET /api/teachers - full list in insertion order
pub async fn handle_list(state: Arc<AppState>) -> Response<Full<Bytes>> {
    let store = state.store.read().await;
    logger::log_api_request("GET", "/api/teachers", 200);
    json_response(StatusCode::OK, &store.list())
}

/// GET /api/teachers/:id - single record lookup
pub async fn handle_get(state: Arc<AppState>, id_segment: &str) -> Response<Full<Bytes>> {
    let store = state.store.read().await;
    match parse_id(id_segment).and_then(|id| store.find(id)) {
        Some(teacher) => {
            logger::log_api_request("GET", &format!("/api/teachers/{id_segment}"), 200);
            json_response(StatusCode::OK, teacher)
        }
        None => {
            logger::log_api_request("GET", &format!("/api/teachers/{id_segment}"), 404);
            text_response(StatusCode::NOT_FOUND, NOT_FOUND_MSG)
        }
    }
}

/// POST /api/teachers - create a new record
pub async fn handle_create(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Response<Full<Bytes>> {
    let whole_body = if let Ok(collected) = req.collect().await {
        collected.to_bytes()
    } else {
        logger::log_api_request("POST", "/api/teachers", 400);
        return text_response(StatusCode::BAD_REQUEST, "Failed to read request body");
    };

    let body: Value = match serde_json::from_slice(&whole_body) {
        Ok(v) => v,
        Err(e) => {
            logger::log_api_request("POST", "/api/teachers", 400);
            return text_response(StatusCode::BAD_REQUEST, &format!("Invalid JSON: {e}"));
        }
    };

    let mut store = state.store.write().await;
    match create_from_body(&body, &mut store) {
        Ok(teacher) => {
            logger::log_api_request("POST", "/api/teachers", 200);
            json_response(StatusCode::OK, &teacher)
        }
        Err(message) => {
            logger::log_api_request("POST", "/api/teachers", 400);
            text_response(StatusCode::BAD_REQUEST, message)
        }
    }
}

/// DELETE /api/teachers/:id - remove a record, returning its prior snapshot
pub async fn handle_delete(state: Arc<AppState>, id_segment: &str) -> Response<Full<Bytes>> {
    let mut store = state.store.write().await;
    match parse_id(id_segment).and_then(|id| store.remove(id)) {
        Some(teacher) => {
            logger::log_api_request("DELETE", &format!("/api/teachers/{id_segment}"), 200);
            json_response(StatusCode::OK, &teacher)
        }
        None => {
            logger::log_api_request("DELETE", &format!("/api/teachers/{id_segment}"), 404);
            text_response(StatusCode::NOT_FOUND, NOT_FOUND_MSG)
        }
    }
}

/// Parse the path id segment; anything non-numeric behaves like a missing id
fn parse_id(segment: &str) -> Option<u64> {
    segment.parse().ok()
}

/// Validate the create payload and append the new record
///
/// `name` and `age` use truthy presence checks: absent, `null`, `false`,
/// `0` and `""` all count as missing. `enroll` is stored as `true` only when
/// the payload carries the literal JSON `true`.
pub fn create_from_body(body: &Value, store: &mut TeacherStore) -> Result<Teacher, &'static str> {
    if !is_present(body.get("name")) || !is_present(body.get("age")) {
        return Err(VALIDATION_MSG);
    }

    let name = coerce_name(&body["name"]);
    let age = coerce_age(&body["age"]);
    let enroll = body.get("enroll") == Some(&Value::Bool(true));

    Ok(store.insert(name, age, enroll))
}

/// Truthy presence check over a JSON value
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Coerce the name field to text; non-string truthy values keep their
/// JSON rendering
fn coerce_name(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Coerce the age field to an integer
///
/// JSON numbers are truncated, numeric strings parsed. Values that survive
/// the truthy check but still fail to parse coerce to 0.
fn coerce_age(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f as i64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::IdPolicy;
    use serde_json::json;

    fn seeded() -> TeacherStore {
        TeacherStore::seeded(IdPolicy::LengthPlusOne)
    }

    #[test]
    fn test_create_valid_body() {
        let mut store = seeded();
        let body = json!({"name": "Danny", "age": 25, "enroll": true});

        let teacher = create_from_body(&body, &mut store).unwrap();
        assert_eq!(teacher.id, 4);
        assert_eq!(teacher.name, "Danny");
        assert_eq!(teacher.age, 25);
        assert!(teacher.enroll);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_create_missing_name() {
        let mut store = seeded();
        let body = json!({"age": 25});

        assert!(create_from_body(&body, &mut store).is_err());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_create_rejects_falsy_fields() {
        let mut store = seeded();
        for body in [
            json!({"name": "", "age": 25}),
            json!({"name": "Danny", "age": 0}),
            json!({"name": null, "age": 25}),
            json!({"name": "Danny"}),
            json!({"name": false, "age": 25}),
        ] {
            assert!(create_from_body(&body, &mut store).is_err());
        }
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_enroll_only_literal_true() {
        let mut store = seeded();
        for (value, expected) in [
            (json!(true), true),
            (json!("true"), false),
            (json!(1), false),
            (json!(null), false),
        ] {
            let body = json!({"name": "Danny", "age": 25, "enroll": value});
            let teacher = create_from_body(&body, &mut store).unwrap();
            assert_eq!(teacher.enroll, expected);
        }

        // Absent enroll also stores false
        let body = json!({"name": "Danny", "age": 25});
        assert!(!create_from_body(&body, &mut store).unwrap().enroll);
    }

    #[test]
    fn test_age_coercion() {
        assert_eq!(coerce_age(&json!(25)), 25);
        assert_eq!(coerce_age(&json!(25.9)), 25);
        assert_eq!(coerce_age(&json!("25")), 25);
        assert_eq!(coerce_age(&json!(" 25 ")), 25);
        assert_eq!(coerce_age(&json!("25.9")), 25);
        assert_eq!(coerce_age(&json!("abc")), 0);
    }

    #[test]
    fn test_create_after_delete_collides() {
        let mut store = seeded();
        store.remove(2).unwrap();

        let body = json!({"name": "Danny", "age": 25, "enroll": true});
        let teacher = create_from_body(&body, &mut store).unwrap();

        // Documented length+1 behavior: the new record collides with
        // the surviving id 3.
        assert_eq!(teacher.id, 3);
        assert!(store.find(3).is_some());
        assert_eq!(store.list().iter().filter(|t| t.id == 3).count(), 2);
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("2"), Some(2));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("-1"), None);
    }
}
