// API module entry
// Routes incoming requests: public greeting, guarded teachers namespace

mod response;
mod teachers;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::auth;
use crate::config::AppState;
use crate::logger;

/// Guarded resource namespace
const TEACHERS_PREFIX: &str = "/api/teachers";

/// Static greeting served unguarded at the root
const GREETING: &str = "Teachers API";

/// Main entry point for HTTP request handling
///
/// Dispatches to handler functions based on request path and method. The
/// teachers namespace is gated by the access guard; everything else is
/// either the public greeting or a 404.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let mut entry = logger::AccessLogEntry::new(
        peer_addr.ip().to_string(),
        method.to_string(),
        path.clone(),
    );
    entry.http_version = version_label(req.version());
    entry.user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let resp = route_request(req, &method, &path, &state).await;

    if state
        .cached_access_log
        .load(std::sync::atomic::Ordering::Relaxed)
    {
        entry.status = resp.status().as_u16();
        entry.body_bytes = usize::try_from(resp.body().size_hint().exact().unwrap_or(0))
            .unwrap_or(usize::MAX);
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(resp)
}

/// Route request based on method and path
async fn route_request(
    req: Request<hyper::body::Incoming>,
    method: &Method,
    path: &str,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    // Refuse oversized bodies before touching any handler
    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return resp;
    }

    // Public greeting at the root
    if *method == Method::GET && path == "/" {
        return response::text_response(StatusCode::OK, GREETING);
    }

    // Guarded teachers namespace
    if let Some(rest) = namespace_rest(path) {
        if let Err(e) = auth::authorize(req.headers(), &state.config.auth) {
            logger::log_auth_rejected(method.as_str(), path);
            return auth::challenge(&state.config.auth.realm, e);
        }
        return dispatch_teachers(req, method, rest, state).await;
    }

    response::not_found()
}

/// Extract the path remainder inside the teachers namespace
///
/// Returns `None` when the path is outside the namespace (including
/// lookalikes such as `/api/teachersx`).
fn namespace_rest(path: &str) -> Option<&str> {
    let rest = path.strip_prefix(TEACHERS_PREFIX)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

/// Dispatch an authenticated request inside the teachers namespace
async fn dispatch_teachers(
    req: Request<hyper::body::Incoming>,
    method: &Method,
    rest: &str,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let id_segment = item_segment(rest);

    match (method, id_segment) {
        (&Method::GET, None) => teachers::handle_list(Arc::clone(state)).await,
        (&Method::POST, None) => teachers::handle_create(req, Arc::clone(state)).await,
        (&Method::GET, Some(id)) => teachers::handle_get(Arc::clone(state), id).await,
        (&Method::DELETE, Some(id)) => teachers::handle_delete(Arc::clone(state), id).await,
        _ => {
            logger::log_api_request(method.as_str(), &format!("{TEACHERS_PREFIX}{rest}"), 404);
            response::not_found()
        }
    }
}

/// Split the namespace remainder into an optional single item segment
///
/// `""` and `"/"` address the collection; `"/x"` addresses item `x`. Deeper
/// paths have no route.
fn item_segment(rest: &str) -> Option<&str> {
    match rest.strip_prefix('/') {
        None | Some("") => None,
        Some(segment) if segment.contains('/') => Some(""),
        Some(segment) => Some(segment),
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(response::payload_too_large())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

fn version_label(version: Version) -> String {
    if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2"
    } else {
        "1.1"
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_rest() {
        assert_eq!(namespace_rest("/api/teachers"), Some(""));
        assert_eq!(namespace_rest("/api/teachers/"), Some("/"));
        assert_eq!(namespace_rest("/api/teachers/2"), Some("/2"));
        assert_eq!(namespace_rest("/api/teachersx"), None);
        assert_eq!(namespace_rest("/api"), None);
        assert_eq!(namespace_rest("/"), None);
    }

    #[test]
    fn test_item_segment() {
        assert_eq!(item_segment(""), None);
        assert_eq!(item_segment("/"), None);
        assert_eq!(item_segment("/2"), Some("2"));
        assert_eq!(item_segment("/2/extra"), Some(""));
    }
}
