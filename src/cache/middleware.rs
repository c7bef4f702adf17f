//! Read-Through Cache Middleware
//!
//! Intercepts idempotent JSON reads: serves the stored payload on hit, and on
//! miss captures the downstream handler's response and writes it to the store
//! fire-and-forget. The cache is invisible to clients apart from the
//! diagnostic `X-Cache` header; when the store is down every request simply
//! runs uncached.

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures::{stream, StreamExt};
use tracing::{debug, warn};

use crate::cache::{request_key, CacheClient, DEFAULT_TTL_SECONDS, MAX_CACHEABLE_BODY};

/// Diagnostic header distinguishing cache hits from live responses.
pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

// == Cache Layer ==
/// Per-mount middleware configuration: the shared client plus a TTL.
///
/// Different routers may be wrapped with different TTLs over the same client.
#[derive(Clone)]
pub struct CacheLayer {
    client: CacheClient,
    ttl_seconds: u64,
}

impl CacheLayer {
    /// Creates a layer writing entries with the given TTL.
    pub fn new(client: CacheClient, ttl_seconds: u64) -> Self {
        Self { client, ttl_seconds }
    }

    /// Creates a layer with the default 60 second TTL.
    pub fn with_default_ttl(client: CacheClient) -> Self {
        Self::new(client, DEFAULT_TTL_SECONDS)
    }
}

// == Read-Through Middleware ==
/// Middleware function for `axum::middleware::from_fn_with_state`.
///
/// Only GET requests participate; everything else passes through untouched.
/// Concurrent misses for the same key are not deduplicated: each one runs the
/// downstream handler and re-writes the entry, last write wins.
pub async fn read_through(
    State(layer): State<CacheLayer>,
    req: Request,
    next: Next,
) -> Response {
    if req.method() != Method::GET {
        return next.run(req).await;
    }

    let key = request_key(req.uri());

    if let Some(cached) = layer.client.get(&key).await {
        // Revalidate before replay; a corrupt entry falls through as a miss
        if serde_json::from_str::<serde_json::Value>(&cached).is_ok() {
            debug!(%key, "cache hit");
            return hit_response(cached);
        }
        warn!(%key, "corrupt cache entry, falling through to handler");
    }

    debug!(%key, "cache miss");
    let response = next.run(req).await;
    capture_response(&layer, key, response).await
}

/// Builds the replayed response for a cache hit.
fn hit_response(payload: String) -> Response {
    let mut response = Response::new(Body::from(payload));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
        .headers_mut()
        .insert(X_CACHE, HeaderValue::from_static("HIT"));
    response
}

/// Forwards the downstream response unchanged, tapping qualifying JSON bodies
/// into the store on the way out.
///
/// Buffering is bounded by `MAX_CACHEABLE_BODY`: a `Content-Length` over the
/// cap skips buffering outright, and an unsized stream is read chunk by chunk
/// until the cap, after which the consumed prefix and the remaining stream are
/// forwarded stitched back together.
async fn capture_response(layer: &CacheLayer, key: String, response: Response) -> Response {
    if response.status() != StatusCode::OK || !is_json(&response) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    parts.headers.insert(X_CACHE, HeaderValue::from_static("MISS"));

    if declared_length(&parts.headers).map_or(false, |len| len > MAX_CACHEABLE_BODY) {
        debug!(%key, "response body exceeds cacheable size, skipping cache");
        return Response::from_parts(parts, body);
    }

    let mut frames = body.into_data_stream();
    let mut buffered: Vec<u8> = Vec::new();
    while let Some(chunk) = frames.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(err) => {
                warn!(%key, %err, "failed to buffer response body");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };
        buffered.extend_from_slice(&chunk);
        if buffered.len() > MAX_CACHEABLE_BODY {
            debug!(%key, "response body exceeds cacheable size, skipping cache");
            let prefix = stream::once(async move { Ok::<_, axum::Error>(Bytes::from(buffered)) });
            return Response::from_parts(parts, Body::from_stream(prefix.chain(frames)));
        }
    }

    match std::str::from_utf8(&buffered) {
        Ok(text) => {
            if serde_json::from_str::<serde_json::Value>(text).is_ok() {
                let client = layer.client.clone();
                let ttl = layer.ttl_seconds;
                let payload = text.to_owned();
                let write_key = key.clone();
                // Fire-and-forget: the write never delays the response and is
                // not cancelled if the client goes away
                tokio::spawn(async move {
                    client.set(&write_key, &payload, Some(ttl)).await;
                    debug!(key = %write_key, ttl, "cached response");
                });
            } else {
                warn!(%key, "response body is not valid JSON, skipping cache");
            }
        }
        Err(_) => {
            warn!(%key, "response body is not UTF-8, skipping cache");
        }
    }

    Response::from_parts(parts, Body::from(buffered))
}

/// Parsed `Content-Length` of the response, when the header is present.
fn declared_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("application/json"))
        .unwrap_or(false)
}
