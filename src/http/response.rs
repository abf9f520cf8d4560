//! Response construction.
//!
//! # Responsibilities
//! - Build canonicalization redirects
//! - Render views, or dump their variables for `format=debug`
//! - Send items as JSON or through the RDF serializer
//!
//! # Design Decisions
//! - The status code is decided by the caller and set exactly once
//! - JSON bodies are pretty-printed with two-space indentation
//! - Serialized bodies carry the format's own content type

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;

use crate::backend::Item;
use crate::http::error::GatewayError;
use crate::negotiation::{Format, JSON_CONTENT_TYPE};
use crate::rdf::{RdfSerializer, SerializeError};
use crate::views::{View, ViewRenderer, ViewVars};

/// Permanent redirect to a canonical local path.
pub fn redirect(target: &str) -> Response {
    match HeaderValue::from_str(target) {
        Ok(location) => {
            (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response()
        }
        // local paths come from parsed URLs and are always valid header values
        Err(_) => (StatusCode::BAD_REQUEST, "Invalid URI").into_response(),
    }
}

/// Render a view, or its variables as JSON when `format` is `debug`.
pub fn render_view(
    views: &dyn ViewRenderer,
    view: View,
    format: &Format,
    vars: &ViewVars,
    status: StatusCode,
) -> Result<Response, GatewayError> {
    if *format == Format::Debug {
        return json(status, vars);
    }
    let html = views.render(view, vars)?;
    Ok((status, Html(html)).into_response())
}

/// Send an item in a non-view format.
pub fn render_item(
    serializer: &dyn RdfSerializer,
    format: &Format,
    item: Option<&Item>,
    status: StatusCode,
) -> Result<Response, GatewayError> {
    match format.serializer_content_type() {
        Some(content_type) => {
            let body = serializer.serialize(item, content_type)?;
            let content_type = HeaderValue::from_str(content_type)
                .map_err(|_| SerializeError::UnsupportedContentType(content_type.to_string()))?;
            Ok((status, [(header::CONTENT_TYPE, content_type)], body).into_response())
        }
        None => json(status, &item),
    }
}

fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Result<Response, GatewayError> {
    let body = serde_json::to_string_pretty(value).map_err(SerializeError::from)?;
    Ok((
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
        body,
    )
        .into_response())
}
