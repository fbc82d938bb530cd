//! HTTP span helpers.

use uuid::Uuid;

/// Route segments followed by a free-form identifier rather than a UUID.
const SLUG_ROUTES: [&str; 1] = ["tenants"];

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) route: String,
    pub(super) span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let route = route_template(path);
    let span_name = format!("{method} {route}");

    RequestSpanName { route, span_name }
}

/// Replace identifiers in `path` with placeholders, keeping metric label cardinality bounded.
fn route_template(path: &str) -> String {
    let mut previous: Option<&str> = None;

    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            let template = if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else if previous.is_some_and(|route| SLUG_ROUTES.contains(&route)) {
                "{slug}"
            } else {
                segment
            };

            previous = Some(segment);

            template
        })
        .collect();

    format!("/{}", segments.join("/"))
}
