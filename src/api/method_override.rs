use axum::{
    extract::{Query, Request},
    http::{Method, Uri},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;

/// The `_method` query parameter of an HTML form post
#[derive(Debug, Deserialize)]
struct MethodOverrideQuery {
    #[serde(rename = "_method")]
    method: Option<String>,
}

/// Rewrite `POST ...?_method=PUT|PATCH|DELETE` to that verb.
///
/// Must wrap the router from the outside: the method is changed before any
/// route is matched.
pub async fn method_override(mut request: Request, next: Next) -> Response {
    if request.method() == Method::POST {
        if let Some(method) = override_method(request.uri()) {
            log::debug!("Overriding POST {} as {}", request.uri().path(), method);
            *request.method_mut() = method;
        }
    }
    next.run(request).await
}

fn override_method(uri: &Uri) -> Option<Method> {
    let Query(query) = Query::<MethodOverrideQuery>::try_from_uri(uri).ok()?;

    match query.method?.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}
