use axum::{extract::Request, http::Method};
use tracing::debug;

const METHOD_PARAM: &str = "_method";

/// Lets HTML forms reach PUT and DELETE routes.
///
/// A `POST` carrying `_method=PUT` or `_method=DELETE` in its query string
/// is dispatched as that method. Runs before routing.
pub(crate) fn rewrite(mut req: Request) -> Request {
    if req.method() != Method::POST {
        return req;
    }

    let Some(query) = req.uri().query() else {
        return req;
    };

    let method = url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == METHOD_PARAM)
        .and_then(|(_, value)| override_method(&value));

    if let Some(method) = method {
        debug!(task = "method override", method = %method, uri = %req.uri());
        *req.method_mut() = method;
    }

    req
}

fn override_method(value: &str) -> Option<Method> {
    match value.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use axum::body::Body;

    use super::*;

    fn request(method: Method, uri: &str) -> Request {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_rewrites_post_with_method_param() {
        let req = rewrite(request(Method::POST, "/posts/1?_method=DELETE"));
        assert_eq!(req.method(), Method::DELETE);

        let req = rewrite(request(Method::POST, "/posts/1?x=1&_method=put"));
        assert_eq!(req.method(), Method::PUT);
    }

    #[test]
    fn test_leaves_other_requests_alone() {
        let req = rewrite(request(Method::GET, "/posts/1?_method=DELETE"));
        assert_eq!(req.method(), Method::GET);

        let req = rewrite(request(Method::POST, "/posts"));
        assert_eq!(req.method(), Method::POST);

        let req = rewrite(request(Method::POST, "/posts/1?_method=TRACE"));
        assert_eq!(req.method(), Method::POST);
    }
}
