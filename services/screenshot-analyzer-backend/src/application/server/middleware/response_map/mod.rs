use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::application::server::routes::ErrorBody;

/// In debug mode, adds the full error chain to failure bodies, as a `detail` field.
pub async fn error_detail(State(debug): State<bool>, resp: Response) -> Response {
    if !debug {
        return resp;
    }

    let Some(ErrorBody { mut body, detail }) = resp.extensions().get::<ErrorBody>().cloned()
    else {
        return resp;
    };

    if let Value::Object(fields) = &mut body {
        fields.insert("detail".to_string(), Value::String(detail));
    }

    (resp.status(), Json(body)).into_response()
}
