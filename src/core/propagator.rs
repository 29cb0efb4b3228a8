use crate::domain::model::RackResponse;
use crate::utils::error::{RackError, Result};
use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::Response;

const RACK_INTERNAL_HEADER_PREFIX: &str = "rack.";

/// 將 RackResponse 寫成 HTTP 回應
#[derive(Debug, Clone, Default)]
pub struct RackResponsePropagator;

impl RackResponsePropagator {
    pub fn new() -> Self {
        Self
    }

    pub fn propagate(&self, rack_response: RackResponse) -> Result<Response> {
        let RackResponse {
            status,
            headers,
            body,
        } = rack_response;

        // 先把本文交給回應；之後的錯誤會丟棄回應，連帶關閉可關閉的本文
        let mut response = Response::new(Body::from_stream(body.into_stream()));
        *response.status_mut() =
            StatusCode::from_u16(status).map_err(|e| RackError::ResponseError {
                message: format!("Invalid status {}: {}", status, e),
            })?;

        let target = response.headers_mut();
        for (name, value) in headers
            .iter()
            .filter(|(name, _)| should_propagate_header_to_client(name))
        {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| RackError::ResponseError {
                    message: format!("Invalid header name '{}': {}", name, e),
                })?;

            // Rack 以換行表示同名的多個標頭
            for line in value.split('\n') {
                let header_value =
                    HeaderValue::from_str(line).map_err(|e| RackError::ResponseError {
                        message: format!("Invalid value for header '{}': {}", name, e),
                    })?;
                target.append(header_name.clone(), header_value);
            }
        }

        Ok(response)
    }
}

fn should_propagate_header_to_client(name: &str) -> bool {
    !name.starts_with(RACK_INTERNAL_HEADER_PREFIX)
}
