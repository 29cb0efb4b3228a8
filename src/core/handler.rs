use crate::core::context::GlobalContext;
use crate::core::environment::{MountPoint, RackEnvironmentBuilder};
use crate::core::propagator::RackResponsePropagator;
use crate::core::rack_io::RackInput;
use crate::domain::ports::RackApplication;
use crate::utils::error::Result;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::sync::Arc;

/// 讀入 `rack.input` 的請求本文上限
pub const MAX_INPUT_BYTES: usize = 16 * 1024 * 1024;

/// 承載一個 RackApplication：HTTP 請求 -> Rack 環境 -> 應用程式 -> HTTP 回應
pub struct RackHandler {
    builder: RackEnvironmentBuilder,
    application: Arc<dyn RackApplication>,
    propagator: RackResponsePropagator,
    mount: MountPoint,
}

impl RackHandler {
    pub fn new(application: Arc<dyn RackApplication>) -> Self {
        Self::with_collaborators(
            RackEnvironmentBuilder::new(),
            application,
            RackResponsePropagator::new(),
        )
    }

    pub fn with_collaborators(
        builder: RackEnvironmentBuilder,
        application: Arc<dyn RackApplication>,
        propagator: RackResponsePropagator,
    ) -> Self {
        Self {
            builder,
            application,
            propagator,
            mount: MountPoint::root(),
        }
    }

    pub fn mounted_at(mut self, pattern: &str) -> Result<Self> {
        self.mount = MountPoint::parse(pattern)?;
        Ok(self)
    }

    pub fn mount(&self) -> &MountPoint {
        &self.mount
    }

    /// 宿主啟動時註冊全域環境
    pub fn init(&self, context: &GlobalContext) {
        context.register();
        tracing::debug!("Registered global context for mount '{}/*'", self.mount.prefix());
    }

    pub async fn service(&self, request: Request) -> Response {
        let (parts, body) = request.into_parts();

        let input = match axum::body::to_bytes(body, MAX_INPUT_BYTES).await {
            Ok(bytes) => RackInput::new(bytes),
            Err(e) => {
                tracing::warn!("⚠️ Could not read body of {} {}: {}", parts.method, parts.uri, e);
                return (StatusCode::BAD_REQUEST, "Bad Request").into_response();
            }
        };

        let Some(environment) = self.builder.build(&parts, &self.mount, input) else {
            tracing::debug!("{} {} is outside the mount point", parts.method, parts.uri);
            return StatusCode::NOT_FOUND.into_response();
        };

        tracing::debug!(
            "{} {}{}",
            environment.request_method,
            environment.script_name,
            environment.path_info
        );

        let result = self
            .application
            .call(environment)
            .await
            .and_then(|rack_response| self.propagator.propagate(rack_response));

        match result {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("❌ Request {} {} failed: {}", parts.method, parts.uri, e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }

    pub fn into_router(self) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(Arc::new(self))
    }
}

async fn dispatch(State(handler): State<Arc<RackHandler>>, request: Request) -> Response {
    handler.service(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{RackEnvironment, RackResponse};
    use crate::utils::error::RackError;
    use axum::body::Body;
    use async_trait::async_trait;

    struct EchoApp;

    #[async_trait]
    impl RackApplication for EchoApp {
        async fn call(&self, mut environment: RackEnvironment) -> Result<RackResponse> {
            if environment.path_info == "/echo" {
                let first_line = environment.input.gets().unwrap_or_default();
                environment.input.rewind();
                let whole = environment.input.read(None).unwrap_or_default();
                return Ok(RackResponse::new(200).with_body(format!(
                    "{}|{}",
                    String::from_utf8_lossy(&first_line).trim_end(),
                    whole.len()
                )));
            }
            if environment.path_info == "/boom" {
                return Err(RackError::ApplicationError {
                    message: "boom".to_string(),
                });
            }
            Ok(RackResponse::new(200).with_body(format!(
                "{}|{}",
                environment.script_name, environment.path_info
            )))
        }
    }

    fn get(uri: &str) -> Request {
        axum::http::Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_service_calls_application() {
        let handler = RackHandler::new(Arc::new(EchoApp));
        let response = handler.service(get("/hello")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "|/hello");
    }

    #[tokio::test]
    async fn test_mounted_handler_splits_script_name() {
        let handler = RackHandler::new(Arc::new(EchoApp))
            .mounted_at("/app/*")
            .unwrap();

        let response = handler.service(get("/app/hello")).await;
        assert_eq!(body_text(response).await, "/app|/hello");

        let outside = handler.service(get("/elsewhere")).await;
        assert_eq!(outside.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_request_body_becomes_rack_input() {
        let handler = RackHandler::new(Arc::new(EchoApp));
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/echo")
            .body(Body::from("first line\nsecond line\n"))
            .unwrap();

        let response = handler.service(request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "first line|23");
    }

    #[tokio::test]
    async fn test_application_errors_become_500() {
        let handler = RackHandler::new(Arc::new(EchoApp));
        let response = handler.service(get("/boom")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_init_registers_context() {
        let context = GlobalContext::new();
        RackHandler::new(Arc::new(EchoApp)).init(&context);
        assert!(context.is_registered());
    }
}
