use crate::app::cookie_app::set_multiple_cookies;
use crate::app::routes::RouteTable;
use crate::core::context::GlobalContext;
use crate::core::wait_for_it::WaitForIt;
use crate::domain::model::{RackEnvironment, RackResponse};
use crate::domain::ports::RackApplication;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub const LEGEN_DELAY: Duration = Duration::from_secs(2);
pub const LEGEN_PAYLOAD: &str = "dary!";

/// 全域環境探測、設定 cookie 與慢速本文三條路由
pub struct ExtendedApp {
    context: GlobalContext,
    routes: RouteTable<ExtendedApp>,
}

impl ExtendedApp {
    pub fn new(context: GlobalContext) -> Self {
        Self {
            context,
            routes: RouteTable::<ExtendedApp>::new()
                .get("/global_vars", global_vars)
                .get("/set-multiple-cookies", |_, _| Ok(set_multiple_cookies()))
                .get("/legen-wait-for-it", legen_wait_for_it),
        }
    }

    pub fn context(&self) -> &GlobalContext {
        &self.context
    }
}

#[async_trait]
impl RackApplication for ExtendedApp {
    async fn call(&self, environment: RackEnvironment) -> Result<RackResponse> {
        self.routes.dispatch(self, &environment)
    }
}

fn global_vars(app: &ExtendedApp, _environment: &RackEnvironment) -> Result<RackResponse> {
    if app.context.is_registered() {
        Ok(RackResponse::new(200))
    } else {
        Ok(RackResponse::new(404))
    }
}

fn legen_wait_for_it(_app: &ExtendedApp, _environment: &RackEnvironment) -> Result<RackResponse> {
    Ok(RackResponse::new(200).with_body(WaitForIt::new(LEGEN_PAYLOAD, LEGEN_DELAY)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::body::RackBody;
    use crate::core::cookies::SET_COOKIE;
    use crate::core::environment::{MountPoint, RackEnvironmentBuilder};
    use crate::core::rack_io::RackInput;
    use axum::http::Request;
    use tokio::time::Instant;

    fn env(uri: &str) -> RackEnvironment {
        let (parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        RackEnvironmentBuilder::new()
            .build(&parts, &MountPoint::root(), RackInput::default())
            .unwrap()
    }

    #[tokio::test]
    async fn test_global_vars_follows_injected_context() {
        let context = GlobalContext::new();
        let app = ExtendedApp::new(context.clone());

        let response = app.call(env("/global_vars")).await.unwrap();
        assert_eq!(response.status, 404);
        assert!(response.body.collect().await.unwrap().is_empty());

        context.register();
        let response = app.call(env("/global_vars")).await.unwrap();
        assert_eq!(response.status, 200);
        assert!(response.body.collect().await.unwrap().is_empty());

        context.clear();
        let response = app.call(env("/global_vars")).await.unwrap();
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn test_sets_multiple_cookies() {
        let app = ExtendedApp::new(GlobalContext::new());
        let response = app.call(env("/set-multiple-cookies")).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(
            response.headers.get(SET_COOKIE).map(String::as_str),
            Some("foo=bar\nbar=foo")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_legen_wait_for_it_is_lazy_and_slow() {
        let app = ExtendedApp::new(GlobalContext::new());

        let start = Instant::now();
        let response = app.call(env("/legen-wait-for-it")).await.unwrap();
        // 回應本身立即返回，延遲發生在讀取本文時
        assert!(start.elapsed() < LEGEN_DELAY);
        assert_eq!(response.status, 200);
        assert!(matches!(response.body, RackBody::Stream(_)));

        let body = response.body.collect().await.unwrap();
        assert!(start.elapsed() >= LEGEN_DELAY);
        assert_eq!(&body[..], LEGEN_PAYLOAD.as_bytes());
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = ExtendedApp::new(GlobalContext::registered());
        let response = app.call(env("/nope")).await.unwrap();
        assert_eq!(response.status, 404);
    }
}
