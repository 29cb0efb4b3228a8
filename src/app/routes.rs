use crate::domain::model::{RackEnvironment, RackResponse};
use crate::utils::error::Result;

pub type RouteHandler<S> = fn(&S, &RackEnvironment) -> Result<RackResponse>;

struct Route<S> {
    method: &'static str,
    path: &'static str,
    handler: RouteHandler<S>,
}

/// 建立後唯讀的 (method, path) -> handler 對照表
pub struct RouteTable<S> {
    routes: Vec<Route<S>>,
}

impl<S> RouteTable<S> {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn get(mut self, path: &'static str, handler: RouteHandler<S>) -> Self {
        self.routes.push(Route {
            method: "GET",
            path,
            handler,
        });
        self
    }

    pub fn dispatch(&self, state: &S, environment: &RackEnvironment) -> Result<RackResponse> {
        // HEAD 與 GET 共用路由
        let method = match environment.request_method.as_str() {
            "HEAD" => "GET",
            other => other,
        };

        match self
            .routes
            .iter()
            .find(|route| route.method == method && route.path == environment.path_info)
        {
            Some(route) => (route.handler)(state, environment),
            None => {
                tracing::debug!(
                    "No route for {} {}",
                    environment.request_method,
                    environment.path_info
                );
                Ok(not_found())
            }
        }
    }
}

impl<S> Default for RouteTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

pub fn not_found() -> RackResponse {
    RackResponse::new(404)
        .with_header("Content-Type", "text/plain")
        .with_body("Not Found")
}
