use crate::app::routes::RouteTable;
use crate::core::cookies::set_cookie;
use crate::domain::model::{RackEnvironment, RackResponse};
use crate::domain::ports::RackApplication;
use crate::utils::error::Result;
use async_trait::async_trait;

pub struct CookieApp {
    routes: RouteTable<CookieApp>,
}

impl CookieApp {
    pub fn new() -> Self {
        Self {
            routes: RouteTable::<CookieApp>::new()
                .get("/set-multiple-cookies", |_, _| Ok(set_multiple_cookies())),
        }
    }
}

impl Default for CookieApp {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RackApplication for CookieApp {
    async fn call(&self, environment: RackEnvironment) -> Result<RackResponse> {
        self.routes.dispatch(self, &environment)
    }
}

/// `foo=bar` 與 `bar=foo`，狀態 200、空本文
pub fn set_multiple_cookies() -> RackResponse {
    let mut response = RackResponse::new(200);
    set_cookie(&mut response.headers, "foo", "bar");
    set_cookie(&mut response.headers, "bar", "foo");
    response
}
