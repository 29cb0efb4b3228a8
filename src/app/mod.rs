// Fixture applications served through the Rack handler.

pub mod cookie_app;
pub mod extended_app;
pub mod routes;

use crate::core::context::GlobalContext;
use crate::domain::ports::RackApplication;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use cookie_app::CookieApp;
pub use extended_app::ExtendedApp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum AppKind {
    Cookies,
    #[default]
    Extended,
}

impl AppKind {
    pub fn build(self, context: &GlobalContext) -> Arc<dyn RackApplication> {
        match self {
            AppKind::Cookies => Arc::new(CookieApp::new()),
            AppKind::Extended => Arc::new(ExtendedApp::new(context.clone())),
        }
    }
}

impl std::fmt::Display for AppKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppKind::Cookies => f.write_str("cookies"),
            AppKind::Extended => f.write_str("extended"),
        }
    }
}
