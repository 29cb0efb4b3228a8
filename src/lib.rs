pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::{AppKind, CookieApp, ExtendedApp};
pub use config::ServerConfig;
pub use crate::core::{
    body::RackBody, closable_sequence::ClosableSequence, context::GlobalContext,
    handler::RackHandler, rack_io::{RackErrors, RackInput, RackLogger}, wait_for_it::WaitForIt,
};
pub use server::ExampleServer;
pub use utils::error::{RackError, Result};
