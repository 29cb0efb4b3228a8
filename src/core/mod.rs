pub mod body;
pub mod closable_sequence;
pub mod context;
pub mod cookies;
pub mod environment;
pub mod handler;
pub mod propagator;
pub mod rack_io;
pub mod wait_for_it;

pub use crate::domain::model::{RackEnvironment, RackResponse};
pub use crate::domain::ports::{Closable, Enumerable, RackApplication};
pub use crate::utils::error::Result;
