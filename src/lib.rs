//! VivaCore - patient and researcher portal
//!
//! This is the library interface for VivaCore: the session store, the route
//! guard, and the web server that puts them in front of the portal pages.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod guard;
pub mod ui;

pub use auth::{Identity, Role, SessionStore};
pub use config::Config;
pub use error::Error;
