//! Server-rendered portal pages

mod handlers;
pub mod layout;

pub use handlers::*;
