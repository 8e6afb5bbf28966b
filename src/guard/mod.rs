//! Route protection

pub mod policy;
pub mod table;

pub use policy::{decide, Decision, Redirect};
pub use table::{lookup, route_for, Access, Page, RouteDef, ROUTES};
