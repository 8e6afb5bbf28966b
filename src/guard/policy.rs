//! Navigation policy
//!
//! [`decide`] is a pure function of the current identity and the requested
//! path. It keeps no history; every navigation is evaluated from scratch.

use crate::auth::{Identity, Role};
use crate::guard::table::{lookup, Access, RouteDef};
use std::fmt;

/// Where a blocked navigation is sent instead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Login,
    Root,
    Home(Role),
}

impl Redirect {
    pub fn path(&self) -> &'static str {
        match self {
            Redirect::Login => "/login",
            Redirect::Root => "/",
            Redirect::Home(role) => role.home_path(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Render the requested page
    Allow(&'static RouteDef),
    Redirect(Redirect),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow(_))
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Allow(route) => write!(f, "allow {}", route.path),
            Decision::Redirect(target) => write!(f, "redirect -> {}", target.path()),
        }
    }
}

/// Decide what happens when `identity` navigates to `path`
pub fn decide(identity: Option<&Identity>, path: &str) -> Decision {
    let Some(route) = lookup(path) else {
        return Decision::Redirect(Redirect::Root);
    };

    match (route.access, identity) {
        (Access::Root, Some(identity)) => Decision::Redirect(Redirect::Home(identity.role)),
        (Access::Root, None) => Decision::Redirect(Redirect::Login),

        (Access::Guest, Some(identity)) => Decision::Redirect(Redirect::Home(identity.role)),
        (Access::Guest, None) => Decision::Allow(route),

        (Access::Protected(_), None) => Decision::Redirect(Redirect::Login),
        (Access::Protected(None), Some(_)) => Decision::Allow(route),
        (Access::Protected(Some(required)), Some(identity)) => {
            if identity.role == required {
                Decision::Allow(route)
            } else {
                Decision::Redirect(Redirect::Home(identity.role))
            }
        }
    }
}
