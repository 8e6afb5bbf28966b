//! Route guard middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::api::server::SharedState;
use crate::guard::{decide, Decision, RouteDef};

/// The route a request was admitted to, inserted by [`route_guard`]
#[derive(Debug, Clone, Copy)]
pub struct GuardedRoute(pub &'static RouteDef);

/// Middleware run in front of every page.
///
/// Admitted requests carry a [`GuardedRoute`] and, when signed in, the
/// current [`Identity`](crate::auth::Identity) as request extensions.
pub async fn route_guard(State(state): State<SharedState>, mut req: Request, next: Next) -> Response {
    let (decision, identity) = {
        let state = state.read().await;
        let identity = state.session.current_identity().cloned();
        (decide(identity.as_ref(), req.uri().path()), identity)
    };

    tracing::debug!(path = %req.uri().path(), %decision, "Route guard");

    match decision {
        Decision::Allow(route) => {
            req.extensions_mut().insert(GuardedRoute(route));
            if let Some(identity) = identity {
                req.extensions_mut().insert(identity);
            }
            next.run(req).await
        }
        Decision::Redirect(target) => Redirect::to(target.path()).into_response(),
    }
}
