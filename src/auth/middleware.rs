//! Session-checking middleware.
//!
//! Every protected route runs through [`require_session`], which resolves
//! the cookie to a [`Session`] and attaches an [`Identity`] to the request
//! extensions. Handlers read the identity back and enforce their own role
//! requirement with [`Identity::require`]; there is no ambient session
//! state.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::Role;
use crate::error::PanelError;
use crate::http::server::AppState;

/// The authenticated identity attached to each request.
#[derive(Debug, Clone)]
pub struct Identity {
    pub username: String,
    pub role: Role,
}

impl Identity {
    /// Enforce a minimum role.
    pub fn require(&self, required: Role) -> Result<(), PanelError> {
        if self.role.allows(required) {
            Ok(())
        } else {
            Err(PanelError::Forbidden)
        }
    }
}

/// Reject unauthenticated requests with a redirect to the login page;
/// otherwise attach the identity and continue.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let session = state
        .sessions
        .token_from_headers(request.headers())
        .and_then(|token| state.sessions.get(&token));

    match session {
        Some(session) => {
            request.extensions_mut().insert(Identity {
                username: session.username,
                role: session.role,
            });
            next.run(request).await
        }
        None => Redirect::to("/login").into_response(),
    }
}
