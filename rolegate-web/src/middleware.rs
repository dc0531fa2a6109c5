//! Role and permission guards with redirect-on-deny
//!
//! Denials for authenticated users answer `303 See Other` towards the
//! redirect route the resolver picked, plus a `flash_error` cookie carrying
//! the denial message for the next page render. Anonymous requests get a
//! bare `403`; there is no sensible place to send them.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use rolegate_rbac::{AccessDecision, AuthorizationResolver, Principal, RbacError, DENIAL_MESSAGE};

/// Authenticated principal inserted by the host's auth middleware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub Principal);

/// State for [`require_any_role`]: pass when the user holds any listed role
#[derive(Clone)]
pub struct RoleGuard {
    resolver: Arc<AuthorizationResolver>,
    required: Arc<Vec<String>>,
}

impl RoleGuard {
    pub fn new(resolver: Arc<AuthorizationResolver>, required: Vec<String>) -> Self {
        Self {
            resolver,
            required: Arc::new(required),
        }
    }
}

/// State for [`require_any_permission`]: pass when the user's effective
/// permission set intersects the listed names
#[derive(Clone)]
pub struct PermissionGuard {
    resolver: Arc<AuthorizationResolver>,
    required: Arc<Vec<String>>,
}

impl PermissionGuard {
    pub fn new(resolver: Arc<AuthorizationResolver>, required: Vec<String>) -> Self {
        Self {
            resolver,
            required: Arc::new(required),
        }
    }
}

/// Middleware for `axum::middleware::from_fn_with_state` guarding on roles
pub async fn require_any_role(State(guard): State<RoleGuard>, request: Request<Body>, next: Next) -> Response {
    let principal = current_principal(&request);
    let decision = guard
        .resolver
        .has_any_role(principal.as_ref(), &guard.required)
        .await;
    respond(decision, request, next).await
}

/// Middleware for `axum::middleware::from_fn_with_state` guarding on
/// effective permissions
pub async fn require_any_permission(
    State(guard): State<PermissionGuard>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let principal = current_principal(&request);
    let decision = guard
        .resolver
        .has_any_permission(principal.as_ref(), &guard.required)
        .await;
    respond(decision, request, next).await
}

fn current_principal(request: &Request<Body>) -> Option<Principal> {
    request.extensions().get::<CurrentUser>().map(|user| user.0)
}

async fn respond(decision: Result<AccessDecision, RbacError>, request: Request<Body>, next: Next) -> Response {
    match decision {
        Ok(AccessDecision::Granted) => next.run(request).await,
        Ok(AccessDecision::DeniedAnonymous) => StatusCode::FORBIDDEN.into_response(),
        Ok(AccessDecision::Denied { redirect }) => deny_redirect(&redirect),
        Err(error) => {
            tracing::error!(%error, "authorization check failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn deny_redirect(route: &str) -> Response {
    let cookie = format!("flash_error={}; Path=/", encode_cookie_value(DENIAL_MESSAGE));
    (
        StatusCode::SEE_OTHER,
        [
            (header::LOCATION, route.to_string()),
            (header::SET_COOKIE, cookie),
        ],
    )
        .into_response()
}

// Percent-encodes everything outside the cookie-safe unreserved set.
fn encode_cookie_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    encoded
}
