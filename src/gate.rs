//! Request-time route guard.
//!
//! A presence check on the auth cookie gates every path under
//! `/dashboard`; an authenticated visitor on a public path is bounced to
//! the dashboard root. No signature or expiry validation happens here —
//! the cookie's mere presence is the whole check.

/// Name of the cookie whose presence marks an authenticated session.
pub const AUTH_COOKIE: &str = "user";

/// Paths reachable without authentication.
pub const PUBLIC_PATHS: [&str; 2] = ["/", "/login"];

const DASHBOARD_PREFIX: &str = "/dashboard";
const LOGIN_PATH: &str = "/login";

/// Outcome of the guard for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAction {
    /// Let the request through.
    Continue,
    /// Redirect to the login page.
    RedirectToLogin,
    /// Redirect to the dashboard root.
    RedirectToDashboard,
}

/// Decide what to do with a request for `path` given whether the auth
/// cookie is present.
pub fn route(path: &str, authenticated: bool) -> RouteAction {
    if path.starts_with(DASHBOARD_PREFIX) && !authenticated {
        return RouteAction::RedirectToLogin;
    }
    if authenticated && PUBLIC_PATHS.contains(&path) {
        return RouteAction::RedirectToDashboard;
    }
    RouteAction::Continue
}

/// The login path the guard redirects to.
pub fn login_path() -> &'static str {
    LOGIN_PATH
}

/// The dashboard root the guard redirects to.
pub fn dashboard_path() -> &'static str {
    DASHBOARD_PREFIX
}

// ============================================================================
// Tests
// ============================================================================
