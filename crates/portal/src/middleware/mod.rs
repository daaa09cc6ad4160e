//! HTTP middleware stack for the portal.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, outermost)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (strict CSP)
//! 5. Session layer (tower-sessions, in-process store)
//!
//! Auth is not a layer: the extractors in [`auth`] resolve the session and
//! evaluate the guard per handler.

pub mod auth;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{
    OptionalUser, RequireCustomer, RequireGuest, RequireManager, RequireStaff, RequireSuperAdmin,
    RequireTechnician, RequireUser,
};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
