//! Authentication and authorization
//!
//! - [`JwtService`] - token validation (identity comes from the external
//!   identity provider)
//! - [`CurrentUser`] / [`Role`] - actor context for authorization checks
//! - middleware - `authenticate`, `require_auth`, `require_admin`

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService, Role};
pub use middleware::{authenticate, require_admin, require_auth};
