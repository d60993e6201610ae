//! Route handlers.

pub mod emotion;
pub mod page;

/// GET /health - Liveness check.
pub async fn health() -> &'static str {
    "ok"
}
