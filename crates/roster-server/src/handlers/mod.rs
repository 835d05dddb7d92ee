pub mod collaborators;
pub mod views;

/// Liveness probe. Never touches upstream and needs no credentials.
pub async fn healthz() -> &'static str { "ok" }
