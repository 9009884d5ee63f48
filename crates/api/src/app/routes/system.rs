/// Liveness probe. Plain text, no store access.
pub async fn health() -> &'static str {
    "OK"
}
