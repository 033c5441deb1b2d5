use actix_web::HttpResponse;

/// Liveness probe. It never touches the intake service, so it stays green while upstream is down.
#[tracing::instrument(name = "Health check handler")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}
