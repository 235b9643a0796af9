use axum::{response::Json as JsonResponse, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{
  cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
  trace::TraceLayer,
};

use crate::{
  config::{AllowedOrigins, CorsConfig},
  domains::user::rest::user_routes,
  state::SharedAppState,
};

pub fn create_app(state: SharedAppState, cors: &CorsConfig) -> Router {
  Router::new()
    .route("/health", get(health_handler))
    .merge(user_routes())
    .layer(cors_layer(cors))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

pub async fn health_handler() -> JsonResponse<Value> {
  JsonResponse(json!({ "status": "ok" }))
}

/// Wildcards are expressed by mirroring the request, since browsers refuse
/// a literal `*` once credentials are allowed.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
  let origin = match &config.allowed_origins {
    AllowedOrigins::Any => {
      tracing::warn!("CORS: every origin is allowed; restrict CORS_ALLOWED_ORIGINS outside development");
      AllowOrigin::mirror_request()
    }
    AllowedOrigins::List(origins) => AllowOrigin::list(origins.clone()),
  };

  CorsLayer::new()
    .allow_origin(origin)
    .allow_methods(AllowMethods::mirror_request())
    .allow_headers(AllowHeaders::mirror_request())
    .allow_credentials(config.allow_credentials)
}
