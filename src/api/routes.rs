//! Route definitions for the API.

use axum::{
    middleware,
    routing::{delete, get},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers;
use crate::auth::{require_api_key_policy, ApiKeyGate, API_KEY_HEADER};
use crate::AppState;

/// Security scheme modifier for OpenAPI.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
            );
        }
    }
}

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::issue_key,
        handlers::list_keys,
        handlers::revoke_key,
        handlers::public_data,
        handlers::secure_data,
        handlers::health_check,
    ),
    components(schemas(
        crate::api::types::IssueKeyRequest,
        crate::api::types::IssueKeyResponse,
        crate::api::types::ListKeysResponse,
        crate::api::types::PublicDataResponse,
        crate::api::types::SecureDataResponse,
        crate::api::types::HealthResponse,
        crate::domain::CredentialRecord,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "keys", description = "API key administration"),
        (name = "demo", description = "Public and API key protected sample endpoints"),
        (name = "health", description = "Health and status endpoints")
    ),
    info(
        title = "Keygate API",
        version = "0.1.0",
        description = "Issues API keys, stores their salted hashes and authorizes requests presenting them",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Build the API router.
///
/// Key administration routes are only mounted when `admin_enabled` is set.
pub fn build_router(state: AppState, gate: ApiKeyGate, admin_enabled: bool) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Routes requiring a valid API key
    let protected_routes = Router::new()
        .route("/api/demo/secure", get(handlers::secure_data))
        .layer(middleware::from_fn_with_state(gate, require_api_key_policy));

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/api/demo/public", get(handlers::public_data))
        .route("/v1/health", get(handlers::health_check))
        .with_state(state.clone());

    let mut router = Router::new().merge(protected_routes).merge(public_routes);

    if admin_enabled {
        let admin_routes = Router::new()
            .route(
                "/v1/keys",
                get(handlers::list_keys).post(handlers::issue_key),
            )
            .route("/v1/keys/:name", delete(handlers::revoke_key))
            .with_state(state);
        router = router.merge(admin_routes);
    } else {
        tracing::info!("Key administration endpoints disabled");
    }

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
