use std::path::Path;

use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{any, delete, get, post, put};
use barberdesk_core::AppError;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::state::AppState;
use crate::{auth, handlers, middleware};

pub fn build_router<S>(
    app_state: AppState,
    dashboard_dist_dir: &Path,
    session_layer: SessionManagerLayer<S>,
) -> Result<Router, AppError>
where
    S: SessionStore + Clone,
{
    let local_user_routes = Router::new()
        .route(
            "/api/navigation",
            get(handlers::navigation::navigation_handler),
        )
        .route(
            "/api/security/users",
            get(handlers::security::list_users_handler),
        )
        .route(
            "/api/security/users/{user_id}/active",
            put(handlers::security::set_user_active_handler),
        )
        .route(
            "/api/security/groups",
            get(handlers::security::list_groups_handler)
                .post(handlers::security::create_group_handler),
        )
        .route(
            "/api/security/groups/{group_id}/active",
            put(handlers::security::set_group_active_handler),
        )
        .route(
            "/api/security/groups/{group_id}/members",
            get(handlers::security::list_group_members_handler)
                .post(handlers::security::add_group_member_handler),
        )
        .route(
            "/api/security/groups/{group_id}/members/{user_id}",
            delete(handlers::security::remove_group_member_handler),
        )
        .route(
            "/api/security/menus",
            get(handlers::security::list_menus_handler)
                .post(handlers::security::create_menu_handler),
        )
        .route(
            "/api/security/menus/{menu_id}/active",
            put(handlers::security::set_menu_active_handler),
        )
        .route(
            "/api/security/menus/{menu_id}/grants",
            get(handlers::security::list_menu_grants_handler),
        )
        .route(
            "/api/security/menus/{menu_id}/grants/{group_id}",
            put(handlers::security::save_menu_grant_handler),
        )
        .route("/auth/bootstrap", post(auth::bootstrap_handler))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_local_user,
        ));

    let authenticated_routes = Router::new()
        .route("/auth/me", get(auth::me_handler))
        .route_layer(from_fn(middleware::require_auth));

    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(&app_state.frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let dashboard_bundle = ServeDir::new(dashboard_dist_dir)
        .fallback(ServeFile::new(dashboard_dist_dir.join("index.html")));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route(
            "/api/permissions",
            get(handlers::permissions::permissions_handler),
        )
        .route("/auth/session", post(auth::session_exchange_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .merge(local_user_routes)
        .merge(authenticated_routes)
        .route(
            "/api/{*path}",
            any(handlers::not_found::api_not_found_handler),
        )
        .route(
            "/auth/{*path}",
            any(handlers::not_found::api_not_found_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .fallback_service(dashboard_bundle)
        .layer(from_fn_with_state(
            app_state.clone(),
            middleware::guard_dashboard,
        ))
        .layer(from_fn_with_state(
            app_state.clone(),
            middleware::resolve_identity,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(session_layer)
        .with_state(app_state))
}
