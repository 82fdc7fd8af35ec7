use axum::extract::{Extension, Request, State};
use axum::http::{HeaderMap, HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use barberdesk_core::{AppError, ExternalIdentity};
use barberdesk_domain::{GuardView, IdentityResolution, RouteGuard};
use chrono::Utc;
use tower_sessions::Session;

use crate::auth::{
    SESSION_ABSOLUTE_LIFETIME_SECONDS, SESSION_CREATED_AT_KEY, SESSION_IDENTITY_KEY,
};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Path prefix of the protected dashboard screens.
pub const DASHBOARD_PREFIX: &str = "/dashboard";

/// Identity resolved for the current request, if any.
#[derive(Debug, Clone)]
pub struct CallerIdentity(pub Option<ExternalIdentity>);

/// Resolves the caller identity for the request.
///
/// An `Authorization: Bearer` header alone decides when present, even if a
/// session cookie names someone else. Otherwise the server session is used.
pub async fn resolve_identity(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Response {
    let token = bearer_token(request.headers()).map(ToOwned::to_owned);
    let identity = match token {
        Some(token) => bearer_identity(&state, &token).await,
        None => session_identity(&session, Utc::now().timestamp()).await,
    };

    request.extensions_mut().insert(CallerIdentity(identity));
    next.run(request).await
}

async fn bearer_identity(state: &AppState, token: &str) -> Option<ExternalIdentity> {
    match state.identity_provider.verify_session_token(token).await {
        Ok(identity) => identity,
        Err(error) => {
            tracing::warn!(error = %error, "identity provider failed to verify token");
            None
        }
    }
}

/// Reads the session identity, flushing sessions past their absolute lifetime.
async fn session_identity(session: &Session, now: i64) -> Option<ExternalIdentity> {
    let identity = match session.get::<ExternalIdentity>(SESSION_IDENTITY_KEY).await {
        Ok(identity) => identity?,
        Err(error) => {
            tracing::warn!(error = %error, "failed to read session identity");
            return None;
        }
    };

    let created_at = session
        .get::<i64>(SESSION_CREATED_AT_KEY)
        .await
        .ok()
        .flatten();
    if created_at.is_some_and(|created_at| session_is_within_lifetime(created_at, now)) {
        return Some(identity);
    }

    tracing::info!(subject = identity.subject(), "session exceeded absolute lifetime");
    if let Err(error) = session.flush().await {
        tracing::warn!(error = %error, "failed to flush expired session");
    }
    None
}

fn session_is_within_lifetime(created_at: i64, now: i64) -> bool {
    now.saturating_sub(created_at) < SESSION_ABSOLUTE_LIFETIME_SECONDS
}

/// Extracts the token of an `Authorization: Bearer` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub async fn require_auth(
    Extension(caller): Extension<CallerIdentity>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = caller.0.ok_or_else(ApiError::unauthorized)?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Requires a caller mirrored into the local user directory.
pub async fn require_local_user(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = caller.0.ok_or_else(ApiError::unauthorized)?;
    let user = state
        .directory_sync_service
        .sync_user(&identity)
        .await?
        .ok_or_else(ApiError::user_not_found)?;

    request.extensions_mut().insert(identity);
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Gates the dashboard bundle on a signed-in caller.
pub async fn guard_dashboard(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    request: Request,
    next: Next,
) -> Response {
    if !is_dashboard_path(request.uri().path()) {
        return next.run(request).await;
    }

    let mut guard = RouteGuard::new(state.sign_in_path.clone());
    guard.resolve(IdentityResolution::from_presence(caller.0.is_some()));

    match guard.view() {
        GuardView::Children => next.run(request).await,
        GuardView::Redirect(sign_in_path) => Redirect::to(sign_in_path).into_response(),
        GuardView::Placeholder => ApiError::internal(AppError::Internal(
            "route guard did not resolve".to_owned(),
        ))
        .into_response(),
    }
}

fn is_dashboard_path(path: &str) -> bool {
    path == DASHBOARD_PREFIX
        || path
            .strip_prefix(DASHBOARD_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
}

pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method()) {
        let headers = request.headers();

        if let Some(fetch_site) = headers.get("sec-fetch-site")
            && fetch_site == HeaderValue::from_static("cross-site")
        {
            return Err(AppError::Unauthorized("cross-site request blocked".to_owned()).into());
        }

        let origin = headers
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        let referer = headers
            .get(header::REFERER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        let allowed_origin = state.frontend_url.as_str();
        let origin_is_allowed = origin == allowed_origin;
        let referer_is_allowed = referer.starts_with(allowed_origin);

        if !origin_is_allowed && !referer_is_allowed {
            return Err(AppError::Unauthorized("origin validation failed".to_owned()).into());
        }
    }

    Ok(next.run(request).await)
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{HeaderMap, HeaderValue, header};
    use barberdesk_core::ExternalIdentity;
    use tower_sessions::{MemoryStore, Session};

    use crate::auth::{
        SESSION_ABSOLUTE_LIFETIME_SECONDS, SESSION_CREATED_AT_KEY, SESSION_IDENTITY_KEY,
    };

    use super::{bearer_token, is_dashboard_path, session_identity};

    async fn session_created_at(created_at: i64) -> Session {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        let identity = ExternalIdentity::new("user_rosa");
        session
            .insert(SESSION_IDENTITY_KEY, &identity)
            .await
            .unwrap_or_else(|error| panic!("identity should be stored: {error}"));
        session
            .insert(SESSION_CREATED_AT_KEY, created_at)
            .await
            .unwrap_or_else(|error| panic!("creation time should be stored: {error}"));
        session
    }

    #[test]
    fn dashboard_prefix_matches_only_whole_segments() {
        assert!(is_dashboard_path("/dashboard"));
        assert!(is_dashboard_path("/dashboard/transactions"));
        assert!(!is_dashboard_path("/dashboards"));
        assert!(!is_dashboard_path("/sign-in"));
    }

    #[test]
    fn bearer_token_requires_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));
    }

    #[tokio::test]
    async fn fresh_session_resolves_identity() {
        let now = 1_800_000_000;
        let session = session_created_at(now - 60).await;

        let identity = session_identity(&session, now).await;

        assert_eq!(
            identity.as_ref().map(ExternalIdentity::subject),
            Some("user_rosa")
        );
    }

    #[tokio::test]
    async fn session_past_absolute_lifetime_is_flushed() {
        let now = 1_800_000_000;
        let session = session_created_at(now - SESSION_ABSOLUTE_LIFETIME_SECONDS).await;

        assert_eq!(session_identity(&session, now).await, None);
        assert!(
            session
                .get::<ExternalIdentity>(SESSION_IDENTITY_KEY)
                .await
                .is_ok_and(|identity| identity.is_none())
        );
    }

    #[tokio::test]
    async fn session_without_creation_time_is_rejected() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        session
            .insert(SESSION_IDENTITY_KEY, &ExternalIdentity::new("user_rosa"))
            .await
            .unwrap_or_else(|error| panic!("identity should be stored: {error}"));

        assert_eq!(session_identity(&session, 1_800_000_000).await, None);
    }
}
