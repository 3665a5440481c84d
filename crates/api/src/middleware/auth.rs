//! Identity extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use fbfp_core::error::CoreError;
use fbfp_db::models::user::User;
use fbfp_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::auth::Identity;
use crate::config::AuthMode;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller, with their user row created or refreshed.
///
/// Use this as an extractor parameter in any handler that requires login:
///
/// ```ignore
/// async fn my_handler(CurrentUser(user): CurrentUser) -> AppResult<Json<()>> {
///     tracing::info!(oid = %user.oid, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = match &state.config.auth {
            AuthMode::Dev => Identity::dev(),
            AuthMode::Jwt(jwt) => {
                let auth_header = parts
                    .headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .ok_or_else(|| {
                        AppError::Core(CoreError::Unauthorized(
                            "Missing Authorization header".into(),
                        ))
                    })?;

                let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
                    AppError::Core(CoreError::Unauthorized(
                        "Invalid Authorization format. Expected: Bearer <token>".into(),
                    ))
                })?;

                validate_token(token, jwt).map_err(|_| {
                    AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
                })?
            }
        };

        let user =
            UserRepo::upsert_identity(&state.pool, &identity.oid, &identity.name, &identity.email)
                .await?;

        Ok(CurrentUser(user))
    }
}
