//! Role-based access control extractor.
//!
//! Wraps [`CurrentUser`] and rejects requests whose role does not meet the
//! requirement, enforcing authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use storefront_core::error::CoreError;
use storefront_db::models::user::{User, UserRole};

use super::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the admin role. Rejects with 403 Forbidden otherwise.
///
/// The check runs against the freshly loaded user row, so a demoted admin
/// loses access even while holding an unexpired admin token.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an active admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        match user.role {
            UserRole::Admin => Ok(RequireAdmin(user)),
            UserRole::Customer => Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            ))),
        }
    }
}
