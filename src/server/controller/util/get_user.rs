use entity::sea_orm_active_enums::UserRole;
use tower_sessions::Session;

use crate::{
    model::student::StudentDto,
    server::{
        data::user::UserRepository,
        error::{auth::AuthError, Error},
        model::{app::AppState, db::UserModel, session::user::SessionUser},
        service::student::StudentService,
    },
};

/// Retrieves the logged in user from session and then from database
///
/// # Arguments
/// - `state`: Application state with database connection
/// - `session`: The user's session
///
/// # Returns
/// - `Ok(UserModel)`: User found
/// - `Err(Error::AuthError(AuthError::UserNotInSession))`: No user present in session
/// - `Err(Error::AuthError(AuthError::UserNotInDatabase))`: User in session but not found in database (session is cleared)
/// - `Err(Error)`: Internal errors (database query failures, session errors, etc.)
pub async fn require_user(
    state: &AppState,
    session: &Session,
) -> Result<UserModel, Error> {
    let Some(session_user) = SessionUser::get(session).await? else {
        return Err(Error::AuthError(AuthError::UserNotInSession));
    };

    let Some(user) = UserRepository::new(&state.db)
        .get_by_id(session_user.id)
        .await?
    else {
        session.clear().await;

        tracing::debug!(
            "Session cleared for user ID {} with active session but was not found in database",
            session_user.id
        );

        return Err(Error::AuthError(AuthError::UserNotInDatabase(session_user.id)));
    };

    Ok(user)
}

/// Retrieves the logged in user, rejecting anyone who is not an administrator
pub async fn require_admin(
    state: &AppState,
    session: &Session,
) -> Result<UserModel, Error> {
    let user = require_user(state, session).await?;

    if user.role != UserRole::Admin {
        return Err(Error::AuthError(AuthError::Forbidden));
    }

    Ok(user)
}

/// Retrieves the student profile of the logged in user
///
/// Administrators and accounts without a profile are rejected with `AuthError::Forbidden`.
pub async fn require_student(state: &AppState, session: &Session) -> Result<StudentDto, Error> {
    let user = require_user(state, session).await?;

    if user.role != UserRole::Student {
        return Err(Error::AuthError(AuthError::Forbidden));
    }

    StudentService::new(&state.db).get_by_user(user.id).await
}
