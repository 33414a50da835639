use entity::sea_orm_active_enums::UserRole;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

pub const SESSION_USER_KEY: &str = "hostel:user";

/// Identity of the logged in user as stored in the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionUser {
    pub id: i32,
    pub role: UserRole,
}

impl SessionUser {
    /// Insert user identity into session
    pub async fn insert(session: &Session, user_id: i32, role: UserRole) -> Result<(), Error> {
        session
            .insert(SESSION_USER_KEY, SessionUser { id: user_id, role })
            .await?;

        Ok(())
    }

    /// Get user identity from session
    pub async fn get(session: &Session) -> Result<Option<SessionUser>, Error> {
        Ok(session.get::<SessionUser>(SESSION_USER_KEY).await?)
    }
}
