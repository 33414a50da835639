//! Credentials authentication service layer.
//!
//! Students register with an email and password and must verify the email through a one-time
//! link before logging in. The administrator account is seeded from configuration at startup.
//! Successful logins store a [`SessionUser`] in the session.

#[cfg(test)]
mod tests;

use chrono::{Duration, NaiveDate};
use entity::sea_orm_active_enums::UserRole;
use rand::{distr::Alphanumeric, Rng};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tower_sessions::Session;

use crate::{
    model::user::{LoginDto, RegisterDto, UserDto},
    server::{
        config::AdminSeed,
        data::{
            course::CourseRepository,
            student::{CreateStudentProfileParams, StudentProfileRepository},
            user::UserRepository,
            verification_token::VerificationTokenRepository,
        },
        error::{auth::AuthError, hostel::HostelError, Error},
        model::{db::UserModel, session::user::SessionUser},
        service::{
            mail::{verification_url, Mailer},
            retry::RetryContext,
        },
        util::{
            password::{hash_password, verify_password},
            time,
            validate::{is_valid_contact_no, is_valid_email, is_valid_roll_no, require_non_empty},
        },
    },
};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Hours a verification link stays valid
pub const VERIFICATION_TOKEN_TTL_HOURS: i64 = 24;

const VERIFICATION_TOKEN_LEN: usize = 32;

/// Registration input after validation and normalisation.
struct Registration {
    name: String,
    email: String,
    roll_no: String,
    course_id: i32,
    contact_no: String,
    date_of_birth: NaiveDate,
    address: String,
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a student account and sends its email verification link.
    ///
    /// The user, student profile and verification token are inserted in one transaction. Mail
    /// delivery happens after commit; a delivery failure is logged and the account is kept, the
    /// student can request help from an administrator.
    ///
    /// # Returns
    /// - `Ok(UserDto)` - The new, unverified student account
    /// - `Err(Error::HostelError(HostelError::Validation))` - Invalid input or unknown course
    /// - `Err(Error::HostelError(HostelError::Conflict))` - Email or roll number already registered
    pub async fn register(
        &self,
        payload: RegisterDto,
        mailer: &dyn Mailer,
        app_url: &str,
    ) -> Result<UserDto, Error> {
        let registration = validate_registration(&payload, time::today())?;
        let password_hash = hash_password(&payload.password)?;
        let token = generate_token();

        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        let user = ctx
            .execute_with_retry(&format!("register {}", registration.email), || {
                let db = db.clone();
                let registration = &registration;
                let password_hash = password_hash.clone();
                let token = token.clone();

                async move {
                    let txn = db.begin().await?;

                    if CourseRepository::new(&txn)
                        .get_by_id(registration.course_id)
                        .await?
                        .is_none()
                    {
                        return Err(HostelError::validation("Selected course does not exist").into());
                    }

                    let user_repo = UserRepository::new(&txn);
                    if user_repo.get_by_email(&registration.email).await?.is_some() {
                        return Err(HostelError::conflict(
                            "An account with this email already exists",
                        )
                        .into());
                    }

                    let profile_repo = StudentProfileRepository::new(&txn);
                    if profile_repo
                        .get_by_roll_no(&registration.roll_no)
                        .await?
                        .is_some()
                    {
                        return Err(HostelError::conflict(format!(
                            "Roll number {} is already registered",
                            registration.roll_no
                        ))
                        .into());
                    }

                    let user = user_repo
                        .create(
                            registration.name.clone(),
                            registration.email.clone(),
                            password_hash,
                            UserRole::Student,
                            None,
                        )
                        .await?;

                    profile_repo
                        .create(CreateStudentProfileParams {
                            user_id: user.id,
                            roll_no: registration.roll_no.clone(),
                            course_id: registration.course_id,
                            contact_no: registration.contact_no.clone(),
                            date_of_birth: registration.date_of_birth,
                            address: registration.address.clone(),
                        })
                        .await?;

                    VerificationTokenRepository::new(&txn)
                        .create(
                            token,
                            user.email.clone(),
                            time::now() + Duration::hours(VERIFICATION_TOKEN_TTL_HOURS),
                        )
                        .await?;

                    txn.commit().await?;

                    Ok(user)
                }
            })
            .await?;

        tracing::info!("Registered student {} with user ID {}", registration.roll_no, user.id);

        if let Err(e) = mailer
            .send_verification(&user.email, &verification_url(app_url, &token))
            .await
        {
            tracing::warn!(
                "Failed to send verification email to {}: {}",
                user.email,
                e
            );
        }

        Ok(user_dto(user))
    }

    /// Checks credentials and stores the user in the session.
    ///
    /// # Returns
    /// - `Ok(UserDto)` - Logged in user
    /// - `Err(Error::AuthError(AuthError::InvalidCredentials))` - Unknown email or wrong password
    /// - `Err(Error::AuthError(AuthError::EmailNotVerified))` - Student has not verified their email
    pub async fn login(&self, session: &Session, payload: LoginDto) -> Result<UserDto, Error> {
        let email = normalize_email(&payload.email);

        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        let user = ctx
            .execute_with_retry(&format!("login {}", email), || {
                let db = db.clone();
                let email = email.clone();

                async move { Ok(UserRepository::new(&db).get_by_email(&email).await?) }
            })
            .await?;

        let Some(user) = user else {
            return Err(AuthError::InvalidCredentials.into());
        };

        // An unreadable stored hash is treated like a wrong password
        let password_matches = match verify_password(&payload.password, &user.password_hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!("Unreadable password hash for user ID {}: {}", user.id, e);
                false
            }
        };
        if !password_matches {
            return Err(AuthError::InvalidCredentials.into());
        }

        if user.role == UserRole::Student && user.email_verified_at.is_none() {
            return Err(AuthError::EmailNotVerified.into());
        }

        SessionUser::insert(session, user.id, user.role).await?;

        tracing::debug!("User ID {} logged in", user.id);

        Ok(user_dto(user))
    }

    /// Marks the email behind `token` as verified and consumes the token.
    ///
    /// # Returns
    /// - `Ok(UserDto)` - The verified user
    /// - `Err(Error::HostelError(HostelError::NotFound))` - Unknown token or its user is gone
    /// - `Err(Error::HostelError(HostelError::Validation))` - Token expired, it is kept
    pub async fn verify_email(&self, token: &str) -> Result<UserDto, Error> {
        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        let user = ctx
            .execute_with_retry("verify email", || {
                let db = db.clone();

                async move {
                    let txn = db.begin().await?;
                    let token_repo = VerificationTokenRepository::new(&txn);

                    let stored = token_repo
                        .get(token)
                        .await?
                        .ok_or_else(|| HostelError::not_found("Invalid verification link"))?;

                    let now = time::now();
                    if stored.expires < now {
                        return Err(HostelError::validation(
                            "Verification link has expired",
                        )
                        .into());
                    }

                    let user = UserRepository::new(&txn)
                        .mark_email_verified(&stored.identifier, now)
                        .await?
                        .ok_or_else(|| HostelError::not_found("Invalid verification link"))?;

                    token_repo.delete(token).await?;

                    txn.commit().await?;

                    Ok(user)
                }
            })
            .await?;

        tracing::info!("Verified email for user ID {}", user.id);

        Ok(user_dto(user))
    }

    /// Inserts the configured administrator unless an account with that email exists.
    ///
    /// Returns `Ok(true)` when the administrator was created.
    pub async fn seed_admin(&self, seed: &AdminSeed) -> Result<bool, Error> {
        let email = normalize_email(&seed.email);
        if !is_valid_email(&email) {
            return Err(HostelError::validation("ADMIN_EMAIL is not a valid email address").into());
        }

        let password_hash = hash_password(&seed.password)?;

        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        let created = ctx
            .execute_with_retry("seed admin", || {
                let db = db.clone();
                let email = email.clone();
                let password_hash = password_hash.clone();

                async move {
                    let txn = db.begin().await?;
                    let user_repo = UserRepository::new(&txn);

                    if user_repo.get_by_email(&email).await?.is_some() {
                        return Ok(false);
                    }

                    user_repo
                        .create(
                            seed.name.clone(),
                            email,
                            password_hash,
                            UserRole::Admin,
                            Some(time::now()),
                        )
                        .await?;

                    txn.commit().await?;

                    Ok(true)
                }
            })
            .await?;

        if created {
            tracing::info!("Seeded administrator account {}", email);
        } else {
            tracing::debug!("Administrator account {} already exists", email);
        }

        Ok(created)
    }
}

pub fn user_dto(user: UserModel) -> UserDto {
    UserDto {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
        email_verified_at: user.email_verified_at,
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn generate_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(VERIFICATION_TOKEN_LEN)
        .map(char::from)
        .collect()
}

fn validate_registration(
    payload: &RegisterDto,
    today: NaiveDate,
) -> Result<Registration, Error> {
    let name = require_non_empty("name", &payload.name)?;

    let email = normalize_email(&payload.email);
    if !is_valid_email(&email) {
        return Err(HostelError::validation("email must be a valid email address").into());
    }

    if payload.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(HostelError::validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        ))
        .into());
    }

    let roll_no = payload.roll_no.trim().to_uppercase();
    if !is_valid_roll_no(&roll_no) {
        return Err(HostelError::validation(
            "roll_no must be letters followed by digits, e.g. CS2023001",
        )
        .into());
    }

    let contact_no = payload.contact_no.trim().to_string();
    if !is_valid_contact_no(&contact_no) {
        return Err(HostelError::validation("contact_no must be exactly 10 digits").into());
    }

    let date_of_birth = time::parse_date("date_of_birth", &payload.date_of_birth)?;
    if date_of_birth >= today {
        return Err(HostelError::validation("date_of_birth must be in the past").into());
    }

    let address = require_non_empty("address", &payload.address)?;

    Ok(Registration {
        name,
        email,
        roll_no,
        course_id: payload.course_id,
        contact_no,
        date_of_birth,
        address,
    })
}
