use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Duration, Utc};
use hostel::{
    model::user::{LoginDto, RegisterDto},
    server::controller::auth::{get_user, login, logout, register, verify_email, VerifyParams},
};
use hostel_test_utils::constant::TEST_PASSWORD;

use super::*;

/// Expect 201 for a valid registration and 409 when it is repeated
#[tokio::test]
async fn registers_student_once() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    let course = test.hostel().default_course().await?;
    let payload = RegisterDto {
        name: "Asha Rao".to_string(),
        email: "asha@college.edu".to_string(),
        password: "hostel-pass-1".to_string(),
        roll_no: "CS2023001".to_string(),
        course_id: course.id,
        contact_no: "9876543210".to_string(),
        date_of_birth: "2004-05-17".to_string(),
        address: "12 College Road, Pune".to_string(),
    };

    let first = register(State(test.state()), Json(payload.clone())).await;
    let second = register(State(test.state()), Json(payload)).await;

    let (status, body) = json_of(first).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "asha@college.edu");
    assert_eq!(body["role"], "student");
    assert!(body["email_verified_at"].is_null());

    let (status, body) = json_of(second).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "An account with this email already exists");

    Ok(())
}

/// Expect 200 and a session user for valid credentials
#[tokio::test]
async fn logs_in_with_valid_credentials() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    let user = test
        .hostel()
        .insert_user_with_password("asha@college.edu", UserRole::Student, true, TEST_PASSWORD)
        .await?;

    let result = login(
        State(test.state()),
        test.session.clone(),
        Json(LoginDto {
            email: "asha@college.edu".to_string(),
            password: TEST_PASSWORD.to_string(),
        }),
    )
    .await;

    assert_eq!(status_of(result), StatusCode::OK);
    let session_user = SessionUser::get(&test.session).await.unwrap().unwrap();
    assert_eq!(session_user.id, user.id);

    Ok(())
}

/// Expect 401 for a student who has not verified their email
#[tokio::test]
async fn rejects_unverified_login() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    test.hostel()
        .insert_user_with_password("asha@college.edu", UserRole::Student, false, TEST_PASSWORD)
        .await?;

    let result = login(
        State(test.state()),
        test.session.clone(),
        Json(LoginDto {
            email: "asha@college.edu".to_string(),
            password: TEST_PASSWORD.to_string(),
        }),
    )
    .await;

    assert_eq!(status_of(result), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect 200 for a fresh token, then 404 once it has been consumed
#[tokio::test]
async fn verifies_email_with_token() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    let (user, _) = test
        .hostel()
        .insert_unverified_student("CS2023001")
        .await?;
    test.hostel()
        .insert_verification_token(
            &user.email,
            "token-abc",
            Utc::now().naive_utc() + Duration::hours(1),
        )
        .await?;

    let params = || VerifyParams {
        token: "token-abc".to_string(),
    };
    let first = verify_email(State(test.state()), Query(params())).await;
    let second = verify_email(State(test.state()), Query(params())).await;

    assert_eq!(status_of(first), StatusCode::OK);
    assert_eq!(status_of(second), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect 400 for an expired token
#[tokio::test]
async fn rejects_expired_token() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    let (user, _) = test
        .hostel()
        .insert_unverified_student("CS2023001")
        .await?;
    test.hostel()
        .insert_verification_token(
            &user.email,
            "token-old",
            Utc::now().naive_utc() - Duration::hours(1),
        )
        .await?;

    let result = verify_email(
        State(test.state()),
        Query(VerifyParams {
            token: "token-old".to_string(),
        }),
    )
    .await;

    assert_eq!(status_of(result), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 204 after logout with a user in session and the user to be cleared
#[tokio::test]
async fn clears_session_on_logout() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    log_in(&test, 1, UserRole::Student).await;

    let result = logout(test.session.clone()).await;

    assert_eq!(status_of(result), StatusCode::NO_CONTENT);
    assert!(SessionUser::get(&test.session).await.unwrap().is_none());

    Ok(())
}

/// Expect 204 after logout even without session data
#[tokio::test]
async fn logs_out_without_session() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;

    let result = logout(test.session.clone()).await;

    assert_eq!(status_of(result), StatusCode::NO_CONTENT);

    Ok(())
}

/// Expect 200 for the logged in user and 401 without a session
#[tokio::test]
async fn returns_session_user() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    let admin = test.hostel().insert_admin("admin@college.edu").await?;

    let anonymous = get_user(State(test.state()), test.session.clone()).await;
    log_in(&test, admin.id, UserRole::Admin).await;
    let logged_in = get_user(State(test.state()), test.session.clone()).await;

    assert_eq!(status_of(anonymous), StatusCode::UNAUTHORIZED);
    assert_eq!(status_of(logged_in), StatusCode::OK);

    Ok(())
}

/// Expect 401 and a cleared session when the session user no longer exists
#[tokio::test]
async fn clears_session_for_deleted_user() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    log_in(&test, 42, UserRole::Student).await;

    let result = get_user(State(test.state()), test.session.clone()).await;

    assert_eq!(status_of(result), StatusCode::UNAUTHORIZED);
    assert!(SessionUser::get(&test.session).await.unwrap().is_none());

    Ok(())
}
