use axum::extract::State;
use hostel::server::controller::dashboard::{admin_dashboard, student_dashboard};

use super::*;

/// Expect each dashboard to be served to its own role only
#[tokio::test]
async fn serves_dashboards_by_role() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    let (user, _) = test.hostel().insert_student("CS2023001").await?;
    let admin = test.hostel().insert_admin("admin@college.edu").await?;

    log_in(&test, admin.id, UserRole::Admin).await;
    let admin_as_admin = admin_dashboard(State(test.state()), test.session.clone()).await;
    let student_as_admin = student_dashboard(State(test.state()), test.session.clone()).await;

    log_in(&test, user.id, UserRole::Student).await;
    let admin_as_student = admin_dashboard(State(test.state()), test.session.clone()).await;
    let student_as_student = student_dashboard(State(test.state()), test.session.clone()).await;

    assert_eq!(status_of(admin_as_admin), StatusCode::OK);
    assert_eq!(status_of(student_as_admin), StatusCode::UNAUTHORIZED);
    assert_eq!(status_of(admin_as_student), StatusCode::UNAUTHORIZED);
    assert_eq!(status_of(student_as_student), StatusCode::OK);

    Ok(())
}
