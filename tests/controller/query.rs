use axum::{
    extract::{Path, Query, State},
    Json,
};
use entity::sea_orm_active_enums::QueryStatus;
use hostel::{
    model::query::{CreateQueryDto, UpdateQueryDto},
    server::controller::query::{
        create_query, delete_query, get_query, list_queries, update_query, ListQueriesParams,
    },
};
use hostel_test_utils::constant::TEST_QUERY_DESCRIPTION;

use super::*;

/// Expect 201 for a student and 401 for an administrator
#[tokio::test]
async fn only_students_create_queries() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    let (user, _) = test.hostel().insert_student("CS2023001").await?;
    let admin = test.hostel().insert_admin("admin@college.edu").await?;
    let payload = CreateQueryDto {
        title: "Broken fan".to_string(),
        description: TEST_QUERY_DESCRIPTION.to_string(),
    };

    log_in(&test, admin.id, UserRole::Admin).await;
    let as_admin = create_query(
        State(test.state()),
        test.session.clone(),
        Json(payload.clone()),
    )
    .await;
    log_in(&test, user.id, UserRole::Student).await;
    let as_student = create_query(State(test.state()), test.session.clone(), Json(payload)).await;

    assert_eq!(status_of(as_admin), StatusCode::UNAUTHORIZED);
    assert_eq!(status_of(as_student), StatusCode::CREATED);

    Ok(())
}

/// Expect 404 when a student opens another student's query
#[tokio::test]
async fn hides_other_students_queries() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    let (_, owner) = test.hostel().insert_student("CS2023001").await?;
    let (other, _) = test.hostel().insert_student("CS2023002").await?;
    let query = test
        .hostel()
        .insert_query(owner.id, "Broken fan", QueryStatus::Pending)
        .await?;
    log_in(&test, other.id, UserRole::Student).await;

    let result = get_query(State(test.state()), test.session.clone(), Path(query.id)).await;

    assert_eq!(status_of(result), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect 400 when resolving without a response and 200 with one
#[tokio::test]
async fn resolving_requires_response() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    let (_, student) = test.hostel().insert_student("CS2023001").await?;
    let admin = test.hostel().insert_admin("admin@college.edu").await?;
    let query = test
        .hostel()
        .insert_query(student.id, "Broken fan", QueryStatus::Pending)
        .await?;
    log_in(&test, admin.id, UserRole::Admin).await;

    let without_response = update_query(
        State(test.state()),
        test.session.clone(),
        Path(query.id),
        Json(UpdateQueryDto {
            status: "resolved".to_string(),
            admin_response: Some("  ".to_string()),
        }),
    )
    .await;
    let with_response = update_query(
        State(test.state()),
        test.session.clone(),
        Path(query.id),
        Json(UpdateQueryDto {
            status: "resolved".to_string(),
            admin_response: Some("Fan replaced".to_string()),
        }),
    )
    .await;

    assert_eq!(status_of(without_response), StatusCode::BAD_REQUEST);
    assert_eq!(status_of(with_response), StatusCode::OK);

    Ok(())
}

/// Expect status filters to be validated
#[tokio::test]
async fn validates_status_filter() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    let (user, _) = test.hostel().insert_student("CS2023001").await?;
    log_in(&test, user.id, UserRole::Student).await;

    let known = list_queries(
        State(test.state()),
        test.session.clone(),
        Query(ListQueriesParams {
            status: Some("in_progress".to_string()),
        }),
    )
    .await;
    let unknown = list_queries(
        State(test.state()),
        test.session.clone(),
        Query(ListQueriesParams {
            status: Some("closed".to_string()),
        }),
    )
    .await;

    assert_eq!(status_of(known), StatusCode::OK);
    assert_eq!(status_of(unknown), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect a student to delete their pending query but not a resolved one
#[tokio::test]
async fn student_deletes_pending_query_only() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    let (user, student) = test.hostel().insert_student("CS2023001").await?;
    let pending = test
        .hostel()
        .insert_query(student.id, "Broken fan", QueryStatus::Pending)
        .await?;
    let resolved = test
        .hostel()
        .insert_query(student.id, "Leaking tap", QueryStatus::Resolved)
        .await?;
    log_in(&test, user.id, UserRole::Student).await;

    let deleted = delete_query(State(test.state()), test.session.clone(), Path(pending.id)).await;
    let refused = delete_query(State(test.state()), test.session.clone(), Path(resolved.id)).await;

    assert_eq!(status_of(deleted), StatusCode::NO_CONTENT);
    assert_eq!(status_of(refused), StatusCode::BAD_REQUEST);

    Ok(())
}
