use axum::extract::{Path, Query, State};
use entity::sea_orm_active_enums::{PaymentStatus, PaymentType, Semester};
use hostel::server::{
    controller::fee::{
        get_student_fees, list_payments, record_payment, FeeParams, ListPaymentsParams,
    },
    data::payment::PaymentRepository,
    util::time,
};

use super::*;

/// Expect 200 for the student's fees and 400 for a malformed month
#[tokio::test]
async fn returns_student_fees() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    test.hostel()
        .insert_fee_structure(2025, Semester::JulDec)
        .await?;
    let (user, _) = test.hostel().insert_student("CS2023001").await?;
    log_in(&test, user.id, UserRole::Student).await;

    let current = get_student_fees(
        State(test.state()),
        test.session.clone(),
        Query(FeeParams { month: None }),
    )
    .await;
    let malformed = get_student_fees(
        State(test.state()),
        test.session.clone(),
        Query(FeeParams {
            month: Some("July 2025".to_string()),
        }),
    )
    .await;

    let (status, body) = json_of(current).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["room_type"], "Not Assigned");
    assert_eq!(body["hostel"]["total"], 8000);
    assert_eq!(body["mess"]["total"], 6000);

    let (status, body) = json_of(malformed).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "month must be in YYYY-MM format");

    Ok(())
}

/// Expect a full hostel payment for the current month to be recorded as paid
#[tokio::test]
async fn records_full_payment() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    test.hostel()
        .insert_fee_structure(2025, Semester::JulDec)
        .await?;
    let room = test.hostel().insert_room("A-101", 1, 0).await?;
    let (user, student) = test
        .hostel()
        .insert_student_in_room("CS2023001", &room)
        .await?;
    log_in(&test, user.id, UserRole::Student).await;

    let result = record_payment(
        State(test.state()),
        test.session.clone(),
        Path("hostel".to_string()),
    )
    .await;

    assert_eq!(status_of(result), StatusCode::OK);
    let payment = PaymentRepository::new(&test.db)
        .get_for_month(
            student.id,
            PaymentType::Hostel,
            time::first_of_month(time::today()),
        )
        .await?
        .unwrap();
    assert_eq!(payment.amount, 23000);
    assert_eq!(payment.paid_amount, 23000);
    assert_eq!(payment.status, PaymentStatus::Paid);

    Ok(())
}

/// Expect 400 for an unknown payment type
#[tokio::test]
async fn rejects_unknown_payment_type() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    let (user, _) = test.hostel().insert_student("CS2023001").await?;
    log_in(&test, user.id, UserRole::Student).await;

    let result = record_payment(
        State(test.state()),
        test.session.clone(),
        Path("laundry".to_string()),
    )
    .await;

    assert_eq!(status_of(result), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect administrators to list payments filtered by a known status only
#[tokio::test]
async fn lists_payments_for_admin() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    let admin = test.hostel().insert_admin("admin@college.edu").await?;
    log_in(&test, admin.id, UserRole::Admin).await;

    let filtered = list_payments(
        State(test.state()),
        test.session.clone(),
        Query(ListPaymentsParams {
            status: Some("paid".to_string()),
        }),
    )
    .await;
    let unknown = list_payments(
        State(test.state()),
        test.session.clone(),
        Query(ListPaymentsParams {
            status: Some("refunded".to_string()),
        }),
    )
    .await;

    assert_eq!(status_of(filtered), StatusCode::OK);
    assert_eq!(status_of(unknown), StatusCode::BAD_REQUEST);

    Ok(())
}
