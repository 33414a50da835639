//! HTTP routing and OpenAPI documentation configuration.
//!
//! This module defines the application's HTTP routes and generates OpenAPI documentation
//! using utoipa. All API endpoints are registered here with their OpenAPI specifications,
//! and Swagger UI is configured to provide interactive API documentation at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// Handlers sharing a path are registered together so utoipa-axum merges them into a single
/// method router. Role checks happen inside the handlers, see `controller::util::get_user`.
///
/// # Registered Endpoints
/// - `/api/auth/*` - Registration, login, email verification, logout, current user
/// - `/api/courses` - Course list for registration
/// - `/api/rooms`, `/api/rooms/{id}` - Room administration
/// - `/api/students`, `/api/students/{id}`, `/api/students/{id}/room` - Student administration
/// - `/api/student/*` - Student self service: profile, fees, payments
/// - `/api/payments` - All payments
/// - `/api/fee-structures`, `/api/fee-structures/latest`, `/api/fee-structures/{id}`
/// - `/api/queries`, `/api/queries/{id}` - Helpdesk
/// - `/api/dashboard/admin`, `/api/dashboard/student`
///
/// The OpenAPI specification is available at `/api/docs/openapi.json`.
///
/// # Example
/// ```ignore
/// let router = routes().with_state(AppState::from(db)).layer(session);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Hostel", description = "Hostel management API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Authentication API routes"),
        (name = controller::course::COURSE_TAG, description = "Course API routes"),
        (name = controller::room::ROOM_TAG, description = "Room API routes"),
        (name = controller::student::STUDENT_TAG, description = "Student API routes"),
        (name = controller::fee::FEE_TAG, description = "Fee and payment API routes"),
        (name = controller::fee_structure::FEE_STRUCTURE_TAG, description = "Fee structure API routes"),
        (name = controller::query::QUERY_TAG, description = "Helpdesk query API routes"),
        (name = controller::dashboard::DASHBOARD_TAG, description = "Dashboard API routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::register))
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::verify_email))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::auth::get_user))
        .routes(routes!(controller::course::list_courses))
        .routes(routes!(
            controller::room::list_rooms,
            controller::room::create_room
        ))
        .routes(routes!(
            controller::room::get_room,
            controller::room::update_room,
            controller::room::delete_room
        ))
        .routes(routes!(controller::student::list_students))
        .routes(routes!(
            controller::student::get_student,
            controller::student::delete_student
        ))
        .routes(routes!(controller::student::assign_room))
        .routes(routes!(
            controller::student::get_profile,
            controller::student::update_profile
        ))
        .routes(routes!(controller::fee::get_student_fees))
        .routes(routes!(controller::fee::record_payment))
        .routes(routes!(controller::fee::list_student_payments))
        .routes(routes!(controller::fee::list_payments))
        .routes(routes!(
            controller::fee_structure::list_fee_structures,
            controller::fee_structure::create_fee_structure
        ))
        .routes(routes!(controller::fee_structure::get_latest_fee_structure))
        .routes(routes!(
            controller::fee_structure::update_fee_structure,
            controller::fee_structure::delete_fee_structure
        ))
        .routes(routes!(
            controller::query::list_queries,
            controller::query::create_query
        ))
        .routes(routes!(
            controller::query::get_query,
            controller::query::update_query,
            controller::query::delete_query
        ))
        .routes(routes!(controller::dashboard::admin_dashboard))
        .routes(routes!(controller::dashboard::student_dashboard))
        .split_for_parts();

    let routes = routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api));

    routes
}
