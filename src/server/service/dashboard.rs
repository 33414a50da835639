//! Dashboard statistics for admins and students.

use sea_orm::{ConnectionTrait, DatabaseConnection};

use entity::sea_orm_active_enums::QueryStatus;

use crate::{
    model::dashboard::{AdminDashboardDto, QueryCountsDto, StudentDashboardDto},
    server::{
        data::{
            payment::PaymentRepository, query::QueryRepository, room::RoomRepository,
            student::StudentProfileRepository, user::UserRepository,
        },
        error::{hostel::HostelError, Error},
        service::{fee::FeeService, retry::RetryContext},
        util::time,
    },
};

pub struct DashboardService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DashboardService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Occupancy, helpdesk and current month collection figures.
    pub async fn admin_dashboard(&self) -> Result<AdminDashboardDto, Error> {
        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry("admin dashboard", || {
            let db = db.clone();

            async move {
                let total_students = StudentProfileRepository::new(&db).count().await?;
                let rooms = RoomRepository::new(&db).get_all(false).await?;

                let total_capacity: i64 = rooms.iter().map(|r| i64::from(r.capacity)).sum();
                let occupied_seats: i64 = rooms.iter().map(|r| i64::from(r.occupied_seats)).sum();

                let month = time::first_of_month(time::today());
                let payments = PaymentRepository::new(&db).get_all_for_month(month).await?;
                let collected_this_month: i64 = payments.iter().map(|p| p.paid_amount).sum();
                let outstanding_this_month: i64 = payments
                    .iter()
                    .map(|p| (p.amount - p.paid_amount).max(0))
                    .sum();

                Ok(AdminDashboardDto {
                    total_students,
                    total_rooms: rooms.len() as u64,
                    active_rooms: rooms.iter().filter(|r| r.is_active).count() as u64,
                    total_capacity,
                    occupied_seats,
                    available_seats: (total_capacity - occupied_seats).max(0),
                    occupancy_rate: occupancy_rate(occupied_seats, total_capacity),
                    queries: query_counts(&db, None).await?,
                    collected_this_month,
                    outstanding_this_month,
                })
            }
        })
        .await
    }

    /// Room, current month fees and helpdesk figures of the student owning `user_id`.
    ///
    /// # Returns
    /// - `Ok(StudentDashboardDto)` - Dashboard of the student
    /// - `Err(Error::HostelError(HostelError::NotFound))` - The user has no student profile
    pub async fn student_dashboard(&self, user_id: i32) -> Result<StudentDashboardDto, Error> {
        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("student dashboard for user ID {}", user_id), || {
            let db = db.clone();

            async move {
                let profile = StudentProfileRepository::new(&db)
                    .get_by_user_id(user_id)
                    .await?
                    .ok_or_else(|| {
                        HostelError::not_found(format!(
                            "No student profile for user ID {}",
                            user_id
                        ))
                    })?;
                let user = UserRepository::new(&db)
                    .get_by_id(user_id)
                    .await?
                    .ok_or_else(|| {
                        Error::InternalError(format!(
                            "Failed to find user ID {} owning student profile ID {}",
                            user_id, profile.id
                        ))
                    })?;

                let queries = query_counts(&db, Some(profile.id)).await?;
                let resolved = FeeService::new(&db)
                    .resolve(profile.id, time::today())
                    .await?;
                let room_type = resolved.room_type_label();
                let room_number = resolved.room.as_ref().map(|room| room.room_number.clone());

                Ok(StudentDashboardDto {
                    name: user.name,
                    roll_no: profile.roll_no,
                    room_number,
                    room_type,
                    fees: resolved.into_summary(time::today()),
                    queries,
                })
            }
        })
        .await
    }
}

/// Percentage of seats taken, rounded to one decimal place
pub fn occupancy_rate(occupied_seats: i64, total_capacity: i64) -> f64 {
    if total_capacity <= 0 {
        return 0.0;
    }

    let rate = occupied_seats as f64 * 100.0 / total_capacity as f64;
    (rate * 10.0).round() / 10.0
}

async fn query_counts<C: ConnectionTrait>(
    db: &C,
    student_id: Option<i32>,
) -> Result<QueryCountsDto, Error> {
    let query_repo = QueryRepository::new(db);

    Ok(QueryCountsDto {
        pending: query_repo
            .count_by_status(student_id, QueryStatus::Pending)
            .await?,
        in_progress: query_repo
            .count_by_status(student_id, QueryStatus::InProgress)
            .await?,
        resolved: query_repo
            .count_by_status(student_id, QueryStatus::Resolved)
            .await?,
    })
}

#[cfg(test)]
mod tests {

    mod occupancy_rate {
        use crate::server::service::dashboard::occupancy_rate;

        #[test]
        fn rounds_to_one_decimal() {
            assert_eq!(occupancy_rate(0, 0), 0.0);
            assert_eq!(occupancy_rate(1, 3), 33.3);
            assert_eq!(occupancy_rate(4, 4), 100.0);
        }
    }

    mod admin_dashboard {
        use entity::sea_orm_active_enums::{PaymentType, QueryStatus};
        use hostel_test_utils::prelude::*;

        use crate::{
            model::dashboard::QueryCountsDto,
            server::{service::dashboard::DashboardService, util::time},
        };

        /// Expect occupancy, query and collection totals across the hostel
        #[tokio::test]
        async fn aggregates_hostel_figures() -> Result<(), TestError> {
            let test = test_setup_with_hostel_tables!()?;
            let room = test.hostel().insert_room("A-101", 2, 0).await?;
            test.hostel().insert_inactive_room("A-102").await?;
            let (_, student) = test
                .hostel()
                .insert_student_in_room("CS2023001", &room)
                .await?;
            test.hostel().insert_student("CS2023002").await?;
            let month = time::first_of_month(time::today());
            test.hostel()
                .insert_payment(student.id, PaymentType::Hostel, 20000, 20000, month)
                .await?;
            test.hostel()
                .insert_payment(student.id, PaymentType::Mess, 6000, 1000, month)
                .await?;
            test.hostel()
                .insert_query(student.id, "Broken fan", QueryStatus::Pending)
                .await?;

            let dashboard = DashboardService::new(&test.db)
                .admin_dashboard()
                .await
                .unwrap();

            assert_eq!(dashboard.total_students, 2);
            assert_eq!(dashboard.total_rooms, 2);
            assert_eq!(dashboard.active_rooms, 1);
            assert_eq!(dashboard.total_capacity, 4);
            assert_eq!(dashboard.occupied_seats, 1);
            assert_eq!(dashboard.available_seats, 3);
            assert_eq!(dashboard.occupancy_rate, 25.0);
            assert_eq!(
                dashboard.queries,
                QueryCountsDto {
                    pending: 1,
                    in_progress: 0,
                    resolved: 0
                }
            );
            assert_eq!(dashboard.collected_this_month, 21000);
            assert_eq!(dashboard.outstanding_this_month, 5000);

            Ok(())
        }
    }

    mod student_dashboard {
        use entity::sea_orm_active_enums::{QueryStatus, Semester};
        use hostel_test_utils::prelude::*;

        use crate::server::{
            error::{hostel::HostelError, Error},
            service::dashboard::DashboardService,
        };

        /// Expect the student's room, fees and own query counts
        #[tokio::test]
        async fn summarises_student() -> Result<(), TestError> {
            let test = test_setup_with_hostel_tables!()?;
            test.hostel()
                .insert_fee_structure(2025, Semester::JulDec)
                .await?;
            let room = test.hostel().insert_room("A-101", 1, 0).await?;
            let (user, student) = test
                .hostel()
                .insert_student_in_room("CS2023001", &room)
                .await?;
            let (_, other) = test.hostel().insert_student("CS2023002").await?;
            test.hostel()
                .insert_query(student.id, "Broken fan", QueryStatus::Resolved)
                .await?;
            test.hostel()
                .insert_query(other.id, "Noisy corridor", QueryStatus::Pending)
                .await?;

            let dashboard = DashboardService::new(&test.db)
                .student_dashboard(user.id)
                .await
                .unwrap();

            assert_eq!(dashboard.roll_no, "CS2023001");
            assert_eq!(dashboard.room_number.as_deref(), Some("A-101"));
            assert_eq!(dashboard.room_type, "Single");
            assert_eq!(dashboard.fees.hostel.map(|f| f.total), Some(23000));
            assert_eq!(dashboard.queries.resolved, 1);
            assert_eq!(dashboard.queries.pending, 0);

            Ok(())
        }

        /// Expect NotFound for an account without a student profile
        #[tokio::test]
        async fn fails_for_admin_account() -> Result<(), TestError> {
            let test = test_setup_with_hostel_tables!()?;
            let admin = test.hostel().insert_admin("admin@college.edu").await?;

            let result = DashboardService::new(&test.db)
                .student_dashboard(admin.id)
                .await;

            assert!(matches!(
                result,
                Err(Error::HostelError(HostelError::NotFound(_)))
            ));

            Ok(())
        }
    }
}
