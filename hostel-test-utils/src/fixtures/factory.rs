//! Factory functions for generating mock database models.
//!
//! These are in-memory model instances that don't require database interaction,
//! suitable for unit tests of pure logic.

use chrono::{Duration, NaiveDate, Utc};
use entity::sea_orm_active_enums::{PaymentStatus, PaymentType, Semester};

use crate::{
    constant::{
        TEST_DOUBLE_ROOM_FEES, TEST_HOSTEL_FEES, TEST_MESS_FEES, TEST_SINGLE_ROOM_FEES,
        TEST_TRIPLE_ROOM_FEES,
    },
    model::{FeeStructureModel, PaymentModel, RoomModel},
};

/// Create a mock room with the given capacity and occupancy.
pub fn mock_room_model(id: i32, capacity: i32, occupied_seats: i32) -> RoomModel {
    RoomModel {
        id,
        room_number: format!("A-{}", 100 + id),
        capacity,
        occupied_seats,
        floor: 1,
        block: "A".to_string(),
        is_active: true,
        created_at: Utc::now().naive_utc(),
    }
}

/// Create a mock fee structure using the standard test amounts.
pub fn mock_fee_structure_model(year: i32, semester: Semester) -> FeeStructureModel {
    FeeStructureModel {
        id: 1,
        year,
        semester,
        single_room_fees: TEST_SINGLE_ROOM_FEES,
        double_room_fees: TEST_DOUBLE_ROOM_FEES,
        triple_room_fees: TEST_TRIPLE_ROOM_FEES,
        hostel_fees: TEST_HOSTEL_FEES,
        mess_fees: TEST_MESS_FEES,
        due_date: Utc::now().date_naive() + Duration::days(30),
        created_at: Utc::now().naive_utc(),
    }
}

/// Create a mock payment row.
pub fn mock_payment_model(
    student_id: i32,
    payment_type: PaymentType,
    amount: i64,
    paid_amount: i64,
    due_date: NaiveDate,
    status: PaymentStatus,
) -> PaymentModel {
    let now = Utc::now().naive_utc();
    PaymentModel {
        id: 1,
        student_id,
        r#type: payment_type,
        amount,
        paid_amount,
        due_date,
        status,
        created_at: now,
        updated_at: now,
    }
}
