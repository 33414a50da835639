//! Shared constants for test data.

/// Plain text password used by fixtures that insert users with a real hash.
pub static TEST_PASSWORD: &str = "correct-horse-battery";

/// Placeholder stored by fixtures that never log in.
pub static TEST_PASSWORD_HASH_PLACEHOLDER: &str = "not-a-password-hash";

pub static TEST_COURSE_NAME: &str = "Computer Science";
pub static TEST_CONTACT_NO: &str = "9876543210";
pub static TEST_ADDRESS: &str = "12 College Road, Pune";

pub static TEST_QUERY_DESCRIPTION: &str = "The fan in my room has stopped working since Monday.";

/// Fee amounts used by the fee structure fixture, in whole rupees.
pub const TEST_SINGLE_ROOM_FEES: i64 = 15000;
pub const TEST_DOUBLE_ROOM_FEES: i64 = 12000;
pub const TEST_TRIPLE_ROOM_FEES: i64 = 10000;
pub const TEST_HOSTEL_FEES: i64 = 8000;
pub const TEST_MESS_FEES: i64 = 6000;
