use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
};
use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use entity::sea_orm_active_enums::{
    PaymentStatus, PaymentType, QueryStatus, Semester, UserRole,
};
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, QueryFilter};

use crate::{
    constant::{
        TEST_ADDRESS, TEST_CONTACT_NO, TEST_COURSE_NAME, TEST_DOUBLE_ROOM_FEES, TEST_HOSTEL_FEES,
        TEST_MESS_FEES, TEST_PASSWORD_HASH_PLACEHOLDER, TEST_QUERY_DESCRIPTION,
        TEST_SINGLE_ROOM_FEES, TEST_TRIPLE_ROOM_FEES,
    },
    error::TestError,
    model::{
        CourseModel, FeeStructureModel, PaymentModel, QueryModel, RoomModel, StudentProfileModel,
        UserModel, VerificationTokenModel,
    },
    TestSetup,
};

impl TestSetup {
    pub fn hostel<'a>(&'a self) -> HostelFixtures<'a> {
        HostelFixtures { setup: self }
    }
}

pub struct HostelFixtures<'a> {
    setup: &'a TestSetup,
}

impl<'a> HostelFixtures<'a> {
    pub async fn insert_course(&self, name: &str) -> Result<CourseModel, TestError> {
        Ok(entity::prelude::Course::insert(entity::course::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Returns the shared test course, creating it on first use
    pub async fn default_course(&self) -> Result<CourseModel, TestError> {
        let existing = entity::prelude::Course::find()
            .filter(entity::course::Column::Name.eq(TEST_COURSE_NAME))
            .one(&self.setup.db)
            .await?;

        match existing {
            Some(course) => Ok(course),
            None => self.insert_course(TEST_COURSE_NAME).await,
        }
    }

    /// Insert an active room on floor 1 of block A
    pub async fn insert_room(
        &self,
        room_number: &str,
        capacity: i32,
        occupied_seats: i32,
    ) -> Result<RoomModel, TestError> {
        Ok(entity::prelude::Room::insert(entity::room::ActiveModel {
            room_number: ActiveValue::Set(room_number.to_string()),
            capacity: ActiveValue::Set(capacity),
            occupied_seats: ActiveValue::Set(occupied_seats),
            floor: ActiveValue::Set(1),
            block: ActiveValue::Set("A".to_string()),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    pub async fn insert_inactive_room(&self, room_number: &str) -> Result<RoomModel, TestError> {
        let room = self.insert_room(room_number, 2, 0).await?;

        let mut room_am: entity::room::ActiveModel = room.into();
        room_am.is_active = ActiveValue::Set(false);

        Ok(room_am.update(&self.setup.db).await?)
    }

    /// Insert a user whose password hash is a placeholder that never verifies
    pub async fn insert_user(
        &self,
        email: &str,
        role: UserRole,
        verified: bool,
    ) -> Result<UserModel, TestError> {
        self.insert_user_with_hash(email, role, verified, TEST_PASSWORD_HASH_PLACEHOLDER)
            .await
    }

    /// Insert a user with a real argon2 hash of `password`
    pub async fn insert_user_with_password(
        &self,
        email: &str,
        role: UserRole,
        verified: bool,
        password: &str,
    ) -> Result<UserModel, TestError> {
        let salt = SaltString::encode_b64(&rand::random::<[u8; 16]>())
            .map_err(|e| TestError::PasswordHash(e.to_string()))?;
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| TestError::PasswordHash(e.to_string()))?
            .to_string();

        self.insert_user_with_hash(email, role, verified, &hash)
            .await
    }

    async fn insert_user_with_hash(
        &self,
        email: &str,
        role: UserRole,
        verified: bool,
        password_hash: &str,
    ) -> Result<UserModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::User::insert(entity::user::ActiveModel {
            name: ActiveValue::Set("Test User".to_string()),
            email: ActiveValue::Set(email.to_string()),
            password_hash: ActiveValue::Set(password_hash.to_string()),
            role: ActiveValue::Set(role),
            email_verified_at: ActiveValue::Set(verified.then_some(now)),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    pub async fn insert_admin(&self, email: &str) -> Result<UserModel, TestError> {
        self.insert_user(email, UserRole::Admin, true).await
    }

    /// Insert a verified student without a room
    ///
    /// The user email is derived from the roll number, e.g. `cs2023001@college.edu`.
    pub async fn insert_student(
        &self,
        roll_no: &str,
    ) -> Result<(UserModel, StudentProfileModel), TestError> {
        let user = self
            .insert_user(&student_email(roll_no), UserRole::Student, true)
            .await?;
        let profile = self.insert_profile(user.id, roll_no, None).await?;

        Ok((user, profile))
    }

    pub async fn insert_unverified_student(
        &self,
        roll_no: &str,
    ) -> Result<(UserModel, StudentProfileModel), TestError> {
        let user = self
            .insert_user(&student_email(roll_no), UserRole::Student, false)
            .await?;
        let profile = self.insert_profile(user.id, roll_no, None).await?;

        Ok((user, profile))
    }

    /// Insert a verified student occupying a seat in `room`
    ///
    /// The room's occupied seat count is incremented to keep occupancy consistent.
    pub async fn insert_student_in_room(
        &self,
        roll_no: &str,
        room: &RoomModel,
    ) -> Result<(UserModel, StudentProfileModel), TestError> {
        let user = self
            .insert_user(&student_email(roll_no), UserRole::Student, true)
            .await?;
        let profile = self.insert_profile(user.id, roll_no, Some(room.id)).await?;

        let current = entity::prelude::Room::find_by_id(room.id)
            .one(&self.setup.db)
            .await?
            .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("room {}", room.id)))?;
        let occupied_seats = current.occupied_seats + 1;
        let mut room_am: entity::room::ActiveModel = current.into();
        room_am.occupied_seats = ActiveValue::Set(occupied_seats);
        room_am.update(&self.setup.db).await?;

        Ok((user, profile))
    }

    async fn insert_profile(
        &self,
        user_id: i32,
        roll_no: &str,
        room_id: Option<i32>,
    ) -> Result<StudentProfileModel, TestError> {
        let course = self.default_course().await?;
        let date_of_birth =
            NaiveDate::from_ymd_opt(2004, 6, 15).ok_or_else(|| {
                sea_orm::DbErr::Custom("invalid test date of birth".to_string())
            })?;

        Ok(
            entity::prelude::StudentProfile::insert(entity::student_profile::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                roll_no: ActiveValue::Set(roll_no.to_string()),
                course_id: ActiveValue::Set(course.id),
                contact_no: ActiveValue::Set(TEST_CONTACT_NO.to_string()),
                date_of_birth: ActiveValue::Set(date_of_birth),
                address: ActiveValue::Set(TEST_ADDRESS.to_string()),
                room_id: ActiveValue::Set(room_id),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a fee structure with the standard test amounts, due in 30 days
    pub async fn insert_fee_structure(
        &self,
        year: i32,
        semester: Semester,
    ) -> Result<FeeStructureModel, TestError> {
        Ok(
            entity::prelude::FeeStructure::insert(entity::fee_structure::ActiveModel {
                year: ActiveValue::Set(year),
                semester: ActiveValue::Set(semester),
                single_room_fees: ActiveValue::Set(TEST_SINGLE_ROOM_FEES),
                double_room_fees: ActiveValue::Set(TEST_DOUBLE_ROOM_FEES),
                triple_room_fees: ActiveValue::Set(TEST_TRIPLE_ROOM_FEES),
                hostel_fees: ActiveValue::Set(TEST_HOSTEL_FEES),
                mess_fees: ActiveValue::Set(TEST_MESS_FEES),
                due_date: ActiveValue::Set(Utc::now().date_naive() + Duration::days(30)),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_payment(
        &self,
        student_id: i32,
        payment_type: PaymentType,
        amount: i64,
        paid_amount: i64,
        due_date: NaiveDate,
    ) -> Result<PaymentModel, TestError> {
        let status = if paid_amount >= amount {
            PaymentStatus::Paid
        } else if paid_amount > 0 {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Pending
        };
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::Payment::insert(entity::payment::ActiveModel {
            student_id: ActiveValue::Set(student_id),
            r#type: ActiveValue::Set(payment_type),
            amount: ActiveValue::Set(amount),
            paid_amount: ActiveValue::Set(paid_amount),
            due_date: ActiveValue::Set(due_date),
            status: ActiveValue::Set(status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    pub async fn insert_query(
        &self,
        student_id: i32,
        title: &str,
        status: QueryStatus,
    ) -> Result<QueryModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::Query::insert(entity::query::ActiveModel {
            student_id: ActiveValue::Set(student_id),
            title: ActiveValue::Set(title.to_string()),
            description: ActiveValue::Set(TEST_QUERY_DESCRIPTION.to_string()),
            status: ActiveValue::Set(status),
            admin_response: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    pub async fn insert_verification_token(
        &self,
        email: &str,
        token: &str,
        expires: NaiveDateTime,
    ) -> Result<VerificationTokenModel, TestError> {
        Ok(entity::prelude::VerificationToken::insert(
            entity::verification_token::ActiveModel {
                token: ActiveValue::Set(token.to_string()),
                identifier: ActiveValue::Set(email.to_string()),
                expires: ActiveValue::Set(expires),
            },
        )
        .exec_with_returning(&self.setup.db)
        .await?)
    }
}

/// Email address the student fixtures use for a roll number
pub fn student_email(roll_no: &str) -> String {
    format!("{}@college.edu", roll_no.to_lowercase())
}
