//! Student administration and self-service profile management.

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::student::{StudentDto, UpdateProfileDto},
    server::{
        data::{
            course::CourseRepository, payment::PaymentRepository, query::QueryRepository,
            room::RoomRepository, student::StudentProfileRepository, user::UserRepository,
            verification_token::VerificationTokenRepository,
        },
        error::{hostel::HostelError, Error},
        service::retry::RetryContext,
        util::validate::{is_valid_contact_no, require_non_empty},
    },
};

pub struct StudentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StudentService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists every student with their account, course and room, ordered by roll number.
    pub async fn list_students(&self) -> Result<Vec<StudentDto>, Error> {
        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry("list students", || {
            let db = db.clone();

            async move {
                let students = StudentProfileRepository::new(&db)
                    .get_all_with_user()
                    .await?;
                let courses: HashMap<i32, String> = CourseRepository::new(&db)
                    .get_all()
                    .await?
                    .into_iter()
                    .map(|course| (course.id, course.name))
                    .collect();
                let rooms: HashMap<i32, String> = RoomRepository::new(&db)
                    .get_all(false)
                    .await?
                    .into_iter()
                    .map(|room| (room.id, room.room_number))
                    .collect();

                students
                    .into_iter()
                    .map(|(profile, user)| {
                        let user = user.ok_or_else(|| missing_user(&profile))?;
                        let course_name = courses.get(&profile.course_id).cloned();
                        let room_number = profile
                            .room_id
                            .and_then(|room_id| rooms.get(&room_id).cloned());

                        Ok(student_dto(profile, user, course_name, room_number))
                    })
                    .collect::<Result<Vec<_>, Error>>()
            }
        })
        .await
    }

    /// Gets a student by profile ID.
    ///
    /// # Returns
    /// - `Ok(StudentDto)` - Student found
    /// - `Err(Error::HostelError(HostelError::NotFound))` - No student with that ID
    pub async fn get_student(&self, student_id: i32) -> Result<StudentDto, Error> {
        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("get student ID {}", student_id), || {
            let db = db.clone();

            async move {
                let profile = StudentProfileRepository::new(&db)
                    .get_by_id(student_id)
                    .await?
                    .ok_or_else(|| student_not_found(student_id))?;

                load_student(&db, profile).await
            }
        })
        .await
    }

    /// Gets the profile owned by a user account.
    ///
    /// # Returns
    /// - `Ok(StudentDto)` - Profile of the user
    /// - `Err(Error::HostelError(HostelError::NotFound))` - The user has no student profile
    pub async fn get_by_user(&self, user_id: i32) -> Result<StudentDto, Error> {
        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("get profile of user ID {}", user_id), || {
            let db = db.clone();

            async move {
                let profile = StudentProfileRepository::new(&db)
                    .get_by_user_id(user_id)
                    .await?
                    .ok_or_else(|| profile_not_found(user_id))?;

                load_student(&db, profile).await
            }
        })
        .await
    }

    /// Updates the name and contact details a student may edit themselves.
    ///
    /// # Returns
    /// - `Ok(StudentDto)` - Updated profile
    /// - `Err(Error::HostelError(HostelError::Validation))` - Blank name or address, or a
    ///   contact number that is not ten digits
    /// - `Err(Error::HostelError(HostelError::NotFound))` - The user has no student profile
    pub async fn update_profile(
        &self,
        user_id: i32,
        payload: UpdateProfileDto,
    ) -> Result<StudentDto, Error> {
        let name = payload
            .name
            .as_deref()
            .map(|name| require_non_empty("Name", name))
            .transpose()?;
        let address = payload
            .address
            .as_deref()
            .map(|address| require_non_empty("Address", address))
            .transpose()?;
        let contact_no = payload.contact_no.map(|c| c.trim().to_string());
        if let Some(contact_no) = &contact_no {
            if !is_valid_contact_no(contact_no) {
                return Err(
                    HostelError::validation("Contact number must be exactly 10 digits").into(),
                );
            }
        }

        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("update profile of user ID {}", user_id), || {
            let db = db.clone();
            let name = name.clone();
            let address = address.clone();
            let contact_no = contact_no.clone();

            async move {
                let txn = db.begin().await?;

                let profile = StudentProfileRepository::new(&txn)
                    .get_by_user_id(user_id)
                    .await?
                    .ok_or_else(|| profile_not_found(user_id))?;

                if let Some(name) = name {
                    UserRepository::new(&txn).update_name(user_id, name).await?;
                }
                let profile = StudentProfileRepository::new(&txn)
                    .update_contact(profile, contact_no, address)
                    .await?;

                let student = load_student(&txn, profile).await?;
                txn.commit().await?;

                Ok(student)
            }
        })
        .await
    }

    /// Deletes a student and everything they own.
    ///
    /// Frees the student's seat, then removes payments, queries, pending verification
    /// tokens, the profile and finally the user account, all in one transaction.
    ///
    /// # Returns
    /// - `Ok(())` - Student deleted
    /// - `Err(Error::HostelError(HostelError::NotFound))` - No student with that ID
    pub async fn delete_student(&self, student_id: i32) -> Result<(), Error> {
        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("delete student ID {}", student_id), || {
            let db = db.clone();

            async move {
                let txn = db.begin().await?;

                let profile = StudentProfileRepository::new(&txn)
                    .get_by_id(student_id)
                    .await?
                    .ok_or_else(|| student_not_found(student_id))?;

                if let Some(room_id) = profile.room_id {
                    RoomRepository::new(&txn)
                        .decrement_occupancy(room_id)
                        .await?;
                }

                PaymentRepository::new(&txn)
                    .delete_by_student(profile.id)
                    .await?;
                QueryRepository::new(&txn)
                    .delete_by_student(profile.id)
                    .await?;
                StudentProfileRepository::new(&txn)
                    .delete(profile.id)
                    .await?;

                let user_repo = UserRepository::new(&txn);
                if let Some(user) = user_repo.get_by_id(profile.user_id).await? {
                    VerificationTokenRepository::new(&txn)
                        .delete_by_identifier(&user.email)
                        .await?;
                    user_repo.delete(user.id).await?;
                }

                txn.commit().await?;

                tracing::info!(
                    "Deleted student {} (ID {})",
                    profile.roll_no,
                    profile.id
                );

                Ok(())
            }
        })
        .await
    }
}

/// Loads the user, course and room of a profile into a [`StudentDto`].
async fn load_student<C: ConnectionTrait>(
    db: &C,
    profile: entity::student_profile::Model,
) -> Result<StudentDto, Error> {
    let user = UserRepository::new(db)
        .get_by_id(profile.user_id)
        .await?
        .ok_or_else(|| missing_user(&profile))?;
    let course_name = CourseRepository::new(db)
        .get_by_id(profile.course_id)
        .await?
        .map(|course| course.name);
    let room_number = match profile.room_id {
        Some(room_id) => RoomRepository::new(db)
            .get_by_id(room_id)
            .await?
            .map(|room| room.room_number),
        None => None,
    };

    Ok(student_dto(profile, user, course_name, room_number))
}

pub fn student_dto(
    profile: entity::student_profile::Model,
    user: entity::user::Model,
    course_name: Option<String>,
    room_number: Option<String>,
) -> StudentDto {
    StudentDto {
        id: profile.id,
        user_id: user.id,
        name: user.name,
        email: user.email,
        email_verified: user.email_verified_at.is_some(),
        roll_no: profile.roll_no,
        course_id: profile.course_id,
        course_name,
        contact_no: profile.contact_no,
        date_of_birth: profile.date_of_birth,
        address: profile.address,
        room_id: profile.room_id,
        room_number,
    }
}

fn student_not_found(student_id: i32) -> Error {
    HostelError::not_found(format!("Student ID {} not found", student_id)).into()
}

fn profile_not_found(user_id: i32) -> Error {
    HostelError::not_found(format!("No student profile for user ID {}", user_id)).into()
}

// Only reachable if the user foreign key is not enforced
fn missing_user(profile: &entity::student_profile::Model) -> Error {
    Error::InternalError(format!(
        "Failed to find user ID {} for student profile ID {}",
        profile.user_id, profile.id
    ))
}
