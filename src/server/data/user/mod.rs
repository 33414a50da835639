use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::UserRole;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter,
};

use crate::server::util::time;

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new user
    ///
    /// Students are created unverified, seeded admins pass `Some(_)` for `email_verified_at`.
    pub async fn create(
        &self,
        name: String,
        email: String,
        password_hash: String,
        role: UserRole,
        email_verified_at: Option<NaiveDateTime>,
    ) -> Result<entity::user::Model, DbErr> {
        let user = entity::user::ActiveModel {
            name: ActiveValue::Set(name),
            email: ActiveValue::Set(email),
            password_hash: ActiveValue::Set(password_hash),
            role: ActiveValue::Set(role),
            email_verified_at: ActiveValue::Set(email_verified_at),
            created_at: ActiveValue::Set(time::now()),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    pub async fn get_by_id(&self, user_id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(user_id).one(self.db).await
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    pub async fn update_name(
        &self,
        user_id: i32,
        name: String,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        let user = match entity::prelude::User::find_by_id(user_id).one(self.db).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        let mut user_am = user.into_active_model();
        user_am.name = ActiveValue::Set(name);

        let user = user_am.update(self.db).await?;

        Ok(Some(user))
    }

    /// Marks the user owning `email` as verified
    ///
    /// Returns `Ok(None)` if no user has that email.
    pub async fn mark_email_verified(
        &self,
        email: &str,
        verified_at: NaiveDateTime,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        let user = match self.get_by_email(email).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        let mut user_am = user.into_active_model();
        user_am.email_verified_at = ActiveValue::Set(Some(verified_at));

        let user = user_am.update(self.db).await?;

        Ok(Some(user))
    }

    pub async fn count_by_role(&self, role: UserRole) -> Result<u64, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Role.eq(role))
            .count(self.db)
            .await
    }

    /// Deletes a user
    ///
    /// Returns OK regardless of user existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, user_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::User::delete_by_id(user_id)
            .exec(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {

    mod create {
        use entity::sea_orm_active_enums::UserRole;
        use hostel_test_utils::prelude::*;

        use crate::server::data::user::UserRepository;

        /// Expect success when creating a new user
        #[tokio::test]
        async fn creates_user() -> Result<(), TestError> {
            let test = test_setup_with_hostel_tables!()?;

            let user_repository = UserRepository::new(&test.db);
            let result = user_repository
                .create(
                    "Asha".to_string(),
                    "asha@college.edu".to_string(),
                    "hash".to_string(),
                    UserRole::Student,
                    None,
                )
                .await;

            assert!(result.is_ok());
            let user = result.unwrap();
            assert_eq!(user.role, UserRole::Student);
            assert!(user.email_verified_at.is_none());

            Ok(())
        }

        /// Expect Error when email is already taken
        #[tokio::test]
        async fn fails_for_duplicate_email() -> Result<(), TestError> {
            let test = test_setup_with_hostel_tables!()?;
            let existing = test.hostel().insert_admin("admin@college.edu").await?;

            let user_repository = UserRepository::new(&test.db);
            let result = user_repository
                .create(
                    "Other".to_string(),
                    existing.email,
                    "hash".to_string(),
                    UserRole::Student,
                    None,
                )
                .await;

            assert!(result.is_err());

            Ok(())
        }
    }

    mod get_by_email {
        use hostel_test_utils::prelude::*;

        use crate::server::data::user::UserRepository;

        /// Expect Ok(Some(_)) when a user with the email exists
        #[tokio::test]
        async fn finds_existing_user() -> Result<(), TestError> {
            let test = test_setup_with_hostel_tables!()?;
            let admin = test.hostel().insert_admin("admin@college.edu").await?;

            let user_repo = UserRepository::new(&test.db);
            let result = user_repo.get_by_email("admin@college.edu").await;

            assert!(matches!(result, Ok(Some(ref user)) if user.id == admin.id));

            Ok(())
        }

        /// Expect Ok(None) when no user has the email
        #[tokio::test]
        async fn returns_none_for_unknown_email() -> Result<(), TestError> {
            let test = test_setup_with_hostel_tables!()?;

            let user_repo = UserRepository::new(&test.db);
            let result = user_repo.get_by_email("nobody@college.edu").await;

            assert!(matches!(result, Ok(None)));

            Ok(())
        }

        /// Expect Error when required database tables are not present
        #[tokio::test]
        async fn fails_when_tables_missing() -> Result<(), TestError> {
            let test = test_setup_with_tables!()?;

            let user_repo = UserRepository::new(&test.db);
            let result = user_repo.get_by_email("admin@college.edu").await;

            assert!(result.is_err());

            Ok(())
        }
    }

    mod mark_email_verified {
        use hostel_test_utils::prelude::*;

        use crate::server::{data::user::UserRepository, util::time};

        /// Expect verification timestamp to be set on the matching user
        #[tokio::test]
        async fn sets_verified_timestamp() -> Result<(), TestError> {
            let test = test_setup_with_hostel_tables!()?;
            let (user, _) = test.hostel().insert_unverified_student("CS2023001").await?;

            let user_repo = UserRepository::new(&test.db);
            let result = user_repo.mark_email_verified(&user.email, time::now()).await;

            assert!(matches!(result, Ok(Some(ref u)) if u.email_verified_at.is_some()));

            Ok(())
        }

        /// Expect Ok(None) when no user has the email
        #[tokio::test]
        async fn returns_none_for_unknown_email() -> Result<(), TestError> {
            let test = test_setup_with_hostel_tables!()?;

            let user_repo = UserRepository::new(&test.db);
            let result = user_repo
                .mark_email_verified("nobody@college.edu", time::now())
                .await;

            assert!(matches!(result, Ok(None)));

            Ok(())
        }
    }

    mod delete {
        use hostel_test_utils::prelude::*;
        use sea_orm::EntityTrait;

        use crate::server::data::user::UserRepository;

        /// Expect success when deleting user
        #[tokio::test]
        async fn deletes_existing_user() -> Result<(), TestError> {
            let test = test_setup_with_hostel_tables!()?;
            let user_model = test.hostel().insert_admin("admin@college.edu").await?;

            let user_repository = UserRepository::new(&test.db);
            let result = user_repository.delete(user_model.id).await;

            assert!(result.is_ok());
            assert_eq!(result.unwrap().rows_affected, 1);
            // Ensure user has actually been deleted
            let user_exists = entity::prelude::User::find_by_id(user_model.id)
                .one(&test.db)
                .await?;
            assert!(user_exists.is_none());

            Ok(())
        }

        /// Expect no rows to be affected when deleting user that does not exist
        #[tokio::test]
        async fn returns_no_rows_for_nonexistent_user() -> Result<(), TestError> {
            let test = test_setup_with_hostel_tables!()?;

            let user_repository = UserRepository::new(&test.db);
            let result = user_repository.delete(1).await;

            assert!(result.is_ok());
            assert_eq!(result.unwrap().rows_affected, 0);

            Ok(())
        }
    }
}
