use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    QueryFilter,
};

pub struct VerificationTokenRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> VerificationTokenRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Stores a verification token for an email address
    pub async fn create(
        &self,
        token: String,
        identifier: String,
        expires: NaiveDateTime,
    ) -> Result<entity::verification_token::Model, DbErr> {
        let token = entity::verification_token::ActiveModel {
            token: ActiveValue::Set(token),
            identifier: ActiveValue::Set(identifier),
            expires: ActiveValue::Set(expires),
        };

        token.insert(self.db).await
    }

    pub async fn get(
        &self,
        token: &str,
    ) -> Result<Option<entity::verification_token::Model>, DbErr> {
        entity::prelude::VerificationToken::find_by_id(token.to_string())
            .one(self.db)
            .await
    }

    pub async fn delete(&self, token: &str) -> Result<DeleteResult, DbErr> {
        entity::prelude::VerificationToken::delete_by_id(token.to_string())
            .exec(self.db)
            .await
    }

    /// Deletes every token issued for an email address
    pub async fn delete_by_identifier(&self, identifier: &str) -> Result<DeleteResult, DbErr> {
        entity::prelude::VerificationToken::delete_many()
            .filter(entity::verification_token::Column::Identifier.eq(identifier))
            .exec(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {

    mod get {
        use chrono::{Duration, Utc};
        use hostel_test_utils::prelude::*;

        use crate::server::data::verification_token::VerificationTokenRepository;

        /// Expect a stored token to be found by value
        #[tokio::test]
        async fn finds_stored_token() -> Result<(), TestError> {
            let test = test_setup_with_hostel_tables!()?;
            let expires = Utc::now().naive_utc() + Duration::hours(24);
            test.hostel()
                .insert_verification_token("cs2023001@college.edu", "abc123", expires)
                .await?;

            let repo = VerificationTokenRepository::new(&test.db);
            let token = repo.get("abc123").await?;

            assert_eq!(
                token.map(|t| t.identifier),
                Some("cs2023001@college.edu".to_string())
            );

            Ok(())
        }
    }

    mod delete {
        use chrono::{Duration, Utc};
        use hostel_test_utils::prelude::*;

        use crate::server::data::verification_token::VerificationTokenRepository;

        /// Expect the token to be gone after deletion
        #[tokio::test]
        async fn deletes_token() -> Result<(), TestError> {
            let test = test_setup_with_hostel_tables!()?;
            let expires = Utc::now().naive_utc() + Duration::hours(24);
            test.hostel()
                .insert_verification_token("cs2023001@college.edu", "abc123", expires)
                .await?;

            let repo = VerificationTokenRepository::new(&test.db);
            let result = repo.delete("abc123").await?;

            assert_eq!(result.rows_affected, 1);
            assert!(repo.get("abc123").await?.is_none());

            Ok(())
        }
    }
}
