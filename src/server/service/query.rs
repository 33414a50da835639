//! Helpdesk query workflow.
//!
//! Students raise queries, admins move them through pending, in progress and resolved.
//! Resolving requires a written response. Resolved queries may be reopened.

use entity::sea_orm_active_enums::QueryStatus;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::query::{CreateQueryDto, QueryDto, UpdateQueryDto},
    server::{
        data::query::QueryRepository,
        error::{hostel::HostelError, Error},
        model::db::QueryModel,
        service::retry::RetryContext,
        util::validate::require_min_len,
    },
};

pub const MIN_TITLE_LEN: usize = 5;
pub const MIN_DESCRIPTION_LEN: usize = 20;

/// Whose queries a caller may see and touch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryScope {
    /// Every query
    Admin,
    /// Only queries raised by this student profile ID
    Student(i32),
}

impl QueryScope {
    fn student_id(&self) -> Option<i32> {
        match self {
            Self::Admin => None,
            Self::Student(student_id) => Some(*student_id),
        }
    }

    fn can_see(&self, query: &entity::query::Model) -> bool {
        match self {
            Self::Admin => true,
            Self::Student(student_id) => query.student_id == *student_id,
        }
    }
}

pub struct QueryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> QueryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Raises a new pending query for a student.
    ///
    /// # Returns
    /// - `Ok(QueryDto)` - Created query
    /// - `Err(Error::HostelError(HostelError::Validation))` - Title or description too short
    pub async fn create_query(
        &self,
        student_id: i32,
        payload: CreateQueryDto,
    ) -> Result<QueryDto, Error> {
        let title = require_min_len("Title", &payload.title, MIN_TITLE_LEN)?;
        let description =
            require_min_len("Description", &payload.description, MIN_DESCRIPTION_LEN)?;

        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(
            &format!("create query for student ID {}", student_id),
            || {
                let db = db.clone();
                let title = title.clone();
                let description = description.clone();

                async move {
                    let query = QueryRepository::new(&db)
                        .create(student_id, title, description)
                        .await?;

                    tracing::info!("Student ID {} raised query ID {}", student_id, query.id);

                    Ok(query_dto(query))
                }
            },
        )
        .await
    }

    /// Lists queries visible to `scope`, newest first.
    pub async fn list_queries(
        &self,
        scope: QueryScope,
        status: Option<QueryStatus>,
    ) -> Result<Vec<QueryDto>, Error> {
        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry("list queries", || {
            let db = db.clone();

            async move {
                let queries = QueryRepository::new(&db)
                    .get_many(scope.student_id(), status)
                    .await?;

                Ok(queries.into_iter().map(query_dto).collect())
            }
        })
        .await
    }

    /// Gets a query visible to `scope`.
    ///
    /// Queries of other students are reported as not found.
    pub async fn get_query(&self, query_id: i32, scope: QueryScope) -> Result<QueryDto, Error> {
        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("get query ID {}", query_id), || {
            let db = db.clone();

            async move {
                let query = QueryRepository::new(&db)
                    .get_by_id(query_id)
                    .await?
                    .filter(|query| scope.can_see(query))
                    .ok_or_else(|| query_not_found(query_id))?;

                Ok(query_dto(query))
            }
        })
        .await
    }

    /// Moves a query to a new status, optionally with an admin response.
    ///
    /// # Returns
    /// - `Ok(QueryDto)` - Updated query
    /// - `Err(Error::HostelError(HostelError::NotFound))` - No query with that ID
    /// - `Err(Error::HostelError(HostelError::Validation))` - Unknown status, or resolving
    ///   without a response
    pub async fn update_query(
        &self,
        query_id: i32,
        payload: UpdateQueryDto,
    ) -> Result<QueryDto, Error> {
        let status = QueryStatus::parse(payload.status.trim()).ok_or_else(|| {
            HostelError::validation("Status must be pending, in_progress or resolved")
        })?;
        let response = payload
            .admin_response
            .map(|response| response.trim().to_string());

        if status == QueryStatus::Resolved
            && response.as_deref().is_none_or(|response| response.is_empty())
        {
            return Err(
                HostelError::validation("A response is required to resolve a query").into(),
            );
        }

        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("update query ID {}", query_id), || {
            let db = db.clone();
            let response = response.clone();

            async move {
                let txn = db.begin().await?;
                let query_repo = QueryRepository::new(&txn);

                let query = query_repo
                    .get_by_id(query_id)
                    .await?
                    .ok_or_else(|| query_not_found(query_id))?;

                let response = response.or_else(|| query.admin_response.clone());
                let query = query_repo.update_status(query, status, response).await?;
                txn.commit().await?;

                tracing::info!("Query ID {} moved to {:?}", query.id, query.status);

                Ok(query_dto(query))
            }
        })
        .await
    }

    /// Deletes a query.
    ///
    /// Admins may delete any query, students only their own while it is still pending.
    pub async fn delete_query(&self, query_id: i32, scope: QueryScope) -> Result<(), Error> {
        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("delete query ID {}", query_id), || {
            let db = db.clone();

            async move {
                let txn = db.begin().await?;
                let query_repo = QueryRepository::new(&txn);

                let query = query_repo
                    .get_by_id(query_id)
                    .await?
                    .filter(|query| scope.can_see(query))
                    .ok_or_else(|| query_not_found(query_id))?;

                if scope != QueryScope::Admin && query.status != QueryStatus::Pending {
                    return Err(HostelError::validation(
                        "Only pending queries can be deleted",
                    )
                    .into());
                }

                query_repo.delete(query.id).await?;
                txn.commit().await?;

                tracing::info!("Deleted query ID {}", query_id);

                Ok(())
            }
        })
        .await
    }
}

pub fn query_dto(query: QueryModel) -> QueryDto {
    QueryDto {
        id: query.id,
        student_id: query.student_id,
        title: query.title,
        description: query.description,
        status: query.status,
        admin_response: query.admin_response,
        created_at: query.created_at,
        updated_at: query.updated_at,
    }
}

fn query_not_found(query_id: i32) -> Error {
    HostelError::not_found(format!("Query ID {} not found", query_id)).into()
}
