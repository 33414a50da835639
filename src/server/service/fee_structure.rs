//! Fee structure administration.
//!
//! At most one fee structure exists per (year, semester). The uniqueness check runs in the
//! same transaction as the write and is backed by a unique index in the schema.

use entity::sea_orm_active_enums::Semester;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::fee::{FeeStructureDto, FeeStructureInputDto},
    server::{
        data::fee_structure::{FeeStructureParams, FeeStructureRepository},
        error::{hostel::HostelError, Error},
        service::retry::RetryContext,
        util::time,
    },
};

pub const MIN_FEE_YEAR: i32 = 2000;
pub const MAX_FEE_YEAR: i32 = 2100;

pub struct FeeStructureService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FeeStructureService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists fee structures newest first.
    pub async fn list_fee_structures(&self) -> Result<Vec<FeeStructureDto>, Error> {
        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry("list fee structures", || {
            let db = db.clone();

            async move {
                let structures = FeeStructureRepository::new(&db).get_all().await?;

                Ok(structures.into_iter().map(fee_structure_dto).collect())
            }
        })
        .await
    }

    /// Gets the fee structure currently in force, if any has been published.
    pub async fn get_latest(&self) -> Result<Option<FeeStructureDto>, Error> {
        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry("get latest fee structure", || {
            let db = db.clone();

            async move {
                let latest = FeeStructureRepository::new(&db).get_latest().await?;

                Ok(latest.map(fee_structure_dto))
            }
        })
        .await
    }

    /// Publishes a fee structure for a new (year, semester).
    ///
    /// # Returns
    /// - `Ok(FeeStructureDto)` - Created fee structure
    /// - `Err(Error::HostelError(HostelError::Validation))` - Invalid amounts, period or due date
    /// - `Err(Error::HostelError(HostelError::Conflict))` - Period already has a fee structure
    pub async fn create_fee_structure(
        &self,
        payload: FeeStructureInputDto,
    ) -> Result<FeeStructureDto, Error> {
        let params = validate_fee_structure(&payload, time::today())?;

        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(
            &format!(
                "create fee structure for {} {}",
                params.year,
                params.semester.as_str()
            ),
            || {
                let db = db.clone();
                let params = params.clone();

                async move {
                    let txn = db.begin().await?;
                    let fee_repo = FeeStructureRepository::new(&txn);

                    if fee_repo
                        .find_by_period(params.year, params.semester, None)
                        .await?
                        .is_some()
                    {
                        return Err(duplicate_period(params.year, params.semester));
                    }

                    let structure = fee_repo.create(params).await?;
                    txn.commit().await?;

                    tracing::info!(
                        "Created fee structure for {} {} (ID {})",
                        structure.year,
                        structure.semester.as_str(),
                        structure.id
                    );

                    Ok(fee_structure_dto(structure))
                }
            },
        )
        .await
    }

    /// Replaces every field of an existing fee structure.
    ///
    /// # Returns
    /// - `Ok(FeeStructureDto)` - Updated fee structure
    /// - `Err(Error::HostelError(HostelError::NotFound))` - No fee structure with that ID
    /// - `Err(Error::HostelError(HostelError::Validation))` - Invalid amounts, period or due date
    /// - `Err(Error::HostelError(HostelError::Conflict))` - Another structure covers the period
    pub async fn update_fee_structure(
        &self,
        fee_structure_id: i32,
        payload: FeeStructureInputDto,
    ) -> Result<FeeStructureDto, Error> {
        let params = validate_fee_structure(&payload, time::today())?;

        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(
            &format!("update fee structure ID {}", fee_structure_id),
            || {
                let db = db.clone();
                let params = params.clone();

                async move {
                    let txn = db.begin().await?;
                    let fee_repo = FeeStructureRepository::new(&txn);

                    if fee_repo.get_by_id(fee_structure_id).await?.is_none() {
                        return Err(fee_structure_not_found(fee_structure_id));
                    }

                    if fee_repo
                        .find_by_period(params.year, params.semester, Some(fee_structure_id))
                        .await?
                        .is_some()
                    {
                        return Err(duplicate_period(params.year, params.semester));
                    }

                    let structure = fee_repo
                        .update(fee_structure_id, params)
                        .await?
                        .ok_or_else(|| fee_structure_not_found(fee_structure_id))?;
                    txn.commit().await?;

                    tracing::info!("Updated fee structure ID {}", structure.id);

                    Ok(fee_structure_dto(structure))
                }
            },
        )
        .await
    }

    /// Deletes a fee structure, recorded payments keep their amounts.
    pub async fn delete_fee_structure(&self, fee_structure_id: i32) -> Result<(), Error> {
        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(
            &format!("delete fee structure ID {}", fee_structure_id),
            || {
                let db = db.clone();

                async move {
                    let result = FeeStructureRepository::new(&db)
                        .delete(fee_structure_id)
                        .await?;

                    if result.rows_affected == 0 {
                        return Err(fee_structure_not_found(fee_structure_id));
                    }

                    tracing::info!("Deleted fee structure ID {}", fee_structure_id);

                    Ok(())
                }
            },
        )
        .await
    }
}

/// Validates a fee structure body against the date it is saved on.
pub fn validate_fee_structure(
    payload: &FeeStructureInputDto,
    today: chrono::NaiveDate,
) -> Result<FeeStructureParams, Error> {
    if !(MIN_FEE_YEAR..=MAX_FEE_YEAR).contains(&payload.year) {
        return Err(HostelError::validation(format!(
            "Year must be between {} and {}",
            MIN_FEE_YEAR, MAX_FEE_YEAR
        ))
        .into());
    }

    let semester = Semester::parse(payload.semester.trim()).ok_or_else(|| {
        HostelError::validation("Semester must be JAN-MAY or JUL-DEC")
    })?;

    let amounts = [
        ("Single room fees", payload.single_room_fees),
        ("Double room fees", payload.double_room_fees),
        ("Triple room fees", payload.triple_room_fees),
        ("Hostel fees", payload.hostel_fees),
        ("Mess fees", payload.mess_fees),
    ];
    if let Some((field, _)) = amounts.iter().find(|(_, amount)| *amount < 0) {
        return Err(HostelError::validation(format!("{} cannot be negative", field)).into());
    }

    let due_date = time::parse_date("Due date", &payload.due_date)?;
    let earliest = time::earliest_fee_due_date(today);
    if due_date < earliest {
        return Err(HostelError::validation(format!(
            "Due date must be on or after {}",
            earliest
        ))
        .into());
    }

    Ok(FeeStructureParams {
        year: payload.year,
        semester,
        single_room_fees: payload.single_room_fees,
        double_room_fees: payload.double_room_fees,
        triple_room_fees: payload.triple_room_fees,
        hostel_fees: payload.hostel_fees,
        mess_fees: payload.mess_fees,
        due_date,
    })
}

pub fn fee_structure_dto(structure: entity::fee_structure::Model) -> FeeStructureDto {
    FeeStructureDto {
        id: structure.id,
        year: structure.year,
        semester: structure.semester,
        single_room_fees: structure.single_room_fees,
        double_room_fees: structure.double_room_fees,
        triple_room_fees: structure.triple_room_fees,
        hostel_fees: structure.hostel_fees,
        mess_fees: structure.mess_fees,
        due_date: structure.due_date,
        created_at: structure.created_at,
    }
}

fn duplicate_period(year: i32, semester: Semester) -> Error {
    HostelError::conflict(format!(
        "Fee structure for {} {} already exists",
        year,
        semester.as_str()
    ))
    .into()
}

fn fee_structure_not_found(fee_structure_id: i32) -> Error {
    HostelError::not_found(format!("Fee structure ID {} not found", fee_structure_id)).into()
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use crate::{model::fee::FeeStructureInputDto, server::util::time};

    fn input(year: i32, semester: &str) -> FeeStructureInputDto {
        FeeStructureInputDto {
            year,
            semester: semester.to_string(),
            single_room_fees: 15000,
            double_room_fees: 12000,
            triple_room_fees: 10000,
            hostel_fees: 8000,
            mess_fees: 6000,
            due_date: (time::today() + Duration::days(20))
                .format("%Y-%m-%d")
                .to_string(),
        }
    }

    mod validate_fee_structure {
        use chrono::{Duration, NaiveDate};

        use super::input;
        use crate::server::{
            error::{hostel::HostelError, Error},
            service::fee_structure::validate_fee_structure,
        };

        fn today() -> NaiveDate {
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        }

        /// Expect a due date exactly ten days out to be accepted
        #[test]
        fn accepts_minimum_lead_time() {
            let mut payload = input(2025, "JUL-DEC");
            payload.due_date = "2025-06-11".to_string();

            let params = validate_fee_structure(&payload, today()).unwrap();

            assert_eq!(params.due_date, today() + Duration::days(10));
        }

        /// Expect every invalid field to be rejected with a validation error
        #[test]
        fn rejects_invalid_fields() {
            let mut early = input(2025, "JUL-DEC");
            early.due_date = "2025-06-10".to_string();
            let mut malformed = input(2025, "JUL-DEC");
            malformed.due_date = "10/07/2025".to_string();
            let mut negative = input(2025, "JUL-DEC");
            negative.mess_fees = -1;

            for payload in [
                early,
                malformed,
                negative,
                input(1999, "JUL-DEC"),
                input(2101, "JUL-DEC"),
                input(2025, "AUG-NOV"),
            ] {
                let result = validate_fee_structure(&payload, today());
                assert!(matches!(
                    result,
                    Err(Error::HostelError(HostelError::Validation(_)))
                ));
            }
        }
    }

    mod create_fee_structure {
        use entity::sea_orm_active_enums::Semester;
        use hostel_test_utils::prelude::*;

        use super::input;
        use crate::server::{
            data::fee_structure::FeeStructureRepository,
            error::{hostel::HostelError, Error},
            service::fee_structure::FeeStructureService,
        };

        /// Expect a new period to be stored
        #[tokio::test]
        async fn creates_fee_structure() -> Result<(), TestError> {
            let test = test_setup_with_hostel_tables!()?;

            let service = FeeStructureService::new(&test.db);
            let created = service
                .create_fee_structure(input(2025, "JUL-DEC"))
                .await
                .unwrap();

            assert_eq!(created.semester, Semester::JulDec);
            assert_eq!(created.hostel_fees, 8000);

            Ok(())
        }

        /// Expect Conflict naming the period and no new row for a duplicate period
        #[tokio::test]
        async fn rejects_duplicate_period() -> Result<(), TestError> {
            let test = test_setup_with_hostel_tables!()?;
            test.hostel()
                .insert_fee_structure(2025, Semester::JulDec)
                .await?;

            let service = FeeStructureService::new(&test.db);
            let result = service.create_fee_structure(input(2025, "JUL-DEC")).await;

            match result {
                Err(Error::HostelError(HostelError::Conflict(message))) => {
                    assert_eq!(message, "Fee structure for 2025 JUL-DEC already exists");
                }
                other => panic!("Expected conflict, got: {:?}", other),
            }
            let rows = FeeStructureRepository::new(&test.db).get_all().await?;
            assert_eq!(rows.len(), 1);

            Ok(())
        }
    }

    mod update_fee_structure {
        use entity::sea_orm_active_enums::Semester;
        use hostel_test_utils::prelude::*;

        use super::input;
        use crate::server::{
            error::{hostel::HostelError, Error},
            service::fee_structure::FeeStructureService,
        };

        /// Expect a structure to keep its own period without conflicting with itself
        #[tokio::test]
        async fn updates_own_period() -> Result<(), TestError> {
            let test = test_setup_with_hostel_tables!()?;
            let existing = test
                .hostel()
                .insert_fee_structure(2025, Semester::JulDec)
                .await?;

            let mut payload = input(2025, "JUL-DEC");
            payload.mess_fees = 6500;

            let service = FeeStructureService::new(&test.db);
            let updated = service
                .update_fee_structure(existing.id, payload)
                .await
                .unwrap();

            assert_eq!(updated.id, existing.id);
            assert_eq!(updated.mess_fees, 6500);

            Ok(())
        }

        /// Expect Conflict when moving onto another structure's period
        #[tokio::test]
        async fn rejects_other_structures_period() -> Result<(), TestError> {
            let test = test_setup_with_hostel_tables!()?;
            test.hostel()
                .insert_fee_structure(2025, Semester::JanMay)
                .await?;
            let other = test
                .hostel()
                .insert_fee_structure(2025, Semester::JulDec)
                .await?;

            let service = FeeStructureService::new(&test.db);
            let result = service
                .update_fee_structure(other.id, input(2025, "JAN-MAY"))
                .await;

            assert!(matches!(
                result,
                Err(Error::HostelError(HostelError::Conflict(_)))
            ));

            Ok(())
        }

        /// Expect NotFound for a structure that does not exist
        #[tokio::test]
        async fn fails_for_missing_structure() -> Result<(), TestError> {
            let test = test_setup_with_hostel_tables!()?;

            let service = FeeStructureService::new(&test.db);
            let result = service
                .update_fee_structure(1, input(2025, "JAN-MAY"))
                .await;

            assert!(matches!(
                result,
                Err(Error::HostelError(HostelError::NotFound(_)))
            ));

            Ok(())
        }
    }

    mod delete_fee_structure {
        use chrono::Duration;
        use entity::sea_orm_active_enums::{PaymentType, Semester};
        use hostel_test_utils::prelude::*;

        use crate::server::{
            data::payment::PaymentRepository,
            error::{hostel::HostelError, Error},
            service::fee_structure::FeeStructureService,
            util::time,
        };

        /// Expect deletion to leave recorded payments untouched
        #[tokio::test]
        async fn keeps_payments() -> Result<(), TestError> {
            let test = test_setup_with_hostel_tables!()?;
            let structure = test
                .hostel()
                .insert_fee_structure(2025, Semester::JulDec)
                .await?;
            let (_, student) = test.hostel().insert_student("CS2023001").await?;
            let month = time::first_of_month(time::today() - Duration::days(40));
            test.hostel()
                .insert_payment(student.id, PaymentType::Hostel, 23000, 23000, month)
                .await?;

            let service = FeeStructureService::new(&test.db);
            service.delete_fee_structure(structure.id).await.unwrap();

            assert!(service.get_latest().await.unwrap().is_none());
            assert_eq!(
                PaymentRepository::new(&test.db)
                    .get_all(None)
                    .await?
                    .len(),
                1
            );

            Ok(())
        }

        /// Expect NotFound for a structure that does not exist
        #[tokio::test]
        async fn fails_for_missing_structure() -> Result<(), TestError> {
            let test = test_setup_with_hostel_tables!()?;

            let service = FeeStructureService::new(&test.db);
            let result = service.delete_fee_structure(1).await;

            assert!(matches!(
                result,
                Err(Error::HostelError(HostelError::NotFound(_)))
            ));

            Ok(())
        }
    }
}
