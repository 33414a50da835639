//! Payment recording.
//!
//! Payments are kept as one running row per student, fee type and month. A student
//! settles a month in full; partial amounts only arise from rows edited elsewhere and are
//! reported through the derived status.

use chrono::NaiveDate;
use entity::sea_orm_active_enums::{PaymentStatus, PaymentType};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::payment::PaymentDto,
    server::{
        data::payment::PaymentRepository,
        error::Error,
        model::db::PaymentModel,
        service::{
            fee::{payment_status, FeeService},
            retry::RetryContext,
        },
        util::time,
    },
};

pub struct PaymentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PaymentService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Settles a student's fee of `payment_type` for the month containing `month`.
    ///
    /// Reads or creates the month's payment row, priced by the fee resolver, and marks it as
    /// fully paid. Calling it again for a settled month leaves the row paid.
    ///
    /// # Returns
    /// - `Ok(PaymentDto)` - The settled payment row
    /// - `Err(Error::HostelError(HostelError::NotFound))` - No student with that ID
    pub async fn record_full_payment(
        &self,
        student_id: i32,
        payment_type: PaymentType,
        month: NaiveDate,
    ) -> Result<PaymentDto, Error> {
        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(
            &format!("record {:?} payment for student ID {}", payment_type, student_id),
            || {
                let db = db.clone();

                async move {
                    let txn = db.begin().await?;

                    let resolved = FeeService::new(&txn).resolve(student_id, month).await?;
                    let existing = match payment_type {
                        PaymentType::Hostel => resolved.hostel_payment.clone(),
                        PaymentType::Mess => resolved.mess_payment.clone(),
                    };

                    let payment_repo = PaymentRepository::new(&txn);
                    let payment = match existing {
                        Some(payment) => payment,
                        None => {
                            payment_repo
                                .create(
                                    student_id,
                                    payment_type,
                                    resolved.total(payment_type),
                                    resolved.month,
                                )
                                .await?
                        }
                    };

                    let amount = payment.amount;
                    let payment = payment_repo
                        .update_paid(payment, amount, payment_status(amount, amount))
                        .await?;
                    txn.commit().await?;

                    tracing::info!(
                        "Recorded {:?} payment of {} for student ID {} ({})",
                        payment_type,
                        amount,
                        student_id,
                        payment.due_date
                    );

                    Ok(payment_dto(payment))
                }
            },
        )
        .await
    }

    /// Settles the current month's fee.
    pub async fn record_current_payment(
        &self,
        student_id: i32,
        payment_type: PaymentType,
    ) -> Result<PaymentDto, Error> {
        self.record_full_payment(student_id, payment_type, time::today())
            .await
    }

    /// Lists a student's payment history, newest month first.
    pub async fn list_student_payments(&self, student_id: i32) -> Result<Vec<PaymentDto>, Error> {
        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(
            &format!("list payments for student ID {}", student_id),
            || {
                let db = db.clone();

                async move {
                    let payments = PaymentRepository::new(&db)
                        .get_many_by_student(student_id)
                        .await?;

                    Ok(payments.into_iter().map(payment_dto).collect())
                }
            },
        )
        .await
    }

    /// Lists all payments, optionally limited to one status.
    pub async fn list_payments(
        &self,
        status: Option<PaymentStatus>,
    ) -> Result<Vec<PaymentDto>, Error> {
        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry("list payments", || {
            let db = db.clone();

            async move {
                let payments = PaymentRepository::new(&db).get_all(status).await?;

                Ok(payments.into_iter().map(payment_dto).collect())
            }
        })
        .await
    }
}

pub fn payment_dto(payment: PaymentModel) -> PaymentDto {
    PaymentDto {
        balance: (payment.amount - payment.paid_amount).max(0),
        id: payment.id,
        student_id: payment.student_id,
        payment_type: payment.r#type,
        amount: payment.amount,
        paid_amount: payment.paid_amount,
        due_date: payment.due_date,
        status: payment.status,
        updated_at: payment.updated_at,
    }
}
