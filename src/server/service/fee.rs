//! Fee resolution.
//!
//! Works out what a student owes for a month from the latest fee structure, the type of
//! their room and any payment rows already recorded. Nothing here writes to the database,
//! so the same resolver serves the fee summary endpoints and the payment transaction.

use chrono::{Duration, NaiveDate};
use entity::sea_orm_active_enums::{PaymentStatus, PaymentType, Semester};
use sea_orm::ConnectionTrait;

use crate::{
    model::{
        fee::{FeeBreakdownDto, FeeSummaryDto},
        room::RoomType,
    },
    server::{
        data::{
            fee_structure::FeeStructureRepository, payment::PaymentRepository,
            room::RoomRepository, student::StudentProfileRepository,
        },
        error::{hostel::HostelError, Error},
        model::db::{FeeStructureModel, PaymentModel, RoomModel, StudentProfileModel},
        util::time::{self, DEFAULT_PAYMENT_WINDOW_DAYS},
    },
};

/// Room type label for students without a room
pub const NOT_ASSIGNED: &str = "Not Assigned";

/// Fee amounts in force for a billing period.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeeRates {
    pub year: Option<i32>,
    pub semester: Option<Semester>,
    pub single_room_fees: i64,
    pub double_room_fees: i64,
    pub triple_room_fees: i64,
    pub hostel_fees: i64,
    pub mess_fees: i64,
    pub due_date: Option<NaiveDate>,
    pub is_default: bool,
}

impl FeeRates {
    /// Fallback amounts used while no fee structure has been published
    pub fn default_table() -> Self {
        Self {
            year: None,
            semester: None,
            single_room_fees: 15000,
            double_room_fees: 12000,
            triple_room_fees: 10000,
            hostel_fees: 8000,
            mess_fees: 6000,
            due_date: None,
            is_default: true,
        }
    }

    pub fn from_structure(structure: &FeeStructureModel) -> Self {
        Self {
            year: Some(structure.year),
            semester: Some(structure.semester),
            single_room_fees: structure.single_room_fees,
            double_room_fees: structure.double_room_fees,
            triple_room_fees: structure.triple_room_fees,
            hostel_fees: structure.hostel_fees,
            mess_fees: structure.mess_fees,
            due_date: Some(structure.due_date),
            is_default: false,
        }
    }

    /// Surcharge for the room type, 0 without a room
    pub fn room_type_fee(&self, room_type: Option<RoomType>) -> i64 {
        match room_type {
            Some(RoomType::Single) => self.single_room_fees,
            Some(RoomType::Double) => self.double_room_fees,
            Some(RoomType::Triple) => self.triple_room_fees,
            None => 0,
        }
    }

    /// Base fee and room type fee for a payment type
    pub fn components(&self, payment_type: PaymentType, room_type: Option<RoomType>) -> (i64, i64) {
        match payment_type {
            PaymentType::Hostel => (self.hostel_fees, self.room_type_fee(room_type)),
            PaymentType::Mess => (self.mess_fees, 0),
        }
    }

    /// Total owed for a payment type
    pub fn total(&self, payment_type: PaymentType, room_type: Option<RoomType>) -> i64 {
        let (base_fee, room_type_fee) = self.components(payment_type, room_type);
        base_fee + room_type_fee
    }
}

/// Derives a payment's status from the amount owed and the amount paid.
pub fn payment_status(amount: i64, paid_amount: i64) -> PaymentStatus {
    if paid_amount >= amount {
        PaymentStatus::Paid
    } else if paid_amount > 0 {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Pending
    }
}

/// Everything the resolver knows about a student for a month.
pub struct ResolvedFees {
    pub profile: StudentProfileModel,
    pub room: Option<RoomModel>,
    pub rates: FeeRates,
    /// True when the rates come from a stored fee structure
    pub has_structure: bool,
    pub month: NaiveDate,
    pub hostel_payment: Option<PaymentModel>,
    pub mess_payment: Option<PaymentModel>,
}

impl ResolvedFees {
    pub fn room_type(&self) -> Option<RoomType> {
        self.room
            .as_ref()
            .map(|room| RoomType::from_capacity(room.capacity))
    }

    pub fn room_type_label(&self) -> String {
        self.room_type()
            .map(|room_type| room_type.to_string())
            .unwrap_or_else(|| NOT_ASSIGNED.to_string())
    }

    pub fn total(&self, payment_type: PaymentType) -> i64 {
        self.rates.total(payment_type, self.room_type())
    }

    /// Fee panel for one payment type
    ///
    /// Returns `None` when there is neither a fee structure nor a payment row to report.
    /// A payment row keeps the amount it was created with; current rates only price months
    /// without one.
    pub fn breakdown(&self, payment_type: PaymentType, today: NaiveDate) -> Option<FeeBreakdownDto> {
        let payment = match payment_type {
            PaymentType::Hostel => self.hostel_payment.as_ref(),
            PaymentType::Mess => self.mess_payment.as_ref(),
        };

        if !self.has_structure && payment.is_none() {
            return None;
        }

        let (rate_base_fee, rate_room_type_fee) =
            self.rates.components(payment_type, self.room_type());
        let (base_fee, room_type_fee, total) = match payment {
            Some(p) if p.amount != rate_base_fee + rate_room_type_fee => {
                let room_type_fee = rate_room_type_fee.min(p.amount).max(0);
                (p.amount - room_type_fee, room_type_fee, p.amount)
            }
            _ => (
                rate_base_fee,
                rate_room_type_fee,
                rate_base_fee + rate_room_type_fee,
            ),
        };
        let paid_amount = payment.map(|p| p.paid_amount).unwrap_or(0);

        let due_date = payment
            .map(|p| p.due_date)
            .or(self.rates.due_date)
            .unwrap_or_else(|| today + Duration::days(DEFAULT_PAYMENT_WINDOW_DAYS));

        Some(FeeBreakdownDto {
            base_fee,
            room_type_fee,
            total,
            paid_amount,
            balance: (total - paid_amount).max(0),
            due_date,
            status: payment_status(total, paid_amount),
        })
    }

    pub fn into_summary(self, today: NaiveDate) -> FeeSummaryDto {
        FeeSummaryDto {
            room_type: self.room_type_label(),
            hostel: self.breakdown(PaymentType::Hostel, today),
            mess: self.breakdown(PaymentType::Mess, today),
            room_number: self.room.map(|room| room.room_number),
            year: self.rates.year,
            semester: self.rates.semester,
            is_default: self.rates.is_default,
            month: self.month,
        }
    }
}

/// Resolves fees against any connection, including an open transaction.
pub struct FeeService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> FeeService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gathers the rates, room and payment rows that determine a student's fees.
    ///
    /// # Arguments
    /// - `student_id` - Student profile ID
    /// - `month` - Any date in the month to resolve, normalised to its first day
    ///
    /// # Returns
    /// - `Ok(ResolvedFees)` - Inputs for the month
    /// - `Err(Error::HostelError(HostelError::NotFound))` - No student with that ID
    pub async fn resolve(&self, student_id: i32, month: NaiveDate) -> Result<ResolvedFees, Error> {
        let month = time::first_of_month(month);

        let profile = StudentProfileRepository::new(self.db)
            .get_by_id(student_id)
            .await?
            .ok_or_else(|| {
                HostelError::not_found(format!("Student ID {} not found", student_id))
            })?;

        let room = match profile.room_id {
            Some(room_id) => RoomRepository::new(self.db).get_by_id(room_id).await?,
            None => None,
        };

        let structure = FeeStructureRepository::new(self.db).get_latest().await?;
        let rates = structure
            .as_ref()
            .map(FeeRates::from_structure)
            .unwrap_or_else(FeeRates::default_table);

        let payment_repo = PaymentRepository::new(self.db);
        let hostel_payment = payment_repo
            .get_for_month(student_id, PaymentType::Hostel, month)
            .await?;
        let mess_payment = payment_repo
            .get_for_month(student_id, PaymentType::Mess, month)
            .await?;

        Ok(ResolvedFees {
            profile,
            room,
            rates,
            has_structure: structure.is_some(),
            month,
            hostel_payment,
            mess_payment,
        })
    }

    /// Resolves the fee summary a student sees for a month.
    pub async fn resolve_fees(
        &self,
        student_id: i32,
        month: NaiveDate,
    ) -> Result<FeeSummaryDto, Error> {
        let resolved = self.resolve(student_id, month).await?;

        Ok(resolved.into_summary(time::today()))
    }
}
