pub use sea_orm_migration::prelude::*;

mod m20251101_000001_user;
mod m20251101_000002_course;
mod m20251101_000003_room;
mod m20251101_000004_student_profile;
mod m20251101_000005_fee_structure;
mod m20251101_000006_payment;
mod m20251101_000007_query;
mod m20251101_000008_verification_token;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_user::Migration),
            Box::new(m20251101_000002_course::Migration),
            Box::new(m20251101_000003_room::Migration),
            Box::new(m20251101_000004_student_profile::Migration),
            Box::new(m20251101_000005_fee_structure::Migration),
            Box::new(m20251101_000006_payment::Migration),
            Box::new(m20251101_000007_query::Migration),
            Box::new(m20251101_000008_verification_token::Migration),
        ]
    }
}
