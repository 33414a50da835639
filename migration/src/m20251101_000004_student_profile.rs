use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000001_user::User, m20251101_000002_course::Course, m20251101_000003_room::Room,
};

static IDX_STUDENT_PROFILE_ROOM_ID: &str = "idx-student_profiles-room_id";
static FK_STUDENT_PROFILE_USER_ID: &str = "fk-student_profiles-user_id";
static FK_STUDENT_PROFILE_COURSE_ID: &str = "fk-student_profiles-course_id";
static FK_STUDENT_PROFILE_ROOM_ID: &str = "fk-student_profiles-room_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StudentProfile::Table)
                    .if_not_exists()
                    .col(pk_auto(StudentProfile::Id))
                    .col(integer_uniq(StudentProfile::UserId))
                    .col(string_uniq(StudentProfile::RollNo))
                    .col(integer(StudentProfile::CourseId))
                    .col(string(StudentProfile::ContactNo))
                    .col(date(StudentProfile::DateOfBirth))
                    .col(text(StudentProfile::Address))
                    .col(integer_null(StudentProfile::RoomId))
                    .col(timestamp(StudentProfile::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_STUDENT_PROFILE_ROOM_ID)
                    .table(StudentProfile::Table)
                    .col(StudentProfile::RoomId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_STUDENT_PROFILE_USER_ID)
                    .from_tbl(StudentProfile::Table)
                    .from_col(StudentProfile::UserId)
                    .to_tbl(User::Table)
                    .to_col(User::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_STUDENT_PROFILE_COURSE_ID)
                    .from_tbl(StudentProfile::Table)
                    .from_col(StudentProfile::CourseId)
                    .to_tbl(Course::Table)
                    .to_col(Course::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_STUDENT_PROFILE_ROOM_ID)
                    .from_tbl(StudentProfile::Table)
                    .from_col(StudentProfile::RoomId)
                    .to_tbl(Room::Table)
                    .to_col(Room::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for fk in [
            FK_STUDENT_PROFILE_ROOM_ID,
            FK_STUDENT_PROFILE_COURSE_ID,
            FK_STUDENT_PROFILE_USER_ID,
        ] {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name(fk)
                        .table(StudentProfile::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_STUDENT_PROFILE_ROOM_ID)
                    .table(StudentProfile::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(StudentProfile::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum StudentProfile {
    #[sea_orm(iden = "student_profiles")]
    Table,
    Id,
    UserId,
    RollNo,
    CourseId,
    ContactNo,
    DateOfBirth,
    Address,
    RoomId,
    CreatedAt,
}
