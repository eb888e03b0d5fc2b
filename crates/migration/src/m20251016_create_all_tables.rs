use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create companies table
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Companies::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Companies::Name).string().not_null())
                    .col(ColumnDef::new(Companies::CreatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create seating_layout_templates table
        manager
            .create_table(
                Table::create()
                    .table(SeatingLayoutTemplates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SeatingLayoutTemplates::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SeatingLayoutTemplates::CompanyId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SeatingLayoutTemplates::Name)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SeatingLayoutTemplates::Description).text())
                    .col(
                        ColumnDef::new(SeatingLayoutTemplates::Category)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SeatingLayoutTemplates::StagePosition)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SeatingLayoutTemplates::CanvasWidth)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SeatingLayoutTemplates::CanvasHeight)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SeatingLayoutTemplates::GridSize)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SeatingLayoutTemplates::Configuration)
                            .json()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SeatingLayoutTemplates::IsFavorite)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SeatingLayoutTemplates::UsageCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SeatingLayoutTemplates::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SeatingLayoutTemplates::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-seating_layout_templates-company_id")
                            .from(
                                SeatingLayoutTemplates::Table,
                                SeatingLayoutTemplates::CompanyId,
                            )
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create events table
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Events::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Events::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Events::SeatingLayoutTemplateId).uuid())
                    .col(ColumnDef::new(Events::Name).string().not_null())
                    .col(ColumnDef::new(Events::EventDate).date().not_null())
                    .col(ColumnDef::new(Events::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Events::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-events-company_id")
                            .from(Events::Table, Events::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-events-seating_layout_template_id")
                            .from(Events::Table, Events::SeatingLayoutTemplateId)
                            .to(SeatingLayoutTemplates::Table, SeatingLayoutTemplates::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create layouts table, one row per event
        manager
            .create_table(
                Table::create()
                    .table(Layouts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Layouts::EventId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Layouts::CanvasWidth).integer().not_null())
                    .col(ColumnDef::new(Layouts::CanvasHeight).integer().not_null())
                    .col(ColumnDef::new(Layouts::GridSize).integer().not_null())
                    .col(
                        ColumnDef::new(Layouts::StagePosition)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Layouts::StageConfig).json().not_null())
                    .col(ColumnDef::new(Layouts::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-layouts-event_id")
                            .from(Layouts::Table, Layouts::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create seating_types table
        manager
            .create_table(
                Table::create()
                    .table(SeatingTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SeatingTypes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SeatingTypes::CompanyId).uuid().not_null())
                    .col(
                        ColumnDef::new(SeatingTypes::Name)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SeatingTypes::Shape)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SeatingTypes::Capacity).integer().not_null())
                    .col(
                        ColumnDef::new(SeatingTypes::ColorCode)
                            .string_len(7)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SeatingTypes::Icon).string_len(50).not_null())
                    .col(
                        ColumnDef::new(SeatingTypes::IsDefault)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SeatingTypes::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-seating_types-company_id")
                            .from(SeatingTypes::Table, SeatingTypes::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create event_seatings table
        manager
            .create_table(
                Table::create()
                    .table(EventSeatings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventSeatings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EventSeatings::EventId).uuid().not_null())
                    .col(
                        ColumnDef::new(EventSeatings::SeatingTypeId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventSeatings::SeatNumber)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(EventSeatings::PositionX).double().not_null())
                    .col(ColumnDef::new(EventSeatings::PositionY).double().not_null())
                    .col(ColumnDef::new(EventSeatings::Width).double().not_null())
                    .col(ColumnDef::new(EventSeatings::Height).double().not_null())
                    .col(ColumnDef::new(EventSeatings::ColorCode).string_len(7))
                    .col(
                        ColumnDef::new(EventSeatings::Status)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventSeatings::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventSeatings::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    // Seats are purged explicitly when their event goes away
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-event_seatings-event_id")
                            .from(EventSeatings::Table, EventSeatings::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-event_seatings-seating_type_id")
                            .from(EventSeatings::Table, EventSeatings::SeatingTypeId)
                            .to(SeatingTypes::Table, SeatingTypes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create reservations table, written by the reservation ledger only
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reservations::EventId).uuid().not_null())
                    .col(ColumnDef::new(Reservations::SeatingId).uuid())
                    .col(
                        ColumnDef::new(Reservations::Phone)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reservations::FirstName).string_len(50))
                    .col(ColumnDef::new(Reservations::LastName).string_len(50))
                    .col(
                        ColumnDef::new(Reservations::ReservationCode)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Reservations::NumberOfPeople)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Reservations::Status)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::CheckedIn)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Reservations::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-reservations-event_id")
                            .from(Reservations::Table, Reservations::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-reservations-seating_id")
                            .from(Reservations::Table, Reservations::SeatingId)
                            .to(EventSeatings::Table, EventSeatings::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(EventSeatings::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SeatingTypes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Layouts::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(SeatingLayoutTemplates::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Companies {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(Iden)]
enum Events {
    Table,
    Id,
    CompanyId,
    SeatingLayoutTemplateId,
    Name,
    EventDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Layouts {
    Table,
    EventId,
    CanvasWidth,
    CanvasHeight,
    GridSize,
    StagePosition,
    StageConfig,
    UpdatedAt,
}

#[derive(Iden)]
enum SeatingTypes {
    Table,
    Id,
    CompanyId,
    Name,
    Shape,
    Capacity,
    ColorCode,
    Icon,
    IsDefault,
    CreatedAt,
}

#[derive(Iden)]
enum EventSeatings {
    Table,
    Id,
    EventId,
    SeatingTypeId,
    SeatNumber,
    PositionX,
    PositionY,
    Width,
    Height,
    ColorCode,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Reservations {
    Table,
    Id,
    EventId,
    SeatingId,
    Phone,
    FirstName,
    LastName,
    ReservationCode,
    NumberOfPeople,
    Status,
    CheckedIn,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum SeatingLayoutTemplates {
    Table,
    Id,
    CompanyId,
    Name,
    Description,
    Category,
    StagePosition,
    CanvasWidth,
    CanvasHeight,
    GridSize,
    Configuration,
    IsFavorite,
    UsageCount,
    CreatedAt,
    UpdatedAt,
}
