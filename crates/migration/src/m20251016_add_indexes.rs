use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Seats are always loaded per event
        manager
            .create_index(
                Index::create()
                    .name("idx_event_seatings_event_id")
                    .table(EventSeatings::Table)
                    .col(EventSeatings::EventId)
                    .to_owned(),
            )
            .await?;

        // Catalog deletion checks for referencing seats
        manager
            .create_index(
                Index::create()
                    .name("idx_event_seatings_seating_type_id")
                    .table(EventSeatings::Table)
                    .col(EventSeatings::SeatingTypeId)
                    .to_owned(),
            )
            .await?;

        // Active reservation lookups by seat
        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_seating_id_status")
                    .table(Reservations::Table)
                    .col(Reservations::SeatingId)
                    .col(Reservations::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_seating_types_company_id")
                    .table(SeatingTypes::Table)
                    .col(SeatingTypes::CompanyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_seating_layout_templates_company_id")
                    .table(SeatingLayoutTemplates::Table)
                    .col(SeatingLayoutTemplates::CompanyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_company_id")
                    .table(Events::Table)
                    .col(Events::CompanyId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table) in [
            ("idx_event_seatings_event_id", EventSeatings::Table.into_iden()),
            (
                "idx_event_seatings_seating_type_id",
                EventSeatings::Table.into_iden(),
            ),
            (
                "idx_reservations_seating_id_status",
                Reservations::Table.into_iden(),
            ),
            ("idx_seating_types_company_id", SeatingTypes::Table.into_iden()),
            (
                "idx_seating_layout_templates_company_id",
                SeatingLayoutTemplates::Table.into_iden(),
            ),
            ("idx_events_company_id", Events::Table.into_iden()),
        ] {
            manager
                .drop_index(Index::drop().name(name).table(table).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(Iden)]
enum EventSeatings {
    Table,
    EventId,
    SeatingTypeId,
}

#[derive(Iden)]
enum Reservations {
    Table,
    SeatingId,
    Status,
}

#[derive(Iden)]
enum SeatingTypes {
    Table,
    CompanyId,
}

#[derive(Iden)]
enum SeatingLayoutTemplates {
    Table,
    CompanyId,
}

#[derive(Iden)]
enum Events {
    Table,
    CompanyId,
}
