pub mod catalog;
pub mod event;
pub mod layout;
pub mod ledger;
pub mod occupancy;
pub mod template;
pub mod tenant;

use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseBackend, DatabaseConnection, DatabaseTransaction, DbErr,
    IsolationLevel, TransactionTrait,
};

/// Opens a transaction in which every read sees the same snapshot.
///
/// SQLite transactions are already serializable, so the isolation settings
/// only apply on Postgres.
pub(crate) async fn begin_snapshot(db: &DatabaseConnection) -> Result<DatabaseTransaction, DbErr> {
    match db.get_database_backend() {
        DatabaseBackend::Postgres => {
            db.begin_with_config(
                Some(IsolationLevel::RepeatableRead),
                Some(AccessMode::ReadOnly),
            )
            .await
        }
        _ => db.begin().await,
    }
}

pub(crate) fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}
