//! `PostgreSQL` record factory implementation.

use super::{
    models::{MailRecordRow, NewMailRecordRow},
    schema::mail_records,
};
use crate::delivery::{
    domain::{PersistedRecord, RecordFields, RecordId},
    ports::{RecordFactory, RecordFactoryError, RecordFactoryResult},
};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;

/// `PostgreSQL` connection pool type used by the record factory.
pub type MailRecordPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed record factory writing to `mail_records`.
#[derive(Debug, Clone)]
pub struct PostgresRecordFactory<C = DefaultClock> {
    pool: MailRecordPgPool,
    clock: Arc<C>,
}

impl PostgresRecordFactory<DefaultClock> {
    /// Creates a factory from a `PostgreSQL` connection pool.
    #[must_use]
    pub fn new(pool: MailRecordPgPool) -> Self {
        Self::with_clock(pool, Arc::new(DefaultClock))
    }
}

impl<C> PostgresRecordFactory<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a factory using `clock` for creation timestamps.
    #[must_use]
    pub const fn with_clock(pool: MailRecordPgPool, clock: Arc<C>) -> Self {
        Self { pool, clock }
    }
}

impl<C> RecordFactory for PostgresRecordFactory<C>
where
    C: Clock + Send + Sync,
{
    fn create(&self, fields: &RecordFields) -> RecordFactoryResult<PersistedRecord> {
        let new_row = to_new_row(&PersistedRecord::new(fields.clone(), &*self.clock));
        let mut connection = self.pool.get().map_err(RecordFactoryError::persistence)?;

        let row = diesel::insert_into(mail_records::table)
            .values(&new_row)
            .returning(MailRecordRow::as_returning())
            .get_result::<MailRecordRow>(&mut *connection)
            .map_err(map_insert_error)?;
        Ok(row_to_record(row))
    }
}

fn to_new_row(record: &PersistedRecord) -> NewMailRecordRow {
    let fields = record.fields();
    NewMailRecordRow {
        id: record.id().into_inner(),
        from_address: fields.from.clone(),
        to_address: fields.to.clone(),
        subject: fields.subject.clone(),
        content: fields.content.clone(),
        bcc: fields.bcc.clone(),
        created_at: record.created_at(),
    }
}

fn row_to_record(row: MailRecordRow) -> PersistedRecord {
    let MailRecordRow {
        id,
        from_address,
        to_address,
        subject,
        content,
        bcc,
        created_at,
    } = row;

    let fields = RecordFields {
        from: from_address,
        to: to_address,
        subject,
        content,
        bcc,
    };
    PersistedRecord::from_persisted(RecordId::from_uuid(id), fields, created_at)
}

fn map_insert_error(err: DieselError) -> RecordFactoryError {
    match err {
        DieselError::DatabaseError(
            DatabaseErrorKind::CheckViolation | DatabaseErrorKind::NotNullViolation,
            ref info,
        ) => RecordFactoryError::InvalidRecord(info.message().to_owned()),
        _ => RecordFactoryError::persistence(err),
    }
}
