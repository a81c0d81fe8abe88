// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::Connection as _;
use rigmart_repo::prelude::RepoError;
use rigmart_repo_sqlite::{
    Connection as RepoConnection, DbConnection, prelude::DieselTransactionError,
};
use rigmart_storage_sqlite::Error as StorageError;
use rigmart_usecases as uc;
use thiserror::Error;

pub mod catalog;
pub mod database;
pub mod listing;
pub mod recently_viewed;
pub mod seller;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Input(anyhow::Error),

    #[error("forbidden")]
    Forbidden,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    DatabaseMigration(anyhow::Error),

    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl<E> From<DieselTransactionError<E>> for Error
where
    E: Into<Error>,
{
    fn from(err: DieselTransactionError<E>) -> Self {
        err.into_inner().into()
    }
}

impl From<uc::Error> for Error {
    fn from(err: uc::Error) -> Self {
        match err {
            uc::Error::Input(uc::InputError(err)) => Self::Input(err),
            uc::Error::Forbidden => Self::Forbidden,
            uc::Error::Repository(err) => Self::Repository(err),
            uc::Error::Other(err) => Self::Other(err),
        }
    }
}

pub type TransactionError = DieselTransactionError<Error>;

impl From<Error> for TransactionError {
    fn from(err: Error) -> Self {
        Self::new(err)
    }
}

fn transaction_error<E>(err: E) -> TransactionError
where
    E: Into<Error>,
{
    TransactionError::from(err.into())
}

pub type Result<T> = std::result::Result<T, Error>;

/// Execute a use case within a transaction.
///
/// All changes are rolled back if the use case fails.
fn with_transaction<T, E>(
    connection: &mut DbConnection,
    use_case: impl FnOnce(&mut RepoConnection<'_>) -> std::result::Result<T, E>,
) -> Result<T>
where
    E: Into<Error>,
{
    connection
        .transaction::<_, TransactionError, _>(|connection| {
            let mut repo = RepoConnection::new(connection);
            use_case(&mut repo).map_err(transaction_error)
        })
        .map_err(Into::into)
}

#[cfg(test)]
mod tests;
