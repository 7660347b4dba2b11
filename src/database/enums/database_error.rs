use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Setup error: {0}")]
    Setup(String),

    #[error("Database busy: {0}")]
    Busy(String),

    #[error("No database backend connected")]
    NotConnected,

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("SQL error: {0}")]
    Sqlx(sqlx::Error),
}
