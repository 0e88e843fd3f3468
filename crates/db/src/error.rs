use core::fmt::{self, Display};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// The input failed validation before (or while) reaching the store.
    BadInput,
    /// The targeted record does not exist.
    NotFound,
    /// Unrecoverable storage failure.
    Fatal,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BadInput => "Unacceptable input.",
            Self::NotFound => "Record not found.",
            Self::Fatal => "Unrecoverable storage failure.",
        })
    }
}

impl From<tokio_postgres::Error> for Error {
    fn from(err: tokio_postgres::Error) -> Self {
        log::error!("database failure: {err}");
        Self::Fatal
    }
}

pub type Result<T> = core::result::Result<T, Error>;
