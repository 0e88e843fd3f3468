use core::fmt::{self, Display};
use hyper::StatusCode;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// Required input fields are missing or malformed.
    BadRequest,
    /// The requested resource or filtered result set is empty.
    NotFound,
    MethodNotAllowed,
    /// A well-formed request could not be completed against the store.
    Unprocessable,
}

impl Error {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub const fn message(&self) -> &'static str {
        match self {
            Self::BadRequest => "bad request",
            Self::NotFound => "resource not found",
            Self::MethodNotAllowed => "method not allowed",
            Self::Unprocessable => "unprocessable",
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Storage failures never escape as-is. The cause has already been logged by the store.
impl From<db::error::Error> for Error {
    fn from(err: db::error::Error) -> Self {
        use db::error::Error as Db;
        match err {
            Db::NotFound => Self::NotFound,
            Db::BadInput | Db::Fatal => Self::Unprocessable,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
