use account_domain::error::DomainError;

#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// 仓储错误，原样转发
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("validation: {0}")]
    Validation(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// 面向调用方的错误种类，供传输层映射为远程错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    Unavailable,
    Canceled,
    DeadlineExceeded,
    InvalidArgument,
}

impl ErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::AlreadyExists => "already_exists",
            Self::Unavailable => "unavailable",
            Self::Canceled => "canceled",
            Self::DeadlineExceeded => "deadline_exceeded",
            Self::InvalidArgument => "invalid_argument",
        }
    }
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::InvalidArgument,
            Self::Domain(err) => match err {
                DomainError::NotFound { .. } => ErrorKind::NotFound,
                DomainError::ConstraintViolation { .. } => ErrorKind::AlreadyExists,
                DomainError::Canceled => ErrorKind::Canceled,
                DomainError::DeadlineExceeded => ErrorKind::DeadlineExceeded,
                DomainError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
                _ => ErrorKind::Unavailable,
            },
        }
    }
}
