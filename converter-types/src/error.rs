//! Error types for the currency converter.

/// Transport-level failures, funnelled out of the HTTP gateway.
///
/// Each variant carries the stringified underlying failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GatewayError {
    #[error("{0}")]
    Timeout(String),

    #[error("{0}")]
    Connect(String),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("{0}")]
    Decode(String),

    #[error("{0}")]
    Request(String),
}

/// Coarse classification of [`ConverterError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad currency code, date or amount.
    Validation,
    /// Timeout, connection failure, non-2xx status, malformed body.
    Transport,
    /// No matching currency or rates for the query.
    NotFound,
    /// Requested period too long.
    Range,
}

/// Errors reported by the converter operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConverterError {
    #[error("The currency code \"{0}\" is incorrect")]
    InvalidCurrencyCode(String),

    #[error("The date \"{0}\" is incorrect")]
    InvalidDate(String),

    #[error("The summa \"{0}\" is incorrect")]
    InvalidAmount(f64),

    #[error("The period from {start} to {end} is more than {max_days} days")]
    PeriodTooLong {
        start: String,
        end: String,
        max_days: i64,
    },

    #[error("The currency \"{0}\" not found")]
    CurrencyNotFound(String),

    #[error("The rate for currency \"{0}\" not found")]
    RateNotFound(String),

    #[error("The rates for currency \"{0}\" not found")]
    RatesNotFound(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl ConverterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConverterError::InvalidCurrencyCode(_)
            | ConverterError::InvalidDate(_)
            | ConverterError::InvalidAmount(_) => ErrorKind::Validation,
            ConverterError::PeriodTooLong { .. } => ErrorKind::Range,
            ConverterError::CurrencyNotFound(_)
            | ConverterError::RateNotFound(_)
            | ConverterError::RatesNotFound(_) => ErrorKind::NotFound,
            ConverterError::UnexpectedResponse(_) | ConverterError::Gateway(_) => {
                ErrorKind::Transport
            }
        }
    }
}
