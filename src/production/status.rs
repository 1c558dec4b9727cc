//! Classification of platform credential store failures
//!
//! `keyring::Error` is open-ended (`#[non_exhaustive]`, boxed platform
//! errors). Everything is folded into a small closed set here, and anything
//! unrecognized keeps the platform's own text in `Unknown`.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreStatus {
    /// No entry matches the identity
    ItemNotFound,
    /// An entry already exists for the identity
    DuplicateItem,
    /// More than one entry matches the identity
    Ambiguous(usize),
    /// The platform rejected the service or account attribute
    InvalidIdentity(String),
    /// An attribute or payload exceeds a platform limit
    TooLong { attribute: String, limit: u32 },
    /// The store is locked or access was refused
    AccessDenied(String),
    /// The stored payload cannot be represented as requested
    BadEncoding,
    /// Any other platform failure
    Unknown(String),
}

impl StoreStatus {
    /// Human-readable message for this status
    pub fn message(&self) -> String {
        match self {
            Self::ItemNotFound => "item not found".to_string(),
            Self::DuplicateItem => "duplicate item".to_string(),
            Self::Ambiguous(count) => format!("{count} entries match the identity"),
            Self::InvalidIdentity(reason) => format!("invalid identity: {reason}"),
            Self::TooLong { attribute, limit } => {
                format!("{attribute} exceeds platform limit of {limit}")
            }
            Self::AccessDenied(reason) => format!("access denied: {reason}"),
            Self::BadEncoding => "stored data has an unexpected encoding".to_string(),
            Self::Unknown(raw) => format!("platform failure: {raw}"),
        }
    }
}

impl fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl From<&keyring::Error> for StoreStatus {
    fn from(err: &keyring::Error) -> Self {
        match err {
            keyring::Error::NoEntry => Self::ItemNotFound,
            keyring::Error::Ambiguous(creds) => Self::Ambiguous(creds.len()),
            keyring::Error::Invalid(attribute, reason) => {
                Self::InvalidIdentity(format!("{attribute}: {reason}"))
            }
            keyring::Error::TooLong(attribute, limit) => Self::TooLong {
                attribute: attribute.clone(),
                limit: *limit,
            },
            keyring::Error::NoStorageAccess(inner) => Self::AccessDenied(inner.to_string()),
            keyring::Error::BadEncoding(_) => Self::BadEncoding,
            keyring::Error::PlatformFailure(inner) => Self::Unknown(inner.to_string()),
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<keyring::Error> for StoreStatus {
    fn from(err: keyring::Error) -> Self {
        Self::from(&err)
    }
}
