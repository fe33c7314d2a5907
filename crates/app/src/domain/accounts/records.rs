//! Account Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Account UUID, used for both buyers and merchants.
pub type AccountUuid = TypedUuid<AccountRecord>;

/// Account Record
#[derive(Debug, Clone)]
pub struct AccountRecord {
    /// Unique account identifier.
    pub uuid: AccountUuid,

    /// Unique contact email.
    pub email: String,

    /// Account creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,
}
