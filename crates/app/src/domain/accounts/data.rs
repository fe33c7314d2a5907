//! Account Data

use crate::domain::accounts::records::AccountUuid;

/// New Account Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    /// UUID to assign to the account row.
    pub uuid: AccountUuid,

    /// Unique contact email.
    pub email: String,
}
