//! Authenticated account lookup on the depot.

use salvo::prelude::{Depot, StatusError};
use storefront_app::domain::accounts::records::AccountUuid;

const ACCOUNT_UUID_DEPOT_KEY: &str = "account_uuid";

pub(crate) trait AccountDepotExt {
    fn insert_account_uuid(&mut self, account: AccountUuid);

    /// The account set by the auth middleware, or 401 when absent.
    fn account_uuid_or_401(&self) -> Result<AccountUuid, StatusError>;
}

impl AccountDepotExt for Depot {
    fn insert_account_uuid(&mut self, account: AccountUuid) {
        self.insert(ACCOUNT_UUID_DEPOT_KEY, account);
    }

    fn account_uuid_or_401(&self) -> Result<AccountUuid, StatusError> {
        self.get::<AccountUuid>(ACCOUNT_UUID_DEPOT_KEY)
            .copied()
            .map_err(|_missing| StatusError::unauthorized())
    }
}
