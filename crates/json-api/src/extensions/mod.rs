//! Extension traits

mod account;
mod depot;
mod result;

pub(crate) use account::AccountDepotExt as _;
pub(crate) use depot::DepotExt as _;
pub(crate) use result::ResultExt as _;
