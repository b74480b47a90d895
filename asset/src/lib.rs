//! Fungible asset ledger.
//!
//! Two independent instances back the system: the base asset that stakers lock
//! and the reward asset that the staking engine mints and governance reads as
//! voting weight. Engines only see the [`FungibleAsset`] trait; [`AssetLedger`]
//! is the in-memory implementation.
//!
//! Minting is restricted to a single minter, configured once by the asset's
//! owner during setup.

pub mod asset;
pub mod error;
pub mod ledger;

pub use asset::FungibleAsset;
pub use error::AssetError;
pub use ledger::AssetLedger;
