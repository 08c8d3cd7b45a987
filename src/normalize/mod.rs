pub mod activity;
pub mod balances;
pub mod fields;
pub mod nft;
