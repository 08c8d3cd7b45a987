pub mod api;
pub mod config;
pub mod gateway;
pub mod normalize;
pub mod registry;
pub mod risk;
pub mod verifier;
