// === PUBLIC CONTRACT ===
// Only the contract module should be public for presentation layers to consume
pub mod contract;

// Re-export the public contract components
pub use contract::{client, error, model};

// === MODULE DEFINITION ===
pub mod config;
pub mod module;
pub use config::MarketplaceConfig;
pub use module::Marketplace;

// === INTERNAL MODULES ===
// WARNING: These modules are internal implementation details!
// They are exposed only for comprehensive testing and for hosts that plug in
// their own key/value store. Prefer the `contract` module for stable APIs.
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
pub mod infra;
