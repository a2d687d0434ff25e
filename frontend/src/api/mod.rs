mod assets;
mod auth;
pub mod client;
mod portfolios;
pub mod token;
pub mod types;

pub use assets::*;
pub use client::*;
pub use portfolios::*;
pub use token::TokenStore;
pub use types::*;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod test_support;
