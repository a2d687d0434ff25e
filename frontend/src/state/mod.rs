pub mod auth;
pub mod cache;
pub mod selector;
pub mod session;
