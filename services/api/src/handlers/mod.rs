pub mod auth;
pub mod extract;
pub mod meta;
pub mod vehicle;
