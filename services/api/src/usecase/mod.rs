pub mod auth;
pub mod password;
pub mod session;
pub mod vehicle;
