pub mod users;
pub mod vehicles;
