pub mod auth;
pub mod companies;
pub mod images;
pub mod reservations;
pub mod rooms;
pub mod users;
