pub mod auth;
pub mod contract;
pub mod management;
pub mod reservation;
pub mod settings;
