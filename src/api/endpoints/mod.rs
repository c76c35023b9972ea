pub mod auth;
pub mod dashboard;
pub mod drugs;
pub mod prescriptions;
