pub mod drug;
pub mod enums;
pub mod patient;
pub mod prescription;
pub mod user;

pub use drug::*;
pub use enums::*;
pub use patient::*;
pub use prescription::*;
pub use user::*;
