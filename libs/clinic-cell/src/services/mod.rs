pub mod clinic;
pub mod user;

pub use clinic::ClinicService;
pub use user::UserService;
