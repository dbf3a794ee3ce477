pub mod error;
pub mod ids;
pub mod responses;

pub use error::AppError;
pub use ids::*;
pub use responses::*;
