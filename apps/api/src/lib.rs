pub mod router;

pub use router::{build_store, create_router};
