pub mod error;
pub mod filter;
pub mod memory;
pub mod store;
pub mod supabase;

pub use error::StoreError;
pub use filter::Filter;
pub use memory::MemoryStore;
pub use store::{
    create_record, find_record, list_records, update_record, Collection, RecordStore,
    SharedStore, StoreDiagnostics,
};
pub use supabase::SupabaseStore;
