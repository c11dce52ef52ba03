// Service exports
pub mod memory;
pub mod records;
pub mod store;

pub use memory::{InMemoryStore, SeedData};
pub use records::{RecordCollections, RecordsClient};
pub use store::{RecordStore, StoreError};
