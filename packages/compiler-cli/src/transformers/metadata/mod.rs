pub mod collector;
pub mod schema;
pub mod store;

pub use collector::{MetadataCollector, OxcMetadataCollector};
pub use schema::*;
pub use store::{MetadataRecords, MetadataStore};
