pub mod record;
pub mod schema;
pub mod summary;

pub use record::{Record, RecordKind, TaggedRecord};
