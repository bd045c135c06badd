pub mod walker;
pub mod yaml;

pub use walker::{
    discover_entity_records, discover_relationship_records, is_excluded_name, RecordFile,
};
pub use yaml::{load_record, parse_record, RawRecord};
