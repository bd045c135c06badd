pub mod json;
pub mod snapshot;

pub use json::{encode, json_or_null, mapping_to_json, yaml_to_json};
pub use snapshot::write_snapshot;
