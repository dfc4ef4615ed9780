mod json;

pub use json::{parse_tree_json, parse_tree_value, unwrap_envelope, LoadOptions};
