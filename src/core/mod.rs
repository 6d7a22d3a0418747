// Operations on maintenance reports: wire codec, schema check, add/remove.

pub mod codec;
pub mod schema;
pub mod transition;
