mod bytes;
pub mod datetime;
pub mod media_types;
pub mod path;

pub use bytes::{HumanSize, human_free};
pub use filedeck_models::format_bytes;
