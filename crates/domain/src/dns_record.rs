pub mod record;
pub mod record_type;

pub use record::{OptData, RecordData, ResourceRecord, SoaData, CLASS_IN};
pub use record_type::RecordType;
