pub mod level;
pub mod log_entry;
pub mod stored_record;
pub mod timestamp;
