pub mod persisted_record;
pub mod persistence_sink;
