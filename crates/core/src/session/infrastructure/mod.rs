pub mod ingestion_worker;
pub mod shared_session;
