//! Facial landmark capture sessions and anthropometric feature extraction.
//!
//! Landmark frames from an external face tracker are collected into a
//! bounded per-session buffer, averaged into a fixed table of facial
//! measurements, and appended to a per-subject text store.

pub mod capture;
pub mod features;
pub mod persistence;
pub mod session;
pub mod shared;
