pub mod compatibility;
pub mod document;
pub mod job;
pub mod profile;
