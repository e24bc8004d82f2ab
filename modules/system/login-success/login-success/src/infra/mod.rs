//! Default in-process collaborators.

pub mod audit_log;
pub mod serializer;

pub use audit_log::TracingAuditSink;
pub use serializer::JsonPayloadSerializer;
