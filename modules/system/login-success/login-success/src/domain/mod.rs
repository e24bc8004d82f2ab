//! Domain layer for the login success module.

pub mod audit;
pub mod error;
pub mod fixation;
pub mod local_client;
pub mod resolver;
pub mod response;
pub mod service;

pub use audit::AuditRecorder;
pub use error::DomainError;
pub use fixation::{SessionBinding, SessionFixationGuard};
pub use local_client::LoginSuccessLocalClient;
pub use resolver::UserValidityResolver;
pub use response::ResponseComposer;
pub use service::Service;
