pub mod directory;
pub mod sessions;

pub use directory::{StaticUserDirectory, UserOrigin};
pub use sessions::InMemorySessionStore;
