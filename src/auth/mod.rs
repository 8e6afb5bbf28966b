//! Authentication and session management

pub mod authenticator;
pub mod middleware;
pub mod models;
pub mod session;
pub mod storage;

pub use authenticator::{Authenticator, MockAuthenticator};
pub use middleware::{route_guard, GuardedRoute};
pub use models::{Credentials, Identity, Role};
pub use session::{LoginAttempt, SessionStore, IDENTITY_KEY};
pub use storage::{FileStorage, MemoryStorage, Storage};
