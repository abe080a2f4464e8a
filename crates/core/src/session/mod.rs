//! Authenticated session state.
//!
//! Holds the current identity and auth token as an atomic pair, persists
//! them across process restarts through a key/value storage trait, and
//! broadcasts changes to interested observers.

pub mod storage;
pub mod store;
pub mod types;

pub use storage::{MemoryStorage, SessionStorage, KEY_AUTH_TOKEN, KEY_CURRENT_USER};
pub use store::{AuthApi, SessionState, SessionStore};
pub use types::{
    AuthResponse, Credentials, ForgotPasswordResponse, RegisterData, ResetPasswordResponse,
    UserProfile,
};
