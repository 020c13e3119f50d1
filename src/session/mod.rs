//! Cookie-identified sessions and the flash messages they carry.
//!
//! A session is nothing more than a random id in a cookie. The only state
//! kept per session is the flash map held by [`FlashStore`].

mod flash;
mod middleware;

pub use flash::{Flash, FlashStore};
pub use middleware::{session_middleware, SessionId, SESSION_COOKIE};
