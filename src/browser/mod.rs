//! Browser automation module
//!
//! Wraps chromiumoxide behind a small session type.

mod session;

pub use session::BrowserSession;
