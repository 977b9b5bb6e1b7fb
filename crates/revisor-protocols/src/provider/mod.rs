//! Chat provider protocol definitions.
//!
//! Providers connect to hosted chat-completion APIs and turn a
//! [`ChatRequest`] into a single [`ChatReply`].

mod traits;
mod request;
mod response;

pub use traits::*;
pub use request::*;
pub use response::*;
