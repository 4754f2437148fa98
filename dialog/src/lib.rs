//! Dialogue types and prompt templates.
//!
//! A [`Turn`] sequence is rendered into a single flat prompt by a
//! [`DialogTemplate`] such as [`Llama2Template`], for completion endpoints
//! that take raw text instead of structured chat messages.
//!
//! ```
//! use dialog::{format_dialog, Turn};
//!
//! let prompt = format_dialog(&[
//!     Turn::system("SP"),
//!     Turn::user("Hi"),
//!     Turn::assistant("Hello"),
//! ])
//! .unwrap();
//! assert_eq!(prompt, "<s>[INST] <<SYS>>\nSP\n<</SYS>>\n\nHi [/INST] Hello </s>");
//! ```

pub mod conversation;
pub mod error;
pub mod llama2;
pub mod markup;

pub use conversation::{dialog_from_json, Conversation, Role, Turn};
pub use error::DialogError;
pub use llama2::{format_dialog, DialogTemplate, Llama2Template};
pub use markup::DEFAULT_SYSTEM_PROMPT;
