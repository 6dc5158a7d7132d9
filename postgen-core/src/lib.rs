//! `PostGen` — command evaluator and PostScript code-generation engine.
//!
//! `PostGen` is a line-oriented interpreter: each input line is tokenized,
//! looked up in a fixed command registry, and dispatched to a handler that
//! writes PostScript instructions into the active [`session::Session`].
//! Block constructs (`rotate`, `loop`) re-enter the same evaluator in
//! restricted mode until the user confirms completion.

pub mod command;
pub mod console;
pub mod error;
pub mod filesystem;
pub mod input;
pub mod interpreter;
pub mod session;
pub mod shapes;
pub mod token;
