//! Terminal abstraction for the evaluator.
//!
//! The evaluator does not care where its lines come from or where messages
//! go; it talks to a [`Console`]. The CLI provides a stdin/stdout
//! implementation; tests drive the interpreter with a scripted one.

/// A prompting line source plus message sink.
pub trait Console {
    /// Display `prompt` (no trailing newline) and block for one line of
    /// input, returned without its line terminator.
    ///
    /// Returns `None` at end of input. Prompts are advisory: non-interactive
    /// implementations may ignore them.
    fn read_line(&mut self, prompt: &str) -> Option<String>;

    /// Print one line of user-visible output.
    fn print(&mut self, text: &str);
}
