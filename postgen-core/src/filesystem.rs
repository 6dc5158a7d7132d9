//! Filesystem abstraction for script loading.
//!
//! The `script` command needs to read files, but the evaluator must not
//! touch the filesystem directly: the CLI decides where scripts live, and
//! tests supply scripts from memory. Only whole-file reads are needed; the
//! evaluator consumes the contents line by line through the input stack.

/// A filesystem abstraction for reading script files.
pub trait FileSystem {
    /// Read a file by name, returning its contents.
    ///
    /// The name has already passed the script-suffix gate; implementations
    /// only resolve it (e.g. against search directories) and read it.
    /// Returns `None` if the file cannot be found or read.
    fn read_file(&self, name: &str) -> Option<String>;
}

/// A no-op filesystem that never finds any files.
///
/// The default when no filesystem is configured; every `script` command
/// then fails with a read error.
pub struct NullFileSystem;

impl FileSystem for NullFileSystem {
    fn read_file(&self, _name: &str) -> Option<String> {
        None
    }
}
