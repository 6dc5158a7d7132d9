//! The session: the single PostScript document under construction.
//!
//! A session owns a buffered file sink. Creation writes the PostScript
//! header; closing writes `showpage` and flushes. At most one session
//! exists at a time — enforced by the interpreter, which owns it as an
//! `Option<Session>`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Suffix appended to the session name to form the output file name.
pub const FILE_SUFFIX: &str = ".ps";

/// Header line written once at session creation.
pub const HEADER: &str = "%!PS";

/// Finalization line written once at session close.
pub const FOOTER: &str = "showpage";

/// An open output document.
pub struct Session {
    /// User-supplied session name (without suffix).
    name: String,
    /// Full path of the output file.
    path: PathBuf,
    /// Buffered sink; one instruction per line.
    sink: BufWriter<File>,
}

impl Session {
    /// Create `<output_dir>/<name>.ps` and write the header.
    pub fn create(name: &str, output_dir: &Path) -> io::Result<Self> {
        let path = output_dir.join(format!("{name}{FILE_SUFFIX}"));
        let file = File::create(&path)?;
        let mut sink = BufWriter::new(file);
        writeln!(sink, "{HEADER}")?;
        Ok(Self {
            name: name.to_owned(),
            path,
            sink,
        })
    }

    /// The session name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the output file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one instruction line into the document.
    pub fn emit(&mut self, instruction: &str) -> io::Result<()> {
        writeln!(self.sink, "{instruction}")
    }

    /// Finalize the document and flush the sink.
    ///
    /// Consumes the session either way: a failed close still releases the
    /// file handle when the sink is dropped.
    pub fn close(mut self) -> io::Result<()> {
        writeln!(self.sink, "{FOOTER}")?;
        self.sink.flush()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
