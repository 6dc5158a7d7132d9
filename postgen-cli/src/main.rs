//! `PostGen` CLI — interactive PostScript generator.

use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use postgen_core::console::Console;
use postgen_core::filesystem::FileSystem;
use postgen_core::interpreter::Interpreter;

#[derive(Parser)]
#[command(version, about = "PostGen \u{2014} interactive PostScript generator")]
struct Cli {
    /// Script file to run instead of reading commands from the terminal
    script: Option<String>,

    /// Output directory for generated PostScript files
    #[arg(short, long, default_value = ".")]
    output: String,
}

/// Console over stdin/stdout.
struct StdConsole;

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                while line.ends_with('\n') || line.ends_with('\r') {
                    line.pop();
                }
                Some(line)
            }
        }
    }

    fn print(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Filesystem implementation that reads script files from disk.
///
/// Searches in configured directories in order; an absolute script name
/// bypasses them (joining an absolute path replaces the base).
struct OsFileSystem {
    /// Directories to search for script files.
    search_dirs: Vec<PathBuf>,
}

impl OsFileSystem {
    const fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }
}

impl FileSystem for OsFileSystem {
    fn read_file(&self, name: &str) -> Option<String> {
        for dir in &self.search_dirs {
            let path = dir.join(name);
            if let Ok(contents) = fs::read_to_string(&path) {
                return Some(contents);
            }
        }
        None
    }
}

fn main() {
    let cli = Cli::parse();

    println!("PostGen - PostScript Generator");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!("Enter a command, or 'help' to view available commands.");

    // Script files are resolved against the script's own directory first,
    // then the current directory.
    let mut search_dirs = Vec::new();
    if let Some(ref script) = cli.script {
        if let Some(parent) = Path::new(script).parent() {
            if !parent.as_os_str().is_empty() {
                search_dirs.push(parent.to_path_buf());
            }
        }
    }
    if let Ok(cwd) = env::current_dir() {
        search_dirs.push(cwd);
    }

    let mut interp = Interpreter::new(Box::new(StdConsole));
    interp.set_filesystem(Box::new(OsFileSystem::new(search_dirs)));
    interp.set_output_dir(&cli.output);

    if let Some(ref script) = cli.script {
        if let Err(e) = interp.load_script(script) {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }

    interp.run();
}
