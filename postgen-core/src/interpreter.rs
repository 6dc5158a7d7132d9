//! The `PostGen` interpreter.
//!
//! Central module tying together the tokenizer, command registry, session
//! manager, and shape generators. Evaluation is line-at-a-time and fully
//! synchronous: [`Interpreter::evaluate`] tokenizes one line, resolves the
//! command, validates arity, and invokes the handler. Block constructs
//! (`rotate`, `loop`) push a frame and drive the same routine in restricted
//! mode — drawing primitives only — until the user confirms completion.

use std::path::PathBuf;

use crate::command::{self, CommandId, CommandKind};
use crate::console::Console;
use crate::error::{ErrorKind, EvalError, EvalResult};
use crate::filesystem::{FileSystem, NullFileSystem};
use crate::input::InputSystem;
use crate::session::Session;
use crate::shapes::{fmt_num, polygon_vertices};
use crate::token::{parse_count, parse_flag, parse_number, tokenize};

/// Script files must carry this suffix; others are rejected before any I/O.
pub const SCRIPT_SUFFIX: &str = ".pg";

/// A curve needs this many interactively entered points (start excluded)
/// before `curveto` has enough operands.
const CURVE_MIN_POINTS: u32 = 3;

// ---------------------------------------------------------------------------
// Path flags and block frames
// ---------------------------------------------------------------------------

/// The closed/solid/curve combination for one path command.
///
/// The convenience wrappers (`closedpath`, `solidcurve`, ...) are nothing
/// but fixed instances of this struct forwarded to the path handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathFlags {
    /// Emit `closepath` before finishing.
    pub closed: bool,
    /// Finish with `fill` instead of `stroke`.
    pub solid: bool,
    /// Collect points as `curveto` operands instead of `lineto` steps.
    pub curve: bool,
}

/// A block construct currently driving restricted evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
enum BlockFrame {
    /// `rotate <degrees>`: body evaluated under a rotation, inside
    /// `gsave`/`grestore` so the rotation cannot leak.
    Rotate(f64),
    /// `loop <count>`: body bracketed by `<count> {` / `} repeat`. The
    /// count is the literal argument, independent of how many lines the
    /// confirmation loop actually absorbed.
    Loop(u32),
}

// ---------------------------------------------------------------------------
// Interpreter
// ---------------------------------------------------------------------------

/// The interpreter state: one console, one input stack, at most one session.
pub struct Interpreter {
    /// Terminal seam: prompting input and user-visible messages.
    console: Box<dyn Console>,
    /// Script input levels stacked over the console.
    input: InputSystem,
    /// Filesystem for the `script` command.
    fs: Box<dyn FileSystem>,
    /// The single document under construction, if any.
    session: Option<Session>,
    /// Directory session files are created in.
    output_dir: PathBuf,
    /// Block constructs currently driving restricted evaluation.
    block_stack: Vec<BlockFrame>,
    /// Set by `quit`; stops the run loop.
    quit: bool,
}

impl Interpreter {
    /// Create an interpreter over the given console.
    ///
    /// Starts with no session, no filesystem ([`NullFileSystem`]), and the
    /// current directory as output directory.
    #[must_use]
    pub fn new(console: Box<dyn Console>) -> Self {
        Self {
            console,
            input: InputSystem::new(),
            fs: Box::new(NullFileSystem),
            session: None,
            output_dir: PathBuf::from("."),
            block_stack: Vec::new(),
            quit: false,
        }
    }

    /// Install the filesystem used to resolve `script` files.
    pub fn set_filesystem(&mut self, fs: Box<dyn FileSystem>) {
        self.fs = fs;
    }

    /// Set the directory session files are created in.
    pub fn set_output_dir(&mut self, dir: impl Into<PathBuf>) {
        self.output_dir = dir.into();
    }

    /// Whether a session is currently open.
    #[must_use]
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Whether `quit` has been issued.
    #[must_use]
    pub const fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Load a script file and queue its lines for evaluation.
    ///
    /// The name must end in [`SCRIPT_SUFFIX`] (checked before any I/O). An
    /// open session is closed first, with a notice.
    pub fn load_script(&mut self, name: &str) -> EvalResult<()> {
        if !name.ends_with(SCRIPT_SUFFIX) {
            return Err(EvalError::new(
                ErrorKind::ScriptName,
                format!("Script files must end in {SCRIPT_SUFFIX}!"),
            ));
        }
        let Some(text) = self.fs.read_file(name) else {
            return Err(EvalError::new(
                ErrorKind::ScriptRead,
                format!("Failed to read script file: {name}"),
            ));
        };
        if self.session.is_some() {
            self.console
                .print("Closing active session before running script.");
            if let Err(e) = self.end_session() {
                self.report(&e);
            }
        }
        self.input.push_script(&text);
        Ok(())
    }

    /// Run the evaluator until end-of-input or `quit`.
    ///
    /// An open session left behind at end-of-input is closed with a notice
    /// so the generated document stays renderable.
    pub fn run(&mut self) {
        while !self.quit {
            let Some(line) = self.next_line(">> ") else {
                break;
            };
            self.evaluate(&line, false);
        }
        if !self.quit && self.session.is_some() {
            self.console.print("End of input; closing open session.");
            if let Err(e) = self.end_session() {
                self.report(&e);
            }
        }
    }

    /// Evaluate one input line.
    ///
    /// `restricted` limits the registry to drawing primitives and suppresses
    /// `gsave` bracketing; block constructs set it when re-entering the
    /// evaluator for their bodies.
    pub fn evaluate(&mut self, line: &str, restricted: bool) {
        let args = tokenize(line);
        if args.is_empty() {
            self.report(&EvalError::new(ErrorKind::NoCommand, "No command provided!"));
            return;
        }
        let spec = match command::lookup(&args[0]) {
            Some(spec) if !restricted || spec.kind == CommandKind::Drawing => spec,
            // Non-drawing commands are invisible in restricted mode.
            _ => {
                self.report(&EvalError::new(ErrorKind::UnknownCommand, "Unknown command!"));
                return;
            }
        };
        if !spec.arity_ok(args.len()) {
            self.report(&EvalError::new(ErrorKind::Usage, spec.usage));
            return;
        }

        // Top-level drawing commands are isolated from ambient transform
        // state. No session means the handler fails without writes, so no
        // bracket either.
        let bracket =
            spec.kind == CommandKind::Drawing && !restricted && self.session.is_some();
        if bracket {
            if let Err(e) = self.emit("gsave") {
                self.report(&e);
                return;
            }
        }
        let result = self.dispatch(spec.id, &args);
        if bracket {
            if let Err(e) = self.emit("grestore") {
                self.report(&e);
            }
        }
        if let Err(e) = result {
            self.report(&e);
        }
    }

    fn dispatch(&mut self, id: CommandId, args: &[String]) -> EvalResult<()> {
        match id {
            CommandId::Path => self.cmd_path(args, None),
            CommandId::ClosedPath => self.cmd_path(args, Some(flags(true, false, false))),
            CommandId::SolidPath => self.cmd_path(args, Some(flags(true, true, false))),
            CommandId::Curve => self.cmd_path(args, Some(flags(false, false, true))),
            CommandId::ClosedCurve => self.cmd_path(args, Some(flags(true, false, true))),
            CommandId::SolidCurve => self.cmd_path(args, Some(flags(true, true, true))),
            CommandId::Circle => self.cmd_circle(args, false),
            CommandId::SolidCircle => self.cmd_circle(args, true),
            CommandId::Polygon => self.cmd_polygon(args, false),
            CommandId::SolidPolygon => self.cmd_polygon(args, true),
            CommandId::Rotate => self.cmd_rotate(args),
            CommandId::Loop => self.cmd_loop(args),
            CommandId::Begin => self.cmd_begin(args),
            CommandId::End => self.end_session(),
            CommandId::Script => self.load_script(&args[1]),
            CommandId::Help => self.cmd_help(),
            CommandId::Quit => self.cmd_quit(),
        }
    }

    /// Report an error to the user. Format matches the original interpreter:
    /// arity errors get a second `Usage:` line.
    fn report(&mut self, err: &EvalError) {
        match err.kind {
            ErrorKind::NoCommand | ErrorKind::UnknownCommand => {
                self.console.print(&format!("ERROR: {}", err.message));
            }
            ErrorKind::Usage => {
                self.console
                    .print("ERROR:\tInvalid number of arguments provided!");
                self.console.print(&format!("Usage:\t{}", err.message));
            }
            _ => self.console.print(&format!("ERROR:\t{}", err.message)),
        }
    }

    fn next_line(&mut self, prompt: &str) -> Option<String> {
        self.input.next_line(prompt, &mut *self.console)
    }

    /// Write one instruction into the active session.
    fn emit(&mut self, instruction: &str) -> EvalResult<()> {
        let Some(session) = self.session.as_mut() else {
            return Err(no_session());
        };
        session
            .emit(instruction)
            .map_err(|e| EvalError::new(ErrorKind::Io, format!("Failed to write to session file: {e}")))
    }

    fn require_session(&self) -> EvalResult<()> {
        if self.session.is_some() {
            Ok(())
        } else {
            Err(no_session())
        }
    }

    // -----------------------------------------------------------------------
    // Session control
    // -----------------------------------------------------------------------

    fn cmd_begin(&mut self, args: &[String]) -> EvalResult<()> {
        if self.session.is_some() {
            let answer = self.next_line(
                "Active session exists! Do you wish to close this session and start a new one? (y/n) ",
            );
            if !answer.as_deref().is_some_and(is_affirmative) {
                self.console.print("Aborting session creation...");
                return Ok(());
            }
            if let Err(e) = self.end_session() {
                self.report(&e);
            }
        }
        let name = &args[1];
        match Session::create(name, &self.output_dir) {
            Ok(session) => {
                self.session = Some(session);
                self.console.print(&format!("Created session: {name}"));
                Ok(())
            }
            Err(_) => Err(EvalError::new(
                ErrorKind::SessionCreate,
                "Failed to create session!",
            )),
        }
    }

    /// Shared `end` logic: finalize, close, clear. The session is cleared
    /// even when the close itself fails.
    fn end_session(&mut self) -> EvalResult<()> {
        let Some(session) = self.session.take() else {
            return Err(EvalError::new(
                ErrorKind::NoSession,
                "No open session to end!",
            ));
        };
        match session.close() {
            Ok(()) => {
                self.console.print("Session ended.");
                Ok(())
            }
            Err(_) => Err(EvalError::new(
                ErrorKind::Io,
                "Failed to close session file!",
            )),
        }
    }

    fn cmd_quit(&mut self) -> EvalResult<()> {
        if self.session.is_some() {
            if let Err(e) = self.end_session() {
                self.report(&e);
            }
        }
        self.console.print("Closing interpreter...");
        self.quit = true;
        Ok(())
    }

    fn cmd_help(&mut self) -> EvalResult<()> {
        self.console.print("Available commands:");
        for spec in command::REGISTRY {
            self.console.print(&format!("  {}", spec.usage));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Shape generators
    // -----------------------------------------------------------------------

    /// `path x y [closed] [solid] [curve]`, plus the convenience wrappers,
    /// which pass `forced` flags and take no flag arguments of their own.
    fn cmd_path(&mut self, args: &[String], forced: Option<PathFlags>) -> EvalResult<()> {
        self.require_session()?;
        let x = parse_number(&args[1])?;
        let y = parse_number(&args[2])?;
        let flags = match forced {
            Some(flags) => flags,
            None => PathFlags {
                closed: match args.get(3) {
                    Some(tok) => parse_flag(tok)?,
                    None => false,
                },
                solid: match args.get(4) {
                    Some(tok) => parse_flag(tok)?,
                    None => false,
                },
                curve: match args.get(5) {
                    Some(tok) => parse_flag(tok)?,
                    None => false,
                },
            },
        };
        // Interactive guidance only; a script knows what it is feeding us.
        if !self.input.in_script() {
            self.console
                .print("Enter a series of points (one tuple per line), and 'done' when finished:");
        }
        self.emit("newpath")?;
        self.emit(&format!("{} {} moveto", fmt_num(x), fmt_num(y)))?;
        self.read_points(flags)
    }

    /// The interactive point sub-loop: one `x y` pair per line, `done` to
    /// finalize. Malformed lines are reported and skipped.
    ///
    /// Curve control points are buffered and written at finalization, so the
    /// document never carries operands that no instruction consumes.
    fn read_points(&mut self, flags: PathFlags) -> EvalResult<()> {
        let mut pending: Vec<(f64, f64)> = Vec::new();
        loop {
            let Some(line) = self.next_line(": ") else {
                // Input exhausted: finalize with what we have.
                return self.finish_path(flags, &pending);
            };
            let tokens = tokenize(&line);
            match tokens.as_slice() {
                [word] if word == "done" => {
                    let points = pending.len() as u32;
                    if flags.curve && points < CURVE_MIN_POINTS {
                        let needed = CURVE_MIN_POINTS - points;
                        self.console.print(&format!(
                            "ERROR:\tCurve requires at least {CURVE_MIN_POINTS} points; enter {needed} more."
                        ));
                        continue;
                    }
                    return self.finish_path(flags, &pending);
                }
                [x, y] => {
                    let pair = parse_number(x).and_then(|px| parse_number(y).map(|py| (px, py)));
                    match pair {
                        Ok((px, py)) => {
                            if flags.curve {
                                pending.push((px, py));
                            } else {
                                self.emit(&format!("{} {} lineto", fmt_num(px), fmt_num(py)))?;
                            }
                        }
                        Err(e) => self.report(&e),
                    }
                }
                _ => self.report(&EvalError::new(ErrorKind::Usage, "<x> <y>")),
            }
        }
    }

    fn finish_path(&mut self, flags: PathFlags, pending: &[(f64, f64)]) -> EvalResult<()> {
        if flags.curve {
            if pending.len() as u32 >= CURVE_MIN_POINTS {
                for (x, y) in pending {
                    // Operands for the curveto below.
                    self.emit(&format!("{} {}", fmt_num(*x), fmt_num(*y)))?;
                }
                self.emit("curveto")?;
            } else {
                // Input ended before the curve had enough control points;
                // draw what we have so no operands are left stranded.
                for (x, y) in pending {
                    self.emit(&format!("{} {} lineto", fmt_num(*x), fmt_num(*y)))?;
                }
            }
        }
        if flags.closed {
            self.emit("closepath")?;
        }
        self.emit(if flags.solid { "fill" } else { "stroke" })?;
        self.console.print("Path finished.");
        Ok(())
    }

    fn cmd_circle(&mut self, args: &[String], solid: bool) -> EvalResult<()> {
        self.require_session()?;
        let x = parse_number(&args[1])?;
        let y = parse_number(&args[2])?;
        let r = parse_number(&args[3])?;
        self.emit(&format!(
            "{} {} {} 0 360 arc",
            fmt_num(x),
            fmt_num(y),
            fmt_num(r)
        ))?;
        self.emit(if solid { "fill" } else { "stroke" })
    }

    fn cmd_polygon(&mut self, args: &[String], forced_solid: bool) -> EvalResult<()> {
        self.require_session()?;
        let x = parse_number(&args[1])?;
        let y = parse_number(&args[2])?;
        let r = parse_number(&args[3])?;
        let n = parse_count(&args[4])?;
        if n < 3 {
            return Err(EvalError::new(
                ErrorKind::NumericParse,
                "Polygon requires at least 3 vertices!",
            ));
        }
        let solid = forced_solid
            || match args.get(5) {
                Some(tok) => parse_flag(tok)?,
                None => false,
            };
        for (i, (vx, vy)) in polygon_vertices(x, y, r, n).into_iter().enumerate() {
            let op = if i == 0 { "moveto" } else { "lineto" };
            self.emit(&format!("{} {} {op}", fmt_num(vx), fmt_num(vy)))?;
        }
        self.emit("closepath")?;
        self.emit(if solid { "fill" } else { "stroke" })
    }

    // -----------------------------------------------------------------------
    // Block constructs
    // -----------------------------------------------------------------------

    fn cmd_rotate(&mut self, args: &[String]) -> EvalResult<()> {
        self.require_session()?;
        let degrees = parse_number(&args[1])?;
        self.enter_block(BlockFrame::Rotate(degrees))
    }

    fn cmd_loop(&mut self, args: &[String]) -> EvalResult<()> {
        self.require_session()?;
        let count = parse_count(&args[1])?;
        self.enter_block(BlockFrame::Loop(count))
    }

    /// Push a block frame, run its body, pop the frame.
    ///
    /// Arguments were validated by the caller, so nothing has been emitted
    /// yet when a block aborts on a bad argument.
    fn enter_block(&mut self, frame: BlockFrame) -> EvalResult<()> {
        self.block_stack.push(frame);
        let result = self.block_body(frame);
        self.block_stack.pop();
        result
    }

    fn block_body(&mut self, frame: BlockFrame) -> EvalResult<()> {
        match frame {
            BlockFrame::Rotate(degrees) => {
                self.emit("gsave")?;
                self.emit(&format!("{} rotate", fmt_num(degrees)))?;
                self.confirmation_loop()?;
                self.emit("grestore")
            }
            BlockFrame::Loop(count) => {
                self.emit(&format!("{count} {{"))?;
                self.confirmation_loop()?;
                self.emit("} repeat")
            }
        }
    }

    /// Drive restricted evaluation: exactly one line per confirmation
    /// round, until the user answers the finished prompt affirmatively
    /// (or input ends).
    fn confirmation_loop(&mut self) -> EvalResult<()> {
        loop {
            let Some(line) = self.next_line(": ") else {
                return Ok(());
            };
            self.evaluate(&line, true);
            let Some(answer) = self.next_line("Finished with block? (y/n) ") else {
                return Ok(());
            };
            if is_affirmative(&answer) {
                return Ok(());
            }
        }
    }
}

/// An explicit yes: `y` or `yes`, ASCII case-insensitive.
fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

const fn flags(closed: bool, solid: bool, curve: bool) -> PathFlags {
    PathFlags {
        closed,
        solid,
        curve,
    }
}

fn no_session() -> EvalError {
    EvalError::new(ErrorKind::NoSession, "No active session!")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::fs;
    use std::path::PathBuf;
    use std::rc::Rc;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;
    use crate::filesystem::FileSystem;

    /// Console fed from a fixed list of lines, capturing printed output.
    struct ReplayConsole {
        lines: std::vec::IntoIter<String>,
        output: Rc<RefCell<String>>,
    }

    impl ReplayConsole {
        fn new(lines: &[&str]) -> (Self, Rc<RefCell<String>>) {
            let output = Rc::new(RefCell::new(String::new()));
            let console = Self {
                lines: lines
                    .iter()
                    .map(|s| (*s).to_owned())
                    .collect::<Vec<_>>()
                    .into_iter(),
                output: Rc::clone(&output),
            };
            (console, output)
        }
    }

    impl Console for ReplayConsole {
        fn read_line(&mut self, _prompt: &str) -> Option<String> {
            self.lines.next()
        }

        fn print(&mut self, text: &str) {
            let mut out = self.output.borrow_mut();
            out.push_str(text);
            out.push('\n');
        }
    }

    /// Script files provided from memory.
    struct MapFileSystem(HashMap<String, String>);

    impl FileSystem for MapFileSystem {
        fn read_file(&self, name: &str) -> Option<String> {
            self.0.get(name).cloned()
        }
    }

    struct TestDir {
        path: PathBuf,
    }

    impl TestDir {
        fn new(tag: &str) -> Self {
            let ts = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |d| d.as_nanos());
            let path = std::env::temp_dir().join(format!(
                "postgen_interp_{tag}_{}_{}",
                std::process::id(),
                ts
            ));
            fs::create_dir_all(&path).expect("create temp test dir");
            Self { path }
        }
    }

    impl Drop for TestDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.path);
        }
    }

    /// Run the interpreter to completion over the given console lines.
    fn run_lines(tag: &str, lines: &[&str]) -> (TestDir, Rc<RefCell<String>>) {
        let dir = TestDir::new(tag);
        let (console, output) = ReplayConsole::new(lines);
        let mut interp = Interpreter::new(Box::new(console));
        interp.set_output_dir(dir.path.clone());
        interp.run();
        (dir, output)
    }

    fn read_ps(dir: &TestDir, name: &str) -> String {
        fs::read_to_string(dir.path.join(format!("{name}.ps"))).expect("read session file")
    }

    #[test]
    fn circle_round_trip() {
        let (dir, _) = run_lines("circle", &["begin s", "circle 0 0 5", "end"]);
        assert_eq!(
            read_ps(&dir, "s"),
            "%!PS\ngsave\n0 0 5 0 360 arc\nstroke\ngrestore\nshowpage\n"
        );
    }

    #[test]
    fn solidcircle_fills() {
        let (dir, _) = run_lines("solidcircle", &["begin s", "solidcircle 1 2 3", "end"]);
        assert_eq!(
            read_ps(&dir, "s"),
            "%!PS\ngsave\n1 2 3 0 360 arc\nfill\ngrestore\nshowpage\n"
        );
    }

    #[test]
    fn drawing_without_session_writes_nothing() {
        let (dir, output) = run_lines("nosession", &["circle 0 0 5"]);
        assert!(output.borrow().contains("No active session!"));
        assert!(!dir.path.join("s.ps").exists());
    }

    #[test]
    fn arity_error_does_not_mutate_session() {
        let (dir, output) = run_lines("arity", &["begin s", "circle 1 2", "end"]);
        assert!(output.borrow().contains("Invalid number of arguments"));
        assert!(output.borrow().contains("Usage:\tcircle <x> <y> <r>"));
        assert_eq!(read_ps(&dir, "s"), "%!PS\nshowpage\n");
    }

    #[test]
    fn unknown_and_empty_commands_are_reported() {
        let (_, output) = run_lines("unknown", &["scribble 1 2", "   "]);
        let out = output.borrow();
        assert!(out.contains("ERROR: Unknown command!"), "{out}");
        assert!(out.contains("ERROR: No command provided!"), "{out}");
    }

    #[test]
    fn path_builds_open_stroked_line() {
        let (dir, output) = run_lines(
            "path",
            &["begin s", "path 0 0", "10 0", "10 10", "done", "end"],
        );
        assert_eq!(
            read_ps(&dir, "s"),
            "%!PS\ngsave\nnewpath\n0 0 moveto\n10 0 lineto\n10 10 lineto\nstroke\ngrestore\nshowpage\n"
        );
        assert!(output.borrow().contains("Path finished."));
    }

    #[test]
    fn path_skips_malformed_point_lines() {
        let (dir, output) = run_lines(
            "badpoint",
            &["begin s", "path 0 0", "ten 4", "5", "5 5", "done", "end"],
        );
        let out = output.borrow();
        assert!(out.contains("Arguments must be numbers!"), "{out}");
        assert!(out.contains("Usage:\t<x> <y>"), "{out}");
        assert_eq!(
            read_ps(&dir, "s"),
            "%!PS\ngsave\nnewpath\n0 0 moveto\n5 5 lineto\nstroke\ngrestore\nshowpage\n"
        );
    }

    #[test]
    fn wrapper_output_matches_explicit_flags() {
        let points = ["10 0", "0 10", "done", "end"];
        let mut a = vec!["begin w", "closedpath 0 0"];
        a.extend(points);
        let mut b = vec!["begin w", "path 0 0 1 0 0"];
        b.extend(points);

        let (dir_a, _) = run_lines("wrap_a", &a);
        let (dir_b, _) = run_lines("wrap_b", &b);
        assert_eq!(read_ps(&dir_a, "w"), read_ps(&dir_b, "w"));
        assert!(read_ps(&dir_a, "w").contains("closepath"));
    }

    #[test]
    fn solidcurve_matches_all_flags_set() {
        let points = ["1 1", "2 2", "3 1", "done", "end"];
        let mut a = vec!["begin w", "solidcurve 0 0"];
        a.extend(points);
        let mut b = vec!["begin w", "path 0 0 1 1 1"];
        b.extend(points);

        let (dir_a, _) = run_lines("scurve_a", &a);
        let (dir_b, _) = run_lines("scurve_b", &b);
        let ps = read_ps(&dir_a, "w");
        assert_eq!(ps, read_ps(&dir_b, "w"));
        assert_eq!(
            ps,
            "%!PS\ngsave\nnewpath\n0 0 moveto\n1 1\n2 2\n3 1\ncurveto\nclosepath\nfill\ngrestore\nshowpage\n"
        );
    }

    #[test]
    fn curve_reports_exact_deficit_and_keeps_reading() {
        let (dir, output) = run_lines(
            "deficit",
            &[
                "begin c", "curve 0 0", "1 1", "done", "2 2", "done", "3 3", "done", "end",
            ],
        );
        let out = output.borrow();
        assert!(out.contains("enter 2 more."), "{out}");
        assert!(out.contains("enter 1 more."), "{out}");
        assert_eq!(
            read_ps(&dir, "c"),
            "%!PS\ngsave\nnewpath\n0 0 moveto\n1 1\n2 2\n3 3\ncurveto\nstroke\ngrestore\nshowpage\n"
        );
    }

    #[test]
    fn eof_mid_curve_draws_pending_points_as_lines() {
        // Input ends with only two control points entered; they must be
        // consumed as line segments rather than left as stray operands.
        let (dir, _) = run_lines("curve_eof", &["begin c", "curve 0 0", "1 1", "2 2"]);
        assert_eq!(
            read_ps(&dir, "c"),
            "%!PS\ngsave\nnewpath\n0 0 moveto\n1 1 lineto\n2 2 lineto\nstroke\ngrestore\nshowpage\n"
        );
    }

    #[test]
    fn script_driven_path_omits_interactive_guidance() {
        let dir = TestDir::new("script_path");
        let (console, output) = ReplayConsole::new(&["script draw.pg"]);
        let mut interp = Interpreter::new(Box::new(console));
        interp.set_output_dir(dir.path.clone());
        interp.set_filesystem(Box::new(MapFileSystem(HashMap::from([(
            "draw.pg".to_owned(),
            "begin s\npath 0 0\n5 5\ndone\nend\n".to_owned(),
        )]))));
        interp.run();

        let out = output.borrow();
        assert!(!out.contains("Enter a series of points"), "{out}");
        assert!(out.contains("Path finished."), "{out}");
        assert!(read_ps(&dir, "s").contains("5 5 lineto"));
    }

    #[test]
    fn polygon_square_vertices_in_order() {
        let (dir, _) = run_lines("square", &["begin p", "polygon 0 0 10 4", "end"]);
        assert_eq!(
            read_ps(&dir, "p"),
            "%!PS\ngsave\n10 0 moveto\n0 10 lineto\n-10 0 lineto\n0 -10 lineto\nclosepath\nstroke\ngrestore\nshowpage\n"
        );
    }

    #[test]
    fn solidpolygon_fills() {
        let (dir, _) = run_lines("solidpoly", &["begin p", "solidpolygon 0 0 10 3", "end"]);
        let ps = read_ps(&dir, "p");
        assert!(ps.ends_with("closepath\nfill\ngrestore\nshowpage\n"), "{ps}");
    }

    #[test]
    fn polygon_rejects_too_few_vertices() {
        let (dir, output) = run_lines("degen", &["begin p", "polygon 0 0 10 2", "end"]);
        assert!(output.borrow().contains("at least 3 vertices"));
        // Only the empty gsave/grestore bracket remains.
        assert_eq!(read_ps(&dir, "p"), "%!PS\ngsave\ngrestore\nshowpage\n");
    }

    #[test]
    fn begin_over_active_session_confirmed() {
        let (dir, output) = run_lines("reopen_yes", &["begin s1", "begin s2", "y", "end"]);
        assert_eq!(read_ps(&dir, "s1"), "%!PS\nshowpage\n");
        assert_eq!(read_ps(&dir, "s2"), "%!PS\nshowpage\n");
        let out = output.borrow();
        assert!(out.contains("Session ended."), "{out}");
        assert!(out.contains("Created session: s2"), "{out}");
    }

    #[test]
    fn begin_over_active_session_declined() {
        let (dir, output) = run_lines(
            "reopen_no",
            &["begin s1", "begin s2", "n", "circle 0 0 1", "end"],
        );
        assert!(output.borrow().contains("Aborting session creation..."));
        assert!(!dir.path.join("s2.ps").exists());
        assert!(read_ps(&dir, "s1").contains("0 0 1 0 360 arc"));
    }

    #[test]
    fn end_without_session_is_reported() {
        let (_, output) = run_lines("no_end", &["end"]);
        assert!(output.borrow().contains("No open session to end!"));
    }

    #[test]
    fn rotate_block_isolates_rotation() {
        let (dir, _) = run_lines(
            "rotate",
            &["begin r", "rotate 45", "circle 0 0 5", "y", "end"],
        );
        // Nested drawing commands are not individually bracketed.
        assert_eq!(
            read_ps(&dir, "r"),
            "%!PS\ngsave\n45 rotate\n0 0 5 0 360 arc\nstroke\ngrestore\nshowpage\n"
        );
    }

    #[test]
    fn loop_emits_literal_count() {
        // Two confirmation rounds, but the repeat count stays 3.
        let (dir, _) = run_lines(
            "loop",
            &[
                "begin l", "loop 3", "circle 0 0 1", "n", "circle 0 0 2", "y", "end",
            ],
        );
        assert_eq!(
            read_ps(&dir, "l"),
            "%!PS\n3 {\n0 0 1 0 360 arc\nstroke\n0 0 2 0 360 arc\nstroke\n} repeat\nshowpage\n"
        );
    }

    #[test]
    fn restricted_mode_hides_admin_commands() {
        let (dir, output) = run_lines(
            "restricted",
            &["begin b", "rotate 10", "end", "y", "end"],
        );
        assert!(output.borrow().contains("ERROR: Unknown command!"));
        assert_eq!(
            read_ps(&dir, "b"),
            "%!PS\ngsave\n10 rotate\ngrestore\nshowpage\n"
        );
    }

    #[test]
    fn block_aborts_on_bad_argument_before_emitting() {
        let (dir, output) = run_lines("badblock", &["begin r", "rotate sideways", "end"]);
        assert!(output.borrow().contains("Arguments must be numbers!"));
        assert_eq!(read_ps(&dir, "r"), "%!PS\nshowpage\n");
    }

    #[test]
    fn block_without_session_is_refused() {
        let (_, output) = run_lines("block_nosession", &["rotate 45"]);
        assert!(output.borrow().contains("No active session!"));
    }

    #[test]
    fn quit_closes_open_session() {
        let dir = TestDir::new("quit");
        let (console, output) = ReplayConsole::new(&["begin q", "circle 0 0 1", "quit"]);
        let mut interp = Interpreter::new(Box::new(console));
        interp.set_output_dir(dir.path.clone());
        interp.run();

        assert!(interp.quit_requested());
        assert!(!interp.has_session());
        assert!(output.borrow().contains("Closing interpreter..."));
        assert!(read_ps(&dir, "q").ends_with("showpage\n"));
    }

    #[test]
    fn end_of_input_auto_closes_session() {
        let (dir, output) = run_lines("eof", &["begin s", "circle 0 0 5"]);
        assert!(output.borrow().contains("closing open session"));
        assert!(read_ps(&dir, "s").ends_with("showpage\n"));
    }

    #[test]
    fn script_command_runs_file_lines() {
        let dir = TestDir::new("script");
        let (console, _) = ReplayConsole::new(&["script draw.pg"]);
        let mut interp = Interpreter::new(Box::new(console));
        interp.set_output_dir(dir.path.clone());
        interp.set_filesystem(Box::new(MapFileSystem(HashMap::from([(
            "draw.pg".to_owned(),
            "begin art\ncircle 0 0 5\nend\n".to_owned(),
        )]))));
        interp.run();

        assert_eq!(
            read_ps(&dir, "art"),
            "%!PS\ngsave\n0 0 5 0 360 arc\nstroke\ngrestore\nshowpage\n"
        );
    }

    #[test]
    fn script_requires_suffix_before_io() {
        // NullFileSystem would fail the read; the suffix check must fire first.
        let (_, output) = run_lines("suffix", &["script draw.txt"]);
        assert!(output.borrow().contains("Script files must end in .pg!"));
    }

    #[test]
    fn script_closes_open_session_with_notice() {
        let dir = TestDir::new("script_close");
        let (console, output) = ReplayConsole::new(&["begin old", "script draw.pg"]);
        let mut interp = Interpreter::new(Box::new(console));
        interp.set_output_dir(dir.path.clone());
        interp.set_filesystem(Box::new(MapFileSystem(HashMap::from([(
            "draw.pg".to_owned(),
            "begin new\nend\n".to_owned(),
        )]))));
        interp.run();

        assert!(output
            .borrow()
            .contains("Closing active session before running script."));
        assert_eq!(read_ps(&dir, "old"), "%!PS\nshowpage\n");
        assert_eq!(read_ps(&dir, "new"), "%!PS\nshowpage\n");
    }

    #[test]
    fn help_lists_every_command() {
        let (_, output) = run_lines("help", &["help"]);
        let out = output.borrow();
        for spec in command::REGISTRY {
            assert!(out.contains(spec.usage), "missing usage for {}", spec.name);
        }
    }

    #[test]
    fn affirmative_answers() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y"));
        assert!(is_affirmative(" yes "));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("yep"));
    }
}
