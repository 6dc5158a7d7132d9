//! The `PostGen` command registry.
//!
//! Every command maps to a [`CommandSpec`]: an identifier for dispatch, a
//! kind that controls visibility and transform bracketing, an accepted
//! argument-count range, and a usage string for arity errors. The table is
//! static; lookup is by exact, case-sensitive name.

// ---------------------------------------------------------------------------
// Command identifiers
// ---------------------------------------------------------------------------

/// Dispatch identifier for each registered command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandId {
    /// `path x y [closed] [solid] [curve]` — interactive path builder.
    Path,
    /// `closedpath x y` — `path` with closed set.
    ClosedPath,
    /// `solidpath x y` — `path` with closed and solid set.
    SolidPath,
    /// `curve x y` — `path` with curve set.
    Curve,
    /// `closedcurve x y` — `path` with closed and curve set.
    ClosedCurve,
    /// `solidcurve x y` — `path` with all three flags set.
    SolidCurve,
    /// `circle x y r` — stroked full circle.
    Circle,
    /// `solidcircle x y r` — filled full circle.
    SolidCircle,
    /// `polygon x y r n [solid]` — regular n-gon.
    Polygon,
    /// `solidpolygon x y r n` — filled regular n-gon.
    SolidPolygon,
    /// `rotate degrees` — rotated block construct.
    Rotate,
    /// `loop count` — repeated block construct.
    Loop,
    /// `begin name` — open a session.
    Begin,
    /// `end` — finalize and close the session.
    End,
    /// `script file` — run a script file.
    Script,
    /// `help` — list available commands.
    Help,
    /// `quit` — close any session and exit.
    Quit,
}

/// Syntactic role of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// A drawing primitive. The only kind visible in restricted mode;
    /// bracketed by `gsave`/`grestore` at top level.
    Drawing,
    /// A block construct (`rotate`, `loop`). Drives restricted evaluation.
    Block,
    /// Session control, scripts, help, quit. Invisible in restricted mode.
    Admin,
}

// ---------------------------------------------------------------------------
// Command specs
// ---------------------------------------------------------------------------

/// One registry entry.
///
/// `min_args`/`max_args` count the full token list including the command
/// name itself, so a bare command has arity 1.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    /// Command name as typed by the user.
    pub name: &'static str,
    /// Dispatch identifier.
    pub id: CommandId,
    /// Syntactic role.
    pub kind: CommandKind,
    /// Minimum accepted token count (inclusive).
    pub min_args: usize,
    /// Maximum accepted token count (inclusive).
    pub max_args: usize,
    /// Usage string shown on arity errors.
    pub usage: &'static str,
}

impl CommandSpec {
    /// Whether `argc` tokens (command name included) are acceptable.
    #[must_use]
    pub const fn arity_ok(&self, argc: usize) -> bool {
        argc >= self.min_args && argc <= self.max_args
    }
}

/// The full command table, registered once.
pub const REGISTRY: &[CommandSpec] = &[
    CommandSpec {
        name: "path",
        id: CommandId::Path,
        kind: CommandKind::Drawing,
        min_args: 3,
        max_args: 6,
        usage: "path <start_x> <start_y> [closed] [solid] [curve]",
    },
    CommandSpec {
        name: "closedpath",
        id: CommandId::ClosedPath,
        kind: CommandKind::Drawing,
        min_args: 3,
        max_args: 3,
        usage: "closedpath <start_x> <start_y>",
    },
    CommandSpec {
        name: "solidpath",
        id: CommandId::SolidPath,
        kind: CommandKind::Drawing,
        min_args: 3,
        max_args: 3,
        usage: "solidpath <start_x> <start_y>",
    },
    CommandSpec {
        name: "curve",
        id: CommandId::Curve,
        kind: CommandKind::Drawing,
        min_args: 3,
        max_args: 3,
        usage: "curve <start_x> <start_y>",
    },
    CommandSpec {
        name: "closedcurve",
        id: CommandId::ClosedCurve,
        kind: CommandKind::Drawing,
        min_args: 3,
        max_args: 3,
        usage: "closedcurve <start_x> <start_y>",
    },
    CommandSpec {
        name: "solidcurve",
        id: CommandId::SolidCurve,
        kind: CommandKind::Drawing,
        min_args: 3,
        max_args: 3,
        usage: "solidcurve <start_x> <start_y>",
    },
    CommandSpec {
        name: "circle",
        id: CommandId::Circle,
        kind: CommandKind::Drawing,
        min_args: 4,
        max_args: 4,
        usage: "circle <x> <y> <r>",
    },
    CommandSpec {
        name: "solidcircle",
        id: CommandId::SolidCircle,
        kind: CommandKind::Drawing,
        min_args: 4,
        max_args: 4,
        usage: "solidcircle <x> <y> <r>",
    },
    CommandSpec {
        name: "polygon",
        id: CommandId::Polygon,
        kind: CommandKind::Drawing,
        min_args: 5,
        max_args: 6,
        usage: "polygon <x> <y> <r> <n> [solid]",
    },
    CommandSpec {
        name: "solidpolygon",
        id: CommandId::SolidPolygon,
        kind: CommandKind::Drawing,
        min_args: 5,
        max_args: 5,
        usage: "solidpolygon <x> <y> <r> <n>",
    },
    CommandSpec {
        name: "rotate",
        id: CommandId::Rotate,
        kind: CommandKind::Block,
        min_args: 2,
        max_args: 2,
        usage: "rotate <degrees>",
    },
    CommandSpec {
        name: "loop",
        id: CommandId::Loop,
        kind: CommandKind::Block,
        min_args: 2,
        max_args: 2,
        usage: "loop <count>",
    },
    CommandSpec {
        name: "begin",
        id: CommandId::Begin,
        kind: CommandKind::Admin,
        min_args: 2,
        max_args: 2,
        usage: "begin <session_name>",
    },
    CommandSpec {
        name: "end",
        id: CommandId::End,
        kind: CommandKind::Admin,
        min_args: 1,
        max_args: 1,
        usage: "end",
    },
    CommandSpec {
        name: "script",
        id: CommandId::Script,
        kind: CommandKind::Admin,
        min_args: 2,
        max_args: 2,
        usage: "script <filename.pg>",
    },
    CommandSpec {
        name: "help",
        id: CommandId::Help,
        kind: CommandKind::Admin,
        min_args: 1,
        max_args: 1,
        usage: "help",
    },
    CommandSpec {
        name: "quit",
        id: CommandId::Quit,
        kind: CommandKind::Admin,
        min_args: 1,
        max_args: 1,
        usage: "quit",
    },
];

/// Look up a command by exact, case-sensitive name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    REGISTRY.iter().find(|spec| spec.name == name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
