//! Line input system for the evaluator.
//!
//! Lines normally come from the console, but the `script` command pushes a
//! file's lines as a new input level. Levels form a stack: the evaluator
//! always reads from the innermost script until it is exhausted, then falls
//! back to the level below, and finally to the console. Prompts are only
//! shown when the console is actually consulted.

use crate::console::Console;

// ---------------------------------------------------------------------------
// Input levels
// ---------------------------------------------------------------------------

/// One script on the input stack.
struct ScriptLevel {
    /// The script's lines.
    lines: Vec<String>,
    /// Next line to hand out.
    pos: usize,
}

impl ScriptLevel {
    fn next(&mut self) -> Option<String> {
        let line = self.lines.get(self.pos)?.clone();
        self.pos += 1;
        Some(line)
    }

    fn is_exhausted(&self) -> bool {
        self.pos >= self.lines.len()
    }
}

// ---------------------------------------------------------------------------
// Input system
// ---------------------------------------------------------------------------

/// A stack of script input levels over the base console.
pub struct InputSystem {
    /// Active scripts (top = currently reading).
    levels: Vec<ScriptLevel>,
}

impl InputSystem {
    /// Create an empty input system (console only).
    #[must_use]
    pub const fn new() -> Self {
        Self { levels: Vec::new() }
    }

    /// Push a script's contents as a new input level.
    pub fn push_script(&mut self, text: &str) {
        self.levels.push(ScriptLevel {
            lines: text.lines().map(str::to_owned).collect(),
            pos: 0,
        });
    }

    /// Get the next input line, popping exhausted script levels.
    ///
    /// A level is popped as soon as its final line is handed out, so
    /// [`InputSystem::in_script`] reflects remaining input. Falls back to
    /// `console.read_line(prompt)` when no script is active; `None` means
    /// the console itself reached end of input.
    pub fn next_line(&mut self, prompt: &str, console: &mut dyn Console) -> Option<String> {
        while let Some(level) = self.levels.last_mut() {
            match level.next() {
                Some(line) => {
                    if level.is_exhausted() {
                        self.levels.pop();
                    }
                    return Some(line);
                }
                None => {
                    self.levels.pop();
                }
            }
        }
        console.read_line(prompt)
    }

    /// Whether a script is currently driving the evaluator.
    #[must_use]
    pub fn in_script(&self) -> bool {
        !self.levels.is_empty()
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
