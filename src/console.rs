//! Retro console screen: the text a user sees after each action.

use std::fmt::Write as _;

use matcher::{MatchError, MatchHit, VibeMatcher};

pub const IDLE_SCREEN: &str = "> WAITING FOR VIBE INPUT...\n\n> USE CONTROLS ON LEFT.";
pub const CLEARED_SCREEN: &str = "> CLEARED.\n> WAITING FOR VIBE INPUT...";
pub const EMPTY_VIBE_SCREEN: &str = "> ERROR: VIBE INPUT IS EMPTY.\n> PLEASE ENTER A VIBE.";
pub const NO_MATCHES: &str = "> NO MATCHES FOUND.\n> TRY A DIFFERENT VIBE?";
const RULE: &str = "================================";

/// Quick-pick vibes offered next to the input.
pub const EXAMPLE_VIBES: [&str; 4] = [
    "Rainy day in a Tokyo cafe",
    "Cyberpunk street market",
    "Cozy academic library",
    "Minimalist art gallery",
];

/// Bound a requested result count to `1..=catalog_len`.
pub fn clamp_top_n(requested: usize, catalog_len: usize) -> usize {
    requested.clamp(1, catalog_len.max(1))
}

/// Render ranked hits for `query` as console text.
pub fn render_results(query: &str, hits: &[MatchHit<'_>]) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "> QUERY: '{query}'\n> FOUND {} MATCH(ES):\n{RULE}\n\n",
        hits.len()
    );
    if hits.is_empty() {
        out.push_str(NO_MATCHES);
        return out;
    }
    for (i, hit) in hits.iter().enumerate() {
        let _ = write!(
            out,
            "=== MATCH {} / SCORE: {:.1}% === {}\nNAME: {}\nDESC: {}\n\n",
            i + 1,
            hit.score * 100.0,
            hit.glyph(),
            hit.item.name,
            hit.item.description
        );
    }
    out
}

/// Transient display state: the vibe being edited and the current screen text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Console {
    vibe: String,
    screen: String,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    pub fn new() -> Self {
        Self {
            vibe: String::new(),
            screen: IDLE_SCREEN.to_string(),
        }
    }

    pub fn vibe(&self) -> &str {
        &self.vibe
    }

    pub fn screen(&self) -> &str {
        &self.screen
    }

    pub fn set_vibe(&mut self, vibe: impl Into<String>) {
        self.vibe = vibe.into();
    }

    /// Load example `index` (0-based) into the vibe. Returns the example, if it exists.
    pub fn pick_example(&mut self, index: usize) -> Option<&'static str> {
        let example = EXAMPLE_VIBES.get(index).copied()?;
        self.set_vibe(example);
        Some(example)
    }

    pub fn clear(&mut self) {
        self.vibe.clear();
        self.screen = CLEARED_SCREEN.to_string();
    }

    /// Run the current vibe through `matcher` and update the screen.
    ///
    /// A blank vibe shows the input error without touching the engine.
    pub fn find(&mut self, matcher: &VibeMatcher, top_n: usize) -> Result<&str, MatchError> {
        if self.vibe.trim().is_empty() {
            self.screen = EMPTY_VIBE_SCREEN.to_string();
            return Ok(&self.screen);
        }
        let top_n = clamp_top_n(top_n, matcher.catalog().len());
        let hits = matcher.find_matches(&self.vibe, top_n)?;
        self.screen = render_results(&self.vibe, &hits);
        Ok(&self.screen)
    }
}

/// One line typed at the interactive console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// `:quit` or `:q`.
    Quit,
    /// `:clear`.
    Clear,
    /// `:example <n>` with `n` 1-based as typed; holds the 0-based index.
    Example(usize),
    /// `:top <n>`.
    Top(usize),
    /// A vibe to search. A blank line searches the vibe already loaded.
    Find(Option<String>),
    /// A command with a missing or bad argument; holds the usage hint.
    Usage(String),
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Find(None);
        }
        let (head, arg) = line.split_once(' ').unwrap_or((line, ""));
        let arg = arg.trim();
        match head {
            ":quit" | ":q" => Self::Quit,
            ":clear" => Self::Clear,
            ":example" => match arg.parse::<usize>() {
                Ok(n) if (1..=EXAMPLE_VIBES.len()).contains(&n) => Self::Example(n - 1),
                _ => Self::Usage(format!(
                    "pick an example between 1 and {}",
                    EXAMPLE_VIBES.len()
                )),
            },
            ":top" => match arg.parse::<usize>() {
                Ok(n) => Self::Top(n),
                Err(_) => Self::Usage("usage: :top <n>".to_string()),
            },
            _ => Self::Find(Some(line.to_string())),
        }
    }
}

/// What the console loop should show after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleReply {
    /// Redraw [`Console::screen`].
    Screen,
    /// Print a one-line note; the screen is unchanged.
    Note(String),
    Quit,
}

impl Console {
    /// Apply `command`. `top_n` is the result-count selector, updated by `:top`.
    ///
    /// Picking an example only loads it into the vibe; the search runs on the next `Find`.
    pub fn handle(
        &mut self,
        command: ConsoleCommand,
        matcher: &VibeMatcher,
        top_n: &mut usize,
    ) -> Result<ConsoleReply, MatchError> {
        let reply = match command {
            ConsoleCommand::Quit => ConsoleReply::Quit,
            ConsoleCommand::Clear => {
                self.clear();
                ConsoleReply::Screen
            }
            ConsoleCommand::Example(index) => match self.pick_example(index) {
                Some(vibe) => ConsoleReply::Note(format!("> {vibe}")),
                None => ConsoleReply::Note(format!(
                    "pick an example between 1 and {}",
                    EXAMPLE_VIBES.len()
                )),
            },
            ConsoleCommand::Top(n) => {
                *top_n = clamp_top_n(n, matcher.catalog().len());
                ConsoleReply::Note(format!("showing up to {top_n} matches"))
            }
            ConsoleCommand::Find(vibe) => {
                if let Some(vibe) = vibe {
                    self.set_vibe(vibe);
                }
                self.find(matcher, *top_n)?;
                ConsoleReply::Screen
            }
            ConsoleCommand::Usage(hint) => ConsoleReply::Note(hint),
        };
        Ok(reply)
    }
}
