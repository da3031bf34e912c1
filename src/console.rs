use std::{collections::VecDeque, str::FromStr};

use log::{info, warn};
use memfit::{Address, Allocator, Block, Strategy, UnknownStrategy};
use thiserror::Error;

/// How many outcome messages the history keeps around.
const HISTORY_CAPACITY: usize = 12;

const HELP: &str = "\
commands:
  start <size> <addr> <strategy>   begin a session (first, next, best or worst fit)
  alloc <size>                     allocate a block of <size> cells
  free <addr>                      free the block starting at <addr>
  map                              show the memory map
  history                          show the latest outcomes
  reset                            discard the running session
  help                             show this message
  quit                             leave";

/// One line of user input, parsed and vetted. The engine
/// assumes positive sizes and numeric addresses, so everything
/// the user types is checked here before reaching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start {
        total_size: usize,
        base_addr: Address,
        strategy: Strategy,
    },
    Alloc { size: usize },
    Free { addr: Address },
    Map,
    History,
    Reset,
    Help,
    Quit,
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("empty input")]
    Empty,
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("missing {what}")]
    MissingArgument { what: &'static str },
    #[error("invalid {what} '{value}'")]
    InvalidNumber { what: &'static str, value: String },
    #[error("{what} must be larger than 0")]
    NotPositive { what: &'static str },
    #[error(transparent)]
    UnknownStrategy(#[from] UnknownStrategy),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            return Err(CommandError::Empty);
        };

        let command = match keyword {
            "start" => Command::Start {
                total_size: parse_positive("memory size", words.next())?,
                base_addr: parse_number("start address", words.next())?,
                strategy: words
                    .next()
                    .ok_or(CommandError::MissingArgument {
                        what: "placement strategy",
                    })?
                    .parse()?,
            },
            "alloc" => Command::Alloc {
                size: parse_positive("allocation size", words.next())?,
            },
            "free" => Command::Free {
                addr: parse_number("block address", words.next())?,
            },
            "map" => Command::Map,
            "history" => Command::History,
            "reset" => Command::Reset,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}

fn parse_number(what: &'static str, word: Option<&str>) -> Result<usize, CommandError> {
    let word = word.ok_or(CommandError::MissingArgument { what })?;

    word.parse().map_err(|_| CommandError::InvalidNumber {
        what,
        value: word.to_string(),
    })
}

fn parse_positive(what: &'static str, word: Option<&str>) -> Result<usize, CommandError> {
    let value = parse_number(what, word)?;
    if value == 0 {
        return Err(CommandError::NotPositive { what });
    }

    Ok(value)
}

/// Terminal session around one allocator. Commands arrive as
/// text lines; outcomes go back as messages, and the latest
/// ones are kept in a bounded history for the `history`
/// command to replay.
pub struct Console {
    session: Option<Allocator>,
    history: History,
}

impl Console {
    pub fn new() -> Self {
        Self {
            session: None,
            history: History::new(HISTORY_CAPACITY),
        }
    }

    /// Runs one input line and returns the text to show, or
    /// `None` when the user asked to leave.
    pub fn execute(&mut self, line: &str) -> Option<String> {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(error) => {
                warn!("Rejected input: {error}");
                return Some(self.outcome(format!("error: {error}")));
            }
        };

        match command {
            Command::Quit => None,
            Command::Help => Some(HELP.to_string()),
            Command::History => Some(self.history.render()),
            Command::Map => match &self.session {
                Some(allocator) => Some(render_map(allocator)),
                None => Some(self.outcome(NO_SESSION.to_string())),
            },
            Command::Start {
                total_size,
                base_addr,
                strategy,
            } => {
                let message = if self.session.is_some() {
                    "a session is already running, 'reset' to start over".to_string()
                } else {
                    self.session = Some(Allocator::new(total_size, base_addr, strategy));
                    info!("Started a {strategy} session of {total_size} cells at {base_addr}.");
                    format!(
                        "started: {total_size} cells at base address {base_addr}, \
                         {strategy} placement"
                    )
                };
                Some(self.outcome(message))
            }
            Command::Alloc { size } => {
                Some(self.with_session(|allocator| match allocator.allocate_block(size) {
                    Some(block) => format!("allocated {size} cells at address {}", block.addr),
                    None => format!("failed to allocate {size} cells"),
                }))
            }
            Command::Free { addr } => {
                Some(self.with_session(|allocator| match allocator.free_block(addr) {
                    Some(block) => format!("freed {} cells at address {}", block.size, block.addr),
                    None => format!("no allocated block at address {addr}"),
                }))
            }
            Command::Reset => {
                self.session = None;
                self.history.clear();
                info!("Session reset.");
                Some(self.outcome("session reset".to_string()))
            }
        }
    }

    /// Applies `operation` to the running allocator, or
    /// reports that none is running yet.
    fn with_session(&mut self, operation: impl FnOnce(&mut Allocator) -> String) -> String {
        let message = match &mut self.session {
            Some(allocator) => operation(allocator),
            None => NO_SESSION.to_string(),
        };

        self.outcome(message)
    }

    /// Records a message in the history before handing it back
    /// for display.
    fn outcome(&mut self, message: String) -> String {
        self.history.push(&message);
        message
    }
}

const NO_SESSION: &str = "no session running, use 'start' first";

/// Renders the whole range in address order, free and
/// allocated blocks interleaved. The running strategy may keep
/// its free list in size order, so the rows are re-sorted by
/// address for display.
fn render_map(allocator: &Allocator) -> String {
    let mut rows: Vec<(Block, bool)> = allocator
        .free_blocks()
        .iter()
        .map(|&block| (block, true))
        .chain(allocator.allocated().iter().map(|&block| (block, false)))
        .collect();
    rows.sort_by_key(|(block, _)| block.addr);

    let end = allocator.base_addr() + allocator.total_size();
    let mut lines = vec![format!(
        "memory [{}..{}), {} cells",
        allocator.base_addr(),
        end,
        allocator.total_size()
    )];
    lines.extend(rows.iter().map(|(block, is_free)| {
        format!(
            "  {:>6} .. {:<6} {} ({} cells)",
            block.addr,
            block.end(),
            if *is_free { "free" } else { "used" },
            block.size,
        )
    }));

    lines.join("\n")
}

/// Bounded queue of the latest outcome messages, rendered
/// newest first.
struct History {
    messages: VecDeque<String>,
    capacity: usize,
}

impl History {
    fn new(capacity: usize) -> Self {
        Self {
            messages: VecDeque::new(),
            capacity,
        }
    }

    fn push(&mut self, message: &str) {
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message.to_string());
    }

    fn render(&self) -> String {
        if self.messages.is_empty() {
            return "no history yet".to_string();
        }

        self.messages
            .iter()
            .rev()
            .cloned()
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn clear(&mut self) {
        self.messages.clear();
    }
}
