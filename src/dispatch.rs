//! Maps user-initiated triggers to coordinator calls.
//!
//! Typed commands and keyboard shortcuts resolve to the same [`Trigger`]
//! entries, so both go through the same gate.

use tokio::sync::mpsc;

use crate::coordinator::{Coordinator, Operation};
use crate::error::{CommandResult, Outcome};
use crate::model::BlockId;
use crate::monitor::{self, Connectivity};

pub const ALLOCATION_ALGORITHMS: &[&str] = &["first", "best", "worst"];
pub const PAGE_ALGORITHMS: &[&str] = &["fifo", "lru", "optimal"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    Allocate,
    Deallocate(BlockId),
    DeallocateRandom,
    Reset,
    CreateProcess,
    SwapOut,
    SwapIn,
    PageReplacement,
    GarbageCollect,
    Refresh,
    Reconnect,
}

#[derive(Clone, Copy, Debug)]
pub struct CommandDef {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub usage: &'static str,
    pub help: &'static str,
}

pub fn command_defs() -> Vec<CommandDef> {
    vec![
        CommandDef {
            name: "allocate",
            aliases: &["alloc", "a"],
            usage: "allocate [size] [first|best|worst]",
            help: "Allocate memory blocks",
        },
        CommandDef {
            name: "deallocate",
            aliases: &["free"],
            usage: "deallocate <block-id>",
            help: "Free one allocated block",
        },
        CommandDef {
            name: "deallocate-random",
            aliases: &["dr"],
            usage: "deallocate-random",
            help: "Free a random allocated block",
        },
        CommandDef {
            name: "reset",
            aliases: &[],
            usage: "reset",
            help: "Reset simulated memory",
        },
        CommandDef {
            name: "create-process",
            aliases: &["cp", "spawn"],
            usage: "create-process [name] [size]",
            help: "Create a process",
        },
        CommandDef {
            name: "swap-out",
            aliases: &["so"],
            usage: "swap-out [process-id]",
            help: "Move a process from RAM to swap",
        },
        CommandDef {
            name: "swap-in",
            aliases: &["si"],
            usage: "swap-in [process-id]",
            help: "Move a process from swap to RAM",
        },
        CommandDef {
            name: "page-replacement",
            aliases: &["pr"],
            usage: "page-replacement [fifo|lru|optimal]",
            help: "Run a page replacement simulation",
        },
        CommandDef {
            name: "gc",
            aliases: &["garbage-collect"],
            usage: "gc",
            help: "Run garbage collection",
        },
        CommandDef {
            name: "refresh",
            aliases: &["r"],
            usage: "refresh",
            help: "Reload the stats snapshot",
        },
        CommandDef {
            name: "reconnect",
            aliases: &[],
            usage: "reconnect",
            help: "Reload everything from the simulator",
        },
    ]
}

/// Ctrl/Meta + key shortcuts.
pub const SHORTCUTS: &[(char, Trigger)] = &[
    ('r', Trigger::Reset),
    ('m', Trigger::Allocate),
    ('g', Trigger::GarbageCollect),
];

pub fn shortcut(key: char) -> Option<Trigger> {
    let key = key.to_ascii_lowercase();
    SHORTCUTS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, trigger)| *trigger)
}

/// Raw contents of the input fields. Parsing happens at dispatch time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormState {
    pub memory_size: String,
    pub allocation_algorithm: String,
    pub process_name: String,
    pub process_size: String,
    pub swap_process_id: String,
    pub page_algorithm: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            memory_size: "1".to_string(),
            allocation_algorithm: ALLOCATION_ALGORITHMS[0].to_string(),
            process_name: String::new(),
            process_size: "10".to_string(),
            swap_process_id: String::new(),
            page_algorithm: PAGE_ALGORITHMS[0].to_string(),
        }
    }
}

/// Resolve a typed command line into a trigger, copying positional
/// arguments into `form`.
pub fn parse_command(line: &str, form: &mut FormState) -> Result<Trigger, String> {
    let mut tokens = line.split_whitespace();
    let Some(first) = tokens.next() else {
        return Err("empty command".to_string());
    };
    let first = first.trim_start_matches('/').to_lowercase();
    let args = tokens.collect::<Vec<_>>();

    let defs = command_defs();
    let name = defs
        .iter()
        .find(|d| d.name == first || d.aliases.contains(&first.as_str()))
        .map(|d| d.name)
        .ok_or_else(|| format!("unknown command: {}", first))?;

    let trigger = match name {
        "allocate" => {
            if let Some(size) = args.first() {
                form.memory_size = size.to_string();
            }
            if let Some(alg) = args.get(1) {
                form.allocation_algorithm = alg.to_string();
            }
            Trigger::Allocate
        }
        "deallocate" => {
            let raw = args
                .first()
                .ok_or_else(|| "usage: deallocate <block-id>".to_string())?;
            let id = raw
                .parse::<BlockId>()
                .map_err(|_| format!("invalid block id: {}", raw))?;
            Trigger::Deallocate(id)
        }
        "deallocate-random" => Trigger::DeallocateRandom,
        "reset" => Trigger::Reset,
        "create-process" => {
            if let Some(name) = args.first() {
                form.process_name = name.to_string();
            }
            if let Some(size) = args.get(1) {
                form.process_size = size.to_string();
            }
            Trigger::CreateProcess
        }
        "swap-out" | "swap-in" => {
            if let Some(id) = args.first() {
                form.swap_process_id = id.to_string();
            }
            if name == "swap-out" {
                Trigger::SwapOut
            } else {
                Trigger::SwapIn
            }
        }
        "page-replacement" => {
            if let Some(alg) = args.first() {
                form.page_algorithm = alg.to_string();
            }
            Trigger::PageReplacement
        }
        "gc" => Trigger::GarbageCollect,
        "refresh" => Trigger::Refresh,
        _ => Trigger::Reconnect,
    };
    Ok(trigger)
}

#[derive(Clone)]
pub struct Dispatcher {
    coordinator: Coordinator,
    signals: Option<mpsc::UnboundedSender<Connectivity>>,
}

impl Dispatcher {
    pub fn new(coordinator: Coordinator) -> Self {
        Self {
            coordinator,
            signals: None,
        }
    }

    /// Route `reconnect` through the monitor's connectivity channel.
    pub fn with_signals(mut self, signals: mpsc::UnboundedSender<Connectivity>) -> Self {
        self.signals = Some(signals);
        self
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    pub async fn dispatch(&self, trigger: Trigger, form: &FormState) -> CommandResult {
        let c = &self.coordinator;
        match trigger {
            Trigger::Allocate => {
                let size = match parse_size(&form.memory_size) {
                    Some(size) => size,
                    None => {
                        return c.reject(
                            Operation::Allocate,
                            format!("Invalid memory size: {:?}", form.memory_size.trim()),
                        );
                    }
                };
                c.allocate(size, &form.allocation_algorithm).await
            }
            Trigger::Deallocate(id) => c.deallocate(id).await,
            Trigger::DeallocateRandom => c.deallocate_random().await,
            Trigger::Reset => c.reset().await,
            Trigger::CreateProcess => {
                let size = match parse_size(&form.process_size) {
                    Some(size) => size,
                    None => {
                        return c.reject(
                            Operation::CreateProcess,
                            format!("Invalid process size: {:?}", form.process_size.trim()),
                        );
                    }
                };
                c.create_process(&form.process_name, size).await
            }
            Trigger::SwapOut => c.swap_out(&form.swap_process_id).await,
            Trigger::SwapIn => c.swap_in(&form.swap_process_id).await,
            Trigger::PageReplacement => c.simulate_page_replacement(&form.page_algorithm).await,
            Trigger::GarbageCollect => c.garbage_collect().await,
            Trigger::Refresh => {
                monitor::refresh_stats(c).await?;
                Ok(Outcome::Applied)
            }
            Trigger::Reconnect => {
                match &self.signals {
                    Some(tx) if tx.send(Connectivity::Restored).is_ok() => {}
                    _ => c.initialize().await,
                }
                Ok(Outcome::Applied)
            }
        }
    }
}

/// A strictly positive integer, or `None`.
pub fn parse_size(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|n| *n > 0)
}

#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod tests;
