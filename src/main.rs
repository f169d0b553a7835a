use clap::Subcommand;

mod cli_exec;
mod cli_runtime;

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal UI (the default)
    Tui,

    /// Load everything, run the monitor and stream the activity log until Ctrl-C
    Watch,

    /// Allocate memory blocks
    Allocate {
        /// Number of blocks
        size: u64,
        /// first, best or worst (defaults to config)
        #[arg(long)]
        algorithm: Option<String>,
    },

    /// Free one allocated block
    Deallocate { block_id: i64 },

    /// Free a random allocated block
    DeallocateRandom,

    /// Reset simulated memory
    Reset,

    /// Create a process
    CreateProcess {
        name: String,
        #[arg(default_value_t = 10)]
        size: u64,
    },

    /// Move a process from RAM to swap
    SwapOut { process_id: String },

    /// Move a process from swap to RAM
    SwapIn { process_id: String },

    /// Run a page replacement simulation
    PageReplacement {
        /// fifo, lru or optimal (defaults to config)
        #[arg(long)]
        algorithm: Option<String>,
    },

    /// Run garbage collection
    Gc,

    /// Print a snapshot of every panel
    Status,
}

fn main() {
    if let Err(err) = cli_runtime::run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
