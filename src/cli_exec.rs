use anyhow::{Context, Result};

use memsim::activity_log::{Level, LogEntry};
use memsim::config::Config;
use memsim::coordinator::Coordinator;
use memsim::dispatch::{Dispatcher, FormState, Trigger};
use memsim::monitor::Monitor;
use memsim::projection::Views;
use memsim::session;

use crate::Commands;
use crate::cli_runtime::connect;

/// Run a headless command. `tui` is handled by the caller.
pub(crate) async fn handle_command(cfg: &Config, command: Commands) -> Result<()> {
    let coordinator = connect(cfg)?;
    match command {
        Commands::Watch => watch(cfg, coordinator).await,
        Commands::Status => {
            coordinator.initialize().await;
            print_log(&coordinator, 0);
            let views = session::lock(coordinator.session()).views().clone();
            print_views(&views);
            Ok(())
        }
        command => {
            let mut form = cfg.initial_form();
            let Some(trigger) = one_shot_trigger(command, &mut form) else {
                anyhow::bail!("not a one-shot command");
            };
            if trigger == Trigger::DeallocateRandom {
                // The candidate set comes from the mirrored memory map.
                coordinator.initialize().await;
            }
            let cursor = session::lock(coordinator.session()).log().appended();
            let result = Dispatcher::new(coordinator.clone())
                .dispatch(trigger, &form)
                .await;
            print_log(&coordinator, cursor);
            result.map(|_| ()).context("command failed")
        }
    }
}

/// Map a one-shot subcommand to its trigger, copying its arguments into
/// `form`.
fn one_shot_trigger(command: Commands, form: &mut FormState) -> Option<Trigger> {
    let trigger = match command {
        Commands::Allocate { size, algorithm } => {
            form.memory_size = size.to_string();
            if let Some(algorithm) = algorithm {
                form.allocation_algorithm = algorithm;
            }
            Trigger::Allocate
        }
        Commands::Deallocate { block_id } => Trigger::Deallocate(block_id),
        Commands::DeallocateRandom => Trigger::DeallocateRandom,
        Commands::Reset => Trigger::Reset,
        Commands::CreateProcess { name, size } => {
            form.process_name = name;
            form.process_size = size.to_string();
            Trigger::CreateProcess
        }
        Commands::SwapOut { process_id } => {
            form.swap_process_id = process_id;
            Trigger::SwapOut
        }
        Commands::SwapIn { process_id } => {
            form.swap_process_id = process_id;
            Trigger::SwapIn
        }
        Commands::PageReplacement { algorithm } => {
            if let Some(algorithm) = algorithm {
                form.page_algorithm = algorithm;
            }
            Trigger::PageReplacement
        }
        Commands::Gc => Trigger::GarbageCollect,
        Commands::Tui | Commands::Watch | Commands::Status => return None,
    };
    Some(trigger)
}

async fn watch(cfg: &Config, coordinator: Coordinator) -> Result<()> {
    coordinator.initialize().await;
    let mut cursor = print_log(&coordinator, 0);

    let _monitor = Monitor::spawn(coordinator.clone(), cfg.monitor());
    let mut ticker = tokio::time::interval(std::time::Duration::from_millis(250));
    loop {
        tokio::select! {
            res = tokio::signal::ctrl_c() => {
                res.context("listen for ctrl-c")?;
                break;
            }
            _ = ticker.tick() => {
                cursor = print_log(&coordinator, cursor);
            }
        }
    }

    session::lock(coordinator.session()).info("Application shutting down...");
    print_log(&coordinator, cursor);
    Ok(())
}

/// Print entries appended after `cursor`; returns the new cursor.
fn print_log(coordinator: &Coordinator, cursor: u64) -> u64 {
    let s = session::lock(coordinator.session());
    for entry in s.log().since(cursor) {
        println!("{}", format_entry(entry));
    }
    s.log().appended()
}

fn format_entry(entry: &LogEntry) -> String {
    match entry.level {
        Level::Info => entry.to_string(),
        Level::Warn => format!("{} (warning)", entry),
        Level::Error => format!("{} (error)", entry),
    }
}

fn print_views(views: &Views) {
    println!();
    println!("Stats");
    for card in &views.stats {
        println!("  {:<18} {}", card.label, card.value);
    }

    println!("Memory map");
    match views.memory.placeholder() {
        Some(text) => println!("  {}", text),
        None => {
            for cell in views.memory.rows() {
                println!("  {}", cell.title);
            }
        }
    }

    println!("Processes");
    match views.processes.placeholder() {
        Some(text) => println!("  {}", text),
        None => {
            for row in views.processes.rows() {
                println!("  {}", row.heading);
                println!("    {}", row.detail);
            }
        }
    }

    println!("RAM");
    for line in views.ram.lines() {
        println!("  {}", line);
    }
    println!("Swap space");
    for line in views.swap.lines() {
        println!("  {}", line);
    }

    println!("Page frames");
    for cell in &views.frames {
        println!("  {}", cell.title);
    }
    if let Some(panel) = &views.algorithm {
        println!("{}", panel.heading);
        println!("  Page faults: {}", panel.page_faults);
        println!("  Page hits:   {}", panel.page_hits);
        println!("  Hit ratio:   {}", panel.hit_ratio);
        println!("  Reference:   {}", panel.reference_string);
    }
}

#[cfg(test)]
#[path = "tests/cli_exec_tests.rs"]
mod tests;
