use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    supports_keyboard_enhancement,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::{mpsc, oneshot, watch};

use crate::coordinator::Coordinator;
use crate::dispatch::{Dispatcher, FormState, Trigger};
use crate::error::{CommandError, CommandResult, Outcome};
use crate::monitor::{HealthStatus, Monitor, MonitorHandle};
use crate::remote::SimulatorClient;
use crate::session::{self, Session, SharedSession};

use super::input::Input;

mod event_loop;
mod forms;
mod render;
mod time_utils;

use self::forms::Focus;

pub(super) async fn run(opts: crate::tui::TuiRunOptions) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("TUI requires an interactive terminal (TTY)");
    }

    let mut app = App::start(opts)?;

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    // Without this, Ctrl-M is indistinguishable from Enter.
    let enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )
        .context("enable keyboard enhancement")?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let res = event_loop::run_loop(&mut terminal, &mut app).await;

    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags).ok();
    }
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    app.shutdown();
    res
}

/// A finished command, reported back to the UI loop.
pub(super) struct Completion {
    trigger: Trigger,
    result: CommandResult,
}

pub(super) struct App {
    dispatcher: Dispatcher,
    session: SharedSession,
    base_url: String,

    health: Option<watch::Receiver<HealthStatus>>,
    monitor: Option<MonitorHandle>,
    monitor_rx: Option<oneshot::Receiver<MonitorHandle>>,

    completions_tx: mpsc::UnboundedSender<Completion>,
    completions: mpsc::UnboundedReceiver<Completion>,

    form: FormState,
    focus: Focus,
    field_input: Input,
    command: Input,
    memory_selected: usize,
    last_result: Option<String>,

    quit: bool,
}

impl App {
    /// Build the client, kick off initialization and start the monitor once
    /// it completes.
    fn start(opts: crate::tui::TuiRunOptions) -> Result<Self> {
        let cfg = opts.config;
        let client = SimulatorClient::new(&cfg.base_url, cfg.request_timeout())?;
        let session = Session::shared();
        let coordinator = Coordinator::new(client, session.clone());

        let (monitor_tx, monitor_rx) = oneshot::channel();
        let init = coordinator.clone();
        let monitor_cfg = cfg.monitor();
        tokio::spawn(async move {
            init.initialize().await;
            let _ = monitor_tx.send(Monitor::spawn(init, monitor_cfg));
        });

        let (completions_tx, completions) = mpsc::unbounded_channel();
        let form = cfg.initial_form();
        let mut field_input = Input::default();
        field_input.set(&form.memory_size);

        Ok(Self {
            dispatcher: Dispatcher::new(coordinator),
            session,
            base_url: cfg.base_url,
            health: None,
            monitor: None,
            monitor_rx: Some(monitor_rx),
            completions_tx,
            completions,
            form,
            focus: Focus::MemorySize,
            field_input,
            command: Input::default(),
            memory_selected: 0,
            last_result: None,
            quit: false,
        })
    }

    fn coordinator(&self) -> &Coordinator {
        self.dispatcher.coordinator()
    }

    /// Pick up the monitor once initialization has handed it over.
    fn poll_monitor(&mut self) {
        let Some(rx) = self.monitor_rx.as_mut() else {
            return;
        };
        match rx.try_recv() {
            Ok(handle) => {
                self.dispatcher = self.dispatcher.clone().with_signals(handle.signal_sender());
                self.health = Some(handle.subscribe());
                self.monitor = Some(handle);
                self.monitor_rx = None;
            }
            Err(oneshot::error::TryRecvError::Empty) => {}
            Err(oneshot::error::TryRecvError::Closed) => self.monitor_rx = None,
        }
    }

    fn health(&self) -> Option<HealthStatus> {
        self.health.as_ref().map(|rx| *rx.borrow())
    }

    /// Run `trigger` in the background with a snapshot of the form.
    fn fire(&mut self, trigger: Trigger) {
        self.commit_field();
        let dispatcher = self.dispatcher.clone();
        let form = self.form.clone();
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let result = dispatcher.dispatch(trigger, &form).await;
            let _ = tx.send(Completion { trigger, result });
        });
    }

    fn drain_completions(&mut self) {
        while let Ok(done) = self.completions.try_recv() {
            self.last_result = Some(match &done.result {
                Ok(Outcome::Applied) => {
                    forms::clear_after_success(done.trigger, &mut self.form);
                    self.reload_field();
                    format!("{:?}: done", done.trigger)
                }
                Ok(Outcome::Skipped) => format!("{:?}: busy, ignored", done.trigger),
                Err(err) => {
                    if let CommandError::DomainFailure(_) = err {
                        forms::clear_after_domain_failure(done.trigger, &mut self.form);
                        self.reload_field();
                    }
                    format!("{:?}: {} ({})", done.trigger, err, err.kind())
                }
            });
        }
    }

    /// Copy the field editor back into the form.
    fn commit_field(&mut self) {
        if !self.focus.is_text_field() {
            return;
        }
        if let Some(field) = forms::field(self.focus) {
            *forms::value_mut(&mut self.form, field) = self.field_input.buf.clone();
        }
    }

    /// Load the focused field into the editor.
    fn reload_field(&mut self) {
        match forms::field(self.focus) {
            Some(field) => {
                let current = forms::value(&self.form, field).to_string();
                self.field_input.set(&current);
            }
            None => self.field_input.clear(),
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.commit_field();
        self.focus = focus;
        self.reload_field();
    }

    fn shutdown(&mut self) {
        session::lock(&self.session).info("Application shutting down...");
        self.monitor = None;
    }
}
