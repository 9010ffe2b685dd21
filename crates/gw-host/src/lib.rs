//! Owning-execution-context abstraction for the browser control.
//!
//! Platform browser controls must be driven from the single thread that
//! owns them. [`ContextDispatcher`] is the only sanctioned way to cross
//! onto that thread; [`SingleContextQueue`] is the in-process FIFO
//! implementation with a dedicated owner thread.

use gw_core::ShellError;
use gw_core::ShellResult;
use std::sync::mpsc;
use std::thread;

/// One unit of work scheduled onto the owning context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// Evaluate a script string in the loaded page's context.
    Evaluate { script: String },
    /// Load the given URL.
    Navigate { url: String },
    /// Configure the user-agent string presented to servers.
    SetUserAgent { user_agent: String },
}

/// The platform webview surface. Implementations are only ever touched
/// from the single context that owns them.
pub trait BrowserControl {
    fn evaluate(&self, script: &str) -> ShellResult<()>;
    fn navigate(&self, url: &str) -> ShellResult<()>;
    fn set_user_agent(&self, user_agent: &str) -> ShellResult<()>;
}

/// Schedules commands onto the owning context. Commands run in the
/// order they were dispatched; there is no cancellation.
pub trait ContextDispatcher {
    fn dispatch(&self, command: HostCommand) -> ShellResult<()>;
}

/// Applies one scheduled command to the control. Must be called on the
/// control's owning context.
pub fn apply_command(control: &dyn BrowserControl, command: &HostCommand) -> ShellResult<()> {
    match command {
        HostCommand::Evaluate { script } => control.evaluate(script),
        HostCommand::Navigate { url } => control.navigate(url),
        HostCommand::SetUserAgent { user_agent } => control.set_user_agent(user_agent),
    }
}

enum QueueTask {
    Run(HostCommand),
    Shutdown,
}

/// FIFO command queue whose worker thread exclusively owns the control.
///
/// Cloned handles share the same queue; every handle observes the same
/// global dispatch order.
#[derive(Clone)]
pub struct SingleContextQueue {
    tx: mpsc::Sender<QueueTask>,
}

/// Join handle for the queue's owner thread.
pub struct QueueWorker {
    handle: thread::JoinHandle<()>,
}

impl SingleContextQueue {
    /// Moves `control` onto a dedicated owner thread and returns the
    /// dispatch handle plus the worker to join at teardown.
    pub fn start<C>(control: C) -> (Self, QueueWorker)
    where
        C: BrowserControl + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            while let Ok(task) = rx.recv() {
                match task {
                    QueueTask::Run(command) => {
                        if let Err(error) = apply_command(&control, &command) {
                            // Fatal to this unit only; the queue keeps draining.
                            log::warn!("host command failed: {error}");
                        }
                    }
                    QueueTask::Shutdown => break,
                }
            }
        });

        (Self { tx }, QueueWorker { handle })
    }

    /// Asks the owner thread to exit after draining everything already
    /// queued. Later dispatches fail with `host.dispatch_closed`.
    pub fn shutdown(&self) -> ShellResult<()> {
        self.tx.send(QueueTask::Shutdown).map_err(|_| closed_error())
    }
}

impl ContextDispatcher for SingleContextQueue {
    fn dispatch(&self, command: HostCommand) -> ShellResult<()> {
        self.tx
            .send(QueueTask::Run(command))
            .map_err(|_| closed_error())
    }
}

impl QueueWorker {
    pub fn join(self) -> ShellResult<()> {
        self.handle.join().map_err(|_| {
            ShellError::new(
                "host.worker_panicked",
                "owning-context worker thread panicked",
            )
        })
    }
}

fn closed_error() -> ShellError {
    ShellError::new(
        "host.dispatch_closed",
        "owning context is gone; command dropped",
    )
}
