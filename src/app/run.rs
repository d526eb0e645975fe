// SymDrop - app/run.rs
//
// Symbolication run lifecycle. Executes the helper subprocess on a
// background thread, sending the outcome to the UI thread via an mpsc
// channel.
//
// Architecture:
//   - `RunManager` lives on the UI thread; the subprocess runs on a
//     background thread so the event loop is never blocked on pipe reads.
//   - Exactly one `RunOutcome` is delivered per started run, observed by
//     the UI through per-frame polling.
//   - No cancellation and no timeout: the helper either finishes or the
//     run stays outstanding. Overlapping launches are prevented by the
//     in-flight flag, which `start` checks before spawning.

use crate::core::invoke::{self, Invocation};
use std::sync::mpsc;

/// Outcome of one symbolication run, delivered exactly once.
#[derive(Debug)]
pub struct RunOutcome {
    /// The symbolicated crash log text (subprocess stdout), or `None` when
    /// capture failed. Exit status never gates this.
    pub output: Option<String>,
}

/// Manages one symbolication subprocess on a background thread.
pub struct RunManager {
    /// Channel receiver for the UI to poll the outcome.
    outcome_rx: Option<mpsc::Receiver<RunOutcome>>,

    /// True from `start` until the outcome has been polled.
    in_flight: bool,
}

impl RunManager {
    pub fn new() -> Self {
        Self {
            outcome_rx: None,
            in_flight: false,
        }
    }

    /// True while a run is outstanding. The UI keeps Run/Clear disabled and
    /// `start` refuses re-entry while this holds.
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Start a symbolication run for `invocation`, or deliver an immediate
    /// absent outcome when the caller had nothing to run (tool not located).
    ///
    /// Refuses to start while a run is already outstanding.
    pub fn start(&mut self, invocation: Option<Invocation>) {
        if self.in_flight {
            tracing::warn!("Run already in flight; ignoring start request");
            return;
        }

        let (tx, rx) = mpsc::channel();
        self.outcome_rx = Some(rx);
        self.in_flight = true;

        let Some(invocation) = invocation else {
            // Precondition failed upstream: complete with absent output and
            // no side effects, without spawning anything.
            tracing::warn!("Run requested without a buildable invocation");
            let _ = tx.send(RunOutcome { output: None });
            return;
        };

        std::thread::spawn(move || {
            let result = invoke::execute(&invocation);

            let output = match result.stdout {
                Some(stdout) => {
                    if let Some(stderr) = result.stderr.as_deref() {
                        if !stderr.is_empty() {
                            // Non-fatal: the helper chatters on stderr even
                            // on success.
                            tracing::warn!(stderr, "Symbolication stderr");
                        }
                    }
                    Some(stdout)
                }
                None => {
                    if let Some(stderr) = result.stderr.as_deref() {
                        tracing::warn!(stderr, "Symbolication produced no usable output");
                    }
                    None
                }
            };

            // Receiver dropped (UI closed) is fine; exit quietly.
            let _ = tx.send(RunOutcome { output });
        });

        tracing::info!("Symbolication started");
    }

    /// Poll for the outcome without blocking. Returns `Some` exactly once
    /// per started run; the in-flight flag clears on delivery.
    pub fn poll_outcome(&mut self) -> Option<RunOutcome> {
        let outcome = self
            .outcome_rx
            .as_ref()
            .and_then(|rx| rx.try_recv().ok())?;
        self.outcome_rx = None;
        self.in_flight = false;
        Some(outcome)
    }
}

impl Default for RunManager {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
