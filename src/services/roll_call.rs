//! Roll call: prints student names from the request flow and from two
//! spawned tasks.
//!
//! The printing is decorative. Nothing is returned to the caller besides the
//! task handles, and no order between the two tasks is promised.

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::JoinHandle;
use tracing::warn;

use crate::error::{AppError, AppResult};

/// Names needed for one roll call: two printed inline, two per task.
pub const ROLL_CALL_SIZE: usize = 6;

/// Roll call writing to the process stdout.
pub type ConsoleRollCall = RollCall<std::io::Stdout>;

/// Prints names to a shared, line-serialized sink.
pub struct RollCall<W> {
    sink: Arc<Mutex<W>>,
}

impl<W> Clone for RollCall<W> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
        }
    }
}

impl ConsoleRollCall {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send + 'static> RollCall<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: Arc::new(Mutex::new(sink)),
        }
    }

    /// Shared handle to the sink.
    pub fn sink(&self) -> Arc<Mutex<W>> {
        Arc::clone(&self.sink)
    }

    /// Print names 0-1 inline, then 2-3 and 4-5 from two tasks. Each line is
    /// written under its own lock, so lines of the two tasks may interleave.
    pub fn print_parallel(&self, names: &[String]) -> AppResult<Vec<JoinHandle<()>>> {
        let names = take_six(names)?;

        for name in &names[..2] {
            write_line(&mut *lock(&self.sink), name);
        }

        let handles = [names[2..4].to_vec(), names[4..6].to_vec()]
            .into_iter()
            .map(|pair| {
                let sink = Arc::clone(&self.sink);
                tokio::spawn(async move {
                    for name in &pair {
                        write_line(&mut *lock(&sink), name);
                    }
                })
            })
            .collect();

        Ok(handles)
    }

    /// Like [`print_parallel`](Self::print_parallel), but each task holds the
    /// sink for both of its lines, so a task's pair is always adjacent.
    pub fn print_synchronized(&self, names: &[String]) -> AppResult<Vec<JoinHandle<()>>> {
        let names = take_six(names)?;

        {
            let mut out = lock(&self.sink);
            for name in &names[..2] {
                write_line(&mut *out, name);
            }
        }

        let handles = [names[2..4].to_vec(), names[4..6].to_vec()]
            .into_iter()
            .map(|pair| {
                let sink = Arc::clone(&self.sink);
                tokio::spawn(async move {
                    let mut out = lock(&sink);
                    for name in &pair {
                        write_line(&mut *out, name);
                    }
                })
            })
            .collect();

        Ok(handles)
    }
}

fn take_six(names: &[String]) -> AppResult<Vec<String>> {
    if names.len() < ROLL_CALL_SIZE {
        return Err(AppError::InvalidInput(format!(
            "Roll call needs at least {} students, found {}",
            ROLL_CALL_SIZE,
            names.len()
        )));
    }
    Ok(names[..ROLL_CALL_SIZE].to_vec())
}

// A panic while printing must not silence later roll calls.
fn lock<W>(sink: &Mutex<W>) -> MutexGuard<'_, W> {
    sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_line<W: Write>(out: &mut W, name: &str) {
    if let Err(e) = writeln!(out, "{}", name).and_then(|_| out.flush()) {
        warn!("Roll call output failed: {}", e);
    }
}
