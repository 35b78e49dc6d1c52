//! Live `/clock` feed
//!
//! Runs `rostopic echo -p <topic>` on a background thread and forwards each
//! clock sample to the UI thread. When the tool exits (no master yet, master
//! restarted) it is relaunched after a short delay until shutdown.

use std::io::{BufRead, BufReader};
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{
    bounded, Receiver, RecvTimeoutError, Sender, TryRecvError, TrySendError,
};

use crate::error::{BagPlayerError, Result, ResultExt};
use crate::types::BagTime;

use super::commands::Invocation;

/// Delay before relaunching the echo process
const RESTART_DELAY: Duration = Duration::from_secs(1);

/// Parse one `rostopic echo -p` CSV row of a `rosgraph_msgs/Clock`
///
/// Rows look like `<receipt_ns>,<clock_ns>`; the `%time,field.clock` header
/// and anything unparseable yield `None`.
pub fn parse_clock_line(line: &str) -> Option<BagTime> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('%') {
        return None;
    }
    let clock = line.split(',').nth(1)?;
    clock.trim().parse::<u64>().ok().map(BagTime::from_nanos)
}

/// Background subscription to the bus clock
pub struct ClockFeed {
    ticks: Receiver<BagTime>,
    child: Arc<Mutex<Option<Child>>>,
    shutdown: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ClockFeed {
    /// Start echoing the clock topic with `invocation`
    pub fn spawn(invocation: Invocation) -> Result<Self> {
        let (tick_tx, tick_rx) = bounded(256);
        let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
        let child: Arc<Mutex<Option<Child>>> = Arc::new(Mutex::new(None));
        let child_slot = Arc::clone(&child);

        let handle = std::thread::Builder::new()
            .name("clock-feed".to_string())
            .spawn(move || run_feed(invocation, tick_tx, shutdown_rx, child_slot))
            .map_err(BagPlayerError::from)
            .context("Failed to start clock feed thread")?;

        Ok(Self {
            ticks: tick_rx,
            child,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Most recent clock sample since the last call, if any
    pub fn latest(&self) -> Option<BagTime> {
        self.ticks.try_iter().last()
    }

    /// Stop the echo process and wait for the reader thread
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.try_send(());
        }
        if let Ok(mut slot) = self.child.lock() {
            if let Some(child) = slot.as_mut() {
                let _ = child.kill();
            }
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ClockFeed {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_feed(
    invocation: Invocation,
    ticks: Sender<BagTime>,
    shutdown: Receiver<()>,
    child_slot: Arc<Mutex<Option<Child>>>,
) {
    loop {
        match Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(mut child) => {
                tracing::debug!("Clock feed running: {}", invocation);
                let stdout = child.stdout.take();
                if let Ok(mut slot) = child_slot.lock() {
                    *slot = Some(child);
                }

                // Shutdown may have raced the launch and missed the new child
                if !matches!(shutdown.try_recv(), Err(TryRecvError::Empty)) {
                    reap(&child_slot);
                    break;
                }

                if let Some(stdout) = stdout {
                    for line in BufReader::new(stdout).lines() {
                        let Ok(line) = line else {
                            break;
                        };
                        if let Some(tick) = parse_clock_line(&line) {
                            match ticks.try_send(tick) {
                                Ok(()) | Err(TrySendError::Full(_)) => {}
                                Err(TrySendError::Disconnected(_)) => {
                                    reap(&child_slot);
                                    return;
                                }
                            }
                        }
                    }
                }

                reap(&child_slot);
            }
            Err(e) => tracing::trace!("Failed to start clock feed '{}': {}", invocation, e),
        }

        match shutdown.recv_timeout(RESTART_DELAY) {
            Err(RecvTimeoutError::Timeout) => continue,
            _ => break,
        }
    }
    tracing::debug!("Clock feed stopped");
}

fn reap(child_slot: &Mutex<Option<Child>>) {
    if let Ok(mut slot) = child_slot.lock() {
        if let Some(mut child) = slot.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
