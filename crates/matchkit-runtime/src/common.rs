//! Process wait helpers shared by the runner.

use anyhow::{Context, Result};
use std::process::Child;
use std::thread;
use std::time::{Duration, Instant};

/// Exit-status poll interval in milliseconds.
pub const WAIT_POLL_INTERVAL_MS: u64 = 100;

/// Wait for a child process, killing it when the deadline passes.
///
/// The child runs with inherited stdio, so there is no pipe to drain and
/// no deadlock risk while polling. Returns the exit code; a timeout is an
/// error after the child has been killed and reaped.
pub fn wait_with_timeout(child: &mut Child, timeout_secs: u64) -> Result<i32> {
    let start = Instant::now();
    let timeout = Duration::from_secs(timeout_secs);

    loop {
        if let Some(status) = child.try_wait().context("wait for child process")? {
            return Ok(status.code().unwrap_or(-1));
        }

        if start.elapsed() > timeout {
            let _ = child.kill();
            let _ = child.wait();
            anyhow::bail!(
                "process killed: exceeded timeout of {} seconds",
                timeout_secs
            );
        }

        thread::sleep(Duration::from_millis(WAIT_POLL_INTERVAL_MS));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;

    #[cfg(unix)]
    #[test]
    fn test_wait_returns_exit_code() {
        let mut child = Command::new("sh").args(["-c", "exit 3"]).spawn().unwrap();
        assert_eq!(wait_with_timeout(&mut child, 5).unwrap(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_wait_kills_on_timeout() {
        let mut child = Command::new("sleep").arg("30").spawn().unwrap();
        let err = wait_with_timeout(&mut child, 1).unwrap_err();
        assert!(err.to_string().contains("exceeded timeout"));
    }
}
