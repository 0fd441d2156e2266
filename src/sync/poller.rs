//! The condition poller every other wait is built on
//!
//! Waiting is cooperative: the check is evaluated, and if it is not yet satisfied the
//! current thread sleeps for the poll interval before looking again. Each evaluation is
//! a fresh observation of the live UI, nothing is cached between polls.

use crate::error::{BrowserError, Result};
use crate::sync::config::WaitOptions;
use std::thread;
use std::time::{Duration, Instant};

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Poll `check` until it yields a value or `options` times out
///
/// The check may perform remote round-trips and may have side effects on state other
/// than the one being awaited. An error from the check ends the wait immediately.
/// On timeout the final sleep is clamped to the remaining budget and the check gets one
/// last look, so failure comes after at least the timeout and within one poll interval of it.
pub fn poll_for<T, F>(description: &str, options: WaitOptions, mut check: F) -> Result<T>
where
    F: FnMut() -> Result<Option<T>>,
{
    let timeout = options.timeout_duration();
    let interval = options.poll_duration().max(MIN_POLL_INTERVAL);
    let start = Instant::now();
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        if let Some(value) = check()? {
            if attempts > 1 {
                log::debug!("Condition '{}' met after {} attempts", description, attempts);
            }
            return Ok(value);
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            log::debug!("Gave up waiting for {} after {} attempts", description, attempts);
            return Err(BrowserError::ConditionTimeout { condition: description.to_string(), elapsed });
        }

        thread::sleep(interval.min(timeout - elapsed));
    }
}

/// Poll `predicate` until it returns true or `options` times out
pub fn wait_until<F>(description: &str, options: WaitOptions, mut predicate: F) -> Result<()>
where
    F: FnMut() -> Result<bool>,
{
    poll_for(description, options, || Ok(predicate()?.then_some(())))
}

/// One observation of "not busy", confirmed by a second look after `recheck`
///
/// Work that has been queued but not yet started may not show up at the first look;
/// the grace delay gives it time to flip the busy flag.
pub fn settled<F>(busy: &mut F, recheck: Duration) -> Result<bool>
where
    F: FnMut() -> Result<bool>,
{
    if busy()? {
        return Ok(false);
    }

    if recheck.is_zero() {
        return Ok(true);
    }

    thread::sleep(recheck);
    Ok(!busy()?)
}

/// Wait until `busy` reports false on two looks `recheck` apart
pub fn wait_until_idle<F>(description: &str, options: WaitOptions, recheck: Duration, mut busy: F) -> Result<()>
where
    F: FnMut() -> Result<bool>,
{
    wait_until(description, options, || settled(&mut busy, recheck))
}
