//! Operation instrumentation: wall-clock timing and allocation tracing.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::time::{Duration, Instant};

/// Measurement error.
#[derive(Debug, PartialEq, Eq)]
pub enum MeasureError {
    /// An allocation-tracing session is already active on this thread.
    TraceBusy,
}

impl Error for MeasureError {}

impl Display for MeasureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            MeasureError::TraceBusy => write!(f, "allocation tracing already active on this thread"),
        }
    }
}

/// Timing and memory figures captured for a single instrumented call.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Measurement {
    /// Wall-clock duration of the call, from a monotonic clock.
    pub elapsed: Duration,
    /// Bytes still allocated when the call returned.
    pub current_bytes: usize,
    /// Peak bytes allocated at any point during the call.
    pub peak_bytes: usize,
}

impl Measurement {
    /// Bytes still allocated, in KiB.
    pub fn current_kib(&self) -> f64 {
        self.current_bytes as f64 / 1024.0
    }

    /// Peak allocated bytes, in KiB.
    pub fn peak_kib(&self) -> f64 {
        self.peak_bytes as f64 / 1024.0
    }
}

#[derive(Clone, Copy)]
struct TraceState {
    active: bool,
    current: usize,
    peak: usize,
}

thread_local! {
    static TRACE: Cell<TraceState> = const {
        Cell::new(TraceState {
            active: false,
            current: 0,
            peak: 0,
        })
    };
}

/// Allocator wrapper that forwards to the system allocator and, while a
/// tracing session is active on the current thread, accounts allocated
/// bytes. Installed crate-wide via `#[global_allocator]` in `lib.rs`.
pub struct TraceAllocator;

unsafe impl GlobalAlloc for TraceAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        record_dealloc(layout.size());
    }
}

fn record_alloc(size: usize) {
    // try_with: the allocator may be called during thread teardown.
    let _ = TRACE.try_with(|cell| {
        let mut state = cell.get();
        if state.active {
            state.current += size;
            if state.current > state.peak {
                state.peak = state.current;
            }
            cell.set(state);
        }
    });
}

fn record_dealloc(size: usize) {
    let _ = TRACE.try_with(|cell| {
        let mut state = cell.get();
        if state.active {
            // frees of memory allocated before the session saturate at zero
            state.current = state.current.saturating_sub(size);
            cell.set(state);
        }
    });
}

/// Active tracing session. Tracing stops when the guard is dropped, so a
/// panicking instrumented call never leaks tracing state.
struct TraceSession;

impl TraceSession {
    fn start() -> Result<Self, MeasureError> {
        TRACE.with(|cell| {
            let state = cell.get();
            if state.active {
                return Err(MeasureError::TraceBusy);
            }
            cell.set(TraceState {
                active: true,
                current: 0,
                peak: 0,
            });
            Ok(TraceSession)
        })
    }

    fn snapshot(&self) -> (usize, usize) {
        TRACE.with(|cell| {
            let state = cell.get();
            (state.current, state.peak)
        })
    }
}

impl Drop for TraceSession {
    fn drop(&mut self) {
        let _ = TRACE.try_with(|cell| {
            let mut state = cell.get();
            state.active = false;
            cell.set(state);
        });
    }
}

/// Runs `op` exactly once, capturing its wall-clock duration and the bytes
/// it allocated (current and peak). The operation's result is returned
/// unchanged alongside the [`Measurement`]; the figures are also emitted on
/// the log channel after the call completes.
///
/// # Arguments
/// * `op` - Operation to be instrumented
pub fn measured<T, F>(op: F) -> Result<(T, Measurement), MeasureError>
where
    F: FnOnce() -> T,
{
    let session = TraceSession::start()?;
    let started = Instant::now();

    let result = op();

    let elapsed = started.elapsed();
    let (current_bytes, peak_bytes) = session.snapshot();
    drop(session);

    let measurement = Measurement {
        elapsed,
        current_bytes,
        peak_bytes,
    };

    log::debug!("elapsed: {:.6} s", measurement.elapsed.as_secs_f64());
    log::debug!(
        "memory: {:.2} KiB current, {:.2} KiB peak",
        measurement.current_kib(),
        measurement.peak_kib()
    );

    return Ok((result, measurement));
}

#[cfg(test)]
mod test {
    use super::{measured, MeasureError};

    #[test]
    fn test_result_passed_through() {
        let (result, _) = measured(|| 21 * 2).unwrap();
        assert_eq!(result, 42);
    }

    #[test]
    fn test_allocation_accounted() {
        let (buf, measurement) = measured(|| vec![0u8; 1_000_000]).unwrap();

        assert_eq!(buf.len(), 1_000_000);
        assert!(measurement.peak_bytes >= 1_000_000);
        assert!(measurement.current_bytes >= 1_000_000);
    }

    #[test]
    fn test_freed_allocation_leaves_peak() {
        let ((), measurement) = measured(|| {
            let buf = vec![0u8; 500_000];
            drop(buf);
        })
        .unwrap();

        assert!(measurement.peak_bytes >= 500_000);
        assert!(measurement.current_bytes < 500_000);
    }

    #[test]
    fn test_nested_session_rejected() {
        let (inner, _) = measured(|| measured(|| ())).unwrap();
        assert_eq!(inner.unwrap_err(), MeasureError::TraceBusy);
    }

    #[test]
    fn test_tracing_stopped_after_panic() {
        let panicked = std::panic::catch_unwind(|| {
            let _ = measured(|| panic!("boom"));
        });
        assert!(panicked.is_err());

        // the poisoned session must not block subsequent measurements
        let (result, _) = measured(|| 1).unwrap();
        assert_eq!(result, 1);
    }
}
