use std::backtrace::{Backtrace, BacktraceStatus};
use std::panic::{self, UnwindSafe};
use std::sync::Once;

use libtest_mimic::Failed;

use tagscan::testutils::{take_output, trace_log};

/// Run a test body, turning a panic into a [`Failed`] that carries everything the tokenizer
/// logged while running it.
///
/// Custom test harnesses cannot capture stdout, so the tokenizer writes its trace into the
/// thread-local buffer in `tagscan::testutils` instead. The buffer is drained after every test,
/// pass or fail, so one test's trace never leaks into the next one's report.
pub fn catch_unwind_and_report(f: impl FnOnce() + UnwindSafe) -> Result<(), Failed> {
    static PANIC_HOOK: Once = Once::new();
    PANIC_HOOK.call_once(|| {
        panic::set_hook(Box::new(|_info| {
            let backtrace = Backtrace::capture();
            if backtrace.status() == BacktraceStatus::Captured {
                trace_log(&format!("\nPANIC BACKTRACE:\n{}", backtrace));
            } else {
                trace_log("PANIC BACKTRACE: did not capture, use RUST_BACKTRACE=1");
            }
        }));
    });

    let result = panic::catch_unwind(f);
    let mut msg = take_output();

    let payload = match result {
        Ok(()) => return Ok(()),
        Err(payload) => payload,
    };

    let reason = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&'static str>().copied());

    if let Some(reason) = reason {
        msg.push_str("\nPANIC: ");
        msg.push_str(reason);
    }

    Err(msg.into())
}
