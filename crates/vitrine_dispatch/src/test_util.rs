//! Shared test helpers for the dispatch crate.

use std::time::Duration;

use crate::ui::UiHandle;

/// Blocks until everything dispatched before this call has executed.
pub fn flush(handle: &UiHandle) {
    let (tx, rx) = crossbeam_channel::bounded(1);
    handle.dispatch(move || {
        let _ = tx.send(());
    });
    rx.recv_timeout(Duration::from_secs(5)).unwrap();
}
