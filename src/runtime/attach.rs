// Mon Feb 16 2026 - Alex

use crate::runtime::{BindingError, RuntimeApi};
use std::cell::Cell;

thread_local! {
    static ATTACHED: Cell<bool> = const { Cell::new(false) };
}

/// Attaches the calling thread once. Later calls on the same thread are no-ops,
/// whichever dump session makes them.
pub fn ensure_attached(api: &dyn RuntimeApi) -> Result<(), BindingError> {
    if ATTACHED.with(|a| a.get()) {
        return Ok(());
    }

    api.attach_current_thread()?;
    ATTACHED.with(|a| a.set(true));
    log::debug!("attached thread {:?} to runtime", std::thread::current().id());
    Ok(())
}

pub fn is_attached() -> bool {
    ATTACHED.with(|a| a.get())
}
