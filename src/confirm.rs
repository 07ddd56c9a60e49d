//! Confirmation Prompt
//!
//! Asks the user before destructive actions.

use crate::storage::js_error_message;

/// Yes/no prompt shown before an action runs
pub trait Confirm {
    /// Returns true when the user accepted
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// Native `window.confirm` dialog. A missing window or a thrown error counts as cancel.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&self, message: &str) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        window.confirm_with_message(message).unwrap_or_else(|e| {
            log::warn!("confirm dialog failed: {}", js_error_message(&e));
            false
        })
    }
}
