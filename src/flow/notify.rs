//! Presentation hook for user-facing notices. The flow never renders anything
//! itself; it hands each notice to a `Notifier` supplied by the front-end.

use crate::flow::state::{Notice, NoticeKind};
use tracing::{info, warn};

pub trait Notifier {
    fn notify(&self, notice: &Notice);
}

impl<F: Fn(&Notice)> Notifier for F {
    fn notify(&self, notice: &Notice) {
        self(notice);
    }
}

/// Sends notices to the log only. Useful for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        match notice.kind {
            NoticeKind::Error => warn!("{}", notice.message),
            NoticeKind::Success => info!("{}", notice.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_closure_notifier() {
        let seen = RefCell::new(Vec::new());
        let notifier = |notice: &Notice| seen.borrow_mut().push(notice.clone());

        notifier.notify(&Notice::error("invalid email"));
        LogNotifier.notify(&Notice::success("ok"));

        assert_eq!(seen.into_inner(), vec![Notice::error("invalid email")]);
    }
}
