use std::fmt;

use crate::slot::Slot;
use crate::{CoreError, CoreResult};

pub type OnDone<T> = Box<dyn FnOnce(T) + Send + 'static>;
pub type OnCancel = Box<dyn FnOnce() + Send + 'static>;

/// Parameters a parent hands to a modal editor: the value to start from and
/// the callbacks through which the result travels back.
pub struct ModalParams<T> {
    pub initial: Option<T>,
    pub on_done: Option<OnDone<T>>,
    pub on_cancel: Option<OnCancel>,
}

impl<T> ModalParams<T> {
    pub fn new(initial: Option<T>) -> Self {
        Self {
            initial,
            on_done: None,
            on_cancel: None,
        }
    }

    pub fn on_done(mut self, f: impl FnOnce(T) + Send + 'static) -> Self {
        self.on_done = Some(Box::new(f));
        self
    }

    pub fn on_cancel(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.on_cancel = Some(Box::new(f));
        self
    }

    /// Report `value` to the parent without going through a session.
    /// Used by callers that compute the result in one step.
    pub fn complete(self, value: T) {
        let Self { on_done, on_cancel, .. } = self;
        drop(on_cancel);
        if let Some(cb) = on_done {
            cb(value);
        }
    }

    /// Leave without reporting a result
    pub fn dismiss(self) {
        let Self { on_done, on_cancel, .. } = self;
        drop(on_done);
        if let Some(cb) = on_cancel {
            cb();
        }
    }
}

impl<T> Default for ModalParams<T> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<T: fmt::Debug> fmt::Debug for ModalParams<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalParams")
            .field("initial", &self.initial)
            .field("on_done", &self.on_done.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .finish()
    }
}

/// The ways a user can leave a modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitAffordance {
    CloseButton,
    Backdrop,
    HardwareBack,
    /// "Done", "Skip", "Save" and similar call-to-action buttons
    PrimaryAction,
}

/// Which exits report the edited value back to the parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitPolicy {
    /// Every exit reports the value (editors whose value always has a sane default)
    AlwaysEmit,
    /// Only the primary action reports; every other exit cancels
    EmitOnConfirm,
}

impl ExitPolicy {
    pub fn emits(&self, affordance: ExitAffordance) -> bool {
        match self {
            ExitPolicy::AlwaysEmit => true,
            ExitPolicy::EmitOnConfirm => affordance == ExitAffordance::PrimaryAction,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    Emitted,
    Cancelled,
    AlreadyExited,
}

/// One visit to a modal editor.
///
/// Every dismissal affordance goes through [`ModalSession::exit`], which runs
/// at most once: `on_done` or `on_cancel` fires a single time per visit and
/// later exits are no-ops. A session dropped without an explicit exit behaves
/// like a backdrop tap.
pub struct ModalSession<T: Clone + Send + 'static> {
    name: &'static str,
    value: Slot<T>,
    policy: ExitPolicy,
    on_done: Option<OnDone<T>>,
    on_cancel: Option<OnCancel>,
    exited: bool,
}

impl<T: Clone + Send + 'static> ModalSession<T> {
    /// Open a visit, starting from `params.initial` or `fallback` when the
    /// parent did not pass one.
    pub fn open(name: &'static str, params: ModalParams<T>, fallback: T, policy: ExitPolicy) -> Self {
        let ModalParams {
            initial,
            on_done,
            on_cancel,
        } = params;
        if on_done.is_none() {
            tracing::warn!("Modal '{}' opened without on_done; its result will be discarded", name);
        }
        Self {
            name,
            value: Slot::new(name, initial.unwrap_or(fallback)),
            policy,
            on_done,
            on_cancel,
            exited: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value(&self) -> T {
        self.value.get()
    }

    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.value.read(f)
    }

    pub fn is_open(&self) -> bool {
        !self.exited
    }

    /// Apply a local edit. Refused after exit or while a child editor is on top.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> CoreResult<R> {
        if self.exited {
            return Err(CoreError::ValidationError(format!("modal '{}' is closed", self.name)));
        }
        self.value.edit(f)
    }

    /// Hand a projection of this modal's value to a child modal
    pub fn open_child<U, R, A>(&self, read: R, apply: A) -> CoreResult<ModalParams<U>>
    where
        U: Send + 'static,
        R: FnOnce(&T) -> Option<U>,
        A: FnOnce(&mut T, U) + Send + 'static,
    {
        if self.exited {
            return Err(CoreError::ValidationError(format!("modal '{}' is closed", self.name)));
        }
        self.value.open_editor_with(read, apply)
    }

    /// The single exit routine
    pub fn exit(&mut self, affordance: ExitAffordance) -> CoreResult<ExitOutcome> {
        if self.exited {
            return Ok(ExitOutcome::AlreadyExited);
        }
        if self.value.is_leased() {
            return Err(CoreError::SlotBusy(self.name));
        }
        Ok(self.finish(affordance))
    }

    fn finish(&mut self, affordance: ExitAffordance) -> ExitOutcome {
        self.exited = true;
        if self.policy.emits(affordance) {
            drop(self.on_cancel.take());
            if let Some(cb) = self.on_done.take() {
                cb(self.value.get());
            }
            tracing::debug!("Modal '{}' exited via {:?}, result emitted", self.name, affordance);
            ExitOutcome::Emitted
        } else {
            drop(self.on_done.take());
            if let Some(cb) = self.on_cancel.take() {
                cb();
            }
            tracing::debug!("Modal '{}' exited via {:?}, cancelled", self.name, affordance);
            ExitOutcome::Cancelled
        }
    }
}

impl<T: Clone + Send + 'static> Drop for ModalSession<T> {
    fn drop(&mut self) {
        if !self.exited {
            self.finish(ExitAffordance::Backdrop);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_params(initial: u32, done: &Arc<AtomicUsize>, cancel: &Arc<AtomicUsize>) -> ModalParams<u32> {
        let done = Arc::clone(done);
        let cancel = Arc::clone(cancel);
        ModalParams::new(Some(initial))
            .on_done(move |_| {
                done.fetch_add(1, Ordering::SeqCst);
            })
            .on_cancel(move || {
                cancel.fetch_add(1, Ordering::SeqCst);
            })
    }

    #[test]
    fn test_exit_fires_once() {
        let done = Arc::new(AtomicUsize::new(0));
        let cancel = Arc::new(AtomicUsize::new(0));
        let mut session = ModalSession::open("counter", counting_params(1, &done, &cancel), 0, ExitPolicy::AlwaysEmit);

        assert_eq!(session.exit(ExitAffordance::CloseButton).unwrap(), ExitOutcome::Emitted);
        assert_eq!(session.exit(ExitAffordance::HardwareBack).unwrap(), ExitOutcome::AlreadyExited);
        drop(session);

        assert_eq!(done.load(Ordering::SeqCst), 1);
        assert_eq!(cancel.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_emit_on_confirm_cancels_other_exits() {
        for affordance in [ExitAffordance::CloseButton, ExitAffordance::Backdrop, ExitAffordance::HardwareBack] {
            let done = Arc::new(AtomicUsize::new(0));
            let cancel = Arc::new(AtomicUsize::new(0));
            let mut session =
                ModalSession::open("editor", counting_params(1, &done, &cancel), 0, ExitPolicy::EmitOnConfirm);
            assert_eq!(session.exit(affordance).unwrap(), ExitOutcome::Cancelled);
            assert_eq!(done.load(Ordering::SeqCst), 0);
            assert_eq!(cancel.load(Ordering::SeqCst), 1);
        }
    }

    #[test]
    fn test_drop_without_exit_runs_exit_routine() {
        let done = Arc::new(AtomicUsize::new(0));
        let cancel = Arc::new(AtomicUsize::new(0));
        {
            let _session = ModalSession::open("counter", counting_params(1, &done, &cancel), 0, ExitPolicy::AlwaysEmit);
        }
        assert_eq!(done.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_fallback_used_without_initial() {
        let session: ModalSession<u32> = ModalSession::open("counter", ModalParams::default(), 7, ExitPolicy::AlwaysEmit);
        assert_eq!(session.value(), 7);
    }

    #[test]
    fn test_exit_blocked_while_child_open() {
        let mut session: ModalSession<u32> = ModalSession::open("parent", ModalParams::default(), 1, ExitPolicy::AlwaysEmit);
        let child = session.open_child(|v| Some(*v), |v, n| *v = n).unwrap();
        assert!(session.exit(ExitAffordance::PrimaryAction).is_err());
        child.complete(4);
        assert_eq!(session.value(), 4);
        assert_eq!(session.exit(ExitAffordance::PrimaryAction).unwrap(), ExitOutcome::Emitted);
    }

    #[test]
    fn test_update_after_exit_is_refused() {
        let mut session: ModalSession<u32> = ModalSession::open("counter", ModalParams::default(), 1, ExitPolicy::AlwaysEmit);
        session.exit(ExitAffordance::PrimaryAction).unwrap();
        assert!(session.update(|v| *v += 1).is_err());
    }
}
