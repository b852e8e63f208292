use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::modal::ModalParams;
use crate::{CoreError, CoreResult};

/// A single field of in-flight booking state with exactly one owner at a time.
///
/// The holder of the slot reads and writes it directly. Handing the field to a
/// child editor goes through [`Slot::open_editor`], which leases the slot and
/// returns the `initial`/`on_done`/`on_cancel` triple for the child. While the
/// lease is held every other writer and every second editor is refused with
/// [`CoreError::SlotBusy`]. The lease is released once both callbacks have been
/// consumed or dropped, whichever exit path the child takes.
pub struct Slot<T> {
    name: &'static str,
    inner: Arc<Mutex<SlotState<T>>>,
}

struct SlotState<T> {
    value: T,
    leased: bool,
}

struct Lease<T> {
    name: &'static str,
    inner: Arc<Mutex<SlotState<T>>>,
}

impl<T> Drop for Lease<T> {
    fn drop(&mut self) {
        lock(&self.inner).leased = false;
        tracing::debug!("Editor lease released for '{}'", self.name);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T: Clone + Send + 'static> Slot<T> {
    pub fn new(name: &'static str, value: T) -> Self {
        Self {
            name,
            inner: Arc::new(Mutex::new(SlotState { value, leased: false })),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current value (a snapshot; later writes are not reflected)
    pub fn get(&self) -> T {
        lock(&self.inner).value.clone()
    }

    /// Read through a projection without cloning the whole value
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&lock(&self.inner).value)
    }

    pub fn is_leased(&self) -> bool {
        lock(&self.inner).leased
    }

    /// Replace the value. Refused while a child editor owns the field.
    pub fn set(&self, value: T) -> CoreResult<()> {
        self.edit(|current| *current = value)
    }

    /// Mutate the value in place. Refused while a child editor owns the field.
    pub fn edit<R>(&self, f: impl FnOnce(&mut T) -> R) -> CoreResult<R> {
        let mut state = lock(&self.inner);
        if state.leased {
            return Err(CoreError::SlotBusy(self.name));
        }
        Ok(f(&mut state.value))
    }

    /// Lease the field to a child editor that works on the whole value.
    /// The child's result replaces the field verbatim.
    pub fn open_editor(&self) -> CoreResult<ModalParams<T>> {
        self.open_editor_with(|value| Some(value.clone()), |slot, value| *slot = value)
    }

    /// Lease the field to a child editor that works on a projection of it.
    ///
    /// `read` builds the child's `initial` value (`None` lets the child start
    /// from its own default); `apply` folds the child's result back into the
    /// field when `on_done` fires.
    pub fn open_editor_with<U, R, A>(&self, read: R, apply: A) -> CoreResult<ModalParams<U>>
    where
        U: Send + 'static,
        R: FnOnce(&T) -> Option<U>,
        A: FnOnce(&mut T, U) + Send + 'static,
    {
        let initial = {
            let mut state = lock(&self.inner);
            if state.leased {
                return Err(CoreError::SlotBusy(self.name));
            }
            state.leased = true;
            read(&state.value)
        };
        tracing::debug!("Editor lease taken for '{}'", self.name);

        let lease = Arc::new(Lease {
            name: self.name,
            inner: Arc::clone(&self.inner),
        });
        let done_lease = Arc::clone(&lease);
        let name = self.name;

        Ok(ModalParams::new(initial)
            .on_done(move |value: U| {
                {
                    let mut state = lock(&done_lease.inner);
                    apply(&mut state.value, value);
                }
                tracing::debug!("Editor result committed to '{}'", name);
                drop(done_lease);
            })
            .on_cancel(move || {
                tracing::debug!("Editor for '{}' dismissed without changes", name);
                drop(lease);
            }))
    }
}
