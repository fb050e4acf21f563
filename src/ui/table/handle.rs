use std::time::Instant;

use dioxus::core::Task;
use dioxus::prelude::*;

use crate::table::TableModel;

/// Shared access to one mounted table's model.
///
/// The model itself is not reactive; every mutation goes through
/// [`TableHandle::update`], which bumps `revision` so the owning component
/// re-renders.
pub struct TableHandle<T: 'static> {
    model: CopyValue<TableModel<T>>,
    revision: Signal<u64>,
    search_task: CopyValue<Option<Task>>,
}

impl<T: 'static> Clone for TableHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for TableHandle<T> {}

pub fn use_table_handle<T: 'static>(init: impl FnOnce() -> TableModel<T>) -> TableHandle<T> {
    let model = use_hook(|| CopyValue::new(init()));
    let revision = use_signal(|| 0_u64);
    let search_task = use_hook(|| CopyValue::new(None::<Task>));
    TableHandle {
        model,
        revision,
        search_task,
    }
}

impl<T: 'static> TableHandle<T> {
    /// Subscribes the calling component to model changes.
    pub fn track(&self) -> u64 {
        (self.revision)()
    }

    pub fn with<R>(&self, f: impl FnOnce(&TableModel<T>) -> R) -> R {
        f(&self.model.read())
    }

    /// Mutates the model without scheduling a render. Used while rendering.
    pub fn with_mut_silent<R>(&self, f: impl FnOnce(&mut TableModel<T>) -> R) -> R {
        let mut model = self.model;
        let result = f(&mut model.write());
        result
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut TableModel<T>) -> R) -> R {
        let result = self.with_mut_silent(f);
        self.refresh();
        result
    }

    /// Schedules a render without touching the model, for view-only state
    /// kept beside it.
    pub fn refresh(&self) {
        let mut revision = self.revision;
        revision += 1;
    }

    /// Records a keystroke and (re)starts the debounce timer. The settled
    /// value is forwarded once the window elapses without another keystroke.
    pub fn type_search(&self, text: String) {
        self.update(|model| model.type_search(text, Instant::now()));
        self.cancel_search_task();

        let handle = *self;
        let task = spawn(async move {
            while let Some(deadline) = handle.with(|model| model.search_deadline()) {
                tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
                if handle.update(|model| model.poll_search(Instant::now())) {
                    break;
                }
            }
        });
        let mut slot = self.search_task;
        slot.set(Some(task));
    }

    pub fn cancel_search_task(&self) {
        let mut slot = self.search_task;
        let pending = slot.write().take();
        if let Some(task) = pending {
            task.cancel();
        }
    }

    pub fn reset_all(&self) {
        self.cancel_search_task();
        self.update(|model| model.reset_all());
    }
}
