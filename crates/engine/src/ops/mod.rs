use std::sync::Arc;

use crate::{
    EngineError, ResultEngine,
    advice::{MessagePicker, RandomPicker},
    store::{RecordStore, StoreStatus},
    util::KeyedLocks,
};

mod dashboard;
mod entries;
mod goals;
mod users;

pub use goals::CONTRIBUTION_CATEGORY;
pub use users::{DEMO_EMAIL, DEMO_NAME, DEMO_PASSWORD, DEMO_USERNAME};

/// Entry point of every business operation.
///
/// The engine owns no data itself: everything is read from and written to
/// the [`RecordStore`] it was built with.
#[derive(Debug)]
pub struct Engine {
    store: Arc<dyn RecordStore>,
    picker: Arc<dyn MessagePicker>,
    funding_locks: KeyedLocks,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Status of the backing store.
    pub fn store_status(&self) -> StoreStatus {
        self.store.status()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    store: Option<Arc<dyn RecordStore>>,
    picker: Option<Arc<dyn MessagePicker>>,
}

impl EngineBuilder {
    /// Pass the required record store
    pub fn store(mut self, store: Arc<dyn RecordStore>) -> EngineBuilder {
        self.store = Some(store);
        self
    }

    /// Override how advice messages are picked. Defaults to a random pick.
    pub fn picker(mut self, picker: Arc<dyn MessagePicker>) -> EngineBuilder {
        self.picker = Some(picker);
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> ResultEngine<Engine> {
        let store = self
            .store
            .ok_or_else(|| EngineError::Internal("a record store is required".to_string()))?;
        Ok(Engine {
            store,
            picker: self
                .picker
                .unwrap_or_else(|| Arc::new(RandomPicker::new())),
            funding_locks: KeyedLocks::default(),
        })
    }
}
