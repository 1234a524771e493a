//! In-memory [`Storage`] implementation.

use std::{collections::HashMap, sync::Arc};

use common::operations::{By, Select, Update};
use tokio::sync::Mutex;
use tracerr::Traced;

use super::{Batch, Change, Error, Key, Storage};

/// [`Storage`] keeping its entries in memory only.
///
/// Clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct Memory(Arc<Mutex<HashMap<Key, String>>>);

impl Storage<Select<By<Option<String>, Key>>> for Memory {
    type Ok = Option<String>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<String>, Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.0.lock().await.get(by.as_inner()).cloned())
    }
}

impl Storage<Update<Batch>> for Memory {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Update(batch): Update<Batch>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut entries = self.0.lock().await;
        for change in batch {
            drop(match change {
                Change::Put(key, value) => entries.insert(key, value),
                Change::Remove(key) => entries.remove(&key),
            });
        }
        Ok(())
    }
}
