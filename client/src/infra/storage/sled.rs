//! [`Storage`] implementation backed by an embedded [`sled`] database.

use std::path::PathBuf;

use common::operations::{By, Select, Update};
use smart_default::SmartDefault;
use tracerr::Traced;

use super::{Batch, Change, Error, Key, Storage};

/// Name of the [`sled::Tree`] holding session entries.
const TREE: &[u8] = b"session";

/// [`Sled`] configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Directory of the database files.
    #[default(PathBuf::from(".movies/session"))]
    pub path: PathBuf,

    /// Indicator whether the database is removed once dropped.
    pub temporary: bool,
}

/// Durable [`Storage`] surviving client restarts.
#[derive(Clone, Debug)]
pub struct Sled {
    /// [`sled::Tree`] holding session entries.
    tree: ::sled::Tree,
}

impl Sled {
    /// Opens a [`Sled`] storage with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the database cannot be opened.
    pub fn open(config: &Config) -> Result<Self, Traced<Error>> {
        let db = ::sled::Config::new()
            .path(&config.path)
            .temporary(config.temporary)
            .open()
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        let tree = db.open_tree(TREE).map_err(tracerr::from_and_wrap!(=> Error))?;
        Ok(Self { tree })
    }
}

impl Storage<Select<By<Option<String>, Key>>> for Sled {
    type Ok = Option<String>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<String>, Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.tree
            .get(by.into_inner().as_str())
            .map_err(tracerr::from_and_wrap!(=> Error))?
            .map(|v| String::from_utf8(v.to_vec()))
            .transpose()
            .map_err(tracerr::from_and_wrap!(=> Error))
    }
}

impl Storage<Update<Batch>> for Sled {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Update(batch): Update<Batch>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut b = ::sled::Batch::default();
        for change in batch {
            match change {
                Change::Put(key, value) => b.insert(key.as_str(), value.as_str()),
                Change::Remove(key) => b.remove(key.as_str()),
            }
        }
        self.tree
            .apply_batch(b)
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        self.tree
            .flush_async()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map(drop)
    }
}

#[cfg(test)]
mod tests {
    use common::operations::{By, Select, Update};

    use super::{Batch, Config, Key, Sled, Storage as _};

    fn temporary() -> Sled {
        Sled::open(&Config {
            path: std::env::temp_dir().join(format!(
                "movies-session-{}-{:?}",
                std::process::id(),
                std::thread::current().id(),
            )),
            temporary: true,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn reads_back_written_entries() {
        let storage = temporary();

        storage
            .execute(Update(
                Batch::default()
                    .put(Key::Token, "\"abc\"")
                    .put(Key::User, "{}"),
            ))
            .await
            .unwrap();

        let token = storage.execute(Select(By::new(Key::Token))).await.unwrap();
        let profile =
            storage.execute(Select(By::new(Key::Profile))).await.unwrap();

        assert_eq!(token.as_deref(), Some("\"abc\""));
        assert_eq!(profile, None);
    }

    #[tokio::test]
    async fn removes_entries() {
        let storage = temporary();

        storage
            .execute(Update(Batch::default().put(Key::Profile, "{}")))
            .await
            .unwrap();
        storage
            .execute(Update(Batch::default().remove(Key::Profile)))
            .await
            .unwrap();

        let profile =
            storage.execute(Select(By::new(Key::Profile))).await.unwrap();
        assert_eq!(profile, None);
    }
}
