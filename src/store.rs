//! Persistence of a whole tree in a single repository file.
//!
//! File layout:
//!
//! | Part    | Encoding                                   |
//! |---------|--------------------------------------------|
//! | magic   | 4 bytes, `WTIX`                            |
//! | version | u16, big endian                            |
//! | tree    | CBOR, see [`crate::tree::OrderedTree`] serde support |
//!
//! The file is written next to its final location and then moved in place,
//! so an interrupted save never leaves a truncated repository behind.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use derivative::Derivative;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::base::{REPOSITORY_FILE, REPOSITORY_MAGIC, REPOSITORY_VERSION};
use crate::error::StoreError;
use crate::tree::OrderedTree;

#[derive(Derivative, Clone, Debug)]
#[derivative(Default)]
pub struct IndexStore {
    /// Path of the repository file
    #[derivative(Default(value = "PathBuf::from(REPOSITORY_FILE)"))]
    path: PathBuf,
}

impl IndexStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Loads the stored tree, or returns an empty one.
    ///
    /// A missing or unreadable repository is not an error: the problem is
    /// logged and indexing starts from scratch.
    pub fn load<T>(&self) -> OrderedTree<T>
    where
        T: DeserializeOwned + Ord,
    {
        match self.try_load() {
            Ok(Some(tree)) => {
                info!(
                    "Loaded {} entries from {}",
                    tree.len(),
                    self.path.display()
                );
                tree
            }
            Ok(None) => {
                info!(
                    "No repository found at {}, starting a new one",
                    self.path.display()
                );
                OrderedTree::new()
            }
            Err(e) => {
                warn!("Could not load repository ({}), starting a new one", e);
                OrderedTree::new()
            }
        }
    }

    /// Loads the stored tree; `Ok(None)` when there is no repository file
    pub fn try_load<T>(&self) -> Result<Option<OrderedTree<T>>, StoreError>
    where
        T: DeserializeOwned + Ord,
    {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        let mut reader = BufReader::new(file);

        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => StoreError::Decode("truncated header".to_string()),
            _ => self.io_error(e),
        })?;
        if &magic != REPOSITORY_MAGIC {
            return Err(StoreError::BadMagic(magic));
        }

        let version = reader.read_u16::<BigEndian>().map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => StoreError::Decode("truncated header".to_string()),
            _ => self.io_error(e),
        })?;
        if version != REPOSITORY_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: version,
                expected: REPOSITORY_VERSION,
            });
        }

        let tree: OrderedTree<T> = ciborium::de::from_reader(reader)
            .map_err(|e| StoreError::Decode(format!("{:?}", e)))?;
        Ok(Some(tree))
    }

    /// Writes the whole tree, replacing any previous repository
    pub fn save<T: Serialize>(&self, tree: &OrderedTree<T>) -> Result<(), StoreError> {
        let tmp_path = self.tmp_path();
        debug!("Writing {} entries to {}", tree.len(), tmp_path.display());

        // Move file in place once fully written
        let result = self
            .write_file(&tmp_path, tree)
            .and_then(|_| fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e)));
        if let Err(e) = result {
            if let Err(remove_error) = fs::remove_file(&tmp_path) {
                if remove_error.kind() != ErrorKind::NotFound {
                    warn!(
                        "Could not remove {}: {}",
                        tmp_path.display(),
                        remove_error
                    );
                }
            }
            return Err(e);
        }

        info!(
            "Saved {} entries to {}",
            tree.len(),
            self.path.display()
        );
        Ok(())
    }

    fn write_file<T: Serialize>(
        &self,
        path: &Path,
        tree: &OrderedTree<T>,
    ) -> Result<(), StoreError> {
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| self.io_error(e))?;
        let mut writer = BufWriter::new(file);

        writer
            .write_all(REPOSITORY_MAGIC)
            .map_err(|e| self.io_error(e))?;
        writer
            .write_u16::<BigEndian>(REPOSITORY_VERSION)
            .map_err(|e| self.io_error(e))?;
        ciborium::ser::into_writer(tree, &mut writer)
            .map_err(|e| StoreError::Encode(format!("{:?}", e)))?;
        writer.flush().map_err(|e| self.io_error(e))
    }
}
