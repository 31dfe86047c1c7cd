use redb::ReadableTable;

use super::db::{Database, DatabaseError};
use super::tables::*;
use crate::faq::Faq;

impl Database {
    // ========================================================================
    // FAQ operations
    // ========================================================================

    /// Insert or overwrite a record under `key`
    pub fn put_faq(&self, key: &str, faq: &Faq) -> Result<(), DatabaseError> {
        debug_assert!(!key.is_empty(), "faq key must not be empty");

        let write_txn = self.begin_write()?;
        {
            let mut table = write_txn.open_table(FAQS)?;
            let data = rmp_serde::to_vec_named(faq)?;
            table.insert(key, data.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    pub fn get_faq(&self, key: &str) -> Result<Option<Faq>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(FAQS)?;

        match table.get(key)? {
            Some(data) => Ok(Some(rmp_serde::from_slice(data.value())?)),
            None => Ok(None),
        }
    }

    /// All records in key order
    pub fn get_all_faqs(&self) -> Result<Vec<Faq>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(FAQS)?;

        let mut faqs = Vec::new();
        for result in table.iter()? {
            let (_, value) = result?;
            faqs.push(rmp_serde::from_slice(value.value())?);
        }

        Ok(faqs)
    }

    /// Read, modify and write back a record inside one write transaction.
    /// Returns the stored result, or `None` if the key is absent.
    pub fn modify_faq<F>(&self, key: &str, modify: F) -> Result<Option<Faq>, DatabaseError>
    where
        F: FnOnce(&mut Faq),
    {
        let write_txn = self.begin_write()?;

        let existing: Option<Faq> = {
            let table = write_txn.open_table(FAQS)?;
            let result = match table.get(key)? {
                Some(data) => Some(rmp_serde::from_slice(data.value())?),
                None => None,
            };
            result
        };

        let updated = match existing {
            Some(mut faq) => {
                modify(&mut faq);
                let serialized = rmp_serde::to_vec_named(&faq)?;
                let mut table = write_txn.open_table(FAQS)?;
                table.insert(key, serialized.as_slice())?;
                Some(faq)
            }
            None => None,
        };

        write_txn.commit()?;
        Ok(updated)
    }

    /// Remove a record, returning what was stored
    pub fn delete_faq(&self, key: &str) -> Result<Option<Faq>, DatabaseError> {
        let write_txn = self.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(FAQS)?;
            let result = match table.remove(key)? {
                Some(data) => Some(rmp_serde::from_slice(data.value())?),
                None => None,
            };
            result
        };
        write_txn.commit()?;
        Ok(removed)
    }
}
