//! Flat File Store
//!
//! A single directory of fixed slots held in kernel heap. Names are unique
//! among live files; listing follows slot order, so a freed slot is reused
//! by the next `create` and the new file lists where the old one did.

use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::error::FsError;
use crate::text;

// ────────────────────────── Types ──────────────────────────

/// One file slot.
#[derive(Debug, Clone, Default)]
struct FileSlot {
    name: String,
    content: String,
    used: bool,
}

/// Fixed-capacity, single-directory file table.
pub struct FileTable {
    slots: Vec<FileSlot>,
    /// Live file name -> slot index.
    index: HashMap<String, usize>,
    max_name_len: usize,
    max_content_len: usize,
}

// ────────────────────────── Table ──────────────────────────

impl FileTable {
    pub fn new(capacity: usize, max_name_len: usize, max_content_len: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| FileSlot::default()).collect(),
            index: HashMap::with_capacity(capacity),
            max_name_len,
            max_content_len,
        }
    }

    /// Create an empty file in the lowest free slot.
    pub fn create(&mut self, name: &str) -> Result<(), FsError> {
        let name = text::truncate(name, self.max_name_len);
        if self.index.contains_key(name) {
            return Err(FsError::AlreadyExists);
        }
        let (slot, entry) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, s)| !s.used)
            .ok_or(FsError::NoFreeSlots)?;

        entry.used = true;
        entry.name.clear();
        entry.name.push_str(name);
        entry.content.clear();
        self.index.insert(String::from(name), slot);
        log::debug!("fs: created '{}' in slot {}", name, slot);
        Ok(())
    }

    /// Remove a file. Returns false if there was nothing to remove.
    pub fn delete(&mut self, name: &str) -> bool {
        let name = text::truncate(name, self.max_name_len);
        match self.index.remove(name) {
            Some(slot) => {
                let entry = &mut self.slots[slot];
                entry.used = false;
                entry.name.clear();
                entry.content.clear();
                log::debug!("fs: deleted '{}'", name);
                true
            }
            None => false,
        }
    }

    /// Replace a file's content, truncated to the content limit.
    pub fn write(&mut self, name: &str, content: &str) -> Result<(), FsError> {
        let max = self.max_content_len;
        let slot = self.slot_of(name)?;
        let entry = &mut self.slots[slot];
        entry.content.clear();
        entry.content.push_str(text::truncate(content, max));
        Ok(())
    }

    pub fn read(&self, name: &str) -> Result<&str, FsError> {
        let slot = self.slot_of(name)?;
        Ok(&self.slots[slot].content)
    }

    /// Live file names in slot order.
    pub fn list(&self) -> impl Iterator<Item = &str> {
        self.slots
            .iter()
            .filter(|s| s.used)
            .map(|s| s.name.as_str())
    }

    pub fn search(&self, name: &str) -> bool {
        self.slot_of(name).is_ok()
    }

    /// Number of live files.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn slot_of(&self, name: &str) -> Result<usize, FsError> {
        let name = text::truncate(name, self.max_name_len);
        self.index.get(name).copied().ok_or(FsError::NotFound)
    }
}
