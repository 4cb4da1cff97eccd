//! Variable-length lists of sub-records within a form

use uuid::Uuid;

/// One entry of a field array with a key that is stable across removals
#[derive(Debug, Clone)]
pub struct ArrayEntry<T> {
    pub id: Uuid,
    pub value: T,
}

/// Ordered, user-editable list of entries
#[derive(Debug, Clone)]
pub struct FieldArray<T> {
    entries: Vec<ArrayEntry<T>>,
}

impl<T> FieldArray<T> {
    pub fn new(initial: impl IntoIterator<Item = T>) -> Self {
        let mut array = Self {
            entries: Vec::new(),
        };
        array.replace(initial);
        array
    }

    #[allow(clippy::len_without_is_empty)] // never empty once a form registers it
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Insert a new entry at the end, returning its key
    pub fn append(&mut self, value: T) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.push(ArrayEntry { id, value });
        id
    }

    /// Delete the entry at `index`, keeping the others in order
    pub fn remove(&mut self, index: usize) -> Option<ArrayEntry<T>> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Discard all entries and start over with fresh keys
    pub fn replace(&mut self, values: impl IntoIterator<Item = T>) {
        self.entries.clear();
        for value in values {
            self.append(value);
        }
    }

    pub fn get(&self, index: usize) -> Option<&ArrayEntry<T>> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ArrayEntry<T>> {
        self.entries.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArrayEntry<T>> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ArrayEntry<T>> {
        self.entries.iter_mut()
    }
}
