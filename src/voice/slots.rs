/// Number of note slots: one per finger, plus one.
pub const SLOT_COUNT: usize = 11;

/// Fixed-capacity record of which notes are held.
///
/// Slots are filled by first-available linear scan and carry no finger
/// identity. The same note may occupy several slots; clearing a note clears
/// all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotPool {
    slots: [Option<u8>; SLOT_COUNT],
}

impl SlotPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `note` in the first free slot, returning its index.
    /// A full pool leaves the note untracked and returns `None`.
    pub fn insert(&mut self, note: u8) -> Option<usize> {
        let index = self.slots.iter().position(Option::is_none)?;
        self.slots[index] = Some(note);
        Some(index)
    }

    /// Clear every slot holding `note`, returning how many were cleared.
    pub fn clear(&mut self, note: u8) -> usize {
        let mut cleared = 0;
        for slot in self.slots.iter_mut().filter(|slot| **slot == Some(note)) {
            *slot = None;
            cleared += 1;
        }
        cleared
    }

    pub fn clear_all(&mut self) {
        self.slots = [None; SLOT_COUNT];
    }

    /// Number of distinct slot values, counting "empty" as one value.
    ///
    /// At most one means nothing distinguishable is held: the pool is empty,
    /// or every slot holds the same note.
    pub fn distinct_values(&self) -> usize {
        let mut seen: [Option<Option<u8>>; SLOT_COUNT] = [None; SLOT_COUNT];
        let mut count = 0;
        for slot in &self.slots {
            if !seen[..count].contains(&Some(*slot)) {
                seen[count] = Some(*slot);
                count += 1;
            }
        }
        count
    }

    pub fn contains(&self, note: u8) -> bool {
        self.slots.contains(&Some(note))
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied() == 0
    }

    pub fn is_full(&self) -> bool {
        self.occupied() == SLOT_COUNT
    }

    /// Held notes in slot order (duplicates included).
    pub fn active_notes(&self) -> impl Iterator<Item = u8> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn slots(&self) -> &[Option<u8>; SLOT_COUNT] {
        &self.slots
    }
}
