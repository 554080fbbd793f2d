//! Segmented code entry.
//!
//! A `CodeInputArray` owns a fixed number of single-character slots and the
//! index of the focused slot. Edits are filtered at the input level: anything
//! other than one ASCII digit or the empty marker leaves the array untouched
//! and is not an error.

use serde::{Deserialize, Serialize};

/// Raw slot value that clears a slot
pub const EMPTY_MARKER: &str = "";

/// Change report handed upward after an accepted edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotEdit {
    /// Slot that was edited or navigated from
    pub index: usize,
    /// Slot content after the edit
    pub value: Option<char>,
    /// Focused slot after the edit
    pub focus: usize,
    /// Concatenated code after the edit
    pub code: String,
    /// Whether every slot is filled
    pub complete: bool,
}

/// Ordered, fixed-length sequence of single-digit slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeInputArray {
    slots: Vec<Option<char>>,
    focus: usize,
    read_only: bool,
}

impl CodeInputArray {
    /// Create an array of `length` empty slots with focus on the first
    pub fn new(length: usize) -> Self {
        Self {
            slots: vec![None; length],
            focus: 0,
            read_only: false,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// No slot holds a digit
    pub fn is_blank(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn slots(&self) -> &[Option<char>] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Freeze or unfreeze the array
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// All slots are non-empty
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Concatenation of the slot characters
    pub fn value(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    /// Apply the raw text of one slot.
    ///
    /// Accepts a single ASCII digit or [`EMPTY_MARKER`]. A digit in any slot
    /// but the last advances focus to the next slot. Returns `None` when the
    /// input is filtered out, the index is out of range or the array is
    /// read-only.
    pub fn set_slot(&mut self, index: usize, value: &str) -> Option<SlotEdit> {
        if self.read_only || index >= self.slots.len() {
            return None;
        }

        let mut chars = value.chars();
        let slot = match (chars.next(), chars.next()) {
            (None, _) => None,
            (Some(c), None) if c.is_ascii_digit() => Some(c),
            _ => return None,
        };

        self.slots[index] = slot;
        self.focus = index;
        if slot.is_some() && index + 1 < self.slots.len() {
            self.focus = index + 1;
        }

        Some(self.edit(index))
    }

    /// Backspace pressed while `index` is focused.
    ///
    /// A filled slot is cleared in place; on an already-empty slot focus
    /// moves to the previous slot (the first slot stays put).
    pub fn backspace(&mut self, index: usize) -> Option<SlotEdit> {
        if self.read_only || index >= self.slots.len() {
            return None;
        }

        if self.slots[index].is_some() {
            self.slots[index] = None;
            self.focus = index;
        } else {
            self.focus = index.saturating_sub(1);
        }

        Some(self.edit(index))
    }

    /// Move focus without editing
    pub fn focus_slot(&mut self, index: usize) -> bool {
        if self.read_only || index >= self.slots.len() {
            return false;
        }
        self.focus = index;
        true
    }

    /// Empty every slot and focus the first one
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.focus = 0;
        self.read_only = false;
    }

    fn edit(&self, index: usize) -> SlotEdit {
        SlotEdit {
            index,
            value: self.slots[index],
            focus: self.focus,
            code: self.value(),
            complete: self.is_complete(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(digits: &str) -> CodeInputArray {
        let mut input = CodeInputArray::new(digits.len());
        for (index, digit) in digits.chars().enumerate() {
            input.set_slot(index, &digit.to_string());
        }
        input
    }

    #[test]
    fn test_new_array_is_blank() {
        let input = CodeInputArray::new(4);
        assert_eq!(input.len(), 4);
        assert!(input.is_blank());
        assert!(!input.is_complete());
        assert_eq!(input.value(), "");
        assert_eq!(input.focus(), 0);
    }

    #[test]
    fn test_digit_advances_focus() {
        let mut input = CodeInputArray::new(4);
        for index in 0..3 {
            let edit = input.set_slot(index, "7").unwrap();
            assert_eq!(edit.focus, index + 1);
        }
    }

    #[test]
    fn test_digit_in_last_slot_keeps_focus() {
        let mut input = CodeInputArray::new(4);
        let edit = input.set_slot(3, "9").unwrap();
        assert_eq!(edit.focus, 3);
        assert_eq!(input.slot(3), Some('9'));
    }

    #[test]
    fn test_rejected_inputs_leave_array_unchanged() {
        let mut input = filled("12");
        let mut input4 = CodeInputArray::new(4);
        input4.set_slot(0, "5");
        let before = input4.clone();

        for bad in ["a", "12", " ", "-", "٣", "5 ", "x9"] {
            for index in 0..4 {
                assert!(input4.set_slot(index, bad).is_none(), "accepted {:?}", bad);
                assert_eq!(input4, before);
            }
        }

        assert!(input.set_slot(5, "1").is_none());
        assert_eq!(input.value(), "12");
    }

    #[test]
    fn test_empty_marker_clears_slot() {
        let mut input = filled("1234");
        let edit = input.set_slot(2, EMPTY_MARKER).unwrap();
        assert_eq!(edit.value, None);
        assert_eq!(edit.focus, 2);
        assert!(!edit.complete);
        assert_eq!(input.value(), "124");
    }

    #[test]
    fn test_is_complete_only_when_all_filled() {
        let mut input = CodeInputArray::new(4);
        input.set_slot(0, "1");
        input.set_slot(1, "2");
        input.set_slot(3, "4");
        assert!(!input.is_complete());

        let edit = input.set_slot(2, "3").unwrap();
        assert!(edit.complete);
        assert_eq!(edit.code, "1234");
    }

    #[test]
    fn test_backspace_on_empty_slot_moves_back() {
        let mut input = CodeInputArray::new(4);
        input.set_slot(0, "1");
        let edit = input.backspace(1).unwrap();
        assert_eq!(edit.focus, 0);
        assert_eq!(input.value(), "1");
    }

    #[test]
    fn test_backspace_on_filled_slot_clears_in_place() {
        let mut input = filled("1234");
        let edit = input.backspace(3).unwrap();
        assert_eq!(edit.focus, 3);
        assert_eq!(edit.value, None);
        assert_eq!(input.value(), "123");
    }

    #[test]
    fn test_backspace_on_first_empty_slot_stays() {
        let mut input = CodeInputArray::new(4);
        let edit = input.backspace(0).unwrap();
        assert_eq!(edit.focus, 0);
    }

    #[test]
    fn test_read_only_blocks_edits() {
        let mut input = filled("1234");
        input.set_read_only(true);
        assert!(input.set_slot(0, "9").is_none());
        assert!(input.backspace(3).is_none());
        assert!(!input.focus_slot(1));
        assert_eq!(input.value(), "1234");
    }

    #[test]
    fn test_clear_resets_slots_and_focus() {
        let mut input = filled("1234");
        input.set_read_only(true);
        input.clear();
        assert!(input.is_blank());
        assert_eq!(input.focus(), 0);
        assert!(!input.is_read_only());
    }
}
