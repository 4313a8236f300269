//! Edit types and the carried-edit queue

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_CARRIED_EDITS;

/// A kind of correction an order may need. Each has exactly one station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditType {
    Address,
    Quantity,
    Discount,
    Product,
    Invoice,
    Cancel,
}

impl EditType {
    /// Station unlock order
    pub const ALL: [EditType; 6] = [
        EditType::Address,
        EditType::Quantity,
        EditType::Discount,
        EditType::Product,
        EditType::Invoice,
        EditType::Cancel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EditType::Address => "address",
            EditType::Quantity => "quantity",
            EditType::Discount => "discount",
            EditType::Product => "product",
            EditType::Invoice => "invoice",
            EditType::Cancel => "cancel",
        }
    }

    /// Position in the unlock order
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Edits the player is holding, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarriedEdits {
    queue: VecDeque<EditType>,
}

impl CarriedEdits {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::with_capacity(MAX_CARRIED_EDITS),
        }
    }

    pub fn contains(&self, edit: EditType) -> bool {
        self.queue.contains(&edit)
    }

    pub fn is_full(&self) -> bool {
        self.queue.len() >= MAX_CARRIED_EDITS
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Next edit to be applied
    pub fn head(&self) -> Option<EditType> {
        self.queue.front().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = EditType> + '_ {
        self.queue.iter().copied()
    }

    /// Callers check `contains`/`is_full` first; this only asserts it.
    pub(crate) fn push(&mut self, edit: EditType) {
        debug_assert!(!self.contains(edit) && !self.is_full());
        self.queue.push_back(edit);
    }

    pub(crate) fn pop(&mut self) -> Option<EditType> {
        self.queue.pop_front()
    }
}
