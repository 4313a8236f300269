//! Edit matching: picking edits up, applying them, discarding them
//!
//! Pure functions over the carried queue and a single order. Scoring and
//! progression bookkeeping happen in the caller once these succeed.

use super::edit::{CarriedEdits, EditType};
use super::events::ActionRejected;
use super::order::Order;
use super::stations::Station;

/// A successful application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub edit: EditType,
    pub completed_order: bool,
}

/// Take an edit from `station`
pub fn pickup(carried: &mut CarriedEdits, station: &Station) -> Result<EditType, ActionRejected> {
    if !station.unlocked {
        return Err(ActionRejected::StationLocked(station.edit));
    }
    if carried.contains(station.edit) {
        return Err(ActionRejected::AlreadyCarrying(station.edit));
    }
    if carried.is_full() {
        return Err(ActionRejected::HandsFull);
    }
    carried.push(station.edit);
    Ok(station.edit)
}

/// Would the head edit be accepted by `order`?
pub fn check_apply(carried: &CarriedEdits, order: &Order) -> Result<EditType, ActionRejected> {
    let edit = carried.head().ok_or(ActionRejected::NothingCarried)?;
    order.check_edit(edit)?;
    Ok(edit)
}

/// Apply the head edit to `order`. On rejection neither side changes.
pub fn apply_to_order(carried: &mut CarriedEdits, order: &mut Order) -> Result<Applied, ActionRejected> {
    let edit = check_apply(carried, order)?;
    let completed_order = order.apply_edit(edit)?;
    carried.pop();
    Ok(Applied {
        edit,
        completed_order,
    })
}

/// Drop the head edit
pub fn discard(carried: &mut CarriedEdits) -> Option<EditType> {
    carried.pop()
}
