// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Reorder engine — translates "move A to where B is" into an index move.

use imgpdf_core::types::MoveIntent;

use crate::state::StoreHandle;

/// Apply a drag-end intent to the store. Returns whether a move was
/// dispatched.
///
/// A drop outside the list, a drop onto itself, or an id that is no longer
/// present leaves the order untouched.
pub fn apply_move(store: &StoreHandle, intent: MoveIntent) -> bool {
    let Some(target) = intent.target else {
        return false;
    };
    if target == intent.source {
        return false;
    }
    // Ids are resolved to indices under the same lock that applies the move.
    store.move_image(intent.source, target)
}
