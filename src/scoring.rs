//! The basic points rule.

use crate::selection::SelectionState;

/// Sum the score contributions of every selected option.
///
/// # Examples
/// ```
/// use festokes::{score, SelectionPanel, SlotId};
///
/// let mut panel = SelectionPanel::new();
/// panel.select(SlotId::Mesh, "Curved Mesh").expect("listed");
/// panel.select(SlotId::Pressure, "P1").expect("listed");
/// panel.select(SlotId::Velocity, "P2").expect("listed");
/// assert_eq!(score(&panel.state()), 9);
/// ```
#[must_use]
pub fn score(state: &SelectionState) -> i32 {
    state.options().map(|option| option.score).sum()
}
