//! The selection panel: mesh, pressure and velocity cards plus extras.

use serde::Serialize;
use tracing::debug;

use crate::catalog::{CardOption, SlotKind};
use crate::errors::SelectionError;
use crate::slot::Slot;

/// Address of a slot on the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotId {
    /// The mesh card.
    Mesh,
    /// The pressure card.
    Pressure,
    /// The velocity card.
    Velocity,
    /// The extra card at this position, in insertion order.
    Extra(usize),
}

/// Snapshot of every selection at one point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    /// Selected mesh card.
    pub mesh: &'static CardOption,
    /// Selected pressure card.
    pub pressure: &'static CardOption,
    /// Selected velocity card.
    pub velocity: &'static CardOption,
    /// Selected extra cards in insertion order.
    pub extras: Vec<&'static CardOption>,
}

impl SelectionState {
    /// Iterate over every selected option, extras last.
    pub fn options(&self) -> impl Iterator<Item = &'static CardOption> + '_ {
        [self.mesh, self.pressure, self.velocity]
            .into_iter()
            .chain(self.extras.iter().copied())
    }

    /// Return `true` when an extra with this name is selected.
    #[must_use]
    pub fn has_extra(&self, name: &str) -> bool {
        self.extras.iter().any(|extra| extra.name == name)
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            mesh: SlotKind::Mesh.catalog().sentinel(),
            pressure: SlotKind::Pressure.catalog().sentinel(),
            velocity: SlotKind::Velocity.catalog().sentinel(),
            extras: Vec::new(),
        }
    }
}

/// Holds the cards the user picks from.
#[derive(Debug)]
pub struct SelectionPanel {
    /// Mesh card.
    mesh: Slot,
    /// Pressure card.
    pressure: Slot,
    /// Velocity card.
    velocity: Slot,
    /// Extra cards, append-only until cleared.
    extras: Vec<Slot>,
}

impl Default for SelectionPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionPanel {
    /// Create a panel with every card on the sentinel and no extras.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mesh: Slot::new(SlotKind::Mesh, SlotKind::Mesh.label()),
            pressure: Slot::new(SlotKind::Pressure, SlotKind::Pressure.label()),
            velocity: Slot::new(SlotKind::Velocity, SlotKind::Velocity.label()),
            extras: Vec::new(),
        }
    }

    /// Borrow a slot.
    #[must_use]
    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        match id {
            SlotId::Mesh => Some(&self.mesh),
            SlotId::Pressure => Some(&self.pressure),
            SlotId::Velocity => Some(&self.velocity),
            SlotId::Extra(idx) => self.extras.get(idx),
        }
    }

    /// Mutably borrow a slot, e.g. to register an observer.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownSlot`] for an extra index that does not exist.
    pub fn slot_mut(&mut self, id: SlotId) -> Result<&mut Slot, SelectionError> {
        match id {
            SlotId::Mesh => Ok(&mut self.mesh),
            SlotId::Pressure => Ok(&mut self.pressure),
            SlotId::Velocity => Ok(&mut self.velocity),
            SlotId::Extra(idx) => self
                .extras
                .get_mut(idx)
                .ok_or(SelectionError::UnknownSlot(idx)),
        }
    }

    /// Number of extra cards.
    #[must_use]
    pub fn extra_count(&self) -> usize {
        self.extras.len()
    }

    /// Select the option called `name` on a slot.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownSlot`] for a missing extra and
    /// [`SelectionError::InvalidOption`] when the slot's catalog has no such option.
    ///
    /// # Examples
    /// ```
    /// use festokes::{SelectionPanel, SlotId};
    ///
    /// let mut panel = SelectionPanel::new();
    /// panel.select(SlotId::Mesh, "Type One Mesh").expect("listed");
    /// let extra = panel.add_extra();
    /// panel.select(extra, "Alfeld Split").expect("listed");
    /// assert_eq!(panel.state().extras[0].name, "Alfeld Split");
    /// ```
    pub fn select(&mut self, id: SlotId, name: &str) -> Result<&'static CardOption, SelectionError> {
        self.slot_mut(id)?.select(name)
    }

    /// Select `option` on a slot.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownSlot`] for a missing extra and
    /// [`SelectionError::InvalidOption`] when `option` is not in the slot's catalog.
    pub fn select_option(&mut self, id: SlotId, option: &CardOption) -> Result<(), SelectionError> {
        self.slot_mut(id)?.select_option(option)
    }

    /// Append an extra card on the sentinel and return its address.
    pub fn add_extra(&mut self) -> SlotId {
        let idx = self.extras.len();
        self.extras
            .push(Slot::new(SlotKind::Extra, format!("Extra {}", idx + 1)));
        debug!(count = idx + 1, "extra card added");
        SlotId::Extra(idx)
    }

    /// Reset the singleton cards and drop every extra.
    pub fn clear(&mut self) {
        self.extras.clear();
        self.mesh.reset();
        self.pressure.reset();
        self.velocity.reset();
    }

    /// Snapshot the current selections.
    #[must_use]
    pub fn state(&self) -> SelectionState {
        SelectionState {
            mesh: self.mesh.selected(),
            pressure: self.pressure.selected(),
            velocity: self.velocity.selected(),
            extras: self.extras.iter().map(Slot::selected).collect(),
        }
    }
}
