//! A single selection card bound to one catalog.

use std::fmt;

use tracing::debug;

use crate::catalog::{CardOption, SlotKind};
use crate::errors::SelectionError;

/// Callback invoked with the newly selected option.
pub type ChangeObserver = Box<dyn FnMut(&CardOption)>;

/// Selection point holding one option from its catalog.
pub struct Slot {
    /// Catalog this slot draws from.
    kind: SlotKind,
    /// Card label, e.g. `Extra 2`.
    label: String,
    /// Current choice, always a member of the catalog.
    selected: &'static CardOption,
    /// Callbacks notified on every change.
    observers: Vec<ChangeObserver>,
}

impl Slot {
    /// Create a slot of `kind` showing the sentinel option.
    #[must_use]
    pub fn new(kind: SlotKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            selected: kind.catalog().sentinel(),
            observers: Vec::new(),
        }
    }

    /// Catalog kind of the slot.
    #[must_use]
    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    /// Card label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Currently selected option.
    #[must_use]
    pub fn selected(&self) -> &'static CardOption {
        self.selected
    }

    /// Asset reference currently displayed on the card.
    #[must_use]
    pub fn asset(&self) -> &'static str {
        self.selected.asset
    }

    /// Return `true` while the sentinel is selected.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.selected.is_none()
    }

    /// Select the catalog option called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::InvalidOption`] when the catalog has no such option.
    ///
    /// # Examples
    /// ```
    /// use festokes::{Slot, SlotKind};
    ///
    /// let mut slot = Slot::new(SlotKind::Velocity, "Velocity");
    /// let option = slot.select("BDM2").expect("listed");
    /// assert_eq!(option.score, 3);
    /// assert_eq!(slot.asset(), "velocity/BDMtwovel.webp");
    /// ```
    pub fn select(&mut self, name: &str) -> Result<&'static CardOption, SelectionError> {
        let option = self
            .kind
            .catalog()
            .get(name)
            .ok_or_else(|| SelectionError::InvalidOption {
                kind: self.kind,
                name: name.to_string(),
            })?;
        self.set(option);
        Ok(option)
    }

    /// Select `option`, which must be a member of the slot's catalog.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::InvalidOption`] when `option` belongs to another
    /// catalog or to none at all.
    pub fn select_option(&mut self, option: &CardOption) -> Result<(), SelectionError> {
        match self.kind.catalog().get(option.name) {
            Some(listed) if listed == option => {
                self.set(listed);
                Ok(())
            }
            _ => Err(SelectionError::InvalidOption {
                kind: self.kind,
                name: option.name.to_string(),
            }),
        }
    }

    /// Return to the sentinel option.
    pub fn reset(&mut self) {
        self.set(self.kind.catalog().sentinel());
    }

    /// Register a callback that runs whenever the selection changes.
    ///
    /// Resetting the slot counts as a change, so the callback also sees the
    /// sentinel on `clear`.
    pub fn on_change<F>(&mut self, observer: F)
    where
        F: FnMut(&CardOption) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Store the option and notify observers.
    fn set(&mut self, option: &'static CardOption) {
        debug!(slot = %self.label, option = option.name, "selection changed");
        self.selected = option;
        for observer in &mut self.observers {
            observer(option);
        }
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("kind", &self.kind)
            .field("label", &self.label)
            .field("selected", &self.selected.name)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::catalog::{PRESSURE_CATALOG, VELOCITY_CATALOG};

    #[test]
    fn new_slot_shows_the_sentinel() {
        let slot = Slot::new(SlotKind::Pressure, "Pressure");
        assert!(slot.is_unset());
        assert_eq!(slot.asset(), "pressure/emptypressure.webp");
        assert_eq!(slot.label(), "Pressure");
    }

    #[test]
    fn observers_receive_each_new_asset() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut slot = Slot::new(SlotKind::Mesh, "Mesh");
        let sink = Rc::clone(&seen);
        slot.on_change(move |option| sink.borrow_mut().push(option.asset));

        slot.select("Curved Mesh").expect("listed");
        slot.reset();

        assert_eq!(
            *seen.borrow(),
            vec!["mesh/curvedmesh.webp", "mesh/emptymesh.webp"]
        );
    }

    #[test]
    fn rejected_selection_keeps_previous_choice() {
        let mut slot = Slot::new(SlotKind::Velocity, "Velocity");
        slot.select("P2").expect("listed");

        let error = slot.select("Q2").expect_err("not listed");
        assert_eq!(
            error,
            SelectionError::InvalidOption {
                kind: SlotKind::Velocity,
                name: "Q2".to_string(),
            }
        );
        assert_eq!(slot.selected().name, "P2");
    }

    #[test]
    fn select_option_requires_catalog_membership() {
        let mut slot = Slot::new(SlotKind::Velocity, "Velocity");
        let foreign = PRESSURE_CATALOG.get("P1").expect("listed");
        assert!(slot.select_option(foreign).is_err());
        assert!(slot.is_unset());

        let own = VELOCITY_CATALOG.get("P1").expect("listed");
        slot.select_option(own).expect("member accepted");
        assert_eq!(slot.selected(), own);
    }
}
