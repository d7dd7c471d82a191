//! Static option catalogs for the four kinds of selection card.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Name of the sentinel option present in every catalog.
pub const NONE: &str = "None";

/// A selectable card: display name, image asset and score contribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct CardOption {
    /// Name shown in the selector.
    pub name: &'static str,
    /// Image path relative to the asset root.
    pub asset: &'static str,
    /// Points this choice adds to the score.
    pub score: i32,
}

impl CardOption {
    /// Return `true` for the sentinel "None" option.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.name == NONE
    }

    /// Resolve the asset reference against an asset root directory.
    #[must_use]
    pub fn asset_path(&self, root: &Path) -> PathBuf {
        root.join(self.asset)
    }
}

/// The kind of slot a catalog feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    /// Mesh card.
    Mesh,
    /// Pressure space card.
    Pressure,
    /// Velocity space card.
    Velocity,
    /// Repeatable extra technique card.
    Extra,
}

impl SlotKind {
    /// Return the catalog of options for this kind of slot.
    #[must_use]
    pub fn catalog(self) -> &'static Catalog {
        match self {
            SlotKind::Mesh => &MESH_CATALOG,
            SlotKind::Pressure => &PRESSURE_CATALOG,
            SlotKind::Velocity => &VELOCITY_CATALOG,
            SlotKind::Extra => &EXTRA_CATALOG,
        }
    }

    /// Label used on the card.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SlotKind::Mesh => "Mesh",
            SlotKind::Pressure => "Pressure",
            SlotKind::Velocity => "Velocity",
            SlotKind::Extra => "Extra",
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SlotKind::Mesh => "mesh",
            SlotKind::Pressure => "pressure",
            SlotKind::Velocity => "velocity",
            SlotKind::Extra => "extra",
        })
    }
}

/// Immutable list of options for one kind of slot.
#[derive(Debug)]
pub struct Catalog {
    /// Kind of slot served by this catalog.
    kind: SlotKind,
    /// Options in display order, sentinel last.
    options: &'static [CardOption],
}

impl Catalog {
    /// Kind of slot served by this catalog.
    #[must_use]
    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    /// All options in display order.
    #[must_use]
    pub fn options(&self) -> &'static [CardOption] {
        self.options
    }

    /// Look an option up by name.
    ///
    /// # Examples
    /// ```
    /// use festokes::SlotKind;
    ///
    /// let curved = SlotKind::Mesh.catalog().get("Curved Mesh").expect("listed");
    /// assert_eq!(curved.score, 4);
    /// assert!(SlotKind::Mesh.catalog().get("P2").is_none());
    /// ```
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'static CardOption> {
        self.options.iter().find(|option| option.name == name)
    }

    /// Return `true` when `option` is one of this catalog's entries.
    #[must_use]
    pub fn contains(&self, option: &CardOption) -> bool {
        self.options.iter().any(|candidate| candidate == option)
    }

    /// The sentinel "None" entry.
    #[must_use]
    pub fn sentinel(&self) -> &'static CardOption {
        // Every catalog below ends with the sentinel.
        &self.options[self.options.len() - 1]
    }
}

/// Mesh cards.
pub static MESH_CATALOG: Catalog = Catalog {
    kind: SlotKind::Mesh,
    options: &[
        option("Unstructured Mesh", "mesh/stdmesh.webp", 2),
        option("Curved Mesh", "mesh/curvedmesh.webp", 4),
        option("Type One Mesh", "mesh/typeonemesh.webp", 1),
        option("Singular Vertex Mesh", "mesh/crisscross.webp", 3),
        option(NONE, "mesh/emptymesh.webp", 0),
    ],
};

/// Pressure space cards.
pub static PRESSURE_CATALOG: Catalog = Catalog {
    kind: SlotKind::Pressure,
    options: &[
        option("P0", "pressure/Pzeropressure.webp", 1),
        option("P1", "pressure/Ponepressure.webp", 2),
        option("P1*", "pressure/Ponedpressure.webp", 2),
        option("P2", "pressure/Ptwopressure.webp", 3),
        option("P2*", "pressure/Ptwodpressure.webp", 3),
        option("P3", "pressure/Pthreepressure.webp", 4),
        option("P3*", "pressure/Pthreedpressure.webp", 4),
        option(NONE, "pressure/emptypressure.webp", 0),
    ],
};

/// Velocity space cards.
pub static VELOCITY_CATALOG: Catalog = Catalog {
    kind: SlotKind::Velocity,
    options: &[
        option("P1", "velocity/Ponevel.webp", 4),
        option("P1*", "velocity/Ponedvel.webp", 4),
        option("BDM1", "velocity/BDMonevel.webp", 4),
        option("Crouzeix-Raviart", "velocity/CRvel.webp", 4),
        option("P2", "velocity/Ptwovel.webp", 3),
        option("P2*", "velocity/Ptwodvel.webp", 3),
        option("BDM2", "velocity/BDMtwovel.webp", 3),
        option("P3", "velocity/Pthreevel.webp", 2),
        option("P3*", "velocity/Pthreedvel.webp", 2),
        option("BDM3", "velocity/BDMthreevel.webp", 2),
        option("BDM4", "velocity/BDMfourvel.webp", 1),
        option("P4", "velocity/Pfourvel.webp", 1),
        option("P4*", "velocity/Pfourdvel.webp", 1),
        option(NONE, "velocity/emptyvel.webp", 0),
    ],
};

/// Extra technique cards.
pub static EXTRA_CATALOG: Catalog = Catalog {
    kind: SlotKind::Extra,
    options: &[
        option("Interior Penalty", "extra/ipdg.webp", 0),
        option("Pressure-Jump", "extra/pj.webp", -1),
        option("Powell-Sabin Split", "extra/psmesh.webp", -1),
        option("Alfeld Split", "extra/alfeldsplit.webp", -1),
        option("Brezzi-Pitkäranta", "extra/bp.webp", -2),
        option("P3 Bubble", "extra/Pthreebubble.webp", -1),
        option(NONE, "extra/emptyextra.webp", 0),
    ],
};

/// Const constructor used by the catalog tables.
const fn option(name: &'static str, asset: &'static str, score: i32) -> CardOption {
    CardOption { name, asset, score }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [SlotKind; 4] = [
        SlotKind::Mesh,
        SlotKind::Pressure,
        SlotKind::Velocity,
        SlotKind::Extra,
    ];

    #[test]
    fn every_catalog_ends_with_a_zero_point_sentinel() {
        for kind in KINDS {
            let catalog = kind.catalog();
            assert_eq!(catalog.kind(), kind);
            let sentinel = catalog.sentinel();
            assert!(sentinel.is_none());
            assert_eq!(sentinel.score, 0);
            assert!(catalog.contains(sentinel));
        }
    }

    #[test]
    fn option_names_are_unique_within_a_catalog() {
        for kind in KINDS {
            let options = kind.catalog().options();
            for (idx, option) in options.iter().enumerate() {
                assert!(
                    options[idx + 1..].iter().all(|other| other.name != option.name),
                    "{} listed twice in the {kind} catalog",
                    option.name
                );
            }
        }
    }

    #[test]
    fn contains_rejects_options_from_other_catalogs() {
        let p1_pressure = PRESSURE_CATALOG.get("P1").expect("listed");
        let p1_velocity = VELOCITY_CATALOG.get("P1").expect("listed");
        assert!(!VELOCITY_CATALOG.contains(p1_pressure));
        assert!(VELOCITY_CATALOG.contains(p1_velocity));
    }

    #[test]
    fn asset_path_joins_the_root() {
        let bubble = EXTRA_CATALOG.get("P3 Bubble").expect("listed");
        assert_eq!(
            bubble.asset_path(Path::new("assets")),
            PathBuf::from("assets/extra/Pthreebubble.webp")
        );
    }
}
