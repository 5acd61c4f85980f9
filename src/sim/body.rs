//! Celestial body skins
//!
//! A marble's body type only affects how it is drawn. The core keeps the
//! per-body data the renderer asks about (ring, star light, specular power)
//! in a read-only catalog built once at startup.

use serde::{Deserialize, Serialize};

use crate::consts::STARTING_COUNT;

/// Skin of a marble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum CelestialBodyType {
    #[default]
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Moon,
    Ceres,
    Makemake,
    Callisto,
    RedDwarf,
    OrangeDwarf,
    BlueDwarf,
}

impl CelestialBodyType {
    pub const ALL: [CelestialBodyType; 16] = [
        CelestialBodyType::Mercury,
        CelestialBodyType::Venus,
        CelestialBodyType::Earth,
        CelestialBodyType::Mars,
        CelestialBodyType::Jupiter,
        CelestialBodyType::Saturn,
        CelestialBodyType::Uranus,
        CelestialBodyType::Neptune,
        CelestialBodyType::Pluto,
        CelestialBodyType::Moon,
        CelestialBodyType::Ceres,
        CelestialBodyType::Makemake,
        CelestialBodyType::Callisto,
        CelestialBodyType::RedDwarf,
        CelestialBodyType::OrangeDwarf,
        CelestialBodyType::BlueDwarf,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Name written to save files
    pub fn as_str(&self) -> &'static str {
        match self {
            CelestialBodyType::Mercury => "Mercury",
            CelestialBodyType::Venus => "Venus",
            CelestialBodyType::Earth => "Earth",
            CelestialBodyType::Mars => "Mars",
            CelestialBodyType::Jupiter => "Jupiter",
            CelestialBodyType::Saturn => "Saturn",
            CelestialBodyType::Uranus => "Uranus",
            CelestialBodyType::Neptune => "Neptune",
            CelestialBodyType::Pluto => "Pluto",
            CelestialBodyType::Moon => "Moon",
            CelestialBodyType::Ceres => "Ceres",
            CelestialBodyType::Makemake => "Makemake",
            CelestialBodyType::Callisto => "Callisto",
            CelestialBodyType::RedDwarf => "RedDwarf",
            CelestialBodyType::OrangeDwarf => "OrangeDwarf",
            CelestialBodyType::BlueDwarf => "BlueDwarf",
        }
    }

    /// Parse a save-file name (exact match)
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|body| body.as_str() == s)
    }
}

impl std::fmt::Display for CelestialBodyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render-facing data for one body type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyProperties {
    /// Human-readable name ("Red Dwarf")
    pub display_name: String,
    /// Drawn with a ring around it
    pub has_ring: bool,
    /// Light slot the body drives while on the board (stars only)
    pub star_index: Option<u8>,
    /// Overrides the global specular power when set
    pub specular_power: Option<f32>,
}

impl BodyProperties {
    pub fn plain(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            has_ring: false,
            star_index: None,
            specular_power: None,
        }
    }
}

/// Read-only body type -> properties mapping
#[derive(Debug, Clone, PartialEq)]
pub struct BodyCatalog {
    entries: Vec<BodyProperties>,
}

impl BodyCatalog {
    /// The stock solar-system catalog
    pub fn standard() -> Self {
        use CelestialBodyType::*;

        let mut catalog = Self::from_entries(std::iter::empty());
        let ringed = |name: &str| BodyProperties {
            has_ring: true,
            ..BodyProperties::plain(name)
        };
        let star = |name: &str, index: u8| BodyProperties {
            star_index: Some(index),
            ..BodyProperties::plain(name)
        };

        catalog.set(
            Earth,
            BodyProperties {
                specular_power: Some(5.5),
                ..BodyProperties::plain("Earth")
            },
        );
        catalog.set(Saturn, ringed("Saturn"));
        catalog.set(Uranus, ringed("Uranus"));
        catalog.set(RedDwarf, star("Red Dwarf", 1));
        catalog.set(OrangeDwarf, star("Orange Dwarf", 2));
        catalog.set(BlueDwarf, star("Blue Dwarf", 3));
        catalog
    }

    /// Build from configuration; bodies without an entry are plain and use
    /// their save name for display.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (CelestialBodyType, BodyProperties)>,
    ) -> Self {
        let mut catalog = Self {
            entries: CelestialBodyType::ALL
                .iter()
                .map(|body| BodyProperties::plain(body.as_str()))
                .collect(),
        };
        for (body, props) in entries {
            catalog.set(body, props);
        }
        catalog
    }

    fn set(&mut self, body: CelestialBodyType, props: BodyProperties) {
        self.entries[body.index()] = props;
    }

    pub fn get(&self, body: CelestialBodyType) -> &BodyProperties {
        &self.entries[body.index()]
    }

    pub fn star_index(&self, body: CelestialBodyType) -> Option<u8> {
        self.get(body).star_index
    }
}

impl Default for BodyCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// The fixed multiset of skins dealt out at the start of every game.
///
/// Each of the first twelve types appears twice, eight of them a third time,
/// and five extra entries round it up to 37.
pub fn starting_bodies() -> [CelestialBodyType; STARTING_COUNT] {
    let mut indices = Vec::with_capacity(STARTING_COUNT);
    for i in 0..12 {
        indices.push(i);
        indices.push(i);
        if !matches!(i, 7 | 9 | 10 | 11) {
            indices.push(i);
        }
    }
    indices.extend([3, 4, 12, 13, 14]);

    let mut bodies = [CelestialBodyType::default(); STARTING_COUNT];
    for (body, index) in bodies.iter_mut().zip(indices) {
        *body = CelestialBodyType::from_index(index).unwrap_or_default();
    }
    bodies
}
