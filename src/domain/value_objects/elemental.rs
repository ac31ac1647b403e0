//! Elemental damage kinds and the weakness cycle
//!
//! Every kind has exactly one kind it takes bonus damage from. The relation
//! is a directed cycle over the six natural elements, plus a symmetric
//! Holy/Necrotic pair. It is intentionally not an involution: following the
//! cycle twice does not lead back to the starting kind.

use serde::{Deserialize, Serialize};

/// The closed set of elemental damage kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementalKind {
    Fire,
    Ice,
    Water,
    Lightning,
    Earth,
    Wind,
    Holy,
    Necrotic,
}

impl ElementalKind {
    pub const ALL: [ElementalKind; 8] = [
        Self::Fire,
        Self::Ice,
        Self::Water,
        Self::Lightning,
        Self::Earth,
        Self::Wind,
        Self::Holy,
        Self::Necrotic,
    ];

    /// The kind that deals bonus damage to a defender of this kind.
    ///
    /// Total over the enum: a kind with no special counter simply maps onto
    /// the fixed cycle, never an error.
    pub fn weakness(self) -> ElementalKind {
        match self {
            Self::Fire => Self::Water,
            Self::Ice => Self::Fire,
            Self::Water => Self::Lightning,
            Self::Lightning => Self::Earth,
            Self::Earth => Self::Wind,
            Self::Wind => Self::Ice,
            Self::Holy => Self::Necrotic,
            Self::Necrotic => Self::Holy,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Fire => "fire",
            Self::Ice => "ice",
            Self::Water => "water",
            Self::Lightning => "lightning",
            Self::Earth => "earth",
            Self::Wind => "wind",
            Self::Holy => "holy",
            Self::Necrotic => "necrotic",
        }
    }

    /// Parse a kind from player input. Unknown spellings are `None`; callers
    /// treat that as an unaugmented attack rather than an error.
    pub fn parse(input: &str) -> Option<ElementalKind> {
        match input.trim().to_lowercase().as_str() {
            "fire" => Some(Self::Fire),
            "ice" => Some(Self::Ice),
            "water" => Some(Self::Water),
            "lightning" => Some(Self::Lightning),
            "earth" => Some(Self::Earth),
            "wind" => Some(Self::Wind),
            "holy" => Some(Self::Holy),
            "necrotic" => Some(Self::Necrotic),
            _ => None,
        }
    }
}

impl std::fmt::Display for ElementalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weakness_table_is_exact() {
        assert_eq!(ElementalKind::Fire.weakness(), ElementalKind::Water);
        assert_eq!(ElementalKind::Ice.weakness(), ElementalKind::Fire);
        assert_eq!(ElementalKind::Water.weakness(), ElementalKind::Lightning);
        assert_eq!(ElementalKind::Lightning.weakness(), ElementalKind::Earth);
        assert_eq!(ElementalKind::Earth.weakness(), ElementalKind::Wind);
        assert_eq!(ElementalKind::Wind.weakness(), ElementalKind::Ice);
        assert_eq!(ElementalKind::Holy.weakness(), ElementalKind::Necrotic);
        assert_eq!(ElementalKind::Necrotic.weakness(), ElementalKind::Holy);
    }

    #[test]
    fn test_weakness_is_not_an_involution() {
        // Only the Holy/Necrotic pair is symmetric.
        for kind in ElementalKind::ALL {
            let twice = kind.weakness().weakness();
            match kind {
                ElementalKind::Holy | ElementalKind::Necrotic => assert_eq!(twice, kind),
                _ => assert_ne!(twice, kind),
            }
        }
    }

    #[test]
    fn test_parse_round_trips_display_names() {
        for kind in ElementalKind::ALL {
            assert_eq!(ElementalKind::parse(kind.display_name()), Some(kind));
        }
        assert_eq!(ElementalKind::parse("FIRE"), Some(ElementalKind::Fire));
        assert_eq!(ElementalKind::parse("arcane"), None);
    }
}
