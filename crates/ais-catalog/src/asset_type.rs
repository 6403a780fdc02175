//! Asset record categories.
//!
//! Each category has its own header mapping table in the catalog. The set is
//! closed: importers only accept these six record kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record category of an import file.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    /// Hardware assets (laptops, servers, monitors).
    #[default]
    Assets,
    /// People who can be assigned assets.
    Users,
    /// Accessories checked out alongside assets.
    Accessories,
    /// Consumables (toner, cables).
    Consumables,
    /// Software licenses.
    Licenses,
    /// Components installed into assets.
    Components,
}

impl AssetType {
    /// Every asset type, in the order cross-type lookups scan them.
    pub const ALL: [AssetType; 6] = [
        AssetType::Assets,
        AssetType::Users,
        AssetType::Accessories,
        AssetType::Consumables,
        AssetType::Licenses,
        AssetType::Components,
    ];

    /// Returns the lowercase tag used in mapping files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Assets => "assets",
            AssetType::Users => "users",
            AssetType::Accessories => "accessories",
            AssetType::Consumables => "consumables",
            AssetType::Licenses => "licenses",
            AssetType::Components => "components",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = String;

    /// Parse an asset type tag (case-insensitive, surrounding whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        AssetType::ALL
            .into_iter()
            .find(|asset_type| asset_type.as_str() == normalized)
            .ok_or_else(|| format!("Unknown asset type: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_tag() {
        for asset_type in AssetType::ALL {
            assert_eq!(asset_type.as_str().parse::<AssetType>(), Ok(asset_type));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(" Licenses ".parse::<AssetType>(), Ok(AssetType::Licenses));
    }

    #[test]
    fn test_parse_unknown() {
        assert!("vehicles".parse::<AssetType>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_tags() {
        let json = serde_json::to_string(&AssetType::Consumables).unwrap();
        assert_eq!(json, "\"consumables\"");
    }
}
