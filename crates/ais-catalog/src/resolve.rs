//! Header and value resolution against the catalog.
//!
//! Header resolution evaluates [`RESOLUTION_ORDER`] front to back and stops at
//! the first strategy that produces a name. The last strategy always succeeds,
//! so every header resolves to something.

use std::fmt;

use serde::Serialize;

use crate::asset_type::AssetType;
use crate::catalog::MappingCatalog;

/// One step of header resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupStrategy {
    /// The header already equals a canonical header of some asset type.
    Canonical,
    /// Found in the requested asset type's table.
    ExactType,
    /// Found in another asset type's table.
    CrossTypeScan,
    /// No mapping; the trimmed header is kept.
    Passthrough,
}

/// Fixed evaluation order of header lookups.
pub const RESOLUTION_ORDER: [LookupStrategy; 4] = [
    LookupStrategy::Canonical,
    LookupStrategy::ExactType,
    LookupStrategy::CrossTypeScan,
    LookupStrategy::Passthrough,
];

impl LookupStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupStrategy::Canonical => "canonical",
            LookupStrategy::ExactType => "exact-type",
            LookupStrategy::CrossTypeScan => "cross-type",
            LookupStrategy::Passthrough => "passthrough",
        }
    }
}

impl fmt::Display for LookupStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of resolving one header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldResolution {
    /// Canonical (or passed-through) header name.
    pub canonical: String,
    /// Strategy that produced `canonical`.
    pub strategy: LookupStrategy,
    /// Asset type whose table supplied `canonical`, for table lookups.
    pub matched_type: Option<AssetType>,
}

impl FieldResolution {
    /// False only when no table knew the header.
    pub fn matched(&self) -> bool {
        self.strategy != LookupStrategy::Passthrough
    }
}

/// Categorical fields whose values are translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueDomain {
    Status,
    Category,
    Manufacturer,
}

impl ValueDomain {
    /// Names (lowercase) that identify this domain: the English term first,
    /// then its source-language synonyms.
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            ValueDomain::Status => &["status", "状态", "设备状态"],
            ValueDomain::Category => &["category", "类别", "分类", "设备类型"],
            ValueDomain::Manufacturer => &["manufacturer", "制造商", "厂商", "生产商", "品牌"],
        }
    }

    /// Classifies a field name, case-insensitively.
    pub fn for_field(field_name: &str) -> Option<Self> {
        let lowered = field_name.to_lowercase();
        [
            ValueDomain::Status,
            ValueDomain::Category,
            ValueDomain::Manufacturer,
        ]
        .into_iter()
        .find(|domain| domain.field_names().contains(&lowered.as_str()))
    }
}

impl MappingCatalog {
    /// Resolves a header cell to its canonical name.
    ///
    /// Surrounding whitespace is always removed, whether or not a mapping exists.
    pub fn resolve_field(&self, name: &str, asset_type: AssetType) -> FieldResolution {
        let trimmed = name.trim();
        RESOLUTION_ORDER
            .into_iter()
            .find_map(|strategy| self.apply_strategy(strategy, trimmed, asset_type))
            .unwrap_or_else(|| FieldResolution {
                canonical: trimmed.to_string(),
                strategy: LookupStrategy::Passthrough,
                matched_type: None,
            })
    }

    /// Applies a single strategy; `None` means the next one should run.
    pub fn apply_strategy(
        &self,
        strategy: LookupStrategy,
        name: &str,
        asset_type: AssetType,
    ) -> Option<FieldResolution> {
        let resolved = |canonical: &str, matched_type: Option<AssetType>| FieldResolution {
            canonical: canonical.to_string(),
            strategy,
            matched_type,
        };
        match strategy {
            LookupStrategy::Canonical => self
                .is_canonical_field(name)
                .then(|| resolved(name, None)),
            LookupStrategy::ExactType => self
                .field_table(asset_type)
                .and_then(|table| table.get(name))
                .map(|canonical| resolved(canonical, Some(asset_type))),
            LookupStrategy::CrossTypeScan => AssetType::ALL
                .into_iter()
                .filter(|other| *other != asset_type)
                .find_map(|other| {
                    self.field_table(other)
                        .and_then(|table| table.get(name))
                        .map(|canonical| resolved(canonical, Some(other)))
                }),
            LookupStrategy::Passthrough => Some(resolved(name, None)),
        }
    }

    /// Translates a cell value for the given (canonical) field name.
    ///
    /// Empty values are returned untouched; other values are trimmed and then
    /// looked up when the field is a status, category or manufacturer column.
    pub fn resolve_value(&self, field_name: &str, raw_value: &str) -> String {
        if raw_value.is_empty() {
            return String::new();
        }
        let value = raw_value.trim();
        let table = match ValueDomain::for_field(field_name) {
            Some(ValueDomain::Status) => &self.status_mappings,
            Some(ValueDomain::Category) => &self.category_mappings,
            Some(ValueDomain::Manufacturer) => &self.manufacturer_mappings,
            None => return value.to_string(),
        };
        table
            .get(value)
            .cloned()
            .unwrap_or_else(|| value.to_string())
    }
}
