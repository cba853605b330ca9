//! Declared field aliases for the state record file.
//!
//! Record files in the wild name their columns `SuicideRate`,
//! `suicide_rate_per_100k`, `GunOwnershipPct` and so on. Each canonical field
//! declares how a source name matches it; matching is case-insensitive and
//! resolved once per load over every field name seen in the file.

use std::collections::BTreeMap;

use super::error::LoadError;

pub const STATE: &str = "state";
pub const SUICIDE_RATE: &str = "suicide_rate";
pub const GUN_OWNERSHIP: &str = "gun_ownership";

/// Canonical output columns, in output order.
pub const CANONICAL_FIELDS: [&str; 3] = [STATE, SUICIDE_RATE, GUN_OWNERSHIP];

#[derive(Debug, Clone, Copy)]
pub enum AliasMatcher {
    /// Whole name, ignoring case.
    Exact(&'static str),
    /// Name contains every fragment, ignoring case.
    ContainsAll(&'static [&'static str]),
}

impl AliasMatcher {
    pub fn matches(&self, field: &str) -> bool {
        let lowered = field.to_lowercase();
        match self {
            AliasMatcher::Exact(name) => lowered == *name,
            AliasMatcher::ContainsAll(fragments) => {
                fragments.iter().all(|fragment| lowered.contains(fragment))
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldAlias {
    pub canonical: &'static str,
    pub matcher: AliasMatcher,
}

pub const FIELD_ALIASES: &[FieldAlias] = &[
    FieldAlias {
        canonical: STATE,
        matcher: AliasMatcher::Exact("state"),
    },
    FieldAlias {
        canonical: SUICIDE_RATE,
        matcher: AliasMatcher::ContainsAll(&["suicide"]),
    },
    FieldAlias {
        canonical: GUN_OWNERSHIP,
        matcher: AliasMatcher::ContainsAll(&["gun", "ownership"]),
    },
];

/// Source field chosen for each canonical field. A canonical field with no
/// entry is synthesized as all-missing by the loader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    sources: BTreeMap<&'static str, String>,
}

impl FieldMap {
    pub fn source_for(&self, canonical: &str) -> Option<&str> {
        self.sources.get(canonical).map(String::as_str)
    }
}

/// Resolve `fields` against [`FIELD_ALIASES`].
///
/// Fails when one field matches several canonical fields, or when several
/// distinct fields match the same canonical field.
pub fn resolve_fields<'a>(fields: impl IntoIterator<Item = &'a str>) -> Result<FieldMap, LoadError> {
    let mut claims: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();

    for field in fields {
        let canonicals: Vec<&'static str> = FIELD_ALIASES
            .iter()
            .filter(|alias| alias.matcher.matches(field))
            .map(|alias| alias.canonical)
            .collect();

        if canonicals.len() > 1 {
            return Err(LoadError::AmbiguousField {
                field: field.to_string(),
                canonicals,
            });
        }
        if let Some(canonical) = canonicals.first() {
            let claimed = claims.entry(*canonical).or_default();
            if !claimed.iter().any(|existing| existing == field) {
                claimed.push(field.to_string());
            }
        }
    }

    let mut map = FieldMap::default();
    for (canonical, mut fields) in claims {
        if fields.len() > 1 {
            return Err(LoadError::AliasCollision { canonical, fields });
        }
        if let Some(field) = fields.pop() {
            map.sources.insert(canonical, field);
        }
    }
    Ok(map)
}
