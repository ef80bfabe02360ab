//! Access scope: the granularity at which a grant applies.

use serde::{Deserialize, Serialize};

/// Granularity of an access grant or a permission check.
///
/// Scopes form a strict containment order: every store belongs to exactly one
/// company, every company to exactly one organization. A broader scope covers
/// everything nested under it; the reverse never holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scope {
    Organization,
    Company,
    Store,
}

impl Scope {
    /// Whether a grant at `self` can ever apply to a check at `target`.
    ///
    /// `Organization` covers everything; `Company` covers company and store
    /// checks; `Store` covers only store checks. Coverage is necessary but
    /// not sufficient: the resolved ancestor ids must also match.
    pub fn covers(&self, target: Scope) -> bool {
        match self {
            Scope::Organization => true,
            Scope::Company => matches!(target, Scope::Company | Scope::Store),
            Scope::Store => target == Scope::Store,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Organization => "ORGANIZATION",
            Scope::Company => "COMPANY",
            Scope::Store => "STORE",
        }
    }
}

impl core::fmt::Display for Scope {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
