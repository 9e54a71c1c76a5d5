//! Field role mapping.
//!
//! Record fields are addressed by opaque numeric identifiers. A [`FieldMap`]
//! binds the three roles the pipeline cares about to concrete identifiers and
//! remembers how each binding was obtained.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::options::FieldOverrides;

/// Opaque field identifier assigned by the record system.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FieldId(pub i64);

impl FieldId {
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for FieldId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fallback identifier of the membership start date field.
pub const DEFAULT_JOIN_DATE_FIELD: FieldId = FieldId(229_611_689);
/// Fallback identifier of the membership status field.
pub const DEFAULT_STATUS_FIELD: FieldId = FieldId(216_758_721);
/// Fallback identifier of the member name field.
pub const DEFAULT_NAME_FIELD: FieldId = FieldId(206_882_163);

/// Semantic role of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    JoinDate,
    Status,
    Name,
}

impl FieldRole {
    /// Roles in matching precedence order.
    pub const ALL: [Self; 3] = [Self::JoinDate, Self::Status, Self::Name];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::JoinDate => "join date",
            Self::Status => "status",
            Self::Name => "name",
        }
    }

    #[must_use]
    pub const fn default_id(self) -> FieldId {
        match self {
            Self::JoinDate => DEFAULT_JOIN_DATE_FIELD,
            Self::Status => DEFAULT_STATUS_FIELD,
            Self::Name => DEFAULT_NAME_FIELD,
        }
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a role's identifier was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Resolution {
    /// Matched against a field label in the sampled records.
    Inferred { label: String },
    /// No label matched; the built-in default is used.
    Default,
    /// Supplied explicitly by the caller.
    Override,
}

impl Resolution {
    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

/// A role's identifier together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedField {
    pub id: FieldId,
    pub resolution: Resolution,
}

impl ResolvedField {
    pub fn default_for(role: FieldRole) -> Self {
        Self {
            id: role.default_id(),
            resolution: Resolution::Default,
        }
    }
}

/// Role → identifier mapping table, built once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMap {
    pub join_date: ResolvedField,
    pub status: ResolvedField,
    pub name: ResolvedField,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            join_date: ResolvedField::default_for(FieldRole::JoinDate),
            status: ResolvedField::default_for(FieldRole::Status),
            name: ResolvedField::default_for(FieldRole::Name),
        }
    }
}

impl FieldMap {
    pub fn get(&self, role: FieldRole) -> &ResolvedField {
        match role {
            FieldRole::JoinDate => &self.join_date,
            FieldRole::Status => &self.status,
            FieldRole::Name => &self.name,
        }
    }

    pub fn get_mut(&mut self, role: FieldRole) -> &mut ResolvedField {
        match role {
            FieldRole::JoinDate => &mut self.join_date,
            FieldRole::Status => &mut self.status,
            FieldRole::Name => &mut self.name,
        }
    }

    pub fn id(&self, role: FieldRole) -> FieldId {
        self.get(role).id
    }

    /// Role bound to `field_id`. Join date wins over status, status over name.
    pub fn role_of(&self, field_id: FieldId) -> Option<FieldRole> {
        FieldRole::ALL
            .into_iter()
            .find(|role| self.id(*role) == field_id)
    }

    /// Replaces identifiers for every role with an override set.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &FieldOverrides) -> Self {
        for role in FieldRole::ALL {
            if let Some(id) = overrides.get(role) {
                *self.get_mut(role) = ResolvedField {
                    id,
                    resolution: Resolution::Override,
                };
            }
        }
        self
    }
}
