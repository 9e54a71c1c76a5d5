//! Configuration options for roster processing.

use serde::{Deserialize, Serialize};

use crate::fields::{FieldId, FieldRole};

/// Number of records inspected by field resolution unless configured.
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// Options for field resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverOptions {
    /// How many leading records are scanned for field labels.
    pub sample_size: usize,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

/// Explicit identifiers that replace resolved ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOverrides {
    pub join_date: Option<FieldId>,
    pub status: Option<FieldId>,
    pub name: Option<FieldId>,
}

impl FieldOverrides {
    pub fn get(&self, role: FieldRole) -> Option<FieldId> {
        match role {
            FieldRole::JoinDate => self.join_date,
            FieldRole::Status => self.status,
            FieldRole::Name => self.name,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.join_date.is_none() && self.status.is_none() && self.name.is_none()
    }
}

/// Strategy for deciding which members have departed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepartureDetection {
    /// Derive departed labels from leaving markers in the status values
    /// present in the population.
    #[default]
    Lexical,
    /// Treat one categorical status option as the departed status.
    OptionId(i64),
}

/// Options for a full roster run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    pub resolver: ResolverOptions,
    pub overrides: FieldOverrides,
    pub departure: DepartureDetection,
}
