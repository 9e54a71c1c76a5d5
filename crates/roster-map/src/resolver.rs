//! Field resolver implementation.

use tracing::{debug, info, warn};

use roster_model::{
    FieldMap, FieldRole, RawRecord, Resolution, ResolvedField, ResolverOptions,
};

/// Token that, together with [`MEMBERSHIP_TOKEN`], marks the join date field.
pub const JOIN_TOKEN: &str = "beginn";
pub const MEMBERSHIP_TOKEN: &str = "mitgliedschaft";
pub const STATUS_TOKEN: &str = "status";
pub const NAME_TOKENS: [&str; 2] = ["vorname", "name"];

/// Role suggested by a field label, matched case-insensitively.
///
/// Roles are tested in precedence order (join date, status, name), so a label
/// such as "Status Name" resolves to the status role.
pub fn classify_label(label: &str) -> Option<FieldRole> {
    let label = label.to_lowercase();
    if label.contains(JOIN_TOKEN) && label.contains(MEMBERSHIP_TOKEN) {
        Some(FieldRole::JoinDate)
    } else if label.contains(STATUS_TOKEN) {
        Some(FieldRole::Status)
    } else if NAME_TOKENS.iter().any(|token| label.contains(token)) {
        Some(FieldRole::Name)
    } else {
        None
    }
}

/// Binds field roles to identifiers by scanning labels in a record sample.
#[derive(Debug, Clone, Default)]
pub struct FieldResolver {
    options: ResolverOptions,
}

impl FieldResolver {
    pub fn new(options: ResolverOptions) -> Self {
        Self { options }
    }

    /// Resolves all roles from the leading `sample_size` records.
    ///
    /// The first matching label wins for each role. Roles without a match
    /// keep their default identifier.
    pub fn resolve(&self, records: &[RawRecord]) -> FieldMap {
        let mut inferred: [Option<ResolvedField>; 3] = [None, None, None];

        let sample = records.iter().take(self.options.sample_size);
        for record in sample {
            for field in &record.fields {
                let Some(label) = field.label.as_deref() else {
                    continue;
                };
                let Some(role) = classify_label(label) else {
                    continue;
                };
                let slot = &mut inferred[role_index(role)];
                if slot.is_some() {
                    debug!(
                        role = %role,
                        field_id = %field.field_id,
                        label,
                        "ignoring later label match"
                    );
                    continue;
                }
                info!(role = %role, field_id = %field.field_id, label, "resolved field from label");
                *slot = Some(ResolvedField {
                    id: field.field_id,
                    resolution: Resolution::Inferred {
                        label: label.to_string(),
                    },
                });
            }
        }

        let mut map = FieldMap::default();
        for role in FieldRole::ALL {
            match inferred[role_index(role)].take() {
                Some(resolved) => *map.get_mut(role) = resolved,
                None => warn!(
                    role = %role,
                    field_id = %role.default_id(),
                    "no label matched; using default field"
                ),
            }
        }
        map
    }
}

/// Resolves field roles from a record sample.
pub fn resolve_fields(records: &[RawRecord], options: &ResolverOptions) -> FieldMap {
    FieldResolver::new(*options).resolve(records)
}

fn role_index(role: FieldRole) -> usize {
    match role {
        FieldRole::JoinDate => 0,
        FieldRole::Status => 1,
        FieldRole::Name => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_labels_case_insensitively() {
        assert_eq!(
            classify_label("Beginn Mitgliedschaft"),
            Some(FieldRole::JoinDate)
        );
        assert_eq!(classify_label("STATUS"), Some(FieldRole::Status));
        assert_eq!(classify_label("Vorname"), Some(FieldRole::Name));
        assert_eq!(classify_label("Nachname"), Some(FieldRole::Name));
        assert_eq!(classify_label("E-Mail"), None);
    }

    #[test]
    fn join_date_needs_both_tokens() {
        assert_eq!(classify_label("Beginn"), None);
        assert_eq!(classify_label("Mitgliedschaft Status"), Some(FieldRole::Status));
    }

    #[test]
    fn status_wins_over_name() {
        assert_eq!(classify_label("Status Name"), Some(FieldRole::Status));
    }
}
