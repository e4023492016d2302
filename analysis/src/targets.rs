//! The ordered list of directories the suite checks.
//!
//! The order is explicit rather than read from the file system, so that a
//! directory can be parked as pending without shifting any other entry.

/// Whether a target takes part in the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    Active,
    /// Kept in the list but not checked yet.
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub state: TargetState,
}

impl Target {
    pub fn active(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: TargetState::Active,
        }
    }

    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: TargetState::Pending,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == TargetState::Active
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetList {
    targets: Vec<Target>,
}

impl TargetList {
    pub fn new(targets: Vec<Target>) -> Self {
        Self { targets }
    }

    /// Django test directories, in the order they are checked.
    pub fn builtin() -> Self {
        use TargetState::{Active as A, Pending as P};

        let entries: &[(&str, TargetState)] = &[
            ("absolute_url_overrides", A),
            ("admin_autodiscover", A),
            ("admin_changelist", A),
            ("admin_checks", A),
            ("admin_custom_urls", A),
            ("admin_default_site", A),
            ("admin_docs", A),
            ("admin_filters", P),
            ("admin_inlines", A),
            ("admin_ordering", A),
            ("admin_registration", A),
            ("admin_scripts", A),
            ("admin_utils", P),
            ("admin_views", P),
            ("admin_widgets", A),
            ("aggregation", A),
            ("aggregation_regress", A),
            ("annotations", A),
            ("app_loading", A),
            ("apps", A),
            ("auth_tests", P),
            ("base", A),
            ("bash_completion", A),
            ("basic", A),
            ("builtin_server", A),
            ("bulk_create", A),
            ("cache", P),
            ("check_framework", P),
            ("choices", A),
            ("conditional_processing", A),
            ("contenttypes_tests", P),
            ("context_processors", A),
            ("csrf_tests", A),
            ("custom_columns", A),
            ("custom_lookups", P),
            ("custom_managers", P),
            ("custom_methods", A),
            ("custom_migration_operations", A),
            ("custom_pk", A),
            ("datatypes", A),
            ("dates", A),
            ("datetimes", A),
            ("db_functions", A),
            ("db_typecasts", A),
            ("db_utils", A),
            ("dbshell", A),
            ("decorators", P),
            ("defer", A),
            ("defer_regress", P),
            ("delete", A),
            ("delete_regress", A),
            ("deprecation", P),
            ("dispatch", P),
            ("distinct_on_fields", A),
            ("empty", A),
            ("expressions", P),
            ("expressions_case", A),
            ("expressions_window", P),
        ];

        Self::new(
            entries
                .iter()
                .map(|(name, state)| Target {
                    name: (*name).to_string(),
                    state: *state,
                })
                .collect(),
        )
    }

    pub fn all(&self) -> &[Target] {
        &self.targets
    }

    pub fn active(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter().filter(|t| t.is_active())
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Keep only the named targets, preserving list order.
    ///
    /// Names that are not in the list are returned so the caller can
    /// report them.
    pub fn restrict_to(&self, names: &[String]) -> (TargetList, Vec<String>) {
        let unknown = names
            .iter()
            .filter(|name| !self.targets.iter().any(|t| &t.name == *name))
            .cloned()
            .collect();

        let kept = self
            .targets
            .iter()
            .filter(|t| names.contains(&t.name))
            .cloned()
            .collect();

        (TargetList::new(kept), unknown)
    }
}
