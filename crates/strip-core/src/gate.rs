//! Environment gate
//!
//! Decides whether stripping runs for one invocation. The ambient signals
//! (current mode name, test mode) arrive as an explicit [`BuildMode`] instead
//! of being read from process globals, so two builds in one process can
//! disagree.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::config::{FamilyKind, MarkerConfig, MarkerSet};

/// Caller-supplied override; when present its answer is final
pub type Predicate = Arc<dyn Fn() -> bool + Send + Sync>;

/// Ambient build signals for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildMode {
    /// Current mode name, e.g. `production`
    pub name: String,
    /// Set when the build runs under a test harness
    pub test: bool,
}

impl BuildMode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            test: false,
        }
    }

    /// A test-harness build; the mode name is kept but not consulted
    pub fn testing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            test: true,
        }
    }
}

impl Default for BuildMode {
    fn default() -> Self {
        Self::new("production")
    }
}

/// Environments in which stripping is active
#[derive(Clone)]
pub struct EnvironmentContext {
    pub active_environments: BTreeSet<String>,
    pub custom_predicate: Option<Predicate>,
}

impl Default for EnvironmentContext {
    fn default() -> Self {
        Self::new(["production"])
    }
}

impl fmt::Debug for EnvironmentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentContext")
            .field("active_environments", &self.active_environments)
            .field("custom_predicate", &self.custom_predicate.is_some())
            .finish()
    }
}

impl EnvironmentContext {
    pub fn new<I, S>(environments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            active_environments: environments.into_iter().map(Into::into).collect(),
            custom_predicate: None,
        }
    }

    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.custom_predicate = Some(predicate);
        self
    }

    /// Resolve the gate.
    ///
    /// 1. A custom predicate decides alone.
    /// 2. Under test mode, the gate is open iff `test` is active.
    /// 3. Otherwise it is open iff the mode name is active.
    pub fn should_strip(&self, mode: &BuildMode) -> bool {
        if let Some(predicate) = &self.custom_predicate {
            return predicate();
        }
        if mode.test {
            return self.active_environments.contains("test");
        }
        self.active_environments.contains(&mode.name)
    }
}

/// Free-function form of [`EnvironmentContext::should_strip`]
pub fn should_strip(context: &EnvironmentContext, mode: &BuildMode) -> bool {
    context.should_strip(mode)
}

/// Marker sets whose gate is open for `mode`, default family first.
///
/// Each family is gated on its own environment list. A predicate, when
/// given, overrides every family.
pub fn active_marker_sets(
    config: &MarkerConfig,
    predicate: Option<&Predicate>,
    mode: &BuildMode,
) -> Vec<(Option<FamilyKind>, MarkerSet)> {
    let context_for = |environments: &[String]| {
        let context = EnvironmentContext::new(environments.iter().cloned());
        match predicate {
            Some(p) => context.with_predicate(Arc::clone(p)),
            None => context,
        }
    };

    let mut sets = Vec::new();
    if context_for(&config.environments).should_strip(mode) {
        sets.push((None, config.markers.clone()));
    }
    for (kind, family) in config.families.iter() {
        if context_for(&family.environments).should_strip(mode) {
            sets.push((Some(kind), family.markers()));
        }
    }
    sets
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("production", false, true)]
    #[case("development", false, false)]
    #[case("production", true, false)]
    fn default_context_strips_only_production(
        #[case] name: &str,
        #[case] test: bool,
        #[case] expected: bool,
    ) {
        let mode = BuildMode {
            name: name.to_string(),
            test,
        };
        assert_eq!(EnvironmentContext::default().should_strip(&mode), expected);
    }

    #[test]
    fn test_mode_consults_test_environment() {
        let context = EnvironmentContext::new(["production", "test"]);
        assert!(context.should_strip(&BuildMode::testing("development")));
    }

    #[test]
    fn predicate_is_authoritative() {
        let context = EnvironmentContext::new(["production"]).with_predicate(Arc::new(|| false));
        assert!(!context.should_strip(&BuildMode::new("production")));

        let context = EnvironmentContext::new(Vec::<String>::new()).with_predicate(Arc::new(|| true));
        assert!(context.should_strip(&BuildMode::testing("anything")));
    }

    #[test]
    fn families_follow_their_own_environments() {
        let config = MarkerConfig::default();

        let production: Vec<_> = active_marker_sets(&config, None, &BuildMode::new("production"))
            .into_iter()
            .map(|(kind, _)| kind)
            .collect();
        assert_eq!(
            production,
            vec![None, Some(FamilyKind::Production), Some(FamilyKind::Debug)]
        );

        let development: Vec<_> =
            active_marker_sets(&config, None, &BuildMode::new("development"))
                .into_iter()
                .map(|(kind, _)| kind)
                .collect();
        assert_eq!(development, vec![Some(FamilyKind::Development)]);
    }

    #[test]
    fn predicate_opens_every_family() {
        let predicate: Predicate = Arc::new(|| true);
        let sets = active_marker_sets(
            &MarkerConfig::default(),
            Some(&predicate),
            &BuildMode::new("staging"),
        );
        assert_eq!(sets.len(), 5);
    }
}
