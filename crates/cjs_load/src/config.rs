//! Loader configuration.

use std::fmt;
use std::str::FromStr;

use cjs_resolve::ResolverConfig;

/// Environment variable that selects the [`CyclePolicy`] (`reject` or `reexecute`).
pub const CYCLE_POLICY_ENV: &str = "CJS_CYCLE_POLICY";

/// What happens when a module requires a file that is still executing
/// further up the same load chain.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CyclePolicy {
    /// Fail the inner load with [`LoadError::Cycle`](crate::LoadError::Cycle).
    #[default]
    Reject,
    /// Execute the file again. A cycle with no exit condition in the
    /// modules themselves recurses until memory runs out.
    Reexecute,
}

impl CyclePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            CyclePolicy::Reject => "reject",
            CyclePolicy::Reexecute => "reexecute",
        }
    }
}

impl fmt::Display for CyclePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown cycle policy '{0}' (expected 'reject' or 'reexecute')")]
pub struct ParseCyclePolicyError(String);

impl FromStr for CyclePolicy {
    type Err = ParseCyclePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(CyclePolicy::Reject),
            "reexecute" | "re-execute" => Ok(CyclePolicy::Reexecute),
            _ => Err(ParseCyclePolicyError(s.to_owned())),
        }
    }
}

/// Everything the loader needs besides its collaborators.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoaderConfig {
    pub resolver: ResolverConfig,
    pub cycle_policy: CyclePolicy,
}

impl LoaderConfig {
    /// Defaults with the resolver and cycle policy environment overrides applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = LoaderConfig {
            resolver: ResolverConfig::from_lookup(&lookup),
            cycle_policy: CyclePolicy::default(),
        };
        if let Some(raw) = lookup(CYCLE_POLICY_ENV) {
            match raw.parse() {
                Ok(policy) => config.cycle_policy = policy,
                Err(err) => tracing::warn!(%err, "ignoring {CYCLE_POLICY_ENV}"),
            }
        }
        config
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: ResolverConfig) -> Self {
        self.resolver = resolver;
        self
    }

    #[must_use]
    pub fn with_cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.cycle_policy = policy;
        self
    }
}
