pub mod manager;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{AuthChainError, Result};
use crate::provider::AuthenticationProvider;

pub use manager::{ChainedAuthenticationManager, Evaluation, StepOutcome, StepReport};

/// Configuration tag for an entry that runs only after the previous entry succeeded.
pub const IF_PREVIOUS_TRUE: &str = "ifPreviousTrue";
/// Configuration tag for an entry that runs only after the previous entry failed or was skipped.
pub const IF_PREVIOUS_FALSE: &str = "ifPreviousFalse";

/// When a chain entry is allowed to run.
///
/// The first entry of a chain always runs, whatever condition it carries.
/// Every later entry must be gated on the previous outcome.
///
/// Serializes to its display tag for reports. It is not deserialized:
/// configuration tags go through [`FromStr`], which rejects `"always"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Condition {
    Always,
    IfPreviousSucceeded,
    IfPreviousFailed,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Always => "always",
            Condition::IfPreviousSucceeded => IF_PREVIOUS_TRUE,
            Condition::IfPreviousFailed => IF_PREVIOUS_FALSE,
        }
    }

    /// Whether an entry with this condition may run given the previous step's outcome.
    pub fn admits(&self, previous_succeeded: bool) -> bool {
        match self {
            Condition::Always => true,
            Condition::IfPreviousSucceeded => previous_succeeded,
            Condition::IfPreviousFailed => !previous_succeeded,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Only the two conditional tags parse; there is no fallback.
impl FromStr for Condition {
    type Err = AuthChainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            IF_PREVIOUS_TRUE => Ok(Condition::IfPreviousSucceeded),
            IF_PREVIOUS_FALSE => Ok(Condition::IfPreviousFailed),
            other => Err(AuthChainError::InvalidChainConfiguration(format!(
                "'{}' is not a valid value for 'required' (expected '{}' or '{}')",
                other, IF_PREVIOUS_TRUE, IF_PREVIOUS_FALSE
            ))),
        }
    }
}

impl From<Condition> for String {
    fn from(condition: Condition) -> Self {
        condition.as_str().to_string()
    }
}

/// One (provider, condition) pair in a chain.
#[derive(Clone)]
pub struct ChainEntry {
    provider: Arc<dyn AuthenticationProvider>,
    condition: Condition,
}

impl ChainEntry {
    /// An unconditional entry, for the head of a chain.
    pub fn always(provider: Arc<dyn AuthenticationProvider>) -> Self {
        Self {
            provider,
            condition: Condition::Always,
        }
    }

    /// A gated entry. `required` must be `ifPreviousTrue` or `ifPreviousFalse`.
    pub fn new(provider: Arc<dyn AuthenticationProvider>, required: &str) -> Result<Self> {
        Ok(Self {
            provider,
            condition: required.parse()?,
        })
    }

    pub fn with_condition(provider: Arc<dyn AuthenticationProvider>, condition: Condition) -> Self {
        Self {
            provider,
            condition,
        }
    }

    pub fn provider(&self) -> &dyn AuthenticationProvider {
        self.provider.as_ref()
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }
}

impl fmt::Debug for ChainEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainEntry")
            .field("provider", &self.provider.name())
            .field("condition", &self.condition)
            .finish()
    }
}

/// An ordered, validated sequence of chain entries.
///
/// Immutable once built, so a single chain can back any number of concurrent
/// evaluations.
#[derive(Debug, Clone, Default)]
pub struct Chain {
    entries: Vec<ChainEntry>,
}

impl Chain {
    /// Validate and assemble a chain. Fails if any entry after the first is
    /// unconditional.
    pub fn new(entries: Vec<ChainEntry>) -> Result<Self> {
        if let Some(head) = entries.first() {
            if head.condition != Condition::Always {
                tracing::warn!(
                    provider = head.provider.name(),
                    condition = %head.condition,
                    "condition on the first chain entry is ignored"
                );
            }
        }

        for (index, entry) in entries.iter().enumerate().skip(1) {
            if entry.condition == Condition::Always {
                return Err(AuthChainError::InvalidChainConfiguration(format!(
                    "entry {} ('{}') must declare '{}' or '{}'",
                    index,
                    entry.provider.name(),
                    IF_PREVIOUS_TRUE,
                    IF_PREVIOUS_FALSE
                )));
            }
        }

        Ok(Self { entries })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChainEntry> {
        self.entries.iter()
    }

    /// Entries paired with the condition that actually gates them. The head
    /// entry always runs, so it is reported as [`Condition::Always`] whatever
    /// it was built with.
    pub fn gated(&self) -> impl Iterator<Item = (usize, &ChainEntry, Condition)> + '_ {
        self.entries.iter().enumerate().map(|(index, entry)| {
            let condition = if index == 0 {
                Condition::Always
            } else {
                entry.condition
            };
            (index, entry, condition)
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
