use std::borrow::Cow;

use serde::Serialize;
use tracing::debug;

use super::{Chain, Condition};
use crate::credential::{AuthResult, Authentication, Credential};
use crate::error::{AuthChainError, Result};
use crate::provider::AuthenticationProvider;

/// What happened to a single chain entry during one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    /// The entry's condition did not admit it; the provider was not called.
    Skipped,
    Succeeded,
    /// The provider returned a credential that is not authenticated.
    Abstained,
    Rejected { code: String, message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub provider: String,
    pub condition: Condition,
    pub outcome: StepOutcome,
}

/// The full record of one chain evaluation.
#[derive(Debug)]
pub struct Evaluation {
    pub steps: Vec<StepReport>,
    outcome: Result<AuthResult>,
}

impl Evaluation {
    pub fn into_result(self) -> Result<AuthResult> {
        self.outcome
    }

    /// Number of providers that were actually invoked.
    pub fn invoked(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.outcome != StepOutcome::Skipped)
            .count()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(&self.outcome, Ok(c) if c.authenticated)
    }
}

/// Runs a [`Chain`] of providers against one credential.
///
/// Each entry after the first runs only when its condition admits the
/// previous entry's outcome; a skipped entry counts as a failed one for the
/// entry after it. Every entry is considered, there is no early exit.
///
/// Resolution after the last entry:
/// - any success: the most recent successful result;
/// - otherwise, any failure: the most recent provider error;
/// - otherwise: the input credential, unchanged and unauthenticated. This
///   is also what an empty chain returns. Callers must check
///   [`Credential::authenticated`] rather than treat `Ok` as success.
#[derive(Debug, Clone)]
pub struct ChainedAuthenticationManager {
    name: String,
    chain: Chain,
}

impl ChainedAuthenticationManager {
    pub fn new(chain: Chain) -> Self {
        Self::named("chain", chain)
    }

    /// A manager with a custom name, used when it is nested inside another chain.
    pub fn named(name: impl Into<String>, chain: Chain) -> Self {
        Self {
            name: name.into(),
            chain,
        }
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Authenticate `input` through the chain.
    ///
    /// `None` passes straight through as `Ok(None)` without touching any
    /// provider.
    pub fn authenticate<A>(&self, input: Option<&A>) -> Result<Option<AuthResult>>
    where
        A: Authentication + ?Sized,
    {
        self.authenticate_traced(input)
            .map(Evaluation::into_result)
            .transpose()
    }

    /// Like [`authenticate`](Self::authenticate), but keeps the per-entry
    /// report alongside the outcome.
    pub fn authenticate_traced<A>(&self, input: Option<&A>) -> Option<Evaluation>
    where
        A: Authentication + ?Sized,
    {
        let credential = input?.to_credential();
        Some(self.evaluate(&credential))
    }

    /// Evaluate the chain and keep a per-entry report.
    pub fn evaluate(&self, input: &Credential) -> Evaluation {
        let mut authenticated = false;
        let mut current: Cow<'_, Credential> = Cow::Borrowed(input);
        let mut last_error: Option<AuthChainError> = None;
        let mut previous_succeeded = false;
        let mut steps = Vec::with_capacity(self.chain.len());

        for (index, entry, condition) in self.chain.gated() {
            let provider = entry.provider();

            if !condition.admits(previous_succeeded) {
                debug!(
                    index,
                    provider = provider.name(),
                    %condition,
                    previous_succeeded,
                    "skipping chain entry"
                );
                previous_succeeded = false;
                steps.push(StepReport {
                    index,
                    provider: provider.name().to_string(),
                    condition,
                    outcome: StepOutcome::Skipped,
                });
                continue;
            }

            debug!(
                index,
                provider = provider.name(),
                %condition,
                principal = %current.principal,
                "attempting chain entry"
            );

            let attempt = provider.authenticate(&current);
            let outcome = match attempt {
                Ok(result) if result.authenticated => {
                    authenticated = true;
                    previous_succeeded = true;
                    current = Cow::Owned(result);
                    StepOutcome::Succeeded
                }
                Ok(_) => {
                    previous_succeeded = false;
                    StepOutcome::Abstained
                }
                Err(e) => {
                    debug!(index, provider = provider.name(), error = %e, "chain entry rejected credential");
                    previous_succeeded = false;
                    let outcome = StepOutcome::Rejected {
                        code: e.error_code().to_string(),
                        message: e.to_string(),
                    };
                    last_error = Some(e);
                    outcome
                }
            };

            debug!(
                index,
                provider = provider.name(),
                step_succeeded = previous_succeeded,
                authenticated,
                "chain entry finished"
            );
            steps.push(StepReport {
                index,
                provider: provider.name().to_string(),
                condition,
                outcome,
            });
        }

        let outcome = if authenticated {
            Ok(current.into_owned())
        } else if let Some(e) = last_error {
            Err(e)
        } else {
            debug!(
                principal = %input.principal,
                entries = self.chain.len(),
                "chain reached no decision; returning input unauthenticated"
            );
            Ok(current.into_owned())
        };

        Evaluation { steps, outcome }
    }
}

/// A chain can itself be an entry of another chain.
impl AuthenticationProvider for ChainedAuthenticationManager {
    fn name(&self) -> &str {
        &self.name
    }

    fn authenticate(&self, credential: &Credential) -> Result<AuthResult> {
        self.evaluate(credential).into_result()
    }
}
