//! Diagnostic invariants for boards reported by the relay.
//!
//! The relay is authoritative, so these never reject a board. The bridge
//! checks them after every transition and logs what it finds.

mod balanced_marks;
mod monotonic_board;

pub use balanced_marks::BalancedMarksInvariant;
pub use monotonic_board::{BoardTransition, MonotonicBoardInvariant};

/// A property a state is expected to satisfy.
pub trait Invariant<S> {
    /// Checks the state.
    fn holds(state: &S) -> bool;

    /// What the invariant asserts, for logs.
    fn description() -> &'static str;
}

/// An invariant that did not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the broken invariant.
    pub description: &'static str,
}

/// Invariants checked together against one state.
pub trait InvariantSet<S> {
    /// Every violated invariant, in declaration order; `Ok` if none.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, A, B> InvariantSet<S> for (A, B)
where
    A: Invariant<S>,
    B: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let checks: [(fn(&S) -> bool, fn() -> &'static str); 2] =
            [(A::holds, A::description), (B::holds, B::description)];

        let violations: Vec<_> = checks
            .into_iter()
            .filter(|(holds, _)| !holds(state))
            .map(|(_, description)| InvariantViolation {
                description: description(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariants a board transition reported by the relay should satisfy.
pub type RelayBoardInvariants = (MonotonicBoardInvariant, BalancedMarksInvariant);
