use tracing::debug;

use super::domain::{Agreement, Person, WizardStep};
use super::validation::{validate_step, FieldErrors};
use crate::config::RoomVariant;

/// Result of asking the wizard to advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved to the given step.
    Moved(WizardStep),
    /// The current step has blocking validation errors; see
    /// [`Wizard::errors`].
    Blocked,
    /// The terminal step was confirmed; the caller should run document
    /// generation on the agreement snapshot.
    Finished,
}

/// Multi-step data-collection wizard over one [`Agreement`].
///
/// Transitions are lookups into the visible step sequence, which is derived
/// from the current agreement and the room-variant catalogue: the subtenant
/// step only appears while the selected variant holds two occupants. Both
/// `next` and `back` share that one sequence, so the skip rules cannot drift
/// apart between directions.
#[derive(Debug, Default)]
pub struct Wizard {
    step: WizardStep,
    agreement: Agreement,
    errors: FieldErrors,
}

/// Steps currently reachable, in order, for the given agreement state.
pub fn visible_steps(agreement: &Agreement, room_variants: &[RoomVariant]) -> Vec<WizardStep> {
    let subtenant_applies = agreement
        .room_variant_id
        .as_deref()
        .and_then(|id| room_variants.iter().find(|variant| variant.id == id))
        .map(|variant| variant.max_occupants == 2)
        .unwrap_or(false);

    WizardStep::ordered()
        .into_iter()
        .filter(|step| *step != WizardStep::Subtenant || subtenant_applies)
        .collect()
}

impl Wizard {
    /// Fresh wizard starting at unit selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wizard for a contextually pre-selected unit, starting past the
    /// selection step.
    pub fn for_unit(room_variant_id: impl Into<String>) -> Self {
        let mut wizard = Self::new();
        wizard.agreement.room_variant_id = Some(room_variant_id.into());
        wizard.step = WizardStep::Tenant;
        wizard
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn agreement(&self) -> &Agreement {
        &self.agreement
    }

    /// Mutable access for the UI filling fields on the current step.
    pub fn agreement_mut(&mut self) -> &mut Agreement {
        &mut self.agreement
    }

    /// Errors from the last blocked `next` call; empty after any successful
    /// transition.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Validates the current step and advances along the visible sequence.
    ///
    /// Leaving the subtenant step without a subtenant resets the subtenant
    /// fields, so a toggled-off checkbox can never leak stale data into the
    /// generated documents.
    pub fn next(&mut self, room_variants: &[RoomVariant]) -> StepOutcome {
        if let Some(errors) = validate_step(self.step, &self.agreement, room_variants) {
            debug!(step = ?self.step, count = errors.len(), "step blocked by validation");
            self.errors = errors;
            return StepOutcome::Blocked;
        }
        self.errors.clear();

        if self.step == WizardStep::Subtenant && !self.agreement.has_subtenant {
            self.agreement.subtenant = Person::default();
        }

        let sequence = visible_steps(&self.agreement, room_variants);
        // The current step can drop out of the sequence if the selected unit
        // changed under it; canonical order still yields the right successor.
        let successor = sequence
            .iter()
            .find(|step| canonical_index(**step) > canonical_index(self.step));
        match successor {
            Some(next) => {
                debug!(from = ?self.step, to = ?next, "wizard advanced");
                self.step = *next;
                StepOutcome::Moved(self.step)
            }
            None => StepOutcome::Finished,
        }
    }

    /// Steps back along the visible sequence; a no-op on the first step.
    pub fn back(&mut self, room_variants: &[RoomVariant]) {
        self.errors.clear();

        let sequence = visible_steps(&self.agreement, room_variants);
        let predecessor = sequence
            .iter()
            .rev()
            .find(|step| canonical_index(**step) < canonical_index(self.step));
        if let Some(previous) = predecessor {
            debug!(from = ?self.step, to = ?previous, "wizard stepped back");
            self.step = *previous;
        }
    }
}

fn canonical_index(step: WizardStep) -> usize {
    WizardStep::ordered()
        .into_iter()
        .position(|candidate| candidate == step)
        .unwrap_or_default()
}
