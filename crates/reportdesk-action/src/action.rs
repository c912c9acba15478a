//! Action contract and confirmation gate.

use async_trait::async_trait;
use tracing::info;

use crate::outcome::ActionOutcome;

/// A user-triggered console action.
#[async_trait]
pub trait Action: Send + Sync {
  type Input: Send + Sync;

  /// Whether the operator has to confirm before [`Action::perform`] runs.
  fn needs_confirmation(&self, _input: &Self::Input) -> bool {
    true
  }

  /// Prompt shown when confirmation is needed.
  fn confirmation_message(&self, input: &Self::Input) -> String;

  async fn perform(&self, input: &Self::Input) -> ActionOutcome;
}

/// Asks the operator to confirm an action.
#[async_trait]
pub trait Confirm: Send + Sync {
  async fn confirm(&self, message: &str) -> bool;
}

/// Confirms every prompt. For unattended hosts that already asked elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

#[async_trait]
impl Confirm for AutoConfirm {
  async fn confirm(&self, _message: &str) -> bool {
    true
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GateState {
  #[default]
  Idle,
  AwaitingConfirmation,
  Executing,
}

/// Runs actions only after the operator confirmed them.
pub struct ConfirmationGate<C> {
  confirm: C,
  state: GateState,
}

impl<C: Confirm> ConfirmationGate<C> {
  pub fn new(confirm: C) -> Self {
    Self {
      confirm,
      state: GateState::Idle,
    }
  }

  pub fn state(&self) -> GateState {
    self.state
  }

  /// Confirm and run `action`.
  ///
  /// Returns `None` when the operator declined; the action is not performed.
  pub async fn run<A: Action>(&mut self, action: &A, input: &A::Input) -> Option<ActionOutcome> {
    if action.needs_confirmation(input) {
      self.state = GateState::AwaitingConfirmation;
      let message = action.confirmation_message(input);

      if !self.confirm.confirm(&message).await {
        info!("action declined");
        self.state = GateState::Idle;
        return None;
      }
    }

    self.state = GateState::Executing;
    let outcome = action.perform(input).await;
    self.state = GateState::Idle;

    Some(outcome)
  }
}
