//! The guarded transfer workflow state machine.

use rust_decimal::Decimal;
use tracing::{info, warn};

use bankview_shared::AppResult;

use crate::ledger::types::Account;
use crate::notify::NotificationHub;

use super::error::TransferError;
use super::types::{
    ExternalDetails, TransferDraft, TransferMode, TransferRequest, TransferStep,
};

/// Remote boundary used by the workflow.
///
/// Implemented by the IO edge (`bankview-client`); stubbed in tests.
pub trait TransferGateway {
    /// `POST accounts/transfer`.
    fn create_transfer(
        &self,
        request: &TransferRequest,
    ) -> impl Future<Output = AppResult<()>> + Send;
    /// `GET accounts`, used to refresh balances after a transfer.
    fn fetch_accounts(&self) -> impl Future<Output = AppResult<Vec<Account>>> + Send;
}

/// The 3-step transfer wizard state machine.
///
/// Steps: select source -> select destination -> review and submit. Every
/// transition sits behind a pure guard; the terminal submission is the only
/// transition that resets the machine to step 1.
pub struct TransferWorkflow<G> {
    gateway: G,
    hub: NotificationHub,
    accounts: Vec<Account>,
    step: TransferStep,
    mode: TransferMode,
    draft: TransferDraft,
    external: ExternalDetails,
    is_submitting: bool,
}

impl<G: TransferGateway> TransferWorkflow<G> {
    /// Creates a fresh workflow at step 1 in internal mode.
    pub fn new(gateway: G, hub: NotificationHub) -> Self {
        Self {
            gateway,
            hub,
            accounts: Vec::new(),
            step: TransferStep::SelectSource,
            mode: TransferMode::Internal,
            draft: TransferDraft::default(),
            external: ExternalDetails::default(),
            is_submitting: false,
        }
    }

    /// Replaces the account snapshot wholesale.
    pub fn set_accounts(&mut self, accounts: Vec<Account>) {
        self.accounts = accounts;
    }

    /// Returns the account snapshot.
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Returns the current step.
    #[must_use]
    pub fn step(&self) -> TransferStep {
        self.step
    }

    /// Returns the current transfer mode.
    #[must_use]
    pub fn mode(&self) -> TransferMode {
        self.mode
    }

    /// Returns the current draft.
    #[must_use]
    pub fn draft(&self) -> &TransferDraft {
        &self.draft
    }

    /// Returns the external destination fields.
    #[must_use]
    pub fn external(&self) -> &ExternalDetails {
        &self.external
    }

    /// Returns true while a submission is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Selects the source account.
    ///
    /// Source selection is the step-1 action, but the setter itself is not
    /// step-guarded; the UI only exposes it at step 1.
    pub fn select_source(&mut self, account_id: i64) {
        self.draft.source = Some(account_id);
    }

    /// Switches transfer mode, clearing the destination unconditionally.
    pub fn set_mode(&mut self, mode: TransferMode) {
        self.mode = mode;
        self.draft.destination = None;
    }

    /// Selects the destination account.
    ///
    /// Only meaningful in internal mode, and the destination must differ
    /// from the selected source. Returns whether the selection was taken.
    pub fn select_destination(&mut self, account_id: i64) -> bool {
        if self.mode != TransferMode::Internal || self.draft.source == Some(account_id) {
            return false;
        }
        self.draft.destination = Some(account_id);
        true
    }

    /// Returns the destination candidates: all accounts except the source.
    #[must_use]
    pub fn destination_candidates(&self) -> Vec<&Account> {
        self.accounts
            .iter()
            .filter(|account| Some(account.id) != self.draft.source)
            .collect()
    }

    /// Sets the transfer amount.
    pub fn set_amount(&mut self, amount: Option<Decimal>) {
        self.draft.amount = amount;
    }

    /// Sets the transfer description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    /// Sets the external destination fields.
    pub fn set_external_details(&mut self, details: ExternalDetails) {
        self.external = details;
    }

    /// Returns the live balance of the selected source account (zero when
    /// no source is selected or the account is missing from the snapshot).
    #[must_use]
    pub fn source_balance(&self) -> Decimal {
        self.draft
            .source
            .and_then(|id| self.accounts.iter().find(|account| account.id == id))
            .map_or(Decimal::ZERO, |account| account.balance)
    }

    /// Guard for the step 2 -> 3 transition: internal mode with a
    /// destination selected. External mode can never advance past step 2.
    #[must_use]
    pub fn can_advance_from_2(&self) -> bool {
        self.mode == TransferMode::Internal && self.draft.destination.is_some()
    }

    /// Guard for the current step's forward transition.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        match self.step {
            TransferStep::SelectSource => self.draft.source.is_some(),
            TransferStep::SelectDestination => self.can_advance_from_2(),
            TransferStep::Review => false,
        }
    }

    /// Moves forward one step when the guard holds. Returns whether the
    /// step changed.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        self.step = match self.step {
            TransferStep::SelectSource => TransferStep::SelectDestination,
            TransferStep::SelectDestination | TransferStep::Review => TransferStep::Review,
        };
        true
    }

    /// Moves back one step. Always allowed from steps 2 and 3; never clears
    /// previously entered data. Returns whether the step changed.
    pub fn retreat(&mut self) -> bool {
        match self.step.previous() {
            Some(previous) => {
                self.step = previous;
                true
            }
            None => false,
        }
    }

    /// Submission guard: internal mode, source, destination, and a positive
    /// amount within the source's live balance.
    ///
    /// The balance is looked up from the current snapshot at call time, not
    /// cached at selection time.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.mode == TransferMode::Internal
            && self.draft.source.is_some()
            && self.draft.destination.is_some()
            && self
                .draft
                .amount
                .is_some_and(|amount| amount > Decimal::ZERO && amount <= self.source_balance())
    }

    /// Submits the transfer.
    ///
    /// Only one submission may be in flight at a time: the backend has no
    /// idempotency key, so a concurrent retry could double-transfer funds.
    /// On success the draft is reset, a success alert is published, and the
    /// account snapshot is refreshed. On failure an error alert is
    /// published and the draft and step are left unchanged for retry.
    pub async fn submit(&mut self) -> Result<(), TransferError> {
        if self.is_submitting {
            return Err(TransferError::AlreadySubmitting);
        }
        if !self.can_submit() {
            return Err(TransferError::NotSubmittable);
        }
        let (Some(from), Some(to), Some(amount)) = (
            self.draft.source,
            self.draft.destination,
            self.draft.amount,
        ) else {
            return Err(TransferError::NotSubmittable);
        };

        let request = TransferRequest {
            from_account_id: from,
            to_account_id: to,
            amount,
            note: self.draft.description.clone(),
        };

        self.is_submitting = true;
        let result = self.gateway.create_transfer(&request).await;
        self.is_submitting = false;

        match result {
            Ok(()) => {
                info!(from, to, %amount, "transfer submitted");
                self.hub.success("Transfer completed successfully!");
                self.reset();
                match self.gateway.fetch_accounts().await {
                    Ok(accounts) => self.accounts = accounts,
                    Err(err) => warn!(%err, "account refresh after transfer failed"),
                }
                Ok(())
            }
            Err(err) => {
                warn!(%err, "transfer submission failed");
                self.hub.error("Transfer failed. Please try again.");
                Err(TransferError::Remote(err.to_string()))
            }
        }
    }

    /// Cancels the workflow, discarding the draft and returning to step 1.
    pub fn cancel(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.step = TransferStep::SelectSource;
        self.mode = TransferMode::Internal;
        self.draft = TransferDraft::default();
        self.external = ExternalDetails::default();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::Utc;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::ledger::types::AccountKind;
    use crate::notify::Severity;
    use bankview_shared::AppError;

    struct StubGateway {
        fail: bool,
        accounts_after: Vec<Account>,
        requests: Arc<Mutex<Vec<TransferRequest>>>,
    }

    impl StubGateway {
        fn new(fail: bool, accounts_after: Vec<Account>) -> Self {
            Self {
                fail,
                accounts_after,
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl TransferGateway for StubGateway {
        async fn create_transfer(&self, request: &TransferRequest) -> AppResult<()> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                Err(AppError::Remote("boom".into()))
            } else {
                Ok(())
            }
        }

        async fn fetch_accounts(&self) -> AppResult<Vec<Account>> {
            Ok(self.accounts_after.clone())
        }
    }

    fn account(id: i64, balance: Decimal) -> Account {
        Account {
            id,
            account_number: format!("0000000{id}"),
            customer_id: 1,
            account_type: AccountKind::Savings,
            balance,
            opened_at: Utc::now(),
            interest_rate: None,
            overdraft_limit: None,
            status: "ACTIVE".to_string(),
        }
    }

    fn ready_workflow(fail: bool) -> TransferWorkflow<StubGateway> {
        let accounts = vec![account(1, dec!(500)), account(2, dec!(100))];
        let gateway = StubGateway::new(fail, accounts.clone());
        let mut workflow = TransferWorkflow::new(gateway, NotificationHub::new());
        workflow.set_accounts(accounts);
        workflow
    }

    #[test]
    fn test_fresh_workflow_cannot_submit() {
        let workflow = ready_workflow(false);
        assert_eq!(workflow.step(), TransferStep::SelectSource);
        assert_eq!(workflow.mode(), TransferMode::Internal);
        assert!(!workflow.can_submit());
    }

    #[test]
    fn test_advance_requires_source() {
        let mut workflow = ready_workflow(false);
        assert!(!workflow.advance());
        assert_eq!(workflow.step(), TransferStep::SelectSource);

        workflow.select_source(1);
        assert!(workflow.advance());
        assert_eq!(workflow.step(), TransferStep::SelectDestination);
    }

    #[test]
    fn test_happy_path_guard_with_exact_balance() {
        let mut workflow = ready_workflow(false);
        workflow.select_source(1);
        assert!(workflow.advance());
        workflow.set_mode(TransferMode::Internal);
        assert!(workflow.select_destination(2));
        assert!(workflow.advance());
        assert_eq!(workflow.step(), TransferStep::Review);

        // Exactly the source balance is allowed.
        workflow.set_amount(Some(dec!(500)));
        assert!(workflow.can_submit());

        // One cent over is not.
        workflow.set_amount(Some(dec!(500.01)));
        assert!(!workflow.can_submit());

        // Zero and negative amounts are not.
        workflow.set_amount(Some(Decimal::ZERO));
        assert!(!workflow.can_submit());
        workflow.set_amount(Some(dec!(-1)));
        assert!(!workflow.can_submit());
    }

    #[test]
    fn test_balance_is_looked_up_live() {
        let mut workflow = ready_workflow(false);
        workflow.select_source(1);
        workflow.advance();
        workflow.select_destination(2);
        workflow.advance();
        workflow.set_amount(Some(dec!(400)));
        assert!(workflow.can_submit());

        // A refreshed snapshot with a lower balance flips the guard.
        workflow.set_accounts(vec![account(1, dec!(300)), account(2, dec!(100))]);
        assert!(!workflow.can_submit());
    }

    #[test]
    fn test_external_mode_cannot_pass_step_2() {
        let mut workflow = ready_workflow(false);
        workflow.select_source(1);
        workflow.advance();
        workflow.set_mode(TransferMode::External);
        workflow.set_external_details(ExternalDetails {
            account_number: "987654".into(),
            routing_number: "021000021".into(),
            account_holder_name: "Grace Hopper".into(),
        });

        assert!(!workflow.can_advance_from_2());
        assert!(!workflow.advance());
        assert_eq!(workflow.step(), TransferStep::SelectDestination);
        assert!(!workflow.can_submit());
    }

    #[test]
    fn test_set_mode_clears_destination() {
        let mut workflow = ready_workflow(false);
        workflow.select_source(1);
        assert!(workflow.select_destination(2));

        workflow.set_mode(TransferMode::External);
        assert_eq!(workflow.draft().destination, None);

        // Switching back does not restore it.
        workflow.set_mode(TransferMode::Internal);
        assert_eq!(workflow.draft().destination, None);
    }

    #[test]
    fn test_destination_must_differ_from_source() {
        let mut workflow = ready_workflow(false);
        workflow.select_source(1);
        assert!(!workflow.select_destination(1));
        assert_eq!(workflow.draft().destination, None);

        let candidates: Vec<i64> = workflow
            .destination_candidates()
            .iter()
            .map(|account| account.id)
            .collect();
        assert_eq!(candidates, vec![2]);
    }

    #[test]
    fn test_retreat_keeps_data() {
        let mut workflow = ready_workflow(false);
        workflow.select_source(1);
        workflow.advance();
        workflow.select_destination(2);
        workflow.advance();

        assert!(workflow.retreat());
        assert!(workflow.retreat());
        assert_eq!(workflow.step(), TransferStep::SelectSource);
        assert!(!workflow.retreat());

        assert_eq!(workflow.draft().source, Some(1));
        assert_eq!(workflow.draft().destination, Some(2));
    }

    #[tokio::test]
    async fn test_submit_success_resets_and_refreshes() {
        let mut workflow = ready_workflow(false);
        let mut alerts = workflow.hub.subscribe();
        workflow.select_source(1);
        workflow.advance();
        workflow.select_destination(2);
        workflow.advance();
        workflow.set_amount(Some(dec!(50)));
        workflow.set_description("rent");

        workflow.submit().await.unwrap();

        // The request carried the draft.
        let requests = workflow.gateway.requests.lock().unwrap().clone();
        assert_eq!(
            requests,
            vec![TransferRequest {
                from_account_id: 1,
                to_account_id: 2,
                amount: dec!(50),
                note: "rent".into(),
            }]
        );

        // Fully reset and refreshed.
        assert_eq!(workflow.step(), TransferStep::SelectSource);
        assert_eq!(workflow.draft(), &TransferDraft::default());
        assert_eq!(workflow.external(), &ExternalDetails::default());
        assert!(!workflow.is_submitting());
        assert_eq!(workflow.accounts().len(), 2);

        let alert = alerts.try_recv().unwrap();
        assert_eq!(alert.severity, Severity::Success);
        assert_eq!(alert.message, "Transfer completed successfully!");
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_state_for_retry() {
        let mut workflow = ready_workflow(true);
        let mut alerts = workflow.hub.subscribe();
        workflow.select_source(1);
        workflow.advance();
        workflow.select_destination(2);
        workflow.advance();
        workflow.set_amount(Some(dec!(50)));

        let err = workflow.submit().await.unwrap_err();
        assert!(matches!(err, TransferError::Remote(_)));

        // No silent reset: the user can retry from where they were.
        assert_eq!(workflow.step(), TransferStep::Review);
        assert_eq!(workflow.draft().amount, Some(dec!(50)));
        assert!(!workflow.is_submitting());

        let alert = alerts.try_recv().unwrap();
        assert_eq!(alert.severity, Severity::Error);
        assert_eq!(alert.message, "Transfer failed. Please try again.");
    }

    #[tokio::test]
    async fn test_submit_rejected_when_guard_fails() {
        let mut workflow = ready_workflow(false);
        let err = workflow.submit().await.unwrap_err();
        assert!(matches!(err, TransferError::NotSubmittable));
        assert!(workflow.gateway.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_rejected_while_in_flight() {
        let mut workflow = ready_workflow(false);
        workflow.select_source(1);
        workflow.advance();
        workflow.select_destination(2);
        workflow.advance();
        workflow.set_amount(Some(dec!(50)));

        workflow.is_submitting = true;
        let err = workflow.submit().await.unwrap_err();
        assert!(matches!(err, TransferError::AlreadySubmitting));
        assert!(workflow.gateway.requests.lock().unwrap().is_empty());
        workflow.is_submitting = false;
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut workflow = ready_workflow(false);
        workflow.select_source(1);
        workflow.advance();
        workflow.select_destination(2);
        workflow.set_mode(TransferMode::Internal);
        workflow.set_amount(Some(dec!(10)));

        workflow.cancel();
        assert_eq!(workflow.step(), TransferStep::SelectSource);
        assert_eq!(workflow.draft(), &TransferDraft::default());
    }
}
