//! Send wizard
//!
//! Four-step flow for sending funds: input, confirm, sending, success. The
//! wizard owns the form fields, the fee estimate, and the duplicate-submit
//! guard; the shell drives the actual network calls and feeds the outcomes
//! back in.

use zori_core::wallet::{is_valid_evm_address, parse_amount, EstimateResponse};
use zori_core::{ZoriError, ZoriResult};

/// Step of the send flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SendStep {
    /// Recipient and amount entry
    #[default]
    Input,
    /// Fee estimate shown, awaiting confirmation
    Confirm,
    /// Transaction submitted, awaiting the backend
    Sending,
    /// Transaction accepted
    Success,
}

impl SendStep {
    /// All steps, in flow order.
    #[must_use]
    pub fn all() -> [SendStep; 4] {
        [
            SendStep::Input,
            SendStep::Confirm,
            SendStep::Sending,
            SendStep::Success,
        ]
    }

    /// Display title for the step.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            SendStep::Input => "Send",
            SendStep::Confirm => "Confirm",
            SendStep::Sending => "Sending",
            SendStep::Success => "Sent",
        }
    }
}

/// State machine behind the send dialog for one currency.
#[derive(Debug, Clone)]
pub struct SendWizard {
    currency_code: String,
    /// Spendable balance, as a formatted decimal string
    balance: String,
    step: SendStep,
    to_address: String,
    amount: String,
    estimate: Option<EstimateResponse>,
    error: Option<String>,
    transaction_hash: Option<String>,
}

impl SendWizard {
    /// Open the wizard for a currency with the given spendable balance.
    #[must_use]
    pub fn new(currency_code: impl Into<String>, balance: impl Into<String>) -> Self {
        Self {
            currency_code: currency_code.into(),
            balance: balance.into(),
            step: SendStep::default(),
            to_address: String::new(),
            amount: String::new(),
            estimate: None,
            error: None,
            transaction_hash: None,
        }
    }

    /// Currency being sent.
    #[must_use]
    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    /// Current step.
    #[must_use]
    pub fn step(&self) -> SendStep {
        self.step
    }

    /// Recipient address as entered.
    #[must_use]
    pub fn to_address(&self) -> &str {
        &self.to_address
    }

    /// Amount as entered.
    #[must_use]
    pub fn amount(&self) -> &str {
        &self.amount
    }

    /// Fee estimate shown on the confirm step, if fetched.
    #[must_use]
    pub fn estimate(&self) -> Option<&EstimateResponse> {
        self.estimate.as_ref()
    }

    /// Last error to surface, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Hash of the accepted transaction, once on the success step.
    #[must_use]
    pub fn transaction_hash(&self) -> Option<&str> {
        self.transaction_hash.as_deref()
    }

    /// Update the recipient address. Clears any stale error.
    pub fn set_to_address(&mut self, address: &str) {
        self.to_address = address.trim().to_string();
        self.error = None;
    }

    /// Update the amount. Clears any stale error.
    pub fn set_amount(&mut self, amount: &str) {
        self.amount = amount.trim().to_string();
        self.error = None;
    }

    /// Fill the amount with the full spendable balance.
    pub fn apply_max(&mut self) {
        self.amount = self.balance.clone();
        self.error = None;
    }

    /// Validate the input form: a well-formed recipient address and a
    /// positive amount within the balance.
    pub fn validate_input(&self) -> ZoriResult<()> {
        if !is_valid_evm_address(&self.to_address) {
            return Err(ZoriError::validation("Invalid recipient address"));
        }
        let amount = parse_amount(&self.amount)
            .ok_or_else(|| ZoriError::validation("Invalid amount"))?;
        if amount <= 0.0 {
            return Err(ZoriError::validation("Amount must be greater than zero"));
        }
        let balance = parse_amount(&self.balance).unwrap_or(0.0);
        if amount > balance {
            return Err(ZoriError::validation("Insufficient balance"));
        }
        Ok(())
    }

    /// Accept a fee estimate and advance to the confirm step. Only valid
    /// from the input step with a valid form.
    pub fn confirm(&mut self, estimate: EstimateResponse) -> ZoriResult<()> {
        if self.step != SendStep::Input {
            return Err(ZoriError::validation("Not on the input step"));
        }
        self.validate_input()?;
        self.estimate = Some(estimate);
        self.step = SendStep::Confirm;
        self.error = None;
        Ok(())
    }

    /// Go back from confirm to input, keeping the entered fields.
    pub fn back_to_input(&mut self) {
        if self.step == SendStep::Confirm {
            self.step = SendStep::Input;
            self.estimate = None;
        }
    }

    /// Enter the sending step. Refused unless on confirm, which also makes
    /// it the duplicate-submit guard: a second call while a send is in
    /// flight fails instead of firing again.
    pub fn begin_send(&mut self) -> ZoriResult<()> {
        if self.step != SendStep::Confirm {
            return Err(ZoriError::validation("A send is not ready to submit"));
        }
        tracing::debug!(currency = %self.currency_code, "send submitted");
        self.step = SendStep::Sending;
        self.error = None;
        Ok(())
    }

    /// The backend rejected the transaction: roll back to confirm with the
    /// failure message, keeping the entered fields and estimate.
    pub fn send_failed(&mut self, message: impl Into<String>) {
        if self.step == SendStep::Sending {
            self.step = SendStep::Confirm;
            self.error = Some(message.into());
        }
    }

    /// The backend accepted the transaction.
    pub fn send_succeeded(&mut self, transaction_hash: impl Into<String>) {
        if self.step == SendStep::Sending {
            self.step = SendStep::Success;
            self.transaction_hash = Some(transaction_hash.into());
            self.error = None;
        }
    }

    /// Reset to a fresh input step, keeping currency and balance.
    pub fn reset(&mut self) {
        *self = Self::new(self.currency_code.clone(), self.balance.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const RECIPIENT: &str = "0x52908400098527886E0F7030069857D2E4169EE7";

    fn estimate() -> EstimateResponse {
        EstimateResponse {
            estimated_gas: "21000".into(),
            gas_price: "30000000000".into(),
            estimated_fee: "630000000000000".into(),
            estimated_fee_formatted: "0.00063 POL".into(),
            max_amount: "100000000".into(),
            max_amount_formatted: "100.00".into(),
        }
    }

    fn wizard_at_confirm() -> SendWizard {
        let mut wizard = SendWizard::new("USDC", "100.00");
        wizard.set_to_address(RECIPIENT);
        wizard.set_amount("25.50");
        wizard.confirm(estimate()).unwrap();
        wizard
    }

    #[test]
    fn happy_path_walks_all_four_steps() {
        let mut wizard = wizard_at_confirm();
        assert_eq!(wizard.step(), SendStep::Confirm);
        wizard.begin_send().unwrap();
        assert_eq!(wizard.step(), SendStep::Sending);
        wizard.send_succeeded("0xabc123");
        assert_eq!(wizard.step(), SendStep::Success);
        assert_eq!(wizard.transaction_hash(), Some("0xabc123"));
    }

    #[test]
    fn input_validation_rejects_bad_address_amount_and_overdraft() {
        let mut wizard = SendWizard::new("USDC", "100.00");
        wizard.set_to_address("not-an-address");
        wizard.set_amount("10");
        assert_matches!(wizard.validate_input(), Err(ZoriError::Validation { .. }));

        wizard.set_to_address(RECIPIENT);
        wizard.set_amount("0");
        assert_matches!(wizard.validate_input(), Err(ZoriError::Validation { .. }));

        wizard.set_amount("100.01");
        assert_matches!(wizard.validate_input(), Err(ZoriError::Validation { .. }));

        wizard.set_amount("99.99");
        wizard.validate_input().unwrap();
    }

    #[test]
    fn begin_send_refuses_reentry_while_sending() {
        let mut wizard = wizard_at_confirm();
        wizard.begin_send().unwrap();
        assert_matches!(wizard.begin_send(), Err(ZoriError::Validation { .. }));
        assert_eq!(wizard.step(), SendStep::Sending);
    }

    #[test]
    fn failure_rolls_back_to_confirm_with_fields_intact() {
        let mut wizard = wizard_at_confirm();
        wizard.begin_send().unwrap();
        wizard.send_failed("insufficient gas");

        assert_eq!(wizard.step(), SendStep::Confirm);
        assert_eq!(wizard.error(), Some("insufficient gas"));
        assert_eq!(wizard.to_address(), RECIPIENT);
        assert_eq!(wizard.amount(), "25.50");
        assert!(wizard.estimate().is_some());

        // Retry goes through.
        wizard.begin_send().unwrap();
        wizard.send_succeeded("0xdef456");
        assert_eq!(wizard.step(), SendStep::Success);
    }

    #[test]
    fn apply_max_fills_the_balance_and_validates() {
        let mut wizard = SendWizard::new("USDC", "1,234.56");
        wizard.set_to_address(RECIPIENT);
        wizard.apply_max();
        assert_eq!(wizard.amount(), "1,234.56");
        wizard.validate_input().unwrap();
    }

    #[test]
    fn reset_returns_to_a_fresh_input_step() {
        let mut wizard = wizard_at_confirm();
        wizard.begin_send().unwrap();
        wizard.send_succeeded("0xabc");
        wizard.reset();
        assert_eq!(wizard.step(), SendStep::Input);
        assert_eq!(wizard.currency_code(), "USDC");
        assert!(wizard.to_address().is_empty());
        assert!(wizard.transaction_hash().is_none());
    }

    #[test]
    fn step_titles_are_distinct() {
        let titles: std::collections::BTreeSet<_> =
            SendStep::all().iter().map(|s| s.title()).collect();
        assert_eq!(titles.len(), 4);
    }
}
