//! Guided multi-step flows chaining several transaction pages.

use rp_api_types::SubmissionResult;
use rp_tx_builders::TransactionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemeStep {
    pub title: &'static str,
    pub kind: TransactionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheme {
    pub name: &'static str,
    pub title: &'static str,
    pub steps: &'static [SchemeStep],
}

const fn step(title: &'static str, kind: TransactionKind) -> SchemeStep {
    SchemeStep { title, kind }
}

pub static SCHEMES: [Scheme; 5] = [
    Scheme {
        name: "issue-token",
        title: "Issue a token",
        steps: &[
            step("Enable rippling on the issuer", TransactionKind::AccountSet),
            step("Holder opens a trust line", TransactionKind::TrustSet),
            step("Issuer sends tokens", TransactionKind::Payment),
        ],
    },
    Scheme {
        name: "mpt",
        title: "Multi-purpose token",
        steps: &[
            step("Create the issuance", TransactionKind::MptIssuanceCreate),
            step("Holder opts in", TransactionKind::MptAuthorize),
            step("Issuer sends tokens", TransactionKind::Payment),
        ],
    },
    Scheme {
        name: "nft-market",
        title: "Sell an NFT",
        steps: &[
            step("Mint the NFT", TransactionKind::NftMint),
            step("Create a sell offer", TransactionKind::NftCreateOffer),
            step("Buyer accepts the offer", TransactionKind::NftAcceptOffer),
        ],
    },
    Scheme {
        name: "escrow",
        title: "Time-locked escrow",
        steps: &[
            step("Lock XRP in escrow", TransactionKind::EscrowCreate),
            step("Release the escrow", TransactionKind::EscrowFinish),
        ],
    },
    Scheme {
        name: "credential",
        title: "Issue a credential",
        steps: &[
            step("Issuer creates the credential", TransactionKind::CredentialCreate),
            step("Subject accepts it", TransactionKind::CredentialAccept),
        ],
    },
];

pub fn scheme(name: &str) -> Option<&'static Scheme> {
    SCHEMES.iter().find(|scheme| scheme.name == name)
}

pub struct SchemeWizard {
    steps: Vec<SchemeStep>,
    current: usize,
    done: Vec<bool>,
    on_complete: Option<Box<dyn FnMut()>>,
}

impl SchemeWizard {
    pub fn new(steps: Vec<SchemeStep>) -> Self {
        Self {
            done: vec![false; steps.len()],
            steps,
            current: 0,
            on_complete: None,
        }
    }

    pub fn for_scheme(scheme: &Scheme) -> Self {
        Self::new(scheme.steps.to_vec())
    }

    /// Fired when `next` is invoked on the last step.
    pub fn on_complete(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn steps(&self) -> &[SchemeStep] {
        &self.steps
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> Option<&SchemeStep> {
        self.steps.get(self.current)
    }

    pub fn current_kind(&self) -> Option<TransactionKind> {
        self.current_step().map(|step| step.kind)
    }

    /// Marks the current step done when its submission succeeded.
    pub fn record_result(&mut self, result: &SubmissionResult) -> bool {
        match self.done.get_mut(self.current) {
            Some(done) if result.success => {
                *done = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_step_done(&self, index: usize) -> bool {
        self.done.get(index).copied().unwrap_or(false)
    }

    /// `Step 2 of 3: Holder opens a trust line`, with a check mark once done.
    pub fn progress_label(&self) -> String {
        let Some(step) = self.current_step() else {
            return String::new();
        };
        let mark = if self.is_step_done(self.current) { " ✓" } else { "" };
        format!("Step {} of {}: {}{mark}", self.current + 1, self.steps.len(), step.title)
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.steps.len()
    }

    pub fn previous(&mut self) -> usize {
        self.current = self.current.saturating_sub(1);
        self.current
    }

    /// Advances one step; on the last step fires the completion callback instead.
    pub fn next(&mut self) -> usize {
        if self.is_last() {
            if !self.steps.is_empty() {
                if let Some(callback) = self.on_complete.as_mut() {
                    callback();
                }
            }
        } else {
            self.current += 1;
        }
        self.current
    }

    pub fn go_to(&mut self, index: usize) -> usize {
        self.current = index.min(self.steps.len().saturating_sub(1));
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut wizard = SchemeWizard::for_scheme(scheme("issue-token").unwrap());
        assert_eq!(wizard.previous(), 0);
        assert_eq!(wizard.next(), 1);
        assert_eq!(wizard.next(), 2);
        assert_eq!(wizard.next(), 2);
        assert_eq!(wizard.current_step().unwrap().kind, TransactionKind::Payment);
        assert_eq!(wizard.go_to(99), 2);
    }

    #[test]
    fn completion_fires_only_from_last_step() {
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        let mut wizard =
            SchemeWizard::for_scheme(scheme("escrow").unwrap()).on_complete(move || counter.set(counter.get() + 1));

        wizard.next();
        assert_eq!(fired.get(), 0);
        wizard.next();
        assert_eq!(fired.get(), 1);
        assert_eq!(wizard.current_index(), 1);
    }

    #[test]
    fn only_successful_results_mark_a_step_done() {
        let mut wizard = SchemeWizard::for_scheme(scheme("credential").unwrap());
        assert_eq!(wizard.progress_label(), "Step 1 of 2: Issuer creates the credential");

        let failed = SubmissionResult::failure("ABC", "tecNO_TARGET", "no such subject");
        assert!(!wizard.record_result(&failed));
        assert!(!wizard.is_step_done(0));

        assert!(wizard.record_result(&SubmissionResult::from_result_code("ABC", "tesSUCCESS")));
        assert!(wizard.is_step_done(0));
        assert!(wizard.progress_label().ends_with('✓'));

        wizard.next();
        assert_eq!(wizard.current_kind(), Some(TransactionKind::CredentialAccept));
        assert!(!wizard.is_step_done(1));
    }

    #[test]
    fn every_scheme_has_steps() {
        for scheme in &SCHEMES {
            assert!(!scheme.steps.is_empty(), "{} has no steps", scheme.name);
        }
        assert!(scheme("unknown").is_none());
    }
}
