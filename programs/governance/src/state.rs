use anchor_lang::prelude::*;

use crate::errors::GovernanceError;

pub const GOVERNANCE_SEED: &[u8] = b"governance";
pub const TRANSACTION_SEED: &[u8] = b"transaction";

#[account]
pub struct GovernanceState {
    pub authority: Pubkey,
    pub required_approvals: u8,
    pub cooldown_period: i64, // in seconds
    pub next_transaction_id: u64,
    pub token_program: Pubkey,
    pub token_program_set: bool,
    pub presale_program: Pubkey,
    pub presale_program_set: bool,
    pub bump: u8,
    pub signers: Vec<Pubkey>, // Authorized signers (max 10)
}

impl GovernanceState {
    // fields + vec prefix + max 10 signers
    pub const LEN: usize = 32 + 1 + 8 + 8 + 32 + 1 + 32 + 1 + 1 + 4 + (32 * Self::MAX_SIGNERS);
    pub const MIN_REQUIRED_APPROVALS: u8 = 2;
    pub const MIN_COOLDOWN_SECONDS: i64 = 1800; // 30 minutes
    pub const MAX_COOLDOWN_SECONDS: i64 = 2_592_000; // 30 days
    pub const MAX_SIGNERS: usize = 10;

    pub fn validate_config(required_approvals: u8, cooldown_period: i64, signers: &[Pubkey]) -> Result<()> {
        require!(
            required_approvals >= Self::MIN_REQUIRED_APPROVALS,
            GovernanceError::RequiredApprovalsTooLow
        );
        Self::validate_cooldown(cooldown_period)?;
        require!(
            signers.len() <= Self::MAX_SIGNERS,
            GovernanceError::TooManySigners
        );
        require!(
            required_approvals as usize <= signers.len(),
            GovernanceError::RequiredApprovalsTooHigh
        );
        for (i, signer) in signers.iter().enumerate() {
            require_keys_neq!(*signer, Pubkey::default(), GovernanceError::ZeroOrDefaultAddress);
            require!(
                !signers[..i].contains(signer),
                GovernanceError::DuplicateSigners
            );
        }
        Ok(())
    }

    pub fn validate_cooldown(period: i64) -> Result<()> {
        require!(
            period >= Self::MIN_COOLDOWN_SECONDS,
            GovernanceError::CooldownPeriodTooLow
        );
        require!(
            period <= Self::MAX_COOLDOWN_SECONDS,
            GovernanceError::CooldownPeriodTooHigh
        );
        Ok(())
    }

    pub fn is_authorized_signer(&self, signer: &Pubkey) -> bool {
        self.signers.contains(signer)
    }

    pub fn can_queue(&self, caller: &Pubkey) -> bool {
        self.authority == *caller || self.is_authorized_signer(caller)
    }

    /// Hands out the next transaction id.
    pub fn take_transaction_id(&mut self) -> Result<u64> {
        let id = self.next_transaction_id;
        self.next_transaction_id = id
            .checked_add(1)
            .ok_or(GovernanceError::ArithmeticOverflow)?;
        Ok(id)
    }

    pub fn add_signer(&mut self, signer: Pubkey) -> Result<()> {
        require_keys_neq!(signer, Pubkey::default(), GovernanceError::ZeroOrDefaultAddress);
        require!(
            !self.is_authorized_signer(&signer),
            GovernanceError::DuplicateSigners
        );
        require!(
            self.signers.len() < Self::MAX_SIGNERS,
            GovernanceError::TooManySigners
        );
        self.signers.push(signer);
        Ok(())
    }

    /// Refuses to leave fewer signers than the quorum needs.
    pub fn remove_signer(&mut self, signer: &Pubkey) -> Result<()> {
        let index = self
            .signers
            .iter()
            .position(|s| s == signer)
            .ok_or(GovernanceError::NotAuthorizedSigner)?;
        require!(
            self.signers.len() - 1 >= self.required_approvals as usize,
            GovernanceError::RequiredApprovalsTooHigh
        );
        self.signers.remove(index);
        Ok(())
    }

    pub fn set_required_approvals(&mut self, required: u8) -> Result<()> {
        require!(
            required >= Self::MIN_REQUIRED_APPROVALS,
            GovernanceError::RequiredApprovalsTooLow
        );
        require!(
            required as usize <= self.signers.len(),
            GovernanceError::RequiredApprovalsTooHigh
        );
        self.required_approvals = required;
        Ok(())
    }

    pub fn set_cooldown_period(&mut self, period: i64) -> Result<()> {
        Self::validate_cooldown(period)?;
        self.cooldown_period = period;
        Ok(())
    }

    /// Applies a governance-config action once it has passed quorum and
    /// cooldown. The signer set only changes through here.
    pub fn apply_config_action(&mut self, action: &GovernanceAction) -> Result<()> {
        match *action {
            GovernanceAction::SetRequiredApprovals { required } => self.set_required_approvals(required),
            GovernanceAction::SetCooldownPeriod { period } => self.set_cooldown_period(period),
            GovernanceAction::AddSigner { signer } => self.add_signer(signer),
            GovernanceAction::RemoveSigner { signer } => self.remove_signer(&signer),
            _ => err!(GovernanceError::InvalidActionPayload),
        }
    }

    /// Votes from accounts that have since been revoked do not count.
    fn count_current(&self, voters: &[Pubkey]) -> usize {
        voters
            .iter()
            .filter(|voter| self.is_authorized_signer(voter))
            .count()
    }
}

/// Which program an action lands in when executed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ActionTarget {
    TokenControl,
    Presale,
    Governance,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum GovernanceAction {
    Unpause,
    SetBlacklist { account: Pubkey, value: bool },
    SetNoSellLimit { account: Pubkey, value: bool },
    SetRestricted { account: Pubkey, value: bool },
    SetLiquidityPool { pool: Pubkey, value: bool },
    SetSellLimit { percent: u8, period: u64 },
    SetBridgeAddress { address: Pubkey },
    SetBondAddress { address: Pubkey },
    MintTokens { amount: u64 },
    SetTreasuryAddress { address: Pubkey },
    WithdrawToTreasury { amount: u64 },
    WithdrawSolToTreasury { amount: u64 },
    UpdatePresaleLimits { max_presale_cap: Option<u64>, max_per_user: Option<u64> },
    StartPresale,
    PausePresale,
    StopPresale,
    SetTokenPriceUsd { price_micro: u64 },
    AllowPaymentToken { mint: Pubkey },
    DisallowPaymentToken { mint: Pubkey },
    WithdrawUnsoldTokens { amount: u64 },
    MigratePresaleState { tokens_per_sol: u64 },
    SetRequiredApprovals { required: u8 },
    SetCooldownPeriod { period: i64 },
    AddSigner { signer: Pubkey },
    RemoveSigner { signer: Pubkey },
}

impl GovernanceAction {
    // tag + largest payload (Pubkey + bool)
    pub const MAX_LEN: usize = 1 + 33;

    pub fn target(&self) -> ActionTarget {
        use GovernanceAction::*;
        match self {
            Unpause
            | SetBlacklist { .. }
            | SetNoSellLimit { .. }
            | SetRestricted { .. }
            | SetLiquidityPool { .. }
            | SetSellLimit { .. }
            | SetBridgeAddress { .. }
            | SetBondAddress { .. }
            | MintTokens { .. } => ActionTarget::TokenControl,
            SetTreasuryAddress { .. }
            | WithdrawToTreasury { .. }
            | WithdrawSolToTreasury { .. }
            | UpdatePresaleLimits { .. }
            | StartPresale
            | PausePresale
            | StopPresale
            | SetTokenPriceUsd { .. }
            | AllowPaymentToken { .. }
            | DisallowPaymentToken { .. }
            | WithdrawUnsoldTokens { .. }
            | MigratePresaleState { .. } => ActionTarget::Presale,
            SetRequiredApprovals { .. }
            | SetCooldownPeriod { .. }
            | AddSigner { .. }
            | RemoveSigner { .. } => ActionTarget::Governance,
        }
    }

    /// Payload checks that do not depend on the target program's state.
    /// Governance-config actions are re-checked against the signer set when
    /// they execute.
    pub fn validate(&self, governance: &GovernanceState) -> Result<()> {
        use GovernanceAction::*;
        match *self {
            Unpause | StartPresale | PausePresale | StopPresale | MigratePresaleState { .. } => {}
            SetBlacklist { account, .. }
            | SetNoSellLimit { account, .. }
            | SetRestricted { account, .. } => {
                require_keys_neq!(account, Pubkey::default(), GovernanceError::ZeroOrDefaultAddress);
            }
            SetLiquidityPool { pool, .. } => {
                require_keys_neq!(pool, Pubkey::default(), GovernanceError::ZeroOrDefaultAddress);
            }
            SetSellLimit { percent, period } => {
                require!(
                    (1..=100).contains(&percent) && period > 0,
                    GovernanceError::InvalidActionPayload
                );
            }
            SetBridgeAddress { address }
            | SetBondAddress { address }
            | SetTreasuryAddress { address }
            | AllowPaymentToken { mint: address }
            | DisallowPaymentToken { mint: address } => {
                require_keys_neq!(address, Pubkey::default(), GovernanceError::ZeroOrDefaultAddress);
            }
            MintTokens { amount }
            | WithdrawToTreasury { amount }
            | WithdrawSolToTreasury { amount }
            | WithdrawUnsoldTokens { amount }
            | SetTokenPriceUsd { price_micro: amount } => {
                require!(amount > 0, GovernanceError::InvalidActionPayload);
            }
            UpdatePresaleLimits {
                max_presale_cap,
                max_per_user,
            } => {
                require!(
                    max_presale_cap.is_some() || max_per_user.is_some(),
                    GovernanceError::InvalidActionPayload
                );
            }
            SetRequiredApprovals { required } => {
                require!(
                    required >= GovernanceState::MIN_REQUIRED_APPROVALS,
                    GovernanceError::RequiredApprovalsTooLow
                );
                require!(
                    required as usize <= governance.signers.len(),
                    GovernanceError::RequiredApprovalsTooHigh
                );
            }
            SetCooldownPeriod { period } => GovernanceState::validate_cooldown(period)?,
            AddSigner { .. } | RemoveSigner { .. } => {
                governance.clone().apply_config_action(self)?;
            }
        }
        Ok(())
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum TransactionStatus {
    Pending,
    Rejected,
    Executed,
}

#[account]
#[derive(Debug)]
pub struct Transaction {
    pub id: u64,
    pub action: GovernanceAction,
    pub status: TransactionStatus,
    pub initiator: Pubkey,
    pub queued_at: i64,
    pub execute_after: i64, // queued_at + cooldown at queue time
    pub approvals: Vec<Pubkey>,
    pub rejections: Vec<Pubkey>,
    pub rejection_reason: String,
    pub rejector: Pubkey,
    pub executed_by: Pubkey,
}

impl Transaction {
    pub const MAX_REASON_LEN: usize = 256;
    pub const MAX_LEN: usize = 8
        + GovernanceAction::MAX_LEN
        + 1
        + 32
        + 8
        + 8
        + 4
        + (32 * GovernanceState::MAX_SIGNERS)
        + 4
        + (32 * GovernanceState::MAX_SIGNERS)
        + 4
        + Self::MAX_REASON_LEN
        + 32
        + 32;

    pub fn new(
        id: u64,
        action: GovernanceAction,
        initiator: Pubkey,
        now: i64,
        cooldown_period: i64,
    ) -> Result<Self> {
        let execute_after = now
            .checked_add(cooldown_period)
            .ok_or(GovernanceError::ArithmeticOverflow)?;
        Ok(Self {
            id,
            action,
            status: TransactionStatus::Pending,
            initiator,
            queued_at: now,
            execute_after,
            approvals: vec![],
            rejections: vec![],
            rejection_reason: String::new(),
            rejector: Pubkey::default(),
            executed_by: Pubkey::default(),
        })
    }

    /// Reads a queued transaction. A PDA that was never queued, or that
    /// holds a different id, is `TransactionNotFound`.
    pub fn load(info: &AccountInfo, tx_id: u64) -> Result<Self> {
        require!(
            info.owner == &crate::ID && !info.data_is_empty(),
            GovernanceError::TransactionNotFound
        );
        let data = info.try_borrow_data()?;
        let transaction = Transaction::try_deserialize(&mut &data[..])
            .map_err(|_| error!(GovernanceError::TransactionNotFound))?;
        require!(transaction.id == tx_id, GovernanceError::TransactionNotFound);
        Ok(transaction)
    }

    pub fn store(&self, info: &AccountInfo) -> Result<()> {
        let mut data = info.try_borrow_mut_data()?;
        let mut writer: &mut [u8] = &mut data[..];
        self.try_serialize(&mut writer)
    }

    fn ensure_pending(&self) -> Result<()> {
        match self.status {
            TransactionStatus::Pending => Ok(()),
            TransactionStatus::Executed => err!(GovernanceError::AlreadyExecuted),
            TransactionStatus::Rejected => err!(GovernanceError::AlreadyFinalized),
        }
    }

    fn ensure_can_vote(&self, governance: &GovernanceState, voter: &Pubkey) -> Result<()> {
        self.ensure_pending()?;
        require!(
            governance.is_authorized_signer(voter),
            GovernanceError::NotAuthorizedSigner
        );
        require!(
            !self.approvals.contains(voter) && !self.rejections.contains(voter),
            GovernanceError::DuplicateVote
        );
        Ok(())
    }

    pub fn approve(&mut self, governance: &GovernanceState, voter: Pubkey) -> Result<()> {
        self.ensure_can_vote(governance, &voter)?;
        self.approvals.push(voter);
        Ok(())
    }

    pub fn current_approvals(&self, governance: &GovernanceState) -> usize {
        governance.count_current(&self.approvals)
    }

    /// Records a rejection. Returns true once enough signers have rejected
    /// that quorum is out of reach, which makes the rejection final.
    pub fn reject(&mut self, governance: &GovernanceState, voter: Pubkey, reason: String) -> Result<bool> {
        self.ensure_can_vote(governance, &voter)?;
        require!(!reason.is_empty(), GovernanceError::EmptyRejectionReason);
        require!(
            reason.len() <= Self::MAX_REASON_LEN,
            GovernanceError::RejectionReasonTooLong
        );

        self.rejections.push(voter);
        self.rejection_reason = reason;
        self.rejector = voter;

        let still_able_to_approve = governance
            .signers
            .len()
            .saturating_sub(governance.count_current(&self.rejections));
        let finalized = still_able_to_approve < governance.required_approvals as usize;
        if finalized {
            self.status = TransactionStatus::Rejected;
        }
        Ok(finalized)
    }

    /// Compare-and-set `Pending -> Executed`. The caller applies the
    /// returned action afterwards; a second attempt sees `AlreadyExecuted`.
    pub fn begin_execution(
        &mut self,
        governance: &GovernanceState,
        executor: Pubkey,
        now: i64,
    ) -> Result<GovernanceAction> {
        self.ensure_pending()?;
        require!(now >= self.execute_after, GovernanceError::CooldownNotElapsed);
        require!(
            self.current_approvals(governance) >= governance.required_approvals as usize,
            GovernanceError::InsufficientApprovals
        );

        self.status = TransactionStatus::Executed;
        self.executed_by = executor;
        Ok(self.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: i64 = 1_700_000_000;

    fn governance(signers: &[Pubkey], required: u8, cooldown: i64) -> GovernanceState {
        GovernanceState {
            authority: Pubkey::new_unique(),
            required_approvals: required,
            cooldown_period: cooldown,
            next_transaction_id: 1,
            token_program: token_control::ID,
            token_program_set: true,
            presale_program: presale::ID,
            presale_program_set: true,
            bump: 255,
            signers: signers.to_vec(),
        }
    }

    fn three_signers() -> [Pubkey; 3] {
        [Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique()]
    }

    #[test]
    fn config_validation() {
        let [a, b, c] = three_signers();
        assert!(GovernanceState::validate_config(2, 1800, &[a, b, c]).is_ok());

        let cases: [(u8, i64, Vec<Pubkey>, GovernanceError); 6] = [
            (1, 1800, vec![a, b, c], GovernanceError::RequiredApprovalsTooLow),
            (2, 1799, vec![a, b, c], GovernanceError::CooldownPeriodTooLow),
            (2, 2_592_001, vec![a, b, c], GovernanceError::CooldownPeriodTooHigh),
            (4, 1800, vec![a, b, c], GovernanceError::RequiredApprovalsTooHigh),
            (2, 1800, vec![a, b, a], GovernanceError::DuplicateSigners),
            (
                2,
                1800,
                (0..11).map(|_| Pubkey::new_unique()).collect(),
                GovernanceError::TooManySigners,
            ),
        ];
        for (required, cooldown, signers, expected) in cases {
            let err = GovernanceState::validate_config(required, cooldown, &signers).unwrap_err();
            assert_eq!(err, expected.into());
        }
    }

    #[test]
    fn treasury_change_waits_for_cooldown_then_executes_once() {
        let [a, b, c] = three_signers();
        let gov = governance(&[a, b, c], 2, 1800);
        let treasury = Pubkey::new_unique();
        let mut tx = Transaction::new(
            1,
            GovernanceAction::SetTreasuryAddress { address: treasury },
            a,
            T0,
            gov.cooldown_period,
        )
        .unwrap();

        tx.approve(&gov, a).unwrap();
        tx.approve(&gov, b).unwrap();

        let err = tx.begin_execution(&gov, c, T0 + 100).unwrap_err();
        assert_eq!(err, GovernanceError::CooldownNotElapsed.into());
        assert_eq!(tx.status, TransactionStatus::Pending);

        let action = tx.begin_execution(&gov, c, T0 + 1801).unwrap();
        assert_eq!(action, GovernanceAction::SetTreasuryAddress { address: treasury });
        assert_eq!(tx.status, TransactionStatus::Executed);
        assert_eq!(tx.executed_by, c);

        // Losing racer
        let err = tx.begin_execution(&gov, a, T0 + 1802).unwrap_err();
        assert_eq!(err, GovernanceError::AlreadyExecuted.into());
    }

    #[test]
    fn execution_needs_quorum() {
        let [a, b, c] = three_signers();
        let gov = governance(&[a, b, c], 2, 1800);
        let mut tx = Transaction::new(1, GovernanceAction::Unpause, a, T0, 1800).unwrap();
        tx.approve(&gov, a).unwrap();

        let err = tx.begin_execution(&gov, a, T0 + 5000).unwrap_err();
        assert_eq!(err, GovernanceError::InsufficientApprovals.into());
    }

    #[test]
    fn cooldown_is_fixed_at_queue_time() {
        let [a, b, c] = three_signers();
        let mut gov = governance(&[a, b, c], 2, 1800);
        let mut tx = Transaction::new(1, GovernanceAction::Unpause, a, T0, gov.cooldown_period).unwrap();
        gov.set_cooldown_period(86_400).unwrap();

        tx.approve(&gov, a).unwrap();
        tx.approve(&gov, b).unwrap();
        assert!(tx.begin_execution(&gov, a, T0 + 1800).is_ok());
    }

    #[test]
    fn one_vote_per_signer_across_approve_and_reject() {
        let [a, b, c] = three_signers();
        let gov = governance(&[a, b, c], 2, 1800);
        let mut tx = Transaction::new(1, GovernanceAction::Unpause, a, T0, 1800).unwrap();

        tx.approve(&gov, a).unwrap();
        assert_eq!(
            tx.approve(&gov, a).unwrap_err(),
            GovernanceError::DuplicateVote.into()
        );
        assert_eq!(
            tx.reject(&gov, a, "changed my mind".to_string()).unwrap_err(),
            GovernanceError::DuplicateVote.into()
        );

        let outsider = Pubkey::new_unique();
        assert_eq!(
            tx.approve(&gov, outsider).unwrap_err(),
            GovernanceError::NotAuthorizedSigner.into()
        );
        assert_eq!(tx.approvals, vec![a]);
    }

    #[test]
    fn rejection_becomes_final_when_quorum_is_unreachable() {
        let [a, b, c] = three_signers();
        let gov = governance(&[a, b, c], 2, 1800);
        let mut tx = Transaction::new(1, GovernanceAction::Unpause, a, T0, 1800).unwrap();

        // 3 signers, quorum 2: one rejection still leaves 2 possible approvers
        assert!(!tx.reject(&gov, a, "too early".to_string()).unwrap());
        assert_eq!(tx.status, TransactionStatus::Pending);

        assert!(tx.reject(&gov, b, "agreed".to_string()).unwrap());
        assert_eq!(tx.status, TransactionStatus::Rejected);
        assert_eq!(tx.rejector, b);

        assert_eq!(
            tx.approve(&gov, c).unwrap_err(),
            GovernanceError::AlreadyFinalized.into()
        );
        assert_eq!(
            tx.begin_execution(&gov, c, T0 + 10_000).unwrap_err(),
            GovernanceError::AlreadyFinalized.into()
        );
    }

    #[test]
    fn rejection_reason_bounds() {
        let [a, b, c] = three_signers();
        let gov = governance(&[a, b, c], 2, 1800);
        let mut tx = Transaction::new(1, GovernanceAction::Unpause, a, T0, 1800).unwrap();

        assert_eq!(
            tx.reject(&gov, a, String::new()).unwrap_err(),
            GovernanceError::EmptyRejectionReason.into()
        );
        assert_eq!(
            tx.reject(&gov, a, "x".repeat(257)).unwrap_err(),
            GovernanceError::RejectionReasonTooLong.into()
        );
        assert!(tx.rejections.is_empty());
    }

    #[test]
    fn revoked_signers_approvals_stop_counting() {
        let [a, b, c] = three_signers();
        let mut gov = governance(&[a, b, c], 2, 1800);
        let mut tx = Transaction::new(1, GovernanceAction::Unpause, a, T0, 1800).unwrap();
        tx.approve(&gov, a).unwrap();
        tx.approve(&gov, b).unwrap();

        gov.remove_signer(&b).unwrap();
        assert_eq!(tx.current_approvals(&gov), 1);
        assert_eq!(
            tx.begin_execution(&gov, a, T0 + 1800).unwrap_err(),
            GovernanceError::InsufficientApprovals.into()
        );
    }

    #[test]
    fn revoke_below_quorum_fails() {
        let [a, b, c] = three_signers();
        let mut gov = governance(&[a, b, c], 3, 1800);
        assert_eq!(
            gov.remove_signer(&a).unwrap_err(),
            GovernanceError::RequiredApprovalsTooHigh.into()
        );
        assert_eq!(gov.signers.len(), 3);

        gov.required_approvals = 2;
        gov.remove_signer(&a).unwrap();
        assert_eq!(gov.signers, vec![b, c]);
        assert_eq!(
            gov.remove_signer(&a).unwrap_err(),
            GovernanceError::NotAuthorizedSigner.into()
        );
    }

    #[test]
    fn signer_set_stays_unique_and_bounded() {
        let [a, b, c] = three_signers();
        let mut gov = governance(&[a, b, c], 2, 1800);
        assert_eq!(
            gov.add_signer(a).unwrap_err(),
            GovernanceError::DuplicateSigners.into()
        );
        for _ in 0..7 {
            gov.add_signer(Pubkey::new_unique()).unwrap();
        }
        assert_eq!(gov.signers.len(), GovernanceState::MAX_SIGNERS);
        assert_eq!(
            gov.add_signer(Pubkey::new_unique()).unwrap_err(),
            GovernanceError::TooManySigners.into()
        );
    }

    #[test]
    fn transaction_ids_are_monotonic() {
        let mut gov = governance(&three_signers(), 2, 1800);
        assert_eq!(gov.take_transaction_id().unwrap(), 1);
        assert_eq!(gov.take_transaction_id().unwrap(), 2);
        assert_eq!(gov.next_transaction_id, 3);
    }

    #[test]
    fn action_payloads_are_checked() {
        let gov = governance(&three_signers(), 2, 1800);
        assert!(GovernanceAction::Unpause.validate(&gov).is_ok());
        assert_eq!(
            GovernanceAction::SetTreasuryAddress {
                address: Pubkey::default()
            }
            .validate(&gov)
            .unwrap_err(),
            GovernanceError::ZeroOrDefaultAddress.into()
        );
        assert_eq!(
            GovernanceAction::SetSellLimit { percent: 0, period: 10 }
                .validate(&gov)
                .unwrap_err(),
            GovernanceError::InvalidActionPayload.into()
        );
        assert_eq!(
            GovernanceAction::SetRequiredApprovals { required: 4 }
                .validate(&gov)
                .unwrap_err(),
            GovernanceError::RequiredApprovalsTooHigh.into()
        );
        assert_eq!(
            GovernanceAction::MintTokens { amount: 0 }
                .validate(&gov)
                .unwrap_err(),
            GovernanceError::InvalidActionPayload.into()
        );
        assert_eq!(
            GovernanceAction::WithdrawToTreasury { amount: 1 }.target(),
            ActionTarget::Presale
        );
    }

    #[test]
    fn authority_cannot_change_signers_without_quorum() {
        let [a, b, c] = three_signers();
        let mut gov = governance(&[a, b, c], 2, 1800);
        let authority = gov.authority;
        let newcomer = Pubkey::new_unique();

        let action = GovernanceAction::AddSigner { signer: newcomer };
        assert!(gov.can_queue(&authority));
        action.validate(&gov).unwrap();
        let mut tx = Transaction::new(1, action, authority, T0, gov.cooldown_period).unwrap();
        assert_eq!(gov.signers.len(), 3);

        // Neither the authority nor the key being added has a vote
        for outsider in [authority, newcomer] {
            assert_eq!(
                tx.approve(&gov, outsider).unwrap_err(),
                GovernanceError::NotAuthorizedSigner.into()
            );
        }
        tx.approve(&gov, a).unwrap();
        assert_eq!(
            tx.begin_execution(&gov, authority, T0 + 1800).unwrap_err(),
            GovernanceError::InsufficientApprovals.into()
        );

        tx.approve(&gov, b).unwrap();
        let approved = tx.begin_execution(&gov, authority, T0 + 1800).unwrap();
        gov.apply_config_action(&approved).unwrap();
        assert_eq!(gov.signers, vec![a, b, c, newcomer]);
    }

    #[test]
    fn signer_changes_are_checked_when_queued() {
        let [a, b, c] = three_signers();
        let gov = governance(&[a, b, c], 3, 1800);
        let cases = [
            (GovernanceAction::AddSigner { signer: a }, GovernanceError::DuplicateSigners),
            (
                GovernanceAction::AddSigner { signer: Pubkey::default() },
                GovernanceError::ZeroOrDefaultAddress,
            ),
            (GovernanceAction::RemoveSigner { signer: a }, GovernanceError::RequiredApprovalsTooHigh),
            (
                GovernanceAction::RemoveSigner { signer: Pubkey::new_unique() },
                GovernanceError::NotAuthorizedSigner,
            ),
        ];
        for (action, expected) in cases {
            assert_eq!(action.target(), ActionTarget::Governance);
            assert_eq!(action.validate(&gov).unwrap_err(), expected.into());
        }
        assert_eq!(gov.signers, vec![a, b, c]);

        let mut gov = governance(&[a, b, c], 2, 1800);
        let removal = GovernanceAction::RemoveSigner { signer: c };
        removal.validate(&gov).unwrap();
        assert_eq!(gov.signers.len(), 3);
        gov.apply_config_action(&removal).unwrap();
        assert_eq!(gov.signers, vec![a, b]);

        assert_eq!(
            gov.apply_config_action(&GovernanceAction::Unpause).unwrap_err(),
            GovernanceError::InvalidActionPayload.into()
        );
    }

    #[test]
    fn presale_control_actions_route_to_presale() {
        let gov = governance(&three_signers(), 2, 1800);
        for action in [
            GovernanceAction::StartPresale,
            GovernanceAction::PausePresale,
            GovernanceAction::StopPresale,
            GovernanceAction::WithdrawUnsoldTokens { amount: 10 },
            GovernanceAction::SetTokenPriceUsd { price_micro: 5_000 },
            GovernanceAction::AllowPaymentToken { mint: Pubkey::new_unique() },
            GovernanceAction::DisallowPaymentToken { mint: Pubkey::new_unique() },
            GovernanceAction::MigratePresaleState { tokens_per_sol: 0 },
        ] {
            assert_eq!(action.target(), ActionTarget::Presale);
            assert!(action.validate(&gov).is_ok());
        }
        assert_eq!(
            GovernanceAction::SetTokenPriceUsd { price_micro: 0 }
                .validate(&gov)
                .unwrap_err(),
            GovernanceError::InvalidActionPayload.into()
        );
        assert_eq!(
            GovernanceAction::WithdrawUnsoldTokens { amount: 0 }
                .validate(&gov)
                .unwrap_err(),
            GovernanceError::InvalidActionPayload.into()
        );
        assert_eq!(
            GovernanceAction::AllowPaymentToken { mint: Pubkey::default() }
                .validate(&gov)
                .unwrap_err(),
            GovernanceError::ZeroOrDefaultAddress.into()
        );
    }

    #[test]
    fn unknown_transaction_ids_are_not_found() {
        let [a, _, _] = three_signers();
        let key = Pubkey::new_unique();

        // PDA that was never queued
        let system_owner = Pubkey::default();
        let mut lamports = 0u64;
        let mut data: Vec<u8> = vec![];
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &system_owner, false, 0);
        assert_eq!(
            Transaction::load(&info, 7).unwrap_err(),
            GovernanceError::TransactionNotFound.into()
        );

        let owner = crate::ID;
        let mut lamports = 0u64;
        let mut data = vec![0u8; 8 + Transaction::MAX_LEN];
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &owner, false, 0);
        let mut tx = Transaction::new(7, GovernanceAction::StopPresale, a, T0, 1800).unwrap();
        tx.approvals.push(a);
        tx.store(&info).unwrap();

        let loaded = Transaction::load(&info, 7).unwrap();
        assert_eq!(loaded.action, GovernanceAction::StopPresale);
        assert_eq!(loaded.approvals, vec![a]);
        assert_eq!(
            Transaction::load(&info, 8).unwrap_err(),
            GovernanceError::TransactionNotFound.into()
        );
    }
}
