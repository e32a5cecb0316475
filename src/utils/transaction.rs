use crate::errors::{Result, SimError};
use crate::models::transfer::{Transfer, TransferBatch};
use log::{debug, info, warn};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    instruction::Instruction,
    signature::Signature,
    system_instruction,
};
use solana_transaction_status::TransactionConfirmationStatus;
use spl_associated_token_account::instruction::create_associated_token_account_idempotent;
use spl_token::instruction as token_instruction;
use std::time::{Duration, Instant};

const CONFIRM_POLL_INTERVAL_MS: u64 = 500;

/// Lowers a batch into instructions: idempotent holding-account creation first,
/// then the transfers in batch order.
pub fn build_batch_instructions(batch: &TransferBatch) -> Result<Vec<Instruction>> {
    let asset = &batch.asset;
    let mut instructions = Vec::with_capacity(batch.holding_accounts.len() + batch.transfers.len());

    for owner in &batch.holding_accounts {
        instructions.push(create_associated_token_account_idempotent(
            &batch.fee_payer,
            owner,
            &asset.mint,
            &spl_token::id(),
        ));
    }

    for transfer in &batch.transfers {
        let instruction = match transfer {
            Transfer::Sol { from, to, lamports } => system_instruction::transfer(from, to, *lamports),
            Transfer::Token {
                from_owner,
                to_owner,
                amount,
            } => token_instruction::transfer_checked(
                &spl_token::id(),
                &asset.holding_account(from_owner),
                &asset.mint,
                &asset.holding_account(to_owner),
                from_owner,
                &[],
                *amount,
                asset.decimals,
            )?,
        };
        instructions.push(instruction);
    }

    debug!("[{}] Built {} instructions", batch.label, instructions.len());
    Ok(instructions)
}

/// Polls signature status until the transaction is confirmed, fails, or `timeout` passes.
pub async fn wait_for_confirmation(
    rpc_client: &RpcClient,
    signature: &Signature,
    timeout: Duration,
    label: &str,
) -> Result<()> {
    let deadline = Instant::now() + timeout;
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        match rpc_client.get_signature_statuses(&[*signature]).await {
            Ok(statuses) => {
                if let Some(Some(status)) = statuses.value.first() {
                    if let Some(err) = &status.err {
                        return Err(SimError::Transaction(format!(
                            "[{}] Transaction {} failed: {}",
                            label, signature, err
                        )));
                    }
                    let landed = matches!(
                        status.confirmation_status,
                        Some(TransactionConfirmationStatus::Confirmed) | Some(TransactionConfirmationStatus::Finalized)
                    );
                    if landed {
                        info!("[{}] Transaction confirmed: {}", label, signature);
                        return Ok(());
                    }
                }
                debug!("[{}] Waiting for {} (attempt {})", label, signature, attempts);
            }
            Err(e) => {
                warn!("[{}] Error fetching signature status for {}: {}. Retrying...", label, signature, e);
            }
        }

        if Instant::now() >= deadline {
            return Err(SimError::Timeout(format!(
                "[{}] Confirmation timeout after {:?} for signature {}",
                label, timeout, signature
            )));
        }
        tokio::time::sleep(Duration::from_millis(CONFIRM_POLL_INTERVAL_MS)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::token::Asset;
    use solana_sdk::pubkey::Pubkey;
    use solana_sdk::system_program;

    #[test]
    fn holding_accounts_come_before_transfers() {
        let asset = Asset::new(Pubkey::new_unique(), 6);
        let buyer = Pubkey::new_unique();
        let seller = Pubkey::new_unique();
        let child = Pubkey::new_unique();

        let mut batch = TransferBatch::new("purchase", asset, buyer);
        batch.open_holding_account(buyer);
        batch.open_holding_account(child);
        batch.push_sol(buyer, seller, 5_000_000);
        batch.push_token(seller, buyer, 50);
        batch.push_token(buyer, child, 25);

        let instructions = build_batch_instructions(&batch).unwrap();
        assert_eq!(instructions.len(), 5);
        assert_eq!(instructions[0].program_id, spl_associated_token_account::id());
        assert_eq!(instructions[1].program_id, spl_associated_token_account::id());
        assert_eq!(instructions[2].program_id, system_program::id());
        assert_eq!(instructions[3].program_id, spl_token::id());

        // transfer_checked accounts: source, mint, destination, authority
        let child_leg = &instructions[4];
        assert_eq!(child_leg.accounts[0].pubkey, asset.holding_account(&buyer));
        assert_eq!(child_leg.accounts[1].pubkey, asset.mint);
        assert_eq!(child_leg.accounts[2].pubkey, asset.holding_account(&child));
        assert_eq!(child_leg.accounts[3].pubkey, buyer);
        assert!(child_leg.accounts[3].is_signer);

        match token_instruction::TokenInstruction::unpack(&child_leg.data).unwrap() {
            token_instruction::TokenInstruction::TransferChecked { amount, decimals } => {
                assert_eq!((amount, decimals), (25, 6));
            }
            other => panic!("unexpected token instruction {:?}", other),
        }
    }
}
