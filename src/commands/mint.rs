use crate::allocation::quantity::to_smallest_units;
use crate::errors::Result;
use crate::ledger::Ledger;
use crate::models::token::{Asset, Issuance};
use log::info;
use solana_sdk::instruction::Instruction;
use solana_sdk::program_pack::Pack;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::system_instruction;
use spl_associated_token_account::instruction::create_associated_token_account_idempotent;
use spl_token::instruction as token_instruction;
use spl_token::state::Mint;

/// Instructions that create `mint`, make `authority` its mint authority (no
/// freeze authority), open the authority's holding account and credit it with
/// `supply` smallest units.
pub fn build_issuance_instructions(
    authority: &Pubkey,
    mint: &Pubkey,
    rent_lamports: u64,
    decimals: u8,
    supply: u64,
) -> Result<Vec<Instruction>> {
    let holding_account = spl_associated_token_account::get_associated_token_address(authority, mint);
    Ok(vec![
        system_instruction::create_account(authority, mint, rent_lamports, Mint::LEN as u64, &spl_token::id()),
        token_instruction::initialize_mint(&spl_token::id(), mint, authority, None, decimals)?,
        create_associated_token_account_idempotent(authority, authority, mint, &spl_token::id()),
        token_instruction::mint_to(&spl_token::id(), mint, &holding_account, authority, &[], supply)?,
    ])
}

/// Creates a new fungible asset with `seller` as mint authority and credits
/// `supply_tokens` whole tokens to the seller, in one batch.
pub async fn issue_asset<L: Ledger>(
    ledger: &L,
    seller: &Keypair,
    decimals: u8,
    supply_tokens: u64,
) -> Result<Issuance> {
    let supply = to_smallest_units(supply_tokens, decimals)?;
    let mint_keypair = Keypair::new();
    let asset = Asset::new(mint_keypair.pubkey(), decimals);
    let seller_pubkey = seller.pubkey();

    info!(
        "Creating mint {} ({} decimals) with {} as authority",
        asset.mint, decimals, seller_pubkey
    );
    let rent = ledger.minimum_balance_for_rent_exemption(Mint::LEN).await?;
    let instructions = build_issuance_instructions(&seller_pubkey, &asset.mint, rent, decimals, supply)?;

    let signature = ledger
        .submit_batch("issuance", &instructions, &seller_pubkey, &[seller, &mint_keypair])
        .await?;
    info!("Minted {} units to {}: {}", supply, asset.holding_account(&seller_pubkey), signature);

    Ok(Issuance {
        asset,
        supply,
        signature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use spl_token::instruction::TokenInstruction;

    #[test]
    fn issuance_creates_then_initialises_then_mints() {
        let authority = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let instructions = build_issuance_instructions(&authority, &mint, 1_461_600, 9, 10_000_000_000).unwrap();

        assert_eq!(instructions.len(), 4);
        assert_eq!(instructions[0].program_id, solana_sdk::system_program::id());
        assert_eq!(instructions[2].program_id, spl_associated_token_account::id());

        match TokenInstruction::unpack(&instructions[1].data).unwrap() {
            TokenInstruction::InitializeMint { decimals, mint_authority, freeze_authority } => {
                assert_eq!(decimals, 9);
                assert_eq!(mint_authority, authority);
                assert!(freeze_authority.is_none());
            }
            other => panic!("unexpected instruction {:?}", other),
        }
        match TokenInstruction::unpack(&instructions[3].data).unwrap() {
            TokenInstruction::MintTo { amount } => assert_eq!(amount, 10_000_000_000),
            other => panic!("unexpected instruction {:?}", other),
        }
    }
}
