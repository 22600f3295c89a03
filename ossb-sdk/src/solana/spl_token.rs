//! SPL Token and Associated Token Account instructions.
//!
//! Only the two instructions a donation needs are implemented: the legacy
//! `Transfer` of the token program and the `Create` of the associated token
//! account program.

use super::error::SolError;
use super::pubkey::Pubkey;
use super::transaction::{AccountMeta, Instruction};

/// SPL Token Program: `TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA`
pub const TOKEN_PROGRAM_ID: Pubkey = Pubkey::new_from_array([
    0x06, 0xdd, 0xf6, 0xe1, 0xd7, 0x65, 0xa1, 0x93, 0xd9, 0xcb, 0xe1, 0x46, 0xce, 0xeb, 0x79, 0xac,
    0x1c, 0xb4, 0x85, 0xed, 0x5f, 0x5b, 0x37, 0x91, 0x3a, 0x8c, 0xf5, 0x85, 0x7e, 0xff, 0x00, 0xa9,
]);

/// Associated Token Account Program: `ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL`
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey = Pubkey::new_from_array([
    0x8c, 0x97, 0x25, 0x8f, 0x4e, 0x24, 0x89, 0xf1, 0xbb, 0x3d, 0x10, 0x29, 0x14, 0x8e, 0x0d, 0x83,
    0x0b, 0x5a, 0x13, 0x99, 0xda, 0xff, 0x10, 0x84, 0x04, 0x8e, 0x7b, 0xd8, 0xdb, 0xe9, 0xf8, 0x59,
]);

/// System Program: 32 zero bytes.
pub const SYSTEM_PROGRAM_ID: Pubkey = Pubkey::new_from_array([0u8; 32]);

/// Token program instruction tag for `Transfer`.
const TRANSFER_TAG: u8 = 3;

/// Derive the associated token account of `wallet` for `mint`.
///
/// Seeds are `[wallet, token_program_id, mint]` under the associated token
/// account program. The wallet is allowed to be off-curve (a PDA owner),
/// so no curve check is applied to it.
pub fn get_associated_token_address(wallet: &Pubkey, mint: &Pubkey) -> Result<Pubkey, SolError> {
    Pubkey::find_program_address(
        &[
            wallet.as_bytes(),
            TOKEN_PROGRAM_ID.as_bytes(),
            mint.as_bytes(),
        ],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
    .map(|(address, _bump)| address)
}

/// Build the associated token account program `Create` instruction.
///
/// Account order: payer, associated account, owner, mint, system program,
/// token program. The instruction data is empty.
pub fn create_associated_token_account(
    payer: &Pubkey,
    associated_account: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: ASSOCIATED_TOKEN_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(*associated_account, false),
            AccountMeta::new_readonly(*owner, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ],
        data: Vec::new(),
    }
}

/// Build an SPL Token `Transfer` of `amount` base units.
///
/// Wire format: tag `3` followed by the amount as u64 little-endian.
pub fn transfer(
    source: &Pubkey,
    destination: &Pubkey,
    authority: &Pubkey,
    amount: u64,
) -> Result<Instruction, SolError> {
    if amount == 0 {
        return Err(SolError::TransactionBuildError(
            "SPL transfer amount must be > 0".into(),
        ));
    }

    let mut data = Vec::with_capacity(9);
    data.push(TRANSFER_TAG);
    data.extend_from_slice(&amount.to_le_bytes());

    Ok(Instruction {
        program_id: TOKEN_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*source, false),
            AccountMeta::new(*destination, false),
            AccountMeta::new_readonly(*authority, true),
        ],
        data,
    })
}
