//! Legacy Solana messages and their wire format.
//!
//! ```text
//! Transaction:
//!   num_signatures          compact-u16
//!   signatures              64 bytes * num_signatures
//!   message:
//!     num_required_sigs     u8
//!     num_readonly_signed   u8
//!     num_readonly_unsigned u8
//!     num_accounts          compact-u16
//!     account_keys          32 bytes * num_accounts
//!     recent_blockhash      32 bytes
//!     num_instructions      compact-u16
//!     instructions[]
//!
//! Instruction:
//!   program_id_index        u8
//!   num_accounts            compact-u16
//!   account_indices         u8 * num_accounts
//!   data_len                compact-u16
//!   data                    u8 * data_len
//! ```
//!
//! Transactions built here are never signed server-side. The signature
//! slots are zero-filled so the wallet can sign in place.

use super::error::SolError;
use super::pubkey::{Hash, Pubkey};

/// Upper bound on a serialized transaction (one IPv6 MTU minus headers).
pub const PACKET_DATA_SIZE: usize = 1232;

const SIGNATURE_LEN: usize = 64;

/// Encode a `u16` in Solana's compact-u16 (7 bits per byte) format.
pub fn encode_compact_u16(value: u16, out: &mut Vec<u8>) {
    let mut val = value;
    loop {
        let mut byte = (val & 0x7f) as u8;
        val >>= 7;
        if val > 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if val == 0 {
            break;
        }
    }
}

fn compact_len(len: usize, out: &mut Vec<u8>) -> Result<(), SolError> {
    let len = u16::try_from(len)
        .map_err(|_| SolError::SerializationError(format!("length {len} exceeds u16")))?;
    encode_compact_u16(len, out);
    Ok(())
}

/// An account referenced by an instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountMeta {
    pub pubkey: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl AccountMeta {
    pub fn new(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: true,
        }
    }

    pub fn new_readonly(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: false,
        }
    }
}

/// An instruction before compilation into a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub program_id: Pubkey,
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
}

/// An instruction whose accounts are indices into the message key list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    pub accounts: Vec<u8>,
    pub data: Vec<u8>,
}

/// Counts that tell the runtime how to interpret `account_keys`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    pub num_required_signatures: u8,
    pub num_readonly_signed_accounts: u8,
    pub num_readonly_unsigned_accounts: u8,
}

/// A compiled legacy message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: MessageHeader,
    /// Keys in canonical order: writable signers (fee payer first),
    /// read-only signers, writable non-signers, read-only non-signers.
    pub account_keys: Vec<Pubkey>,
    pub recent_blockhash: Hash,
    pub instructions: Vec<CompiledInstruction>,
}

impl Message {
    /// Compile `instructions` with `payer` as the fee payer.
    pub fn compile(
        instructions: &[Instruction],
        payer: &Pubkey,
        recent_blockhash: Hash,
    ) -> Result<Self, SolError> {
        struct Entry {
            pubkey: Pubkey,
            is_signer: bool,
            is_writable: bool,
        }

        let mut entries: Vec<Entry> = Vec::new();
        let mut upsert = |pubkey: Pubkey, is_signer: bool, is_writable: bool| {
            if let Some(entry) = entries.iter_mut().find(|e| e.pubkey == pubkey) {
                entry.is_signer |= is_signer;
                entry.is_writable |= is_writable;
            } else {
                entries.push(Entry {
                    pubkey,
                    is_signer,
                    is_writable,
                });
            }
        };

        upsert(*payer, true, true);
        for ix in instructions {
            for meta in &ix.accounts {
                upsert(meta.pubkey, meta.is_signer, meta.is_writable);
            }
            upsert(ix.program_id, false, false);
        }

        // Stable sort keeps the payer ahead of other writable signers.
        entries.sort_by_key(|e| match (e.is_signer, e.is_writable) {
            (true, true) => 0u8,
            (true, false) => 1,
            (false, true) => 2,
            (false, false) => 3,
        });

        if entries.len() > usize::from(u8::MAX) {
            return Err(SolError::TransactionBuildError(format!(
                "too many accounts: {}",
                entries.len()
            )));
        }

        let count = |f: fn(&Entry) -> bool| entries.iter().filter(|e| f(e)).count() as u8;
        let header = MessageHeader {
            num_required_signatures: count(|e| e.is_signer),
            num_readonly_signed_accounts: count(|e| e.is_signer && !e.is_writable),
            num_readonly_unsigned_accounts: count(|e| !e.is_signer && !e.is_writable),
        };

        let account_keys: Vec<Pubkey> = entries.iter().map(|e| e.pubkey).collect();
        let index_of = |key: &Pubkey| -> Result<u8, SolError> {
            account_keys
                .iter()
                .position(|k| k == key)
                .map(|i| i as u8)
                .ok_or_else(|| {
                    SolError::TransactionBuildError(format!("{key} missing from account keys"))
                })
        };

        let instructions = instructions
            .iter()
            .map(|ix| {
                Ok(CompiledInstruction {
                    program_id_index: index_of(&ix.program_id)?,
                    accounts: ix
                        .accounts
                        .iter()
                        .map(|meta| index_of(&meta.pubkey))
                        .collect::<Result<_, _>>()?,
                    data: ix.data.clone(),
                })
            })
            .collect::<Result<Vec<_>, SolError>>()?;

        Ok(Self {
            header,
            account_keys,
            recent_blockhash,
            instructions,
        })
    }

    /// The fee payer is always the first account key.
    pub fn fee_payer(&self) -> Option<&Pubkey> {
        self.account_keys.first()
    }

    /// Serialize the message, i.e. the bytes a wallet signs.
    pub fn serialize(&self) -> Result<Vec<u8>, SolError> {
        let mut buf = Vec::with_capacity(256);
        buf.push(self.header.num_required_signatures);
        buf.push(self.header.num_readonly_signed_accounts);
        buf.push(self.header.num_readonly_unsigned_accounts);

        compact_len(self.account_keys.len(), &mut buf)?;
        for key in &self.account_keys {
            buf.extend_from_slice(key.as_bytes());
        }

        buf.extend_from_slice(self.recent_blockhash.as_bytes());

        compact_len(self.instructions.len(), &mut buf)?;
        for ix in &self.instructions {
            buf.push(ix.program_id_index);
            compact_len(ix.accounts.len(), &mut buf)?;
            buf.extend_from_slice(&ix.accounts);
            compact_len(ix.data.len(), &mut buf)?;
            buf.extend_from_slice(&ix.data);
        }

        Ok(buf)
    }
}

/// A transaction waiting for its signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    pub message: Message,
}

impl UnsignedTransaction {
    pub fn new(message: Message) -> Self {
        Self { message }
    }

    /// Wire bytes with one zeroed signature slot per required signer.
    pub fn serialize(&self) -> Result<Vec<u8>, SolError> {
        let message = self.message.serialize()?;
        let signers = usize::from(self.message.header.num_required_signatures);

        let mut buf = Vec::with_capacity(3 + signers * SIGNATURE_LEN + message.len());
        compact_len(signers, &mut buf)?;
        buf.resize(buf.len() + signers * SIGNATURE_LEN, 0);
        buf.extend_from_slice(&message);

        if buf.len() > PACKET_DATA_SIZE {
            return Err(SolError::SerializationError(format!(
                "transaction too large: {} > {PACKET_DATA_SIZE}",
                buf.len()
            )));
        }
        Ok(buf)
    }

    /// Base64 (RFC 4648, padded) encoding of the wire bytes, as expected by
    /// wallets in an action POST response.
    pub fn to_base64(&self) -> Result<String, SolError> {
        self.serialize()
            .map(|bytes| fast32::base64::RFC4648.encode(&bytes))
    }
}
