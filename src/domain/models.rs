use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One block as returned by `getBlock`, reduced to what the transfer pipeline reads.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub slot: u64,
    pub block_time: Option<i64>,
    pub parent_slot: u64,
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Block number reported downstream: the parent slot plus one.
    pub fn block_number(&self) -> u64 {
        self.parent_slot + 1
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transaction {
    pub signatures: Vec<String>,
    pub fee: u64,
    pub err: Option<String>,
    pub status: Option<TransactionStatus>,
    pub pre_token_balances: Vec<TokenBalance>,
    pub inner_instruction_groups: Vec<Vec<Instruction>>,
}

impl Transaction {
    pub fn signature(&self) -> Option<&str> {
        self.signatures.first().map(String::as_str)
    }

    pub fn first_inner_group(&self) -> Option<&[Instruction]> {
        self.inner_instruction_groups.first().map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    Ok,
    Err(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBalance {
    pub mint: String,
}

/// Shape of one inner instruction. The RPC node decides per instruction how much it could
/// decode, so every form has to be expected anywhere in a group.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Compiled or partially decoded: no program name, no parsed body.
    Untagged,
    /// Program is known but the body is not a `{type, info}` object.
    ProgramTagged { program: String },
    Parsed {
        program: String,
        parsed: ParsedInstruction,
    },
}

impl Instruction {
    pub fn program(&self) -> Option<&str> {
        match self {
            Instruction::Untagged => None,
            Instruction::ProgramTagged { program } | Instruction::Parsed { program, .. } => {
                Some(program)
            }
        }
    }

    pub fn parsed(&self) -> Option<&ParsedInstruction> {
        match self {
            Instruction::Parsed { parsed, .. } => Some(parsed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedInstruction {
    pub instruction_type: Option<String>,
    pub info: Map<String, Value>,
}

impl ParsedInstruction {
    /// Builds from the `parsed` member of a jsonParsed instruction. Returns `None` when the
    /// member is not an object (some programs report a bare string there).
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(Self {
            instruction_type: object.get("type").and_then(Value::as_str).map(str::to_owned),
            info: object
                .get("info")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
        })
    }

    pub fn amount(&self) -> Option<String> {
        self.info_text("amount")
    }

    pub fn source(&self) -> Option<String> {
        self.info_text("source")
    }

    pub fn destination(&self) -> Option<String> {
        self.info_text("destination")
    }

    // Token amounts arrive as strings, but older nodes report plain numbers.
    fn info_text(&self, key: &str) -> Option<String> {
        match self.info.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Per-transaction half of a record, before block context is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferDetails {
    pub source_amount: String,
    pub destination_amount: String,
    pub source_account: String,
    pub destination_account: String,
    #[serde(rename = "transaction_fees")]
    pub transaction_fee: u64,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    #[serde(flatten)]
    pub details: TransferDetails,
    pub block_time: Option<i64>,
    pub block_number: u64,
}

impl TransferRecord {
    pub fn new(details: TransferDetails, block: &Block) -> Self {
        Self {
            details,
            block_time: block.block_time,
            block_number: block.block_number(),
        }
    }

    pub fn block_timestamp(&self) -> Option<DateTime<Utc>> {
        self.block_time
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    }
}

pub const SPL_TOKEN_PROGRAM: &'static str = "spl-token";
pub const TRANSFER_INSTRUCTION: &'static str = "transfer";

pub const USDC_MINT: &'static str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
pub const WRAPPED_BTC_MINT: &'static str = "9n4nbM75f5Ui33ZbPYXn59EwSgE8CGsHtAeTH5YFeJ9E";
pub const WRAPPED_SOL_MINT: &'static str = "So11111111111111111111111111111111111111112";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parsed_instruction_reads_string_and_numeric_amounts() {
        let parsed = ParsedInstruction::from_value(&json!({
            "type": "transfer",
            "info": { "amount": "100", "source": "A", "destination": "B" }
        }))
        .unwrap();
        assert_eq!(parsed.instruction_type.as_deref(), Some("transfer"));
        assert_eq!(parsed.amount().as_deref(), Some("100"));

        let numeric = ParsedInstruction::from_value(&json!({
            "type": "transfer",
            "info": { "amount": 42 }
        }))
        .unwrap();
        assert_eq!(numeric.amount().as_deref(), Some("42"));
        assert_eq!(numeric.source(), None);
    }

    #[test]
    fn non_object_parsed_body_is_rejected() {
        assert!(ParsedInstruction::from_value(&json!("memo text")).is_none());
    }

    #[test]
    fn record_serializes_as_flat_document() {
        let block = Block {
            slot: 11,
            block_time: Some(1_700_000_000),
            parent_slot: 9,
            transactions: vec![],
        };
        let record = TransferRecord::new(
            TransferDetails {
                source_amount: "100".into(),
                destination_amount: "95".into(),
                source_account: "A".into(),
                destination_account: "C".into(),
                transaction_fee: 5000,
                signature: "sig1".into(),
            },
            &block,
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "source_amount": "100",
                "destination_amount": "95",
                "source_account": "A",
                "destination_account": "C",
                "transaction_fees": 5000,
                "signature": "sig1",
                "block_time": 1_700_000_000,
                "block_number": 10
            })
        );
        assert_eq!(record.block_timestamp().unwrap().timestamp(), 1_700_000_000);
    }
}
