//! Maps jsonParsed `getBlock` results onto the domain model.
//!
//! Anything the node left out becomes an empty or `None` field; nothing here fails.

use solana_transaction_status::{
    option_serializer::OptionSerializer, EncodedTransaction, EncodedTransactionWithStatusMeta,
    UiConfirmedBlock, UiInstruction, UiParsedInstruction, UiTransactionStatusMeta,
};
use crate::domain::{
    Block, Instruction, ParsedInstruction, TokenBalance, Transaction, TransactionStatus,
};

pub fn map_block(slot: u64, block: UiConfirmedBlock) -> Block {
    Block {
        slot,
        block_time: block.block_time,
        parent_slot: block.parent_slot,
        transactions: block
            .transactions
            .unwrap_or_default()
            .into_iter()
            .map(map_transaction)
            .collect(),
    }
}

pub fn map_transaction(encoded: EncodedTransactionWithStatusMeta) -> Transaction {
    let signatures = match encoded.transaction {
        EncodedTransaction::Json(ui_transaction) => ui_transaction.signatures,
        EncodedTransaction::Accounts(accounts) => accounts.signatures,
        _ => Vec::new(),
    };

    let mut txn = Transaction {
        signatures,
        ..Default::default()
    };
    if let Some(meta) = encoded.meta {
        apply_meta(&mut txn, meta);
    }
    txn
}

fn apply_meta(txn: &mut Transaction, meta: UiTransactionStatusMeta) {
    txn.fee = meta.fee;
    txn.err = meta.err.map(|err| format!("{err:?}"));
    txn.status = Some(match &meta.status {
        Ok(()) => TransactionStatus::Ok,
        Err(err) => TransactionStatus::Err(format!("{err:?}")),
    });

    if let OptionSerializer::Some(balances) = meta.pre_token_balances {
        txn.pre_token_balances = balances
            .into_iter()
            .map(|balance| TokenBalance { mint: balance.mint })
            .collect();
    }

    if let OptionSerializer::Some(groups) = meta.inner_instructions {
        txn.inner_instruction_groups = groups
            .into_iter()
            .map(|group| group.instructions.iter().map(map_instruction).collect())
            .collect();
    }
}

pub fn map_instruction(instruction: &UiInstruction) -> Instruction {
    match instruction {
        UiInstruction::Parsed(UiParsedInstruction::Parsed(parsed)) => {
            match ParsedInstruction::from_value(&parsed.parsed) {
                Some(body) => Instruction::Parsed {
                    program: parsed.program.clone(),
                    parsed: body,
                },
                None => Instruction::ProgramTagged {
                    program: parsed.program.clone(),
                },
            }
        }
        _ => Instruction::Untagged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_block_json() -> serde_json::Value {
        json!({
            "blockhash": "5eykt4UsFv8P8NJdTREpY1vzqKqZKvdpKuc147dw2N9d",
            "previousBlockhash": "4sGjMW1sUnHzSxGspuhpqLDx6wiyjNtZAMdL4VZHirAn",
            "parentSlot": 299,
            "blockTime": 1_700_000_000,
            "blockHeight": 280,
            "transactions": [
                {
                    "transaction": {
                        "signatures": ["sig1"],
                        "message": {
                            "accountKeys": [],
                            "recentBlockhash": "4sGjMW1sUnHzSxGspuhpqLDx6wiyjNtZAMdL4VZHirAn",
                            "instructions": []
                        }
                    },
                    "meta": {
                        "err": null,
                        "status": { "Ok": null },
                        "fee": 5000,
                        "preBalances": [],
                        "postBalances": [],
                        "innerInstructions": [
                            {
                                "index": 0,
                                "instructions": [
                                    {
                                        "programIdIndex": 3,
                                        "accounts": [0, 1],
                                        "data": "3Bxs4h24hBtQy9rw"
                                    },
                                    {
                                        "program": "spl-token",
                                        "programId": "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA",
                                        "parsed": {
                                            "type": "transfer",
                                            "info": {
                                                "amount": "100",
                                                "authority": "Auth",
                                                "destination": "B",
                                                "source": "A"
                                            }
                                        },
                                        "stackHeight": 2
                                    },
                                    {
                                        "program": "spl-memo",
                                        "programId": "MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr",
                                        "parsed": "hello",
                                        "stackHeight": 2
                                    },
                                    {
                                        "program": "spl-token",
                                        "programId": "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA",
                                        "parsed": {
                                            "type": "transfer",
                                            "info": {
                                                "amount": "95",
                                                "authority": "Auth",
                                                "destination": "C",
                                                "source": "A"
                                            }
                                        },
                                        "stackHeight": 2
                                    }
                                ]
                            }
                        ],
                        "logMessages": [],
                        "preTokenBalances": [
                            {
                                "accountIndex": 1,
                                "mint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                                "uiTokenAmount": {
                                    "uiAmount": 1.0,
                                    "decimals": 6,
                                    "amount": "1000000",
                                    "uiAmountString": "1"
                                }
                            },
                            {
                                "accountIndex": 2,
                                "mint": "So11111111111111111111111111111111111111112",
                                "uiTokenAmount": {
                                    "uiAmount": 2.0,
                                    "decimals": 9,
                                    "amount": "2000000000",
                                    "uiAmountString": "2"
                                }
                            }
                        ],
                        "postTokenBalances": [],
                        "rewards": []
                    }
                },
                {
                    "transaction": {
                        "signatures": ["sig2"],
                        "message": {
                            "accountKeys": [],
                            "recentBlockhash": "4sGjMW1sUnHzSxGspuhpqLDx6wiyjNtZAMdL4VZHirAn",
                            "instructions": []
                        }
                    }
                }
            ]
        })
    }

    #[test]
    fn maps_json_parsed_block() {
        let ui_block: UiConfirmedBlock = serde_json::from_value(sample_block_json()).unwrap();
        let block = map_block(300, ui_block);

        assert_eq!(block.slot, 300);
        assert_eq!(block.parent_slot, 299);
        assert_eq!(block.block_number(), 300);
        assert_eq!(block.block_time, Some(1_700_000_000));
        assert_eq!(block.transactions.len(), 2);

        let swap = &block.transactions[0];
        assert_eq!(swap.signature(), Some("sig1"));
        assert_eq!(swap.fee, 5000);
        assert_eq!(swap.err, None);
        assert_eq!(swap.status, Some(TransactionStatus::Ok));
        assert_eq!(swap.pre_token_balances.len(), 2);

        let group = swap.first_inner_group().unwrap();
        assert_eq!(group.len(), 4);
        assert_eq!(group[0], Instruction::Untagged);
        assert_eq!(group[1].program(), Some("spl-token"));
        assert_eq!(group[1].parsed().unwrap().amount().as_deref(), Some("100"));
        assert_eq!(
            group[2],
            Instruction::ProgramTagged {
                program: "spl-memo".into()
            }
        );
    }

    #[test]
    fn transaction_without_meta_maps_to_empty_shape() {
        let ui_block: UiConfirmedBlock = serde_json::from_value(sample_block_json()).unwrap();
        let block = map_block(300, ui_block);

        let bare = &block.transactions[1];
        assert_eq!(bare.signature(), Some("sig2"));
        assert_eq!(bare.status, None);
        assert!(bare.pre_token_balances.is_empty());
        assert!(bare.inner_instruction_groups.is_empty());
    }
}
