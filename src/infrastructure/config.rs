use std::{path::PathBuf, str::FromStr, time::Duration};
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use crate::{
    adapters::parsers::MintPair,
    application::{AppError, AppResult, RetryPolicy, ScanPolicy},
};

pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceType {
    Rpc,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkType {
    Stdout,
    File(PathBuf),
    Postgres(String),
}

#[derive(Debug, Clone)]
pub struct IndexerConfig {
    pub source: SourceType,
    pub rpc_url: String,
    pub rpc_timeout: Duration,
    pub commitment: CommitmentConfig,
    pub sink: SinkType,
    pub retry: RetryPolicy,
    pub scan_policy: ScanPolicy,
    pub mints: MintPair,
}

impl IndexerConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset and blank keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |key: &str, why: &str| {
            get(key).ok_or_else(|| AppError::ConfigError(format!("{key} is required {why}")))
        };

        let source = match get("SOURCE_TYPE").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("rpc") => SourceType::Rpc,
            Some("file") => SourceType::File(require("REPLAY_PATH", "when SOURCE_TYPE=file")?.into()),
            Some(other) => return Err(AppError::ConfigError(format!("Invalid SOURCE_TYPE: {other}"))),
        };

        let sink = match get("SINK_TYPE").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("stdout") => SinkType::Stdout,
            Some("file") => SinkType::File(require("SINK_PATH", "when SINK_TYPE=file")?.into()),
            Some("postgres") => {
                SinkType::Postgres(require("DATABASE_URL", "when SINK_TYPE=postgres")?)
            }
            Some(other) => return Err(AppError::ConfigError(format!("Invalid SINK_TYPE: {other}"))),
        };

        let commitment = match get("COMMITMENT").as_deref() {
            None => CommitmentConfig::confirmed(),
            Some(raw) => parse_commitment(raw)?,
        };

        let delay = Duration::from_millis(parse_number(get("RETRY_DELAY_MS"), "RETRY_DELAY_MS", 1000)?);
        let mut retry = RetryPolicy::unbounded(delay).with_unavailable_delay(Duration::from_millis(
            parse_number(get("UNAVAILABLE_DELAY_MS"), "UNAVAILABLE_DELAY_MS", 250)?,
        ));
        if let Some(raw) = get("RETRY_MAX_ATTEMPTS") {
            let max = parse_number(Some(raw), "RETRY_MAX_ATTEMPTS", 0)?;
            let max = u32::try_from(max)
                .ok()
                .filter(|max| *max > 0)
                .ok_or_else(|| AppError::ConfigError("RETRY_MAX_ATTEMPTS must be between 1 and u32::MAX".into()))?;
            retry = retry.with_max_attempts(max);
        }

        let scan_policy = match get("SCAN_POLICY").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("all") => ScanPolicy::AllMatches,
            Some("first") => ScanPolicy::FirstMatch,
            Some(other) => return Err(AppError::ConfigError(format!("Invalid SCAN_POLICY: {other}"))),
        };

        let defaults = MintPair::default();
        let source_mints = match get("SOURCE_MINTS") {
            None => defaults.source_mints,
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|mint| !mint.is_empty())
                .map(validate_mint)
                .collect::<AppResult<Vec<_>>>()?,
        };
        if source_mints.is_empty() {
            return Err(AppError::ConfigError("SOURCE_MINTS lists no mints".into()));
        }
        let destination_mint = match get("DESTINATION_MINT") {
            None => defaults.destination_mint,
            Some(raw) => validate_mint(&raw)?,
        };

        Ok(Self {
            source,
            rpc_url: get("RPC_URL").unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            rpc_timeout: Duration::from_secs(parse_number(get("RPC_TIMEOUT_SECS"), "RPC_TIMEOUT_SECS", 30)?),
            commitment,
            sink,
            retry,
            scan_policy,
            mints: MintPair {
                source_mints,
                destination_mint,
            },
        })
    }
}

fn parse_number(raw: Option<String>, key: &str, default: u64) -> AppResult<u64> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::ConfigError(format!("{key} is not a number: {raw}"))),
    }
}

// getBlock does not accept `processed`.
fn parse_commitment(raw: &str) -> AppResult<CommitmentConfig> {
    match raw.to_lowercase().as_str() {
        "confirmed" => Ok(CommitmentConfig::confirmed()),
        "finalized" => Ok(CommitmentConfig::finalized()),
        other => Err(AppError::ConfigError(format!(
            "Invalid COMMITMENT: {other} (expected confirmed or finalized)"
        ))),
    }
}

fn validate_mint(raw: &str) -> AppResult<String> {
    Pubkey::from_str(raw)
        .map(|key| key.to_string())
        .map_err(|e| AppError::ConfigError(format!("invalid mint address {raw}: {e}")))
}
