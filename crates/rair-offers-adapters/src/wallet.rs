use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{keccak256, Address, B256};
use serde_json::{json, Value};

use rair_offers_core::{ChainError, ContractCall, TxReceipt, WalletPort};

use crate::OfferAdapterConfig;

/// EIP-1193 error code for a request the user declined.
const USER_REJECTED_CODE: i64 = 4001;

#[derive(Debug, Clone)]
pub struct WalletAdapter {
    mode: WalletMode,
    state: Arc<Mutex<WalletState>>,
}

#[derive(Debug, Clone)]
enum WalletMode {
    Disabled(String),
    Deterministic,
    Rpc(RpcRuntime),
}

#[derive(Debug, Clone)]
struct RpcRuntime {
    base_url: String,
    client: reqwest::blocking::Client,
    from: Option<Address>,
    poll_interval: Duration,
    max_polls: u32,
}

#[derive(Debug, Default)]
struct WalletState {
    chain_id: u64,
    sent: Vec<ContractCall>,
    fail_next: Option<ChainError>,
    request_seq: u64,
}

impl Default for WalletAdapter {
    fn default() -> Self {
        Self::with_config(OfferAdapterConfig::from_env())
    }
}

impl WalletAdapter {
    pub fn with_config(config: OfferAdapterConfig) -> Self {
        let mode = match config.rpc_url.as_ref() {
            Some(base_url) => {
                let timeout = Duration::from_millis(config.rpc_timeout_ms);
                match reqwest::blocking::Client::builder().timeout(timeout).build() {
                    Ok(client) => WalletMode::Rpc(RpcRuntime {
                        base_url: base_url.clone(),
                        client,
                        from: config.from_address,
                        poll_interval: Duration::from_millis(config.receipt_poll_interval_ms),
                        max_polls: config.receipt_max_polls.max(1),
                    }),
                    Err(e) => WalletMode::Disabled(format!(
                        "failed to initialize json-rpc client for {base_url}: {e}"
                    )),
                }
            }
            None => WalletMode::Deterministic,
        };
        tracing::info!(mode = mode.name(), "wallet adapter ready");

        Self {
            mode,
            state: Arc::new(Mutex::new(WalletState {
                chain_id: config.deterministic_chain_id,
                ..WalletState::default()
            })),
        }
    }

    /// In-memory wallet that mines every call immediately.
    pub fn deterministic(chain_id: u64) -> Self {
        Self::with_config(OfferAdapterConfig {
            rpc_url: None,
            deterministic_chain_id: chain_id,
            ..OfferAdapterConfig::default()
        })
    }

    pub fn is_deterministic(&self) -> bool {
        matches!(self.mode, WalletMode::Deterministic)
    }

    /// Calls handed to the deterministic wallet so far.
    pub fn sent_calls(&self) -> Result<Vec<ContractCall>, ChainError> {
        Ok(self.lock()?.sent.clone())
    }

    /// Ask the wallet to move to `chain_id` (`wallet_switchEthereumChain`).
    pub fn request_chain_switch(&self, chain_id: u64) -> Result<(), ChainError> {
        match &self.mode {
            WalletMode::Disabled(reason) => Err(ChainError::Disabled(reason.clone())),
            WalletMode::Deterministic => self.debug_set_chain_id(chain_id),
            WalletMode::Rpc(_) => {
                self.rpc_call(
                    "wallet_switchEthereumChain",
                    json!([{ "chainId": format!("0x{chain_id:x}") }]),
                )?;
                Ok(())
            }
        }
    }

    pub fn debug_set_chain_id(&self, chain_id: u64) -> Result<(), ChainError> {
        self.lock()?.chain_id = chain_id;
        Ok(())
    }

    pub fn debug_fail_next(&self, err: ChainError) -> Result<(), ChainError> {
        self.lock()?.fail_next = Some(err);
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, WalletState>, ChainError> {
        self.state
            .lock()
            .map_err(|e| ChainError::Transport(format!("wallet state lock poisoned: {e}")))
    }

    fn rpc_call(&self, method: &str, params: Value) -> Result<Value, ChainError> {
        let rpc = match &self.mode {
            WalletMode::Rpc(rpc) => rpc,
            WalletMode::Disabled(reason) => return Err(ChainError::Disabled(reason.clone())),
            WalletMode::Deterministic => {
                return Err(ChainError::Disabled(
                    "json-rpc runtime not configured".to_owned(),
                ))
            }
        };
        let id = {
            let mut state = self.lock()?;
            state.request_seq += 1;
            state.request_seq
        };
        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        let response = rpc
            .client
            .post(&rpc.base_url)
            .json(&payload)
            .send()
            .map_err(|e| ChainError::Transport(format!("{method} request failed: {e}")))?;
        let status = response.status();
        let body: Value = response
            .json()
            .map_err(|e| ChainError::Transport(format!("{method} json decode failed: {e}")))?;
        if let Some(err) = body.get("error") {
            return Err(rpc_error(err));
        }
        if !status.is_success() {
            return Err(ChainError::Transport(format!(
                "{method} returned status {status}: {body}"
            )));
        }
        Ok(body.get("result").cloned().unwrap_or(Value::Null))
    }

    fn rpc_sender(&self, rpc: &RpcRuntime) -> Result<Address, ChainError> {
        if let Some(from) = rpc.from {
            return Ok(from);
        }
        let accounts = self.rpc_call("eth_accounts", json!([]))?;
        accounts
            .as_array()
            .and_then(|a| a.first())
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<Address>().ok())
            .ok_or_else(|| ChainError::Disabled("wallet exposes no accounts".to_owned()))
    }
}

impl WalletMode {
    fn name(&self) -> &'static str {
        match self {
            WalletMode::Disabled(_) => "disabled",
            WalletMode::Deterministic => "deterministic",
            WalletMode::Rpc(_) => "rpc",
        }
    }
}

impl WalletPort for WalletAdapter {
    fn chain_id(&self) -> Result<Option<u64>, ChainError> {
        match &self.mode {
            WalletMode::Deterministic => Ok(Some(self.lock()?.chain_id)),
            WalletMode::Disabled(_) => Ok(None),
            WalletMode::Rpc(_) => {
                let result = self.rpc_call("eth_chainId", json!([]))?;
                result.as_str().map(parse_quantity).transpose()
            }
        }
    }

    fn send_transaction(&self, call: &ContractCall) -> Result<B256, ChainError> {
        match &self.mode {
            WalletMode::Disabled(reason) => Err(ChainError::Disabled(reason.clone())),
            WalletMode::Deterministic => {
                let mut state = self.lock()?;
                if let Some(err) = state.fail_next.take() {
                    return Err(err);
                }
                state.sent.push(call.clone());
                let mut preimage = call.data.to_vec();
                preimage.extend_from_slice(&(state.sent.len() as u64).to_be_bytes());
                Ok(keccak256(preimage))
            }
            WalletMode::Rpc(rpc) => {
                let from = self.rpc_sender(rpc)?;
                let result = self.rpc_call(
                    "eth_sendTransaction",
                    json!([{
                        "from": from,
                        "to": call.to,
                        "data": call.data,
                    }]),
                )?;
                result
                    .as_str()
                    .and_then(|s| s.parse::<B256>().ok())
                    .ok_or_else(|| {
                        ChainError::Transport(format!("eth_sendTransaction returned {result}"))
                    })
            }
        }
    }

    fn wait_for_receipt(&self, tx_hash: B256) -> Result<TxReceipt, ChainError> {
        match &self.mode {
            WalletMode::Disabled(reason) => Err(ChainError::Disabled(reason.clone())),
            WalletMode::Deterministic => {
                let block = self.lock()?.sent.len() as u64;
                Ok(TxReceipt {
                    tx_hash,
                    block_number: Some(block),
                    success: true,
                })
            }
            WalletMode::Rpc(rpc) => {
                for attempt in 0..rpc.max_polls {
                    let result = self.rpc_call("eth_getTransactionReceipt", json!([tx_hash]))?;
                    if !result.is_null() {
                        return parse_receipt(tx_hash, &result);
                    }
                    tracing::debug!(%tx_hash, attempt, "receipt not available yet");
                    std::thread::sleep(rpc.poll_interval);
                }
                Err(ChainError::ReceiptTimeout(tx_hash))
            }
        }
    }
}

/// Only the reason nested under `data.message` is shown to the user; the
/// top-level message is wallet boilerplate and goes to the log.
fn rpc_error(err: &Value) -> ChainError {
    let code = err.get("code").and_then(Value::as_i64).unwrap_or_default();
    let outer = err.get("message").and_then(Value::as_str).unwrap_or_default();
    tracing::warn!(code, message = outer, "json-rpc error");
    if code == USER_REJECTED_CODE {
        return ChainError::Rejected;
    }
    let message = err
        .get("data")
        .and_then(|d| d.get("message"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();
    ChainError::Rpc { code, message }
}

fn parse_quantity(raw: &str) -> Result<u64, ChainError> {
    let trimmed = raw.trim();
    match trimmed.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => trimmed.parse::<u64>(),
    }
    .map_err(|e| ChainError::Transport(format!("invalid quantity '{raw}': {e}")))
}

fn parse_receipt(tx_hash: B256, raw: &Value) -> Result<TxReceipt, ChainError> {
    let success = match raw.get("status").and_then(Value::as_str) {
        Some(status) => parse_quantity(status)? == 1,
        // Pre-byzantium receipts carry no status.
        None => true,
    };
    let block_number = raw
        .get("blockNumber")
        .and_then(Value::as_str)
        .map(parse_quantity)
        .transpose()?;
    Ok(TxReceipt {
        tx_hash,
        block_number,
        success,
    })
}
