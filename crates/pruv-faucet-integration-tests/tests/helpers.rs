//! Test helpers for faucet integration tests.
//!
//! [`TestWallet`] simulates an injected browser wallet: it tracks authorized
//! accounts, the networks it knows about, and the mints it has submitted.

#![allow(dead_code)]

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use pruv_faucet::{parse_address, Eip1193Provider, Faucet, FaucetConfig, ProviderError, U256};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

/// Account the wallet holds.
pub const WALLET_ACCOUNT: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";

/// A different recipient.
pub const RECIPIENT: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";

/// Configured token contract.
pub const TOKEN_CONTRACT: &str = "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB";

/// Chain id the wallet is on before any switch.
pub const MAINNET: &str = "0x1";

/// Route faucet logs to the test output. Controlled by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Faucet configuration pointing at the test contract.
pub fn test_config() -> FaucetConfig {
    FaucetConfig::default()
        .with_contract_address(parse_address(TOKEN_CONTRACT).expect("valid contract"))
        .with_rpc_url("https://rpc.testnet.pruv.network")
        .with_block_explorer_url("https://explorer.testnet.pruv.network")
        .with_receipt_poll_interval(Duration::from_millis(1))
}

/// Start a faucet against `wallet`, running the silent connection check.
pub async fn start_faucet(wallet: &Arc<TestWallet>) -> Faucet {
    init_tracing();
    Faucet::start(test_config(), Some(wallet.clone())).await
}

/// Set the recipient and tick the human checkbox.
pub fn fill_form(faucet: &Faucet, recipient: &str) {
    faucet.session().set_candidate_address(recipient);
    faucet.session().set_human_verified(true);
}

/// A mint the wallet accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedMint {
    /// Sender account.
    pub from: String,
    /// Contract called.
    pub to: String,
    /// Recipient argument, lowercase hex.
    pub recipient: String,
    /// Amount argument in base units.
    pub amount: U256,
    /// Hash handed back to the page.
    pub tx_hash: String,
}

#[derive(Debug)]
struct WalletState {
    account: String,
    authorized: bool,
    active_chain: String,
    known_chains: HashSet<String>,
    reject_connect: bool,
    reject_switch: bool,
    reject_add: bool,
    reject_mint: bool,
    insufficient_funds: bool,
    decimals: Option<u8>,
    pending_polls: usize,
    added_chains: Vec<Value>,
    mints: Vec<SubmittedMint>,
    requests: Vec<String>,
}

/// Simulated injected wallet.
#[derive(Debug)]
pub struct TestWallet {
    state: Mutex<WalletState>,
}

impl TestWallet {
    /// A wallet holding [`WALLET_ACCOUNT`], not yet authorized, on mainnet.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(WalletState {
                account: WALLET_ACCOUNT.to_string(),
                authorized: false,
                active_chain: MAINNET.to_string(),
                known_chains: HashSet::from([MAINNET.to_string()]),
                reject_connect: false,
                reject_switch: false,
                reject_add: false,
                reject_mint: false,
                insufficient_funds: false,
                decimals: Some(18),
                pending_polls: 0,
                added_chains: Vec::new(),
                mints: Vec::new(),
                requests: Vec::new(),
            }),
        }
    }

    /// A wallet that already exposes its account and knows the Pruv testnet.
    pub fn connected_to_pruv() -> Self {
        let wallet = Self::new().authorized();
        wallet.state.lock().known_chains.insert("0x1ca8".to_string());
        wallet
    }

    pub fn authorized(self) -> Self {
        self.state.lock().authorized = true;
        self
    }

    pub fn rejecting_connect(self) -> Self {
        self.state.lock().reject_connect = true;
        self
    }

    pub fn rejecting_switch(self) -> Self {
        self.state.lock().reject_switch = true;
        self
    }

    pub fn rejecting_add(self) -> Self {
        self.state.lock().reject_add = true;
        self
    }

    pub fn rejecting_mint(self) -> Self {
        self.state.lock().reject_mint = true;
        self
    }

    pub fn without_gas(self) -> Self {
        self.state.lock().insufficient_funds = true;
        self
    }

    /// `None` makes `decimals()` revert.
    pub fn with_decimals(self, decimals: Option<u8>) -> Self {
        self.state.lock().decimals = decimals;
        self
    }

    /// Number of receipt polls answered with `null` before the mint is mined.
    pub fn with_pending_polls(self, polls: usize) -> Self {
        self.state.lock().pending_polls = polls;
        self
    }

    pub fn active_chain(&self) -> String {
        self.state.lock().active_chain.clone()
    }

    pub fn added_chains(&self) -> Vec<Value> {
        self.state.lock().added_chains.clone()
    }

    pub fn mints(&self) -> Vec<SubmittedMint> {
        self.state.lock().mints.clone()
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.lock().requests.clone()
    }

    pub fn request_count(&self, method: &str) -> usize {
        self.state.lock().requests.iter().filter(|m| *m == method).count()
    }

    fn handle(&self, method: &str, params: &Value) -> Result<Value, ProviderError> {
        let mut state = self.state.lock();
        state.requests.push(method.to_string());

        match method {
            "eth_accounts" => Ok(if state.authorized {
                json!([state.account])
            } else {
                json!([])
            }),
            "eth_requestAccounts" => {
                if state.reject_connect {
                    return Err(ProviderError::new(4001, "User rejected the request."));
                }
                state.authorized = true;
                Ok(json!([state.account]))
            }
            "wallet_switchEthereumChain" => {
                let chain_id = params[0]["chainId"].as_str().unwrap_or_default().to_string();
                if state.reject_switch {
                    return Err(ProviderError::new(4001, "User rejected the request."));
                }
                if !state.known_chains.contains(&chain_id) {
                    return Err(ProviderError::new(
                        4902,
                        format!("Unrecognized chain ID \"{chain_id}\"."),
                    ));
                }
                state.active_chain = chain_id;
                Ok(Value::Null)
            }
            "wallet_addEthereumChain" => {
                let descriptor = params[0].clone();
                state.added_chains.push(descriptor.clone());
                if state.reject_add {
                    return Err(ProviderError::new(4001, "User rejected the request."));
                }
                let chain_id = descriptor["chainId"].as_str().unwrap_or_default().to_string();
                state.known_chains.insert(chain_id.clone());
                state.active_chain = chain_id;
                Ok(Value::Null)
            }
            "eth_call" => match state.decimals {
                Some(decimals) => Ok(json!(format!("0x{decimals:064x}"))),
                None => Err(ProviderError::new(-32000, "execution reverted")),
            },
            "eth_sendTransaction" => {
                if state.reject_mint {
                    return Err(ProviderError::new(
                        4001,
                        "MetaMask Tx Signature: User denied transaction signature.",
                    ));
                }
                if state.insufficient_funds {
                    return Err(ProviderError::new(
                        -32000,
                        "insufficient funds for gas * price + value",
                    ));
                }
                let tx = &params[0];
                let data = tx["data"].as_str().unwrap_or_default();
                let (recipient, amount) = decode_mint(data)?;
                let tx_hash = format!("0x{:064x}", state.mints.len() + 1);
                state.mints.push(SubmittedMint {
                    from: tx["from"].as_str().unwrap_or_default().to_string(),
                    to: tx["to"].as_str().unwrap_or_default().to_string(),
                    recipient,
                    amount,
                    tx_hash: tx_hash.clone(),
                });
                Ok(json!(tx_hash))
            }
            "eth_getTransactionReceipt" => {
                if state.pending_polls > 0 {
                    state.pending_polls -= 1;
                    return Ok(Value::Null);
                }
                Ok(json!({
                    "transactionHash": params[0],
                    "blockNumber": "0x2a",
                    "status": "0x1",
                }))
            }
            other => Err(ProviderError::new(
                4200,
                format!("The requested method is not supported: {other}"),
            )),
        }
    }
}

impl Default for TestWallet {
    fn default() -> Self {
        Self::new()
    }
}

impl Eip1193Provider for TestWallet {
    fn request<'a>(
        &'a self,
        method: &'a str,
        params: Value,
    ) -> Pin<Box<dyn Future<Output = Result<Value, ProviderError>> + Send + 'a>> {
        Box::pin(async move { self.handle(method, &params) })
    }
}

fn decode_mint(data: &str) -> Result<(String, U256), ProviderError> {
    let digits = data.strip_prefix("0x").unwrap_or(data);
    if digits.len() != 8 + 64 * 2 || !digits.starts_with("40c10f19") {
        return Err(ProviderError::new(-32000, "execution reverted"));
    }
    let recipient = format!("0x{}", &digits[8 + 24..8 + 64]);
    let amount = U256::from_str_radix(&digits[8 + 64..], 16)
        .map_err(|_| ProviderError::new(-32000, "execution reverted"))?;
    Ok((recipient, amount))
}
