//! Scripted EIP-1193 provider for unit tests.

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::sync::Notify;

use crate::error::{ProviderError, UNSUPPORTED_METHOD};
use crate::provider::Eip1193Provider;

type Response = Result<Value, ProviderError>;

/// Records every request and answers from per-method scripts.
///
/// One-shot responses are consumed first, then the sticky response for the
/// method applies. Unscripted methods fail with code 4200.
#[derive(Debug, Default)]
pub(crate) struct MockProvider {
    once: Mutex<HashMap<String, VecDeque<Response>>>,
    sticky: Mutex<HashMap<String, Response>>,
    calls: Mutex<Vec<(String, Value)>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
}

impl MockProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A wallet that completes the whole mint flow.
    pub(crate) fn happy_path(account: &str, tx_hash: &str) -> Self {
        let mock = Self::new();
        mock.respond("eth_accounts", json!([account]));
        mock.respond("eth_requestAccounts", json!([account]));
        mock.respond("wallet_switchEthereumChain", Value::Null);
        mock.respond("eth_call", json!(uint_word(18)));
        mock.respond("eth_sendTransaction", json!(tx_hash));
        mock.respond(
            "eth_getTransactionReceipt",
            json!({ "transactionHash": tx_hash, "blockNumber": "0x1", "status": "0x1" }),
        );
        mock
    }

    pub(crate) fn respond(&self, method: &str, value: Value) {
        self.sticky.lock().insert(method.to_string(), Ok(value));
    }

    pub(crate) fn fail(&self, method: &str, err: ProviderError) {
        self.sticky.lock().insert(method.to_string(), Err(err));
    }

    pub(crate) fn respond_once(&self, method: &str, response: Response) {
        self.once
            .lock()
            .entry(method.to_string())
            .or_default()
            .push_back(response);
    }

    /// Hold requests for `method` until the returned handle is notified.
    pub(crate) fn gate(&self, method: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates.lock().insert(method.to_string(), notify.clone());
        notify
    }

    pub(crate) fn call_count(&self, method: &str) -> usize {
        self.calls.lock().iter().filter(|(m, _)| m == method).count()
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.calls.lock().len()
    }

    pub(crate) fn calls_to(&self, method: &str) -> Vec<Value> {
        self.calls
            .lock()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, params)| params.clone())
            .collect()
    }

    fn next_response(&self, method: &str) -> Response {
        if let Some(response) = self.once.lock().get_mut(method).and_then(VecDeque::pop_front) {
            return response;
        }
        self.sticky.lock().get(method).cloned().unwrap_or_else(|| {
            Err(ProviderError::new(
                UNSUPPORTED_METHOD,
                format!("unsupported method: {method}"),
            ))
        })
    }
}

impl Eip1193Provider for MockProvider {
    fn request<'a>(
        &'a self,
        method: &'a str,
        params: Value,
    ) -> Pin<Box<dyn Future<Output = Result<Value, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.lock().push((method.to_string(), params));
            let gate = self.gates.lock().get(method).cloned();
            if let Some(gate) = gate {
                gate.notified().await;
            }
            self.next_response(method)
        })
    }
}

/// A uint ABI word as `0x`-prefixed hex.
pub(crate) fn uint_word(value: u64) -> String {
    format!("0x{value:064x}")
}
