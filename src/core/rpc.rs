//! JSON-RPC 2.0 payloads exchanged with legacy providers.
//!
//! EIP-1193 `request` calls take only `{ method }`, but legacy
//! `sendAsync`/`send` endpoints expect a full JSON-RPC envelope and answer
//! with one.

use std::cell::Cell;

use serde::{Deserialize, Serialize};

use crate::core::error::WalletError;

thread_local! {
    static NEXT_ID: Cell<u64> = const { Cell::new(1) };
}

/// Argument object for EIP-1193 `request`.
#[derive(Debug, Serialize)]
pub struct RequestArguments<'a> {
    pub method: &'a str,
}

/// JSON-RPC request envelope.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Vec<serde_json::Value>,
}

impl<'a> RpcRequest<'a> {
    /// Build a parameterless request with a fresh id.
    pub fn new(method: &'a str) -> Self {
        Self {
            jsonrpc: "2.0",
            id: NEXT_ID.with(|next| next.replace(next.get() + 1)),
            method,
            params: Vec::new(),
        }
    }
}

/// Error object carried by a JSON-RPC response or an EIP-1193 rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

impl From<RpcErrorObject> for WalletError {
    fn from(err: RpcErrorObject) -> Self {
        WalletError::Rpc {
            code: err.code,
            message: err.message,
        }
    }
}

/// JSON-RPC response envelope.
#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

impl<T> RpcResponse<T> {
    /// Collapse the envelope into its result, preferring a reported error.
    pub fn into_result(self) -> Result<T, WalletError> {
        match (self.error, self.result) {
            (Some(err), _) => Err(err.into()),
            (None, Some(result)) => Ok(result),
            (None, None) => Err(WalletError::MalformedResponse(
                "response has neither result nor error".to_string(),
            )),
        }
    }
}
