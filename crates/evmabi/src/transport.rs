//! Transport seam for contract calls

use async_trait::async_trait;
use evmabi_primitives::Address;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::AbiError;

/// Sends `0x` hex call data to a contract and returns the `0x` hex result
/// (object-safe)
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a read-only call against `to`
    async fn call(&self, to: &Address, data: &str) -> Result<String, AbiError>;
}

#[derive(Debug, Clone)]
enum MockReply {
    Data(String),
    Error { code: i64, message: String },
}

/// Mock transport for testing
///
/// Replies are keyed by the selector at the front of the call data; every
/// call is recorded.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    calls: Arc<Mutex<Vec<(Address, String)>>>,
}

fn selector_key(s: &str) -> String {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    let head: String = s.chars().take(8).collect();
    format!("0x{}", head.to_ascii_lowercase())
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to calls with `selector` (`0x` + 8 hex digits) with `response`
    pub fn set_response(&self, selector: &str, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(selector_key(selector), MockReply::Data(response.into()));
    }

    /// Fail calls with `selector` with an RPC error
    pub fn set_error(&self, selector: &str, code: i64, message: impl Into<String>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                selector_key(selector),
                MockReply::Error {
                    code,
                    message: message.into(),
                },
            );
    }

    /// Clear custom responses
    pub fn clear_responses(&self) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Calls made so far, in order
    pub fn calls(&self) -> Vec<(Address, String)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn call(&self, to: &Address, data: &str) -> Result<String, AbiError> {
        self.calls
            .lock()
            .map_err(|_| AbiError::Transport("MockTransport mutex poisoned".to_string()))?
            .push((*to, data.to_string()));

        let key = selector_key(data);
        if key.len() != 10 {
            return Err(AbiError::Transport(format!("call data too short: {}", data)));
        }

        let reply = self
            .responses
            .lock()
            .map_err(|_| AbiError::Transport("MockTransport mutex poisoned".to_string()))?
            .get(&key)
            .cloned();

        match reply {
            Some(MockReply::Data(response)) => Ok(response),
            Some(MockReply::Error { code, message }) => Err(AbiError::Rpc { code, message }),
            None => Err(AbiError::Transport(format!("no response for selector {}", key))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transport_custom_response() {
        let transport = MockTransport::new();
        transport.set_response("0x06FDDE03", "0x01");

        let result = transport
            .call(&Address::ZERO, "0x06fdde03")
            .await
            .unwrap();
        assert_eq!(result, "0x01");
        assert_eq!(transport.calls(), vec![(Address::ZERO, "0x06fdde03".to_string())]);
    }

    #[tokio::test]
    async fn test_mock_transport_unknown_selector() {
        let transport = MockTransport::new();
        let result = transport.call(&Address::ZERO, "0x95d89b41").await;
        assert!(matches!(result, Err(AbiError::Transport(_))));
    }

    #[tokio::test]
    async fn test_mock_transport_rpc_error() {
        let transport = MockTransport::new();
        transport.set_error("0x95d89b41", 3, "execution reverted");
        match transport.call(&Address::ZERO, "0x95d89b41").await {
            Err(AbiError::Rpc { code: 3, message }) => assert_eq!(message, "execution reverted"),
            other => panic!("Expected Rpc error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_mock_transport_short_call_data() {
        let transport = MockTransport::new();
        assert!(transport.call(&Address::ZERO, "0x06fd").await.is_err());
    }

    #[tokio::test]
    async fn test_clear_responses() {
        let transport = MockTransport::new();
        transport.set_response("0x06fdde03", "0x");
        transport.clear_responses();
        assert!(transport.call(&Address::ZERO, "0x06fdde03").await.is_err());
    }
}
