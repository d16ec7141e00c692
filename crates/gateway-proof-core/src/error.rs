//! Error types for gateway-proof-core
//!
//! This module defines the error kinds that can surface while deriving slot
//! keys, retrieving proofs from a ledger node and re-encoding trie nodes.

/// Boxed cause attached to retrieval failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while building a storage proof
///
/// Every failure aborts the request it occurred in; no variant is recovered
/// from internally.
#[derive(Debug, thiserror::Error)]
pub enum GatewayProofError {
    /// Malformed hex input (invalid characters, wrong length)
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The remote ledger call failed
    #[error("Proof retrieval failed: {context}: {source}")]
    ProofRetrieval {
        /// What was being attempted when the call failed
        context: String,
        /// Underlying transport, RPC or response-shape error
        #[source]
        source: BoxError,
    },

    /// A trie node could not be decoded into structural form
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A decoded account proof does not end in a valid account leaf
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// Invalid message box layout configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl GatewayProofError {
    /// Build a retrieval error from a context message and its cause
    pub fn retrieval(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        GatewayProofError::ProofRetrieval {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Whether this error means the account does not exist at the proven block
    ///
    /// Callers should treat this as "account absent" rather than retrying.
    pub fn is_account_absent(&self) -> bool {
        matches!(self, GatewayProofError::Decoding(_))
    }
}

impl From<hex::FromHexError> for GatewayProofError {
    fn from(err: hex::FromHexError) -> Self {
        GatewayProofError::Encoding(format!("invalid hex: {}", err))
    }
}

impl From<serde_json::Error> for GatewayProofError {
    fn from(err: serde_json::Error) -> Self {
        GatewayProofError::Serialization(format!("{}", err))
    }
}
