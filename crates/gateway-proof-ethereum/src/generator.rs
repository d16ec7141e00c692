//! Message box proof generator
//!
//! Entry points for proving the gateway contract's outbox and inbox. Each
//! call derives one slot key from the box's storage offset and the supplied
//! mapping keys, then fetches the account and storage proofs at a single
//! block.

use gateway_proof_core::{
    GatewayProofError, LedgerClient, MessageBox, MessageBoxLayout, ProofResult, StorageSlotKey,
};
use tracing::info;

use crate::proof::EthereumProofFetcher;
use crate::resolver::EthereumSlotResolver;

/// Proof generator for a gateway's message boxes
///
/// Holds a ledger client and the message box layout. It keeps no state
/// between requests, so concurrent calls are independent.
///
/// # Usage
///
/// ```rust,ignore
/// use gateway_proof_ethereum::{JsonRpcClient, ProofGenerator};
///
/// let generator = ProofGenerator::new(JsonRpcClient::new("http://localhost:8546")?);
///
/// // Prove one outbox entry at the current head
/// let proof = generator
///     .get_outbox_proof(gateway, &[message_hash], None, None)
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProofGenerator<C> {
    fetcher: EthereumProofFetcher<C>,
    resolver: EthereumSlotResolver,
    layout: MessageBoxLayout,
}

impl<C: LedgerClient> ProofGenerator<C> {
    /// Create a generator with the default gateway layout
    pub fn new(client: C) -> Self {
        let layout = MessageBoxLayout::default();
        Self {
            fetcher: EthereumProofFetcher::new(client),
            resolver: EthereumSlotResolver::new(layout.mapping_fold),
            layout,
        }
    }

    /// Create a generator for a deployment-specific layout
    ///
    /// # Errors
    ///
    /// - `GatewayProofError::Config` - the layout failed validation
    pub fn with_layout(client: C, layout: MessageBoxLayout) -> Result<Self, GatewayProofError> {
        layout.validate()?;
        Ok(Self {
            fetcher: EthereumProofFetcher::new(client),
            resolver: EthereumSlotResolver::new(layout.mapping_fold),
            layout,
        })
    }

    pub fn layout(&self) -> &MessageBoxLayout {
        &self.layout
    }

    pub fn client(&self) -> &C {
        self.fetcher.client()
    }

    /// Slot key proven for `message_box` indexed by `keys`
    ///
    /// An empty `keys` list yields the slot of the box root itself. An empty
    /// `offset_override` falls back to the configured offset.
    pub fn slot_key<S: AsRef<str>>(
        &self,
        message_box: MessageBox,
        keys: &[S],
        offset_override: Option<&str>,
    ) -> Result<StorageSlotKey, GatewayProofError> {
        let offset = offset_override
            .filter(|offset| !offset.is_empty())
            .unwrap_or_else(|| self.layout.offset(message_box));
        self.resolver.derive_slot_key(offset, keys)
    }

    /// Generate a proof for the outbox
    ///
    /// # Arguments
    ///
    /// * `address` - Gateway contract address
    /// * `keys` - Mapping keys into the outbox (e.g. a message hash)
    /// * `block_number` - Hex block number, or `None` for the current head
    /// * `offset_override` - Replaces the configured outbox offset
    pub async fn get_outbox_proof<S: AsRef<str>>(
        &self,
        address: &str,
        keys: &[S],
        block_number: Option<&str>,
        offset_override: Option<&str>,
    ) -> Result<ProofResult, GatewayProofError> {
        self.get_message_box_proof(MessageBox::Outbox, address, keys, block_number, offset_override)
            .await
    }

    /// Generate a proof for the inbox
    ///
    /// Arguments as for [`ProofGenerator::get_outbox_proof`].
    pub async fn get_inbox_proof<S: AsRef<str>>(
        &self,
        address: &str,
        keys: &[S],
        block_number: Option<&str>,
        offset_override: Option<&str>,
    ) -> Result<ProofResult, GatewayProofError> {
        self.get_message_box_proof(MessageBox::Inbox, address, keys, block_number, offset_override)
            .await
    }

    /// Generate a proof for either message box
    pub async fn get_message_box_proof<S: AsRef<str>>(
        &self,
        message_box: MessageBox,
        address: &str,
        keys: &[S],
        block_number: Option<&str>,
        offset_override: Option<&str>,
    ) -> Result<ProofResult, GatewayProofError> {
        let slot_key = self.slot_key(message_box, keys, offset_override)?;
        info!("Generating {} proof for {} at slot {}", message_box, address, slot_key);

        self.fetcher
            .fetch_proof(address, &[slot_key], block_number)
            .await
    }
}
