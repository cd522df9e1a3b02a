//! Registry of independently addressable proof chains.
//!
//! A `ProofLedger` hands out `Arc<ProofChain>`s keyed by chain identifier
//! and refuses to register two chains under the same identifier.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

use proofchain_contracts::{
    digest::Digest,
    error::{ChainError, ChainResult},
    report::VerificationReport,
};
use proofchain_hash::merkle_root;

use crate::chain::ProofChain;

#[derive(Default)]
pub struct ProofLedger {
    chains: Mutex<BTreeMap<String, Arc<ProofChain>>>,
}

impl ProofLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn chains(&self) -> MutexGuard<'_, BTreeMap<String, Arc<ProofChain>>> {
        self.chains.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create and register an empty chain.
    ///
    /// With `Some(id)` the chain uses that identifier and the call fails with
    /// `ChainError::DuplicateChainId` if it is taken. With `None` an
    /// identifier is generated.
    pub fn create_chain(&self, chain_id: Option<String>) -> ChainResult<Arc<ProofChain>> {
        let chain = match chain_id {
            Some(id) => ProofChain::with_id(id)?,
            None => ProofChain::new(),
        };
        self.register(chain)
    }

    /// Register an existing chain, e.g. one rebuilt by `import_from_json`.
    pub fn register(&self, chain: ProofChain) -> ChainResult<Arc<ProofChain>> {
        let mut chains = self.chains();
        let chain_id = chain.chain_id().to_string();
        if chains.contains_key(&chain_id) {
            return Err(ChainError::DuplicateChainId { chain_id });
        }

        let chain = Arc::new(chain);
        chains.insert(chain_id.clone(), Arc::clone(&chain));
        info!(chain_id = %chain_id, records = chain.len(), "proof chain registered");
        Ok(chain)
    }

    pub fn chain(&self, chain_id: &str) -> Option<Arc<ProofChain>> {
        self.chains().get(chain_id).cloned()
    }

    /// Registered identifiers in ascending order.
    pub fn chain_ids(&self) -> Vec<String> {
        self.chains().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.chains().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Verify every registered chain.
    pub fn verify_all(&self) -> BTreeMap<String, VerificationReport> {
        let chains: Vec<Arc<ProofChain>> = self.chains().values().cloned().collect();
        chains
            .into_iter()
            .map(|chain| (chain.chain_id().to_string(), chain.verify()))
            .collect()
    }

    /// Merkle root over each chain's last digest, in chain-id order.
    pub fn merkle_root(&self) -> Digest {
        let tails: Vec<Digest> = self
            .chains()
            .values()
            .map(|chain| chain.last_digest())
            .collect();
        merkle_root(&tails)
    }
}
