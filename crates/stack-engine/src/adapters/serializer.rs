//! # Stack Serializer
//!
//! Bincode encoding of whole stacks for [`crate::KvLedger`].

use crate::domain::entities::Stack;
use crate::domain::errors::LedgerError;
use crate::ports::outbound::StackSerializer;

/// Default stack serializer using bincode.
#[derive(Debug, Default, Clone, Copy)]
pub struct BincodeStackSerializer;

impl StackSerializer for BincodeStackSerializer {
    fn serialize(&self, stack: &Stack) -> Result<Vec<u8>, LedgerError> {
        bincode::serialize(stack).map_err(|e| LedgerError::Serialization(e.to_string()))
    }

    fn deserialize(&self, data: &[u8]) -> Result<Stack, LedgerError> {
        bincode::deserialize(data).map_err(|e| LedgerError::Serialization(e.to_string()))
    }
}
