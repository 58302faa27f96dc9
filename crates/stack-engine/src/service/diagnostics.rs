//! Metadata and integrity diagnostics.

use super::operations::*;
use super::StackEngine;
use crate::domain::entities::{LogEntry, StackId};
use crate::domain::errors::StackError;
use crate::domain::sequence;
use crate::ports::inbound::DiagnosticsApi;
use crate::ports::outbound::{ElementCipher, StackLedger, TimeSource};
use tracing::{error, warn};

impl<L, C, T> DiagnosticsApi for StackEngine<L, C, T>
where
    L: StackLedger,
    C: ElementCipher,
    T: TimeSource,
{
    fn last_accessed_index(&self, id: &StackId) -> Result<Option<usize>, StackError> {
        self.read(id, LAST_ACCESSED, |stack| Ok(stack.last_accessed_index))
    }

    fn append_operation_log(
        &self,
        id: &StackId,
        operation: &str,
        details: &str,
    ) -> Result<(), StackError> {
        self.mutate_unrecorded(id, APPEND_LOG, |stack| {
            self.append_log(stack, APPEND_LOG, operation, details)
        })
    }

    fn operation_logs(&self, id: &StackId) -> Result<Vec<LogEntry>, StackError> {
        self.read(id, OPERATION_LOGS, |stack| {
            stack
                .operation_logs
                .iter()
                .map(|log| self.open_log(id, OPERATION_LOGS, log))
                .collect()
        })
    }

    fn log_stack_overflow(&self, id: &StackId) -> Result<(), StackError> {
        self.mutate_unrecorded(id, STACK_OVERFLOW, |stack| {
            warn!("[stack] ⚠️ Overflow reported on {} ({} elements)", id, stack.len());
            let details = format!("{} elements", stack.len());
            self.append_log(stack, STACK_OVERFLOW, STACK_OVERFLOW, &details)
        })
    }

    fn log_stack_underflow(&self, id: &StackId) -> Result<(), StackError> {
        self.mutate_unrecorded(id, STACK_UNDERFLOW, |stack| {
            warn!("[stack] ⚠️ Underflow reported on {} ({} elements)", id, stack.len());
            let details = format!("{} elements", stack.len());
            self.append_log(stack, STACK_UNDERFLOW, STACK_UNDERFLOW, &details)
        })
    }

    fn validate_bounds(&self, id: &StackId, index: usize) -> Result<(), StackError> {
        self.read(id, VALIDATE_BOUNDS, |stack| {
            sequence::check_index(index, stack.len())
                .map_err(|e| StackError::from_sequence(id, VALIDATE_BOUNDS, e))
        })
    }

    fn validate_integrity(&self, id: &StackId) -> Result<(), StackError> {
        self.read(id, VALIDATE_INTEGRITY, |stack| {
            for (index, stored) in stack.values.iter().enumerate() {
                let plain = self.open_value(id, VALIDATE_INTEGRITY, stored)?;
                if !self.cipher.verify_checksum(&plain.data, &stored.checksum) {
                    error!("[stack] ❌ Checksum mismatch in {} at index {}", id, index);
                    return Err(StackError::IntegrityCheckFailed {
                        stack_id: id.clone(),
                        index,
                    });
                }
            }
            Ok(())
        })
    }
}
