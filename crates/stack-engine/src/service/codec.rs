//! Element Codec: the only place plaintext crosses the cipher boundary.

use super::StackEngine;
use crate::domain::entities::{PlainValue, Stack, StackId, StackLog, StackValue, LogEntry};
use crate::domain::errors::StackError;
use crate::ports::outbound::{ElementCipher, StackLedger, TimeSource};

impl<L, C, T> StackEngine<L, C, T>
where
    L: StackLedger,
    C: ElementCipher,
    T: TimeSource,
{
    /// Checksum the plaintext, then encrypt it.
    pub(crate) fn seal_value(
        &self,
        id: &StackId,
        operation: &'static str,
        plain: &PlainValue,
    ) -> Result<StackValue, StackError> {
        let checksum = self.cipher.checksum(&plain.data);
        let data = self
            .cipher
            .encrypt(&plain.data)
            .map_err(|e| StackError::EncryptionError {
                stack_id: id.clone(),
                operation,
                reason: e.to_string(),
            })?;
        Ok(StackValue {
            data,
            value: plain.value,
            checksum,
        })
    }

    /// Encrypt a batch; the first failure aborts it.
    pub(crate) fn seal_all(
        &self,
        id: &StackId,
        operation: &'static str,
        plains: &[PlainValue],
    ) -> Result<Vec<StackValue>, StackError> {
        plains
            .iter()
            .map(|p| self.seal_value(id, operation, p))
            .collect()
    }

    pub(crate) fn open_value(
        &self,
        id: &StackId,
        operation: &'static str,
        stored: &StackValue,
    ) -> Result<PlainValue, StackError> {
        let data = self.decrypt(id, operation, &stored.data)?;
        Ok(PlainValue {
            data,
            value: stored.value,
        })
    }

    pub(crate) fn open_all(
        &self,
        id: &StackId,
        operation: &'static str,
        stored: &[StackValue],
    ) -> Result<Vec<PlainValue>, StackError> {
        stored
            .iter()
            .map(|s| self.open_value(id, operation, s))
            .collect()
    }

    /// Encrypt `details` and append a log record, honoring retention.
    pub(crate) fn append_log(
        &self,
        stack: &mut Stack,
        operation: &'static str,
        category: &str,
        details: &str,
    ) -> Result<(), StackError> {
        let sealed = self
            .cipher
            .encrypt(details.as_bytes())
            .map_err(|e| StackError::EncryptionError {
                stack_id: stack.id.clone(),
                operation,
                reason: e.to_string(),
            })?;
        let entry = StackLog {
            operation: category.to_string(),
            details: sealed,
            timestamp: self.time_source.now(),
        };
        stack.record_log(entry, self.config.max_log_entries);
        Ok(())
    }

    pub(crate) fn open_log(
        &self,
        id: &StackId,
        operation: &'static str,
        log: &StackLog,
    ) -> Result<LogEntry, StackError> {
        let details = self.decrypt(id, operation, &log.details)?;
        Ok(LogEntry {
            operation: log.operation.clone(),
            details: String::from_utf8_lossy(&details).into_owned(),
            timestamp: log.timestamp,
        })
    }

    fn decrypt(&self, id: &StackId, operation: &'static str, ciphertext: &[u8]) -> Result<Vec<u8>, StackError> {
        self.cipher
            .decrypt(ciphertext)
            .map_err(|e| StackError::DecryptionError {
                stack_id: id.clone(),
                operation,
                reason: e.to_string(),
            })
    }
}
