//! Stack Accessor: the fetch → transform → persist unit.

use super::StackEngine;
use crate::domain::entities::{Stack, StackId, StackValue};
use crate::domain::errors::StackError;
use crate::ports::outbound::{ElementCipher, StackLedger, TimeSource};
use tracing::debug;

impl<L, C, T> StackEngine<L, C, T>
where
    L: StackLedger,
    C: ElementCipher,
    T: TimeSource,
{
    pub(crate) fn fetch(&self, id: &StackId, operation: &'static str) -> Result<Stack, StackError> {
        let stack = self
            .ledger
            .fetch(id)
            .map_err(|e| StackError::from_ledger(id, operation, e))?;
        debug!(
            "[stack] Fetched {} v{} ({} elements) for {}",
            id,
            stack.version,
            stack.len(),
            operation
        );
        Ok(stack)
    }

    fn persist(&self, stack: &Stack, operation: &'static str) -> Result<u64, StackError> {
        let version = self
            .ledger
            .persist(stack)
            .map_err(|e| StackError::from_ledger(&stack.id, operation, e))?;
        debug!(
            "[stack] Persisted {} v{} ({} elements) after {}",
            stack.id,
            version,
            stack.len(),
            operation
        );
        Ok(version)
    }

    /// Run a read-only closure against a fresh copy. Nothing is persisted.
    pub(crate) fn read<R, F>(&self, id: &StackId, operation: &'static str, f: F) -> Result<R, StackError>
    where
        F: FnOnce(&Stack) -> Result<R, StackError>,
    {
        let stack = self.fetch(id, operation)?;
        f(&stack)
    }

    /// Mutation unit with the standard operation log entry.
    pub(crate) fn mutate<R, F>(&self, id: &StackId, operation: &'static str, f: F) -> Result<R, StackError>
    where
        F: FnOnce(&mut Stack) -> Result<R, StackError>,
    {
        self.mutate_inner(id, operation, self.config.record_operations, f)
    }

    /// Mutation unit that writes no log entry of its own.
    pub(crate) fn mutate_unrecorded<R, F>(
        &self,
        id: &StackId,
        operation: &'static str,
        f: F,
    ) -> Result<R, StackError>
    where
        F: FnOnce(&mut Stack) -> Result<R, StackError>,
    {
        self.mutate_inner(id, operation, false, f)
    }

    fn mutate_inner<R, F>(
        &self,
        id: &StackId,
        operation: &'static str,
        record: bool,
        f: F,
    ) -> Result<R, StackError>
    where
        F: FnOnce(&mut Stack) -> Result<R, StackError>,
    {
        let handle = self.locks.handle(id);
        let result = {
            let _guard = handle.lock();
            self.run_unit(id, operation, record, f)
        };
        self.locks.release(id, handle);
        result
    }

    fn run_unit<R, F>(
        &self,
        id: &StackId,
        operation: &'static str,
        record: bool,
        f: F,
    ) -> Result<R, StackError>
    where
        F: FnOnce(&mut Stack) -> Result<R, StackError>,
    {
        let mut stack = self.fetch(id, operation)?;
        let before = stack.len();
        let result = f(&mut stack)?;

        if record {
            let details = format!("{} -> {} elements", before, stack.len());
            self.append_log(&mut stack, operation, operation, &details)?;
        }
        self.persist(&stack, operation)?;
        Ok(result)
    }

    /// Store a new stack built from already-encrypted values.
    pub(crate) fn create_from(
        &self,
        source: &StackId,
        operation: &'static str,
        values: Vec<StackValue>,
    ) -> Result<StackId, StackError> {
        let count = values.len();
        let id = self
            .ledger
            .create(values)
            .map_err(|e| StackError::from_ledger(source, operation, e))?;
        tracing::info!("[stack] 📦 Created {} with {} elements ({})", id, count, operation);
        Ok(id)
    }
}
