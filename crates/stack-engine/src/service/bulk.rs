//! Multi-element and set operations.
//!
//! Split, merge and clone copy ciphertext as-is. Set operations decrypt both
//! stacks and compare plaintext, since equal plaintexts never share a
//! ciphertext under a random-nonce cipher.

use super::operations::*;
use super::StackEngine;
use crate::domain::entities::{PlainValue, StackId};
use crate::domain::errors::StackError;
use crate::domain::{sequence, set_ops};
use crate::ports::inbound::BulkStackApi;
use crate::ports::outbound::{ElementCipher, StackLedger, TimeSource};
use tracing::{info, warn};

impl<L, C, T> StackEngine<L, C, T>
where
    L: StackLedger,
    C: ElementCipher,
    T: TimeSource,
{
    fn open_pair(
        &self,
        a: &StackId,
        b: &StackId,
        operation: &'static str,
    ) -> Result<(Vec<PlainValue>, Vec<PlainValue>), StackError> {
        let left = self.read(a, operation, |s| self.open_all(a, operation, &s.values))?;
        let right = self.read(b, operation, |s| self.open_all(b, operation, &s.values))?;
        Ok((left, right))
    }
}

impl<L, C, T> BulkStackApi for StackEngine<L, C, T>
where
    L: StackLedger,
    C: ElementCipher,
    T: TimeSource,
{
    fn push_multiple(&self, id: &StackId, values: Vec<PlainValue>) -> Result<(), StackError> {
        let sealed = self.seal_all(id, PUSH_MULTIPLE, &values)?;
        self.mutate(id, PUSH_MULTIPLE, |stack| {
            stack.values.extend(sealed);
            stack.last_accessed_index = stack.len().checked_sub(1);
            self.note_overflow(stack, PUSH_MULTIPLE)
        })
    }

    fn pop_multiple(&self, id: &StackId, count: usize) -> Result<Vec<PlainValue>, StackError> {
        self.mutate(id, POP_MULTIPLE, |stack| {
            let removed = sequence::pop_many(&mut stack.values, count)
                .map_err(|e| self.underflow(id, POP_MULTIPLE, e))?;
            let plains = self.open_all(id, POP_MULTIPLE, &removed)?;
            stack.last_accessed_index = stack.len().checked_sub(1);
            Ok(plains)
        })
    }

    fn split(&self, id: &StackId, index: usize) -> Result<(StackId, StackId), StackError> {
        let (lower, upper) = self.read(id, SPLIT, |stack| {
            sequence::split_at(&stack.values, index).map_err(|e| StackError::from_sequence(id, SPLIT, e))
        })?;
        let lower_id = self.create_from(id, SPLIT, lower)?;
        let upper_id = self.create_from(id, SPLIT, upper).map_err(|e| {
            warn!(
                "[stack] ⚠️ Split of {} stored lower half {} but failed on the upper half: {}",
                id, lower_id, e
            );
            e
        })?;
        info!("[stack] ✂️ Split {} at {} into {} and {}", id, index, lower_id, upper_id);
        Ok((lower_id, upper_id))
    }

    fn merge(&self, a: &StackId, b: &StackId) -> Result<StackId, StackError> {
        let mut values = self.read(a, MERGE, |s| Ok(s.values.clone()))?;
        values.extend(self.read(b, MERGE, |s| Ok(s.values.clone()))?);
        let merged = self.create_from(a, MERGE, values)?;
        info!("[stack] 🔗 Merged {} and {} into {}", a, b, merged);
        Ok(merged)
    }

    fn clone_stack(&self, id: &StackId) -> Result<StackId, StackError> {
        let values = self.read(id, CLONE, |s| Ok(s.values.clone()))?;
        self.create_from(id, CLONE, values)
    }

    fn reverse(&self, id: &StackId) -> Result<(), StackError> {
        self.mutate(id, REVERSE, |stack| {
            stack.values.reverse();
            Ok(())
        })
    }

    fn difference(&self, a: &StackId, b: &StackId) -> Result<Vec<PlainValue>, StackError> {
        let (left, right) = self.open_pair(a, b, DIFFERENCE)?;
        Ok(set_ops::difference(&left, &right))
    }

    fn union(&self, a: &StackId, b: &StackId) -> Result<Vec<PlainValue>, StackError> {
        let (left, right) = self.open_pair(a, b, UNION)?;
        Ok(set_ops::union(&left, &right))
    }

    fn intersection(&self, a: &StackId, b: &StackId) -> Result<Vec<PlainValue>, StackError> {
        let (left, right) = self.open_pair(a, b, INTERSECTION)?;
        Ok(set_ops::intersection(&left, &right))
    }

    fn exclusive_elements(
        &self,
        a: &StackId,
        b: &StackId,
    ) -> Result<Vec<PlainValue>, StackError> {
        let (left, right) = self.open_pair(a, b, EXCLUSIVE)?;
        Ok(set_ops::symmetric_difference(&left, &right))
    }
}
