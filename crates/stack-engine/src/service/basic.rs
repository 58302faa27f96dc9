//! Classical stack operations.

use super::operations::*;
use super::StackEngine;
use crate::domain::entities::{PlainValue, Stack, StackId};
use crate::domain::errors::{SequenceError, StackError};
use crate::domain::sequence;
use crate::ports::inbound::BasicStackApi;
use crate::ports::outbound::{ElementCipher, StackLedger, TimeSource};
use tracing::warn;

impl<L, C, T> StackEngine<L, C, T>
where
    L: StackLedger,
    C: ElementCipher,
    T: TimeSource,
{
    /// Record an overflow entry when a write pushed the stack past capacity.
    /// The write itself still goes through.
    pub(crate) fn note_overflow(&self, stack: &mut Stack, operation: &'static str) -> Result<(), StackError> {
        if !self.config.exceeds_capacity(stack.len()) {
            return Ok(());
        }
        let capacity = self.config.capacity.unwrap_or_default();
        warn!(
            "[stack] ⚠️ {} holds {} elements, capacity {} (during {})",
            stack.id,
            stack.len(),
            capacity,
            operation
        );
        let details = format!("{} elements exceed capacity {}", stack.len(), capacity);
        self.append_log(stack, operation, STACK_OVERFLOW, &details)
    }

    /// Context for a pop-family call that found too few elements.
    pub(crate) fn underflow(&self, id: &StackId, operation: &'static str, err: SequenceError) -> StackError {
        warn!("[stack] ⚠️ Underflow on {} during {}: {}", id, operation, err);
        StackError::from_sequence(id, operation, err)
    }
}

fn touch_top(stack: &mut Stack) {
    stack.last_accessed_index = stack.len().checked_sub(1);
}

impl<L, C, T> BasicStackApi for StackEngine<L, C, T>
where
    L: StackLedger,
    C: ElementCipher,
    T: TimeSource,
{
    fn create_stack(&self, values: Vec<PlainValue>) -> Result<StackId, StackError> {
        let pending = StackId::new("<new>");
        let sealed = self.seal_all(&pending, CREATE, &values)?;
        self.create_from(&pending, CREATE, sealed)
    }

    fn size(&self, id: &StackId) -> Result<usize, StackError> {
        self.read(id, SIZE, |stack| Ok(stack.len()))
    }

    fn is_empty(&self, id: &StackId) -> Result<bool, StackError> {
        self.read(id, SIZE, |stack| Ok(stack.is_empty()))
    }

    fn push(&self, id: &StackId, value: PlainValue) -> Result<(), StackError> {
        let sealed = self.seal_value(id, PUSH, &value)?;
        self.mutate(id, PUSH, |stack| {
            stack.values.push(sealed);
            touch_top(stack);
            self.note_overflow(stack, PUSH)
        })
    }

    fn pop(&self, id: &StackId) -> Result<PlainValue, StackError> {
        self.mutate(id, POP, |stack| {
            let top = sequence::pop_top(&mut stack.values).map_err(|e| self.underflow(id, POP, e))?;
            let plain = self.open_value(id, POP, &top)?;
            touch_top(stack);
            Ok(plain)
        })
    }

    fn peek(&self, id: &StackId) -> Result<PlainValue, StackError> {
        self.read(id, PEEK, |stack| {
            let top = sequence::top(&stack.values)
                .map_err(|e| StackError::from_sequence(id, PEEK, e))?;
            self.open_value(id, PEEK, top)
        })
    }

    fn peek_at(&self, id: &StackId, depth: usize) -> Result<PlainValue, StackError> {
        self.read(id, PEEK_AT, |stack| {
            let index = sequence::index_from_top(depth, stack.len())
                .map_err(|e| StackError::from_sequence(id, PEEK_AT, e))?;
            self.open_value(id, PEEK_AT, &stack.values[index])
        })
    }

    fn clear(&self, id: &StackId) -> Result<(), StackError> {
        self.mutate(id, CLEAR, |stack| {
            stack.values.clear();
            stack.last_accessed_index = None;
            Ok(())
        })
    }

    fn duplicate(&self, id: &StackId) -> Result<(), StackError> {
        self.mutate(id, DUPLICATE, |stack| {
            let top = sequence::top(&stack.values)
                .map_err(|e| StackError::from_sequence(id, DUPLICATE, e))?
                .clone();
            stack.values.push(top);
            touch_top(stack);
            self.note_overflow(stack, DUPLICATE)
        })
    }

    fn swap_top(&self, id: &StackId) -> Result<(), StackError> {
        self.mutate(id, SWAP_TOP, |stack| {
            sequence::swap_top(&mut stack.values)
                .map_err(|e| StackError::from_sequence(id, SWAP_TOP, e))?;
            touch_top(stack);
            Ok(())
        })
    }

    fn rotate_top3(&self, id: &StackId) -> Result<(), StackError> {
        self.mutate(id, ROTATE_TOP3, |stack| {
            sequence::rotate_top3(&mut stack.values)
                .map_err(|e| StackError::from_sequence(id, ROTATE_TOP3, e))?;
            touch_top(stack);
            Ok(())
        })
    }

    fn copy_to_top(&self, id: &StackId, index: usize) -> Result<(), StackError> {
        self.mutate(id, COPY_TO_TOP, |stack| {
            sequence::check_index(index, stack.len())
                .map_err(|e| StackError::from_sequence(id, COPY_TO_TOP, e))?;
            let copy = stack.values[index].clone();
            stack.values.push(copy);
            touch_top(stack);
            self.note_overflow(stack, COPY_TO_TOP)
        })
    }

    fn replace_at(&self, id: &StackId, index: usize, value: PlainValue) -> Result<(), StackError> {
        let sealed = self.seal_value(id, REPLACE_AT, &value)?;
        self.mutate(id, REPLACE_AT, |stack| {
            sequence::check_index(index, stack.len())
                .map_err(|e| StackError::from_sequence(id, REPLACE_AT, e))?;
            stack.values[index] = sealed;
            stack.last_accessed_index = Some(index);
            Ok(())
        })
    }

    fn insert_at(&self, id: &StackId, index: usize, value: PlainValue) -> Result<(), StackError> {
        let sealed = self.seal_value(id, INSERT_AT, &value)?;
        self.mutate(id, INSERT_AT, |stack| {
            sequence::check_insert_index(index, stack.len())
                .map_err(|e| StackError::from_sequence(id, INSERT_AT, e))?;
            stack.values.insert(index, sealed);
            stack.last_accessed_index = Some(index);
            self.note_overflow(stack, INSERT_AT)
        })
    }

    fn remove_at(&self, id: &StackId, index: usize) -> Result<(), StackError> {
        self.mutate(id, REMOVE_AT, |stack| {
            sequence::check_index(index, stack.len())
                .map_err(|e| StackError::from_sequence(id, REMOVE_AT, e))?;
            stack.values.remove(index);
            stack.last_accessed_index = Some(index);
            Ok(())
        })
    }
}
