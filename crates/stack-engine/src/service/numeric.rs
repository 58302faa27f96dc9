//! Reductions and transforms over the numeric facet. Payloads stay sealed.

use super::operations::*;
use super::StackEngine;
use crate::domain::entities::StackId;
use crate::domain::errors::{SequenceError, StackError};
use crate::domain::numeric::{self, FacetTransform};
use crate::domain::sequence;
use crate::ports::inbound::NumericStackApi;
use crate::ports::outbound::{ElementCipher, StackLedger, TimeSource};

impl<L, C, T> StackEngine<L, C, T>
where
    L: StackLedger,
    C: ElementCipher,
    T: TimeSource,
{
    fn reduce<F>(&self, id: &StackId, operation: &'static str, f: F) -> Result<f64, StackError>
    where
        F: FnOnce(&[f64]) -> Result<f64, SequenceError>,
    {
        self.read(id, operation, |stack| {
            f(&stack.facets()).map_err(|e| StackError::from_sequence(id, operation, e))
        })
    }

    fn transform_facets(&self, id: &StackId, transform: FacetTransform) -> Result<(), StackError> {
        self.mutate(id, transform.name(), |stack| {
            for element in stack.values.iter_mut() {
                element.value = transform.apply(element.value);
            }
            Ok(())
        })
    }
}

impl<L, C, T> NumericStackApi for StackEngine<L, C, T>
where
    L: StackLedger,
    C: ElementCipher,
    T: TimeSource,
{
    fn sum(&self, id: &StackId) -> Result<f64, StackError> {
        self.reduce(id, SUM, |f| Ok(numeric::sum(f)))
    }

    fn product(&self, id: &StackId) -> Result<f64, StackError> {
        self.reduce(id, PRODUCT, |f| Ok(numeric::product(f)))
    }

    fn average(&self, id: &StackId) -> Result<f64, StackError> {
        self.reduce(id, AVERAGE, numeric::average)
    }

    fn variance(&self, id: &StackId) -> Result<f64, StackError> {
        self.reduce(id, VARIANCE, numeric::variance)
    }

    fn standard_deviation(&self, id: &StackId) -> Result<f64, StackError> {
        self.reduce(id, STANDARD_DEVIATION, numeric::standard_deviation)
    }

    fn median(&self, id: &StackId) -> Result<f64, StackError> {
        self.reduce(id, MEDIAN, numeric::median)
    }

    fn min_value(&self, id: &StackId) -> Result<f64, StackError> {
        self.reduce(id, MIN, numeric::min)
    }

    fn max_value(&self, id: &StackId) -> Result<f64, StackError> {
        self.reduce(id, MAX, numeric::max)
    }

    fn modulo(&self, id: &StackId) -> Result<f64, StackError> {
        self.mutate(id, MODULO, |stack| {
            let fail = |e| StackError::from_sequence(id, MODULO, e);
            sequence::require_len(stack.len(), 2).map_err(fail)?;
            let top = sequence::pop_top(&mut stack.values).map_err(fail)?;
            let lower = stack
                .values
                .last_mut()
                .ok_or(SequenceError::Empty)
                .map_err(fail)?;
            let result = numeric::modulo(lower.value, top.value).map_err(fail)?;
            lower.value = result;
            stack.last_accessed_index = stack.len().checked_sub(1);
            Ok(result)
        })
    }

    fn absolute_values(&self, id: &StackId) -> Result<(), StackError> {
        self.transform_facets(id, FacetTransform::Absolute)
    }

    fn power_values(&self, id: &StackId, exponent: f64) -> Result<(), StackError> {
        self.transform_facets(id, FacetTransform::Power(exponent))
    }

    fn exponential_values(&self, id: &StackId) -> Result<(), StackError> {
        self.transform_facets(id, FacetTransform::Exponential)
    }

    fn floor_values(&self, id: &StackId) -> Result<(), StackError> {
        self.transform_facets(id, FacetTransform::Floor)
    }

    fn ceiling_values(&self, id: &StackId) -> Result<(), StackError> {
        self.transform_facets(id, FacetTransform::Ceiling)
    }

    fn round_values(&self, id: &StackId) -> Result<(), StackError> {
        self.transform_facets(id, FacetTransform::Round)
    }

    fn normalize(&self, id: &StackId) -> Result<(), StackError> {
        self.mutate(id, NORMALIZE, |stack| {
            let scaled = numeric::normalize(&stack.facets())
                .map_err(|e| StackError::from_sequence(id, NORMALIZE, e))?;
            for (element, v) in stack.values.iter_mut().zip(scaled) {
                element.value = v;
            }
            Ok(())
        })
    }
}
