//! Shared fixtures for the engine's unit tests.

use crate::adapters::{InMemoryLedger, XChaChaElementCipher};
use crate::domain::config::EngineConfig;
use crate::domain::entities::{Checksum, PlainValue, StackId, Timestamp};
use crate::domain::errors::CipherError;
use crate::ports::inbound::BasicStackApi;
use crate::ports::outbound::{ElementCipher, StackLedger, TimeSource};
use crate::service::{StackEngine, StackEngineDependencies};
use std::sync::atomic::{AtomicBool, Ordering};

pub const FIXED_NOW: Timestamp = 1_700_000_000;

/// Real cipher with switchable failures.
pub struct FlakyCipher {
    inner: XChaChaElementCipher,
    fail_encrypt: AtomicBool,
    fail_decrypt: AtomicBool,
}

impl FlakyCipher {
    pub fn new() -> Self {
        Self {
            inner: XChaChaElementCipher::ephemeral(),
            fail_encrypt: AtomicBool::new(false),
            fail_decrypt: AtomicBool::new(false),
        }
    }

    pub fn fail_encrypt(&self, fail: bool) {
        self.fail_encrypt.store(fail, Ordering::SeqCst);
    }

    pub fn fail_decrypt(&self, fail: bool) {
        self.fail_decrypt.store(fail, Ordering::SeqCst);
    }
}

impl ElementCipher for FlakyCipher {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        if self.fail_encrypt.load(Ordering::SeqCst) {
            return Err(CipherError::Encrypt("injected".into()));
        }
        self.inner.encrypt(plaintext)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        if self.fail_decrypt.load(Ordering::SeqCst) {
            return Err(CipherError::Decrypt("injected".into()));
        }
        self.inner.decrypt(ciphertext)
    }

    fn checksum(&self, plaintext: &[u8]) -> Checksum {
        self.inner.checksum(plaintext)
    }
}

pub struct FixedTimeSource;

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp {
        FIXED_NOW
    }
}

pub type TestEngine = StackEngine<InMemoryLedger, FlakyCipher, FixedTimeSource>;

pub fn make_engine() -> TestEngine {
    make_engine_with(EngineConfig::default())
}

pub fn make_engine_with(config: EngineConfig) -> TestEngine {
    StackEngine::new(
        StackEngineDependencies {
            ledger: InMemoryLedger::new(),
            cipher: FlakyCipher::new(),
            time_source: FixedTimeSource,
        },
        config,
    )
}

pub fn pv(data: impl Into<Vec<u8>>, value: f64) -> PlainValue {
    PlainValue::new(data, value)
}

pub fn seed(engine: &TestEngine, elements: &[(&str, f64)]) -> StackId {
    let values = elements.iter().map(|(d, v)| pv(*d, *v)).collect();
    engine.create_stack(values).unwrap()
}

/// Stack whose payloads are `e0`, `e1`, ... with the given facets.
pub fn seed_facets(engine: &TestEngine, facets: &[f64]) -> StackId {
    let values = facets
        .iter()
        .enumerate()
        .map(|(i, v)| pv(format!("e{}", i), *v))
        .collect();
    engine.create_stack(values).unwrap()
}

/// Decrypted `(data, facet)` pairs, bottom first.
pub fn contents(engine: &TestEngine, id: &StackId) -> Vec<(String, f64)> {
    let stack = engine.ledger().fetch(id).unwrap();
    engine
        .open_all(id, "test", &stack.values)
        .unwrap()
        .into_iter()
        .map(|p| (String::from_utf8(p.data).unwrap(), p.value))
        .collect()
}

pub fn facets(engine: &TestEngine, id: &StackId) -> Vec<f64> {
    engine.ledger().fetch(id).unwrap().facets()
}

pub fn data_of(values: &[PlainValue]) -> Vec<String> {
    values
        .iter()
        .map(|p| String::from_utf8_lossy(&p.data).into_owned())
        .collect()
}
