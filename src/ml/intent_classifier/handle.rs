//! Shared slot for the live engine.

use std::sync::Arc;

use log::info;
use parking_lot::RwLock;

use crate::error::{IntentError, Result};

use super::engine::ClassificationEngine;

/// Holds the engine currently serving requests.
///
/// Callers take a snapshot with [`current`](Self::current) and classify
/// against it without holding the lock. [`swap`](Self::swap) installs a newly
/// trained engine; requests already holding the previous snapshot finish on
/// it undisturbed.
#[derive(Debug)]
pub struct EngineHandle {
    inner: RwLock<Arc<ClassificationEngine>>,
}

impl EngineHandle {
    /// Wrap a trained engine.
    pub fn new(engine: ClassificationEngine) -> Result<Self> {
        Self::ensure_ready(&engine)?;
        Ok(Self {
            inner: RwLock::new(Arc::new(engine)),
        })
    }

    /// Snapshot of the live engine.
    pub fn current(&self) -> Arc<ClassificationEngine> {
        self.inner.read().clone()
    }

    /// Replace the live engine, returning the previous one.
    pub fn swap(&self, engine: ClassificationEngine) -> Result<Arc<ClassificationEngine>> {
        Self::ensure_ready(&engine)?;
        let previous = std::mem::replace(&mut *self.inner.write(), Arc::new(engine));
        info!("swapped in a newly trained engine");
        Ok(previous)
    }

    fn ensure_ready(engine: &ClassificationEngine) -> Result<()> {
        if engine.is_ready() {
            Ok(())
        } else {
            Err(IntentError::EngineNotReady)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::config::EngineConfig;
    use crate::ml::intent_classifier::repository::IntentRepository;
    use crate::ml::intent_classifier::types::Intent;

    fn engine(greeting_response: &str) -> ClassificationEngine {
        let repository = IntentRepository::from_intents(vec![
            Intent::new("greeting", ["hi", "hello"], [greeting_response]),
            Intent::new("farewell", ["bye", "goodbye"], ["Goodbye!"]),
        ])
        .unwrap();
        ClassificationEngine::train(repository, EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_untrained_engine_is_rejected() {
        let untrained = ClassificationEngine::new(EngineConfig::default());
        assert!(matches!(
            EngineHandle::new(untrained),
            Err(IntentError::EngineNotReady)
        ));

        let handle = EngineHandle::new(engine("Hello!")).unwrap();
        let untrained = ClassificationEngine::new(EngineConfig::default());
        assert!(handle.swap(untrained).is_err());
        assert_eq!(handle.current().classify("hi").unwrap(), "Hello!");
    }

    #[test]
    fn test_swap_keeps_old_snapshots_alive() {
        let handle = EngineHandle::new(engine("Hello!")).unwrap();
        let before = handle.current();

        let previous = handle.swap(engine("Welcome back!")).unwrap();

        assert!(Arc::ptr_eq(&before, &previous));
        assert_eq!(before.classify("hello").unwrap(), "Hello!");
        assert_eq!(handle.current().classify("hello").unwrap(), "Welcome back!");
    }

    #[test]
    fn test_concurrent_classification() {
        let handle = Arc::new(EngineHandle::new(engine("Hello!")).unwrap());

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let handle = Arc::clone(&handle);
                thread::spawn(move || {
                    let engine = handle.current();
                    (0..25)
                        .map(|_| engine.classify("hello").unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for worker in workers {
            assert!(worker.join().unwrap().iter().all(|r| r == "Hello!"));
        }
    }
}
