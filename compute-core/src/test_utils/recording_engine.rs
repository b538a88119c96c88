//! RecordingEngine: remembers every dispatch before forwarding it.

use std::sync::{Arc, Mutex};

use crate::datum::Datum;
use crate::error::KernelError;
use crate::kernel::KernelEngine;
use crate::options::FunctionOptions;
use crate::pool::MemoryPool;

/// One recorded dispatch call.
#[derive(Debug, Clone)]
pub struct DispatchRecord {
    /// Function name as dispatched.
    pub function: String,
    /// Data arguments.
    pub args: Vec<Datum>,
    /// Resolved configuration value, if any.
    pub options: Option<Box<dyn FunctionOptions>>,
    /// Backend name of the selected pool, if one was passed.
    pub pool: Option<String>,
}

/// An engine that records each call and forwards it to an inner engine.
/// Use `.calls()` to inspect what was dispatched.
pub struct RecordingEngine {
    inner: Arc<dyn KernelEngine>,
    calls: Mutex<Vec<DispatchRecord>>,
}

impl RecordingEngine {
    /// Wrap `inner`.
    pub fn new(inner: Arc<dyn KernelEngine>) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Wrap a [`ReferenceEngine`](super::ReferenceEngine).
    pub fn reference() -> Self {
        Self::new(Arc::new(super::ReferenceEngine::new()))
    }

    /// Snapshot of all recorded calls.
    pub fn calls(&self) -> Vec<DispatchRecord> {
        self.calls.lock().unwrap().clone()
    }

    /// The most recent call.
    pub fn last(&self) -> Option<DispatchRecord> {
        self.calls.lock().unwrap().last().cloned()
    }

    /// Forget all recorded calls.
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl KernelEngine for RecordingEngine {
    fn dispatch(
        &self,
        name: &str,
        args: &[Datum],
        options: Option<&dyn FunctionOptions>,
        pool: Option<&dyn MemoryPool>,
    ) -> Result<Datum, KernelError> {
        self.calls.lock().unwrap().push(DispatchRecord {
            function: name.to_owned(),
            args: args.to_vec(),
            options: options.map(FunctionOptions::clone_box),
            pool: pool.map(|p| p.backend_name().to_owned()),
        });
        self.inner.dispatch(name, args, options, pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datum::Array;
    use crate::options::TakeOptions;

    #[test]
    fn records_then_forwards() {
        let engine = RecordingEngine::reference();
        let data = Datum::from(Array::int64([Some(10), Some(20)]));
        let indices = Datum::from(Array::int64([Some(1)]));
        let out = engine
            .dispatch("take", &[data, indices], Some(&TakeOptions::default()), None)
            .unwrap();
        assert_eq!(out, Datum::from(Array::int64([Some(20)])));

        let call = engine.last().unwrap();
        assert_eq!(call.function, "take");
        assert_eq!(call.args.len(), 2);
        assert_eq!(call.options.unwrap().type_name(), "TakeOptions");
        assert!(call.pool.is_none());
    }

    #[test]
    fn records_failed_calls_too() {
        let engine = RecordingEngine::reference();
        assert!(engine.dispatch("nope", &[], None, None).is_err());
        assert_eq!(engine.calls().len(), 1);
        engine.clear();
        assert!(engine.calls().is_empty());
    }
}
