//! The kernel engine collaborator.

use crate::datum::Datum;
use crate::error::KernelError;
use crate::options::FunctionOptions;
use crate::pool::MemoryPool;

/// Executes a named function on resolved arguments.
///
/// This is the single dispatch primitive every generated wrapper and every
/// adapter ends in. Calls are synchronous; batching, threading and
/// cancellation are the engine's business.
pub trait KernelEngine: Send + Sync {
    /// Run `name` over `args`.
    ///
    /// `options` is `None` when the caller supplied no configuration; the
    /// engine applies its defaults or rejects the call if options are
    /// required. `pool` is `None` to allocate from the default pool.
    fn dispatch(
        &self,
        name: &str,
        args: &[Datum],
        options: Option<&dyn FunctionOptions>,
        pool: Option<&dyn MemoryPool>,
    ) -> Result<Datum, KernelError>;
}

impl<K: KernelEngine + ?Sized> KernelEngine for std::sync::Arc<K> {
    fn dispatch(
        &self,
        name: &str,
        args: &[Datum],
        options: Option<&dyn FunctionOptions>,
        pool: Option<&dyn MemoryPool>,
    ) -> Result<Datum, KernelError> {
        (**self).dispatch(name, args, options, pool)
    }
}
