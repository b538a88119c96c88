#![deny(missing_docs)]
//! # compute: umbrella crate
//!
//! Single import surface for the compute binding layer. Re-exports the data
//! model and the binding crates behind feature flags, plus a `prelude` for the
//! happy path.

#[cfg(feature = "bind")]
pub use compute_bind;
#[cfg(feature = "core")]
pub use compute_core;

/// Happy-path imports for building and calling a namespace.
pub mod prelude {
    #[cfg(feature = "core")]
    pub use compute_core::{
        Array, DataType, Datum, FunctionDescriptor, FunctionKind, FunctionOptions,
        FunctionRegistry, KernelEngine, MemoryPool, OptionsCatalog, Scalar, Table,
    };

    #[cfg(feature = "bind")]
    pub use compute_bind::{
        BindError, CallArgs, ComputeFunction, Namespace, NamespaceBuilder, NamespaceConfig,
    };

    #[cfg(feature = "test-utils")]
    pub use compute_core::test_utils::{InMemoryRegistry, RecordingEngine, ReferenceEngine};
}
