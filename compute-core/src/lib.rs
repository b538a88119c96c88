//! # compute-core: Protocol traits and data model for compute bindings
//!
//! This crate defines the collaborators a registry-driven binding layer
//! consumes, and the values that flow between them.
//!
//! ## The Collaborators
//!
//! | Collaborator | Trait | What it does |
//! |--------------|-------|-------------|
//! | Registry | [`FunctionRegistry`] | Enumerates functions and their [`FunctionDescriptor`]s |
//! | Kernel engine | [`KernelEngine`] | Executes a named function on resolved arguments |
//! | Addenda table | [`DocAddenda`] | Hand-written documentation per function |
//! | Memory pool | [`MemoryPool`] | Allocator selection forwarded to the engine |
//!
//! ## Configuration Values
//!
//! | Layer | Types | What it does |
//! |-------|-------|-------------|
//! | Typed | [`OptionsType`] | One struct per options family |
//! | Erased value | [`FunctionOptions`] | What engines receive and downcast |
//! | Erased factory | [`OptionsClass`], [`OptionsCatalog`] | Build values from positional/keyword fields |
//!
//! ## Data Model
//!
//! [`Datum`] is a [`Scalar`], an [`Array`] or a [`Table`]. [`Operand`] adds
//! plain [`Value`]s, which adapters coerce to a datum's element type.
//!
//! The data model is small. The binding layer and its tests only need
//! something concrete to pass to an engine.

#![deny(missing_docs)]

pub mod datum;
pub mod descriptor;
pub mod error;
pub mod kernel;
pub mod options;
pub mod pool;
pub mod registry;

#[cfg(feature = "test-utils")]
pub mod test_utils;

// Re-exports for convenience
pub use datum::{Array, DataType, Datum, Operand, Scalar, Table, Value};
pub use descriptor::{Arity, FunctionDescriptor, FunctionKind, VARIADIC_MARKER};
pub use error::{DataError, KernelError, OptionsError};
pub use kernel::KernelEngine;
pub use options::{
    FieldSpec, FunctionOptions, OptionsCatalog, OptionsClass, OptionsClassOf, OptionsType,
    class_of,
};
pub use pool::{MemoryPool, SystemPool, default_memory_pool};
pub use registry::{DocAddenda, FunctionRegistry, NoAddenda};
