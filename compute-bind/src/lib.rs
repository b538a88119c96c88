//! # compute-bind: registry-driven bindings for compute functions
//!
//! Given only a [`FunctionRegistry`](compute_core::FunctionRegistry) and a
//! [`KernelEngine`](compute_core::KernelEngine), this crate binds every
//! registered function as a validated, documented [`ComputeFunction`] without
//! a hand-written wrapper per function.
//!
//! | Piece | Where | What it does |
//! |-------|-------|-------------|
//! | Configuration resolver | [`resolve_options`] | Ready value, mapping or loose arguments to one configuration value |
//! | Signature synthesizer | [`Signature`] | Introspectable parameter list; call-shape checks |
//! | Documentation assembler | [`doc::assemble`] | Help text from descriptor metadata |
//! | Wrapper factory | [`ComputeFunction`] | Arity check, resolution, dispatch |
//! | Namespace builder | [`Namespace`], [`NamespaceBuilder`] | One binding per registry function, with name rewrites |
//! | Adapters | `Namespace::{cast, index, take, fill_null, top_k_unstable, bottom_k_unstable}` | Extra pre- and post-processing |
//!
//! ```ignore
//! use std::sync::Arc;
//! use compute_bind::{CallArgs, Namespace};
//!
//! let ns = Namespace::build(&registry, Arc::new(engine))?;
//! let rounded = ns.call("round", CallArgs::new().arg(values).option_kwarg("ndigits", 2))?;
//! ```
//!
//! A namespace is immutable once built. [`install`] makes one available
//! process-wide through [`global`].

#![deny(missing_docs)]

pub mod adapters;
pub mod call;
pub mod doc;
pub mod error;
pub mod function;
pub mod namespace;
pub mod resolve;
pub mod signature;

pub use call::{CallArgs, OptionsInput, call_function};
pub use error::{BindError, BindWarning};
pub use function::{ComputeFunction, FunctionMetadata};
pub use namespace::{Namespace, NamespaceBuilder, NamespaceConfig, global, install};
pub use resolve::resolve_options;
pub use signature::{MEMORY_POOL_PARAM, OPTIONS_PARAM, Parameter, ParameterKind, Signature};
