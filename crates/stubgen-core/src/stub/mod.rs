//! Stub construction
//!
//! - [`Describer`]: reflected module to [`ModuleDescriptor`]
//! - [`StubBuilder`]: descriptor to intermediate [`StubDocument`]

mod builder;
mod describe;
mod descriptors;
pub mod ir;

pub use builder::{StubBuilder, FINAL_DECORATOR};
pub use describe::{implicit_receiver, Describer};
pub use descriptors::{
    push_unique, AttributeDescriptor, ClassDescriptor, ConstantDescriptor, MethodDescriptor,
    ModuleDescriptor, Named, ParameterDescriptor,
};
pub use ir::StubDocument;
