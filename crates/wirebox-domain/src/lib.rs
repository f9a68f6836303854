//! Domain layer for wirebox
//!
//! Pure types shared by the engine and the facade: the declaration node
//! model (packages, classes, named parameters), typed literal values, type
//! descriptors used to register classes and parameters, and the error
//! taxonomy. No I/O and no engine logic lives here.

pub mod descriptor;
pub mod error;
pub mod node;
pub mod value;

pub use descriptor::{ClassDescriptor, ParameterDescriptor, TypeDescriptor};
pub use error::{Error, ResolutionChain, Result};
pub use node::{ArgKind, ClassNode, ConstructorArg, NamedParameterNode, Node, NodeKind, PackageNode};
pub use value::{Literal, ValueType};
