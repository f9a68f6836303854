//! Engine layer for wirebox
//!
//! Consumes type descriptors from the domain layer and provides the four
//! engine components: [`hierarchy::ClassHierarchy`] (the declaration node
//! tree), [`configuration::Configuration`] (immutable bindings layered on a
//! hierarchy), [`injector::Injector`] (recursive resolution of fully-wired
//! instances), and [`walk`] (pre-order traversal plus the Graphviz export
//! visitor). The injector and the exporter are independent consumers of the
//! same immutable configuration.

pub mod configuration;
pub mod hierarchy;
pub mod injector;
pub mod walk;

pub use configuration::{Configuration, ConfigurationBuilder};
pub use hierarchy::ClassHierarchy;
pub use injector::{ExternalFactory, Injector, Instance, ResolvedArg};
pub use walk::graphviz::{GraphvizVisitor, to_graphviz};
pub use walk::{ConfigVisitor, walk_preorder};
