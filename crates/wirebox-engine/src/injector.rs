//! Injector / resolver
//!
//! Resolves a fully-constructed instance of a requested class from an
//! immutable configuration: explicit bindings win, otherwise a unique
//! concrete known implementation is chosen; constructor dependencies are
//! satisfied recursively in declared order; singletons are cached per
//! injector; cycles and unsatisfiable dependencies fail with the full
//! resolution chain attached.
//!
//! The singleton cache lives behind one mutex taken per `get_instance`
//! call. Resolution performs no I/O, so holding the lock across the call is
//! cheap and guarantees at most one construction per singleton target even
//! under concurrent callers: the second caller observes the first caller's
//! `Arc`.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;
use wirebox_domain::error::{Error, ResolutionChain, Result};
use wirebox_domain::node::{ArgKind, ClassNode, short_name_of};
use wirebox_domain::value::Literal;

use crate::configuration::Configuration;

/// One resolved constructor argument, in declared order
#[derive(Debug, Clone)]
pub enum ResolvedArg {
    /// A named-parameter dependency resolved to its bound or default value
    Parameter {
        /// Fully-qualified name of the named parameter
        name: String,
        /// The parsed literal value
        value: Literal,
    },
    /// A sub-object dependency resolved to a constructed instance
    Object(Arc<Instance>),
}

/// A constructed object record
///
/// Records the concrete class, the resolved constructor arguments, and for
/// externally-constructed classes an optional opaque payload attached by
/// the factory. Singleton identity is `Arc` identity.
pub struct Instance {
    class: String,
    external: bool,
    args: Vec<ResolvedArg>,
    payload: Option<Box<dyn Any + Send + Sync>>,
}

impl Instance {
    /// Create a directly-constructed instance
    pub fn new(class: impl Into<String>, args: Vec<ResolvedArg>) -> Self {
        Self {
            class: class.into(),
            external: false,
            args,
            payload: None,
        }
    }

    /// Create an externally-constructed instance
    pub fn external(class: impl Into<String>, args: Vec<ResolvedArg>) -> Self {
        Self {
            class: class.into(),
            external: true,
            args,
            payload: None,
        }
    }

    /// Attach an opaque payload (factory product)
    pub fn with_payload<T: Any + Send + Sync>(mut self, payload: T) -> Self {
        self.payload = Some(Box::new(payload));
        self
    }

    /// Fully-qualified name of the constructed class
    pub fn class_name(&self) -> &str {
        &self.class
    }

    /// True when the instance came from an external factory
    pub fn is_external(&self) -> bool {
        self.external
    }

    /// The resolved constructor arguments, in declared order
    pub fn args(&self) -> &[ResolvedArg] {
        &self.args
    }

    /// Downcast the attached payload, if any
    pub fn payload<T: Any>(&self) -> Option<&T> {
        self.payload.as_ref()?.downcast_ref()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class)
            .field("external", &self.external)
            .field("args", &self.args)
            .field("payload", &self.payload.is_some())
            .finish()
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", short_name_of(&self.class))?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match arg {
                ResolvedArg::Parameter { name, value } => {
                    write!(f, "{} = {value}", short_name_of(name))?;
                }
                ResolvedArg::Object(instance) => write!(f, "{instance}")?,
            }
        }
        f.write_str(")")
    }
}

/// Factory for classes declared externally constructed
///
/// Registered on the injector by class name; invoked with the resolved
/// constructor arguments in declared order. Closures with the matching
/// signature implement the trait directly.
pub trait ExternalFactory: Send + Sync {
    /// Construct an instance of the given class from resolved arguments
    fn construct(&self, class: &ClassNode, args: &[ResolvedArg]) -> Result<Instance>;
}

impl<F> ExternalFactory for F
where
    F: Fn(&ClassNode, &[ResolvedArg]) -> Result<Instance> + Send + Sync,
{
    fn construct(&self, class: &ClassNode, args: &[ResolvedArg]) -> Result<Instance> {
        self(class, args)
    }
}

/// Resolves instances from an immutable configuration
///
/// Cheap to create, one per resolution session. The resolution cache is
/// scoped to this injector and never shared across injectors.
pub struct Injector {
    configuration: Arc<Configuration>,
    factories: HashMap<String, Arc<dyn ExternalFactory>>,
    cache: Mutex<BTreeMap<String, Arc<Instance>>>,
}

impl Injector {
    /// Create an injector over a configuration
    pub fn new(configuration: Arc<Configuration>) -> Self {
        Self {
            configuration,
            factories: HashMap::new(),
            cache: Mutex::new(BTreeMap::new()),
        }
    }

    /// Register an external factory for an externally-constructed class
    ///
    /// Fails when the class is unknown or not declared externally
    /// constructed. Registration happens before the injector is shared.
    pub fn register_factory(&mut self, class: &str, factory: Arc<dyn ExternalFactory>) -> Result<()> {
        let node = self.configuration.hierarchy().class(class)?;
        if !node.external_constructor {
            return Err(Error::hierarchy(format!(
                "{class} is not declared externally constructed"
            )));
        }
        self.factories.insert(node.full_name.clone(), factory);
        Ok(())
    }

    /// Resolve a fully-constructed instance of the requested class
    ///
    /// Repeated calls for a singleton target return the identical `Arc`;
    /// non-singleton targets are constructed fresh each call. Failures are
    /// structural, carry the resolution chain, and leave the cache intact.
    pub fn get_instance(&self, target: &str) -> Result<Arc<Instance>> {
        let node = self.configuration.hierarchy().class(target)?;
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        self.resolve(node, &mut cache, &mut Vec::new())
    }

    fn resolve(
        &self,
        target: &ClassNode,
        cache: &mut BTreeMap<String, Arc<Instance>>,
        path: &mut Vec<String>,
    ) -> Result<Arc<Instance>> {
        let singleton = self.configuration.is_singleton(target);
        if singleton {
            if let Some(instance) = cache.get(&target.full_name) {
                debug!(class = %target.full_name, "singleton cache hit");
                return Ok(instance.clone());
            }
        }

        if path.iter().any(|name| name == &target.full_name) {
            return Err(Error::cyclic_dependency(
                &target.full_name,
                chain_of(path, &target.full_name),
            ));
        }

        path.push(target.full_name.clone());
        let result = self.resolve_unchecked(target, cache, path);
        path.pop();

        let instance = result?;
        if singleton {
            cache.insert(target.full_name.clone(), instance.clone());
        }
        Ok(instance)
    }

    fn resolve_unchecked(
        &self,
        target: &ClassNode,
        cache: &mut BTreeMap<String, Arc<Instance>>,
        path: &mut Vec<String>,
    ) -> Result<Arc<Instance>> {
        // An explicit binding delegates the whole resolution to the chosen
        // implementation, including its own bindings and singleton scope.
        if let Some(bound) = self.configuration.bound_implementation(target) {
            if bound.full_name != target.full_name {
                debug!(interface = %target.full_name, implementation = %bound.full_name, "following explicit binding");
                return self.resolve(bound, cache, path);
            }
        }

        let concrete = self.choose_implementation(target, path)?;
        let hierarchy = self.configuration.hierarchy();

        let mut args = Vec::with_capacity(concrete.constructor.len());
        for arg in &concrete.constructor {
            match arg.kind {
                ArgKind::Parameter => {
                    let parameter = hierarchy.parameter(&arg.target)?;
                    let text = self
                        .configuration
                        .bound_parameter_value(parameter)
                        .or(parameter.default.as_deref())
                        .ok_or_else(|| {
                            Error::missing_parameter(
                                &parameter.full_name,
                                chain_of(path, &parameter.full_name),
                            )
                        })?;
                    let value = Literal::parse(parameter.value_type, text).ok_or_else(|| {
                        Error::invalid_value(
                            &parameter.full_name,
                            parameter.value_type.to_string(),
                            text,
                        )
                    })?;
                    args.push(ResolvedArg::Parameter {
                        name: parameter.full_name.clone(),
                        value,
                    });
                }
                ArgKind::Class => {
                    let dependency = hierarchy.class(&arg.target)?;
                    args.push(ResolvedArg::Object(self.resolve(dependency, cache, path)?));
                }
            }
        }

        if concrete.external_constructor {
            let factory = self.factories.get(&concrete.full_name).ok_or_else(|| {
                Error::missing_factory(&concrete.full_name, chain_of(path, &concrete.full_name))
            })?;
            Ok(Arc::new(factory.construct(concrete, &args)?))
        } else {
            debug!(class = %concrete.full_name, "constructed instance");
            Ok(Arc::new(Instance::new(&concrete.full_name, args)))
        }
    }

    /// Pick the concrete class to construct: the unique concrete member of
    /// the target's known-implementations set
    fn choose_implementation<'a>(
        &'a self,
        target: &'a ClassNode,
        path: &[String],
    ) -> Result<&'a ClassNode> {
        let candidates: Vec<&ClassNode> = self
            .configuration
            .hierarchy()
            .known_implementations(target)
            .into_iter()
            .filter(|class| class.is_concrete())
            .collect();

        match candidates.as_slice() {
            [] => Err(Error::no_implementation(
                &target.full_name,
                chain_of(path, &target.full_name),
            )),
            [only] => Ok(*only),
            many => Err(Error::ambiguous_binding(
                &target.full_name,
                many.iter().map(|class| class.full_name.clone()).collect(),
                chain_of(path, &target.full_name),
            )),
        }
    }
}

/// The current resolution path plus the failing node, without duplicating
/// the failing node when it is already the innermost entry
fn chain_of(path: &[String], failing: &str) -> ResolutionChain {
    let mut nodes = path.to_vec();
    if nodes.last().map(String::as_str) != Some(failing) {
        nodes.push(failing.to_string());
    }
    nodes.into()
}
