//! Project file loading
//!
//! A project file declares the type descriptors and the bindings in TOML:
//! `[[class]]` and `[[parameter]]` tables feed hierarchy construction, the
//! `[bindings]` section feeds the configuration builder. Sources are
//! layered with figment: defaults, then the TOML file, then environment
//! variables with the `WIREBOX_` prefix (later sources override earlier).

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use wirebox_domain::error::{Error, Result};
use wirebox_domain::{ClassDescriptor, ParameterDescriptor, TypeDescriptor};
use wirebox_engine::{ClassHierarchy, Configuration, ConfigurationBuilder};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "WIREBOX";

/// Default project file name looked for in the working directory
pub const DEFAULT_PROJECT_FILENAME: &str = "wirebox.toml";

/// Logging section of the project file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, or error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Bindings section of the project file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BindingsConfig {
    /// Interface name -> chosen concrete implementation name
    #[serde(default)]
    pub implementations: BTreeMap<String, String>,

    /// Named parameter name -> literal value text
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,

    /// Classes marked singleton for the resolution scope
    #[serde(default)]
    pub singletons: Vec<String>,
}

/// Complete project file model
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Class and interface descriptors
    #[serde(default, rename = "class")]
    pub classes: Vec<ClassDescriptor>,

    /// Named parameter descriptors
    #[serde(default, rename = "parameter")]
    pub parameters: Vec<ParameterDescriptor>,

    /// Binding declarations
    #[serde(default)]
    pub bindings: BindingsConfig,
}

impl ProjectConfig {
    /// The declared type descriptors, classes first
    pub fn descriptors(&self) -> Vec<TypeDescriptor> {
        self.classes
            .iter()
            .cloned()
            .map(TypeDescriptor::Class)
            .chain(
                self.parameters
                    .iter()
                    .cloned()
                    .map(TypeDescriptor::Parameter),
            )
            .collect()
    }

    /// Build the hierarchy and apply the declared bindings
    pub fn configuration(&self) -> Result<Configuration> {
        let hierarchy = Arc::new(ClassHierarchy::build(&self.descriptors())?);
        let mut builder = ConfigurationBuilder::new(hierarchy);
        for (interface, implementation) in &self.bindings.implementations {
            builder.bind_implementation(interface, implementation)?;
        }
        for (parameter, value) in &self.bindings.parameters {
            builder.bind_parameter(parameter, value)?;
        }
        for class in &self.bindings.singletons {
            builder.mark_singleton(class)?;
        }
        Ok(builder.build())
    }
}

/// Project file loader
#[derive(Debug, Clone, Default)]
pub struct ProjectLoader {
    /// Project file path; falls back to `wirebox.toml` in the working
    /// directory when unset
    config_path: Option<PathBuf>,
}

impl ProjectLoader {
    /// Create a loader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the project file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load the project from all sources
    ///
    /// Merge order (later sources override earlier):
    /// 1. Defaults from `ProjectConfig::default()`
    /// 2. The TOML project file, when it exists
    /// 3. Environment variables with the `WIREBOX_` prefix
    ///    (e.g. `WIREBOX_LOGGING_LEVEL`)
    pub fn load(&self) -> Result<ProjectConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(ProjectConfig::default()));

        let path = self.config_path.clone().or_else(default_project_path);
        if let Some(path) = &path {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
                info!("project loaded from {}", path.display());
            } else {
                warn!("project file not found: {}", path.display());
            }
        }

        figment = figment.merge(Env::prefixed(&format!("{ENV_PREFIX}_")).split("_"));

        let config: ProjectConfig = figment.extract().map_err(|e| {
            Error::configuration_with_source("failed to extract project configuration", e)
        })?;

        validate_project(&config)?;
        Ok(config)
    }

    /// Save a project to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &ProjectConfig, path: P) -> Result<()> {
        let toml_string = toml::to_string_pretty(config).map_err(|e| {
            Error::configuration_with_source("failed to serialize project to TOML", e)
        })?;
        std::fs::write(path.as_ref(), toml_string)
            .map_err(|e| Error::configuration_with_source("failed to write project file", e))?;
        Ok(())
    }
}

fn default_project_path() -> Option<PathBuf> {
    let current_dir = env::current_dir().ok()?;
    Some(current_dir.join(DEFAULT_PROJECT_FILENAME))
}

/// Validate the project model before handing it to the engine
///
/// The engine enforces the structural invariants itself; these checks catch
/// plainly malformed input with a configuration error naming the offence.
fn validate_project(config: &ProjectConfig) -> Result<()> {
    validate_descriptor_names(config)?;
    validate_binding_names(config)?;
    Ok(())
}

fn validate_descriptor_names(config: &ProjectConfig) -> Result<()> {
    for class in &config.classes {
        if class.name.trim().is_empty() {
            return Err(Error::configuration("class descriptor with empty name"));
        }
    }
    for parameter in &config.parameters {
        if parameter.name.trim().is_empty() {
            return Err(Error::configuration(
                "parameter descriptor with empty name",
            ));
        }
    }
    Ok(())
}

fn validate_binding_names(config: &ProjectConfig) -> Result<()> {
    for (interface, implementation) in &config.bindings.implementations {
        if interface.trim().is_empty() || implementation.trim().is_empty() {
            return Err(Error::configuration(
                "implementation binding with empty interface or implementation name",
            ));
        }
    }
    for (parameter, _) in &config.bindings.parameters {
        if parameter.trim().is_empty() {
            return Err(Error::configuration(
                "parameter binding with empty parameter name",
            ));
        }
    }
    for class in &config.bindings.singletons {
        if class.trim().is_empty() {
            return Err(Error::configuration("singleton entry with empty name"));
        }
    }
    Ok(())
}

/// A small self-contained sample project, used by `wirebox init`
pub fn sample_project() -> ProjectConfig {
    use wirebox_domain::node::ConstructorArg;
    use wirebox_domain::value::ValueType;

    ProjectConfig {
        logging: LoggingConfig::default(),
        classes: vec![
            ClassDescriptor::new("demo.shapes.Shape").abstract_class(),
            ClassDescriptor::new("demo.shapes.Circle")
                .with_implements("demo.shapes.Shape")
                .with_arg(ConstructorArg::parameter("demo.shapes.Radius")),
            ClassDescriptor::new("demo.shapes.Square")
                .with_implements("demo.shapes.Shape")
                .with_arg(ConstructorArg::parameter("demo.shapes.Side")),
            ClassDescriptor::new("demo.app.Renderer")
                .with_arg(ConstructorArg::class("demo.shapes.Shape")),
        ],
        parameters: vec![
            ParameterDescriptor::new("demo.shapes.Radius", ValueType::Integer)
                .with_default("1")
                .with_doc("Radius of a circle"),
            ParameterDescriptor::new("demo.shapes.Side", ValueType::Integer)
                .with_default("1")
                .with_doc("Side length of a square"),
        ],
        bindings: BindingsConfig {
            implementations: BTreeMap::from([(
                "demo.shapes.Shape".to_string(),
                "demo.shapes.Circle".to_string(),
            )]),
            parameters: BTreeMap::from([("demo.shapes.Radius".to_string(), "5".to_string())]),
            singletons: vec!["demo.shapes.Circle".to_string()],
        },
    }
}
