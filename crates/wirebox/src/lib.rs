//! wirebox - declarative configuration and dependency-resolution engine
//!
//! Facade crate: loads a TOML project file, builds the class hierarchy and
//! configuration, and drives the engine from the command line. The engine
//! itself lives in `wirebox-engine`; the node model and errors in
//! `wirebox-domain`.

pub mod config;
pub mod logging;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use wirebox_domain::node::NodeKind;

use crate::config::{ProjectConfig, ProjectLoader, sample_project};
use crate::logging::init_logging;

/// Load the project file and initialize logging from its settings
fn load_project(config_path: Option<&Path>) -> anyhow::Result<ProjectConfig> {
    let mut loader = ProjectLoader::new();
    if let Some(path) = config_path {
        loader = loader.with_config_path(path);
    }
    let project = loader.load()?;
    init_logging(&project.logging)?;
    Ok(project)
}

/// Build the hierarchy and configuration and report what was declared
pub fn run_check(config_path: Option<&Path>) -> anyhow::Result<()> {
    let project = load_project(config_path)?;
    let configuration = project.configuration()?;

    let hierarchy = configuration.hierarchy();
    let count = |kind: NodeKind| hierarchy.iter().filter(|n| n.kind() == kind).count();
    println!(
        "ok: {} classes, {} parameters, {} packages, {} implementation bindings, {} parameter bindings, {} singletons",
        count(NodeKind::Class),
        count(NodeKind::NamedParameter),
        // The root package is implicit, not declared.
        count(NodeKind::Package) - 1,
        project.bindings.implementations.len(),
        project.bindings.parameters.len(),
        project.bindings.singletons.len(),
    );
    Ok(())
}

/// Export the binding graph as Graphviz DOT
pub fn run_export(
    config_path: Option<&Path>,
    show_impls: bool,
    show_legend: bool,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let project = load_project(config_path)?;
    let configuration = project.configuration()?;
    let dot = wirebox_engine::to_graphviz(&configuration, show_impls, show_legend);

    match output {
        Some(path) => {
            fs::write(path, &dot)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("graph written to {}", path.display());
        }
        None => print!("{dot}"),
    }
    Ok(())
}

/// Resolve an instance of the given class and print it
pub fn run_resolve(config_path: Option<&Path>, target: &str) -> anyhow::Result<()> {
    let project = load_project(config_path)?;
    let configuration = Arc::new(project.configuration()?);
    let injector = wirebox_engine::Injector::new(configuration);
    let instance = injector.get_instance(target)?;
    println!("{instance}");
    Ok(())
}

/// Write a sample project file to get started
pub fn run_init(output: &Path) -> anyhow::Result<()> {
    anyhow::ensure!(
        !output.exists(),
        "refusing to overwrite existing {}",
        output.display()
    );
    let loader = ProjectLoader::new();
    loader.save_to_file(&sample_project(), output)?;
    println!("wrote sample project to {}", output.display());
    Ok(())
}
