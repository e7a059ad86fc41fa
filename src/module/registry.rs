//! Module Registry
//!
//! Maps configured module names to constructors. Every module the binary
//! can load is listed in [`MODULES`]; there is no dynamic loading.

use tracing::debug;

use crate::error::ConfigurationError;
use crate::lifecycle::{MainModule, WelderModule, MAIN_MODULE_NAME, WELDER_MODULE_NAME};
use crate::module::Module;

/// Module used when none is configured.
pub const DEFAULT_MODULE: &str = MAIN_MODULE_NAME;

/// Registry entry for a loadable module.
pub struct ModuleEntry {
    /// Fully-qualified module name
    pub name: &'static str,
    /// Short names accepted in configuration
    pub aliases: &'static [&'static str],
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create the module
    pub factory: fn() -> Box<dyn Module>,
}

impl ModuleEntry {
    fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }
}

fn load_main() -> Box<dyn Module> {
    Box::new(MainModule)
}

fn load_welder() -> Box<dyn Module> {
    Box::new(WelderModule::new())
}

/// All modules known to this build.
pub static MODULES: &[ModuleEntry] = &[
    ModuleEntry {
        name: MAIN_MODULE_NAME,
        aliases: &["main"],
        description: "Self-bound default module that logs its lifecycle",
        factory: load_main,
    },
    ModuleEntry {
        name: WELDER_MODULE_NAME,
        aliases: &["welder"],
        description: "Welder service with a module-owned shutdown latch",
        factory: load_welder,
    },
];

/// Resolve a module by name and instantiate it.
///
/// Leading and trailing whitespace in `name` is ignored.
///
/// # Returns
/// * `Ok(Box<dyn Module>)` - The loaded module
/// * `Err(ConfigurationError)` - The name is blank or not registered
pub fn resolve_and_load(name: &str) -> Result<Box<dyn Module>, ConfigurationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ConfigurationError::EmptyModuleName);
    }

    match MODULES.iter().find(|entry| entry.matches(name)) {
        Some(entry) => {
            debug!(requested = name, module = entry.name, "Module resolved");
            Ok((entry.factory)())
        }
        None => Err(ConfigurationError::UnknownModule {
            name: name.to_string(),
            available: MODULES.iter().map(|entry| entry.name).collect(),
        }),
    }
}

/// List all registered modules as (name, description) pairs.
pub fn list_modules() -> Vec<(&'static str, &'static str)> {
    MODULES
        .iter()
        .map(|entry| (entry.name, entry.description))
        .collect()
}
