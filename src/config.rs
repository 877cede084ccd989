//! Runtime configuration.
//!
//! A [`Config`] is passed explicitly to the parser, serializer, mapper and
//! file helpers. Build one with [`ConfigBuilder`], or read one from disk with
//! [`Config::load`]:
//!
//! ```text
//! Config
//! {
//! 	verbosity = Errors
//! 	diagnostics
//! 	{
//! 		colored = false
//! 		style = Short
//! 	}
//! }
//! ```

use std::path::Path;

use crate::convert::ConverterRegistry;
use crate::diagnostic::{DiagnosticOptions, Diagnostics, DisplayStyle, Error, LOG_TARGET};
use crate::file;
use crate::mapper::{Describe, Mapper, TypeInfo};
use crate::node::Node;
use crate::persist;

/// Which diagnostics reach the `log` facade above debug level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Verbosity {
    /// Log everything at debug level only.
    Quiet,
    /// Log errors; warnings go to debug.
    Errors,
    /// Log errors and warnings.
    #[default]
    All,
}

impl Verbosity {
    /// Variant names as written in config files.
    pub const VARIANTS: &'static [(&'static str, Verbosity)] = &[
        ("Quiet", Verbosity::Quiet),
        ("Errors", Verbosity::Errors),
        ("All", Verbosity::All),
    ];
}

impl Describe for Verbosity {
    fn type_info() -> TypeInfo {
        TypeInfo::scalar::<Self>()
    }
}

impl Describe for DisplayStyle {
    fn type_info() -> TypeInfo {
        TypeInfo::scalar::<Self>()
    }
}

/// Runtime configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Which diagnostics are logged as they are reported.
    pub verbosity: Verbosity,
    /// How [`Config::format_diagnostics`] renders diagnostics.
    pub diagnostics: DiagnosticOptions,
}

persist!(Config { verbosity, diagnostics });
persist!(DiagnosticOptions { colored, style });

impl Config {
    /// Name of the top-level node in a config file.
    pub const NODE_NAME: &'static str = "Config";

    /// Read a config file.
    ///
    /// Fields missing from the file keep their defaults. Unknown values are
    /// reported through the returned diagnostics (and logged), not as errors.
    pub fn load(path: &Path) -> Result<(Self, Diagnostics), Error> {
        let bootstrap = Self::default();
        let parsed = file::try_load(path, &bootstrap)?;
        let mut diagnostics = parsed.diagnostics;
        let mut config = Self::default();

        if let Some(node) = parsed.root.node(Self::NODE_NAME) {
            let registry = registry();
            let mut mapper = Mapper::new(&bootstrap, &registry);
            mapper.load_from_node(&mut config, node);
            diagnostics.extend(mapper.into_diagnostics());
        } else {
            log::debug!(
                target: LOG_TARGET,
                "{}: no `{}` node, using defaults",
                path.display(),
                Self::NODE_NAME
            );
        }
        Ok((config, diagnostics))
    }

    /// Render `diagnostics` with this config's formatting options.
    pub fn format_diagnostics(&self, diagnostics: &Diagnostics) -> String {
        diagnostics.format(&self.diagnostics)
    }

    /// Write this config to `path`.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        file::try_save(path, &self.to_node())
    }

    /// The config as a `Config` node.
    pub fn to_node(&self) -> Node {
        let registry = registry();
        let mut mapper = Mapper::new(self, &registry);
        mapper.to_node(Self::NODE_NAME, self)
    }
}

fn registry() -> ConverterRegistry {
    let mut registry = ConverterRegistry::with_defaults();
    registry
        .register_enum(Verbosity::VARIANTS)
        .register_enum(&[("Rich", DisplayStyle::Rich), ("Short", DisplayStyle::Short)]);
    registry
}

/// Configuration builder for fluent API.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    verbosity: Option<Verbosity>,
    diagnostics: Option<DiagnosticOptions>,
}

impl ConfigBuilder {
    /// Create a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set which diagnostics are logged.
    ///
    /// Default: [`Verbosity::All`]
    ///
    /// # Example
    ///
    /// ```
    /// use nodecfg::config::{ConfigBuilder, Verbosity};
    ///
    /// let config = ConfigBuilder::new()
    ///     .verbosity(Verbosity::Errors)
    ///     .build();
    /// assert_eq!(config.verbosity, Verbosity::Errors);
    /// ```
    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = Some(verbosity);
        self
    }

    /// Set diagnostic formatting options.
    pub fn diagnostics(mut self, options: DiagnosticOptions) -> Self {
        self.diagnostics = Some(options);
        self
    }

    /// Enable or disable ANSI colors in formatted diagnostics.
    pub fn colored(mut self, colored: bool) -> Self {
        let options = self.diagnostics.unwrap_or_default();
        self.diagnostics = Some(options.with_colored(colored));
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Config {
        Config {
            verbosity: self.verbosity.unwrap_or_default(),
            diagnostics: self.diagnostics.unwrap_or_default(),
        }
    }
}
