//! Mapper state shared by loading and storing.

use std::any::Any;

use crate::config::Config;
use crate::convert::ConverterRegistry;
use crate::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};

use super::describe::TypeInfo;
use super::error::MappingError;

/// Fallback for scalar types with no registered converter.
///
/// Consulted only when the registry has nothing for the type.
pub trait CustomTypeHook {
    /// Parse `text` into `current`. Return `false` to decline.
    fn parse(&self, ty: &TypeInfo, current: &mut dyn Any, text: &str) -> bool;

    /// Render `value`, or `None` to decline.
    fn format(&self, ty: &TypeInfo, value: &dyn Any) -> Option<String>;
}

/// Walks objects and nodes field by field.
///
/// A mapper collects diagnostics for every field it could not map and
/// carries on with the rest; nothing it does is fatal.
///
/// # Example
///
/// ```
/// use nodecfg::{persist, Config, Mapper, Node};
/// use nodecfg::convert::ConverterRegistry;
///
/// #[derive(Default)]
/// struct Engine { power: f32 }
/// persist!(Engine { power });
///
/// let config = Config::default();
/// let registry = ConverterRegistry::with_defaults();
/// let mut mapper = Mapper::new(&config, &registry);
///
/// let node = mapper.to_node("Engine", &Engine { power: 40.0 });
/// assert_eq!(node.value("power"), Some("40"));
///
/// let mut engine = Engine::default();
/// mapper.load_from_node(&mut engine, &node);
/// assert_eq!(engine.power, 40.0);
/// assert!(mapper.into_diagnostics().is_empty());
/// ```
pub struct Mapper<'a> {
    pub(super) config: &'a Config,
    pub(super) registry: &'a ConverterRegistry,
    pub(super) hook: Option<&'a dyn CustomTypeHook>,
    diagnostics: Diagnostics,
    path: Vec<String>,
}

impl<'a> Mapper<'a> {
    /// Create a mapper over `registry`.
    pub fn new(config: &'a Config, registry: &'a ConverterRegistry) -> Self {
        Self {
            config,
            registry,
            hook: None,
            diagnostics: Diagnostics::new(),
            path: Vec::new(),
        }
    }

    /// Consult `hook` for types the registry does not know.
    pub fn with_hook(mut self, hook: &'a dyn CustomTypeHook) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Diagnostics collected so far.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Consume the mapper, returning its diagnostics.
    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    pub(super) fn enter(&mut self, segment: impl Into<String>) {
        self.path.push(segment.into());
    }

    pub(super) fn enter_index(&mut self, index: usize) {
        self.path.push(format!("[{index}]"));
    }

    pub(super) fn leave(&mut self) {
        self.path.pop();
    }

    /// Dotted path of the field being mapped, e.g. `engines[1].power`.
    pub(super) fn current_path(&self) -> String {
        let mut path = String::new();
        for segment in &self.path {
            if !path.is_empty() && !segment.starts_with('[') {
                path.push('.');
            }
            path.push_str(segment);
        }
        path
    }

    pub(super) fn report(&mut self, error: MappingError) {
        let diagnostic =
            Diagnostic::new(DiagnosticKind::Mapping, error.to_string()).at_path(self.current_path());
        self.diagnostics.report(self.config, diagnostic);
    }

    pub(super) fn parse_scalar(
        &self,
        slot: &mut dyn Any,
        ty: &TypeInfo,
        text: &str,
    ) -> Result<(), MappingError> {
        if let Some(converter) = self.registry.get(ty.id()) {
            return if converter.parse_into(text, slot) {
                Ok(())
            } else {
                Err(MappingError::InvalidValue {
                    type_name: ty.name(),
                    value: text.to_owned(),
                })
            };
        }

        if let Some(hook) = self.hook
            && hook.parse(ty, slot, text)
        {
            return Ok(());
        }
        Err(MappingError::UnknownType {
            type_name: ty.name(),
        })
    }

    pub(super) fn format_scalar(
        &self,
        value: &dyn Any,
        ty: &TypeInfo,
    ) -> Result<String, MappingError> {
        if let Some(converter) = self.registry.get(ty.id()) {
            return converter.format(value).ok_or(MappingError::Unformattable {
                type_name: ty.name(),
            });
        }

        if let Some(hook) = self.hook
            && let Some(text) = hook.format(ty, value)
        {
            return Ok(text);
        }
        Err(MappingError::UnknownType {
            type_name: ty.name(),
        })
    }
}
