//! Loading and saving node files.
//!
//! Two flavors of each operation:
//!
//! - [`try_load`] / [`try_save`] propagate failures as [`Error`]
//! - [`load`] / [`save`] log failures and return `None` / `false`
//!
//! Saving creates missing parent directories and overwrites the target.

use std::fs;
use std::path::{Path, PathBuf};

use crate::codec::{Parsed, Parser, Serializer};
use crate::config::Config;
use crate::convert::global_converters;
use crate::diagnostic::{Diagnostics, Error, LOG_TARGET};
use crate::mapper::{Mapper, Persist};
use crate::node::Node;

/// Absolute form of `path` for log messages.
fn display_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

// =============================================================================
// Trees
// =============================================================================

/// Read and parse a file.
pub fn try_load(path: &Path, config: &Config) -> Result<Parsed, Error> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    log::debug!(target: LOG_TARGET, "read {} ({} bytes)", display_path(path).display(), text.len());
    Ok(Parser::new(config).parse(text.lines())?)
}

/// Read and parse a file, logging failures.
///
/// A missing file is logged as an error unless `ignore_missing` is set, in
/// which case it silently yields `None`.
pub fn load(path: &Path, ignore_missing: bool, config: &Config) -> Option<Node> {
    match try_load(path, config) {
        Ok(parsed) => Some(parsed.root),
        Err(e) if ignore_missing && e.is_not_found() => {
            log::debug!(target: LOG_TARGET, "{} not found, skipped", display_path(path).display());
            None
        }
        Err(e) => {
            log::error!(target: LOG_TARGET, "cannot load {}: {e}", display_path(path).display());
            None
        }
    }
}

/// Serialize `node` and write it to `path`.
pub fn try_save(path: &Path, node: &Node) -> Result<(), Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let text = Serializer::new(&Config::default()).serialize(node).text;
    fs::write(path, &text).map_err(|e| Error::io(path, e))?;
    log::debug!(target: LOG_TARGET, "wrote {} ({} bytes)", display_path(path).display(), text.len());
    Ok(())
}

/// Serialize `node` and write it to `path`, logging failures.
pub fn save(path: &Path, node: &Node) -> bool {
    match try_save(path, node) {
        Ok(()) => true,
        Err(e) => {
            log::error!(target: LOG_TARGET, "cannot save {}: {e}", display_path(path).display());
            false
        }
    }
}

/// Read and parse many files in parallel.
///
/// Results keep the order of `paths`. Each file fails or succeeds on its own.
#[cfg(feature = "batch")]
pub fn load_all<P>(paths: &[P], config: &Config) -> Vec<Result<Parsed, Error>>
where
    P: AsRef<Path> + Sync,
{
    use rayon::prelude::*;

    log::debug!(target: LOG_TARGET, "loading {} files", paths.len());
    paths
        .par_iter()
        .map(|path| try_load(path.as_ref(), config))
        .collect()
}

// =============================================================================
// Objects
// =============================================================================

/// Load the first top-level node of a file into `object`.
///
/// Parse and mapping diagnostics are returned together. A file without any
/// top-level node leaves `object` untouched.
pub fn load_object<T: Persist>(
    path: &Path,
    object: &mut T,
    config: &Config,
) -> Result<Diagnostics, Error> {
    let parsed = try_load(path, config)?;
    let mut diagnostics = parsed.diagnostics;

    let first = parsed.root.node_fields().next().and_then(|(_, nodes)| nodes.first());
    match first {
        Some(node) => {
            let registry = global_converters();
            let mut mapper = Mapper::new(config, &registry);
            mapper.load_from_node(object, node);
            diagnostics.extend(mapper.into_diagnostics());
        }
        None => {
            log::debug!(target: LOG_TARGET, "{} has no nodes", display_path(path).display());
        }
    }
    Ok(diagnostics)
}

/// Store `object` as a top-level node called `name` and write it to `path`.
pub fn save_object<T: Persist>(
    path: &Path,
    name: &str,
    object: &T,
    config: &Config,
) -> Result<Diagnostics, Error> {
    let registry = global_converters();
    let mut mapper = Mapper::new(config, &registry);
    let node = mapper.to_node(name, object);
    let diagnostics = mapper.into_diagnostics();

    try_save(path, &node)?;
    Ok(diagnostics)
}
