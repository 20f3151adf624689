use std::collections::HashMap;

use crate::key::Path;

/// Tracks which source set the value at each path.
///
/// `S` is whatever the caller uses to label a layer, e.g. an enum of
/// configuration files.
pub type FieldSources<S> = HashMap<Path, S>;
