//! Flattening a launch-file tree into its ordered parameter sequence, and
//! the consumable forms of that sequence: a last-wins map, display lines,
//! and sequential publishing to a registry.

use crate::{LaunchError, LaunchResult};
use launchkit_config::{LaunchFile, tags};
use launchkit_core::{Param, ParamValue};
use launchkit_registry::RegistryClient;
use std::collections::HashMap;
use std::io::Write;
use tracing::{debug, info};

/// Longest value rendered on a console line before truncation.
const DISPLAY_VALUE_LIMIT: usize = 20;

/// Anything that can own parameter declarations, directly or transitively.
///
/// One polymorphic collect over the closed set of node kinds; the gating
/// and append logic lives here once instead of per kind.
pub trait ContributesParams {
    /// Append owned parameters to `out`, in declaration order.
    fn collect_into<'a>(&'a self, out: &mut Vec<&'a Param>);
}

impl ContributesParams for LaunchFile {
    fn collect_into<'a>(&'a self, out: &mut Vec<&'a Param>) {
        out.extend(self.params.iter());

        for node in &self.nodes {
            node.collect_into(out);
        }
        for group in &self.groups {
            group.collect_into(out);
        }
        for include in &self.includes {
            include.collect_into(out);
        }
    }
}

impl ContributesParams for tags::NodeTag {
    fn collect_into<'a>(&'a self, out: &mut Vec<&'a Param>) {
        out.extend(self.params.iter());
    }
}

impl ContributesParams for tags::GroupTag {
    fn collect_into<'a>(&'a self, out: &mut Vec<&'a Param>) {
        // A disabled reference prunes its whole subtree; a reference whose
        // content never loaded contributes nothing either.
        if !self.enabled {
            return;
        }
        if let Some(child) = &self.child {
            child.collect_into(out);
        }
    }
}

impl ContributesParams for tags::IncludeTag {
    fn collect_into<'a>(&'a self, out: &mut Vec<&'a Param>) {
        if !self.enabled {
            return;
        }
        if let Some(child) = &self.child {
            child.collect_into(out);
        }
    }
}

/// Flatten one launch file into its ordered parameter sequence.
pub fn collect_params(file: &LaunchFile) -> Vec<&Param> {
    let mut out = Vec::new();
    file.collect_into(&mut out);
    out
}

/// Flatten several root launch files, concatenated in root order.
pub fn collect_all_params(files: &[LaunchFile]) -> Vec<&Param> {
    let mut out = Vec::new();
    for file in files {
        file.collect_into(&mut out);
    }
    out
}

/// Build the name-to-value map. Insertion follows aggregation order, so a
/// later declaration of the same name wins.
pub fn to_map(params: &[&Param]) -> HashMap<String, ParamValue> {
    let mut map = HashMap::new();
    for param in params {
        map.insert(param.name.clone(), param.value.clone());
    }
    map
}

/// Render one parameter as a single console line.
///
/// Long values are cut to 20 characters plus an ellipsis, and carriage
/// returns and newlines are stripped so structured values cannot break the
/// line.
pub fn describe(param: &Param) -> String {
    let mut value = param.value.display_form();
    if value.chars().count() > DISPLAY_VALUE_LIMIT {
        value = value.chars().take(DISPLAY_VALUE_LIMIT).collect::<String>() + "...";
    }
    value = value.replace('\r', "").replace('\n', "");

    format!(" * {}: {}", param.name, value)
}

/// Write one line per parameter, in aggregation order, to the given sink.
pub fn print_params(params: &[&Param], out: &mut impl Write) -> LaunchResult<()> {
    for param in params {
        writeln!(out, "{}", describe(param))?;
    }
    Ok(())
}

/// Push every parameter to the registry, strictly in aggregation order.
///
/// Fail-fast: the first failure is returned with the offending parameter's
/// name and no further parameters are attempted. Parameters already set
/// stay set; there is no rollback.
pub async fn publish<C: RegistryClient + ?Sized>(
    params: &[&Param],
    client: &C,
) -> LaunchResult<()> {
    for param in params {
        debug!(param = %param.name, "publishing parameter");
        client
            .set_param(&param.name, &param.value)
            .await
            .map_err(|source| LaunchError::SetParam {
                name: param.name.clone(),
                source,
            })?;
    }

    info!(count = params.len(), "published parameters");
    Ok(())
}
