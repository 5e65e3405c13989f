//! CLI command implementations.

use anyhow::{Context, Result, bail};
use launchkit_config::{ArgScope, LaunchFile};
use launchkit_launch::{collect_params, print_params, publish};
use launchkit_registry::HttpRegistryClient;
use tracing::info;

/// Parse repeated `NAME=VALUE` bindings into a root argument scope.
fn scope_from_bindings(bindings: &[String]) -> Result<ArgScope> {
    let mut scope = ArgScope::new();
    for binding in bindings {
        let Some((name, value)) = binding.split_once('=') else {
            bail!("invalid argument binding {:?}: expected NAME=VALUE", binding);
        };
        scope.set_arg(name, value);
    }
    Ok(scope)
}

fn load_root(path: &str, bindings: &[String]) -> Result<LaunchFile> {
    let scope = scope_from_bindings(bindings)?;
    LaunchFile::load(path, scope).with_context(|| format!("failed to load {}", path))
}

pub fn dump(path: &str, bindings: &[String]) -> Result<()> {
    let file = load_root(path, bindings)?;
    let params = collect_params(&file);
    print_params(&params, &mut std::io::stdout())?;
    Ok(())
}

pub async fn load(
    path: &str,
    bindings: &[String],
    registry_url: &str,
    verbose: bool,
) -> Result<()> {
    let file = load_root(path, bindings)?;
    let params = collect_params(&file);

    if verbose {
        print_params(&params, &mut std::io::stdout())?;
    }

    let client = HttpRegistryClient::from_uri(registry_url)?;
    publish(&params, &client).await?;
    info!(count = params.len(), registry = registry_url, "parameters loaded");
    println!("Loaded {} parameters to {}", params.len(), registry_url);
    Ok(())
}

pub fn validate(path: &str, bindings: &[String]) -> Result<()> {
    match load_root(path, bindings) {
        Ok(file) => {
            let params = collect_params(&file);
            println!("Configuration is valid ({} parameters)", params.len());
            Ok(())
        }
        Err(e) => {
            println!("Configuration error: {:#}", e);
            std::process::exit(1);
        }
    }
}
