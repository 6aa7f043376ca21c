//! Command execution handlers
//!
//! Session-based command execution: every handler receives a `&dyn Session`
//! and reaches the filesystem, the go toolchain and the terminal through it.

use crate::application::session::{CommandSession, Session};
use crate::application::{CliConfig, Commands};
use crate::modules::toolchain::GO_BINARY;
use crate::modules::{Component, ModuleClient};
use anyhow::{Context, Result};

/// Execute CLI commands using the session-based architecture
pub fn execute_command(config: CliConfig) -> Result<()> {
    // Create command session (owns all ephemeral state)
    let session = CommandSession::new(config.app_config);

    let command = match config.command {
        Some(cmd) => cmd,
        None => {
            session
                .display()
                .status()
                .message("thememod - theme component manager");
            session
                .display()
                .status()
                .subtle("Run 'thememod --help' for usage information");
            return Ok(());
        }
    };

    execute_command_with_session(command, &session)
}

/// Execute a specific command with a provided session (for testing)
pub fn execute_command_with_session(command: Commands, session: &dyn Session) -> Result<()> {
    tracing::debug!(?command, "executing command");
    match command {
        Commands::Requirements => handle_requirements(session),
        Commands::Version => handle_version(session),
        Commands::Collect => handle_collect(session),
        Commands::Vendor => handle_vendor(session),
        Commands::Tidy => handle_tidy(session),
        Commands::Graph { filter } => handle_graph(session, filter),
        Commands::Init { path } => handle_init(session, &path),
    }
}

fn handle_requirements(session: &dyn Session) -> Result<()> {
    session.display().status().section("Checking tool dependencies");

    let workdir = session.workdir()?;
    let probe = session
        .process()
        .execute(GO_BINARY, &["version"], &workdir, &[]);

    match probe {
        Ok(output) if output.success => {
            let version = output.stdout.trim();
            session.display().status().tool_check("go", true, version);
        }
        _ => {
            session.display().status().tool_check("go", false, "");
            session
                .display()
                .status()
                .subtle("   Module support needs Go: https://golang.org/dl/");
        }
    }

    Ok(())
}

fn handle_version(session: &dyn Session) -> Result<()> {
    session
        .display()
        .status()
        .message(&format!("thememod {}", env!("CARGO_PKG_VERSION")));
    session
        .display()
        .status()
        .message("Theme component resolution, vendoring and tidy");

    let build_info = [
        (
            "Built from commit",
            option_env!("GIT_HASH").unwrap_or("unknown"),
        ),
        ("Target", std::env::consts::ARCH),
    ];
    session.display().table().properties(&build_info);

    Ok(())
}

fn source_label(component: &Component) -> &'static str {
    if component.vendored {
        "vendor"
    } else if component.is_package() {
        "module"
    } else {
        "local"
    }
}

fn handle_collect(session: &dyn Session) -> Result<()> {
    let client = ModuleClient::from_session(session)?;
    session.display().status().checking("Collecting theme components");

    let collected = client.collect().context("Failed to collect components")?;
    if collected.modules.is_empty() {
        session.display().status().info("No theme imports configured");
        return Ok(());
    }

    let rows: Vec<Vec<&str>> = collected
        .modules
        .iter()
        .map(|component| {
            vec![
                component.path(),
                component.version(),
                source_label(component),
                component.owner.as_deref().unwrap_or("-"),
                component.dir.as_str(),
            ]
        })
        .collect();

    session
        .display()
        .table()
        .table(&["Path", "Version", "Source", "Owner", "Dir"], &rows);

    for component in &collected.modules {
        if let Some(replacement) = component.replacement() {
            session.display().status().subtle(&format!(
                "   {} => {} {}",
                component.path(),
                replacement.path,
                replacement.version
            ));
        }
    }

    session
        .display()
        .status()
        .complete(&format!("Collected {} components", collected.modules.len()));
    Ok(())
}

fn handle_vendor(session: &dyn Session) -> Result<()> {
    let client = ModuleClient::from_session(session)?;
    session.display().status().checking("Vendoring module components");

    let report = client.vendor().context("Failed to vendor modules")?;
    if report.vendored.is_empty() {
        session.display().status().info("Nothing to vendor");
        return Ok(());
    }

    for (path, version) in &report.vendored {
        session.display().status().success(path, version);
    }
    if let Some(index_file) = &report.index_file {
        session
            .display()
            .status()
            .subtle(&format!("   Index written to {}", index_file.display()));
    }

    session
        .display()
        .status()
        .complete(&format!("Vendored {} modules", report.vendored.len()));
    Ok(())
}

fn handle_tidy(session: &dyn Session) -> Result<()> {
    let client = ModuleClient::from_session(session)?;
    if !client.is_manifest_enabled() {
        session
            .display()
            .status()
            .warning("No go.mod in the project; nothing to tidy");
        return Ok(());
    }

    session.display().status().checking("Pruning unused requirements");
    let report = client.tidy().context("Failed to tidy go.mod")?;

    if report.is_clean() {
        session.display().status().info("go.mod and go.sum are already tidy");
    } else {
        session.display().status().success(
            "go.mod",
            &format!("{} requirements removed", report.manifest_removed),
        );
        session.display().status().success(
            "go.sum",
            &format!("{} entries removed", report.checksum_removed),
        );
    }

    session.display().status().complete("Tidy finished");
    Ok(())
}

fn handle_graph(session: &dyn Session, filter: bool) -> Result<()> {
    let client = ModuleClient::from_session(session)?;
    let mut graph = client
        .module_graph()
        .context("Failed to read module graph")?;

    if filter {
        let collected = client.collect().context("Failed to collect components")?;
        graph = graph.filtered_to(&collected);
    }

    for line in graph.render().lines() {
        session.display().status().message(line);
    }

    Ok(())
}

fn handle_init(session: &dyn Session, path: &str) -> Result<()> {
    let mut client = ModuleClient::from_session(session)?;
    if client.is_manifest_enabled() {
        anyhow::bail!("go.mod already exists in {}", client.workdir().display());
    }

    client
        .init(path)
        .with_context(|| format!("Failed to initialize module {}", path))?;

    session
        .display()
        .status()
        .success("Initialized module", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
