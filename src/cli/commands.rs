//! CLI command implementations

use anyhow::Result;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::auth::{Credentials, FileStorage, Identity, Role, SessionStore};
use crate::cli::{error, info, print_decision, print_identity, print_route_table, success, warn, OutputFormat};
use crate::config::{self, loader::CONFIG_FILENAME, Config};
use crate::guard::{self, Decision, ROUTES};

/// Initialize a new vivacore.toml configuration file
pub async fn init() -> Result<()> {
    if init_in(Path::new("."))? {
        info("Run 'vivacore serve' to start the portal");
    }
    Ok(())
}

/// Write a default config into `dir`. Returns `false` if one is already there.
pub fn init_in(dir: &Path) -> Result<bool> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        warn(&format!("{} already exists", CONFIG_FILENAME));
        return Ok(false);
    }

    fs::write(&config_path, config::loader::default_config_content())?;

    success(&format!("Created {}", CONFIG_FILENAME));
    Ok(true)
}

/// Start the portal server
pub async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = config::load_config_or_default()?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info(&format!("Starting portal on http://{}:{}", host, port));

    crate::api::run_server(config, &host, port).await?;
    Ok(())
}

/// Sign in against the stored session
pub async fn login(email: &str, password: &str, role: Role) -> Result<()> {
    let config = config::load_config_or_default()?;
    login_with_config(&config, &Credentials::new(email, password, role)).await?;
    Ok(())
}

pub async fn login_with_config(config: &Config, credentials: &Credentials) -> Result<Identity> {
    if !credentials.is_complete() {
        error("Email and password are required");
        anyhow::bail!("missing credentials");
    }

    let mut session = open_session(config)?;
    if !session.login_with(credentials).await? {
        error("Login failed. Check your credentials and try again.");
        anyhow::bail!("login rejected");
    }

    let identity = session
        .current_identity()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("login succeeded without an identity"))?;
    success(&format!("Logged in as {} ({})", identity.name, identity.role));
    Ok(identity)
}

/// Remove the stored session
pub async fn logout() -> Result<()> {
    let config = config::load_config_or_default()?;
    logout_with_config(&config)?;
    Ok(())
}

/// Returns whether an identity was signed in
pub fn logout_with_config(config: &Config) -> Result<bool> {
    let mut session = open_session(config)?;

    let was_signed_in = session.is_authenticated();
    session.logout()?;

    if was_signed_in {
        success("Logged out");
    } else {
        info("Not logged in");
    }
    Ok(was_signed_in)
}

/// Show the stored identity
pub async fn whoami(format: OutputFormat) -> Result<()> {
    let config = config::load_config_or_default()?;
    whoami_with_config(&config, format)?;
    Ok(())
}

pub fn whoami_with_config(config: &Config, format: OutputFormat) -> Result<Option<Identity>> {
    let session = open_session(config)?;

    let Some(identity) = session.current_identity() else {
        info("Not logged in. Sign in with 'vivacore login --email <email> --password <password>'");
        return Ok(None);
    };

    match format {
        OutputFormat::Table => print_identity(identity, session.signed_in_at()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(identity)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(identity)?),
    }
    Ok(Some(identity.clone()))
}

/// List the route table
pub async fn routes(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_route_table(ROUTES),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(ROUTES)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(ROUTES)?),
    }
    Ok(())
}

/// Evaluate the guard for the stored identity
pub async fn check(path: &str) -> Result<()> {
    let config = config::load_config_or_default()?;
    check_with_config(&config, path)?;
    Ok(())
}

pub fn check_with_config(config: &Config, path: &str) -> Result<Decision> {
    let session = open_session(config)?;

    let decision = guard::decide(session.current_identity(), path);
    print_decision(path, &decision);
    Ok(decision)
}

/// Open the file-backed session for a config, restoring any stored identity
pub fn open_session(config: &Config) -> Result<SessionStore> {
    let storage = Arc::new(FileStorage::new(config.storage.dir.clone()));
    let mut session = SessionStore::new(storage).with_latency(config.auth.simulated_latency());
    session.restore()?;
    Ok(session)
}
