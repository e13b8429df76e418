//! Jobport CLI - Command-line interface for the Jobport recruitment portal
//!
//! Signs in against the portal API, keeps the session on disk between
//! invocations, and exposes the same role-gated views the web client has.

use clap::{Parser, Subcommand};
use jobport_access::{AccessDecision, AccessGate};
use jobport_api::{JobQuery, PortalClient};
use jobport_auth::{FileCredentialStore, HttpAuthBackend, SessionStore};
use jobport_core::{
    init_logging, log_operation_error, log_operation_start, log_operation_success,
    validation_error, ClientConfig, ErrorContext, JobportError, JobportResult, LoggingConfig, Role,
    SessionState,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "jobport")]
#[command(about = "A command-line client for the Jobport recruitment portal")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and persist the session
    Login {
        /// Account email
        email: String,

        /// Account password
        password: String,
    },

    /// Create an account and sign it in
    Register {
        /// Display name for the new account
        #[arg(long)]
        full_name: String,

        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,

        /// Account role (admin, employer, candidate)
        #[arg(long, default_value = "candidate")]
        role: String,
    },

    /// Drop the persisted session
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Check whether the current session may open a route
    Check {
        /// Route path, e.g. /jobs/manage
        path: String,
    },

    /// List the gated routes and their decisions for the current session
    Routes,

    /// Browse job postings
    Jobs {
        /// Keyword filter
        #[arg(short, long)]
        keyword: Option<String>,

        /// Location filter
        #[arg(short, long)]
        location: Option<String>,

        /// Employment type filter (full-time, part-time, ...)
        #[arg(short = 't', long)]
        employment_type: Option<String>,

        /// Page number
        #[arg(long, default_value = "1")]
        page: u32,

        /// Page size
        #[arg(long, default_value = "10")]
        size: u32,
    },

    /// Show one job posting
    Job {
        /// Job posting id
        id: i64,
    },

    /// List notifications for the signed-in account
    Notifications,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Initialize default configuration
        #[arg(long)]
        init: bool,

        /// Validate current configuration
        #[arg(long)]
        validate: bool,
    },
}

#[tokio::main]
async fn main() -> JobportResult<()> {
    let cli = Cli::parse();

    let mut logging_config = LoggingConfig::default();
    if cli.verbose {
        logging_config.level = "debug".to_string();
    }

    init_logging(&logging_config).map_err(|e| JobportError::Config {
        message: format!("Failed to initialize logging: {}", e),
        source: Some(e),
        context: ErrorContext::new("cli")
            .with_operation("init_logging")
            .with_suggestion("Check logging configuration"),
    })?;

    info!("Starting Jobport CLI v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(cli.config.as_ref())?;
    config.validate()?;

    match cli.command {
        Commands::Login { email, password } => {
            handle_login(&email, &password, &config).await?;
        }
        Commands::Register {
            full_name,
            email,
            password,
            role,
        } => {
            handle_register(&full_name, &email, &password, &role, &config).await?;
        }
        Commands::Logout => {
            handle_logout(&config)?;
        }
        Commands::Whoami => {
            handle_whoami(&config)?;
        }
        Commands::Check { path } => {
            handle_check(&path, &config)?;
        }
        Commands::Routes => {
            handle_routes(&config)?;
        }
        Commands::Jobs {
            keyword,
            location,
            employment_type,
            page,
            size,
        } => {
            handle_jobs(keyword, location, employment_type, page, size, &config).await?;
        }
        Commands::Job { id } => {
            handle_job(id, &config).await?;
        }
        Commands::Notifications => {
            handle_notifications(&config).await?;
        }
        Commands::Config {
            show,
            init,
            validate,
        } => {
            handle_config(show, init, validate, cli.config.as_ref())?;
        }
    }

    Ok(())
}

fn load_config(config_path: Option<&PathBuf>) -> JobportResult<ClientConfig> {
    if let Some(path) = config_path {
        info!("Loading configuration from {:?}", path);
        return Ok(ClientConfig::from_file(path)?.apply_env_overrides());
    }

    // Try to load from default locations
    let default_paths = [
        dirs::config_dir().map(|d| d.join("jobport").join("config.toml")),
        dirs::home_dir().map(|d| d.join(".jobport").join("config.toml")),
        Some(PathBuf::from("jobport.toml")),
    ];

    for path in default_paths.iter().flatten() {
        if path.exists() {
            info!("Loading configuration from {:?}", path);
            return Ok(ClientConfig::from_file(path)?.apply_env_overrides());
        }
    }

    info!("No configuration file found, using defaults");
    Ok(ClientConfig::default().apply_env_overrides())
}

/// Build the session store the CLI shares across commands: HTTP backend
/// plus the on-disk credential slots.
fn open_store(config: &ClientConfig) -> JobportResult<Arc<SessionStore>> {
    let backend = HttpAuthBackend::new(&config.api)?;
    let storage = FileCredentialStore::new(credentials_dir(config))?;
    Ok(Arc::new(SessionStore::new(
        Arc::new(backend),
        Arc::new(storage),
    )))
}

fn credentials_dir(config: &ClientConfig) -> PathBuf {
    let raw = &config.storage.credentials_dir;
    if let Some(rest) = raw.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches('/'));
        }
    }
    PathBuf::from(raw)
}

async fn handle_login(email: &str, password: &str, config: &ClientConfig) -> JobportResult<()> {
    log_operation_start!("login", email = %email);

    let store = open_store(config)?;
    match store.login(email, password).await {
        Ok(session) => {
            log_operation_success!("login", email = %email);
            println!("✅ Signed in as {} ({})", session.user.full_name, session.user.role);
            Ok(())
        }
        Err(e) => {
            log_operation_error!("login", e, email = %email);
            println!("❌ {}", e.user_message());
            Err(e)
        }
    }
}

async fn handle_register(
    full_name: &str,
    email: &str,
    password: &str,
    role: &str,
    config: &ClientConfig,
) -> JobportResult<()> {
    let role: Role = role
        .parse()
        .map_err(|e: String| validation_error!(e, "role", "cli"))?;
    log_operation_start!("register", email = %email, role = %role);

    let store = open_store(config)?;
    match store.register(full_name, email, password, role).await {
        Ok(session) => {
            log_operation_success!("register", email = %email);
            println!(
                "✅ Account created, signed in as {} ({})",
                session.user.full_name, session.user.role
            );
            Ok(())
        }
        Err(e) => {
            log_operation_error!("register", e, email = %email);
            println!("❌ {}", e.user_message());
            Err(e)
        }
    }
}

fn handle_logout(config: &ClientConfig) -> JobportResult<()> {
    let store = open_store(config)?;
    store.hydrate();
    store.logout();
    println!("✅ Signed out");
    Ok(())
}

fn handle_whoami(config: &ClientConfig) -> JobportResult<()> {
    let store = open_store(config)?;
    match store.hydrate() {
        SessionState::Authenticated(session) => {
            println!("👤 {}", session.user.full_name);
            println!("   Email: {}", session.user.email);
            println!("   Role:  {}", session.user.role);
            println!("   Id:    {}", session.user.user_id);
        }
        _ => {
            println!("Not signed in");
        }
    }
    Ok(())
}

fn handle_check(path: &str, config: &ClientConfig) -> JobportResult<()> {
    let store = open_store(config)?;
    store.hydrate();
    let gate = AccessGate::with_portal_defaults(store);
    println!("{} {}", decision_label(&gate.authorize_route(path)), path);
    Ok(())
}

fn handle_routes(config: &ClientConfig) -> JobportResult<()> {
    let store = open_store(config)?;
    let state = store.hydrate();
    let gate = AccessGate::with_portal_defaults(store);

    println!("Session: {}", state);
    for (path, _) in gate.routes().iter() {
        println!("  {} {}", decision_label(&gate.authorize_route(path)), path);
    }
    Ok(())
}

fn decision_label(decision: &AccessDecision) -> &'static str {
    match decision {
        AccessDecision::Allow => "✅ allow   ",
        AccessDecision::Pending => "⏳ pending ",
        AccessDecision::RedirectToLogin => "🔒 login   ",
        AccessDecision::Forbidden => "❌ denied  ",
    }
}

async fn handle_jobs(
    keyword: Option<String>,
    location: Option<String>,
    employment_type: Option<String>,
    page: u32,
    size: u32,
    config: &ClientConfig,
) -> JobportResult<()> {
    let client = open_client(config)?;
    let query = JobQuery {
        keyword,
        location,
        employment_type,
        page: Some(page),
        size: Some(size),
    };

    let jobs = client.list_jobs(&query).await?;
    println!(
        "📋 {} postings (page {}, {} per page, {} total)",
        jobs.items.len(),
        jobs.page,
        jobs.size,
        jobs.count
    );
    for job in &jobs.items {
        println!(
            "  #{:<6} {} — {} ({})",
            job.id, job.title, job.company, job.location
        );
    }
    Ok(())
}

async fn handle_job(id: i64, config: &ClientConfig) -> JobportResult<()> {
    let client = open_client(config)?;
    let job = client.job_detail(id).await?;

    println!("📄 {} (#{})", job.title, job.id);
    println!("   Company:  {}", job.company);
    println!("   Location: {}", job.location);
    println!("   Type:     {}", job.employment_type);
    println!("   Salary:   {}", job.salary);
    println!("   Deadline: {}", job.deadline);
    if !job.description.is_empty() {
        println!("\n{}", job.description);
    }
    if !job.requirements.is_empty() {
        println!("\nRequirements:\n{}", job.requirements);
    }
    Ok(())
}

async fn handle_notifications(config: &ClientConfig) -> JobportResult<()> {
    let store = open_store(config)?;
    let session = match store.hydrate() {
        SessionState::Authenticated(session) => session,
        _ => {
            println!("Not signed in");
            return Ok(());
        }
    };

    let client = PortalClient::new(&config.api)?.with_session(&session);
    let notifications = client.notifications_for_user(session.user.user_id).await?;
    if notifications.is_empty() {
        println!("🔔 No notifications");
        return Ok(());
    }

    for n in &notifications {
        let marker = if n.read { " " } else { "●" };
        println!("{} #{:<6} {} — {}", marker, n.id, n.title, n.created_at);
    }
    Ok(())
}

/// Portal client carrying the persisted token when one exists.
fn open_client(config: &ClientConfig) -> JobportResult<PortalClient> {
    let store = open_store(config)?;
    let client = PortalClient::new(&config.api)?;
    match store.hydrate() {
        SessionState::Authenticated(session) => Ok(client.with_session(&session)),
        _ => Ok(client),
    }
}

fn handle_config(
    show: bool,
    init: bool,
    validate: bool,
    config_path: Option<&PathBuf>,
) -> JobportResult<()> {
    let default_path = dirs::config_dir()
        .map(|d| d.join("jobport").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("jobport.toml"));
    let path = config_path.cloned().unwrap_or(default_path);

    if init {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let config = ClientConfig::default();
        config.save_to_file(&path)?;
        println!("✅ Wrote default configuration to {:?}", path);
        return Ok(());
    }

    let config = load_config(config_path)?;

    if validate {
        config.validate()?;
        println!("✅ Configuration is valid");
    }

    if show || (!init && !validate) {
        println!("API base URL:    {}", config.api.base_url);
        println!("Timeout:         {}s", config.api.timeout_seconds);
        println!("Credentials dir: {}", config.storage.credentials_dir);
        println!("Log level:       {}", config.logging.level);
    }

    Ok(())
}
