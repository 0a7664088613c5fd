//! CLI entrypoint for aida-consult
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod commands;
mod output;
mod progress;

use anyhow::{Context, Result, bail};
use clap::Parser;
use commands::{Cli, OutputFormat};
use output::ConsoleFormatter;
use progress::ProgressReporter;

use aida_application::{
    AttachFileInput, AttachFileUseCase, AuditLogger, ConsultationStore, RunConsultationInput,
    RunConsultationUseCase,
};
use aida_domain::{
    Agent, AgentKind, Confidence, ConsultationRequest, PatientRef, SelectionDecision,
    SessionContext, UserIdentity,
};
use aida_infrastructure::{
    ConfigLoader, FileConfig, HttpOpinionGenerator, HttpStore, JsonlAuditLogger, MemoryStore,
    StoreMode,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?
    };

    info!("Starting aida-consult");

    // Build the consultation request from the CLI arguments
    let request = if cli.overview {
        ConsultationRequest::PatientOverview
    } else if !cli.symptom.is_empty() {
        ConsultationRequest::Symptoms(cli.symptom.clone())
    } else {
        match &cli.query {
            Some(q) => ConsultationRequest::FreeText(q.clone()),
            None => bail!("A query is required. Pass a question, --symptom flags, or --overview."),
        }
    };

    // Resolve and gate the agent roster against the subscription tier
    let requested: Vec<AgentKind> = if cli.agent.is_empty() {
        config.default_agents()
    } else {
        cli.agent.iter().map(|s| s.parse().unwrap()).collect()
    };
    let agents = gate_selection(&config, &requested)?;

    let patient = PatientRef::new(&cli.patient_id, &cli.patient_name);
    let session = operator_session();
    let behavior = config.behavior.to_behavior();

    let input = RunConsultationInput::new(session, patient, request, agents.clone());

    // Print header
    if !cli.quiet {
        println!();
        println!("+============================================================+");
        println!("|        AIDA Medical - Clinical AI Consultation             |");
        println!("+============================================================+");
        println!();
        println!("Patient: {} ({})", cli.patient_name, cli.patient_id);
        println!(
            "Agents:  {}",
            agents
                .iter()
                .map(|a| a.profile().display_name)
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!();
    }

    // === Dependency Injection ===
    let generator = Arc::new(build_generator(&config)?);
    let audit = build_audit(&config);

    // The store adapter is chosen at the edge; everything past this point
    // is generic over the port.
    if cli.offline || config.store.mode == StoreMode::Memory {
        let store = Arc::new(MemoryStore::new());
        run(store, generator, audit, behavior, input, &cli).await
    } else {
        let base_url = config
            .store
            .base_url
            .as_deref()
            .context("store.base_url is required in http mode")?;
        let api_key = config
            .store
            .api_key
            .as_deref()
            .context("store.api_key is required in http mode")?;
        let store =
            Arc::new(HttpStore::new(base_url, api_key).map_err(|e| anyhow::anyhow!("{}", e))?);
        run(store, generator, audit, behavior, input, &cli).await
    }
}

/// Run the consultation against a concrete store and print the results.
async fn run<S: ConsultationStore + 'static>(
    store: Arc<S>,
    generator: Arc<HttpOpinionGenerator>,
    audit: Option<Arc<dyn AuditLogger>>,
    behavior: aida_application::BehaviorConfig,
    input: RunConsultationInput,
    cli: &Cli,
) -> Result<()> {
    let mut use_case =
        RunConsultationUseCase::new(Arc::clone(&store), generator).with_behavior(behavior);
    if let Some(audit) = audit {
        use_case = use_case.with_audit(audit);
    }

    // Execute with or without progress reporting
    let outcome = if cli.quiet {
        use_case.execute(input).await?
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await?
    };

    // Attachments go against the completed record
    if !cli.attach.is_empty() {
        let attach = AttachFileUseCase::new(store);
        for path in &cli.attach {
            let record = attach
                .execute(read_attachment(&outcome.consultation.id, path)?)
                .await?;
            if !cli.quiet {
                println!("Attached: {}", record.file_name);
            }
        }
    }

    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&outcome),
        OutputFormat::Summary => ConsoleFormatter::format_summary(&outcome),
        OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
    };
    println!("{}", output);

    Ok(())
}

/// Validate the requested roster against the tier policy, as if each agent
/// had been selected one at a time.
fn gate_selection(config: &FileConfig, requested: &[AgentKind]) -> Result<Vec<AgentKind>> {
    let policy = config.behavior.to_behavior().selection_policy();
    let mut selection: Vec<Agent> = Vec::new();

    for kind in requested {
        let target = Agent::from_kind(kind.clone());
        match policy.review_select(&selection, &target) {
            SelectionDecision::Allow => selection.push(target),
            SelectionDecision::DenyPremium(kind) => bail!(
                "{} is a premium agent; upgrade your subscription to select it",
                kind.profile().display_name
            ),
            SelectionDecision::DenyQuota { max_free_agents } => bail!(
                "The free tier allows at most {} agents per consultation",
                max_free_agents
            ),
        }
    }

    Ok(selection.into_iter().map(|a| a.kind).collect())
}

/// The CLI always runs as the signed-in local operator.
fn operator_session() -> SessionContext {
    let user = std::env::var("USER").unwrap_or_else(|_| "operator".to_string());
    SessionContext::authenticated(UserIdentity::new(
        format!("local-{}", user),
        format!("{}@localhost", user),
    ))
}

fn build_generator(config: &FileConfig) -> Result<HttpOpinionGenerator> {
    let provider = config
        .provider
        .clone()
        .context("No [provider] configured; add one to aida.toml or pass --config")?;
    let api_key = config
        .api_key
        .clone()
        .context("No provider api_key configured (config file or AIDA_API_KEY)")?;

    let generator = HttpOpinionGenerator::new(provider, api_key)
        .map_err(|e| anyhow::anyhow!("{}", e))?
        .with_default_confidence(Confidence::new(config.behavior.default_confidence));
    Ok(generator)
}

fn build_audit(config: &FileConfig) -> Option<Arc<dyn AuditLogger>> {
    if !config.audit.enabled {
        return None;
    }

    let path = config
        .audit
        .path
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| dirs::data_dir().map(|d| d.join("aida-consult").join("audit.jsonl")))?;

    JsonlAuditLogger::new(path).map(|logger| Arc::new(logger) as Arc<dyn AuditLogger>)
}

fn read_attachment(
    id: &aida_domain::ConsultationId,
    path: &Path,
) -> Result<AttachFileInput> {
    let content =
        std::fs::read(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "attachment".to_string());

    Ok(AttachFileInput {
        consultation_id: id.clone(),
        mime_type: guess_mime(&file_name).to_string(),
        file_name,
        content,
    })
}

fn guess_mime(file_name: &str) -> &'static str {
    let ext = file_name.rsplit('.').next().unwrap_or("");
    match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "txt" | "md" => "text/plain",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}
