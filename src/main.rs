use clap::Parser;
use jansunwai::config::Command;
use jansunwai::utils::error::ErrorSeverity;
use jansunwai::utils::{logger, validation::Validate};
use jansunwai::{
    CliConfig, Department, DraftFile, JansunwaiError, PortalConfig, Step, StepValidator,
    SubmitError, Transition,
};
use std::path::Path;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match &cli.config {
        Some(path) => match PortalConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path.display(), e);
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        },
        None => PortalConfig::default(),
    };

    if config.logging.json {
        logger::init_json_logger(&config.logging.level, cli.verbose);
    } else {
        logger::init_cli_logger(&config.logging.level, cli.verbose);
    }

    tracing::info!("Starting jansunwai CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let result = match &cli.command {
        Command::Departments => {
            print_departments();
            Ok(())
        }
        Command::File { draft, dry_run } => file_complaint(&config, draft, *dry_run).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Filing failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,      // input needs correcting
            ErrorSeverity::Medium => 2,   // retry later
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

fn print_departments() {
    println!("🏛️ Departments:");
    for department in Department::ALL {
        println!(
            "  {:<12} {} ({})",
            department.code(),
            department.name_hi(),
            department.name_en()
        );
        for label in department.subcategories() {
            println!("      - {}", label);
        }
    }
}

async fn file_complaint(
    config: &PortalConfig,
    path: &Path,
    dry_run: bool,
) -> Result<(), JansunwaiError> {
    tracing::info!("📁 Loading draft from: {}", path.display());
    let file = DraftFile::from_file(path)?;
    let client_reference = file.client_reference.clone();
    let mut wizard = file.into_wizard()?;

    println!("📋 Step gates:");
    for step in [Step::Category, Step::Details, Step::Location, Step::Contact] {
        let missing = StepValidator::missing_fields(wizard.draft(), step);
        if missing.is_empty() {
            println!("  ✅ {} / {}", step.title_hi(), step);
        } else {
            let fields: Vec<&str> = missing.iter().map(|f| f.as_str()).collect();
            println!("  ❌ {} / {} missing: {}", step.title_hi(), step, fields.join(", "));
        }
    }
    println!(
        "  📎 {} attachment(s), {} bytes",
        wizard.attachment_count(),
        wizard.total_attachment_bytes()
    );

    if let Transition::Blocked { step, missing } = wizard.advance_to_end() {
        return Err(SubmitError::ValidationFailed {
            reason: format!("step {} is incomplete", step),
            missing,
        }
        .into());
    }

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing was submitted");
        println!("✅ Draft passes every step. Run without --dry-run to submit.");
        return Ok(());
    }

    let intake = config.build_intake()?;
    let submission = wizard
        .submit_with_reference(intake.as_ref(), client_reference)
        .await?;

    tracing::info!("✅ Complaint submitted: {}", submission.complaint_id);
    println!("✅ शिकायत सफलतापूर्वक दर्ज की गई!");
    println!("🆔 Complaint ID: {}", submission.complaint_id);
    Ok(())
}
