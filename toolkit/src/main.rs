//! HPT CLI - Hospital Price Transparency file tools
//!
//! # Commands
//!
//! ```bash
//! hpt validate prices.csv              # Validate an MRF and persist the results
//! hpt results --export results.csv     # Show (and export) the last results
//! hpt filename --ein 12-3456789 --name "Example Hospital" --file-type csv
//! hpt txt generate hospitals.json      # Write cms-hpt.txt from records
//! hpt txt check cms-hpt.txt            # Check an existing cms-hpt.txt
//! hpt accepts a.csv b.xlsx             # Would the upload control take these?
//! ```
//!
//! Environment (or `.env`): `HPT_MAX_FINDINGS`, `HPT_SCHEMA_VERSION`,
//! `HPT_STATE_DIR`, `RUST_LOG`.

use clap::{Parser, Subcommand};
use hpt_toolkit::config::{ACCEPTED_FILE_TYPES, TXT_FILE_NAME};
use hpt_toolkit::txt::{parse, txt_artifact};
use hpt_toolkit::{
    check_records, results_artifact, Alert, AlertKind, CandidateFile, FileFormat, FileInputState,
    FileStore, FilenameWizard, HospitalRecord, LocalValidator, RecordList, RunStatus,
    ToolkitConfig, UploadedFile, ValidationFinding, ValidationOptions, ValidationSession,
    ValidationSnapshot,
};
use std::fs;
use std::path::{Path, PathBuf};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "hpt")]
#[command(about = "Hospital Price Transparency file tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a CSV or JSON machine-readable file
    Validate {
        /// Input MRF
        input: PathBuf,

        /// Schema version (default: HPT_SCHEMA_VERSION or v2.0)
        #[arg(short, long)]
        schema_version: Option<String>,

        /// Stop collecting errors and alerts after N (default: HPT_MAX_FINDINGS or 250)
        #[arg(short, long)]
        max_findings: Option<usize>,

        /// Write the results export to this file
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Show the last persisted validation results
    Results {
        /// Write the results export to this file
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Compose and check an MRF file name (fields are remembered between runs)
    Filename {
        /// Employer identification number
        #[arg(long)]
        ein: Option<String>,

        /// Hospital location name
        #[arg(long)]
        name: Option<String>,

        /// csv or json
        #[arg(long, value_parser = parse_format)]
        file_type: Option<FileFormat>,

        /// Include this NPI (hospital with several locations)
        #[arg(long, conflicts_with = "no_npi")]
        npi: Option<String>,

        /// Single location: no NPI in the name
        #[arg(long)]
        no_npi: bool,
    },

    /// Generate or check cms-hpt.txt
    Txt {
        #[command(subcommand)]
        action: TxtAction,
    },

    /// Check file names against the upload control's accepted types
    Accepts {
        /// File names
        #[arg(required = true)]
        names: Vec<String>,

        /// Accepted types (comma separated)
        #[arg(short, long, default_value = ACCEPTED_FILE_TYPES)]
        accept: String,
    },
}

#[derive(Subcommand)]
enum TxtAction {
    /// Write cms-hpt.txt from a JSON array of hospital records
    Generate {
        /// JSON file with records (name, sourcePageUrl, mrfUrl, contactName, contactEmail)
        input: PathBuf,

        /// Output file
        #[arg(short, long, default_value = TXT_FILE_NAME)]
        output: PathBuf,
    },

    /// Check an existing cms-hpt.txt
    Check {
        /// cms-hpt.txt file
        input: PathBuf,
    },
}

fn parse_format(value: &str) -> Result<FileFormat, String> {
    FileFormat::from_extension(&value.to_lowercase())
        .ok_or_else(|| format!("unknown file type '{}', expected csv or json", value))
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match ToolkitConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Validate {
            input,
            schema_version,
            max_findings,
            export,
        } => {
            let config = ToolkitConfig {
                schema_version: schema_version.unwrap_or(config.schema_version),
                max_findings: max_findings.unwrap_or(config.max_findings),
                ..config
            };
            cmd_validate(&config, &input, export.as_deref()).await
        }

        Commands::Results { export } => cmd_results(&config, export.as_deref()),

        Commands::Filename {
            ein,
            name,
            file_type,
            npi,
            no_npi,
        } => cmd_filename(&config, ein, name, file_type, npi, no_npi),

        Commands::Txt { action } => match action {
            TxtAction::Generate { input, output } => cmd_txt_generate(&input, &output),
            TxtAction::Check { input } => cmd_txt_check(&input),
        },

        Commands::Accepts { names, accept } => cmd_accepts(&names, &accept),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn session(config: &ToolkitConfig) -> ValidationSession<LocalValidator, FileStore> {
    ValidationSession::new(
        LocalValidator,
        FileStore::with_dir(&config.state_dir),
        ValidationOptions {
            max_findings: config.max_findings,
        },
    )
}

async fn cmd_validate(config: &ToolkitConfig, input: &Path, export: Option<&Path>) -> CliResult {
    config.check()?;
    eprintln!("🔎 Validating: {}", input.display());

    let bytes = tokio::fs::read(input).await?;
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| input.display().to_string());

    let session = session(config);
    session.set_schema_version(config.schema_version.as_str());
    session.submit(&UploadedFile::new(name, bytes)).await;

    let snapshot = session.snapshot();
    print_snapshot(&snapshot, session.filename_valid(), config.max_findings);
    export_results(&snapshot, export)?;

    if snapshot.status() != RunStatus::Complete || !snapshot.valid {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_results(config: &ToolkitConfig, export: Option<&Path>) -> CliResult {
    let session = session(config);
    let snapshot = session.snapshot();

    if snapshot.status() == RunStatus::Idle {
        eprintln!("📋 No validation results stored yet.");
        eprintln!("   Use 'hpt validate <file>' first.");
        return Ok(());
    }

    print_snapshot(&snapshot, session.filename_valid(), config.max_findings);
    export_results(&snapshot, export)
}

fn export_results(snapshot: &ValidationSnapshot, export: Option<&Path>) -> CliResult {
    if let Some(path) = export {
        results_artifact(snapshot).write_to(path)?;
        eprintln!("💾 Results written to: {}", path.display());
    }
    Ok(())
}

fn print_snapshot(snapshot: &ValidationSnapshot, filename_valid: bool, max_findings: usize) {
    let name = &snapshot.filename;

    match snapshot.status() {
        RunStatus::UnsupportedFormat => {
            eprintln!("❌ Unsupported file type: {} (expected .csv or .json)", name);
            return;
        }
        RunStatus::ReadError => {
            eprintln!("❌ Could not read file: {}", name);
            eprintln!("   The file may be empty, not UTF-8, or not valid CSV/JSON.");
            return;
        }
        RunStatus::Idle | RunStatus::Loading | RunStatus::Complete => {}
    }

    eprintln!("   Schema version: {}", snapshot.schema_version);
    eprintln!("   Started: {}", snapshot.start_timestamp);
    eprintln!("   Finished: {}", snapshot.end_timestamp);

    eprintln!("\n📄 Filename:");
    if filename_valid {
        eprintln!("   ✅ Filename valid: {}", name);
    } else {
        eprintln!("   ❌ Filename invalid: {}", name);
        eprintln!("      Must match format: <ein>_<hospitalname>_standardcharges.[json|csv]");
        eprintln!("      Use 'hpt filename' to compose one.");
    }

    let header = snapshot.location_header();

    eprintln!("\n✔️  Errors:");
    if snapshot.valid && snapshot.errors.is_empty() {
        eprintln!("   ✅ No errors found in file: {}", name);
    } else {
        eprintln!(
            "   ❌ {} found in file: {}",
            snapshot.error_summary(max_findings),
            name
        );
        print_findings(header, "Error description", &snapshot.errors);
    }

    eprintln!("\n⚠️  Warnings:");
    if snapshot.warnings.is_empty() {
        eprintln!("   ✅ No warnings found in file: {}", name);
    } else {
        eprintln!("   {} for file: {}", snapshot.warning_summary(), name);
        eprintln!("   These items are not required changes, but addressing them could save time in the future.");
        print_findings(header, "Error description", &snapshot.warnings);
    }

    if !snapshot.alerts.is_empty() {
        eprintln!("\n🔔 Alerts:");
        eprintln!("   {} for file: {}", snapshot.alert_summary(max_findings), name);
        print_findings(header, "Alert description", &snapshot.alerts);
    }
}

fn print_findings(header: &str, description: &str, findings: &[ValidationFinding]) {
    println!("{}\t{}", header, description);
    for finding in findings {
        println!("{}\t{}", finding.path, finding.message);
    }
}

fn print_alert(alert: &Alert) {
    let icon = match alert.kind {
        AlertKind::Success => "✅",
        AlertKind::Info => "ℹ️ ",
        AlertKind::Warning => "⚠️ ",
        AlertKind::Error => "❌",
    };
    eprintln!("{} {}", icon, alert.message);
}

fn cmd_filename(
    config: &ToolkitConfig,
    ein: Option<String>,
    name: Option<String>,
    file_type: Option<FileFormat>,
    npi: Option<String>,
    no_npi: bool,
) -> CliResult {
    let mut wizard = FilenameWizard::new(FileStore::with_dir(&config.state_dir));
    wizard.update(|fields| {
        if let Some(ein) = ein {
            fields.ein = ein;
        }
        if let Some(name) = name {
            fields.hospital_location_name = name;
        }
        if file_type.is_some() {
            fields.file_type = file_type;
        }
        if let Some(npi) = npi {
            fields.include_npi = Some(true);
            fields.npi = npi;
        } else if no_npi {
            fields.include_npi = Some(false);
        }
    });

    println!("{}", wizard.filename());
    let alert = wizard.alert(&LocalValidator);
    print_alert(&alert);

    if alert.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_txt_generate(input: &Path, output: &Path) -> CliResult {
    eprintln!("📄 Reading records: {}", input.display());

    let content = fs::read_to_string(input)?;
    let records: Vec<HospitalRecord> = serde_json::from_str(&content)?;
    let list = RecordList::from_records(records);
    eprintln!("   {} hospital location(s)", list.len());

    let alert = check_records(list.records());
    print_alert(&alert);

    let artifact = txt_artifact(list.records());
    artifact.write_to(output)?;
    eprintln!("💾 {} written to: {}", artifact.file_name, output.display());

    if alert.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_txt_check(input: &Path) -> CliResult {
    eprintln!("🔎 Checking: {}", input.display());

    let content = fs::read_to_string(input)?;
    let list = RecordList::from_records(parse(&content));
    eprintln!("   {} hospital location(s)", list.len());

    let alert = check_records(list.records());
    print_alert(&alert);

    if alert.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

fn guess_mime(name: &str) -> &'static str {
    match FileFormat::from_filename(name) {
        Some(FileFormat::Csv) => "text/csv",
        Some(FileFormat::Json) => "application/json",
        None => "",
    }
}

fn cmd_accepts(names: &[String], accept: &str) -> CliResult {
    let files: Vec<CandidateFile> = names
        .iter()
        .map(|name| CandidateFile::new(name.as_str(), guess_mime(name)))
        .collect();

    let mut state = FileInputState::new(Some(accept));
    let outcome = state.on_change(&files);

    for file in &files {
        let ok = state.accept().map_or(true, |a| a.matches(file));
        eprintln!("   {} {}", if ok { "✅" } else { "❌" }, file.name);
    }

    if outcome.forwards_change() {
        if let Some(file) = &state.selected_file {
            println!("{}", file.name);
        }
        Ok(())
    } else {
        eprintln!("❌ This is not a valid file type.");
        std::process::exit(1);
    }
}
