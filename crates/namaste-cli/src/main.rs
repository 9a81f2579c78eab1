use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand};
use mapping_core::{
    config::data_dir_from_env_value, export::write_template, import_bundle_file, login,
    login_with_abha, suggested_mapping_type, views::patient_display_name, CoreConfig,
    FileStorage, Gender, MappingStore, MappingType, NewMappingRecord, NewPatient, RecordFilter,
    Role, StaticCatalogSource, TypeFilter,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "namaste")]
#[command(about = "NAMASTE to ICD-11 mapping CLI")]
struct Cli {
    /// Directory holding patient and mapping data (overrides NAMASTE_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Directory that exports and templates are written to
    #[arg(long, global = true, default_value = ".")]
    out_dir: PathBuf,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a patient
    AddPatient {
        name: String,
        age: u32,
        /// male, female or other
        gender: Gender,
        contact: String,
    },
    /// List registered patients
    Patients,
    /// Record a NAMASTE to ICD-11 mapping for a patient
    Map {
        patient_id: String,
        namaste_code: String,
        icd_code: String,
        /// exact, approximate or partial (defaults to the suggested type)
        #[arg(long = "type")]
        mapping_type: Option<MappingType>,
        /// Name to store instead of the catalog name
        #[arg(long)]
        namaste_name: Option<String>,
        /// Name to store instead of the catalog name
        #[arg(long)]
        icd_name: Option<String>,
    },
    /// List mapping records
    Mappings {
        /// Matches codes, code names and patient names
        #[arg(long, default_value = "")]
        search: String,
        /// all, exact, approximate or partial
        #[arg(long = "type", default_value = "all")]
        mapping_type: TypeFilter,
    },
    /// Show the problem list for a patient
    Problems { patient_id: String },
    /// Summarise mapping records
    Analytics,
    /// Search the NAMASTE catalog
    SearchNamaste {
        #[arg(default_value = "")]
        query: String,
    },
    /// Search the ICD-11 catalog
    SearchIcd {
        #[arg(default_value = "")]
        query: String,
    },
    /// Show suggested ICD-11 codes for a NAMASTE code
    Suggest { namaste_code: String },
    /// Export every mapping as a FHIR bundle
    Export,
    /// Write the FHIR bundle import template
    Template,
    /// Validate and upload a FHIR bundle file
    Import { file: PathBuf },
    /// Refresh the code catalogs
    Refresh,
    /// Remove every patient and mapping record
    Clear,
    /// Sign in with a username and password
    Login {
        username: String,
        password: String,
        /// doctor or admin
        #[arg(long, default_value = "doctor")]
        role: Role,
    },
    /// Sign in with an ABHA id and token
    LoginAbha { abha_id: String, token: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mapping_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| data_dir_from_env_value(std::env::var("NAMASTE_DATA_DIR").ok()));
    let cfg = CoreConfig::new(data_dir, cli.out_dir)?;
    tracing::debug!(
        "data directory {}, export directory {}",
        cfg.data_dir().display(),
        cfg.export_dir().display()
    );

    let Some(command) = cli.command else {
        println!("Use 'namaste --help' for commands");
        return Ok(());
    };

    let mut store = MappingStore::open(FileStorage::new(cfg.data_dir()))
        .with_context(|| format!("opening data in {}", cfg.data_dir().display()))?;

    match command {
        Commands::AddPatient {
            name,
            age,
            gender,
            contact,
        } => {
            let patient = store.add_patient(NewPatient {
                name,
                age,
                gender,
                contact,
            })?;
            println!("Registered patient {} ({})", patient.name, patient.id);
        }
        Commands::Patients => {
            if store.patients().is_empty() {
                println!("No patients found.");
            }
            for p in store.patients() {
                println!(
                    "{}  {}, {}, {}, {}",
                    p.id, p.name, p.age, p.gender, p.contact
                );
            }
        }
        Commands::Map {
            patient_id,
            namaste_code,
            icd_code,
            mapping_type,
            namaste_name,
            icd_name,
        } => {
            let namaste_name = match namaste_name {
                Some(name) => name,
                None => match store.catalog().find_namaste(&namaste_code) {
                    Some(code) => code.name.clone(),
                    None => bail!("unknown NAMASTE code {namaste_code}; pass --namaste-name"),
                },
            };
            let icd_name = match icd_name {
                Some(name) => name,
                None => match store.catalog().find_icd(&icd_code) {
                    Some(code) => code.name.clone(),
                    None => bail!("unknown ICD-11 code {icd_code}; pass --icd-name"),
                },
            };
            let mapping_type =
                mapping_type.unwrap_or_else(|| suggested_mapping_type(&namaste_code, &icd_code));

            let record = store.add_mapping_record(NewMappingRecord {
                patient_id,
                namaste_code,
                namaste_name,
                icd_code,
                icd_name,
                mapping_type,
            })?;
            println!(
                "Recorded {} -> {} ({}) as {}",
                record.namaste_code, record.icd_code, record.mapping_type, record.id
            );
        }
        Commands::Mappings {
            search,
            mapping_type,
        } => {
            let records = store.filter_records(&RecordFilter {
                search: &search,
                mapping_type,
            });
            if records.is_empty() {
                println!("No mapping records found.");
            }
            for r in records {
                println!(
                    "{}  {}  {} {} -> {} {}  [{}]",
                    r.created_at.format("%Y-%m-%d"),
                    patient_display_name(store.patients(), &r.patient_id),
                    r.namaste_code,
                    r.namaste_name,
                    r.icd_code,
                    r.icd_name,
                    r.mapping_type
                );
            }
        }
        Commands::Problems { patient_id } => {
            let name = patient_display_name(store.patients(), &patient_id);
            let problems = store.records_for_patient(&patient_id);
            println!("Problem list for {name} ({} conditions)", problems.len());
            for r in problems {
                println!(
                    "  {} ({})  ICD-11 {} {}  [{}]",
                    r.namaste_name, r.namaste_code, r.icd_code, r.icd_name, r.mapping_type
                );
            }
        }
        Commands::Analytics => {
            let a = store.analytics();
            println!("Total mappings: {}", a.total);
            for (label, count) in [
                ("exact", a.exact),
                ("approximate", a.approximate),
                ("partial", a.partial),
            ] {
                println!("  {label}: {count} ({}%)", a.percentage(count));
            }
            println!("By system:");
            for (system, count) in &a.by_system {
                println!("  {system}: {count}");
            }
            println!("Top conditions:");
            for (name, count) in &a.top_conditions {
                println!("  {name}: {count}");
            }
        }
        Commands::SearchNamaste { query } => {
            for c in store.search_namaste_codes(&query) {
                println!("{}  {} [{}]  {}", c.code, c.name, c.system, c.description);
            }
        }
        Commands::SearchIcd { query } => {
            for c in store.search_icd_codes(&query) {
                println!("{}  {}  ({})", c.code, c.name, c.category);
            }
        }
        Commands::Suggest { namaste_code } => {
            let suggestions = store.suggestions_for(&namaste_code);
            if suggestions.is_empty() {
                println!("No suggestions for {namaste_code}.");
            }
            for s in suggestions {
                println!("{}  {}  {}%", s.icd_code, s.match_type, s.confidence);
            }
        }
        Commands::Export => {
            let path = store.export_fhir_data(cfg.export_dir())?;
            println!(
                "Exported {} mappings to {}",
                store.mapping_records().len(),
                path.display()
            );
        }
        Commands::Template => {
            let path = write_template(cfg.export_dir(), Utc::now())?;
            println!("Wrote template to {}", path.display());
        }
        Commands::Import { file } => match import_bundle_file(&file) {
            Ok(receipt) => println!("Bundle uploaded with id {}", receipt.id),
            Err(e) => {
                eprintln!("Bundle rejected:");
                for reason in e.violations() {
                    eprintln!("  - {reason}");
                }
                std::process::exit(1);
            }
        },
        Commands::Refresh => match store.refresh_data(&StaticCatalogSource::default()).await {
            Ok(summary) => println!(
                "Catalogs refreshed: {} NAMASTE codes, {} ICD-11 codes",
                summary.namaste_codes, summary.icd_codes
            ),
            Err(e) => eprintln!("Error refreshing catalogs: {}", e),
        },
        Commands::Clear => {
            store.clear()?;
            println!("Cleared all patients and mapping records.");
        }
        Commands::Login {
            username,
            password,
            role,
        } => {
            let user = login(&username, &password, role)?;
            println!("Signed in as {} ({})", user.username, user.role);
        }
        Commands::LoginAbha { abha_id, token } => {
            let user = login_with_abha(&abha_id, &token)?;
            println!("Signed in with ABHA id {}", user.username);
        }
    }

    Ok(())
}
