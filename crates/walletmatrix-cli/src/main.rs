#![forbid(unsafe_code)]

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode as ProcessExitCode;
use walletmatrix_ingest::{load_dataset, seed_catalog, IngestOptions, IngestReport, LoadOutcome};
use walletmatrix_model::{
    assemble_views, normalize_feature_key, Catalog, Feature, Wallet, WalletFeature, WalletId,
    WalletType,
};
use walletmatrix_store::NewsletterStore;

#[derive(Parser)]
#[command(name = "walletmatrix")]
#[command(about = "WalletMatrix catalog operations CLI")]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Validate {
        #[arg(long)]
        wallets_dir: PathBuf,
        #[arg(long)]
        features_dir: PathBuf,
    },
    Inspect {
        #[arg(long, default_value = "data/wallets")]
        wallets_dir: PathBuf,
        #[arg(long, default_value = "data/features")]
        features_dir: PathBuf,
        #[arg(long = "type", value_enum)]
        wallet_type: Option<WalletTypeCli>,
        #[arg(long)]
        wallet_id: Option<u64>,
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    Seed {
        #[arg(long)]
        out_dir: PathBuf,
    },
    Newsletter {
        #[command(subcommand)]
        command: NewsletterCommand,
    },
}

#[derive(Subcommand)]
enum NewsletterCommand {
    Export {
        #[arg(long)]
        db: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WalletTypeCli {
    Lightning,
    Onchain,
    Hardware,
}

struct InspectArgs {
    wallets_dir: PathBuf,
    features_dir: PathBuf,
    wallet_type: Option<WalletTypeCli>,
    wallet_id: Option<u64>,
    pretty: bool,
}

#[derive(Clone, Copy)]
enum ExitCode {
    Success = 0,
    Validation = 3,
    Internal = 10,
}

fn main() -> ProcessExitCode {
    match run() {
        Ok(code) => ProcessExitCode::from(code as u8),
        Err(err) => {
            eprintln!("{err}");
            ProcessExitCode::from(ExitCode::Internal as u8)
        }
    }
}

fn run() -> Result<ExitCode, String> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Validate {
            wallets_dir,
            features_dir,
        } => validate_dataset(wallets_dir, features_dir, cli.json),
        Commands::Inspect {
            wallets_dir,
            features_dir,
            wallet_type,
            wallet_id,
            pretty,
        } => inspect_catalog(InspectArgs {
            wallets_dir,
            features_dir,
            wallet_type,
            wallet_id,
            pretty,
        }),
        Commands::Seed { out_dir } => write_seed(&out_dir, cli.json),
        Commands::Newsletter { command } => match command {
            NewsletterCommand::Export { db } => export_subscribers(&db, cli.json),
        },
    }
}

fn validate_dataset(
    wallets_dir: PathBuf,
    features_dir: PathBuf,
    machine_json: bool,
) -> Result<ExitCode, String> {
    let opts = IngestOptions::new(wallets_dir, features_dir);
    let report = match load_dataset(&opts).map_err(|e| e.to_string())? {
        LoadOutcome::Loaded(load) => load.report,
        LoadOutcome::NoData => IngestReport::default(),
    };

    if machine_json {
        let warnings: Vec<Value> = report
            .warnings()
            .iter()
            .map(|(category, detail)| json!({"category": category, "detail": detail}))
            .collect();
        let payload = json!({
            "ok": !report.has_warnings(),
            "wallets": report.wallets_loaded,
            "features": report.features_loaded,
            "associations": report.associations_built,
            "warnings": warnings,
        });
        println!(
            "{}",
            serde_json::to_string(&payload).map_err(|e| e.to_string())?
        );
    } else {
        println!(
            "wallets={} features={} associations={}",
            report.wallets_loaded, report.features_loaded, report.associations_built
        );
        for (category, detail) in report.warnings() {
            println!("warning {category}: {detail}");
        }
        if !report.has_warnings() {
            println!("dataset validation: OK");
        }
    }

    if report.has_warnings() {
        return Ok(ExitCode::Validation);
    }
    Ok(ExitCode::Success)
}

fn inspect_catalog(args: InspectArgs) -> Result<ExitCode, String> {
    let opts = IngestOptions::new(args.wallets_dir, args.features_dir);
    let catalog = match load_dataset(&opts).map_err(|e| e.to_string())? {
        LoadOutcome::Loaded(load) => load.catalog,
        LoadOutcome::NoData => seed_catalog(),
    };

    let wallet_id = args.wallet_id.map(WalletId::new);
    if let Some(id) = wallet_id {
        if catalog.wallet(id).is_none() {
            return Err(format!("wallet {id} does not exist"));
        }
    }
    let type_filter = args.wallet_type.map(|t| match t {
        WalletTypeCli::Lightning => WalletType::Lightning,
        WalletTypeCli::Onchain => WalletType::Onchain,
        WalletTypeCli::Hardware => WalletType::Hardware,
    });

    let views = assemble_views(&catalog, wallet_id, type_filter);
    let rendered = if args.pretty {
        serde_json::to_string_pretty(&views)
    } else {
        serde_json::to_string(&views)
    }
    .map_err(|e| e.to_string())?;
    println!("{rendered}");
    Ok(ExitCode::Success)
}

fn write_seed(out_dir: &Path, machine_json: bool) -> Result<ExitCode, String> {
    let catalog = seed_catalog();
    let features_dir = out_dir.join("features");
    let wallets_dir = out_dir.join("wallets");
    fs::create_dir_all(&features_dir)
        .map_err(|e| format!("create {}: {e}", features_dir.display()))?;
    fs::create_dir_all(&wallets_dir)
        .map_err(|e| format!("create {}: {e}", wallets_dir.display()))?;

    let defs: Vec<Value> = catalog.features().map(feature_def_doc).collect();
    let features_path = features_dir.join("features.json");
    write_json(&features_path, &Value::Array(defs))?;

    let mut wallet_paths = Vec::new();
    for wallet in catalog.wallets() {
        let path = wallets_dir.join(format!("{}.json", wallet_slug(wallet)));
        write_json(&path, &wallet_doc(&catalog, wallet))?;
        wallet_paths.push(path);
    }

    if machine_json {
        let payload = json!({
            "features": features_path.display().to_string(),
            "wallets": wallet_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>(),
        });
        println!(
            "{}",
            serde_json::to_string(&payload).map_err(|e| e.to_string())?
        );
    } else {
        println!("seed features: {}", features_path.display());
        for path in &wallet_paths {
            println!("seed wallet: {}", path.display());
        }
    }
    Ok(ExitCode::Success)
}

fn write_json(path: &Path, value: &Value) -> Result<(), String> {
    let mut text = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    text.push('\n');
    fs::write(path, text).map_err(|e| format!("write {}: {e}", path.display()))
}

fn wallet_slug(wallet: &Wallet) -> String {
    let slug = normalize_feature_key(&wallet.name);
    if slug.is_empty() {
        format!("wallet_{}", wallet.id.get())
    } else {
        slug
    }
}

/// One entry of the at-rest feature-definitions array; `id` carries the
/// author-facing feature key, not the numeric id.
fn feature_def_doc(feature: &Feature) -> Value {
    let mut doc = json!({
        "id": feature.key.as_str(),
        "name": feature.name,
        "description": feature.description,
        "type": feature.wallet_type,
        "order": feature.order,
    });
    if let Some(category) = feature.category {
        doc["category"] = json!(category);
    }
    if let Some(link) = &feature.info_link {
        doc["infoLink"] = json!(link);
    }
    doc
}

fn wallet_doc(catalog: &Catalog, wallet: &Wallet) -> Value {
    let mut features = serde_json::Map::new();
    for assoc in catalog.associations_for(wallet.id) {
        if let Some(feature) = catalog.feature(assoc.feature_id) {
            features.insert(feature.key.as_str().to_string(), feature_value_doc(assoc));
        }
    }
    let mut doc = json!({
        "name": wallet.name,
        "website": wallet.website,
        "description": wallet.description,
        "type": wallet.wallet_type,
        "order": wallet.order,
        "features": Value::Object(features),
    });
    if let Some(logo) = &wallet.logo {
        doc["logo"] = json!(logo);
    }
    if let Some(availability) = &wallet.availability {
        doc["availability"] = json!(availability);
    }
    doc
}

/// A value with no custom text, link or notes round-trips as a bare tag
/// string; anything richer becomes the detailed object form.
fn feature_value_doc(assoc: &WalletFeature) -> Value {
    if assoc.value.custom_text().is_none()
        && assoc.reference_link.is_none()
        && assoc.notes.is_none()
    {
        return json!(assoc.value.tag());
    }
    let mut value = json!({"value": assoc.value.tag()});
    if let Some(text) = assoc.value.custom_text() {
        value["customText"] = json!(text);
    }
    if let Some(link) = &assoc.reference_link {
        value["referenceLink"] = json!(link);
    }
    if let Some(notes) = &assoc.notes {
        value["notes"] = json!(notes);
    }
    value
}

fn export_subscribers(db: &Path, machine_json: bool) -> Result<ExitCode, String> {
    let store = NewsletterStore::open(db).map_err(|e| e.to_string())?;
    let emails = store.export().map_err(|e| e.to_string())?;
    if machine_json {
        println!(
            "{}",
            serde_json::to_string(&emails).map_err(|e| e.to_string())?
        );
    } else {
        for email in &emails {
            println!("{email}");
        }
    }
    Ok(ExitCode::Success)
}
