//! Lazy Policies - terminal viewer for the Ai Lazy Pack policy page
//!
//! Loads the terms, privacy and consent text for one language and prints it.
//!
//! # Usage
//! ```sh
//! cargo run -- --lang vi
//! POLICY_LOCALES_DIR=./locales cargo run
//! cargo run -- --locales-dir locales --lang th --json
//! ```
//!
//! # Environment Variables
//! - `POLICY_BASE_URL` - Site root serving `locales/{code}.json` (default: http://127.0.0.1:8080/)
//! - `POLICY_LOCALES_DIR` - Read documents from this directory instead of HTTP
//! - `POLICY_PREFERENCES_PATH` - Where the chosen language is remembered

use anyhow::Result;
use clap::Parser;
use lazy_policies::application::LocaleRenderer;
use lazy_policies::config::{Config, ConfigOverrides, SourceEnvConfig};
use lazy_policies::domain::language::AVAILABLE_LANGUAGES;
use lazy_policies::interfaces::text_view::language_menu;
use lazy_policies::interfaces::view::PageSnapshot;
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Switch to this language and remember it
    #[arg(long)]
    lang: Option<String>,

    /// Site root serving locales/{code}.json
    #[arg(long, conflicts_with = "locales_dir")]
    base_url: Option<String>,

    /// Read locale documents from a local directory
    #[arg(long)]
    locales_dir: Option<PathBuf>,

    /// Preference file location
    #[arg(long)]
    preferences: Option<PathBuf>,

    /// Print the available languages and exit
    #[arg(long)]
    list_languages: bool,

    /// Print the rendered view and status as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so the rendered page stays clean on stdout
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stderr_layer)
        .init();

    let args = Args::parse();

    if args.list_languages {
        for language in AVAILABLE_LANGUAGES {
            println!("{:<8} {}", language.code, language.label);
        }
        return Ok(());
    }

    let overrides = ConfigOverrides {
        source: match (args.base_url, args.locales_dir) {
            (Some(base_url), _) => Some(SourceEnvConfig::Http { base_url }),
            (None, Some(path)) => Some(SourceEnvConfig::Directory { path }),
            (None, None) => None,
        },
        preferences_path: args.preferences,
    };
    let config = Config::from_env_with(overrides)?;
    info!("Document source: {:?}", config.source);

    let renderer = LocaleRenderer::new(config.document_source()?, config.preference_store());

    let outcome = match args.lang.as_deref() {
        Some(code) => {
            renderer.select_initial_language();
            renderer.on_language_change(code).await
        }
        None => renderer.initialize().await,
    };

    let view = renderer.view();
    if args.json {
        let snapshot = PageSnapshot {
            view: view.clone(),
            status: renderer.status(),
        };
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        eprint!("{}", language_menu(&view));
        eprintln!("{}", renderer.status());
    }

    if let Err(e) = outcome {
        anyhow::bail!("Failed to load language {}: {}", renderer.selected_language(), e);
    }

    if !args.json {
        print!("{}", view);
    }
    Ok(())
}
