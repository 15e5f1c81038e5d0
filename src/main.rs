//! i18n-lookup
//!
//! Demo entry point: translates one identifier with the configured locales.

use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use tracing::info;

use i18n_lookup::{config::Settings, utils::logging, I18n, TranslationData};

/// Translate a dotted identifier using the configured locale tables.
#[derive(Parser, Debug)]
#[command(name = "i18n-lookup", about = "Translate a dotted identifier", version)]
struct Args {
    /// Identifier to translate, e.g. `common.buttons.save`
    identifier: String,

    /// Interpolation value as `name=value`; numeric values are passed as numbers
    #[arg(short, long = "data", value_name = "NAME=VALUE", value_parser = parse_data_pair)]
    data: Vec<(String, Value)>,

    /// Locale to translate into instead of the configured current locale
    #[arg(short, long)]
    locale: Option<String>,
}

/// Parse a `name=value` interpolation argument
fn parse_data_pair(pair: &str) -> Result<(String, Value), String> {
    let (name, value) = pair
        .split_once('=')
        .ok_or_else(|| format!("'{}' must look like name=value", pair))?;
    if name.is_empty() {
        return Err(format!("'{}' has an empty name", pair));
    }

    let value = value
        .parse::<serde_json::Number>()
        .map(Value::Number)
        .unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((name.to_string(), value))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate()?;

    // Initialize logging
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Loading translations...");
    let mut i18n = I18n::from_config(&settings.i18n);
    if let Some(locale) = args.locale.as_deref() {
        if !i18n.set_current_locale(locale) {
            anyhow::bail!("locale '{}' is not supported", locale);
        }
    }

    let data: TranslationData = args.data.into_iter().collect();
    let data = if data.is_empty() { None } else { Some(&data) };
    println!("{}", i18n.translate(&args.identifier, data));
    info!(
        locale = i18n.current_locale(),
        direction = %i18n.text_direction(),
        "Translated {}",
        args.identifier
    );

    Ok(())
}
