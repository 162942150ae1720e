use std::io::Write;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use psp_shelf_scraper::credentials::DEFAULT_BASE_URL;
use psp_shelf_scraper::{CredentialSource, Credentials};

use crate::CliError;

fn mask_value(s: &str) -> String {
    if s.chars().count() <= 4 {
        "****".to_string()
    } else {
        let head: String = s.chars().take(4).collect();
        format!("{}****", head)
    }
}

/// Show the current configuration and where each value comes from.
pub(crate) fn run_config_show() {
    let path = psp_shelf_scraper::config_path();
    let sources = psp_shelf_scraper::credential_sources();

    log::info!(
        "{}",
        "RAWG Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    match &path {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    crate::log_blank();

    // load() fails without an API key, so the base URL is resolved per field.
    let creds = Credentials::load().ok();

    let api_key = match sources.api_key {
        CredentialSource::Missing => None,
        _ => creds.as_ref().map(|c| mask_value(&c.api_key)),
    };
    let base_url = Some(
        creds
            .as_ref()
            .map(|c| c.base_url.clone())
            .or_else(|| std::env::var("RAWG_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
    );

    let fields: [(&str, &CredentialSource, Option<String>); 2] = [
        ("api_key", &sources.api_key, api_key),
        ("base_url", &sources.base_url, base_url),
    ];

    for (name, source, value) in &fields {
        let source_str = format!("({})", source);
        log::info!(
            "  {} {} {}",
            format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
            match value {
                Some(v) => v.clone(),
                None => "not set".if_supports_color(Stdout, |t| t.yellow()).to_string(),
            },
            source_str.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}

/// Interactively set up the API key and endpoint.
pub(crate) fn run_config_setup() -> Result<(), CliError> {
    println!(
        "{}",
        "RAWG API Setup".if_supports_color(Stdout, |t| t.bold()),
    );
    println!();

    let existing = Credentials::load().ok();

    let read_line = |prompt: &str, default: Option<&str>, required: bool| -> Result<Option<String>, CliError> {
        loop {
            match default {
                Some(def) => print!("  {} [{}]: ", prompt, def),
                None => print!("  {}: ", prompt),
            }
            std::io::stdout().flush()?;

            let mut input = String::new();
            if std::io::stdin().read_line(&mut input)? == 0 {
                return Err(CliError::config("setup aborted (end of input)"));
            }
            let trimmed = input.trim();

            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
            if let Some(def) = default {
                return Ok(Some(def.to_string()));
            }
            if !required {
                return Ok(None);
            }
            println!(
                "    {}",
                "This field is required.".if_supports_color(Stdout, |t| t.yellow()),
            );
        }
    };

    let has_embedded = psp_shelf_scraper::has_embedded_api_key();
    if has_embedded {
        println!(
            "  {}",
            "An API key is embedded in this binary; leave blank to keep using it."
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    } else {
        println!(
            "  {}",
            "Get a free key at https://rawg.io/apidocs".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let current_key = existing
        .as_ref()
        .map(|c| c.api_key.clone());
    let masked = current_key.as_deref().map(mask_value);
    let api_key = match read_line("API key", masked.as_deref(), !has_embedded)? {
        // Keeping the masked default means keeping the current key.
        Some(k) if Some(&k) == masked.as_ref() => current_key,
        other => other,
    };

    let current_url = existing
        .as_ref()
        .map(|c| c.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let base_url = read_line("Base URL", Some(&current_url), true)?
        .unwrap_or(current_url);

    let creds = Credentials::new(api_key.unwrap_or_default(), base_url);
    let path = psp_shelf_scraper::save_to_file(&creds)?;

    println!();
    println!(
        "{} Saved to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display(),
    );
    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    let path = psp_shelf_scraper::config_path()
        .ok_or_else(|| CliError::config("Could not determine config directory"))?;
    println!("{}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_value_hides_short_values_entirely() {
        assert_eq!(mask_value("abc"), "****");
        assert_eq!(mask_value("abcd"), "****");
    }

    #[test]
    fn mask_value_keeps_prefix() {
        assert_eq!(mask_value("0123456789abcdef"), "0123****");
    }
}
