use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use serde_json::json;

use markup_language_server::lsp::server::serve;
use markup_language_server::{detect_language, validate_template, Config, Language, Severity};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let config = Config::from_args_and_env()?;

    // --log-level is the default; RUST_LOG still takes precedence
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    if let Some(file) = config.check_file.clone() {
        return check_file(&file, config.json_output);
    }

    serve(config).await?;
    Ok(ExitCode::SUCCESS)
}

/// One-shot checker: detect the language, validate XML buffers, print
/// diagnostics, exit non-zero when invalid.
fn check_file(path: &Path, json_output: bool) -> Result<ExitCode> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let language = detect_language(&content);
    let result = match language {
        Language::Html => None,
        Language::Xml => Some(validate_template(&content)),
    };

    if json_output {
        print_json_report(path, language, result.as_ref())?;
    } else {
        print_text_report(path, language, result.as_ref());
    }

    let valid = result.as_ref().map(|r| r.is_valid()).unwrap_or(true);
    Ok(if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_text_report(
    path: &Path,
    language: Language,
    result: Option<&markup_language_server::ValidationResult>,
) {
    println!("{}: {}", path.display(), language);

    let Some(result) = result else {
        println!("HTML buffer, structural validation skipped");
        return;
    };

    for diag in &result.diagnostics {
        let severity = match diag.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        println!(
            "{}:{}:{}: {}: {}",
            path.display(),
            diag.line,
            diag.column,
            severity,
            diag.message
        );
    }

    let errors = result
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warnings = result.diagnostics.len() - errors;
    println!(
        "{} error(s), {} warning(s), {}",
        errors,
        warnings,
        if result.is_valid() { "valid" } else { "invalid" }
    );
}

fn print_json_report(
    path: &Path,
    language: Language,
    result: Option<&markup_language_server::ValidationResult>,
) -> Result<()> {
    let errors: Vec<_> = result
        .map(|r| {
            r.diagnostics
                .iter()
                .map(|d| {
                    json!({
                        "line": d.line,
                        "column": d.column,
                        "message": d.message,
                        "type": match d.severity {
                            Severity::Error => "error",
                            Severity::Warning => "warning",
                        },
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    let report = json!({
        "file": path.display().to_string(),
        "language": language.as_str(),
        "isValid": result.map(|r| r.is_valid()).unwrap_or(true),
        "errors": errors,
    });

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
