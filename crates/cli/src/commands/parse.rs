use std::io::Read;
use std::path::Path;
use std::process;

use funcdef_core::{FunctionDefinition, ParseError, ParseOptions, ParseValue};

use crate::{report_error, OutputFormat};

pub(crate) fn cmd_parse(
    file: Option<&Path>,
    start_rule: Option<String>,
    output: OutputFormat,
    quiet: bool,
) {
    let source = match read_source(file) {
        Ok(s) => s,
        Err(msg) => {
            tracing::debug!(%msg, "could not read input");
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let options = ParseOptions {
        start_rule,
        ..ParseOptions::default()
    };

    // Editors leave a final newline; the grammar has no trailing whitespace.
    match funcdef_core::parse(source.trim_end(), &options) {
        Ok(def) => {
            tracing::debug!(name = %def.function_name, "parsed definition");
            if quiet {
                return;
            }
            match output {
                OutputFormat::Json => {
                    let pretty = serde_json::to_string_pretty(&def)
                        .unwrap_or_else(|e| format!("serialization error: {}", e));
                    println!("{}", pretty);
                }
                OutputFormat::Text => print!("{}", render_summary(&def)),
            }
        }
        Err(e) => {
            report_parse_error(&e, file, output, quiet);
            process::exit(1);
        }
    }
}

fn read_source(file: Option<&Path>) -> Result<String, String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|e| format!("error reading '{}': {}", path.display(), e)),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("error reading stdin: {}", e))?;
            Ok(buf)
        }
    }
}

fn report_parse_error(e: &ParseError, file: Option<&Path>, output: OutputFormat, quiet: bool) {
    match (e, output) {
        (ParseError::Syntax(err), OutputFormat::Json) => {
            let err_json = serde_json::to_string_pretty(err)
                .unwrap_or_else(|_| serde_json::json!({ "error": err.message }).to_string());
            eprintln!("{}", err_json);
        }
        (ParseError::Syntax(err), OutputFormat::Text) => {
            if !quiet {
                let origin = file
                    .filter(|p| *p != Path::new("-"))
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<stdin>".to_string());
                eprintln!(
                    "{}:{}:{}: {}",
                    origin, err.location.start.line, err.location.start.column, err.message
                );
            }
        }
        (ParseError::InvalidStartRule { .. }, _) => report_error(&e.to_string(), output, quiet),
    }
}

/// Human-readable listing of a parsed definition.
fn render_summary(def: &FunctionDefinition) -> String {
    let mut out = String::new();
    out.push_str(&format!("Function: {}\n", def.function_name));
    out.push_str(&format!(
        "Configuration: {}\n",
        ParseValue::Object(def.configuration.clone())
    ));
    if !def.annotations.is_empty() {
        out.push_str("Annotations:\n");
        for (key, value) in &def.annotations {
            out.push_str(&format!(
                "  @{} = {}\n",
                key,
                ParseValue::String(value.clone())
            ));
        }
    }
    out.push_str(&format!("Definition: {}\n", def.definition));
    out
}
