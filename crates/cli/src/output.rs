//! Output formatting for CLI responses.

use colored::Colorize;
use maple_purupuru_protocol::{EffectCommand, Field, catalog};
use serde_json::json;

/// Print an error in human-readable format, with its chain.
pub fn print_error_human(error: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);
    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Print an error as a JSON object.
pub fn print_error_json(error: &anyhow::Error) {
    let payload = json!({
        "success": false,
        "error": { "message": error.to_string() },
    });
    println!("{payload}");
}

/// Print a command word with its full field breakdown.
pub fn print_word(raw: u32, json: bool) {
    let cmd = EffectCommand::decode(raw);
    if json {
        let payload = json!({
            "success": true,
            "raw": format!("{raw:#010X}"),
            "fields": cmd,
            "warnings": warnings(&cmd),
        });
        match serde_json::to_string_pretty(&payload) {
            Ok(s) => println!("{s}"),
            Err(err) => eprintln!("failed to format JSON output: {err}"),
        }
        return;
    }

    println!("{}", format!("{raw:#010X}").bold());
    for field in Field::ALL {
        let value = cmd.get(field);
        let line = format!("  {:<8} = {}", field.name(), value);
        if field == Field::Reserved && value != 0 {
            // Reserved bits should always be zero on real words.
            println!("{}", line.yellow());
        } else {
            println!("{line}");
        }
    }
    for warning in warnings(&cmd) {
        println!("  {} {}", "warning:".yellow().bold(), warning);
    }
}

/// Print the preset catalog.
pub fn print_presets(json: bool) {
    if json {
        let entries: Vec<_> = catalog()
            .iter()
            .map(|p| {
                json!({
                    "raw": format!("{:#010X}", p.raw),
                    "label": p.label,
                    "fields": p.command(),
                })
            })
            .collect();
        let payload = json!({ "success": true, "presets": entries });
        match serde_json::to_string_pretty(&payload) {
            Ok(s) => println!("{s}"),
            Err(err) => eprintln!("failed to format JSON output: {err}"),
        }
        return;
    }

    println!("{}", "Built-in presets:".bold());
    for (index, preset) in catalog().iter().enumerate() {
        println!(
            "  {} {} {}",
            format!("[{index}]").dimmed(),
            format!("{:#010X}", preset.raw).bold(),
            preset.label
        );
        println!("      {}", preset.command().to_string().dimmed());
    }
}

/// Semantic warnings for a decoded word, surfaced but never corrected.
fn warnings(cmd: &EffectCommand) -> Vec<String> {
    let mut out = Vec::new();
    if cmd.inclination_warning() {
        out.push("inclination period is 0 with an envelope flag set; the pack rejects this".to_string());
    }
    if cmd.motor == 0 {
        out.push("motor index 0 is invalid on real hardware".to_string());
    }
    out
}
