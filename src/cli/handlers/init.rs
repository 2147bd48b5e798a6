use std::fs;

use crate::cli::commands::InitArgs;
use crate::io::json_store::JsonStore;

const CADENCE_TOML_TEMPLATE: &str = r##"[planner]
name = "{name}"

# --- Reminders ---
# Channel used when a reminder doesn't name one.
# Any string your notification pipeline understands ("notification",
# "email", ...).

[reminders]
default_channel = "notification"

# --- Views ---
# First day of the calendar week for `cad list --view week`.
# "monday" or "sunday".

[views]
week_start = "monday"
"##;

/// Infer a planner name from a directory name: replace hyphens with spaces,
/// title-case.
fn infer_name(dir_name: &str) -> String {
    dir_name
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    upper + &chars.collect::<String>()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let planner_dir = cwd.join("cadence");

    // Check if already initialized
    if planner_dir.is_dir() {
        return Err("cadence planner already exists in ./cadence/".into());
    }

    let name = match args.name {
        Some(name) => name,
        None => cwd
            .file_name()
            .map(|n| infer_name(&n.to_string_lossy()))
            .unwrap_or_else(|| "Planner".to_string()),
    };

    fs::create_dir_all(&planner_dir)?;
    fs::write(
        planner_dir.join("cadence.toml"),
        CADENCE_TOML_TEMPLATE.replace("{name}", &name),
    )?;
    JsonStore::create_empty(&planner_dir)?;

    println!("Initialized planner \"{}\" in ./cadence/", name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_name() {
        assert_eq!(infer_name("acme-sales"), "Acme Sales");
        assert_eq!(infer_name("crm"), "Crm");
    }

    #[test]
    fn test_template_parses() {
        let text = CADENCE_TOML_TEMPLATE.replace("{name}", "Test");
        let config: crate::model::config::PlannerConfig = toml::from_str(&text).unwrap();
        assert_eq!(config.planner.name, "Test");
        assert_eq!(config.reminders.default_channel, "notification");
    }
}
