//! Native viewer binary for the UGD coming-soon scene.

use std::path::Path;

use ugd_scene::options::Options;
use ugd_scene::Viewer;

fn load_options(arg: Option<String>) -> Result<Options, String> {
    let Some(arg) = arg else {
        return Ok(Options::default());
    };
    Options::load(Path::new(&arg))
        .map_err(|e| format!("Failed to load {arg}: {e}"))
}

/// `ugd-scene <dir>` lists the presets in a directory instead of running.
fn list_presets(arg: Option<&str>) -> bool {
    let Some(dir) = arg.map(Path::new).filter(|p| p.is_dir()) else {
        return false;
    };
    let presets = Options::list_presets(dir);
    if presets.is_empty() {
        log::warn!("no presets in {}", dir.display());
    }
    for name in presets {
        log::info!("{}", dir.join(format!("{name}.toml")).display());
    }
    true
}

/// `ugd-scene --schema <out.json>` writes the options schema for editors.
fn write_schema(path: &str) -> Result<(), String> {
    let schema = serde_json::to_string_pretty(&Options::json_schema())
        .map_err(|e| e.to_string())?;
    std::fs::write(path, schema).map_err(|e| format!("{path}: {e}"))?;
    log::info!("options schema written to {path}");
    Ok(())
}

/// Shown without `RUST_LOG`: the scene's own info lines, which include
/// the preset listing.
const DEFAULT_LOG_FILTER: &str = "ugd_scene=info";

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER),
    )
    .init();

    let mut args = std::env::args().skip(1);
    let arg = args.next();
    if arg.as_deref() == Some("--schema") {
        let path = args.next().unwrap_or_else(|| "ugd-options.schema.json".to_owned());
        if let Err(e) = write_schema(&path) {
            log::error!("{e}");
            std::process::exit(1);
        }
        return;
    }
    if list_presets(arg.as_deref()) {
        return;
    }

    let options = match load_options(arg) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            log::error!("Usage: ugd-scene [preset.toml | preset-dir | --schema out.json]");
            std::process::exit(1);
        }
    };

    if let Err(e) = Viewer::builder().with_options(options).build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_listing_only_takes_directories() {
        let dir = std::env::temp_dir()
            .join(format!("ugd-scene-main-presets-{}", std::process::id()));
        let preset = dir.join("phone.toml");
        Options::default().save(&preset).unwrap();

        assert!(list_presets(dir.to_str()));
        assert!(!list_presets(preset.to_str()));
        assert!(!list_presets(None));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
