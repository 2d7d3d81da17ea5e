use glaze_core::config;

/// Creates the default configuration file at `~/.config/glaze/config.toml`.
///
/// An existing file is not overwritten.
pub fn execute() {
    let Some(path) = config::config_path() else {
        eprintln!("Error: could not determine home directory.");
        std::process::exit(1);
    };

    if let Some(dir) = path.parent()
        && let Err(e) = std::fs::create_dir_all(dir)
    {
        eprintln!("Error: could not create {}: {e}", dir.display());
        std::process::exit(1);
    }

    if path.exists() {
        println!("Already exists: {}", path.display());
        return;
    }

    match std::fs::write(&path, config::template()) {
        Ok(()) => println!("Created {}", path.display()),
        Err(e) => {
            eprintln!("Error: could not write {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}
