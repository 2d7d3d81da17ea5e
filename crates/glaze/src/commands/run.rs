#[cfg(windows)]
pub fn execute() {
    if let Err(e) = glaze_windows::daemon::run() {
        eprintln!("Daemon error: {e}");
        std::process::exit(1);
    }
}

#[cfg(not(windows))]
pub fn execute() {
    eprintln!("Error: the Glaze daemon only runs on Windows.");
    std::process::exit(1);
}
