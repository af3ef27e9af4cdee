use anyhow::{Context, Result};
use std::process::Command;

/// Opens a URL or file in the system's default browser
pub fn open_in_browser(target: &str) -> Result<()> {
    tracing::info!("Opening {} in browser", target);

    let result = {
        #[cfg(target_os = "windows")]
        {
            // Empty title argument so "start" does not treat the target as the window title
            Command::new("cmd").args(["/C", "start", "", target]).spawn()
        }

        #[cfg(target_os = "macos")]
        {
            Command::new("open").arg(target).spawn()
        }

        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            Command::new("xdg-open").arg(target).spawn()
        }
    };

    result
        .map(|_| ())
        .with_context(|| format!("Failed to open browser for {}", target))
}

/// `http://127.0.0.1:{port}/`
pub fn local_url(port: u16) -> String {
    format!("http://127.0.0.1:{}/", port)
}
