use anyhow::{Context, Result};
use deskmem_api::{AuthStatus, SessionController};

/// Interactive login from the command line:
/// 1. Ask the server whether a password is required at all
/// 2. Prompt for the password without echo
/// 3. Exchange it for a token, which the controller stores
pub async fn run_login(controller: &SessionController) -> Result<()> {
    let status = controller.start().await;
    if let AuthStatus::Checked {
        auth_enabled: false,
        ..
    } = status
    {
        println!("The server does not require a password. Nothing to do.");
        return Ok(());
    }

    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;
    if password.is_empty() {
        anyhow::bail!("Password must not be empty");
    }

    match controller.login(&password).await {
        Ok(()) => {
            println!("Login successful. Token saved.");
            Ok(())
        }
        Err(e) => anyhow::bail!("{}", e.login_message()),
    }
}

pub async fn run_logout(controller: &SessionController) {
    controller.logout().await;
    println!("Logged out. Stored token removed.");
}

/// Open a URL in the system default browser.
pub fn open_browser(url: &str) {
    #[cfg(target_os = "linux")]
    let _ = std::process::Command::new("xdg-open").arg(url).spawn();
    #[cfg(target_os = "macos")]
    let _ = std::process::Command::new("open").arg(url).spawn();
    #[cfg(target_os = "windows")]
    let _ = std::process::Command::new("cmd")
        .args(["/c", "start", url])
        .spawn();
}
