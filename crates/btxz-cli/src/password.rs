//! Password acquisition: flag or environment first, then a TTY prompt.

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use console::Term;
use secrecy::ExposeSecret;
use secrecy::SecretString;

use crate::cli::PasswordArgs;

/// Returns the password from the arguments or prompts for it.
///
/// With `confirm`, an interactive password must be typed twice.
pub fn resolve(args: &PasswordArgs, confirm: bool) -> Result<SecretString> {
    if let Some(password) = &args.password {
        return Ok(SecretString::from(password.clone()));
    }

    if !Term::stderr().is_term() {
        bail!(
            "No password given\n\
             HINT: Pass --password or set BTXZ_PASSWORD when not running in a terminal."
        );
    }

    let password = prompt("Password: ")?;
    if confirm {
        let again = prompt("Confirm password: ")?;
        if password.expose_secret() != again.expose_secret() {
            bail!("Passwords do not match");
        }
    }
    Ok(password)
}

fn prompt(label: &str) -> Result<SecretString> {
    rpassword::prompt_password(label)
        .map(SecretString::from)
        .context("failed to read password")
}
