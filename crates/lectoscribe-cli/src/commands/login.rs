//! Log in to the transcription service and store the bearer token.

use anyhow::Result;
use lectoscribe_core::{Settings, auth};

use crate::args::LoginArgs;
use crate::ui;

pub async fn run(args: LoginArgs) -> Result<()> {
    let mut settings = Settings::load();

    let email = match args.email {
        Some(email) => email,
        None => ui::input("Email", None)?,
    };
    let password = ui::password("Password")?;

    let token = auth::login(&settings.effective_backend_url(), &email, &password).await?;

    settings.auth_token = Some(token);
    settings.save()?;

    ui::success(&format!("Logged in as {email}. Token saved."));
    Ok(())
}
