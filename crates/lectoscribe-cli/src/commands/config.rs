//! Show or change client settings.

use anyhow::Result;
use lectoscribe_core::{Settings, UserProfile};

use crate::args::ConfigArgs;
use crate::ui;

pub fn run(args: ConfigArgs) -> Result<()> {
    let mut settings = Settings::load();
    let mut changed = false;

    if let Some(backend_url) = args.backend_url {
        settings.backend_url = backend_url;
        changed = true;
    }
    if let Some(token) = args.token {
        settings.auth_token = Some(token);
        changed = true;
    }
    if let Some(device) = args.device {
        settings.microphone_device = Some(device);
        changed = true;
    }
    if let Some(default_module) = args.default_module {
        settings.default_module = Some(default_module);
        changed = true;
    }
    if args.display_name.is_some() || args.role.is_some() {
        let current = settings.profile.take().unwrap_or(UserProfile {
            display_name: String::new(),
            role: String::new(),
        });
        settings.profile = Some(UserProfile {
            display_name: args.display_name.unwrap_or(current.display_name),
            role: args.role.unwrap_or(current.role),
        });
        changed = true;
    }

    if changed {
        settings.save()?;
        ui::success("Settings saved.");
    }

    show(&settings);
    Ok(())
}

fn show(settings: &Settings) {
    ui::header("Settings");
    println!("  backend url:    {}", settings.effective_backend_url());
    println!(
        "  token:          {}",
        if settings.auth_token.is_some() {
            "set"
        } else {
            "not set (run `lectoscribe login`)"
        }
    );
    println!(
        "  microphone:     {}",
        settings.microphone_device.as_deref().unwrap_or("system default")
    );
    println!(
        "  default module: {}",
        settings.default_module.as_deref().unwrap_or("none")
    );
    if let Some(profile) = &settings.profile {
        println!("  signed in as:   {} ({})", profile.display_name, profile.role);
    }
    println!("  file:           {}", Settings::config_path().display());
}
