//! List audio input devices.

use anyhow::Result;
use console::style;
use lectoscribe_core::list_input_devices;

use crate::ui;

pub fn run() -> Result<()> {
    ui::header("Input devices");
    for device in list_input_devices()? {
        if device.is_default {
            println!("  {} {}", style("●").green(), device.name);
        } else {
            println!("    {}", device.name);
        }
    }
    Ok(())
}
