//! Terminal plumbing shared by the commands.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};

/// mm:ss rendering of an elapsed-seconds counter.
pub fn format_duration(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Size rendering matching the dashboard (MB with two decimals).
pub fn format_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

/// Block until Enter is pressed, redrawing an elapsed-time line in the
/// meantime. Ctrl-C aborts.
pub fn wait_for_enter_while(elapsed: impl Fn() -> u64) -> Result<()> {
    enable_raw_mode()?;

    let result = (|| {
        loop {
            print!(
                "\r  ● Recording {}  (press Enter to stop) ",
                format_duration(elapsed())
            );
            std::io::stdout().flush()?;

            if event::poll(Duration::from_millis(200))? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Enter => break,
                        KeyCode::Char('c')
                            if key.modifiers.contains(KeyModifiers::CONTROL) =>
                        {
                            anyhow::bail!("recording interrupted");
                        }
                        _ => {}
                    }
                }
            }
        }
        Ok(())
    })();

    disable_raw_mode()?;
    println!();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(65), "01:05");
        assert_eq!(format_duration(3600), "60:00");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_size(2_621_440), "2.50 MB");
    }
}
