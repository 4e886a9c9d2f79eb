//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lectoscribe",
    version,
    about = "Capture or upload lecture audio and get a transcript back"
)]
pub struct Cli {
    /// Print diagnostic output to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Record from the microphone, then transcribe
    Record(RecordArgs),
    /// Transcribe an existing audio file
    Upload(UploadArgs),
    /// Log in to the transcription service and store the token
    Login(LoginArgs),
    /// Show or change client settings
    Config(ConfigArgs),
    /// List audio input devices
    Devices,
    /// Show recent uploads
    History,
}

#[derive(clap::Args)]
pub struct RecordArgs {
    /// Module the lecture belongs to (e.g. ml, java, mobile, dl)
    #[arg(long, short)]
    pub module: Option<String>,

    /// Course name the transcript is filed under
    #[arg(long, short)]
    pub course: Option<String>,

    /// Input device name (default: system default or configured device)
    #[arg(long)]
    pub device: Option<String>,
}

#[derive(clap::Args)]
pub struct UploadArgs {
    /// Audio file to transcribe
    pub file: PathBuf,

    /// Module the lecture belongs to (e.g. ml, java, mobile, dl)
    #[arg(long, short)]
    pub module: Option<String>,

    /// Course name the transcript is filed under
    #[arg(long, short)]
    pub course: Option<String>,
}

#[derive(clap::Args)]
pub struct LoginArgs {
    /// Account email (prompted when omitted)
    #[arg(long)]
    pub email: Option<String>,
}

#[derive(clap::Args)]
pub struct ConfigArgs {
    /// Base URL of the transcription service
    #[arg(long)]
    pub backend_url: Option<String>,

    /// Bearer token (normally set by `login`)
    #[arg(long)]
    pub token: Option<String>,

    /// Microphone device name
    #[arg(long)]
    pub device: Option<String>,

    /// Module preselected for submissions
    #[arg(long)]
    pub default_module: Option<String>,

    /// Display name shown for the signed-in user
    #[arg(long)]
    pub display_name: Option<String>,

    /// Role shown for the signed-in user
    #[arg(long)]
    pub role: Option<String>,
}
