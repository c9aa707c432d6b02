use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand, ValueEnum};

use footstats_core::{render_tailwind_config, ScanConfig};

#[derive(Clone, ValueEnum, Default)]
pub enum StyleFormat {
    #[default]
    Js,
    Json,
    Yaml,
}

#[derive(Args)]
pub struct TailwindCommand {
    #[command(subcommand)]
    pub command: TailwindSubcommand,
}

#[derive(Subcommand)]
pub enum TailwindSubcommand {
    /// Print the Tailwind scan declaration
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "js")]
        format: StyleFormat,
    },
    /// Write tailwind.config.js
    Write {
        /// Destination file
        #[arg(long, short, default_value = "tailwind.config.js")]
        output: PathBuf,
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

impl TailwindCommand {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config = ScanConfig::footstats();
        match &self.command {
            TailwindSubcommand::Show { format } => {
                print!("{}", render(&config, format)?);
            }
            TailwindSubcommand::Write { output, force } => {
                write_config(&config, output, *force)?;
                println!("✓ Wrote {}", output.display());
            }
        }
        Ok(())
    }
}

fn render(config: &ScanConfig, format: &StyleFormat) -> Result<String, StyleWriteError> {
    match format {
        StyleFormat::Js => Ok(render_tailwind_config(config)),
        StyleFormat::Json => serde_json::to_string_pretty(config)
            .map(|s| s + "\n")
            .map_err(|e| StyleWriteError::Encode(e.to_string())),
        StyleFormat::Yaml => {
            serde_yaml::to_string(config).map_err(|e| StyleWriteError::Encode(e.to_string()))
        }
    }
}

/// Write the rendered module to `path`, refusing to clobber unless `force`.
fn write_config(config: &ScanConfig, path: &Path, force: bool) -> Result<(), StyleWriteError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StyleWriteError::IoError(path.to_path_buf(), e))?;
        }
    }
    let rendered = render_tailwind_config(config);
    if force {
        std::fs::write(path, rendered)
            .map_err(|e| StyleWriteError::IoError(path.to_path_buf(), e))?;
    } else {
        // create_new fails atomically if the file appeared in the meantime
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => StyleWriteError::AlreadyExists(path.to_path_buf()),
                _ => StyleWriteError::IoError(path.to_path_buf(), e),
            })?;
        file.write_all(rendered.as_bytes())
            .map_err(|e| StyleWriteError::IoError(path.to_path_buf(), e))?;
    }
    tracing::info!("Wrote Tailwind config to {}", path.display());
    Ok(())
}

#[derive(Debug)]
pub enum StyleWriteError {
    AlreadyExists(PathBuf),
    IoError(PathBuf, std::io::Error),
    Encode(String),
}

impl std::fmt::Display for StyleWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StyleWriteError::AlreadyExists(path) => write!(
                f,
                "'{}' already exists (use --force to overwrite)",
                path.display()
            ),
            StyleWriteError::IoError(path, e) => {
                write!(f, "Failed to write '{}': {}", path.display(), e)
            }
            StyleWriteError::Encode(e) => write!(f, "Failed to encode config: {}", e),
        }
    }
}

impl std::error::Error for StyleWriteError {}
