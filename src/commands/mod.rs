use clap::ValueEnum;

mod config_cmd;
mod seed;
mod tailwind;
mod user;

pub use config_cmd::ConfigCommand;
pub use seed::{SeedCommand, VerifyCommand};
pub use tailwind::TailwindCommand;
pub use user::UserCommand;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
