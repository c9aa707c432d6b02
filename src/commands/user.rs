use clap::{Args, Subcommand};

use footstats_core::seed::DATABASE;
use footstats_core::{DocumentStore, UserInfo};

use super::OutputFormat;

#[derive(Args)]
pub struct UserCommand {
    #[command(subcommand)]
    pub command: UserSubcommand,
}

#[derive(Subcommand)]
pub enum UserSubcommand {
    /// List users defined on the footstats database
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Show a single user and its roles
    Show {
        /// User name
        name: String,
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl UserCommand {
    pub async fn run<S: DocumentStore>(&self, store: &S) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            UserSubcommand::List { format } => {
                let users = store.list_users(DATABASE).await?;
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&users)?),
                    OutputFormat::Text => print!("{}", format_user_table(&users)),
                }
            }
            UserSubcommand::Show { name, format } => {
                let user = store
                    .find_user(DATABASE, name)
                    .await?
                    .ok_or_else(|| format!("User '{}' not found on '{}'", name, DATABASE))?;
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&user)?),
                    OutputFormat::Text => {
                        println!("User: {}", user.name);
                        println!("Database: {}", user.database);
                        println!("Roles:");
                        for role in &user.roles {
                            println!("  - {}", role);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

fn format_user_table(users: &[UserInfo]) -> String {
    if users.is_empty() {
        return "No users registered.\n".to_string();
    }

    let mut out = format!("{:<24} {:<16} {:<40}\n", "USER", "DATABASE", "ROLES");
    out.push_str(&"-".repeat(80));
    out.push('\n');
    for user in users {
        let roles = user
            .roles
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "{:<24} {:<16} {:<40}\n",
            user.name, user.database, roles
        ));
    }
    out.push_str(&format!("\nTotal: {} user(s)\n", users.len()));
    out
}
