use clap::Args;

use footstats_core::{
    run_seed, verify_seed, DocumentStore, PrincipalOutcome, PrincipalPolicy, SeedOptions,
    SeedPlan, SeedReport, VerifyReport,
};

use super::OutputFormat;

/// Provision the footstats database, user and reference collections
#[derive(Args)]
pub struct SeedCommand {
    /// Leave an existing user untouched instead of failing
    #[arg(long)]
    skip_existing_user: bool,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl SeedCommand {
    pub async fn run<S: DocumentStore>(&self, store: &S) -> Result<(), Box<dyn std::error::Error>> {
        let plan = SeedPlan::footstats();
        let options = SeedOptions {
            principal_policy: if self.skip_existing_user {
                PrincipalPolicy::CreateIfAbsent
            } else {
                PrincipalPolicy::Create
            },
        };

        let report = run_seed(store, &plan, options).await?;
        print!("{}", format_seed_report(&report, &plan, &self.format)?);
        Ok(())
    }
}

fn format_seed_report(
    report: &SeedReport,
    plan: &SeedPlan,
    format: &OutputFormat,
) -> Result<String, serde_json::Error> {
    if let OutputFormat::Json = format {
        return Ok(format!("{}\n", serde_json::to_string_pretty(report)?));
    }

    let roles = plan
        .principal
        .roles
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let user_line = match report.principal_outcome {
        PrincipalOutcome::Created => format!("✓ Created user '{}' ({})", report.principal, roles),
        PrincipalOutcome::AlreadyPresent => {
            format!("✓ User '{}' already exists, left unchanged", report.principal)
        }
    };

    Ok(format!(
        "✓ Database: {}\n{}\n✓ Reset collection '{}' with {} document(s)\n",
        report.database,
        user_line,
        report.collection,
        report.inserted_ids.len()
    ))
}

/// Check that a previous seed left the expected state
#[derive(Args)]
pub struct VerifyCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl VerifyCommand {
    pub async fn run<S: DocumentStore>(&self, store: &S) -> Result<(), Box<dyn std::error::Error>> {
        let plan = SeedPlan::footstats();
        let report = verify_seed(store, &plan).await?;

        print!("{}", format_verify_report(&report, &plan, &self.format)?);

        if report.is_ok() {
            Ok(())
        } else {
            Err("seed verification failed".into())
        }
    }
}

fn format_verify_report(
    report: &VerifyReport,
    plan: &SeedPlan,
    format: &OutputFormat,
) -> Result<String, serde_json::Error> {
    if let OutputFormat::Json = format {
        return Ok(format!("{}\n", serde_json::to_string_pretty(report)?));
    }

    let mark = |ok: bool| if ok { "✓" } else { "✗" };
    let contents_ok =
        report.missing.is_empty() && report.unexpected.is_empty() && report.duplicates.is_empty();
    let mut out = String::new();
    out.push_str(&format!(
        "{} User '{}' present\n",
        mark(report.principal_present),
        plan.principal.name
    ));
    out.push_str(&format!(
        "{} User has roles\n",
        mark(report.principal_roles_ok)
    ));
    out.push_str(&format!(
        "{} Collection '{}' holds {} document(s)\n",
        mark(contents_ok),
        plan.collection,
        report.document_count
    ));
    if !report.missing.is_empty() {
        out.push_str(&format!("  missing: {}\n", report.missing.join(", ")));
    }
    if !report.unexpected.is_empty() {
        out.push_str(&format!("  unexpected: {}\n", report.unexpected.join(", ")));
    }
    if !report.duplicates.is_empty() {
        out.push_str(&format!("  duplicated: {}\n", report.duplicates.join(", ")));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use footstats_core::MemoryStore;

    #[tokio::test]
    async fn test_seed_report_text() {
        let store = MemoryStore::new();
        let plan = SeedPlan::footstats();
        let report = run_seed(&store, &plan, SeedOptions::default()).await.unwrap();

        let text = format_seed_report(&report, &plan, &OutputFormat::Text).unwrap();
        assert!(text.contains("✓ Database: footstats"));
        assert!(text.contains("Created user 'vr3n' (dbOwner@footstats)"));
        assert!(text.contains("'continents' with 7 document(s)"));
        assert!(!text.contains("footyxg"));
    }

    #[tokio::test]
    async fn test_seed_report_json() {
        let store = MemoryStore::new();
        let plan = SeedPlan::footstats();
        let report = run_seed(&store, &plan, SeedOptions::default()).await.unwrap();

        let json = format_seed_report(&report, &plan, &OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["principal_outcome"], "created");
        assert_eq!(value["inserted_ids"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_seed_command_skip_existing_user() {
        let store = MemoryStore::new();
        let cmd = SeedCommand {
            skip_existing_user: true,
            format: OutputFormat::Text,
        };
        cmd.run(&store).await.unwrap();
        cmd.run(&store).await.unwrap();

        let strict = SeedCommand {
            skip_existing_user: false,
            format: OutputFormat::Text,
        };
        let err = strict.run(&store).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_verify_command_fails_on_empty_store() {
        let store = MemoryStore::new();
        let cmd = VerifyCommand {
            format: OutputFormat::Text,
        };
        assert!(cmd.run(&store).await.is_err());

        let report = verify_seed(&store, &SeedPlan::footstats()).await.unwrap();
        let text =
            format_verify_report(&report, &SeedPlan::footstats(), &OutputFormat::Text).unwrap();
        assert!(text.contains("✗ User 'vr3n' present"));
        assert!(text.contains("missing: Asia, Europe"));
    }
}
