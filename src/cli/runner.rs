//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::client::Client;
use crate::config::ClientConfig;
use crate::error::{Error, Result, ResultExt};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        let mut client = Client::from_config(&config)?;
        let start = Instant::now();

        match &self.cli.command {
            Commands::Students { uids } => self.output_all(&client.students(uids).await?)?,
            Commands::Teachers { uids } => self.output_all(&client.teachers(uids).await?)?,
            Commands::Courses { uids } => self.output_all(&client.courses(uids).await?)?,
            Commands::Sections { uids } => self.output_all(&client.sections(uids).await?)?,
            Commands::Classrooms => self.output_all(&client.classrooms(&[]).await?)?,
            Commands::Enrollments { classrooms } => {
                let enrollments = client.enrollments(classrooms).await?;
                self.output(&enrollments)?;
            }
            Commands::SendGrade { body } => {
                let payload: Value =
                    serde_json::from_str(body).context("--body is not valid JSON")?;
                let response = client.send_grade(&payload).await?;
                self.output(&json!({
                    "status": response.status,
                    "success": response.success,
                    "body": response.body,
                    "raw_body": response.raw_body,
                }))?;
            }
        }

        info!(elapsed_ms = start.elapsed().as_millis() as u64, "Done");
        Ok(())
    }

    fn load_config(&self) -> Result<ClientConfig> {
        let path = self
            .cli
            .config
            .as_ref()
            .ok_or_else(|| Error::config("no config file given (use --config <file>)"))?;
        ClientConfig::from_file(path).with_context(|| format!("loading {}", path.display()))
    }

    fn output_all<T: Serialize>(&self, records: &[T]) -> Result<()> {
        for record in records {
            self.output(record)?;
        }
        Ok(())
    }

    fn output<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let line = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{line}");
        Ok(())
    }
}
