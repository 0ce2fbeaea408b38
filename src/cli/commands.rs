//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Clever roster client CLI
#[derive(Parser, Debug)]
#[command(name = "clever-roster")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List students
    Students {
        /// Only these student uids (repeatable)
        #[arg(long = "uid")]
        uids: Vec<String>,
    },

    /// List teachers
    Teachers {
        /// Only these teacher uids (repeatable)
        #[arg(long = "uid")]
        uids: Vec<String>,
    },

    /// List courses
    Courses {
        /// Only these course uids (repeatable)
        #[arg(long = "uid")]
        uids: Vec<String>,
    },

    /// List sections
    Sections {
        /// Only these section uids (repeatable)
        #[arg(long = "uid")]
        uids: Vec<String>,
    },

    /// List classrooms (sections with course numbers)
    Classrooms,

    /// List enrollments grouped by role
    Enrollments {
        /// Only these classroom uids (repeatable)
        #[arg(long = "classroom")]
        classrooms: Vec<String>,
    },

    /// Post a grade payload
    SendGrade {
        /// Grade payload as inline JSON
        #[arg(long)]
        body: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Human-readable output
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_students_with_uids() {
        let cli = Cli::parse_from([
            "clever-roster",
            "--config",
            "clever.yaml",
            "students",
            "--uid",
            "s1",
            "--uid",
            "s2",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("clever.yaml")));
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Students { uids } => assert_eq!(uids, vec!["s1", "s2"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_enrollments_and_globals_after_subcommand() {
        let cli = Cli::parse_from([
            "clever-roster",
            "enrollments",
            "--classroom",
            "A",
            "-v",
            "--format",
            "pretty",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Pretty);
        assert!(matches!(cli.command, Commands::Enrollments { ref classrooms } if classrooms == &["A"]));
    }

    #[test]
    fn test_send_grade_requires_body() {
        assert!(Cli::try_parse_from(["clever-roster", "send-grade"]).is_err());
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
