use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "carbonscope",
    version,
    about = "Energy and carbon footprint estimator for generative-AI usage logs"
)]
pub struct Cli {
    /// Region factors document (TOML, keyed by region name)
    #[arg(long, default_value = "config/regions.toml", global = true)]
    pub regions: PathBuf,

    /// Hardware/profile factors document (TOML, keyed by profile name)
    #[arg(long, default_value = "config/profiles.toml", global = true)]
    pub profiles: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Estimate energy and carbon for a usage document
    Estimate {
        /// Path to the usage document (JSON)
        usage: PathBuf,

        /// Region to cost the usage against
        #[arg(short, long)]
        region: String,

        /// Restrict output to a single day (YYYY-MM-DD)
        #[arg(long, conflicts_with_all = ["start", "end"])]
        day: Option<NaiveDate>,

        /// Inclusive start of a date-range filter
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Inclusive end of a date-range filter
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Print the raw Summary as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP service (default)
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the loaded configuration
    Show,

    /// Validate the configuration documents
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to Serve if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve {
            host: "127.0.0.1".to_string(),
            port: 8080,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_serve() {
        let cli = Cli {
            regions: PathBuf::from("config/regions.toml"),
            profiles: PathBuf::from("config/profiles.toml"),
            command: None,
        };

        match cli.get_command() {
            Commands::Serve { host, port } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, 8080);
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parsing_estimate() {
        let args = vec![
            "carbonscope",
            "estimate",
            "usage.json",
            "--region",
            "eu-west",
            "--day",
            "2025-08-12",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.get_command() {
            Commands::Estimate { region, day, json, .. } => {
                assert_eq!(region, "eu-west");
                assert_eq!(day, Some("2025-08-12".parse().unwrap()));
                assert!(!json);
            }
            _ => panic!("Expected Estimate command"),
        }
    }

    #[test]
    fn test_cli_day_conflicts_with_range() {
        let args = vec![
            "carbonscope",
            "estimate",
            "usage.json",
            "--region",
            "eu-west",
            "--day",
            "2025-08-12",
            "--start",
            "2025-08-01",
        ];

        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_parsing_serve_with_port() {
        let args = vec!["carbonscope", "serve", "--port", "9090"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.get_command() {
            Commands::Serve { port, .. } => assert_eq!(port, 9090),
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parsing_config_validate() {
        let args = vec!["carbonscope", "config", "validate"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.get_command() {
            Commands::Config { action } => {
                assert!(matches!(action, ConfigCommands::Validate));
            }
            _ => panic!("Expected Config command"),
        }
    }
}
