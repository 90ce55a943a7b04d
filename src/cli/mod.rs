pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "brook")]
#[command(about = "Read your unread Feedbin entries in the terminal", long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check credentials with the service and store them
    Authenticate {
        /// Account email
        email: String,
        /// Account password
        password: String,
    },
    /// Show unread, starred and subscription counts
    Stats,
    /// Browse unread entries and mark them read
    Unread,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_parse_authenticate() {
        let cli =
            Cli::try_parse_from(["brook", "authenticate", "me@example.com", "secret"]).unwrap();
        match cli.command {
            Commands::Authenticate { email, password } => {
                assert_eq!(email, "me@example.com");
                assert_eq!(password, "secret");
            }
            _ => panic!("expected authenticate"),
        }
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["brook", "unread", "--config", "/tmp/brook.toml"]).unwrap();
        assert!(matches!(cli.command, Commands::Unread));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/brook.toml")));
    }

    #[test]
    fn test_authenticate_needs_password() {
        assert!(Cli::try_parse_from(["brook", "authenticate", "me@example.com"]).is_err());
    }

    #[test]
    fn test_command_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
