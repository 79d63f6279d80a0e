//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use ventlink_domain::mode::Mode;

use crate::config::DEFAULT_PATH;

#[derive(Debug, Parser)]
#[command(name = "ventlink", version)]
#[command(about = "Monitor and control a ventilation air unit on the local network.")]
pub struct Cli {
    /// Configuration file
    #[arg(long, short, env = "VENTLINK_CONFIG", default_value = DEFAULT_PATH, global = true)]
    pub config: PathBuf,

    /// Talk to this host instead of the stored or discovered one
    #[arg(long, global = true)]
    pub host: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read every property and print the snapshot
    Fetch,
    /// Set the operating mode (demand, program, manual, off)
    Mode { mode: Mode },
    /// Turn boost on or off
    Boost { state: Toggle },
    /// Turn the bypass on or off
    Bypass { state: Toggle },
    /// Turn night cooling on or off
    NightCooling { state: Toggle },
    /// Set the manual fan step in percent, rounded to the nearest ten
    FanStep {
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        percent: u8,
    },
    /// Store the unit's IP address; an empty value clears it
    SetIp { address: String },
    /// Broadcast a discovery query and print the first unit that answers
    Discover,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    #[must_use]
    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn should_have_consistent_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn should_parse_mode_case_insensitively() {
        let cli = Cli::try_parse_from(["ventlink", "mode", "Manual"]).unwrap();
        assert!(matches!(cli.command, Command::Mode { mode: Mode::Manual }));
    }

    #[test]
    fn should_reject_unavailable_mode() {
        assert!(Cli::try_parse_from(["ventlink", "mode", "n/a"]).is_err());
    }

    #[test]
    fn should_parse_toggles_and_global_host() {
        let cli =
            Cli::try_parse_from(["ventlink", "night-cooling", "on", "--host", "10.0.0.3"]).unwrap();
        assert_eq!(cli.host.as_deref(), Some("10.0.0.3"));
        assert!(matches!(
            cli.command,
            Command::NightCooling { state: Toggle::On }
        ));
    }

    #[test]
    fn should_bound_fan_step() {
        assert!(Cli::try_parse_from(["ventlink", "fan-step", "100"]).is_ok());
        assert!(Cli::try_parse_from(["ventlink", "fan-step", "101"]).is_err());
    }

    #[test]
    fn should_accept_empty_ip_address() {
        let cli = Cli::try_parse_from(["ventlink", "set-ip", ""]).unwrap();
        assert!(matches!(cli.command, Command::SetIp { address } if address.is_empty()));
    }
}
