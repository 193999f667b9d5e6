//! HFA CLI - height-for-age growth screening from the command line.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "hfa",
    version,
    about = "Height-for-age growth screening toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: hfa_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("hfa {}", env!("CARGO_PKG_VERSION"));
    hfa_cmd::run(cli.command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_summary() {
        let cli = Cli::try_parse_from(["hfa", "summary", "--log", "log.csv", "--json"]).unwrap();
        assert!(matches!(cli.command, hfa_cmd::Command::Summary { json: true, .. }));
    }

    #[test]
    fn parses_assess_with_preset() {
        let cli = Cli::try_parse_from([
            "hfa", "assess", "--name", "Ana", "--class", "3A", "-b", "2016-06-01", "-s", "female",
            "--height", "110", "--weight", "19.5", "--boys-table", "boys.csv", "--girls-table",
            "girls.csv", "--preset", "severity",
        ])
        .unwrap();
        match cli.command {
            hfa_cmd::Command::Assess(args) => {
                assert_eq!(args.preset, hfa_cmd::settings::PresetArg::Severity);
                assert_eq!(args.height, 110.0);
                assert!(args.as_of.is_none());
            }
            _ => panic!("expected assess"),
        }
    }

    #[test]
    fn rejects_unknown_preset() {
        assert!(Cli::try_parse_from(["hfa", "bands", "--preset", "who"]).is_err());
    }
}
