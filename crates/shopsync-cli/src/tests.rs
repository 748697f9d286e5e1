use super::*;

#[test]
fn parses_sync_command() {
    let cli = Cli::try_parse_from(["shopsync-cli", "sync"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Sync { dry_run: false })
    ));
}

#[test]
fn parses_sync_dry_run() {
    let cli = Cli::try_parse_from(["shopsync-cli", "sync", "--dry-run"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Sync { dry_run: true })));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["shopsync-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn unknown_flag_is_rejected() {
    assert!(Cli::try_parse_from(["shopsync-cli", "sync", "--force"]).is_err());
}
