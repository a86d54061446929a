//! CMS MCP CLI main entry point

use clap::Parser;
use cms_mcp_cli::{
    cli::{Cli, Commands},
    commands::{self, print_config, serve},
    error::CliResult,
    utils::{init_tracing, ColoredOutput},
};
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {}", ColoredOutput::error("Error:"), e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose)?;

    // Disable colored output if requested
    if cli.no_color {
        colored::control::set_override(false);
    }

    info!("CMS MCP v{}", env!("CARGO_PKG_VERSION"));

    let config = commands::load_config(&cli)?;

    match cli.command {
        Commands::Serve { allow_patterns, deny_patterns } => {
            serve::execute(config, allow_patterns, deny_patterns).await.map_err(|e| e.into())
        }

        Commands::PrintConfig { format } => {
            if let Err(e) = config.validate() {
                warn!("configuration is not usable yet: {}", e);
                eprintln!("{} {}", ColoredOutput::warning("Warning:"), e);
            }
            println!("{}", print_config::render(&config, format)?);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cms_mcp_cli::cli::OutputFormat;

    #[test]
    fn test_serve_parsing() {
        let cli = Cli::try_parse_from([
            "cms-mcp",
            "serve",
            "--access-token",
            "tok",
            "--space-id",
            "space-1",
            "--deny",
            "*_asset",
        ])
        .unwrap();

        assert_eq!(cli.access_token.as_deref(), Some("tok"));
        assert_eq!(cli.space_id.as_deref(), Some("space-1"));
        if let Commands::Serve { deny_patterns, allow_patterns } = cli.command {
            assert_eq!(deny_patterns, vec!["*_asset"]);
            assert!(allow_patterns.is_empty());
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn test_print_config_parsing() {
        let cli = Cli::try_parse_from(["cms-mcp", "print-config", "--format", "json"]).unwrap();
        assert!(matches!(cli.command, Commands::PrintConfig { format: OutputFormat::Json }));
    }

    #[test]
    fn test_overrides_apply_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cms.yaml");
        std::fs::write(&path, "cms:\n  access_token: from-file\n  environment_id: staging\n")
            .unwrap();

        let cli = Cli::try_parse_from([
            "cms-mcp",
            "--config",
            path.to_str().unwrap(),
            "--environment-id",
            "production",
            "print-config",
        ])
        .unwrap();
        let config = commands::load_config(&cli).unwrap();

        assert_eq!(config.cms.access_token, "from-file");
        assert_eq!(config.cms.environment_id, "production");
    }
}
