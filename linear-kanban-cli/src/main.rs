use std::process;
use std::sync::Arc;

use clap::CommandFactory;
use is_terminal::IsTerminal;
use linear_kanban::config::Config;
use linear_kanban_cli::cli::{Cli, Commands};
use linear_kanban_cli::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};
use linear_kanban_cli::{doctor, logging, test_milestone};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    let stdin_is_piped = !std::io::stdin().is_terminal();

    // Launched by an MCP client with no arguments: serve
    let command = match cli.command {
        Some(command) => command,
        None if stdin_is_piped => Commands::Serve,
        None => {
            if let Err(e) = Cli::command().print_help() {
                eprintln!("Failed to print help: {e}");
                process::exit(EXIT_ERROR);
            }
            process::exit(EXIT_SUCCESS);
        }
    };

    let is_mcp_mode = matches!(command, Commands::Serve) && stdin_is_piped;
    let config = Config::new();
    logging::init(
        is_mcp_mode,
        logging::log_level(cli.quiet, cli.debug, cli.verbose),
        &config.log_file,
    );

    let exit_code = match command {
        Commands::Serve => {
            tracing::info!("Starting MCP server");
            run_server(&config).await
        }
        Commands::Doctor => {
            tracing::info!("Running diagnostics");
            run_doctor(&config).await
        }
        Commands::TestMilestone { project } => {
            tracing::info!("Creating test milestone in project matching '{project}'");
            test_milestone::run(&config, &project).await
        }
    };

    process::exit(exit_code);
}

async fn run_server(config: &Config) -> i32 {
    use linear_kanban::linear::GraphqlLinearClient;
    use linear_kanban::mcp::McpServer;
    use rmcp::serve_server;
    use rmcp::transport::io::stdio;
    use tokio_util::sync::CancellationToken;

    let client = match GraphqlLinearClient::from_config(config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to create Linear client: {}", e);
            return EXIT_ERROR;
        }
    };
    let server = McpServer::new(Arc::new(client));

    let ct = CancellationToken::new();
    let ct_clone = ct.clone();

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Shutdown signal received"),
            Err(e) => tracing::warn!("Failed to listen for ctrl+c: {}", e),
        }
        ct_clone.cancel();
    });

    let running = match serve_server(server, stdio()).await {
        Ok(running) => running,
        Err(e) => {
            tracing::error!("MCP server error: {}", e);
            return EXIT_WARNING;
        }
    };
    tracing::info!("MCP server started successfully");

    tokio::select! {
        quit = running.waiting() => match quit {
            Ok(reason) => {
                tracing::info!("MCP server exited: {:?}", reason);
                EXIT_SUCCESS
            }
            Err(e) => {
                tracing::error!("MCP server task failed: {}", e);
                EXIT_WARNING
            }
        },
        _ = ct.cancelled() => {
            tracing::info!("MCP server cancelled");
            EXIT_SUCCESS
        }
    }
}

async fn run_doctor(config: &Config) -> i32 {
    let mut doctor = doctor::Doctor::new();
    match doctor.run_diagnostics(config).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            tracing::error!("Doctor error: {}", e);
            EXIT_ERROR
        }
    }
}
