mod cli;

use clap::Parser;
use cli::{
    commitment, handle_config, handle_deploy, init_logging, is_authorized, is_used, keygen,
    load_config, set_signer, show_address, show_events, show_owner, sign, verify, Cli, Commands,
};
use secretlock_node::LoggingConfig;
use secretlock_types::LockResult;

#[tokio::main]
async fn main() -> LockResult<()> {
    let cli = Cli::parse();

    // A broken config file must not prevent `config validate` from reporting it.
    let logging = load_config(&cli)
        .map(|c| c.logging)
        .unwrap_or_else(|_| LoggingConfig::default());
    init_logging(&cli, &logging)?;

    match &cli.command {
        Commands::Deploy { force, no_wait } => {
            handle_deploy(&cli, &load_config(&cli)?, *force, *no_wait).await?;
        }
        Commands::Address => show_address(&cli)?,
        Commands::Keygen => keygen(cli.format)?,
        Commands::Owner => show_owner(&load_config(&cli)?, cli.format)?,
        Commands::AddSigner { signer } => {
            set_signer(&cli, &load_config(&cli)?, signer, true)?;
        }
        Commands::RemoveSigner { signer } => {
            set_signer(&cli, &load_config(&cli)?, signer, false)?;
        }
        Commands::IsAuthorized { signer } => {
            is_authorized(&load_config(&cli)?, signer, cli.format)?;
        }
        Commands::IsUsed { commitment } => is_used(&load_config(&cli)?, commitment, cli.format)?,
        Commands::Verify {
            commitment,
            signature,
            signer,
        } => verify(&cli, &load_config(&cli)?, commitment, signature, signer)?,
        Commands::Sign { commitment, recipient } => sign(&cli, commitment, recipient)?,
        Commands::Commitment { content } => commitment(content, cli.format)?,
        Commands::Events { limit } => show_events(&load_config(&cli)?, *limit, cli.format)?,
        Commands::Config { action } => handle_config(&cli, *action)?,
    }

    Ok(())
}
