use clap::{Args, Parser, Subcommand};
use std::time::Duration;
use zcash_rpc::{defaults, RpcConfig};

mod commands;

/// Zcash node command-line client.
#[derive(Parser)]
#[command(name = "zcash-rpc-cli")]
#[command(about = "Query a zcashd node and send transactions over JSON-RPC")]
#[command(version)]
struct Cli {
    /// Node RPC URL.
    #[arg(long, default_value = defaults::RPC_URL)]
    rpc_url: String,

    /// RPC username (rpcuser in zcash.conf).
    #[arg(long, default_value = defaults::RPC_USER)]
    rpc_user: String,

    /// RPC password (rpcpassword in zcash.conf).
    #[arg(long, default_value = defaults::RPC_PASSWORD)]
    rpc_password: String,

    /// Request timeout in seconds. No timeout if unset.
    #[arg(long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show blockchain info.
    Info,

    /// Show wallet balance.
    Balance,

    /// Send ZEC to an address.
    Send {
        /// Source address.
        #[arg(long)]
        from: String,

        /// Destination address.
        #[arg(long)]
        to: String,

        /// Amount in ZEC (e.g., 0.1).
        #[arg(long)]
        amount: f64,
    },

    /// Show info and balance, then send. This is the default command.
    Run(RunArgs),
}

#[derive(Args, Debug, Clone, PartialEq)]
struct RunArgs {
    /// Source address.
    #[arg(long, default_value = "fromAddress")]
    from: String,

    /// Destination address.
    #[arg(long, default_value = "toAddress")]
    to: String,

    /// Amount in ZEC.
    #[arg(long, default_value_t = 0.1)]
    amount: f64,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            from: "fromAddress".to_string(),
            to: "toAddress".to_string(),
            amount: 0.1,
        }
    }
}

/// Application context shared across commands.
struct AppContext {
    config: RpcConfig,
}

impl AppContext {
    fn from_cli(cli: &Cli) -> Self {
        Self {
            config: RpcConfig {
                url: cli.rpc_url.clone(),
                username: cli.rpc_user.clone(),
                password: cli.rpc_password.clone(),
                timeout: cli.timeout.map(Duration::from_secs),
            },
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let ctx = AppContext::from_cli(&cli);

    let result = match cli.command.unwrap_or_else(|| Commands::Run(RunArgs::default())) {
        Commands::Info => commands::show_info(&ctx),
        Commands::Balance => commands::show_balance(&ctx),
        Commands::Send { from, to, amount } => commands::send(&ctx, &from, &to, amount),
        Commands::Run(args) => commands::run(&ctx, &args.from, &args.to, args.amount),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
