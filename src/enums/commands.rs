use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Create a sample configuration file
    Init,
    /// Audit a Solidity contract and explain its findings
    Audit {
        /// Path to the contract source file
        contract: String,
    },
    /// Run the HTTP analysis endpoint
    Serve {
        #[clap(short, long)]
        port: Option<u16>,
    },
    /// Check the configuration and environment
    Validate,
}
