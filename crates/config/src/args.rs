use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to .env file (e.g., .env.polkadot)
    #[arg(short, long, default_value = ".env")]
    pub env_file: String,

    /// Module (pallet) that owns the storage item, e.g. `System`
    #[arg(required_unless_present = "raw_method")]
    pub module: Option<String>,

    /// Storage item name, e.g. `Number`
    #[arg(required_unless_present = "raw_method")]
    pub item: Option<String>,

    /// Key parameter for map storage items (decimal, hex or SS58)
    pub param: Option<String>,

    /// Invoke a parameterless RPC method instead of a storage query
    #[arg(long, conflicts_with_all = ["module", "item", "param"])]
    pub raw_method: Option<String>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
