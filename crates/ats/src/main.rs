//! ATS Candidate Search - Entry Point
//!
//! | Command | Description |
//! |---------|-------------|
//! | `ats search -q "..."` | Rank candidates for a query |
//! | `ats embed -t "..."` | Print the embedding of a text |
//! | `ats worker` | Run embedding workers until Ctrl-C |
//! | `ats config` | Print the effective configuration |

use clap::Parser;

use ats::cli::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
