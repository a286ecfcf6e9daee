mod config;

mod errors;

mod init;

mod message {
    pub(crate) mod command;
    pub(crate) mod reply;
}

mod protocol {
    pub(crate) mod parser;
    pub(crate) mod renderer;
}

mod scoreboard {
    pub(crate) mod contest;
    pub(crate) mod ledger;
    pub(crate) mod ranking;
    pub(crate) mod scroll;
}

mod session;

mod verdict;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    init::main().await
}
