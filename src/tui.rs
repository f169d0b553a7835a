use anyhow::Result;

use crate::config::Config;

#[derive(Clone, Debug, Default)]
pub struct TuiRunOptions {
    pub config: Config,
}

pub async fn run(opts: TuiRunOptions) -> Result<()> {
    crate::tui_shell::run(opts).await
}
