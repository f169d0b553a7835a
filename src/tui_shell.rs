use anyhow::Result;

mod app;

mod input;
mod modal;
mod view;

pub(crate) async fn run(opts: crate::tui::TuiRunOptions) -> Result<()> {
    app::run(opts).await
}
