mod app;
mod config;
mod data;
mod events;
mod localization;
mod state;
mod util;

use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use tracing::info;

use config::{EmbedConfig, QueryParams, VisType};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON configuration of the visualization.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Data integration that produced the result set (base, pubmed, ...).
    #[arg(long)]
    service: Option<String>,
    /// Search query the result set was produced for.
    #[arg(long)]
    query: Option<String>,
    /// Data file, relative to the server url when one is given.
    #[arg(long)]
    file: Option<String>,
    /// `timeline` for the streamgraph, anything else for the knowledge map.
    #[arg(long)]
    vis_type: Option<String>,
    #[arg(long)]
    server_url: Option<String>,
}

impl Args {
    fn query_params(&self) -> Option<QueryParams> {
        let given = self.service.is_some()
            || self.query.is_some()
            || self.file.is_some()
            || self.vis_type.is_some()
            || self.server_url.is_some();

        given.then(|| QueryParams {
            service: self.service.clone(),
            query: self.query.clone(),
            file: self.file.clone(),
            vis_type: VisType::parse(self.vis_type.as_deref()),
            server_url: self.server_url.clone(),
        })
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let mut config = EmbedConfig::load(args.config.as_deref())?;
    if let Some(params) = args.query_params() {
        config.apply_query(&params);
    }
    info!(
        title = %config.title,
        streamgraph = config.is_streamgraph,
        files = config.files.len(),
        "starting"
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(app::HeadstartApp::new(cc, config)))),
    )
    .map_err(|error| anyhow!("failed to start the window: {error}"))
}
