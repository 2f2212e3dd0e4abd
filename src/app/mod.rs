use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};
use tracing::{error, info};

use crate::config::EmbedConfig;
use crate::data::{DataSet, load_dataset};
use crate::state::{Store, ViewState};

mod map;
mod props;
mod render_utils;
mod streamgraph;
mod ui;

use map::{Camera, MapLayout, TransitionClock};

pub struct HeadstartApp {
    config: EmbedConfig,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<DataSet, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    config: EmbedConfig,
    data: DataSet,
    store: Store,
    layout: MapLayout,
    camera: Camera,
    stream_clock: TransitionClock,
}

impl ViewModel {
    fn new(config: EmbedConfig, data: DataSet) -> Self {
        let store = Store::new(ViewState::from_config(&config));
        let layout = MapLayout::new(&data);

        Self {
            config,
            data,
            store,
            layout,
            camera: Camera::default(),
            stream_clock: TransitionClock::default(),
        }
    }

    fn show(&mut self, ctx: &Context) {
        let mut actions = Vec::new();

        egui::TopBottomPanel::top("header")
            .resizable(false)
            .show(ctx, |ui| self.draw_header(ui));

        egui::TopBottomPanel::bottom("footer")
            .resizable(false)
            .show(ctx, |ui| self.draw_footer(ui));

        let list_panel = egui::SidePanel::right("list").resizable(true);
        let list_panel = if self.store.state().list.show {
            list_panel.default_width(420.0)
        } else {
            list_panel.exact_width(180.0)
        };
        list_panel.show(ctx, |ui| self.draw_list(ui, &mut actions));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                if self.store.state().is_streamgraph() {
                    self.draw_streamgraph(ui, &mut actions);
                } else {
                    self.draw_map(ui, &mut actions);
                }
            });

        self.draw_preview(ctx, &mut actions);

        if self.store.state().animation.in_progress() {
            ctx.request_repaint();
        }
        if !actions.is_empty() {
            ctx.request_repaint();
        }
        self.store.dispatch_all(actions);
    }
}

impl HeadstartApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: EmbedConfig) -> Self {
        let state = Self::start_load(config.clone());
        Self { config, state }
    }

    fn spawn_load(config: EmbedConfig) -> Receiver<Result<DataSet, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_dataset(&config).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(config: EmbedConfig) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(config),
        }
    }
}

impl eframe::App for HeadstartApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(data)) => {
                        info!(papers = data.paper_count(), "dataset ready");
                        transition = Some(AppState::Ready(Box::new(ViewModel::new(
                            self.config.clone(),
                            data,
                        ))));
                    }
                    Ok(Err(message)) => {
                        error!(%message, "failed to load dataset");
                        transition = Some(AppState::Error(message));
                    }
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition =
                            Some(AppState::Error("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading visualization...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the visualization data");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.config.clone()));
                    }
                });
            }
            AppState::Ready(model) => model.show(ctx),
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
