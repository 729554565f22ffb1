use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};
use rand::rngs::StdRng;
use tracing::{error, info};

use crate::catalog::{Catalog, SearchHit, load_catalog};
use crate::collage::{Collage, CollageFilter, NavigationTarget, NodeHandle};

mod graph;
mod render_utils;
mod ui;

/// Startup options resolved from the command line.
pub struct LaunchSettings {
    pub catalog_path: PathBuf,
    pub filter: CollageFilter,
    pub seed: u64,
}

pub struct EchosApp {
    settings: LaunchSettings,
    state: AppState,
    reload_rx: Option<Receiver<Result<Catalog, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Catalog, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    catalog: Catalog,
    filter: CollageFilter,
    seed: u64,
    rng: StdRng,
    generation: u64,
    collage: Option<Collage>,
    collage_dirty: bool,
    hovered: Option<NodeHandle>,
    navigation: Option<NavigationTarget>,
    search: String,
    search_cache: Option<SearchCache>,
    show_cluster_anchors: bool,
    show_labels: bool,
}

struct SearchCache {
    query: String,
    hits: Vec<SearchHit>,
    node_ids: Vec<String>,
}

impl EchosApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: LaunchSettings) -> Self {
        let state = Self::start_load(settings.catalog_path.clone());
        Self {
            settings,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(catalog_path: PathBuf) -> Receiver<Result<Catalog, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_catalog(&catalog_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(catalog_path: PathBuf) -> AppState {
        info!(path = %catalog_path.display(), "loading catalog");
        AppState::Loading {
            rx: Self::spawn_load(catalog_path),
        }
    }

    fn ready(&self, catalog: Catalog) -> AppState {
        AppState::Ready(Box::new(ViewModel::new(
            catalog,
            self.settings.filter,
            self.settings.seed,
        )))
    }

    fn failed(error: String) -> AppState {
        error!(%error, "catalog load failed");
        AppState::Error(error)
    }
}

impl eframe::App for EchosApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;
        let mut retry = false;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(result);
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Chargement du catalogue ECHOS...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Impossible de charger le catalogue");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    retry = ui.button("Réessayer").clicked();
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(
                    ctx,
                    &self.settings.catalog_path,
                    &mut reload_requested,
                    is_reloading,
                );

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.settings.catalog_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => transition = Some(result),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(Err("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if retry {
            self.state = Self::start_load(self.settings.catalog_path.clone());
            return;
        }

        if let Some(result) = transition {
            self.reload_rx = None;
            self.state = match result {
                Ok(catalog) => self.ready(catalog),
                Err(error) => Self::failed(error),
            };
        }
    }
}
