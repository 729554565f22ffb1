use std::path::Path;

use eframe::egui::{self, Align, Context, Layout};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::catalog::{Catalog, SearchHit, search};
use crate::collage::{CollageFilter, NavigationTarget, album_node_id, artist_node_id};

use super::super::{SearchCache, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(catalog: Catalog, filter: CollageFilter, seed: u64) -> Self {
        Self {
            catalog,
            filter,
            seed,
            rng: StdRng::seed_from_u64(seed),
            generation: 0,
            collage: None,
            collage_dirty: true,
            hovered: None,
            navigation: None,
            search: String::new(),
            search_cache: None,
            show_cluster_anchors: false,
            show_labels: true,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        catalog_path: &Path,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        let now = ctx.input(|input| input.time);
        if self.collage_dirty {
            self.rebuild_collage(now);
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("ECHOS · Nos Rookies");
                    ui.separator();
                    ui.label(format!("catalogue: {}", catalog_path.display()));
                    ui.label(format!("artistes: {}", self.catalog.groups.len()));
                    ui.label(format!("albums: {}", self.catalog.album_count()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Recharger"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(status) = self.simulation_status_text() {
                            ui.label(status);
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        if self.navigation.is_some() {
            egui::SidePanel::right("details")
                .resizable(true)
                .default_width(340.0)
                .show(ctx, |ui| self.draw_details(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Rechargement du catalogue...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_collage(ui);
            }
        });
    }

    pub(in crate::app) fn set_filter(&mut self, filter: CollageFilter) {
        if self.filter == filter {
            return;
        }
        self.filter = filter;
        self.collage_dirty = true;
    }

    pub(in crate::app) fn navigate(&mut self, target: Option<NavigationTarget>) {
        self.navigation = target;
    }

    fn simulation_status_text(&self) -> Option<String> {
        self.collage.as_ref().map(|collage| {
            format!(
                "génération {} | {} nœuds | alpha {:.3} → {:.3} | {} ticks",
                collage.generation(),
                collage.nodes().len(),
                collage.alpha(),
                collage.alpha_target(),
                collage.ticks()
            )
        })
    }

    /// Search hits for the current query, cached until the query changes.
    pub(in crate::app) fn search_results(&mut self) -> Option<&SearchCache> {
        let query = self.search.trim();
        if query.is_empty() {
            self.search_cache = None;
            return None;
        }

        let stale = self
            .search_cache
            .as_ref()
            .is_none_or(|cached| cached.query != query);
        if stale {
            let hits = search(&self.catalog, query);
            let node_ids = hits
                .iter()
                .map(|hit| match hit {
                    SearchHit::Artist { group_id } => artist_node_id(group_id),
                    SearchHit::Album { group_id, album_id } => album_node_id(group_id, album_id),
                })
                .collect();
            self.search_cache = Some(SearchCache {
                query: query.to_owned(),
                hits,
                node_ids,
            });
        }

        self.search_cache.as_ref()
    }
}

pub(in crate::app) fn hit_target(hit: &SearchHit) -> NavigationTarget {
    match hit {
        SearchHit::Artist { group_id } => NavigationTarget::Artist {
            group_id: group_id.clone(),
        },
        SearchHit::Album { group_id, album_id } => NavigationTarget::Album {
            group_id: group_id.clone(),
            album_id: album_id.clone(),
        },
    }
}
