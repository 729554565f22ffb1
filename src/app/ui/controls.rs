use eframe::egui::{self, RichText, Ui};

use crate::catalog::{Catalog, SearchHit};
use crate::collage::CollageFilter;

use super::super::ViewModel;
use super::panels::hit_target;

const MAX_SEARCH_ROWS: usize = 40;

fn hit_label(catalog: &Catalog, hit: &SearchHit) -> String {
    match hit {
        SearchHit::Artist { group_id } => catalog
            .group(group_id)
            .map(|group| format!("Artiste · {}", group.display_name()))
            .unwrap_or_else(|| group_id.clone()),
        SearchHit::Album { group_id, album_id } => catalog
            .album(group_id, album_id)
            .map(|(group, album)| format!("Album · {} ({})", album.title, group.display_name()))
            .unwrap_or_else(|| format!("{group_id}/{album_id}")),
    }
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Collage");
        ui.separator();
        ui.add_space(4.0);

        let mut filter = self.filter;
        ui.horizontal_wrapped(|ui| {
            for option in CollageFilter::ALL {
                ui.selectable_value(&mut filter, option, option.label())
                    .on_hover_text("Reconstruit le collage avec ce filtre.");
            }
        });
        self.set_filter(filter);

        ui.add_space(4.0);
        if ui
            .button("Remélanger")
            .on_hover_text("Nouvelle disposition et nouveaux rayons, même catalogue.")
            .clicked()
        {
            self.collage_dirty = true;
        }

        ui.separator();
        ui.checkbox(&mut self.show_labels, "Noms des artistes");
        ui.checkbox(&mut self.show_cluster_anchors, "Centres des groupes")
            .on_hover_text("Affiche le point d'attraction de chaque artiste.");

        ui.separator();
        ui.label("Recherche (artiste ou album)")
            .on_hover_text("Surligne les disques correspondants dans le collage.");
        ui.text_edit_singleline(&mut self.search);

        let hits = self
            .search_results()
            .map(|cache| cache.hits.clone())
            .unwrap_or_default();
        if !hits.is_empty() {
            ui.add_space(4.0);
            ui.small(format!("{} résultat(s)", hits.len()));

            let mut pending = None;
            egui::ScrollArea::vertical()
                .id_salt("search_hits")
                .max_height(260.0)
                .show(ui, |ui| {
                    for hit in hits.iter().take(MAX_SEARCH_ROWS) {
                        if ui.link(hit_label(&self.catalog, hit)).clicked() {
                            pending = Some(hit_target(hit));
                        }
                    }
                });
            if pending.is_some() {
                self.navigate(pending);
            }
        } else if !self.search.trim().is_empty() {
            ui.small("Aucun résultat.");
        }

        ui.separator();
        ui.label(RichText::new("Session").strong());
        ui.small(format!("graine: {}", self.seed));
        ui.small(format!("génération: {}", self.generation));
        if let Some(collage) = &self.collage {
            ui.small(format!("filtre actif: {}", collage.filter().label()));
            let state = if collage.is_running() {
                "en mouvement"
            } else {
                "au repos"
            };
            ui.small(format!("simulation: {state}"));
        }
    }
}
