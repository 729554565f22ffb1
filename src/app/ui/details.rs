use eframe::egui::{self, RichText, Ui};

use crate::catalog::AlbumId;
use crate::collage::NavigationTarget;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        let Some(target) = self.navigation.clone() else {
            return;
        };

        if ui.button("← Retour au collage").clicked() {
            self.navigate(None);
            return;
        }
        ui.separator();

        let next = match &target {
            NavigationTarget::Artist { group_id } => self.draw_artist_details(ui, group_id),
            NavigationTarget::Album { group_id, album_id } => {
                self.draw_album_details(ui, group_id, album_id)
            }
        };

        if next.is_some() {
            self.navigate(next);
        }
    }

    fn draw_artist_details(&self, ui: &mut Ui, group_id: &str) -> Option<NavigationTarget> {
        let Some(group) = self.catalog.group(group_id) else {
            ui.label(format!("Artiste introuvable: {group_id}"));
            return None;
        };

        ui.heading(group.display_name());
        if let Some(genre) = &group.genre {
            ui.label(RichText::new(genre).italics());
        }
        ui.small(format!("id: {}", group.id));
        ui.add_space(6.0);

        if let Some(bio) = &group.bio {
            ui.label(bio);
            ui.add_space(6.0);
        }

        ui.separator();
        ui.label(RichText::new(format!("Albums ({})", group.albums.len())).strong());
        if group.albums.is_empty() {
            ui.label("Aucun album.");
            return None;
        }

        let mut next = None;
        egui::ScrollArea::vertical()
            .id_salt("artist_albums")
            .show(ui, |ui| {
                for album in &group.albums {
                    let title = match album.year {
                        Some(year) => format!("{} ({year})", album.title),
                        None => album.title.clone(),
                    };
                    if ui.link(title).clicked() {
                        next = Some(NavigationTarget::Album {
                            group_id: group.id.clone(),
                            album_id: album.id.clone(),
                        });
                    }
                }
            });
        next
    }

    fn draw_album_details(
        &self,
        ui: &mut Ui,
        group_id: &str,
        album_id: &AlbumId,
    ) -> Option<NavigationTarget> {
        let Some((group, album)) = self.catalog.album(group_id, album_id) else {
            ui.label(format!("Album introuvable: {group_id}/{album_id}"));
            return None;
        };

        ui.heading(&album.title);
        if let Some(year) = album.year {
            ui.label(year.to_string());
        }
        ui.small(format!("id: {}", album.id));
        ui.add_space(6.0);

        if !album.alt.is_empty() {
            ui.label(&album.alt);
        }
        if !album.src.is_empty() {
            ui.small(format!("pochette: {}", album.src));
        }

        ui.separator();
        let mut next = None;
        if ui
            .button(format!("Artiste: {}", group.display_name()))
            .clicked()
        {
            next = Some(NavigationTarget::Artist {
                group_id: group.id.clone(),
            });
        }
        next
    }
}
