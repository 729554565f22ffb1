use std::fmt;

use eframe::egui::Vec2;
use rand::Rng;

use crate::catalog::{AlbumId, Catalog};

use super::config::RadiusPolicy;

pub const TITLE_ID: &str = "title";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Title,
    Artist,
    Album,
}

/// Which attraction point pulls on a node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClusterKey {
    Canvas,
    Group(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CollageFilter {
    #[default]
    All,
    Album,
    Artist,
}

impl CollageFilter {
    pub const ALL: [Self; 3] = [Self::All, Self::Album, Self::Artist];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "Tout",
            Self::Album => "Albums",
            Self::Artist => "Artistes",
        }
    }

    fn includes(self, kind: NodeKind) -> bool {
        match (self, kind) {
            (_, NodeKind::Title) | (Self::All, _) => true,
            (Self::Album, NodeKind::Album) | (Self::Artist, NodeKind::Artist) => true,
            _ => false,
        }
    }
}

/// Matches the `--filter` values, not the UI labels.
impl fmt::Display for CollageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Album => "album",
            Self::Artist => "artist",
        })
    }
}

#[derive(Clone, Debug)]
pub struct CollageNode {
    pub id: String,
    pub kind: NodeKind,
    pub cluster: ClusterKey,
    pub group_id: Option<String>,
    pub album_id: Option<AlbumId>,
    pub label: String,
    pub image: String,
    pub position: Vec2,
    pub(in crate::collage) velocity: Vec2,
    /// Current radius; collision and rendering always read this value.
    pub radius: f32,
    pub resting_radius: Option<f32>,
    /// 0.0 renders the image in grayscale, 1.0 in full color.
    pub saturation: f32,
    pub pin: Option<Vec2>,
}

impl CollageNode {
    fn new(id: String, kind: NodeKind, cluster: ClusterKey, radius: f32) -> Self {
        Self {
            id,
            kind,
            cluster,
            group_id: None,
            album_id: None,
            label: String::new(),
            image: String::new(),
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            radius,
            resting_radius: None,
            saturation: if kind == NodeKind::Album { 0.0 } else { 1.0 },
            pin: None,
        }
    }

    #[cfg(test)]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }
}

impl RadiusPolicy {
    pub fn sample(&self, kind: NodeKind, rng: &mut impl Rng) -> f32 {
        let (base, min) = match kind {
            NodeKind::Title => return self.title,
            NodeKind::Artist => (self.base_artist, self.min_artist),
            NodeKind::Album => (self.base_album, self.min_album),
        };

        let delta = if self.max_delta > 0.0 {
            rng.gen_range(-self.max_delta..=self.max_delta)
        } else {
            0.0
        };
        (base + delta).max(min)
    }

    #[cfg(test)]
    pub fn bounds(&self, kind: NodeKind) -> (f32, f32) {
        match kind {
            NodeKind::Title => (self.title, self.title),
            NodeKind::Artist => (self.min_artist, self.base_artist + self.max_delta),
            NodeKind::Album => (self.min_album, self.base_album + self.max_delta),
        }
    }
}

/// Escapes `%` and the `-` separator so distinct id parts never join into the same node id.
fn escape_id_part(part: &str) -> String {
    let mut escaped = String::with_capacity(part.len());
    for ch in part.chars() {
        match ch {
            '%' => escaped.push_str("%25"),
            '-' => escaped.push_str("%2D"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn album_id_part(album_id: &AlbumId) -> String {
    match album_id {
        AlbumId::Number(value) => value.to_string(),
        // `"3"` and `3` may both appear within one group.
        AlbumId::Text(text) if text.parse::<u64>().is_ok_and(|value| value.to_string() == *text) => {
            format!("%23{text}")
        }
        AlbumId::Text(text) => escape_id_part(text),
    }
}

pub fn album_node_id(group_id: &str, album_id: &AlbumId) -> String {
    format!("album-{}-{}", escape_id_part(group_id), album_id_part(album_id))
}

pub fn artist_node_id(group_id: &str) -> String {
    format!("artist-{}", escape_id_part(group_id))
}

/// Builds the node list for one generation: the title first, then artists, then albums.
/// Artists without any album have no artwork and are left out.
pub fn build_nodes(
    catalog: &Catalog,
    filter: CollageFilter,
    policy: &RadiusPolicy,
    center: Vec2,
    rng: &mut impl Rng,
) -> Vec<CollageNode> {
    let mut title = CollageNode::new(
        TITLE_ID.to_string(),
        NodeKind::Title,
        ClusterKey::Canvas,
        policy.title,
    );
    title.label = "ECHOS".to_string();
    title.position = center;
    title.pin = Some(center);
    let mut nodes = vec![title];

    if filter.includes(NodeKind::Artist) {
        for group in &catalog.groups {
            let Some(cover) = group.cover() else {
                continue;
            };

            let mut node = CollageNode::new(
                artist_node_id(&group.id),
                NodeKind::Artist,
                ClusterKey::Group(group.id.clone()),
                policy.sample(NodeKind::Artist, rng),
            );
            node.group_id = Some(group.id.clone());
            node.label = group.display_name().to_string();
            node.image = cover.src.clone();
            nodes.push(node);
        }
    }

    if filter.includes(NodeKind::Album) {
        for group in &catalog.groups {
            for album in &group.albums {
                let mut node = CollageNode::new(
                    album_node_id(&group.id, &album.id),
                    NodeKind::Album,
                    ClusterKey::Group(group.id.clone()),
                    policy.sample(NodeKind::Album, rng),
                );
                node.group_id = Some(group.id.clone());
                node.album_id = Some(album.id.clone());
                node.label = if album.title.is_empty() {
                    album.alt.clone()
                } else {
                    album.title.clone()
                };
                node.image = album.src.clone();
                nodes.push(node);
            }
        }
    }

    nodes
}
