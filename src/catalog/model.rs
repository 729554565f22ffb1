use std::fmt;

use serde::Deserialize;

/// Album identifiers are numbers in the bundled catalog but strings are accepted too.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum AlbumId {
    Number(u64),
    Text(String),
}

impl fmt::Display for AlbumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: Option<u32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub genre: Option<String>,
    pub bio: Option<String>,
    pub albums: Vec<Album>,
}

impl Group {
    pub fn cover(&self) -> Option<&Album> {
        self.albums.first()
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    pub groups: Vec<Group>,
}

impl Catalog {
    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == id)
    }

    pub fn album(&self, group_id: &str, album_id: &AlbumId) -> Option<(&Group, &Album)> {
        let group = self.group(group_id)?;
        group
            .albums
            .iter()
            .find(|album| &album.id == album_id)
            .map(|album| (group, album))
    }

    pub fn album_count(&self) -> usize {
        self.groups.iter().map(|group| group.albums.len()).sum()
    }
}
