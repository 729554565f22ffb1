use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::model::{Album, Catalog, Group};

#[derive(Clone, Debug, Deserialize)]
struct RawGroup {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    genre: Option<String>,
    #[serde(default)]
    bio: Option<String>,
    #[serde(default)]
    albums: Vec<Value>,
}

pub fn parse_catalog(raw: &str) -> Result<Catalog> {
    let parsed: Value = serde_json::from_str(raw).context("invalid catalog JSON")?;

    let entries = match &parsed {
        Value::Array(entries) => entries,
        Value::Object(object) => object
            .get("groups")
            .or_else(|| object.get("artists"))
            .and_then(Value::as_array)
            .ok_or_else(|| anyhow!("catalog object has no `groups` or `artists` array"))?,
        _ => return Err(anyhow!("unexpected JSON type for catalog")),
    };

    let mut groups = Vec::with_capacity(entries.len());
    for (position, value) in entries.iter().enumerate() {
        let raw_group = match RawGroup::deserialize(value) {
            Ok(raw_group) => raw_group,
            Err(error) => {
                warn!(position, %error, "skipping malformed group entry");
                continue;
            }
        };

        let id = raw_group.id.trim().to_string();
        if id.is_empty() {
            warn!(position, "skipping group without id");
            continue;
        }
        if groups.iter().any(|group: &Group| group.id == id) {
            warn!(group = %id, "skipping duplicate group id");
            continue;
        }

        let mut albums: Vec<Album> = Vec::with_capacity(raw_group.albums.len());
        for album_value in &raw_group.albums {
            match Album::deserialize(album_value) {
                Ok(album) if albums.iter().any(|known| known.id == album.id) => {
                    warn!(group = %id, album = %album.id, "skipping duplicate album id");
                }
                Ok(album) => albums.push(album),
                Err(error) => warn!(group = %id, %error, "skipping malformed album entry"),
            }
        }

        groups.push(Group {
            id,
            name: raw_group.name,
            genre: raw_group.genre,
            bio: raw_group.bio,
            albums,
        });
    }

    Ok(Catalog { groups })
}
