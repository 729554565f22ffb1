use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::model::{AlbumId, Catalog};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchHit {
    Artist { group_id: String },
    Album { group_id: String, album_id: AlbumId },
}

/// Case-insensitive substring filter over artist names and album titles.
/// Hits are ordered by fuzzy score, catalog order breaking ties.
pub fn search(catalog: &Catalog, query: &str) -> Vec<SearchHit> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored = Vec::new();
    for group in &catalog.groups {
        let name = group.display_name();
        if name.to_lowercase().contains(&needle) {
            let score = matcher.fuzzy_match(name, &needle).unwrap_or(0);
            scored.push((
                score,
                SearchHit::Artist {
                    group_id: group.id.clone(),
                },
            ));
        }

        for album in &group.albums {
            if album.title.to_lowercase().contains(&needle) {
                let score = matcher.fuzzy_match(&album.title, &needle).unwrap_or(0);
                scored.push((
                    score,
                    SearchHit::Album {
                        group_id: group.id.clone(),
                        album_id: album.id.clone(),
                    },
                ));
            }
        }
    }

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_score, hit)| hit).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::parse_catalog;

    fn sample() -> Catalog {
        parse_catalog(
            r#"[
                {"id": "nova", "name": "Nova Echo", "albums": [
                    {"id": 1, "title": "Echoes of Dawn"},
                    {"id": 2, "title": "Silent Rooms"}
                ]},
                {"id": "kilo", "name": "Kilo", "albums": [{"id": 1, "title": "Night Shift"}]}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn matches_names_and_titles_case_insensitively() {
        let hits = search(&sample(), "ECHO");
        assert_eq!(hits.len(), 2);
        assert!(hits.contains(&SearchHit::Artist {
            group_id: "nova".into()
        }));
        assert!(hits.contains(&SearchHit::Album {
            group_id: "nova".into(),
            album_id: AlbumId::Number(1)
        }));
    }

    #[test]
    fn blank_query_has_no_hits() {
        assert!(search(&sample(), "   ").is_empty());
    }

    #[test]
    fn substring_is_required() {
        assert_eq!(
            search(&sample(), "shift"),
            vec![SearchHit::Album {
                group_id: "kilo".into(),
                album_id: AlbumId::Number(1)
            }]
        );
        assert!(search(&sample(), "nvc").is_empty());
    }
}
