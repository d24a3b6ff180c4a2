//! Gallery entities
//!
//! The page hands over its portfolio entries as JSON. Only entries with card
//! imagery become buttons, ordered by title; that order fixes each button's
//! particle index for the life of the gallery.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::consts::PORTFOLIO_ROUTE;

/// One portfolio entry shown as a button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryEntity {
    /// Stable identifier
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub card_image_urls: Vec<String>,
    /// Explicit navigation target (defaults to the portfolio page)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl GalleryEntity {
    pub fn new(slug: impl Into<String>, title: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            card_image_urls: vec![image_url.into()],
            href: None,
        }
    }

    /// Button face image
    pub fn image_url(&self) -> Option<&str> {
        self.card_image_urls
            .iter()
            .map(String::as_str)
            .find(|url| !url.is_empty())
    }

    pub fn has_image(&self) -> bool {
        self.image_url().is_some()
    }

    /// Where a click on this button goes
    pub fn target(&self) -> String {
        match &self.href {
            Some(href) => href.clone(),
            None => format!("{}/{}", PORTFOLIO_ROUTE, self.slug),
        }
    }
}

/// Keep entries with imagery, sorted by title (case-insensitive)
pub fn renderable(entities: Vec<GalleryEntity>) -> Vec<GalleryEntity> {
    let mut entities: Vec<_> = entities.into_iter().filter(GalleryEntity::has_image).collect();
    entities.sort_by(|a, b| compare_titles(&a.title, &b.title));
    entities
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Parse the page's entity list and keep the renderable entries
pub fn parse_catalog(json: &str) -> serde_json::Result<Vec<GalleryEntity>> {
    let entities: Vec<GalleryEntity> = serde_json::from_str(json)?;
    Ok(renderable(entities))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_defaults_to_portfolio_route() {
        let entity = GalleryEntity::new("bitcoin-writer", "Bitcoin Writer", "/img/bw.png");
        assert_eq!(entity.target(), "/portfolio/bitcoin-writer");

        let linked = GalleryEntity {
            href: Some("https://example.com".to_string()),
            ..entity
        };
        assert_eq!(linked.target(), "https://example.com");
    }

    #[test]
    fn test_renderable_filters_and_sorts() {
        let entities = vec![
            GalleryEntity::new("zeta", "zeta", "/z.png"),
            GalleryEntity {
                card_image_urls: Vec::new(),
                ..GalleryEntity::new("none", "Alpha", "")
            },
            GalleryEntity::new("beta", "Beta", "/b.png"),
            GalleryEntity::new("blank", "Blank", ""),
            GalleryEntity::new("alpha", "alpha", "/a.png"),
        ];

        let slugs: Vec<_> = renderable(entities).into_iter().map(|e| e.slug).collect();
        assert_eq!(slugs, vec!["alpha", "beta", "zeta"]);
    }

    #[test]
    fn test_parse_catalog_camel_case() {
        let json = r#"[
            {"slug": "b", "title": "Bravo", "cardImageUrls": ["/b.png"]},
            {"slug": "a", "title": "Alpha", "cardImageUrls": ["/a.png"], "href": "/x"},
            {"slug": "c", "title": "Charlie"}
        ]"#;

        let entities = parse_catalog(json).unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].slug, "a");
        assert_eq!(entities[0].target(), "/x");
        assert_eq!(entities[1].image_url(), Some("/b.png"));
    }

    #[test]
    fn test_parse_catalog_rejects_bad_json() {
        assert!(parse_catalog("{not json").is_err());
    }
}
