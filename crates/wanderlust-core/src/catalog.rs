// SPDX-License-Identifier: AGPL-3.0
// Wanderlust Core - Destination catalog
//
// Pages read destinations, categories and onboarding slides through the
// DestinationCatalog trait so the built-in feed can be swapped for a file
// or a remote source.

use crate::types::{AppError, Category, Destination, DestinationId, Slide};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Source of everything the home feed and splash carousel show
pub trait DestinationCatalog: Send + Sync {
    fn categories(&self) -> Vec<Category> {
        Category::ALL.to_vec()
    }

    /// Highlighted destinations shown at the top of the home feed
    fn featured(&self) -> Vec<Destination>;

    /// The "Explore more" list below the featured row
    fn explore_more(&self) -> Vec<Destination>;

    /// Onboarding slides for the splash carousel
    fn slides(&self) -> Vec<Slide>;

    /// Extra photos shown in every destination's gallery
    fn gallery_images(&self) -> Vec<String>;

    /// Gallery for one destination: its own image first, then the shared ones
    fn gallery_for(&self, destination: &Destination) -> Vec<String> {
        let mut images = vec![destination.image.clone()];
        for image in self.gallery_images() {
            if !images.contains(&image) {
                images.push(image);
            }
        }
        images
    }

    /// Look a destination up in either list
    fn find(&self, id: &DestinationId) -> Option<Destination> {
        self.featured()
            .into_iter()
            .chain(self.explore_more())
            .find(|d| &d.id == id)
    }
}

/// Catalog backed by plain values, either built in or loaded from JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticCatalog {
    #[serde(default)]
    pub featured: Vec<Destination>,
    #[serde(default)]
    pub explore_more: Vec<Destination>,
    #[serde(default)]
    pub slides: Vec<Slide>,
    #[serde(default)]
    pub gallery: Vec<String>,
}

impl StaticCatalog {
    /// The feed bundled with the application
    pub fn builtin() -> Self {
        let featured = vec![
            Destination::new(
                "Lake Braies",
                "https://images.unsplash.com/photo-1470114716159-e389f8712fda",
                "Italy",
            )
            .with_id("1")
            .with_rating("4.7")
            .with_category(Category::Mountain),
            Destination::new(
                "Santorini",
                "https://images.unsplash.com/photo-1539367628448-4bc5c9d171c8",
                "Greece",
            )
            .with_id("2")
            .with_rating("4.6")
            .with_category(Category::Beach),
        ];

        let explore_more = vec![
            Destination::new(
                "Bali",
                "https://images.unsplash.com/photo-1519046904884-53103b34b206",
                "Indonesia",
            )
            .with_id("3")
            .with_description(
                "Bali is the only Hindu-majority province in Indonesia, renowned for its \
                 highly developed arts, including traditional and modern dance, sculpture, \
                 painting, leather, metalworking, and music.",
            )
            .with_users(
                vec![
                    "https://randomuser.me/api/portraits/men/1.jpg".to_string(),
                    "https://randomuser.me/api/portraits/women/2.jpg".to_string(),
                    "https://randomuser.me/api/portraits/men/3.jpg".to_string(),
                ],
                12_000,
            )
            .with_category(Category::Beach),
            Destination::new(
                "Soneva Jani",
                "https://images.unsplash.com/photo-1520250497591-112f2f40a3f4",
                "Maldives",
            )
            .with_id("4")
            .with_category(Category::Beach),
        ];

        let slides = vec![
            Slide::new(
                "New Adventures",
                "If you like to travel, then this is for you! Here you can explore the beauty of the world.",
            ),
            Slide::new(
                "Explore Nature",
                "Discover stunning landscapes and breathtaking views that refresh your soul.",
            ),
            Slide::new(
                "Find Your Escape",
                "Travel to unseen places, meet new people, and create unforgettable memories.",
            ),
        ];

        let gallery = vec![
            "https://images.unsplash.com/photo-1566438480900-0609be27a4be".to_string(),
            "https://images.unsplash.com/photo-1507525428034-b723cf961d3e".to_string(),
            "https://images.unsplash.com/photo-1506748686214-e9df14d4d9d0".to_string(),
        ];

        Self {
            featured,
            explore_more,
            slides,
            gallery,
        }
    }

    /// Load a catalog from a JSON file with the same shape
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        tracing::info!("Loading catalog from {:?}", path);

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::FileIo(format!("Failed to read catalog: {}", e)))?;

        let catalog: Self = serde_json::from_str(&content)
            .map_err(|e| AppError::Serialization(format!("Failed to parse catalog: {}", e)))?;

        if let Some(missing) = catalog
            .featured
            .iter()
            .chain(&catalog.explore_more)
            .find(|d| d.id.is_empty())
        {
            return Err(AppError::InvalidConfig(format!(
                "Catalog destination {:?} has no id",
                missing.title
            )));
        }

        Ok(catalog)
    }
}

impl DestinationCatalog for StaticCatalog {
    fn featured(&self) -> Vec<Destination> {
        self.featured.clone()
    }

    fn explore_more(&self) -> Vec<Destination> {
        self.explore_more.clone()
    }

    fn slides(&self) -> Vec<Slide> {
        self.slides.clone()
    }

    fn gallery_images(&self) -> Vec<String> {
        self.gallery.clone()
    }
}
