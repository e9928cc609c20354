// SPDX-License-Identifier: AGPL-3.0
// Wanderlust Core - Home Page (destination feed)

use crate::catalog::DestinationCatalog;
use crate::shell::navigation::Route;
use crate::shell::Effect;
use crate::types::{Category, Destination, DestinationId};

pub const HEADER: &str = "Explore the world!";

#[derive(Debug, Clone)]
pub enum HomeMessage {
    SelectCategory(Category),
    SearchChanged(String),
    OpenDestination(DestinationId),
}

pub struct HomePage {
    categories: Vec<Category>,
    selected_category: Category,
    search_query: String,
    featured: Vec<Destination>,
    explore_more: Vec<Destination>,
}

impl HomePage {
    pub fn new(catalog: &dyn DestinationCatalog, default_category: Category) -> Self {
        Self {
            categories: catalog.categories(),
            selected_category: default_category,
            search_query: String::new(),
            featured: catalog.featured(),
            explore_more: catalog.explore_more(),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn selected_category(&self) -> Category {
        self.selected_category
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Featured row after category and search filtering
    pub fn visible_featured(&self) -> Vec<&Destination> {
        self.filter(&self.featured)
    }

    /// "Explore more" list after category and search filtering
    pub fn visible_explore_more(&self) -> Vec<&Destination> {
        self.filter(&self.explore_more)
    }

    fn filter<'a>(&self, destinations: &'a [Destination]) -> Vec<&'a Destination> {
        let query = self.search_query.trim().to_lowercase();
        destinations
            .iter()
            .filter(|d| self.selected_category.matches(d))
            .filter(|d| {
                query.is_empty()
                    || d.title.to_lowercase().contains(&query)
                    || d.location.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn update(&mut self, message: HomeMessage) -> Effect {
        match message {
            HomeMessage::SelectCategory(category) => {
                self.selected_category = category;
                Effect::None
            }
            HomeMessage::SearchChanged(query) => {
                self.search_query = query;
                Effect::None
            }
            HomeMessage::OpenDestination(id) => {
                match self
                    .featured
                    .iter()
                    .chain(&self.explore_more)
                    .find(|d| d.id == id)
                {
                    Some(destination) => {
                        Effect::Navigate(Route::DestinationDetail(destination.clone()))
                    }
                    None => {
                        tracing::warn!("Destination {} is not in the feed", id);
                        Effect::None
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;

    fn titles(destinations: Vec<&Destination>) -> Vec<&str> {
        destinations.iter().map(|d| d.title.as_str()).collect()
    }

    #[test]
    fn test_all_category_shows_everything() {
        let page = HomePage::new(&StaticCatalog::builtin(), Category::All);
        assert_eq!(titles(page.visible_featured()), vec!["Lake Braies", "Santorini"]);
        assert_eq!(titles(page.visible_explore_more()), vec!["Bali", "Soneva Jani"]);
    }

    #[test]
    fn test_category_and_search_filter() {
        let mut page = HomePage::new(&StaticCatalog::builtin(), Category::All);

        page.update(HomeMessage::SelectCategory(Category::Mountain));
        assert_eq!(titles(page.visible_featured()), vec!["Lake Braies"]);
        assert!(page.visible_explore_more().is_empty());

        page.update(HomeMessage::SelectCategory(Category::All));
        page.update(HomeMessage::SearchChanged("indo".into()));
        assert!(page.visible_featured().is_empty());
        assert_eq!(titles(page.visible_explore_more()), vec!["Bali"]);
    }

    #[test]
    fn test_open_destination() {
        let mut page = HomePage::new(&StaticCatalog::builtin(), Category::All);

        match page.update(HomeMessage::OpenDestination("2".into())) {
            Effect::Navigate(Route::DestinationDetail(d)) => assert_eq!(d.title, "Santorini"),
            other => panic!("unexpected effect: {:?}", other),
        }
        assert!(matches!(
            page.update(HomeMessage::OpenDestination("missing".into())),
            Effect::None
        ));
    }
}
