// SPDX-License-Identifier: AGPL-3.0
// Wanderlust Core - Likes Page

use crate::shell::navigation::Route;
use crate::shell::Effect;
use crate::types::{Destination, DestinationId};

pub const HEADER: &str = "Liked Destinations";
pub const EMPTY_TEXT: &str = "No liked destinations yet";

#[derive(Debug, Clone)]
pub enum LikesMessage {
    /// Re-read the like store, sent whenever the tab gains focus
    Refresh,
    Loaded(Vec<Destination>),
    OpenDestination(DestinationId),
}

#[derive(Default)]
pub struct LikesPage {
    destinations: Vec<Destination>,
    loaded: bool,
}

impl LikesPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Empty-state text, once the first load finished with nothing
    pub fn empty_text(&self) -> Option<&'static str> {
        (self.loaded && self.destinations.is_empty()).then_some(EMPTY_TEXT)
    }

    pub fn update(&mut self, message: LikesMessage) -> Effect {
        match message {
            LikesMessage::Refresh => Effect::RefreshLikes,
            LikesMessage::Loaded(destinations) => {
                self.destinations = destinations;
                self.loaded = true;
                Effect::None
            }
            LikesMessage::OpenDestination(id) => {
                match self.destinations.iter().find(|d| d.id == id) {
                    Some(destination) => {
                        Effect::Navigate(Route::DestinationDetail(destination.clone()))
                    }
                    None => Effect::None,
                }
            }
        }
    }
}
