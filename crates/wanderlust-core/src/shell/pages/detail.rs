// SPDX-License-Identifier: AGPL-3.0
// Wanderlust Core - Destination Detail Page
//
// Like toggling is a request/response pair: ToggleLike asks the shell to
// write to the like store, LikeResolved carries the confirmed state back.
// The displayed state only changes when the outcome arrives.

use crate::likes::LikeOutcome;
use crate::shell::Effect;
use crate::types::Destination;

const DEFAULT_PRICE: &str = "$120.50";
const DEFAULT_RATING: &str = "4.7";

/// Info tabs below the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoTab {
    Description,
    Review,
}

impl InfoTab {
    pub const ALL: [InfoTab; 2] = [InfoTab::Description, InfoTab::Review];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Description => "Description",
            Self::Review => "Review",
        }
    }
}

#[derive(Debug, Clone)]
pub enum DetailMessage {
    LikeStatusLoaded(bool),
    SelectImage(usize),
    SelectTab(InfoTab),
    ToggleLike,
    LikeResolved(LikeOutcome),
    BookNow,
    ReadMore,
    Back,
}

pub struct DetailPage {
    destination: Destination,
    gallery: Vec<String>,
    current_image: usize,
    selected_tab: InfoTab,
    liked: bool,
    like_pending: bool,
    notice: Option<String>,
}

impl DetailPage {
    pub fn new(destination: Destination, gallery: Vec<String>) -> Self {
        let gallery = if gallery.is_empty() {
            vec![destination.image.clone()]
        } else {
            gallery
        };

        Self {
            destination,
            gallery,
            current_image: 0,
            selected_tab: InfoTab::Description,
            liked: false,
            like_pending: false,
            notice: None,
        }
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn gallery(&self) -> &[String] {
        &self.gallery
    }

    pub fn current_image(&self) -> &str {
        &self.gallery[self.current_image]
    }

    pub fn selected_tab(&self) -> InfoTab {
        self.selected_tab
    }

    pub fn is_liked(&self) -> bool {
        self.liked
    }

    pub fn is_like_pending(&self) -> bool {
        self.like_pending
    }

    /// Last message worth showing to the user, e.g. a failed save
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn like_icon(&self) -> &'static str {
        if self.liked {
            "heart"
        } else {
            "heart-outline"
        }
    }

    pub fn price_label(&self) -> String {
        format!(
            "{}/person",
            self.destination.price.as_deref().unwrap_or(DEFAULT_PRICE)
        )
    }

    pub fn rating_label(&self) -> &str {
        self.destination.rating.as_deref().unwrap_or(DEFAULT_RATING)
    }

    /// "+12K" style counter, only when avatars are shown
    pub fn user_count_label(&self) -> Option<String> {
        self.destination.users.as_ref()?;
        self.destination.user_count.map(|count| count.to_string())
    }

    pub fn update(&mut self, message: DetailMessage) -> Effect {
        match message {
            DetailMessage::LikeStatusLoaded(liked) => {
                if !self.like_pending {
                    self.liked = liked;
                }
                Effect::None
            }
            DetailMessage::SelectImage(index) => {
                if index < self.gallery.len() {
                    self.current_image = index;
                }
                Effect::None
            }
            DetailMessage::SelectTab(tab) => {
                self.selected_tab = tab;
                Effect::None
            }
            DetailMessage::ToggleLike => {
                if self.like_pending {
                    tracing::debug!("Like toggle already in flight for {}", self.destination.id);
                    return Effect::None;
                }
                self.like_pending = true;
                self.notice = None;
                Effect::ToggleLike {
                    destination: self.destination.clone(),
                    currently_liked: self.liked,
                }
            }
            DetailMessage::LikeResolved(outcome) => {
                if outcome.id() != &self.destination.id {
                    return Effect::None;
                }
                self.like_pending = false;
                self.liked = outcome.liked();
                if let LikeOutcome::Failed { error, .. } = &outcome {
                    tracing::warn!("Like change for {} not saved: {}", self.destination.id, error);
                    self.notice = Some("Couldn't save your like, please try again".to_string());
                }
                Effect::None
            }
            DetailMessage::BookNow => Effect::Notify("Booked Successfully".to_string()),
            DetailMessage::ReadMore => Effect::Notify("Full description coming soon!".to_string()),
            DetailMessage::Back => Effect::GoBack,
        }
    }
}
