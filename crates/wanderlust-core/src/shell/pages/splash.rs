// SPDX-License-Identifier: AGPL-3.0
// Wanderlust Core - Splash Page (onboarding carousel)

use crate::carousel::SlideCursor;
use crate::shell::navigation::{Route, Tab};
use crate::shell::Effect;
use crate::types::Slide;

pub const HEADER: &str = "Get ready for";
pub const TOUR_BUTTON: &str = "Let's Tour";

#[derive(Debug, Clone)]
pub enum SplashMessage {
    /// Sent by the carousel timer
    SlideAdvanced(usize),
    SelectSlide(usize),
    StartTour,
}

pub struct SplashPage {
    slides: Vec<Slide>,
    cursor: SlideCursor,
}

impl SplashPage {
    pub fn new(slides: Vec<Slide>) -> Self {
        let cursor = SlideCursor::new(slides.len());
        Self { slides, cursor }
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.cursor.index())
    }

    pub fn current_index(&self) -> usize {
        self.cursor.index()
    }

    /// Dot indicators, `true` for the active slide
    pub fn dots(&self) -> Vec<bool> {
        (0..self.slides.len())
            .map(|i| i == self.cursor.index())
            .collect()
    }

    pub fn update(&mut self, message: SplashMessage) -> Effect {
        match message {
            SplashMessage::SlideAdvanced(index) | SplashMessage::SelectSlide(index) => {
                self.cursor.select(index);
                Effect::None
            }
            SplashMessage::StartTour => Effect::Navigate(Route::Explore(Tab::Home)),
        }
    }
}
