// SPDX-License-Identifier: AGPL-3.0
// Wanderlust Core - Navigation shell
//
// Framework-agnostic screen state. Pages turn messages into effects; the
// App performs effects against the like store and feeds results back as
// messages. A frontend only has to render page state and forward input.

pub mod navigation;
pub mod pages;

use crate::carousel::CarouselTimer;
use crate::catalog::DestinationCatalog;
use crate::likes::LikeStore;
use crate::types::{AppSettings, Destination};
use async_channel::Receiver;
use navigation::{Navigator, Route, Tab};
use pages::detail::{DetailMessage, DetailPage};
use pages::home::{HomeMessage, HomePage};
use pages::likes::{LikesMessage, LikesPage};
use pages::splash::{SplashMessage, SplashPage};
use pages::PlaceholderPage;
use std::sync::Arc;

/// Work a page asks the shell to do after handling a message
#[derive(Debug, Clone)]
pub enum Effect {
    None,
    Navigate(Route),
    GoBack,
    ToggleLike {
        destination: Destination,
        currently_liked: bool,
    },
    RefreshLikes,
    /// Alert-style message for the user
    Notify(String),
}

#[derive(Debug, Clone)]
pub enum Message {
    // Navigation
    SelectTab(Tab),
    Back,

    // Page-specific messages
    Splash(SplashMessage),
    Home(HomeMessage),
    Detail(DetailMessage),
    Likes(LikesMessage),
}

impl From<SplashMessage> for Message {
    fn from(msg: SplashMessage) -> Self {
        Message::Splash(msg)
    }
}

impl From<HomeMessage> for Message {
    fn from(msg: HomeMessage) -> Self {
        Message::Home(msg)
    }
}

impl From<DetailMessage> for Message {
    fn from(msg: DetailMessage) -> Self {
        Message::Detail(msg)
    }
}

impl From<LikesMessage> for Message {
    fn from(msg: LikesMessage) -> Self {
        Message::Likes(msg)
    }
}

pub struct App {
    navigator: Navigator,
    catalog: Arc<dyn DestinationCatalog>,
    likes: LikeStore,
    settings: AppSettings,

    // Page states
    splash_page: SplashPage,
    home_page: HomePage,
    detail_page: Option<DetailPage>,
    likes_page: LikesPage,
    map_page: PlaceholderPage,
    profile_page: PlaceholderPage,

    // Lives only while the splash screen is shown
    carousel: Option<(CarouselTimer, Receiver<usize>)>,
    notices: Vec<String>,
}

impl App {
    pub fn new(catalog: Arc<dyn DestinationCatalog>, likes: LikeStore, settings: AppSettings) -> Self {
        Self {
            navigator: Navigator::new(),
            splash_page: SplashPage::new(catalog.slides()),
            home_page: HomePage::new(&*catalog, settings.default_category),
            detail_page: None,
            likes_page: LikesPage::new(),
            map_page: PlaceholderPage::new("Map"),
            profile_page: PlaceholderPage::new("Profile"),
            carousel: None,
            notices: Vec::new(),
            catalog,
            likes,
            settings,
        }
    }

    /// Start the splash carousel. Forward each received index as
    /// `SplashMessage::SlideAdvanced`. The timer stops once the splash
    /// screen is left and restarts when it is shown again; fetch the new
    /// receiver with `carousel_receiver`.
    pub fn start_carousel(&mut self) -> Option<Receiver<usize>> {
        if self.navigator.current() != &Route::Splash {
            return None;
        }
        let (timer, rx) = CarouselTimer::start_from(
            self.settings.carousel_interval(),
            self.splash_page.slide_count(),
            self.splash_page.current_index(),
        );
        self.carousel = Some((timer, rx.clone()));
        Some(rx)
    }

    /// Receiver of the running carousel, if the splash screen is shown
    pub fn carousel_receiver(&self) -> Option<Receiver<usize>> {
        self.carousel.as_ref().map(|(_, rx)| rx.clone())
    }

    pub fn is_carousel_running(&self) -> bool {
        self.carousel
            .as_ref()
            .is_some_and(|(timer, _)| timer.is_running())
    }

    pub fn current_route(&self) -> &Route {
        self.navigator.current()
    }

    pub fn active_tab(&self) -> Option<Tab> {
        self.navigator.active_tab()
    }

    pub fn splash_page(&self) -> &SplashPage {
        &self.splash_page
    }

    pub fn home_page(&self) -> &HomePage {
        &self.home_page
    }

    pub fn detail_page(&self) -> Option<&DetailPage> {
        self.detail_page.as_ref()
    }

    pub fn likes_page(&self) -> &LikesPage {
        &self.likes_page
    }

    pub fn map_page(&self) -> &PlaceholderPage {
        &self.map_page
    }

    pub fn profile_page(&self) -> &PlaceholderPage {
        &self.profile_page
    }

    /// Drain user-facing notices collected from page effects
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// Route a message to its page, returning the requested effect
    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::SelectTab(tab) => {
                if self.navigator.select_tab(tab) {
                    self.on_focus()
                } else {
                    Effect::None
                }
            }
            Message::Back => Effect::GoBack,
            Message::Splash(msg) => self.splash_page.update(msg),
            Message::Home(msg) => self.home_page.update(msg),
            Message::Detail(msg) => match self.detail_page.as_mut() {
                Some(page) => page.update(msg),
                None => Effect::None,
            },
            Message::Likes(msg) => self.likes_page.update(msg),
        }
    }

    /// Carry out an effect. Store calls resolve into a follow-up message.
    pub async fn perform(&mut self, effect: Effect) -> Option<Message> {
        match effect {
            Effect::None => None,
            Effect::Navigate(route) => {
                self.navigator.navigate(route);
                self.enter_current().await
            }
            Effect::GoBack => {
                if !self.navigator.go_back() {
                    return None;
                }
                self.enter_current().await
            }
            Effect::ToggleLike {
                destination,
                currently_liked,
            } => {
                let outcome = self.likes.toggle(&destination, currently_liked).await;
                Some(DetailMessage::LikeResolved(outcome).into())
            }
            Effect::RefreshLikes => {
                let destinations = self.likes.list_all().await;
                Some(LikesMessage::Loaded(destinations).into())
            }
            Effect::Notify(text) => {
                tracing::info!("Notice: {}", text);
                self.notices.push(text);
                None
            }
        }
    }

    /// Handle a message and every effect that follows from it
    pub async fn dispatch(&mut self, message: Message) {
        let mut next = Some(message);
        while let Some(message) = next.take() {
            let effect = self.update(message);
            next = self.perform(effect).await;
        }
    }

    /// Set up page state for the screen that just became current
    async fn enter_current(&mut self) -> Option<Message> {
        if self.navigator.current() != &Route::Splash && self.carousel.take().is_some() {
            tracing::debug!("Left splash screen, carousel stopped");
        }

        match self.navigator.current().clone() {
            Route::DestinationDetail(destination) => {
                let reuse = self
                    .detail_page
                    .as_ref()
                    .is_some_and(|page| page.destination().id == destination.id);
                if !reuse {
                    let gallery = self.catalog.gallery_for(&destination);
                    self.detail_page = Some(DetailPage::new(destination.clone(), gallery));
                }
                let liked = self.likes.is_liked(&destination.id).await;
                Some(DetailMessage::LikeStatusLoaded(liked).into())
            }
            Route::Explore(_) => {
                self.detail_page = None;
                match self.on_focus() {
                    Effect::RefreshLikes => Some(LikesMessage::Refresh.into()),
                    _ => None,
                }
            }
            Route::Splash => {
                if self.carousel.is_none() && self.start_carousel().is_some() {
                    tracing::debug!("Back on splash screen, carousel restarted");
                }
                None
            }
        }
    }

    /// The likes tab re-reads the store every time it gains focus
    fn on_focus(&self) -> Effect {
        match self.navigator.current() {
            Route::Explore(Tab::Like) => Effect::RefreshLikes,
            _ => Effect::None,
        }
    }
}
