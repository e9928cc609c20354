// SPDX-License-Identifier: AGPL-3.0
// Wanderlust Core - Pages module

pub mod detail;
pub mod home;
pub mod likes;
pub mod splash;

/// Tabs that only show a title for now
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderPage {
    pub title: &'static str,
    pub subtext: String,
}

impl PlaceholderPage {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            subtext: format!("This is the {} Screen", title),
        }
    }
}
