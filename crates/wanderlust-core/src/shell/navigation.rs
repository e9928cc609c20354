// SPDX-License-Identifier: AGPL-3.0
// Wanderlust Core - Navigation stack and tab bar

use crate::types::Destination;

/// Bottom tab of the explore screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Home,
    Map,
    Like,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Home, Tab::Map, Tab::Like, Tab::Profile];

    /// Icon shown in the tab bar
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Map => "map",
            Self::Like => "heart",
            Self::Profile => "person",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Map => "Map",
            Self::Like => "Like",
            Self::Profile => "Profile",
        }
    }
}

/// One button of the tab bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabBarItem {
    pub tab: Tab,
    pub icon: &'static str,
    pub focused: bool,
}

/// Tab bar contents with `active` highlighted
pub fn tab_bar(active: Tab) -> Vec<TabBarItem> {
    Tab::ALL
        .into_iter()
        .map(|tab| TabBarItem {
            tab,
            icon: tab.icon_name(),
            focused: tab == active,
        })
        .collect()
}

/// A screen on the navigation stack
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Splash,
    Explore(Tab),
    DestinationDetail(Destination),
}

/// Stack of screens. The root (splash) is never popped.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            stack: vec![Route::Splash],
        }
    }

    pub fn current(&self) -> &Route {
        // The stack always holds at least the root
        &self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Push `route`. Switching between explore tabs replaces the top
    /// instead of growing the stack.
    pub fn navigate(&mut self, route: Route) {
        tracing::debug!("Navigating to {:?}", RouteName(&route));
        if matches!(route, Route::Explore(_)) {
            if let Some(top @ Route::Explore(_)) = self.stack.last_mut() {
                *top = route;
                return;
            }
        }
        self.stack.push(route);
    }

    /// Switch tabs if the explore screen is on top. Returns false otherwise.
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        match self.stack.last_mut() {
            Some(top @ Route::Explore(_)) => {
                *top = Route::Explore(tab);
                true
            }
            _ => false,
        }
    }

    /// Pop the top screen. Returns false when already at the root.
    pub fn go_back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        true
    }

    /// Tab of the nearest explore screen on the stack
    pub fn active_tab(&self) -> Option<Tab> {
        self.stack.iter().rev().find_map(|route| match route {
            Route::Explore(tab) => Some(*tab),
            _ => None,
        })
    }
}

/// Short route name for logs, without the full destination record
struct RouteName<'a>(&'a Route);

impl std::fmt::Debug for RouteName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Route::Splash => f.write_str("Splash"),
            Route::Explore(tab) => write!(f, "Explore({})", tab.label()),
            Route::DestinationDetail(d) => write!(f, "DestinationDetail({})", d.id),
        }
    }
}
