// SPDX-License-Identifier: AGPL-3.0
// Wanderlust CLI - Command Handlers

use crate::state::AppState;
use wanderlust_core::shell::navigation::tab_bar;
use wanderlust_core::shell::navigation::Tab;
use wanderlust_core::shell::pages::detail::DetailMessage;
use wanderlust_core::shell::pages::home::{self, HomeMessage};
use wanderlust_core::shell::pages::likes;
use wanderlust_core::shell::pages::splash::{self, SplashMessage};
use wanderlust_core::{App, AppError, Category, Destination, DestinationId, Message};

type CommandResult<T> = Result<T, AppError>;

fn print_card(destination: &Destination, liked: bool) {
    let heart = if liked { "♥" } else { " " };
    let mut line = format!(
        "{} [{}] {} - {}",
        heart, destination.id, destination.title, destination.location
    );
    if let Some(rating) = &destination.rating {
        line.push_str(&format!("  ★ {}", rating));
    }
    if let (Some(_), Some(count)) = (&destination.users, destination.user_count) {
        line.push_str(&format!("  {}", count));
    }
    println!("{}", line);
}

/// Open the shell on the detail screen of `id`
async fn open_detail(state: &AppState, id: &DestinationId) -> CommandResult<App> {
    let mut app = state.shell();
    app.dispatch(SplashMessage::StartTour.into()).await;
    app.dispatch(HomeMessage::OpenDestination(id.clone()).into())
        .await;

    if app.detail_page().is_none() {
        return Err(AppError::NotFound(format!("Destination {}", id)));
    }
    Ok(app)
}

/// Print the home feed
pub async fn home(
    state: &AppState,
    category: Option<Category>,
    search: Option<String>,
) -> CommandResult<()> {
    let mut app = state.shell();
    app.dispatch(SplashMessage::StartTour.into()).await;
    if let Some(category) = category {
        app.dispatch(HomeMessage::SelectCategory(category).into())
            .await;
    }
    if let Some(query) = search {
        app.dispatch(HomeMessage::SearchChanged(query).into()).await;
    }

    let page = app.home_page();
    println!("{}", home::HEADER);
    let categories: Vec<String> = page
        .categories()
        .iter()
        .map(|c| {
            if *c == page.selected_category() {
                format!("[{}]", c)
            } else {
                c.to_string()
            }
        })
        .collect();
    println!("Categories: {}", categories.join("  "));

    println!();
    println!("Featured");
    for destination in page.visible_featured() {
        print_card(destination, state.likes.is_liked(&destination.id).await);
    }

    println!();
    println!("Explore more");
    for destination in page.visible_explore_more() {
        print_card(destination, state.likes.is_liked(&destination.id).await);
    }

    Ok(())
}

/// Print one destination in full
pub async fn show(state: &AppState, id: DestinationId) -> CommandResult<()> {
    let app = open_detail(state, &id).await?;
    let Some(page) = app.detail_page() else {
        return Err(AppError::NotFound(format!("Destination {}", id)));
    };
    let destination = page.destination();

    println!("{} ({})", destination.title, page.like_icon());
    println!("{}", destination.location);
    println!("{}  ★ {}", page.price_label(), page.rating_label());
    if let Some(users) = page.user_count_label() {
        println!("Travellers: {}", users);
    }
    if !destination.description.is_empty() {
        println!();
        println!("{}", destination.description);
    }
    println!();
    println!("Gallery:");
    for image in page.gallery() {
        println!("  {}", image);
    }

    Ok(())
}

/// Like a catalog destination
pub async fn like(state: &AppState, id: DestinationId) -> CommandResult<()> {
    let destination = state
        .catalog
        .find(&id)
        .ok_or_else(|| AppError::NotFound(format!("Destination {}", id)))?;

    state.likes.set_liked(&destination).await?;
    println!("Liked {}", destination.title);
    Ok(())
}

/// Remove a like. Works for destinations no longer in the catalog.
pub async fn unlike(state: &AppState, id: DestinationId) -> CommandResult<()> {
    state.likes.set_unliked(&id).await?;
    println!("Unliked {}", id);
    Ok(())
}

/// Flip the like state through the detail page, as a tap on the heart would
pub async fn toggle(state: &AppState, id: DestinationId) -> CommandResult<()> {
    let mut app = open_detail(state, &id).await?;
    app.dispatch(DetailMessage::ToggleLike.into()).await;

    let Some(page) = app.detail_page() else {
        return Err(AppError::NotFound(format!("Destination {}", id)));
    };
    if let Some(notice) = page.notice() {
        return Err(AppError::Storage(notice.to_string()));
    }

    let verb = if page.is_liked() { "Liked" } else { "Unliked" };
    println!("{} {}", verb, page.destination().title);
    Ok(())
}

/// Print the liked destinations, most recent first
pub async fn list_likes(state: &AppState) -> CommandResult<()> {
    let mut app = state.shell();
    app.dispatch(SplashMessage::StartTour.into()).await;
    app.dispatch(Message::SelectTab(Tab::Like)).await;

    let tabs: Vec<String> = tab_bar(Tab::Like)
        .into_iter()
        .map(|item| {
            if item.focused {
                format!("[{}]", item.icon)
            } else {
                item.icon.to_string()
            }
        })
        .collect();
    tracing::debug!("Tab bar: {}", tabs.join(" "));

    let page = app.likes_page();
    println!("{}", likes::HEADER);
    if let Some(empty) = page.empty_text() {
        println!("{}", empty);
        return Ok(());
    }
    for destination in page.destinations() {
        print_card(destination, true);
    }

    Ok(())
}

/// Remove every like
pub async fn clear_likes(state: &AppState) -> CommandResult<()> {
    let removed = state.likes.clear().await?;
    println!("Removed {} liked destinations", removed);
    Ok(())
}

/// Run the splash carousel for a number of slide changes
pub async fn slides(state: &AppState, ticks: usize) -> CommandResult<()> {
    let mut app = state.shell();
    let rx = app
        .start_carousel()
        .ok_or_else(|| AppError::InvalidConfig("Splash screen is not active".to_string()))?;

    let print_slide = |app: &App| {
        if let Some(slide) = app.splash_page().current_slide() {
            let dots: String = app
                .splash_page()
                .dots()
                .into_iter()
                .map(|active| if active { '●' } else { '○' })
                .collect();
            println!("{} {}  {}", splash::HEADER, slide.title, dots);
            println!("  {}", slide.description);
        }
    };

    print_slide(&app);
    for _ in 0..ticks {
        let Ok(index) = rx.recv().await else {
            break;
        };
        app.dispatch(SplashMessage::SlideAdvanced(index).into())
            .await;
        print_slide(&app);
    }

    println!("{}", splash::TOUR_BUTTON);
    app.dispatch(SplashMessage::StartTour.into()).await;
    Ok(())
}

/// Print current settings
pub fn settings(state: &AppState) -> CommandResult<()> {
    println!("Settings file: {}", state.settings.path().display());
    println!("{:#?}", state.current_settings());
    Ok(())
}
