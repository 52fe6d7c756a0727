pub mod config;
pub mod db;
pub mod entities;
pub mod ingest;
pub mod models;
pub mod repository;
pub mod services;

use std::sync::Arc;

pub use config::Config;
use db::Store;
use repository::{CatalogueRepository, EntityKey};
use services::{
    AuthError, AuthService, CatalogueService, PlaylistService, ReviewService, SearchField,
    SearchService,
};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    config.validate()?;

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    match args[1].as_str() {
        "populate" | "p" => cmd_populate(&config).await,

        "list" | "ls" | "l" => {
            let page = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1);
            cmd_list(&config, page).await
        }

        "info" | "i" => {
            if args.len() < 3 {
                println!("Usage: podarr info <podcast_id>");
                return Ok(());
            }
            cmd_info(&config, &args[2]).await
        }

        "episodes" | "e" => {
            if args.len() < 3 {
                println!("Usage: podarr episodes <podcast_id>");
                return Ok(());
            }
            cmd_episodes(&config, &args[2]).await
        }

        "search" | "s" => {
            if args.len() < 4 {
                println!("Usage: podarr search <title|author|category> <term>");
                return Ok(());
            }
            let term = args[3..].join(" ");
            cmd_search(&config, &args[2], &term).await
        }

        "register" => {
            if args.len() < 4 {
                println!("Usage: podarr register <username> <password>");
                return Ok(());
            }
            cmd_register(&config, &args[2], &args[3]).await
        }

        "login" => {
            if args.len() < 4 {
                println!("Usage: podarr login <username> <password>");
                return Ok(());
            }
            cmd_login(&config, &args[2], &args[3]).await
        }

        "review" => {
            if args.len() < 6 {
                println!("Usage: podarr review <username> <podcast_id> <rating> <comment>");
                return Ok(());
            }
            let content = args[5..].join(" ");
            cmd_review(&config, &args[2], &args[3], &args[4], &content).await
        }

        "reviews" => {
            if args.len() < 3 {
                println!("Usage: podarr reviews <podcast_id>");
                return Ok(());
            }
            cmd_reviews(&config, &args[2]).await
        }

        "playlist" | "pl" => {
            if args.len() < 3 {
                println!("Usage: podarr playlist <subcommand>");
                println!("Subcommands: create, list, add-podcast, add-episode");
                return Ok(());
            }
            match args[2].as_str() {
                "create" => {
                    if args.len() < 5 {
                        println!("Usage: podarr playlist create <username> <name>");
                        return Ok(());
                    }
                    let name = args[4..].join(" ");
                    cmd_playlist_create(&config, &args[3], &name).await
                }
                "list" | "ls" => {
                    if args.len() < 4 {
                        println!("Usage: podarr playlist list <username>");
                        return Ok(());
                    }
                    cmd_playlist_list(&config, &args[3]).await
                }
                "add-podcast" => {
                    if args.len() < 5 {
                        println!("Usage: podarr playlist add-podcast <playlist_id> <podcast_id>");
                        return Ok(());
                    }
                    cmd_playlist_add_podcast(&config, &args[3], &args[4]).await
                }
                "add-episode" => {
                    if args.len() < 6 {
                        println!(
                            "Usage: podarr playlist add-episode <playlist_id> <podcast_id> <episode_id>"
                        );
                        return Ok(());
                    }
                    cmd_playlist_add_episode(&config, &args[3], &args[4], &args[5]).await
                }
                _ => {
                    println!("Unknown playlist subcommand: {}", args[2]);
                    println!("Use: create, list, add-podcast, add-episode");
                    Ok(())
                }
            }
        }

        "init" | "--init" => {
            Config::create_default_if_missing()?;
            println!("✓ Config file created. Edit config.toml and run again.");
            Ok(())
        }

        "help" | "-h" | "--help" => {
            print_help();
            Ok(())
        }

        _ => {
            println!("Unknown command: {}", args[1]);
            println!();
            print_help();
            Ok(())
        }
    }
}

fn print_help() {
    println!("Podarr - Podcast Catalogue");
    println!("Browse, search and review a catalogue of shows and episodes");
    println!();
    println!("USAGE:");
    println!("  podarr <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("  populate          Load the catalogue from the CSV datasets");
    println!("  list [page]       Browse the catalogue in title order");
    println!("  info <id>         Show details for one podcast");
    println!("  episodes <id>     List a podcast's episodes");
    println!("  search <field> <term>");
    println!("                    Search podcasts by title, author or category");
    println!("  register <user> <password>");
    println!("                    Create an account");
    println!("  login <user> <password>");
    println!("                    Check credentials");
    println!("  review <user> <podcast_id> <rating> <comment>");
    println!("                    Leave a 0-10 rating with a comment");
    println!("  reviews <id>      Show reviews for a podcast");
    println!("  playlist <subcmd> Manage playlists (create, list, add-podcast, add-episode)");
    println!("  init              Create default config file");
    println!("  help              Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("  podarr populate                   # Seed the database from data/*.csv");
    println!("  podarr list 2                     # Second page of the catalogue");
    println!("  podarr search category comedy     # Find podcasts by category");
    println!("  podarr register alice hunter2     # Create an account");
    println!("  podarr review alice 14 8 \"Great\"  # Review podcast 14");
    println!("  podarr playlist create alice Favourites");
    println!();
    println!("CONFIG:");
    println!("  Edit config.toml to point at your datasets and database.");
}

async fn open_repository(config: &Config) -> anyhow::Result<Arc<dyn CatalogueRepository>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;
    Ok(Arc::new(store))
}

async fn cmd_populate(config: &Config) -> anyhow::Result<()> {
    let repo = open_repository(config).await?;
    repo.populate(&config.catalogue.podcasts_csv, &config.catalogue.episodes_csv)
        .await?;

    let podcasts = repo.get_number_of_podcasts().await?;
    println!("✓ Catalogue populated");
    println!("  Podcasts: {}", podcasts);
    println!("  Authors:  {}", repo.get_authors().await?.len());
    println!("  Categories: {}", repo.get_categories().await?.len());
    Ok(())
}

async fn cmd_list(config: &Config, page: usize) -> anyhow::Result<()> {
    let repo = open_repository(config).await?;
    let catalogue = CatalogueService::new(repo);
    let listing = catalogue.browse(page, config.catalogue.page_size).await?;

    if listing.items.is_empty() {
        println!("The catalogue is empty.");
        println!();
        println!("Seed it with: podarr populate");
        return Ok(());
    }

    println!(
        "Catalogue (page {}/{}, {} podcasts)",
        listing.page, listing.total_pages, listing.total_items
    );
    println!("{:-<70}", "");

    for podcast in &listing.items {
        println!("• {} [{}]", podcast.title(), podcast.id());
        println!("  By: {} | {}", podcast.author_name(), podcast.category_line());
    }

    Ok(())
}

async fn cmd_info(config: &Config, id_str: &str) -> anyhow::Result<()> {
    let repo = open_repository(config).await?;

    let id: i32 = match id_str.parse() {
        Ok(id) => id,
        Err(_) => {
            println!("Invalid podcast ID: {}", id_str);
            return Ok(());
        }
    };

    let catalogue = CatalogueService::new(Arc::clone(&repo));
    let Some((podcast, episodes)) = catalogue.podcast_details(id).await? else {
        println!("Podcast with ID {} not found.", id);
        return Ok(());
    };

    println!("Podcast Info");
    println!("{:-<70}", "");
    println!("Title:    {}", podcast.title());
    println!("Author:   {}", podcast.author_name());
    println!("Language: {}", podcast.language());
    println!("Website:  {}", podcast.website());
    if let Some(itunes_id) = podcast.itunes_id() {
        println!("iTunes:   {}", itunes_id);
    }
    if !podcast.categories().is_empty() {
        println!("Categories: {}", podcast.category_line());
    }
    if !podcast.description().is_empty() {
        let description = podcast.description();
        let display = if description.len() > 300 {
            let cut: String = description.chars().take(300).collect();
            format!("{}...", cut)
        } else {
            description.to_string()
        };
        println!("About:    {}", display);
    }
    println!("Episodes: {}", episodes.len());

    let reviews = ReviewService::new(repo).reviews_for_podcast(id).await?;
    if !reviews.is_empty() {
        println!();
        println!("Reviews ({}):", reviews.len());
        for review in reviews.iter().take(5) {
            println!(
                "  {}/10 by {} - {}",
                review.rating(),
                review.user().username(),
                review.content()
            );
        }
    }

    Ok(())
}

async fn cmd_episodes(config: &Config, id_str: &str) -> anyhow::Result<()> {
    let repo = open_repository(config).await?;

    let id: i32 = match id_str.parse() {
        Ok(id) => id,
        Err(_) => {
            println!("Invalid podcast ID: {}", id_str);
            return Ok(());
        }
    };

    let Some(podcast) = repo.get_podcast(EntityKey::ById(id)).await? else {
        println!("Podcast with ID {} not found.", id);
        return Ok(());
    };

    let episodes = repo.get_episodes_for_podcast(id).await?;

    println!("Episodes for: {}", podcast.title());
    println!("{:-<70}", "");

    if episodes.is_empty() {
        println!("No episodes on record.");
        return Ok(());
    }

    for episode in &episodes {
        let minutes = episode.audio_len() / 60;
        println!(
            "• [{}] {} ({} min, {})",
            episode.id(),
            episode.title(),
            minutes,
            episode.pub_date()
        );
    }

    Ok(())
}

async fn cmd_search(config: &Config, field_str: &str, term: &str) -> anyhow::Result<()> {
    let Some(field) = SearchField::parse(field_str) else {
        println!("Unknown search field: {}", field_str);
        println!("Use: title, author or category");
        return Ok(());
    };

    let repo = open_repository(config).await?;
    let results = SearchService::new(repo).search(field, term).await?;

    if results.is_empty() {
        println!("No podcasts matching '{}'", term);
        return Ok(());
    }

    println!("Search Results ({} total)", results.len());
    println!("{:-<70}", "");
    for podcast in &results {
        println!("• {} [{}]", podcast.title(), podcast.id());
        println!("  By: {} | {}", podcast.author_name(), podcast.category_line());
    }

    Ok(())
}

async fn cmd_register(config: &Config, username: &str, password: &str) -> anyhow::Result<()> {
    let repo = open_repository(config).await?;
    let auth = AuthService::new(repo);

    if auth.user_registered(username).await? {
        println!("Username '{}' is already taken.", username.to_lowercase());
        return Ok(());
    }

    auth.register(username, password).await?;
    println!("✓ Registered: {}", username.to_lowercase());
    Ok(())
}

async fn cmd_login(config: &Config, username: &str, password: &str) -> anyhow::Result<()> {
    let repo = open_repository(config).await?;
    let auth = AuthService::new(repo);

    match auth.authenticate(username, password).await {
        Ok(user) => println!("✓ Welcome back, {}", user.username()),
        Err(AuthError::InvalidCredentials) => println!("Invalid username or password."),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

async fn cmd_review(
    config: &Config,
    username: &str,
    podcast_id_str: &str,
    rating_str: &str,
    content: &str,
) -> anyhow::Result<()> {
    let repo = open_repository(config).await?;

    let (Ok(podcast_id), Ok(rating)) = (podcast_id_str.parse(), rating_str.parse()) else {
        println!("Podcast ID and rating must be numbers.");
        return Ok(());
    };

    let Some(user) = repo.get_user(username).await? else {
        println!("No account for '{}'. Register first.", username);
        return Ok(());
    };

    if repo.get_podcast(EntityKey::ById(podcast_id)).await?.is_none() {
        println!("Podcast with ID {} not found.", podcast_id);
        return Ok(());
    }

    match ReviewService::new(repo)
        .review_podcast(&user, podcast_id, rating, content)
        .await
    {
        Ok(review) => println!("✓ Review #{} saved ({}/10)", review.id(), review.rating()),
        Err(services::ReviewError::Validation(err)) => println!("Rejected: {}", err),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

async fn cmd_reviews(config: &Config, id_str: &str) -> anyhow::Result<()> {
    let repo = open_repository(config).await?;

    let id: i32 = match id_str.parse() {
        Ok(id) => id,
        Err(_) => {
            println!("Invalid podcast ID: {}", id_str);
            return Ok(());
        }
    };

    let reviews = ReviewService::new(repo).reviews_for_podcast(id).await?;

    if reviews.is_empty() {
        println!("No reviews for podcast {} yet.", id);
        return Ok(());
    }

    println!("Reviews ({} total)", reviews.len());
    println!("{:-<70}", "");
    for review in &reviews {
        println!(
            "{}/10 by {} - {}",
            review.rating(),
            review.user().username(),
            review.content()
        );
    }

    Ok(())
}

async fn cmd_playlist_create(config: &Config, username: &str, name: &str) -> anyhow::Result<()> {
    let repo = open_repository(config).await?;

    let Some(user) = repo.get_user(username).await? else {
        println!("No account for '{}'. Register first.", username);
        return Ok(());
    };

    let playlist = PlaylistService::new(repo).create(&user, name).await?;
    println!("✓ Created playlist #{}: {}", playlist.id(), playlist.name());
    Ok(())
}

async fn cmd_playlist_list(config: &Config, username: &str) -> anyhow::Result<()> {
    let repo = open_repository(config).await?;

    let Some(user) = repo.get_user(username).await? else {
        println!("No account for '{}'.", username);
        return Ok(());
    };

    let playlists = PlaylistService::new(repo).playlists_for(&user).await?;

    if playlists.is_empty() {
        println!("{} has no playlists.", user.username());
        return Ok(());
    }

    for playlist in &playlists {
        println!(
            "• [{}] {} ({} episodes, {} podcasts)",
            playlist.id(),
            playlist.name(),
            playlist.episodes().len(),
            playlist.podcasts().len()
        );
    }

    Ok(())
}

async fn cmd_playlist_add_podcast(
    config: &Config,
    playlist_id_str: &str,
    podcast_id_str: &str,
) -> anyhow::Result<()> {
    let repo = open_repository(config).await?;

    let (Ok(playlist_id), Ok(podcast_id)) = (playlist_id_str.parse(), podcast_id_str.parse())
    else {
        println!("Playlist and podcast IDs must be numbers.");
        return Ok(());
    };

    let Some(podcast) = repo.get_podcast(EntityKey::ById(podcast_id)).await? else {
        println!("Podcast with ID {} not found.", podcast_id);
        return Ok(());
    };
    let title = podcast.title().to_string();

    let playlist = PlaylistService::new(repo)
        .add_podcast(playlist_id, podcast)
        .await?;
    println!("✓ Added '{}' to playlist '{}'", title, playlist.name());
    Ok(())
}

async fn cmd_playlist_add_episode(
    config: &Config,
    playlist_id_str: &str,
    podcast_id_str: &str,
    episode_id_str: &str,
) -> anyhow::Result<()> {
    let repo = open_repository(config).await?;

    let (Ok(playlist_id), Ok(podcast_id), Ok(episode_id)) = (
        playlist_id_str.parse::<i32>(),
        podcast_id_str.parse::<i32>(),
        episode_id_str.parse::<i32>(),
    ) else {
        println!("Playlist, podcast and episode IDs must be numbers.");
        return Ok(());
    };

    let episodes = repo.get_episodes_for_podcast(podcast_id).await?;
    let Some(episode) = episodes.into_iter().find(|e| e.id() == episode_id) else {
        println!(
            "Episode {} not found under podcast {}.",
            episode_id, podcast_id
        );
        return Ok(());
    };
    let title = episode.title().to_string();

    let playlist = PlaylistService::new(repo)
        .add_episode(playlist_id, episode)
        .await?;
    println!("✓ Queued '{}' on playlist '{}'", title, playlist.name());
    Ok(())
}
