pub mod prelude;

pub mod authors;
pub mod categories;
pub mod episodes;
pub mod playlist_episodes;
pub mod playlist_podcasts;
pub mod playlists;
pub mod podcast_categories;
pub mod podcasts;
pub mod reviews;
pub mod users;
