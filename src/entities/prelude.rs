pub use super::authors::Entity as Authors;
pub use super::categories::Entity as Categories;
pub use super::episodes::Entity as Episodes;
pub use super::playlist_episodes::Entity as PlaylistEpisodes;
pub use super::playlist_podcasts::Entity as PlaylistPodcasts;
pub use super::playlists::Entity as Playlists;
pub use super::podcast_categories::Entity as PodcastCategories;
pub use super::podcasts::Entity as Podcasts;
pub use super::reviews::Entity as Reviews;
pub use super::users::Entity as Users;
