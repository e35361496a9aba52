//! The two collections served by this application.

use pokepost_core::record::Collection;

use crate::config::Config;

/// Pokémon: `name` and `type` are required and updatable.
pub fn pokemon(config: &Config) -> Collection {
    Collection::new("Pokemon", &config.pokemon_table)
        .with_required_field("name")
        .with_required_field("type")
        .with_mutable_field("name")
        .with_mutable_field("type")
}

/// Posts: `title` and `body` are required and updatable, `userId` is stamped
/// from configuration.
pub fn posts(config: &Config) -> Collection {
    Collection::new("Post", &config.posts_table)
        .with_required_field("title")
        .with_required_field("body")
        .with_fixed_field("userId", config.post_author_id.as_str())
        .with_mutable_field("title")
        .with_mutable_field("body")
}
