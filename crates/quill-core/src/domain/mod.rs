//! Domain entities - the core business objects.

mod post;

pub use post::{NewPost, Post, SEED_POST_ID, seed_post};
