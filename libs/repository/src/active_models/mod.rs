pub mod post;
pub mod prelude;
