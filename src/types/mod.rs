pub mod article;

pub use article::{Article, ArticleId, ArticleRow};
