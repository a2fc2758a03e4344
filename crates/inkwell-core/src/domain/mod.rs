//! Domain entities - the core business objects.

mod blog;
mod comment;
mod page;
mod user;

pub use blog::{Blog, BlogChanges, NewBlog, normalize_tags};
pub use comment::{Comment, NewComment};
pub use page::{BlogQuery, PAGE_SIZE, Page, page_count};
pub use user::{MIN_PASSWORD_LEN, Registration, User, normalize_email};
