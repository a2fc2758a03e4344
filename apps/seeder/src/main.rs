//! Demo data loader.
//!
//! `seeder` replaces every user, blog and comment with a small demo set.
//! `seeder --destroy` (or `-d`) only wipes them.

use anyhow::{Context, Result};
use sea_orm::{DbConn, EntityTrait};
use tracing_subscriber::EnvFilter;

use inkwell_core::domain::{Blog, NewBlog, User};
use inkwell_core::ports::{BaseRepository, PasswordService};
use inkwell_infra::database::entity::{blog, comment, user};
use inkwell_infra::database::{PostgresBlogRepository, PostgresUserRepository};
use inkwell_infra::{Argon2PasswordService, DatabaseConfig, DatabaseConnections};
use migration::{Migrator, MigratorTrait};

const DEMO_PASSWORD: &str = "password123";

const USERS: [(&str, &str); 2] = [
    ("John Doe", "john@example.com"),
    ("Jane Austen", "jane@example.com"),
];

struct DemoBlog {
    title: &'static str,
    content: &'static str,
    image: &'static str,
    category: &'static str,
    tags: &'static [&'static str],
}

const BLOGS: [DemoBlog; 5] = [
    DemoBlog {
        title: "The Art of Minimalism",
        content: "Minimalism is not about having less. It is about making room for more of what matters. In a world of clutter and noise, finding silence is a revolutionary act. We often confuse movement with progress, but stillness is where clarity is born.",
        image: "https://images.unsplash.com/photo-1484154218962-a197022b5858?auto=format&fit=crop&w=1470&q=80",
        category: "Lifestyle",
        tags: &["minimalism", "simplicity", "focus"],
    },
    DemoBlog {
        title: "A Guide to Classic Typography",
        content: "Typography is the voice of the written word. When choosing typefaces for a classic design, look for high contrast serifs like Didot or Bodoni for headlines, paired with readable sans-serifs or humanist serifs for body text. The goal is elegance and legibility.",
        image: "https://images.unsplash.com/photo-1516849841032-87cbac4d88f7?auto=format&fit=crop&w=1350&q=80",
        category: "Design",
        tags: &["typography", "design", "fonts"],
    },
    DemoBlog {
        title: "Morning Routines of Successful Writers",
        content: "Most successful writers share a common secret: consistency. It is not about waiting for inspiration to strike, but rather showing up at the desk every single day. Whether it is 5 AM or midnight, the habit is what creates the masterpiece.",
        image: "https://images.unsplash.com/photo-1455390582262-044cdead277a?auto=format&fit=crop&w=1350&q=80",
        category: "Productivity",
        tags: &["writing", "habits", "success"],
    },
    DemoBlog {
        title: "Understanding Modern Architecture",
        content: "Modern architecture emerged at the turn of the 20th century as a movement away from the ornamentation of the past. It embraces clean lines, functional design, and the use of glass, steel, and reinforced concrete. But is it too cold for human habitation?",
        image: "https://images.unsplash.com/photo-1600585154340-be6161a56a0c?auto=format&fit=crop&w=1470&q=80",
        category: "Architecture",
        tags: &["architecture", "modernism", "design"],
    },
    DemoBlog {
        title: "The Future of Web Development",
        content: "As AI continues to evolve, the role of the web developer is shifting. We are moving from writing syntax to architecting systems. The future belongs to those who can understand the big picture and leverage tools to build faster, more accessible, and more human-centric experiences.",
        image: "https://images.unsplash.com/photo-1504639725590-34d0984388bd?auto=format&fit=crop&w=1350&q=80",
        category: "Technology",
        tags: &["web development", "ai", "future"],
    },
];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = DatabaseConfig {
        url: std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
        max_connections: 5,
        min_connections: 1,
    };
    let db = DatabaseConnections::init(&config)
        .await
        .context("failed to connect to the database")?
        .main;

    Migrator::up(&db, None)
        .await
        .context("failed to apply migrations")?;

    let destroy = std::env::args()
        .skip(1)
        .any(|arg| arg == "-d" || arg == "--destroy");

    wipe(&db).await?;
    if destroy {
        tracing::info!("Data destroyed");
        return Ok(());
    }

    import(db).await?;
    tracing::info!(users = USERS.len(), blogs = BLOGS.len(), "Data imported");
    Ok(())
}

/// Comments first, then blogs, then users, so no foreign key is left dangling.
async fn wipe(db: &DbConn) -> Result<()> {
    let comments = comment::Entity::delete_many().exec(db).await?;
    let blogs = blog::Entity::delete_many().exec(db).await?;
    let users = user::Entity::delete_many().exec(db).await?;

    tracing::info!(
        comments = comments.rows_affected,
        blogs = blogs.rows_affected,
        users = users.rows_affected,
        "Existing data removed"
    );
    Ok(())
}

async fn import(db: DbConn) -> Result<()> {
    let passwords = Argon2PasswordService::new();
    let user_repo = PostgresUserRepository::new(db.clone());
    let blog_repo = PostgresBlogRepository::new(db);

    let mut authors = Vec::with_capacity(USERS.len());
    for (name, email) in USERS {
        let hash = passwords.hash(DEMO_PASSWORD)?;
        let saved = user_repo
            .insert(User::new(name.to_string(), email.to_string(), hash))
            .await
            .with_context(|| format!("failed to create user {email}"))?;
        authors.push(saved.id);
    }

    // Authors alternate between the demo users.
    for (index, demo) in BLOGS.iter().enumerate() {
        let draft = NewBlog::new(
            Some(demo.title.to_string()),
            Some(demo.content.to_string()),
            Some(demo.image.to_string()),
            Some(demo.category.to_string()),
            demo.tags.iter().map(|t| t.to_string()).collect(),
        )?;
        let author_id = authors[index % authors.len()];

        let saved = blog_repo
            .insert(Blog::new(author_id, draft))
            .await
            .with_context(|| format!("failed to create blog {:?}", demo.title))?;
        tracing::debug!(blog_id = %saved.id, title = demo.title, "Blog created");
    }

    Ok(())
}
