//! Seed the database with demo accounts and listings.
//!
//! Creates two artist accounts, one buyer account, and a spread of
//! listings, tutorials, and blog posts so a fresh install has something
//! to browse. Seeding is idempotent per account: an account that already
//! exists is skipped along with its content.
//!
//! # Usage
//!
//! ```bash
//! craftloom seed
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string

use rust_decimal::Decimal;
use secrecy::SecretString;
use sqlx::PgPool;
use tracing::info;

use craftloom_core::{SkillLevel, UserId};
use craftloom_web::db::artworks::{ArtworkInput, ArtworkRepository};
use craftloom_web::db::blogs::{BlogInput, BlogRepository};
use craftloom_web::db::materials::{MaterialInput, MaterialRepository};
use craftloom_web::db::portfolios::{PortfolioInput, PortfolioRepository};
use craftloom_web::db::tutorials::{TutorialInput, TutorialRepository};
use craftloom_web::services::auth::{AuthError, AuthService};

/// Demo account password, good enough for local development only.
const DEMO_PASSWORD: &str = "craftloom-demo";

/// Seed demo data.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is unset or any insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| "DATABASE_URL not set")?;

    let pool = craftloom_web::db::create_pool(&database_url).await?;
    info!("Connected to database");

    let auth = AuthService::new(&pool);

    let Some(maya) = create_account(&auth, "maya_ceramics", "maya@example.com", true).await? else {
        info!("Demo accounts already exist, nothing to do");
        return Ok(());
    };
    let rowan = create_account(&auth, "rowan_fibre", "rowan@example.com", true)
        .await?
        .ok_or("partially seeded database; drop and re-migrate to reseed")?;
    create_account(&auth, "casual_collector", "collector@example.com", false).await?;

    seed_maya(&pool, maya).await?;
    seed_rowan(&pool, rowan).await?;

    info!("Seeding complete!");
    info!("  Demo password for all accounts: {DEMO_PASSWORD}");
    Ok(())
}

/// Register a demo account, returning `None` if it already exists.
async fn create_account(
    auth: &AuthService<'_>,
    username: &str,
    email: &str,
    is_artist: bool,
) -> Result<Option<UserId>, Box<dyn std::error::Error>> {
    match auth.register(username, email, DEMO_PASSWORD, is_artist).await {
        Ok(user) => {
            info!(%username, "Created demo account");
            Ok(Some(user.id))
        }
        Err(AuthError::UserAlreadyExists) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn seed_maya(pool: &PgPool, artist_id: UserId) -> Result<(), Box<dyn std::error::Error>> {
    PortfolioRepository::new(pool)
        .upsert(
            artist_id,
            &PortfolioInput {
                bio: "Hand-thrown stoneware from a backyard kiln. Every glaze is \
                      mixed from scratch and no two firings come out alike.",
                website: Some("https://example.com/maya"),
                specialty: Some("Ceramics"),
            },
        )
        .await?;

    let artworks = ArtworkRepository::new(pool);
    artworks
        .create(
            artist_id,
            &ArtworkInput {
                title: "Ash glaze tea bowl",
                description: "Wood-fired stoneware bowl with a natural ash glaze. \
                              Holds about 200ml.",
                price: Decimal::new(4500, 2),
                medium: "stoneware",
                image_path: None,
            },
        )
        .await?;
    artworks
        .create(
            artist_id,
            &ArtworkInput {
                title: "Speckled dinner plate set",
                description: "Set of four 26cm plates in a speckled oatmeal glaze. \
                              Dishwasher safe.",
                price: Decimal::new(12000, 2),
                medium: "stoneware",
                image_path: None,
            },
        )
        .await?;

    TutorialRepository::new(pool)
        .create(
            artist_id,
            &TutorialInput {
                title: "Centering clay for the first time",
                body: "Centering is the one skill everything else builds on.\n\n\
                       ## Before you start\n\n\
                       Wedge your clay well and keep a bowl of water in reach.\n\n\
                       ## The hold\n\n\
                       Brace your elbows against your body and let the wheel do \
                       the work. Push with your palm, not your fingers.",
                skill_level: SkillLevel::Beginner,
                video_url: None,
            },
        )
        .await?;

    BlogRepository::new(pool)
        .create(
            artist_id,
            &BlogInput {
                title: "Notes from the spring firing",
                body: "We unloaded the kiln on Sunday. The ash settled heavier \
                       than usual on the top shelf and the tea bowls came out \
                       with a running amber drip I could never plan for.",
                published: true,
            },
        )
        .await?;

    Ok(())
}

async fn seed_rowan(pool: &PgPool, artist_id: UserId) -> Result<(), Box<dyn std::error::Error>> {
    PortfolioRepository::new(pool)
        .upsert(
            artist_id,
            &PortfolioInput {
                bio: "Weaver and natural dyer working with local wool. I sell \
                      finished pieces and the hand-dyed yarn I make them from.",
                website: None,
                specialty: Some("Fibre arts"),
            },
        )
        .await?;

    ArtworkRepository::new(pool)
        .create(
            artist_id,
            &ArtworkInput {
                title: "Indigo wall hanging",
                description: "Handwoven wool wall hanging, dip-dyed in a natural \
                              indigo vat. 40cm by 60cm including fringe.",
                price: Decimal::new(8500, 2),
                medium: "wool",
                image_path: None,
            },
        )
        .await?;

    let materials = MaterialRepository::new(pool);
    materials
        .create(
            artist_id,
            &MaterialInput {
                name: "Madder-dyed DK yarn",
                description: "100g skein of DK-weight Corriedale, dyed with madder \
                              root. Colour varies batch to batch.",
                price: Decimal::new(1400, 2),
                quantity_available: 18,
                category: "yarn",
                image_path: None,
            },
        )
        .await?;
    materials
        .create(
            artist_id,
            &MaterialInput {
                name: "Raw Corriedale fleece",
                description: "Skirted fleece from this year's shearing, unwashed. \
                              Sold per 500g.",
                price: Decimal::new(900, 2),
                quantity_available: 6,
                category: "fibre",
                image_path: None,
            },
        )
        .await?;

    TutorialRepository::new(pool)
        .create(
            artist_id,
            &TutorialInput {
                title: "Setting up a madder dye bath",
                body: "Madder gives everything from soft coral to deep brick red \
                       depending on temperature.\n\n\
                       Keep the bath under 70 degrees; boiling it shifts the \
                       colour to brown. Mordant your fibre with alum the day \
                       before.",
                skill_level: SkillLevel::Intermediate,
                video_url: Some("https://example.com/videos/madder-bath"),
            },
        )
        .await?;

    BlogRepository::new(pool)
        .create(
            artist_id,
            &BlogInput {
                title: "Why I stopped buying acid dyes",
                body: "Draft thoughts on the switch to natural dyes. Not ready \
                       to publish yet.",
                published: false,
            },
        )
        .await?;

    Ok(())
}
