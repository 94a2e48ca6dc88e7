//! Demo data for empty databases.

use crate::domain::account::{Email, User};
use crate::domain::cellar::{Review, ReviewDraft, ReviewForm, Wine, WineDraft, WineForm};
use crate::domain::foundation::DomainError;
use crate::ports::{PasswordHasher, ReviewRepository, UserRepository, WineRepository};

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "demo-password";

struct SampleWine {
    name: &'static str,
    producer: &'static str,
    vintage: &'static str,
    grape: &'static str,
    country: &'static str,
    region: &'static str,
    quantity: &'static str,
    price: &'static str,
    abv: &'static str,
    location: &'static str,
    rating: &'static str,
    drinking_window: &'static str,
    notes: &'static str,
    wine_type: &'static str,
    reviewer: &'static str,
    review_date: &'static str,
    review_rating: &'static str,
    review: &'static str,
}

const SAMPLES: [SampleWine; 5] = [
    SampleWine {
        name: "Sangre de Toro",
        producer: "Torres",
        vintage: "2019",
        grape: "Garnacha",
        country: "Spain",
        region: "Catalunya",
        quantity: "2",
        price: "15.00",
        abv: "13.5",
        location: "Rack A",
        rating: "88p",
        drinking_window: "2020-2025",
        notes: "Classic Garnacha with red fruit notes.",
        wine_type: "Red",
        reviewer: "Alex Johnson",
        review_date: "2 days ago",
        review_rating: "99p",
        review: "Simply breathtaking. The complexity is mind-boggling. Worth every penny for a special occasion.",
    },
    SampleWine {
        name: "Chablis Grand Cru",
        producer: "Domaine Laroche",
        vintage: "2018",
        grape: "Chardonnay",
        country: "France",
        region: "Burgundy",
        quantity: "1",
        price: "85.00",
        abv: "13.0",
        location: "Rack B",
        rating: "94p",
        drinking_window: "2022-2030",
        notes: "Crisp acidity with mineral undertones.",
        wine_type: "White",
        reviewer: "Maria Garcia",
        review_date: "1 week ago",
        review_rating: "95p",
        review: "An absolute delight! The balance of flavors is exquisite.",
    },
    SampleWine {
        name: "Barolo",
        producer: "Pio Cesare",
        vintage: "2016",
        grape: "Nebbiolo",
        country: "Italy",
        region: "Piedmont",
        quantity: "3",
        price: "60.00",
        abv: "14.5",
        location: "Rack C",
        rating: "92p",
        drinking_window: "2024-2035",
        notes: "Robust tannins with cherry and tar aromas.",
        wine_type: "Red",
        reviewer: "John Smith",
        review_date: "3 days ago",
        review_rating: "88p",
        review: "A solid choice, but I expected a bit more depth. Still very enjoyable.",
    },
    SampleWine {
        name: "Riesling Kabinett",
        producer: "Dr. Loosen",
        vintage: "2020",
        grape: "Riesling",
        country: "Germany",
        region: "Mosel",
        quantity: "6",
        price: "22.00",
        abv: "8.5",
        location: "Fridge",
        rating: "90p",
        drinking_window: "2021-2028",
        notes: "Off-dry with high acidity and slate notes.",
        wine_type: "White",
        reviewer: "Emily Davis",
        review_date: "5 days ago",
        review_rating: "92p",
        review: "Refreshing and crisp! Perfect for a summer evening.",
    },
    SampleWine {
        name: "Malbec Reserva",
        producer: "Catena Zapata",
        vintage: "2018",
        grape: "Malbec",
        country: "Argentina",
        region: "Mendoza",
        quantity: "4",
        price: "25.00",
        abv: "14.0",
        location: "Rack A",
        rating: "91p",
        drinking_window: "2020-2026",
        notes: "Rich plum flavors with a hint of vanilla.",
        wine_type: "Red",
        reviewer: "Michael Brown",
        review_date: "1 day ago",
        review_rating: "90p",
        review: "Great value for money. Smooth finish and lovely aroma.",
    },
];

/// Inserts the demo user with five wines, each with one review, unless
/// any wine already exists. Returns whether anything was inserted.
pub async fn seed_demo_cellar(
    users: &dyn UserRepository,
    wines: &dyn WineRepository,
    reviews: &dyn ReviewRepository,
    hasher: &dyn PasswordHasher,
) -> Result<bool, DomainError> {
    if wines.has_any().await? {
        return Ok(false);
    }

    let user = match users.find_by_email(DEMO_EMAIL).await? {
        Some(existing) => existing,
        None => {
            let hash = hasher
                .hash(DEMO_PASSWORD)
                .map_err(|e| DomainError::database("hash demo password", e))?;
            let user = User::new(Email::from_trusted(DEMO_EMAIL), hash);
            users.create(&user).await?;
            user
        }
    };

    for sample in &SAMPLES {
        let draft = WineDraft::from_form(WineForm {
            name: sample.name.into(),
            producer: sample.producer.into(),
            vintage: sample.vintage.into(),
            grape: sample.grape.into(),
            country: sample.country.into(),
            region: sample.region.into(),
            quantity: sample.quantity.into(),
            price: sample.price.into(),
            abv: sample.abv.into(),
            location: sample.location.into(),
            rating: sample.rating.into(),
            drinking_window: sample.drinking_window.into(),
            notes: sample.notes.into(),
            wine_type: sample.wine_type.into(),
            ..Default::default()
        })?;
        let wine = Wine::create(user.id, draft, None);
        wines.create(&wine).await?;

        let review = ReviewDraft::from_form(
            ReviewForm {
                reviewer: sample.reviewer.into(),
                date: sample.review_date.into(),
                rating: sample.review_rating.into(),
                content: sample.review.into(),
                link: String::new(),
            },
            sample.review_date,
        )?;
        reviews.create(&Review::create(wine.id, review)).await?;
    }

    tracing::info!(email = DEMO_EMAIL, wines = SAMPLES.len(), "Seeded demo cellar");
    Ok(true)
}
