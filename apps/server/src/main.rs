use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use lightbnb_config::load as load_config;
use lightbnb_database::{NewProperty, NewUser, PropertySearch};
use lightbnb_runtime::{telemetry, BackendServices};
use serde::Serialize;
use tracing::info;

#[derive(Parser)]
#[command(name = "lightbnb")]
#[command(about = "Query the LightBnB database from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply schema migrations and exit
    Migrate,
    /// Seed the database with sample users, listings and stays
    SeedData,
    /// Look up a user by email or id
    User {
        #[arg(long, conflicts_with = "id", required_unless_present = "id")]
        email: Option<String>,
        #[arg(long)]
        id: Option<i64>,
    },
    /// Register a user; the password is stored as given
    AddUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// List a guest's completed reservations
    Reservations {
        guest_id: i64,
        #[arg(long)]
        limit: Option<i64>,
    },
    /// Search property listings
    Search(SearchArgs),
    /// Create a property from a JSON file
    AddProperty {
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Case-insensitive substring of the city name
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    owner_id: Option<i64>,
    /// Major currency units, e.g. 49.99
    #[arg(long)]
    minimum_price_per_night: Option<f64>,
    /// Major currency units, e.g. 49.99
    #[arg(long)]
    maximum_price_per_night: Option<f64>,
    #[arg(long)]
    minimum_rating: Option<f64>,
    #[arg(long)]
    limit: Option<i64>,
}

impl SearchArgs {
    fn to_search(&self) -> PropertySearch {
        PropertySearch {
            city: self.city.clone(),
            owner_id: self.owner_id,
            minimum_price_per_night: self.minimum_price_per_night,
            maximum_price_per_night: self.maximum_price_per_night,
            minimum_rating: self.minimum_rating,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialise tracing")?;

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let outcome = run(cli.command, &services).await;

    services.shutdown().await;
    outcome
}

async fn run(command: Commands, services: &BackendServices) -> anyhow::Result<()> {
    let gateway = &services.gateway;

    match command {
        Commands::Migrate => {
            info!("database schema is up to date");
            Ok(())
        }
        Commands::SeedData => seed_data(services).await,
        Commands::User { email, id } => {
            let user = match (email, id) {
                (Some(email), _) => gateway.find_user_by_email(&email).await,
                (None, Some(id)) => gateway.find_user_by_id(id).await,
                (None, None) => None,
            };
            print_json(&user)
        }
        Commands::AddUser {
            name,
            email,
            password,
        } => {
            let user = gateway
                .create_user(&NewUser {
                    name,
                    email,
                    password,
                })
                .await;
            print_json(&user)
        }
        Commands::Reservations { guest_id, limit } => {
            print_json(&gateway.list_reservations_for_guest(guest_id, limit).await)
        }
        Commands::Search(args) => {
            print_json(&gateway.search_properties(&args.to_search(), args.limit).await)
        }
        Commands::AddProperty { file } => {
            let contents = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            let property: NewProperty = serde_json::from_str(&contents)
                .with_context(|| format!("invalid property in {}", file.display()))?;
            print_json(&gateway.create_property(&property).await)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render result")?;
    println!("{rendered}");
    Ok(())
}

async fn seed_data(services: &BackendServices) -> anyhow::Result<()> {
    info!("seeding database with sample data");

    let gateway = &services.gateway;

    let owner = gateway
        .create_user(&NewUser {
            name: "Devin Sanders".to_string(),
            email: "tristanjacobs@gmail.com".to_string(),
            password: "$2a$10$FB/BOAVhpuLvpOREQVmvmezD4ED/.JBIDRh70tGevYzYzQgFId2u.".to_string(),
        })
        .await
        .context("failed to create sample owner (already seeded?)")?;

    let guest = gateway
        .create_user(&NewUser {
            name: "Eva Stanley".to_string(),
            email: "sebastianguerra@ymail.com".to_string(),
            password: "$2a$10$FB/BOAVhpuLvpOREQVmvmezD4ED/.JBIDRh70tGevYzYzQgFId2u.".to_string(),
        })
        .await
        .context("failed to create sample guest")?;

    let listings = [
        ("Speed lamp", "Namsub", "Quebec", 93_061, 6, 4, 8),
        ("Blank corner", "Bohbatev", "Alberta", 85_234, 6, 6, 7),
        ("Habit mix", "Genwezuj", "Newfoundland And Labrador", 46_058, 0, 5, 6),
        ("Headed know", "Jaebvap", "Ontario", 82_640, 0, 5, 5),
    ];

    let mut property_ids = Vec::with_capacity(listings.len());
    for (title, city, province, cost_per_night, parking, bathrooms, bedrooms) in listings {
        let property = gateway
            .create_property(&NewProperty {
                owner_id: owner.id,
                title: title.to_string(),
                description: "description".to_string(),
                thumbnail_photo_url: "https://images.pexels.com/photos/2086676/pexels-photo-2086676.jpeg?auto=compress&cs=tinysrgb&h=350".to_string(),
                cover_photo_url: "https://images.pexels.com/photos/2086676/pexels-photo-2086676.jpeg".to_string(),
                cost_per_night,
                street: "536 Namsub Highway".to_string(),
                city: city.to_string(),
                province: province.to_string(),
                post_code: "28142".to_string(),
                country: "Canada".to_string(),
                parking_spaces: parking,
                number_of_bathrooms: bathrooms,
                number_of_bedrooms: bedrooms,
            })
            .await
            .with_context(|| format!("failed to create sample property {title}"))?;
        info!(property_id = property.id, title, "seeded property");
        property_ids.push(property.id);
    }

    // Reservations and reviews have no write path in the gateway
    let stays = [
        ("2018-09-11", "2018-09-26", 5),
        ("2019-01-04", "2019-02-01", 4),
        ("2021-10-01", "2021-10-14", 2),
    ];

    for (&property_id, (start_date, end_date, rating)) in property_ids.iter().zip(stays) {
        let reservation_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO reservations (guest_id, property_id, start_date, end_date)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(guest.id)
        .bind(property_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(&services.db_pool)
        .await
        .context("failed to insert sample reservation")?;

        sqlx::query(
            r#"
            INSERT INTO property_reviews (guest_id, property_id, reservation_id, rating, message)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(guest.id)
        .bind(property_id)
        .bind(reservation_id)
        .bind(rating)
        .bind("messages")
        .execute(&services.db_pool)
        .await
        .context("failed to insert sample review")?;
    }

    println!("Database seeded:");
    println!("- owner {} <{}> (id {})", owner.name, owner.email, owner.id);
    println!("- guest {} <{}> (id {})", guest.name, guest.email, guest.id);
    println!("- {} properties", property_ids.len());
    println!("- {} past reservations with reviews", stays.len());

    Ok(())
}
