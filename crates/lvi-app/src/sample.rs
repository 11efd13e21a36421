//! Create a sample SQLite database with LVI demo data

use std::path::Path;

use rusqlite::{params, Connection, Result};
use tracing::info;

/// Brands written when no count is given
pub const DEFAULT_SAMPLE_BRANDS: usize = 400;

const CATEGORIES: &[(&str, &[&str])] = &[
    ("Food & Beverage", &["Quick Service", "Casual Dining", "Coffee"]),
    ("Retail", &["Apparel", "Grocery", "Home Improvement"]),
    ("Financial Services", &["Banking", "Insurance", "Tax Preparation"]),
    ("Health", &["Pharmacy", "Urgent Care"]),
    ("Automotive", &["Auto Parts", "Car Wash"]),
];

const PLATFORMS: &[&str] = &["Yelp", "Google", "Facebook", "Apple Maps", "Bing", "Foursquare"];

const NAME_PREFIXES: &[&str] = &[
    "Blue", "Golden", "Summit", "Urban", "Prairie", "Harbor", "Maple", "Granite", "Sunrise", "Liberty",
];

const NAME_SUFFIXES: &[&str] = &[
    "Grill", "Market", "Outfitters", "Bank", "Pharmacy", "Motors", "Coffee", "Supply", "Mutual", "Depot",
];

/// Create (or replace) the three LVI tables at `path`
pub fn create_sample_database<P: AsRef<Path>>(path: P, brands: usize) -> Result<()> {
    let mut conn = Connection::open(path.as_ref())?;

    conn.execute_batch(
        "
        DROP TABLE IF EXISTS brand_scores;
        DROP TABLE IF EXISTS brand_locations;
        DROP TABLE IF EXISTS brand_platforms;

        -- Per-brand scores
        CREATE TABLE brand_scores (
            brand_id INTEGER PRIMARY KEY,
            brandname TEXT NOT NULL,
            category TEXT,
            child_category TEXT,
            optimization_score REAL,
            performance_score REAL,
            search_score REAL,
            reputation_score REAL,
            social_score REAL,
            ai_overall_score REAL,
            ranking_value REAL
        );

        -- National US location counts
        CREATE TABLE brand_locations (
            brand_id INTEGER PRIMARY KEY,
            total_us_locations INTEGER NOT NULL
        );

        -- Primary and secondary listing platforms
        CREATE TABLE brand_platforms (
            brand_id INTEGER PRIMARY KEY,
            platform_a TEXT,
            platform_b TEXT
        );
        ",
    )?;

    let tx = conn.transaction()?;
    generate_brands(&tx, brands)?;
    tx.commit()?;

    conn.execute_batch(
        "
        CREATE INDEX IF NOT EXISTS idx_scores_category ON brand_scores(category);
        CREATE INDEX IF NOT EXISTS idx_scores_ranking ON brand_scores(ranking_value);
        ",
    )?;

    info!("Sample database with {} brands written to {}", brands, path.as_ref().display());
    Ok(())
}

fn generate_brands(conn: &Connection, brands: usize) -> Result<()> {
    let mut scores = conn.prepare(
        "INSERT INTO brand_scores (brand_id, brandname, category, child_category, optimization_score,
                                   performance_score, search_score, reputation_score, social_score,
                                   ai_overall_score, ranking_value)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
    )?;
    let mut locations = conn.prepare("INSERT INTO brand_locations (brand_id, total_us_locations) VALUES (?1, ?2)")?;
    let mut platforms =
        conn.prepare("INSERT INTO brand_platforms (brand_id, platform_a, platform_b) VALUES (?1, ?2, ?3)")?;

    let mut rng = 2026u32;

    for i in 0..brands {
        let brand_id = i as i64 + 1;
        let name = format!(
            "{} {} {}",
            NAME_PREFIXES[random_int(&mut rng) as usize % NAME_PREFIXES.len()],
            NAME_SUFFIXES[random_int(&mut rng) as usize % NAME_SUFFIXES.len()],
            brand_id
        );

        let (category, children) = CATEGORIES[random_int(&mut rng) as usize % CATEGORIES.len()];
        let child_category = children[random_int(&mut rng) as usize % children.len()];

        let optimization = score(&mut rng, 30.0, 70.0);
        let performance = score(&mut rng, 20.0, 80.0);
        let search = score(&mut rng, 10.0, 90.0);
        let reputation = score(&mut rng, 25.0, 75.0);
        let social = score(&mut rng, 0.0, 100.0);
        // AI visibility loosely tracks optimization
        let ai_overall = round3((optimization * 0.6 + score(&mut rng, 0.0, 40.0)).min(100.0));
        let ranking = round3(
            optimization * 0.3 + performance * 0.2 + search * 0.15 + reputation * 0.15 + social * 0.05 + ai_overall * 0.15,
        );

        scores.execute(params![
            brand_id,
            name,
            category,
            child_category,
            optimization,
            performance,
            search,
            reputation,
            social,
            ai_overall,
            ranking,
        ])?;

        // Skewed so roughly half the brands clear the enterprise cutoff
        let total_locations = (random_float(&mut rng).powi(2) * 4_000.0) as i64 + 50;
        locations.execute(params![brand_id, total_locations])?;

        platforms.execute(params![brand_id, platform(&mut rng), platform(&mut rng)])?;
    }

    Ok(())
}

/// A platform name, or a blank / missing entry now and then
fn platform(rng: &mut u32) -> Option<String> {
    let roll = random_float(rng);
    if roll < 0.08 {
        None
    } else if roll < 0.12 {
        Some("  ".to_string())
    } else {
        Some(PLATFORMS[random_int(rng) as usize % PLATFORMS.len()].to_string())
    }
}

fn score(rng: &mut u32, low: f64, high: f64) -> f64 {
    round3(low + random_float(rng) * (high - low))
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn random_float(seed: &mut u32) -> f64 {
    *seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
    (*seed as f64) / (u32::MAX as f64)
}

fn random_int(seed: &mut u32) -> u32 {
    *seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
    *seed
}
