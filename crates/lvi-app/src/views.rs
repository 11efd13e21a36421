//! Built-in LVI view registry
//!
//! Queries target the SQLite layout written by [`crate::sample`]:
//! `brand_scores`, `brand_locations` and `brand_platforms`, all keyed by
//! `brand_id`.

use lvi_core::data::{QueryHandle, ViewDescriptor};

/// Brands with fewer US locations are not enterprise brands
pub const ENTERPRISE_MIN_LOCATIONS: u32 = 500;

/// Rows kept per ranked view
pub const TOP_N: u32 = 100;

const OVERALL_SQL: &str = "
    WITH top_ranks AS (
        SELECT
            brand_id,
            ROW_NUMBER() OVER (ORDER BY ranking_value DESC) AS rank
        FROM brand_scores
        ORDER BY rank
        LIMIT 100
    )
    SELECT
        tr.rank AS rank,
        s.*,
        p.platform_a,
        p.platform_b
    FROM top_ranks tr
    LEFT JOIN brand_scores s
      ON tr.brand_id = s.brand_id
    LEFT JOIN brand_platforms p
      ON tr.brand_id = p.brand_id
    ORDER BY tr.rank
";

const ENTERPRISE_COLUMNS: &str = "
            s.brand_id,
            s.brandname,
            s.category,
            s.child_category,
            m.total_us_locations,
            s.optimization_score,
            s.performance_score,
            s.search_score,
            s.reputation_score,
            s.social_score,
            s.ai_overall_score,
            s.ranking_value,
            p.platform_a,
            p.platform_b";

const ENTERPRISE_AI_COLUMNS: &str = "
            s.brand_id,
            s.brandname,
            s.category,
            s.child_category,
            m.total_us_locations,
            p.platform_a,
            p.platform_b,
            s.ai_overall_score,
            s.optimization_score,
            s.performance_score,
            s.search_score,
            s.reputation_score,
            s.social_score,
            s.ranking_value";

const CATEGORY_COLUMNS: &str = "
            s.*,
            m.total_us_locations,
            p.platform_a,
            p.platform_b";

/// Enterprise brands ranked by `ranking_value`, optionally limited to
/// categories starting with `category_prefix`
fn enterprise_sql(columns: &str, category_prefix: Option<&str>) -> String {
    let category_filter = match category_prefix {
        Some(prefix) => format!("s.category LIKE '{}%'\n          AND ", prefix.replace('\'', "''")),
        None => String::new(),
    };

    format!(
        "
    WITH base AS (
        SELECT{columns}
        FROM brand_scores s
        JOIN brand_locations m
          ON s.brand_id = m.brand_id
        LEFT JOIN brand_platforms p
          ON s.brand_id = p.brand_id
        WHERE {category_filter}m.total_us_locations >= {min_locations}
    ),
    ranked AS (
        SELECT
            ROW_NUMBER() OVER (ORDER BY ranking_value DESC) AS rank,
            *
        FROM base
    )
    SELECT *
    FROM ranked
    WHERE rank <= {top_n}
    ORDER BY rank
",
        columns = columns,
        category_filter = category_filter,
        min_locations = ENTERPRISE_MIN_LOCATIONS,
        top_n = TOP_N,
    )
}

/// The six dashboard views in navigation order; the first is the default
pub fn builtin_views() -> Vec<ViewDescriptor> {
    vec![
        ViewDescriptor::new("Top 100 Brands Overall", QueryHandle::new(OVERALL_SQL))
            .with_fixed_metric("optimization_score", "Optimization Score"),
        ViewDescriptor::new(
            "Top 100 Enterprise Brands",
            QueryHandle::new(enterprise_sql(ENTERPRISE_COLUMNS, None)),
        ),
        ViewDescriptor::new(
            "Top 100 Enterprise AI Brands",
            QueryHandle::new(enterprise_sql(ENTERPRISE_AI_COLUMNS, None)),
        ),
        ViewDescriptor::new(
            "Top 100 Enterprise Food Brands",
            QueryHandle::new(enterprise_sql(CATEGORY_COLUMNS, Some("Food"))),
        ),
        ViewDescriptor::new(
            "Top 100 Enterprise Retail Brands",
            QueryHandle::new(enterprise_sql(CATEGORY_COLUMNS, Some("Retail"))),
        ),
        ViewDescriptor::new(
            "Top 100 Enterprise Financial Services Brands",
            QueryHandle::new(enterprise_sql(CATEGORY_COLUMNS, Some("Fin"))),
        ),
    ]
}
