//! Color utilities for plots

/// Categorical palette, as CSS hex strings
const PALETTE: &[&str] = &[
    "#6496fa", // Blue
    "#fa9664", // Orange
    "#96fa64", // Green
    "#fa6496", // Pink
    "#9664fa", // Purple
    "#fafa64", // Yellow
    "#64fafa", // Cyan
    "#fa6464", // Red
];

/// Get a categorical color from the palette
pub fn categorical_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Pair each category with a palette color, in the order given
pub fn assign_palette<I, S>(categories: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    categories
        .into_iter()
        .enumerate()
        .map(|(idx, category)| (category.into(), categorical_color(idx).to_string()))
        .collect()
}
