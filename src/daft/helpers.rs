use crate::config::Config;

pub const PAGE_SIZE: usize = 20;

pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Query parameters for one page of a region search. Pages start at 1.
pub fn create_search_params(config: &Config, page: u32) -> Vec<(&'static str, String)> {
    let offset = (page.saturating_sub(1) as usize) * PAGE_SIZE;
    let mut params = vec![
        ("sort", String::from("publishDateDesc")),
        ("pageSize", PAGE_SIZE.to_string()),
        ("from", offset.to_string()),
        ("salePrice_from", config.minimum_price.to_string()),
        ("salePrice_to", config.maximum_price.to_string()),
    ];
    if config.minimum_bedrooms > 0 {
        params.push(("numBeds_from", config.minimum_bedrooms.to_string()));
    }
    if config.minimum_bathrooms > 0 {
        params.push(("numBaths_from", config.minimum_bathrooms.to_string()));
    }
    params
}
