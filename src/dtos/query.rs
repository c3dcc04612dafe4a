//! Query DTOs - Query string parameters of the search endpoint

use crate::core::AppError;
use crate::repositories::BreedFilter;
use serde::{Deserialize, Serialize};

/// Raw query parameters of `GET /v1/breeds/search`.
///
/// Weights are kept as strings so that a malformed value can be reported
/// with the name of the offending parameter.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct BreedSearchQuery {
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default, rename = "minWeight")]
    pub min_weight: Option<String>,
    #[serde(default, rename = "maxWeight")]
    pub max_weight: Option<String>,
}

// an empty value is treated as if the parameter was not sent
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_weight(value: Option<&str>, invalid: &'static str) -> Result<Option<i32>, AppError> {
    value
        .map(|v| v.parse::<i32>().map_err(|_| AppError::bad_request(invalid)))
        .transpose()
}

impl TryFrom<BreedSearchQuery> for BreedFilter {
    type Error = AppError;

    fn try_from(query: BreedSearchQuery) -> Result<Self, Self::Error> {
        let species = non_empty(query.species);
        let min_weight_raw = non_empty(query.min_weight);
        let max_weight_raw = non_empty(query.max_weight);

        let min_weight = parse_weight(min_weight_raw.as_deref(), "Invalid minWeight")?;
        let max_weight = parse_weight(max_weight_raw.as_deref(), "Invalid maxWeight")?;

        if species.is_none() && min_weight.is_none() && max_weight.is_none() {
            return Err(AppError::bad_request(
                "At least one parameter (species, minWeight, or maxWeight) is required",
            ));
        }

        Ok(BreedFilter {
            species,
            min_weight,
            max_weight,
        })
    }
}
