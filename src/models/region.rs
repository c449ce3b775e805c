use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Countries offered in the region selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    #[default]
    India,
    UnitedStates,
    UnitedKingdom,
    Canada,
    Germany,
    France,
    Australia,
    Japan,
    Brazil,
}

impl Region {
    /// Selector order
    pub const ALL: [Region; 9] = [
        Region::India,
        Region::UnitedStates,
        Region::UnitedKingdom,
        Region::Canada,
        Region::Germany,
        Region::France,
        Region::Australia,
        Region::Japan,
        Region::Brazil,
    ];

    /// Two-letter code used by both the search and trends providers
    pub fn code(&self) -> &'static str {
        match self {
            Region::India => "IN",
            Region::UnitedStates => "US",
            Region::UnitedKingdom => "GB",
            Region::Canada => "CA",
            Region::Germany => "DE",
            Region::France => "FR",
            Region::Australia => "AU",
            Region::Japan => "JP",
            Region::Brazil => "BR",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Region::India => "India",
            Region::UnitedStates => "United States",
            Region::UnitedKingdom => "United Kingdom",
            Region::Canada => "Canada",
            Region::Germany => "Germany",
            Region::France => "France",
            Region::Australia => "Australia",
            Region::Japan => "Japan",
            Region::Brazil => "Brazil",
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            Region::India => "🇮🇳",
            Region::UnitedStates => "🇺🇸",
            Region::UnitedKingdom => "🇬🇧",
            Region::Canada => "🇨🇦",
            Region::Germany => "🇩🇪",
            Region::France => "🇫🇷",
            Region::Australia => "🇦🇺",
            Region::Japan => "🇯🇵",
            Region::Brazil => "🇧🇷",
        }
    }

    pub fn label(&self) -> String {
        format!("{} {}", self.name(), self.flag())
    }
}

impl FromStr for Region {
    type Err = AppError;

    /// Accepts the code, the name, or the flagged label, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Region::ALL
            .into_iter()
            .find(|r| {
                needle.eq_ignore_ascii_case(r.code())
                    || needle.eq_ignore_ascii_case(r.name())
                    || needle.eq_ignore_ascii_case(&r.label())
            })
            .ok_or_else(|| AppError::Validation(format!("Unknown region: {}", needle)))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Region entry for the API
#[derive(Debug, Serialize, Clone)]
pub struct RegionResponse {
    pub code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
    pub label: String,
}

impl From<Region> for RegionResponse {
    fn from(region: Region) -> Self {
        Self {
            code: region.code(),
            name: region.name(),
            flag: region.flag(),
            label: region.label(),
        }
    }
}

/// Parse an optional region parameter, falling back to the default selection
pub fn parse_region(raw: Option<&str>) -> Result<Region, AppError> {
    match raw {
        Some(s) if !s.trim().is_empty() => s.parse(),
        _ => Ok(Region::default()),
    }
}
