use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DatasetError;

/// A spectral band of a 38-Cloud scene patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Red,
    Green,
    Blue,
    Nir,
}

pub const SPECTRAL_BANDS: [Band; 4] = [Band::Red, Band::Green, Band::Blue, Band::Nir];
pub const RGB_BANDS: [Band; 3] = [Band::Red, Band::Green, Band::Blue];

impl Band {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Nir => "nir",
        }
    }

    /// Folder holding this band's training patches.
    pub fn folder(&self) -> &'static str {
        match self {
            Self::Red => "train_red",
            Self::Green => "train_green",
            Self::Blue => "train_blue",
            Self::Nir => "train_nir",
        }
    }

    /// Parses a list of band names, rejecting unknown names and empty lists.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<Self>, DatasetError> {
        if names.is_empty() {
            return Err(DatasetError::InvalidBands("no bands were selected".to_string()));
        }
        names.iter().map(|name| name.as_ref().parse()).collect()
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Band {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SPECTRAL_BANDS
            .into_iter()
            .find(|band| band.name() == s)
            .ok_or_else(|| DatasetError::InvalidBands(format!("unknown band {s:?}, expected one of red, green, blue, nir")))
    }
}
