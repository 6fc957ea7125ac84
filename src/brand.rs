//! Brands

use clap::ValueEnum;

/// Storefront brand the feed is published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Brand {
    /// Electronics and home appliances
    #[default]
    Electromatt,

    /// Natural skincare and wellness
    Serenleaf,
}

impl Brand {
    /// Fixed brand label written on every feed entry.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Electromatt => "ELECTROMATT",
            Self::Serenleaf => "Serenleaf Natural",
        }
    }

    /// Feed channel title.
    #[must_use]
    pub fn channel_title(self) -> &'static str {
        match self {
            Self::Electromatt => "ELECTROMATT - Premium Electronics & Appliances",
            Self::Serenleaf => "Serenleaf Natural - Natural Skincare & Wellness",
        }
    }

    /// Feed channel description.
    #[must_use]
    pub fn channel_description(self) -> &'static str {
        match self {
            Self::Electromatt => "Quality electronics and appliances in Kenya",
            Self::Serenleaf => "Natural skincare, oils and wellness products in Kenya",
        }
    }
}
