use super::active;
use aggregate_fetch::RestResource;
use serde::{Deserialize, Serialize};

id_type!(
    /// Identifier of a [`BusinessListing`].
    ListingId
);
id_type!(
    /// Identifier of a [`ServiceReview`].
    ReviewId
);

/// An installer or dealer entry in the business list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BusinessListing {
    pub id: ListingId,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default = "active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingUpsert {
    pub name: String,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

impl RestResource for BusinessListing {
    type Id = ListingId;
    type Create = ListingUpsert;
    type Update = ListingUpsert;
    const PATH: &'static str = "business-lists";
}

/// A customer testimonial for a service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceReview {
    pub id: ReviewId,
    pub customer_name: String,
    #[serde(default)]
    pub service: Option<String>,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default = "active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewUpsert {
    pub customer_name: String,
    pub service: Option<String>,
    pub rating: u8,
    pub comment: String,
}

impl RestResource for ServiceReview {
    type Id = ReviewId;
    type Create = ReviewUpsert;
    type Update = ReviewUpsert;
    const PATH: &'static str = "service-reviews";
}
