//! # Landing Page Sections
//!
//! The landing page is assembled from independent sections, each backed by its
//! own endpoint. [`LandingSection`] is the single place that knows a section's
//! key, default endpoint and cardinality; [`registry`] and [`requests`] are
//! derived from it.
//!
//! [`LandingView`] turns a settled [`AggregateResult`] into typed sections. A
//! section whose request failed is [`Section::Unavailable`]; the rest of the
//! page renders regardless.

use aggregate_fetch::{AggregateResult, Cardinality, FetchError, RequestDescriptor, RequestSet, ResourceRegistry};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use tracing::warn;

use crate::model::{About, BusinessListing, Hero, Highlight, Product, ServiceReview, SiteSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandingSection {
    Hero,
    About,
    WhatWeDo,
    Products,
    Services,
    BusinessList,
    ServiceReviews,
    Settings,
}

impl LandingSection {
    pub const ALL: [LandingSection; 8] = [
        LandingSection::Hero,
        LandingSection::About,
        LandingSection::WhatWeDo,
        LandingSection::Products,
        LandingSection::Services,
        LandingSection::BusinessList,
        LandingSection::ServiceReviews,
        LandingSection::Settings,
    ];

    pub fn key(self) -> &'static str {
        match self {
            LandingSection::Hero => "hero",
            LandingSection::About => "about",
            LandingSection::WhatWeDo => "whatWeDo",
            LandingSection::Products => "products",
            LandingSection::Services => "services",
            LandingSection::BusinessList => "businessList",
            LandingSection::ServiceReviews => "serviceReviews",
            LandingSection::Settings => "settings",
        }
    }

    pub fn default_endpoint(self) -> &'static str {
        match self {
            LandingSection::Hero => "/hero",
            LandingSection::About => "/about",
            LandingSection::WhatWeDo => "/what-we-do",
            LandingSection::Products => "/products",
            LandingSection::Services => "/services",
            LandingSection::BusinessList => "/business-lists",
            LandingSection::ServiceReviews => "/service-reviews",
            LandingSection::Settings => "/site-settings",
        }
    }

    pub fn cardinality(self) -> Cardinality {
        match self {
            LandingSection::Hero | LandingSection::About | LandingSection::Settings => Cardinality::Singular,
            LandingSection::WhatWeDo
            | LandingSection::Products
            | LandingSection::Services
            | LandingSection::BusinessList
            | LandingSection::ServiceReviews => Cardinality::Plural,
        }
    }
}

/// Cardinality of every landing section.
pub fn registry() -> ResourceRegistry {
    LandingSection::ALL
        .iter()
        .map(|section| (section.key(), section.cardinality()))
        .collect()
}

/// One request per landing section, with `overrides` (keyed by section key)
/// replacing default endpoints.
pub fn requests(overrides: &BTreeMap<String, String>) -> Result<RequestSet, FetchError> {
    let descriptors = LandingSection::ALL
        .iter()
        .map(|section| {
            let endpoint = overrides
                .get(section.key())
                .map(String::as_str)
                .unwrap_or(section.default_endpoint());
            RequestDescriptor::new(section.key(), endpoint)
        })
        .collect::<Vec<_>>();
    RequestSet::try_from(descriptors)
}

/// The render state of one section.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Ready(T),
    /// The request failed or was not part of the fetch.
    Unavailable,
    /// The request succeeded but the payload did not fit the section type.
    Malformed,
}

impl<T> Section<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Section::Ready(_))
    }
}

/// Typed view of a landing page fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct LandingView {
    pub hero: Section<Option<Hero>>,
    pub about: Section<Option<About>>,
    pub what_we_do: Section<Vec<Highlight>>,
    pub products: Section<Vec<Product>>,
    pub services: Section<Vec<Highlight>>,
    pub business_list: Section<Vec<BusinessListing>>,
    pub service_reviews: Section<Vec<ServiceReview>>,
    pub settings: Section<Option<SiteSettings>>,
}

impl LandingView {
    pub fn from_result(result: &AggregateResult) -> Self {
        Self {
            hero: section(result, LandingSection::Hero),
            about: section(result, LandingSection::About),
            what_we_do: section(result, LandingSection::WhatWeDo),
            products: section(result, LandingSection::Products),
            services: section(result, LandingSection::Services),
            business_list: section(result, LandingSection::BusinessList),
            service_reviews: section(result, LandingSection::ServiceReviews),
            settings: section(result, LandingSection::Settings),
        }
    }

    /// Keys of sections that cannot be rendered, in page order.
    pub fn missing(&self) -> Vec<&'static str> {
        let available = [
            (LandingSection::Hero, self.hero.is_available()),
            (LandingSection::About, self.about.is_available()),
            (LandingSection::WhatWeDo, self.what_we_do.is_available()),
            (LandingSection::Products, self.products.is_available()),
            (LandingSection::Services, self.services.is_available()),
            (LandingSection::BusinessList, self.business_list.is_available()),
            (LandingSection::ServiceReviews, self.service_reviews.is_available()),
            (LandingSection::Settings, self.settings.is_available()),
        ];
        available
            .into_iter()
            .filter(|(_, ok)| !ok)
            .map(|(section, _)| section.key())
            .collect()
    }
}

fn section<T: DeserializeOwned>(result: &AggregateResult, section: LandingSection) -> Section<T> {
    let Some(value) = result.get(section.key()) else {
        return Section::Unavailable;
    };
    match value.decode() {
        Ok(decoded) => Section::Ready(decoded),
        Err(error) => {
            warn!(key = section.key(), %error, "Section payload does not match");
            Section::Malformed
        }
    }
}
