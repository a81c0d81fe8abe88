// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::{
    Condition, EmissionClass, FuelType, Listing, ListingImage, ListingStatus, Location,
    Transmission,
    listing::{MileageKm, ModelYear, PriceEur},
    util::{clock::UtcDateTimeMs, slug::slugify_unique},
};
use rigmart_core_api::listing::projection::ListingDetail;
use rigmart_repo::{
    catalog::{BrandRepo, CategoryRepo, ModelRepo},
    listing::{EntityRepo as ListingRepo, ListingRelations},
};

use super::*;

pub const TITLE_MAX_LEN: usize = 200;

pub const IMAGES_MAX_COUNT: usize = 30;

pub const MODEL_YEAR_MIN: ModelYear = 1900;

pub const MODEL_YEAR_MAX: ModelYear = 2100;

/// Editable fields of a listing.
///
/// Relations are referenced by slug. Images are given in display
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingInput {
    pub title: String,
    pub description: String,
    pub category: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub condition: Condition,
    pub fuel_type: Option<FuelType>,
    pub transmission: Option<Transmission>,
    pub emission_class: Option<EmissionClass>,
    pub price_eur: PriceEur,
    pub year: Option<ModelYear>,
    pub mileage_km: Option<MileageKm>,
    pub location: Location,
    pub image_urls: Vec<String>,
}

#[derive(Debug)]
pub struct ValidatedInput(ListingInput);

pub fn validate_input(mut input: ListingInput) -> InputResult<ValidatedInput> {
    input.title = input.title.trim().to_owned();
    if input.title.is_empty() {
        return Err(anyhow::anyhow!("Missing title").into());
    }
    if input.title.chars().count() > TITLE_MAX_LEN {
        return Err(anyhow::anyhow!("Title exceeds {TITLE_MAX_LEN} characters").into());
    }
    if input.price_eur < 0 {
        return Err(anyhow::anyhow!("Negative price: {}", input.price_eur).into());
    }
    if let Some(year) = input
        .year
        .filter(|year| !(MODEL_YEAR_MIN..=MODEL_YEAR_MAX).contains(year))
    {
        return Err(anyhow::anyhow!("Implausible model year: {year}").into());
    }
    if let Some(mileage_km) = input.mileage_km.filter(|mileage_km| *mileage_km < 0) {
        return Err(anyhow::anyhow!("Negative mileage: {mileage_km}").into());
    }
    if input.image_urls.len() > IMAGES_MAX_COUNT {
        return Err(anyhow::anyhow!("More than {IMAGES_MAX_COUNT} images").into());
    }
    if input.image_urls.iter().any(|url| url.trim().is_empty()) {
        return Err(anyhow::anyhow!("Empty image URL").into());
    }
    Ok(ValidatedInput(input))
}

fn resolve_relations<Repo>(
    repo: &mut Repo,
    seller_id: SellerId,
    input: &ListingInput,
) -> Result<ListingRelations>
where
    Repo: CategoryRepo + BrandRepo + ModelRepo,
{
    let category_id = repo
        .resolve_category_id(&input.category)
        .optional()?
        .ok_or_else(|| InputError(anyhow::anyhow!("Unknown category: {}", input.category)))?;
    let mut brand_id = if let Some(slug) = &input.brand {
        let brand_id = repo
            .resolve_brand_id(slug)
            .optional()?
            .ok_or_else(|| InputError(anyhow::anyhow!("Unknown brand: {slug}")))?;
        Some(brand_id)
    } else {
        None
    };
    let model_id = if let Some(slug) = &input.model {
        let (model_brand_id, model_id) = repo
            .resolve_model_id(slug)
            .optional()?
            .ok_or_else(|| InputError(anyhow::anyhow!("Unknown model: {slug}")))?;
        if brand_id.is_some_and(|brand_id| brand_id != model_brand_id) {
            return Err(InputError(anyhow::anyhow!("Model {slug} belongs to a different brand")).into());
        }
        brand_id = Some(model_brand_id);
        Some(model_id)
    } else {
        None
    };
    Ok(ListingRelations {
        seller_id,
        category_id,
        brand_id,
        model_id,
    })
}

fn images_from_urls(urls: &[String]) -> Vec<ListingImage> {
    urls.iter()
        .zip(0..)
        .map(|(url, position)| ListingImage {
            url: url.trim().to_owned(),
            position,
        })
        .collect()
}

fn listing_from_input(
    input: ListingInput,
    slug: String,
    status: ListingStatus,
    published_at: Option<UtcDateTimeMs>,
) -> (Listing, Vec<ListingImage>) {
    let ListingInput {
        title,
        description,
        category: _,
        brand: _,
        model: _,
        condition,
        fuel_type,
        transmission,
        emission_class,
        price_eur,
        year,
        mileage_km,
        location,
        image_urls,
    } = input;
    let listing = Listing {
        slug,
        title,
        description,
        status,
        condition,
        fuel_type,
        transmission,
        emission_class,
        price_eur,
        year,
        mileage_km,
        location,
        published_at,
    };
    let images = images_from_urls(&image_urls);
    (listing, images)
}

/// Create a new draft listing for the caller's seller profile.
pub fn create<Repo>(
    repo: &mut Repo,
    caller: &Caller,
    input: ListingInput,
    created_at: UtcDateTimeMs,
) -> Result<ListingDetail>
where
    Repo: SellerRepo + CategoryRepo + BrandRepo + ModelRepo + ListingRepo,
{
    let seller_id = resolve_caller_seller_id(repo, caller)?;
    let ValidatedInput(input) = validate_input(input)?;
    let relations = resolve_relations(repo, seller_id, &input)?;
    let slug = slugify_unique(&input.title);
    let (listing, images) = listing_from_input(input, slug, ListingStatus::Draft, None);
    let id = repo.insert_listing(created_at, &relations, &listing)?;
    repo.replace_listing_images(id, &images)?;
    log::info!("Created listing {slug}", slug = listing.slug);
    repo.load_listing_detail(id).map_err(Into::into)
}

/// Replace the editable fields of a listing.
///
/// The slug, the status, and the publication date are preserved.
pub fn update<Repo>(
    repo: &mut Repo,
    caller: &Caller,
    slug: &str,
    input: ListingInput,
    updated_at: UtcDateTimeMs,
) -> Result<ListingDetail>
where
    Repo: SellerRepo + CategoryRepo + BrandRepo + ModelRepo + ListingRepo,
{
    let id = repo.resolve_listing_id(slug)?;
    let record = repo.load_listing(id)?;
    let seller_id = record.relations.seller_id;
    authorize_seller_access(repo, caller, seller_id)?;
    let ValidatedInput(input) = validate_input(input)?;
    let relations = resolve_relations(repo, seller_id, &input)?;
    let Listing {
        slug: listing_slug,
        status,
        published_at,
        ..
    } = record.listing;
    let (listing, images) = listing_from_input(input, listing_slug, status, published_at);
    repo.update_listing(id, updated_at, &relations, &listing)?;
    repo.replace_listing_images(id, &images)?;
    log::info!("Updated listing {slug}");
    repo.load_listing_detail(id).map_err(Into::into)
}

/// Status transitions that sellers may perform on their own listings.
///
/// Publishing and rejecting is reserved for moderators.
#[must_use]
pub const fn is_seller_status(status: ListingStatus) -> bool {
    matches!(
        status,
        ListingStatus::Draft | ListingStatus::Pending | ListingStatus::Sold
    )
}

/// Change the status of a listing.
///
/// The first transition into [`ListingStatus::Active`] stamps the
/// publication date.
pub fn update_status<Repo>(
    repo: &mut Repo,
    caller: &Caller,
    slug: &str,
    status: ListingStatus,
    updated_at: UtcDateTimeMs,
) -> Result<ListingDetail>
where
    Repo: SellerRepo + ListingRepo,
{
    let id = repo.resolve_listing_id(slug)?;
    let record = repo.load_listing(id)?;
    authorize_seller_access(repo, caller, record.relations.seller_id)?;
    if !caller.is_admin() && !is_seller_status(status) {
        log::debug!("Sellers must not change the status to {status}");
        return Err(Error::Forbidden);
    }
    let published_at = if status == ListingStatus::Active {
        record.listing.published_at.or(Some(updated_at))
    } else {
        record.listing.published_at
    };
    repo.update_listing_status(id, updated_at, status, published_at)?;
    log::info!(
        "Changed status of listing {slug} from {old_status} to {status}",
        old_status = record.listing.status
    );
    repo.load_listing_detail(id).map_err(Into::into)
}

/// Soft delete a listing.
pub fn delete<Repo>(
    repo: &mut Repo,
    caller: &Caller,
    slug: &str,
    deleted_at: UtcDateTimeMs,
) -> Result<()>
where
    Repo: SellerRepo + ListingRepo,
{
    let id = repo.resolve_listing_id(slug)?;
    let record = repo.load_listing(id)?;
    authorize_seller_access(repo, caller, record.relations.seller_id)?;
    repo.mark_listing_deleted(id, deleted_at)?;
    log::info!("Deleted listing {slug}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use rigmart_core::listing::CountryCode;
    use test_log::test;

    use super::*;

    fn new_input() -> ListingInput {
        ListingInput {
            title: "  Scania R 450  ".into(),
            description: "Well maintained".into(),
            category: "trucks".into(),
            brand: None,
            model: None,
            condition: Condition::Used,
            fuel_type: Some(FuelType::Diesel),
            transmission: None,
            emission_class: None,
            price_eur: 55_000,
            year: Some(2017),
            mileage_km: Some(610_000),
            location: Location {
                country_code: CountryCode::parse("NL").unwrap(),
                city: None,
            },
            image_urls: vec!["https://img.example.com/1.jpg".into()],
        }
    }

    #[test]
    fn trim_title() {
        let ValidatedInput(input) = validate_input(new_input()).unwrap();
        assert_eq!("Scania R 450", input.title);
    }

    #[test]
    fn reject_invalid_input() {
        let invalid_inputs = [
            ListingInput {
                title: " ".into(),
                ..new_input()
            },
            ListingInput {
                title: "x".repeat(TITLE_MAX_LEN + 1),
                ..new_input()
            },
            ListingInput {
                price_eur: -1,
                ..new_input()
            },
            ListingInput {
                year: Some(MODEL_YEAR_MIN - 1),
                ..new_input()
            },
            ListingInput {
                mileage_km: Some(-1),
                ..new_input()
            },
            ListingInput {
                image_urls: vec![String::new()],
                ..new_input()
            },
            ListingInput {
                image_urls: vec!["https://img.example.com/1.jpg".into(); IMAGES_MAX_COUNT + 1],
                ..new_input()
            },
        ];
        for input in invalid_inputs {
            assert!(validate_input(input).is_err());
        }
    }

    #[test]
    fn listing_from_validated_input() {
        let published_at = UtcDateTimeMs::from_unix_timestamp_millis(1_700_000_000_000);
        let ValidatedInput(input) = validate_input(new_input()).unwrap();
        let (merged, images) = listing_from_input(
            input,
            "scania-r-450-abc123".into(),
            ListingStatus::Active,
            Some(published_at),
        );
        assert_eq!("scania-r-450-abc123", merged.slug);
        assert_eq!(ListingStatus::Active, merged.status);
        assert_eq!(Some(published_at), merged.published_at);
        assert_eq!("Scania R 450", merged.title);
        assert_eq!(55_000, merged.price_eur);
        assert_eq!(
            vec![ListingImage {
                url: "https://img.example.com/1.jpg".into(),
                position: 0,
            }],
            images
        );
    }

    #[test]
    fn sellers_must_not_publish_or_reject() {
        assert!(is_seller_status(ListingStatus::Pending));
        assert!(is_seller_status(ListingStatus::Sold));
        assert!(!is_seller_status(ListingStatus::Active));
        assert!(!is_seller_status(ListingStatus::Rejected));
    }
}
