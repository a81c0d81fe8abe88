// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use test_log::test;

use rigmart_core::{Condition, Location, listing::ViewCount};
use rigmart_core_api::{
    filtering::Range,
    listing::search::{FilterCriteria, SortToken},
    pagination::{Endpoint, parse_pagination},
};
use rigmart_repo::listing::ListingRelations;
use uc::seller::SellerInput;

use super::*;
use crate::tests::*;

fn listings_page(page: &str, limit: &str) -> PaginationState {
    parse_pagination(Some(page), Some(limit), Endpoint::Listings.limits())
}

fn slugs(results: &SearchResults) -> Vec<&str> {
    results
        .summaries
        .iter()
        .map(|summary| summary.slug.as_str())
        .collect()
}

fn new_input(title: &str, category: &str) -> ListingInput {
    ListingInput {
        title: title.to_owned(),
        description: "Tipper with crane".to_owned(),
        category: category.to_owned(),
        brand: None,
        model: None,
        condition: Condition::Used,
        fuel_type: None,
        transmission: None,
        emission_class: None,
        price_eur: 72_500,
        year: Some(2016),
        mileage_km: None,
        location: Location {
            country_code: country_code("AT"),
            city: Some("Linz".to_owned()),
        },
        image_urls: vec![
            "https://img.example.com/front.jpg".to_owned(),
            "https://img.example.com/back.jpg".to_owned(),
        ],
    }
}

/// 25 active trucks priced between 40k and 120k, of which 21 are
/// priced within [50k, 100k].
fn twenty_five_trucks() -> TestResult<Fixture> {
    let mut fixture = Fixture::new()?;
    let seller_id = fixture.insert_seller("seller")?;
    let trucks = fixture.insert_category(None, "trucks", true)?;
    let trailers = fixture.insert_category(None, "trailers", true)?;
    let mut prices = vec![40_000, 45_000, 110_000, 120_000];
    prices.extend((0..=20).map(|k| 50_000 + 2_500 * k));
    for (index, price) in prices.into_iter().enumerate() {
        let listing = new_listing(&format!("truck-{index}"), ListingStatus::Active, price);
        fixture.insert_listing(relations(seller_id, trucks), &listing)?;
    }
    fixture.insert_listing(
        relations(seller_id, trailers),
        &new_listing("trailer", ListingStatus::Active, 75_000),
    )?;
    fixture.insert_listing(
        relations(seller_id, trucks),
        &new_listing("draft-truck", ListingStatus::Draft, 75_000),
    )?;
    Ok(fixture)
}

fn price_query() -> SearchParams {
    SearchParams {
        criteria: FilterCriteria {
            category: Some("trucks".to_owned()),
            price: Range::new(Some(50_000), Some(100_000)),
            ..Default::default()
        },
        text: None,
        sort: SortToken::parse(Some("price_asc")),
    }
}

#[test]
fn paginate_trucks_by_price() -> TestResult<()> {
    let mut fixture = twenty_five_trucks()?;
    let connection = &mut fixture.connection;
    let params = price_query();

    let first_page = search(
        connection,
        &params,
        FilterScope::Public,
        listings_page("1", "20"),
        false,
    )?;
    assert_eq!(20, first_page.summaries.len());
    assert_eq!(21, first_page.pagination.total);
    assert_eq!(2, first_page.pagination.total_pages);
    let prices: Vec<_> = first_page
        .summaries
        .iter()
        .map(|summary| summary.price_eur)
        .collect();
    assert!(prices.is_sorted());
    assert!(
        prices
            .iter()
            .all(|price| (50_000..=100_000).contains(price))
    );
    assert_eq!(Some(&50_000), prices.first());
    assert!(
        first_page
            .summaries
            .iter()
            .all(|summary| summary.status == ListingStatus::Active)
    );

    let second_page = search(
        connection,
        &params,
        FilterScope::Public,
        listings_page("2", "20"),
        false,
    )?;
    assert_eq!(1, second_page.summaries.len());
    assert_eq!(100_000, second_page.summaries[0].price_eur);
    assert_eq!(2, second_page.pagination.page);

    // Pages must not overlap
    let first_slugs = slugs(&first_page);
    assert!(!first_slugs.contains(&second_page.summaries[0].slug.as_str()));
    Ok(())
}

#[test]
fn page_beyond_last_is_empty() -> TestResult<()> {
    let mut fixture = twenty_five_trucks()?;
    let results = search(
        &mut fixture.connection,
        &price_query(),
        FilterScope::Public,
        listings_page("3", "20"),
        false,
    )?;
    assert!(results.summaries.is_empty());
    assert_eq!(21, results.pagination.total);
    Ok(())
}

#[test]
fn admin_search_with_status() -> TestResult<()> {
    let mut fixture = twenty_five_trucks()?;
    let admin_page = parse_pagination(None, None, Endpoint::AdminListings.limits());
    let results = search(
        &mut fixture.connection,
        &SearchParams::default(),
        FilterScope::Admin {
            status: Some(ListingStatus::Draft),
        },
        admin_page,
        false,
    )?;
    assert_eq!(vec!["draft-truck"], slugs(&results));
    assert_eq!(50, results.pagination.limit);
    Ok(())
}

#[test]
fn inverted_price_range_yields_no_results() -> TestResult<()> {
    let mut fixture = twenty_five_trucks()?;
    let params = SearchParams {
        criteria: FilterCriteria {
            price: Range::new(Some(100_000), Some(50_000)),
            ..Default::default()
        },
        ..Default::default()
    };
    let results = search(
        &mut fixture.connection,
        &params,
        FilterScope::Public,
        listings_page("1", "20"),
        false,
    )?;
    assert!(results.summaries.is_empty());
    assert_eq!(0, results.pagination.total);
    assert_eq!(0, results.pagination.total_pages);
    Ok(())
}

#[test]
fn category_includes_active_children_only() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let seller_id = fixture.insert_seller("seller")?;
    let trucks = fixture.insert_category(None, "trucks", true)?;
    let tractor_units = fixture.insert_category(Some(trucks), "tractor-units", true)?;
    let box_trucks = fixture.insert_category(Some(trucks), "box-trucks", true)?;
    let tippers = fixture.insert_category(Some(trucks), "tippers", false)?;
    for (slug, category_id) in [
        ("in-parent", trucks),
        ("in-tractor-units", tractor_units),
        ("in-box-trucks", box_trucks),
        ("in-tippers", tippers),
    ] {
        fixture.insert_listing(
            relations(seller_id, category_id),
            &new_listing(slug, ListingStatus::Active, 60_000),
        )?;
    }
    let params = SearchParams {
        criteria: FilterCriteria {
            category: Some("trucks".to_owned()),
            ..Default::default()
        },
        ..Default::default()
    };
    let results = search(
        &mut fixture.connection,
        &params,
        FilterScope::Public,
        listings_page("1", "20"),
        false,
    )?;
    let mut found = slugs(&results);
    found.sort_unstable();
    assert_eq!(vec!["in-box-trucks", "in-parent", "in-tractor-units"], found);
    Ok(())
}

#[test]
fn draft_detail_is_not_found_like_missing_slug() -> TestResult<()> {
    let mut fixture = twenty_five_trucks()?;
    let connection = &mut fixture.connection;
    let draft = load_visible_detail(connection, "draft-truck", &Caller::Anonymous);
    let missing = load_visible_detail(connection, "no-such-truck", &Caller::Anonymous);
    assert!(matches!(draft, Err(Error::Repository(RepoError::NotFound))));
    assert!(matches!(missing, Err(Error::Repository(RepoError::NotFound))));
    assert_eq!(
        missing.err().map(|err| err.to_string()),
        draft.err().map(|err| err.to_string())
    );
    // Visible for the owner and admins
    load_visible_detail(connection, "draft-truck", &Caller::User("seller".into()))?;
    load_visible_detail(connection, "draft-truck", &Caller::Admin("admin".into()))?;
    assert!(load_visible_detail(connection, "draft-truck", &Caller::User("other".into())).is_err());
    Ok(())
}

#[test]
fn record_views() -> TestResult<()> {
    let mut fixture = twenty_five_trucks()?;
    let connection = &mut fixture.connection;
    let view_count = |connection: &mut DbConnection| -> TestResult<ViewCount> {
        let (_, detail) = load_visible_detail(connection, "truck-0", &Caller::Anonymous)?;
        Ok(detail.summary.view_count)
    };
    let (id, _) = load_visible_detail(connection, "truck-0", &Caller::Anonymous)?;
    record_view(connection, id, true, None)?;
    record_view(connection, id, false, None)?;
    record_view(connection, id, true, Some("visitor"))?;
    assert_eq!(2, view_count(connection)?);

    let visitor = Caller::User("visitor".into());
    let history = crate::recently_viewed::load(
        connection,
        &visitor,
        parse_pagination(None, None, Endpoint::RecentlyViewed.limits()),
    )?;
    assert_eq!(vec!["truck-0"], slugs(&history));
    Ok(())
}

#[test]
fn related_listings_prefer_same_brand() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let seller_id = fixture.insert_seller("seller")?;
    let trucks = fixture.insert_category(None, "trucks", true)?;
    let vans = fixture.insert_category(None, "vans", true)?;
    let (volvo, fh16) = fixture.insert_brand_with_model("volvo", "fh16")?;
    let (daf, _) = fixture.insert_brand_with_model("daf", "xf")?;
    let with_brand = |brand_id| ListingRelations {
        brand_id: Some(brand_id),
        ..relations(seller_id, trucks)
    };
    fixture.insert_listing(
        ListingRelations {
            model_id: Some(fh16),
            ..with_brand(volvo)
        },
        &new_listing("volvo-0", ListingStatus::Active, 90_000),
    )?;
    for index in 1..=2 {
        fixture.insert_listing(
            with_brand(volvo),
            &new_listing(&format!("volvo-{index}"), ListingStatus::Active, 80_000),
        )?;
    }
    fixture.insert_listing(
        with_brand(volvo),
        &new_listing("volvo-sold", ListingStatus::Sold, 80_000),
    )?;
    for index in 0..6 {
        fixture.insert_listing(
            with_brand(daf),
            &new_listing(&format!("daf-{index}"), ListingStatus::Active, 70_000),
        )?;
    }
    fixture.insert_listing(
        relations(seller_id, vans),
        &new_listing("van", ListingStatus::Active, 30_000),
    )?;

    let related = load_related(&mut fixture.connection, "volvo-0")?;
    assert_eq!(6, related.len());
    let mut same_brand: Vec<_> = related[..2]
        .iter()
        .map(|summary| summary.slug.as_str())
        .collect();
    same_brand.sort_unstable();
    assert_eq!(vec!["volvo-1", "volvo-2"], same_brand);
    assert!(
        related[2..]
            .iter()
            .all(|summary| summary.slug.starts_with("daf-"))
    );

    assert!(matches!(
        load_related(&mut fixture.connection, "volvo-sold"),
        Err(Error::Repository(RepoError::NotFound))
    ));
    Ok(())
}

#[test]
fn listing_lifecycle() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    fixture.insert_category(None, "trucks", true)?;
    fixture.insert_brand_with_model("man", "tgs")?;
    let connection = &mut fixture.connection;
    let owner = Caller::User("owner".into());
    let other = Caller::User("other".into());
    let admin = Caller::Admin("admin".into());

    // A seller profile is required
    assert!(matches!(
        create(connection, &owner, new_input("MAN TGS 26.440", "trucks")),
        Err(Error::Forbidden)
    ));
    crate::seller::register(
        connection,
        &owner,
        SellerInput {
            display_name: "Owner".to_owned(),
            company_name: Some("Owner Trucks GmbH".to_owned()),
            country_code: country_code("AT"),
        },
    )?;
    assert!(matches!(
        create(connection, &owner, new_input("MAN TGS", "boats")),
        Err(Error::Input(_))
    ));

    let created = create(
        connection,
        &owner,
        ListingInput {
            model: Some("tgs".to_owned()),
            ..new_input("MAN TGS 26.440", "trucks")
        },
    )?;
    let slug = created.summary.slug.clone();
    assert!(slug.starts_with("man-tgs-26-440-"));
    assert_eq!(ListingStatus::Draft, created.status());
    assert_eq!(Some("man"), created.brand.as_ref().map(|brand| brand.slug.as_str()));
    assert_eq!(2, created.images.len());
    assert!(matches!(
        load_visible_detail(connection, &slug, &Caller::Anonymous),
        Err(Error::Repository(RepoError::NotFound))
    ));

    // Only the owner may edit
    assert!(matches!(
        update(connection, &other, &slug, new_input("Stolen", "trucks")),
        Err(Error::Forbidden)
    ));
    let updated = update(
        connection,
        &owner,
        &slug,
        ListingInput {
            price_eur: 69_900,
            image_urls: vec![],
            ..new_input("MAN TGS 26.440 6x4", "trucks")
        },
    )?;
    assert_eq!(slug, updated.summary.slug);
    assert_eq!(69_900, updated.summary.price_eur);
    assert!(updated.images.is_empty());

    // Sellers submit, moderators publish
    assert!(matches!(
        update_status(connection, &owner, &slug, ListingStatus::Active),
        Err(Error::Forbidden)
    ));
    update_status(connection, &owner, &slug, ListingStatus::Pending)?;
    let published = update_status(connection, &admin, &slug, ListingStatus::Active)?;
    let published_at = published.summary.published_at;
    assert!(published_at.is_some());
    let (_, visible) = load_visible_detail(connection, &slug, &Caller::Anonymous)?;
    assert_eq!("MAN TGS 26.440 6x4", visible.summary.title);

    // Publishing again keeps the original date
    update_status(connection, &owner, &slug, ListingStatus::Draft)?;
    let republished = update_status(connection, &admin, &slug, ListingStatus::Active)?;
    assert_eq!(published_at, republished.summary.published_at);

    let own = search_own(
        connection,
        &owner,
        parse_pagination(None, None, Endpoint::SellerListings.limits()),
    )?;
    assert_eq!(vec![slug.as_str()], slugs(&own));

    assert!(matches!(
        delete(connection, &other, &slug),
        Err(Error::Forbidden)
    ));
    delete(connection, &owner, &slug)?;
    assert!(matches!(
        load_visible_detail(connection, &slug, &admin),
        Err(Error::Repository(RepoError::NotFound))
    ));
    Ok(())
}
