// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use test_log::test;

use rigmart_core::{Brand, Model};
use rigmart_repo::{
    catalog::{BrandRepo as _, CategoryRepo as _, ModelRepo as _},
    prelude::RepoError,
};

use crate::{
    repo::tests::{Fixture, insert_category},
    tests::*,
};

#[test]
fn resolve_active_child_categories() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = fixture.connection();

    let trucks = insert_category(&mut db, None, "trucks", true)?;
    let tractor_units = insert_category(&mut db, Some(trucks), "tractor-units", true)?;
    let tippers = insert_category(&mut db, Some(trucks), "tippers", true)?;
    let _inactive = insert_category(&mut db, Some(trucks), "fire-engines", false)?;
    let _unrelated = insert_category(&mut db, None, "trailers", true)?;

    assert_eq!(trucks, db.resolve_category_id("trucks")?);
    assert_eq!(
        vec![tractor_units, tippers],
        db.load_active_child_category_ids(trucks)?
    );
    assert!(db.load_active_child_category_ids(tippers)?.is_empty());

    let active_slugs: Vec<_> = db
        .load_active_categories()?
        .into_iter()
        .map(|record| record.category.slug)
        .collect();
    assert_eq!(4, active_slugs.len());
    assert!(!active_slugs.iter().any(|slug| slug == "fire-engines"));

    Ok(())
}

#[test]
fn unknown_slugs_are_not_found() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = fixture.connection();

    assert!(matches!(
        db.resolve_category_id("spaceships"),
        Err(RepoError::NotFound)
    ));
    assert!(matches!(
        db.resolve_brand_id("acme"),
        Err(RepoError::NotFound)
    ));
    assert!(matches!(
        db.resolve_model_id("roadrunner"),
        Err(RepoError::NotFound)
    ));

    Ok(())
}

#[test]
fn brands_with_models() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = fixture.connection();

    let volvo = db.insert_brand(&Brand {
        slug: "volvo".into(),
        name: "Volvo".into(),
    })?;
    let man = db.insert_brand(&Brand {
        slug: "man".into(),
        name: "MAN".into(),
    })?;
    let fh = db.insert_model(
        volvo,
        &Model {
            slug: "volvo-fh".into(),
            name: "FH".into(),
        },
    )?;
    db.insert_model(
        volvo,
        &Model {
            slug: "volvo-fm".into(),
            name: "FM".into(),
        },
    )?;

    // Ordered by name
    let brands = db.load_brands()?;
    assert_eq!(vec![man, volvo], brands.iter().map(|(id, _)| *id).collect::<Vec<_>>());

    assert_eq!((volvo, fh), db.resolve_model_id("volvo-fh")?);
    assert_eq!(2, db.load_brand_models(volvo)?.len());
    assert!(db.load_brand_models(man)?.is_empty());

    // Slugs are unique
    assert!(matches!(
        db.insert_brand(&Brand {
            slug: "volvo".into(),
            name: "Volvo Trucks".into(),
        }),
        Err(RepoError::Conflict)
    ));

    Ok(())
}
