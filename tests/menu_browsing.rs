//! Menu browsing over the sample fixture set.

use rusty_money::iso;
use testresult::TestResult;

use sesame::{
    fixtures::Fixture,
    menu::{Menu, SectionFilter},
};

fn sample_menu() -> Result<Menu<'static>, sesame::fixtures::FixtureError> {
    Fixture::new().load_menu("bagelhouse")
}

#[test]
fn the_sample_menu_is_priced_in_shekels() -> TestResult {
    let menu = sample_menu()?;

    assert_eq!(menu.currency(), iso::ILS);
    assert_eq!(menu.sections().len(), 4);

    Ok(())
}

#[test]
fn the_all_filter_shows_every_section() -> TestResult {
    let menu = sample_menu()?;

    let views = menu.filter(&SectionFilter::from("all"));

    assert_eq!(views.len(), menu.sections().len());

    Ok(())
}

#[test]
fn a_category_filter_shows_exactly_that_section() -> TestResult {
    let menu = sample_menu()?;

    let views = menu.filter(&SectionFilter::from("drinks"));

    assert_eq!(views.len(), 1);
    assert_eq!(
        views.first().map(|view| view.section().title()),
        Some("Drinks")
    );
    assert_eq!(views.first().map(|view| view.items().len()), Some(2));

    Ok(())
}

#[test]
fn search_matches_dish_names_case_insensitively() -> TestResult {
    let menu = sample_menu()?;

    let views = menu.search("LOX");

    assert_eq!(views.len(), 1);
    assert_eq!(
        views
            .first()
            .and_then(|view| view.items().first().map(|item| item.name())),
        Some("Lox Sandwich")
    );

    Ok(())
}

#[test]
fn search_matches_descriptions_too() -> TestResult {
    let menu = sample_menu()?;

    let views = menu.search("tahini");

    assert_eq!(views.len(), 1);
    assert_eq!(
        views
            .first()
            .and_then(|view| view.items().first().map(|item| item.name())),
        Some("Sabich Bagel")
    );

    Ok(())
}

#[test]
fn search_hides_sections_without_matches() -> TestResult {
    let menu = sample_menu()?;

    let views = menu.search("bagel");

    let ids: Vec<&str> = views.iter().map(|view| view.section().id()).collect();

    // "bagel" appears in dish names in the bagels and sandwiches sections
    // only; spreads and drinks disappear from the view.
    assert_eq!(ids, ["bagels", "sandwiches"]);

    Ok(())
}

#[test]
fn a_blank_search_shows_the_whole_menu() -> TestResult {
    let menu = sample_menu()?;

    assert_eq!(menu.search("  ").len(), menu.sections().len());

    Ok(())
}

#[test]
fn searches_with_no_matches_show_nothing() -> TestResult {
    let menu = sample_menu()?;

    assert!(menu.search("pizza").is_empty());

    Ok(())
}
