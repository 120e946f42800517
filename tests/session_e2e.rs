//! End-to-end exercises of the public session API: parse, submit, query.

use credo::{
    normalize, Identifier, IsIdentifierAType, Quantity, QuantityType, ReasonerError, Response,
    Sentence, Session, TypeName,
};

fn session() -> Session {
    Session::new().expect("grammar self-check")
}

fn submit(session: &mut Session, line: &str) -> Response {
    let sentence = session
        .parse(&normalize(line))
        .unwrap_or_else(|| panic!("no parse: {line}"));
    session
        .submit(&sentence)
        .unwrap_or_else(|e| panic!("submit {line}: {e}"))
}

fn query(session: &Session, line: &str) -> Response {
    let Some(Sentence::IsIdentifierAType(question)) = session.parse(&normalize(line)) else {
        panic!("not a query: {line}");
    };
    session.query(&question)
}

#[test]
fn the_david_scenario() {
    let mut session = session();

    assert_eq!(
        submit(&mut session, "DAVID IS A PROGRAMMER"),
        Response::NewDirectMappingCreated
    );
    assert_eq!(
        submit(&mut session, "EVERY PROGRAMMER IS A GENIUS"),
        Response::Ok
    );

    assert_eq!(query(&session, "IS DAVID A GENIUS?"), Response::Correct);

    // PLUMBER has never been mentioned anywhere.
    assert_eq!(query(&session, "IS DAVID A PLUMBER?"), Response::UnknownType);

    // ARTIST exists in the store but nothing connects DAVID to it.
    submit(&mut session, "EVERY ARTIST IS A GENIUS");
    assert_eq!(query(&session, "IS DAVID AN ARTIST?"), Response::NeedMoreInfo);
}

#[test]
fn reachability_is_transitive_across_chained_rules() {
    let mut session = session();
    submit(&mut session, "EVERY ARTIST IS A GENIUS");
    submit(&mut session, "EVERY GENIUS IS A GIFT");
    submit(&mut session, "EVERY GIFT IS A TREASURE");
    submit(&mut session, "DAVID IS AN ARTIST");

    assert_eq!(query(&session, "IS DAVID A TREASURE?"), Response::Correct);
}

#[test]
fn negative_rules_contradict_in_both_orientations() {
    let mut session = session();
    submit(&mut session, "EVERY ARTIST IS A GENIUS");
    submit(&mut session, "NOT A SINGLE GENIUS IS A BORE");
    submit(&mut session, "DAVID IS AN ARTIST");
    assert_eq!(query(&session, "IS DAVID A BORE?"), Response::Incorrect);

    let mut session = self::session();
    submit(&mut session, "EVERY ARTIST IS A GENIUS");
    submit(&mut session, "NOT A SINGLE BORE IS A GENIUS");
    submit(&mut session, "DAVID IS AN ARTIST");
    assert_eq!(query(&session, "IS DAVID A BORE?"), Response::Incorrect);
}

#[test]
fn unknown_identifier_wins_over_unknown_type() {
    let mut session = session();
    submit(&mut session, "DAVID IS A PROGRAMMER");

    assert_eq!(
        query(&session, "IS NOBODY A PROGRAMMER?"),
        Response::UnknownIdentifier
    );
    assert_eq!(query(&session, "IS NOBODY A PLUMBER?"), Response::UnknownIdentifier);
}

#[test]
fn identifier_with_only_ownership_facts_needs_more_info() {
    let mut session = session();
    submit(&mut session, "MYCAR HAS 4 WHEEL");

    // MYCAR is known (it owns things) but has no membership facts at all.
    assert_eq!(query(&session, "IS MYCAR A WHEEL?"), Response::NeedMoreInfo);
}

#[test]
fn resubmission_is_idempotent_in_effect() {
    let mut session = session();
    assert_eq!(
        submit(&mut session, "DAVID IS A PROGRAMMER"),
        Response::NewDirectMappingCreated
    );
    assert_eq!(
        submit(&mut session, "DAVID IS A PROGRAMMER"),
        Response::DirectMappingAlreadyExists
    );
    assert_eq!(
        submit(&mut session, "EVERY PROGRAMMER IS A GENIUS"),
        Response::Ok
    );
    assert_eq!(
        submit(&mut session, "EVERY PROGRAMMER IS A GENIUS"),
        Response::Ok
    );

    assert_eq!(query(&session, "IS DAVID A GENIUS?"), Response::Correct);
}

#[test]
fn closure_implied_fact_reports_indirect_duplicate() {
    let mut session = session();
    submit(&mut session, "DAVID IS AN ARTIST");
    submit(&mut session, "EVERY ARTIST IS A GENIUS");

    assert_eq!(
        submit(&mut session, "DAVID IS A GENIUS"),
        Response::IndirectMappingAlreadyExists
    );
}

#[test]
fn cyclic_is_rules_terminate_and_still_answer() {
    let mut session = session();
    submit(&mut session, "EVERY ARTIST IS A GENIUS");
    submit(&mut session, "EVERY GENIUS IS AN ARTIST");
    submit(&mut session, "DAVID IS AN ARTIST");

    assert_eq!(query(&session, "IS DAVID A GENIUS?"), Response::Correct);
    assert_eq!(query(&session, "IS DAVID AN ARTIST?"), Response::Correct);
}

#[test]
fn quantity_propagation_multiplies_through_ownership_chains() {
    let mut session = session();
    submit(&mut session, "EVERY CAR HAS 4 WHEEL");
    submit(&mut session, "EVERY WHEEL HAS 1 TIRE");
    submit(&mut session, "MYCAR HAS 1 CAR");

    let owned = session.has_facts(&Identifier::new("MYCAR")).unwrap();
    assert!(owned.contains(&QuantityType::new(Quantity::new(1), TypeName::new("CAR"))));
    assert!(owned.contains(&QuantityType::new(Quantity::new(4), TypeName::new("WHEEL"))));
    assert!(owned.contains(&QuantityType::new(Quantity::new(4), TypeName::new("TIRE"))));

    let expanded = session
        .owned_quantities(&QuantityType::new(Quantity::new(2), TypeName::new("CAR")))
        .unwrap();
    assert_eq!(expanded.get(&TypeName::new("WHEEL")), Some(&8));
    assert_eq!(expanded.get(&TypeName::new("TIRE")), Some(&8));
}

#[test]
fn article_quantities_mean_one() {
    let mut session = session();
    submit(&mut session, "EVERY CAR HAS AN ENGINE");
    submit(&mut session, "DAVID HAS A CAR");

    let owned = session.has_facts(&Identifier::new("DAVID")).unwrap();
    assert!(owned.contains(&QuantityType::new(Quantity::new(1), TypeName::new("CAR"))));
    assert!(owned.contains(&QuantityType::new(Quantity::new(1), TypeName::new("ENGINE"))));
}

#[test]
fn cyclic_has_rules_are_reported_at_fact_time() {
    let mut session = session();
    submit(&mut session, "EVERY BOX HAS 2 CRATE");
    submit(&mut session, "EVERY CRATE HAS 2 BOX");

    let fact = session.parse("DAVID HAS 1 BOX").unwrap();
    assert!(matches!(
        session.submit(&fact),
        Err(ReasonerError::CyclicHasRules { .. })
    ));
}

#[test]
fn both_query_surfaces_resolve_identically() {
    let mut session = session();
    submit(&mut session, "DAVID IS AN ARTIST");
    submit(&mut session, "EVERY ARTIST IS A GENIUS");
    // A negative rule on the same pair must not shake a reachable goal.
    submit(&mut session, "NOT A SINGLE ARTIST IS A GENIUS");

    for line in ["IS DAVID A GENIUS?", "DAVID IS A GENIUS?"] {
        assert_eq!(query(&session, line), Response::Correct, "line: {line}");
    }
}

#[test]
fn bare_quantity_lines_parse_but_are_inert() {
    let mut session = session();
    let Some(Sentence::Quantity(quantity)) = session.parse(&normalize("42")) else {
        panic!("expected a bare quantity");
    };
    assert_eq!(quantity, Quantity::new(42));
    assert_eq!(
        session.submit(&Sentence::Quantity(quantity)).unwrap(),
        Response::NotYetImplemented
    );
}

#[test]
fn raw_user_input_flows_through_normalize() {
    let mut session = session();
    assert_eq!(
        submit(&mut session, "  david   is a\tprogrammer "),
        Response::NewDirectMappingCreated
    );
    assert_eq!(query(&session, "is DAVID a PROGRAMMER?"), Response::Correct);
}

#[test]
fn direct_query_api_matches_parsed_queries() {
    let mut session = session();
    submit(&mut session, "DAVID IS A PROGRAMMER");

    let question =
        IsIdentifierAType::new(Identifier::new("DAVID"), TypeName::new("PROGRAMMER"));
    assert_eq!(session.query(&question), Response::Correct);
}
