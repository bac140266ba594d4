//! Tests for per-kind predicate compilation
//!
//! Covers:
//! - Binary and n-ary junctions (And/Or/Conjunction/Disjunction)
//! - The preserved Union/Intersection behavior
//! - Comparison leaves (simple, property, size, string match)
//! - Null/empty tests, raw fragments, In, Between

use critq_ast::{
    CriterionKind, MatchMode, MatchOptions, Param, Relation, SearchCriterion, SearchQuery,
};
use critq_compiler::QueryAssembler;
use critq_schema::{EntityInfo, MemorySchema};
use critq_target::{CompareOp, Predicate, Projection, Value};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn schema() -> MemorySchema {
    MemorySchema::new()
        .register("Person", EntityInfo::new("id"))
        .register("Sale", EntityInfo::new("id"))
}

fn compile(criterion: SearchCriterion) -> Predicate {
    let query = SearchQuery::new("Person").with_criterion(criterion);
    QueryAssembler::new(&query, &schema())
        .build()
        .unwrap_or_else(|e| panic!("compilation failed: {e}"))
        .predicate
        .expect("compiled query carries a predicate")
}

// === Comparison Leaves ===

#[test]
fn simple_compare_is_case_sensitive_by_default() {
    let predicate = compile(SearchCriterion::simple_compare(
        Relation::Eq,
        "status",
        "ACTIVE",
    ));
    assert_eq!(
        predicate,
        Predicate::Comparison {
            property: "status".to_string(),
            op: CompareOp::Eq,
            value: Value::Str("ACTIVE".to_string()),
            ignore_case: false,
        }
    );
    assert_eq!(predicate.to_string(), "status = 'ACTIVE'");
}

#[test]
fn simple_compare_honors_ignore_case() {
    let predicate = compile(
        SearchCriterion::simple_compare(Relation::Eq, "status", "active")
            .with_match_options(MatchOptions::case_insensitive()),
    );
    assert_eq!(predicate.to_string(), "lower(status) = lower('active')");
}

#[test]
fn simple_compare_with_like_relation_is_an_unanchored_pattern() {
    let predicate = compile(SearchCriterion::simple_compare(
        Relation::Like,
        "name",
        "Sm%th",
    ));
    assert_eq!(
        predicate,
        Predicate::PatternMatch {
            property: "name".to_string(),
            value: "Sm%th".to_string(),
            mode: MatchMode::Exact,
            case_insensitive: false,
        }
    );
}

#[rstest]
#[case(Relation::Eq, "=")]
#[case(Relation::Ne, "<>")]
#[case(Relation::Gt, ">")]
#[case(Relation::Ge, ">=")]
#[case(Relation::Lt, "<")]
#[case(Relation::Le, "<=")]
fn property_compare_maps_every_ordering_relation(
    #[case] relation: Relation,
    #[case] symbol: &str,
) {
    let predicate = compile(SearchCriterion::property_compare(
        relation,
        "startDate",
        "endDate",
    ));
    assert_eq!(predicate.to_string(), format!("startDate {symbol} endDate"));
}

#[test]
fn size_compare_targets_collection_cardinality() {
    let predicate = compile(SearchCriterion::size_compare(Relation::Ge, "visits", 2));
    assert_eq!(
        predicate,
        Predicate::SizeComparison {
            property: "visits".to_string(),
            op: CompareOp::Ge,
            size: 2,
        }
    );
    assert_eq!(predicate.to_string(), "size(visits) >= 2");
}

// === String Matching ===

#[test]
fn like_with_starts_with_mode_anchors_the_pattern() {
    let predicate = compile(SearchCriterion::like_mode(
        "name",
        "Smith",
        MatchMode::StartsWith,
    ));
    assert_eq!(predicate.to_string(), "name like 'Smith%'");
}

#[rstest]
#[case(MatchMode::Exact, "name like 'Smith'")]
#[case(MatchMode::StartsWith, "name like 'Smith%'")]
#[case(MatchMode::EndsWith, "name like '%Smith'")]
#[case(MatchMode::Contains, "name like '%Smith%'")]
fn match_modes_anchor_as_expected(#[case] mode: MatchMode, #[case] rendered: &str) {
    let predicate = compile(SearchCriterion::like_mode("name", "Smith", mode));
    assert_eq!(predicate.to_string(), rendered);
}

#[test]
fn ilike_is_case_insensitive() {
    let predicate = compile(SearchCriterion::ilike("name", "smith"));
    assert_eq!(predicate.to_string(), "name ilike 'smith'");
}

#[test]
fn like_with_ignore_case_option_is_case_insensitive() {
    let predicate = compile(
        SearchCriterion::like("name", "smith")
            .with_match_options(MatchOptions::case_insensitive()),
    );
    assert_eq!(predicate.to_string(), "name ilike 'smith'");
}

// === Null / Empty Tests ===

#[rstest]
#[case(SearchCriterion::is_null("endDate"), "endDate is null")]
#[case(SearchCriterion::is_not_null("endDate"), "endDate is not null")]
#[case(SearchCriterion::is_empty("visits"), "visits is empty")]
#[case(SearchCriterion::is_not_empty("visits"), "visits is not empty")]
fn zero_argument_predicates(#[case] criterion: SearchCriterion, #[case] rendered: &str) {
    assert_eq!(compile(criterion).to_string(), rendered);
}

// === Junctions ===

#[test]
fn and_combines_exactly_two_children() {
    let predicate = compile(SearchCriterion::and(
        SearchCriterion::is_null("a"),
        SearchCriterion::is_null("b"),
    ));
    assert_eq!(predicate.to_string(), "(a is null and b is null)");
}

#[test]
fn or_combines_exactly_two_children() {
    let predicate = compile(SearchCriterion::or(
        SearchCriterion::is_null("a"),
        SearchCriterion::is_null("b"),
    ));
    assert_eq!(predicate.to_string(), "(a is null or b is null)");
}

#[test]
fn not_negates_its_single_child() {
    let predicate = compile(SearchCriterion::not(SearchCriterion::is_null("a")));
    assert_eq!(predicate.to_string(), "not (a is null)");
}

#[test]
fn conjunction_folds_all_children() {
    let predicate = compile(SearchCriterion::conjunction(vec![
        SearchCriterion::simple_compare(Relation::Gt, "age", 18i64),
        SearchCriterion::simple_compare(Relation::Lt, "age", 65i64),
    ]));
    assert_eq!(
        predicate,
        Predicate::and(vec![
            Predicate::Comparison {
                property: "age".to_string(),
                op: CompareOp::Gt,
                value: Value::Int(18),
                ignore_case: false,
            },
            Predicate::Comparison {
                property: "age".to_string(),
                op: CompareOp::Lt,
                value: Value::Int(65),
                ignore_case: false,
            },
        ])
    );
}

#[test]
fn empty_conjunction_is_vacuously_true() {
    assert_eq!(compile(SearchCriterion::conjunction(vec![])).to_string(), "1=1");
    assert_eq!(compile(SearchCriterion::disjunction(vec![])).to_string(), "0=1");
}

/// Known discrepancy, preserved on purpose: Union and Intersection compile
/// exactly like Or and And. This test pins the current behavior.
#[test]
fn union_and_intersection_currently_compile_as_or_and() {
    let left = SearchCriterion::is_null("a");
    let right = SearchCriterion::is_null("b");

    let union = compile(SearchCriterion::union(left.clone(), right.clone()));
    let or = compile(SearchCriterion::or(left.clone(), right.clone()));
    assert_eq!(union, or);

    let intersection = compile(SearchCriterion::intersection(left.clone(), right.clone()));
    let and = compile(SearchCriterion::and(left, right));
    assert_eq!(intersection, and);
}

// === Raw Fragments ===

#[test]
fn raw_expression_passes_through_verbatim() {
    let predicate = compile(SearchCriterion::raw("exists (select 1 from audit)"));
    assert_eq!(predicate, Predicate::Raw("exists (select 1 from audit)".to_string()));
    assert_eq!(predicate.to_string(), "exists (select 1 from audit)");
}

// === In ===

#[test]
fn in_with_literal_values_stays_a_literal_list() {
    let predicate = compile(SearchCriterion::in_values(
        "category",
        vec![Param::Int(1), Param::Int(2), Param::Int(3)],
    ));
    assert_eq!(
        predicate,
        Predicate::In {
            property: "category".to_string(),
            values: vec![Value::Int(1), Value::Int(2), Value::Int(3)],
        }
    );
    assert_eq!(predicate.to_string(), "category in (1, 2, 3)");
}

#[test]
fn in_with_subquery_becomes_correlated_membership() {
    let inner = SearchQuery::new("Sale")
        .with_criterion(SearchCriterion::simple_compare(Relation::Gt, "total", 100i64));
    let predicate = compile(SearchCriterion::in_subquery("category", inner));

    match &predicate {
        Predicate::InSubquery { property, subquery } => {
            assert_eq!(property, "category");
            // Projected onto the same property as the membership test
            assert_eq!(
                subquery.projection,
                Some(Projection::Property("category".to_string()))
            );
        }
        other => panic!("expected InSubquery, got: {other:?}"),
    }
    assert_eq!(
        predicate.to_string(),
        "category in (select category from Sale where total > 100)"
    );
}

// === Between ===

#[test]
fn between_is_an_inclusive_range() {
    let predicate = compile(SearchCriterion::between("age", 18i64, 65i64));
    assert_eq!(
        predicate,
        Predicate::Between {
            property: "age".to_string(),
            low: Value::Int(18),
            high: Value::Int(65),
        }
    );
    assert_eq!(predicate.to_string(), "age between 18 and 65");
}

// === Criterion Kind Coverage ===

#[rstest]
#[case(CriterionKind::And)]
#[case(CriterionKind::Or)]
#[case(CriterionKind::Not)]
#[case(CriterionKind::Conjunction)]
#[case(CriterionKind::Disjunction)]
#[case(CriterionKind::Count)]
#[case(CriterionKind::In)]
#[case(CriterionKind::Between)]
#[case(CriterionKind::IsNull)]
#[case(CriterionKind::IsNotNull)]
#[case(CriterionKind::IsEmpty)]
#[case(CriterionKind::IsNotEmpty)]
#[case(CriterionKind::PropertyCompare)]
#[case(CriterionKind::SimpleCompare)]
#[case(CriterionKind::SizeCompare)]
#[case(CriterionKind::Like)]
#[case(CriterionKind::Ilike)]
#[case(CriterionKind::RawExpression)]
#[case(CriterionKind::Union)]
#[case(CriterionKind::Intersection)]
fn every_kind_has_a_compilation_rule_and_never_defaults(#[case] kind: CriterionKind) {
    // A bare node of any kind either compiles (n-ary junctions accept zero
    // children) or fails loudly; no kind falls through to a default or an
    // empty predicate.
    let query = SearchQuery::new("Person").with_criterion(SearchCriterion::new(kind));
    match QueryAssembler::new(&query, &schema()).build() {
        Ok(compiled) => {
            assert!(matches!(kind, CriterionKind::Conjunction | CriterionKind::Disjunction));
            assert!(compiled.predicate.is_some());
        }
        Err(err) => {
            assert!(matches!(
                err,
                critq_compiler::CompileError::MalformedNode { .. }
            ));
        }
    }
}
