//! Property tests for compilation invariants

use critq_ast::{Relation, SearchCriterion, SearchQuery};
use critq_compiler::QueryAssembler;
use critq_schema::{EntityInfo, MemorySchema};
use critq_target::{Predicate, Value};
use proptest::prelude::*;

fn schema() -> MemorySchema {
    MemorySchema::new().register("Person", EntityInfo::new("id"))
}

fn compile(criterion: SearchCriterion) -> Predicate {
    let query = SearchQuery::new("Person").with_criterion(criterion);
    QueryAssembler::new(&query, &schema())
        .build()
        .expect("compilation succeeds")
        .predicate
        .expect("predicate present")
}

proptest! {
    /// Between keeps both bounds, in order, for any ordered literal pair
    #[test]
    fn between_preserves_bounds(low in -1000i64..1000, span in 0i64..1000) {
        let high = low + span;
        let predicate = compile(SearchCriterion::between("age", low, high));
        prop_assert_eq!(
            predicate,
            Predicate::Between {
                property: "age".to_string(),
                low: Value::Int(low),
                high: Value::Int(high),
            }
        );
    }

    /// Compiling the same descriptor through fresh assemblers is
    /// structurally idempotent
    #[test]
    fn compilation_is_deterministic(
        property in "[a-z][a-z0-9]{0,8}",
        value in ".{0,16}",
    ) {
        let query = SearchQuery::new("Person").with_criterion(
            SearchCriterion::simple_compare(Relation::Eq, property, value),
        );
        let first = QueryAssembler::new(&query, &schema()).build().expect("ok");
        let second = QueryAssembler::new(&query, &schema()).build().expect("ok");
        prop_assert_eq!(first, second);
    }

    /// Rendered string literals never leak an unescaped quote
    #[test]
    fn string_literals_are_quote_escaped(value in ".{0,24}") {
        let predicate = compile(SearchCriterion::simple_compare(
            Relation::Eq,
            "name",
            value.clone(),
        ));
        let rendered = predicate.to_string();
        let inner = rendered
            .strip_prefix("name = '")
            .and_then(|rest| rest.strip_suffix('\''))
            .expect("comparison rendering shape");
        prop_assert_eq!(inner, value.replace('\'', "''"));
    }
}
