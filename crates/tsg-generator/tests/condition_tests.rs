use super::*;

fn leaf(text: &str) -> Condition {
    Condition::leaf(text)
}

#[test]
fn constructors_render_expected_text() {
    assert_eq!(Condition::equals("value.kind", "\"a\"").to_string(), "value.kind === \"a\"");
    assert_eq!(Condition::type_of("value", "string").to_string(), "typeof value === \"string\"");
    assert_eq!(Condition::instance_of("value", "Map").to_string(), "value instanceof Map");
    assert_eq!(Condition::always_true().to_string(), "true");
    assert_eq!(Condition::always_false().to_string(), "false");
}

#[test]
fn empty_groups_render_as_identity() {
    assert_eq!(Condition::and(vec![]).to_string(), "true");
    assert_eq!(Condition::or(vec![]).to_string(), "false");
}

#[test]
fn groups_render_with_parentheses_in_order() {
    let cond = Condition::or(vec![
        leaf("a"),
        Condition::and(vec![leaf("b"), leaf("c")]),
        leaf("d"),
    ]);
    assert_eq!(cond.to_string(), "(a || (b && c) || d)");
}

#[test]
fn duplicates_collapse_keeping_first_occurrence() {
    let cond = Condition::or(vec![leaf("b"), leaf("a"), leaf("b"), leaf("a")]);
    assert_eq!(cond.simplify(), Condition::or(vec![leaf("b"), leaf("a")]));
}

#[test]
fn structurally_equal_groups_collapse() {
    let group = || Condition::and(vec![leaf("x"), leaf("y")]);
    let cond = Condition::or(vec![group(), group()]);
    assert_eq!(cond.simplify(), group());
}

#[test]
fn identity_law_drops_neutral_children() {
    let cond = Condition::and(vec![leaf("true"), leaf("a"), leaf("true")]);
    assert_eq!(cond.simplify(), leaf("a"));
    let cond = Condition::or(vec![leaf("false"), leaf("a"), leaf("b")]);
    assert_eq!(cond.simplify(), Condition::or(vec![leaf("a"), leaf("b")]));
}

#[test]
fn annulment_law() {
    let cond = Condition::and(vec![leaf("a"), leaf("false"), leaf("b")]);
    assert_eq!(cond.to_string(), "false");
    let cond = Condition::or(vec![leaf("a"), Condition::and(vec![]), leaf("b")]);
    assert_eq!(cond.to_string(), "true");
}

#[test]
fn nested_simplification_is_bottom_up() {
    let cond = Condition::and(vec![
        leaf("a"),
        Condition::or(vec![leaf("b"), leaf("true")]),
        Condition::and(vec![leaf("c")]),
    ]);
    assert_eq!(cond.simplify(), Condition::and(vec![leaf("a"), leaf("c")]));
}

#[test]
fn simplify_is_idempotent() {
    let cases = vec![
        Condition::and(vec![
            leaf("a"),
            Condition::or(vec![leaf("b"), leaf("b"), Condition::and(vec![leaf("c"), leaf("true")])]),
            leaf("a"),
        ]),
        Condition::or(vec![Condition::or(vec![leaf("x")]), leaf("false")]),
        Condition::and(vec![Condition::and(vec![]), Condition::or(vec![])]),
    ];
    for cond in cases {
        let once = cond.simplify();
        assert_eq!(once.simplify(), once);
        assert_eq!(once.to_string(), cond.to_string());
    }
}

/// Every two-operand grouping of the leaf pool, plus empty and single groups.
fn shallow_trees(pool: &[Condition]) -> Vec<Condition> {
    let groups: [fn(Vec<Condition>) -> Condition; 2] = [Condition::and, Condition::or];
    let mut out = Vec::new();
    for group in groups {
        out.push(group(vec![]));
        for x in pool {
            out.push(group(vec![x.clone()]));
            for y in pool {
                out.push(group(vec![x.clone(), y.clone()]));
            }
        }
    }
    out
}

#[test]
fn simplify_is_idempotent_across_generated_trees() {
    let pool = vec![
        leaf("true"),
        leaf("false"),
        leaf("a"),
        Condition::with_comment("a", "first a"),
        leaf("b"),
        Condition::type_of("value", "string"),
    ];
    let groups: [fn(Vec<Condition>) -> Condition; 2] = [Condition::and, Condition::or];
    let shallow = shallow_trees(&pool);

    let mut trees = shallow.clone();
    let mut middle = Vec::new();
    for group in groups {
        for x in &shallow {
            for y in &pool {
                middle.push(group(vec![x.clone(), y.clone(), x.clone()]));
            }
        }
    }
    for group in groups {
        for (i, x) in middle.iter().enumerate().step_by(7) {
            let y = &shallow[i % shallow.len()];
            trees.push(group(vec![y.clone(), x.clone(), group(vec![])]));
            trees.push(group(vec![x.clone(), Condition::or(vec![y.clone(), x.clone()])]));
        }
    }
    trees.extend(middle);

    for cond in &trees {
        let once = cond.simplify();
        assert_eq!(once.simplify(), once, "not a fixed point: {cond:?}");
        assert_eq!(once.simplify().collect_comments(), once.collect_comments());
        assert_eq!(once.to_string(), cond.to_string());
    }
}

#[test]
fn flatten_and_merges_only_and_children() {
    let cond = Condition::and(vec![
        leaf("a"),
        Condition::and(vec![leaf("b"), Condition::and(vec![leaf("c")])]),
        Condition::or(vec![leaf("d"), Condition::and(vec![leaf("e"), leaf("f")])]),
    ]);
    assert_eq!(
        cond.flatten_and(),
        Condition::and(vec![
            leaf("a"),
            leaf("b"),
            leaf("c"),
            Condition::or(vec![leaf("d"), Condition::and(vec![leaf("e"), leaf("f")])]),
        ])
    );
    assert_eq!(leaf("z").flatten_and(), leaf("z"));
}

#[test]
fn equality_ignores_comments() {
    assert_eq!(Condition::with_comment("true", "note"), Condition::always_true());
}

#[test]
fn comments_survive_identity_removal() {
    let cond = Condition::and(vec![
        leaf("a"),
        Condition::with_comment("true", "first"),
        Condition::or(vec![Condition::with_comment("false", "second"), leaf("b")]),
        Condition::with_comment("true", "first"),
    ]);
    assert_eq!(cond.to_string(), "(a && b)");
    assert_eq!(cond.collect_comments(), vec!["first".to_string(), "second".to_string()]);
}

#[test]
fn wrapping_leaf_inherits_inner_comments() {
    let inner = Condition::and(vec![leaf("x"), Condition::with_comment("true", "inner note")]);
    let wrapped = Condition::wrapping(format!("value.every((el) => {inner})"), &inner);
    assert_eq!(wrapped.to_string(), "value.every((el) => x)");
    assert_eq!(wrapped.collect_comments(), vec!["inner note".to_string()]);
}

#[test]
fn trivial_constant_queries() {
    assert!(Condition::and(vec![leaf("true")]).is_trivially_true());
    assert!(Condition::and(vec![leaf("a"), leaf("false")]).is_trivially_false());
    assert!(!leaf("a").is_trivially_true());
}
