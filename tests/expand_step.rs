use std::{cell::RefCell, env, rc::Rc};

use cucumber_expandvars::{
    expand_step, gherkin, EnvExpander, Pairs, Replacer, Source, StepExpander,
    Transformer,
};

fn step(value: &str) -> gherkin::Step {
    gherkin::Step {
        keyword: "Given".into(),
        ty: gherkin::StepType::Given,
        value: value.into(),
        docstring: None,
        table: None,
        span: gherkin::Span { start: 0, end: 0 },
        position: gherkin::LineCol { line: 1, col: 1 },
    }
}

fn parse_steps(src: &str) -> Vec<gherkin::Step> {
    let feature = gherkin::Feature::parse(src, gherkin::GherkinEnv::default())
        .expect("feature should parse");
    feature.scenarios.into_iter().flat_map(|sc| sc.steps).collect()
}

fn travel_sources() -> Vec<Source> {
    vec![
        // Raw replacer.
        Replacer::new([("$TO", "Berlin")]).unwrap().into(),
        // Static pairs and their producers.
        Pairs::from([("HUSBAND", "John")]).into(),
        Source::pairs_with(|| Pairs::from([("WIFE", "Jane")])),
        Source::transformer_with(|| {
            Transformer::new(|s| s.replace("$DURATION", "and stay there for 3 days"))
        }),
        Source::transformer(|s| s.replace("$FROM", "Paris")),
        Transformer::new(|s| s.replace("$TRANSPORT", "by bus")).into(),
        // Process environment.
        EnvExpander::new().into(),
    ]
}

#[test]
fn expands_every_source_shape() {
    env::set_var("GREETINGS", "Hi Dave");

    let mut st = step(
        "$GREETINGS, $HUSBAND & $WIFE are going from $FROM to $TO $TRANSPORT \
         $DURATION",
    );
    let res = expand_step(&mut st, travel_sources());
    env::remove_var("GREETINGS");

    res.unwrap();
    assert_eq!(
        st.value,
        "Hi Dave, John & Jane are going from Paris to Berlin by bus and stay \
         there for 3 days",
    );
}

#[test]
fn environment_changes_are_observed() {
    let name = "CUCUMBER_EXPANDVARS_GREETINGS";
    let expander = StepExpander::new([EnvExpander::new()]).unwrap();
    let text = format!("${name}!");

    env::set_var(name, "Hi Dave");
    assert_eq!(expander.expand(&text), "Hi Dave!");

    env::remove_var(name);
    assert_eq!(expander.expand(&text), text);
}

#[test]
fn later_source_rewrites_earlier_output() {
    let expander = StepExpander::new([
        Source::from(Pairs::from([("WHO", "$NAME")])),
        Source::from(Pairs::from([("NAME", "John")])),
    ])
    .unwrap();

    assert_eq!(expander.expand("Hello, $WHO"), "Hello, John");
}

#[test]
fn unknown_placeholders_survive_repeated_expansion() {
    let expander = StepExpander::new([Pairs::from([("A", "a")])]).unwrap();
    let text = "price is $5 for $UNKNOWN";

    let once = expander.expand(text);
    let twice = expander.expand(&once);

    assert_eq!(once, text);
    assert_eq!(twice, text);
}

#[test]
fn expands_docstrings_and_tables() {
    let mut steps = parse_steps(
        r#"
Feature: Expansion

  Scenario: Everything
    Given a user $NAME
      """
      {"name": "$NAME", "city": "$CITY"}
      """
    And the following users:
      | name  | city  |
      | $NAME | $CITY |
"#,
    );
    let expander = StepExpander::new([
        Pairs::from([("NAME", "John"), ("CITY", "Berlin")]),
    ])
    .unwrap();

    for st in &mut steps {
        expander.expand_step(st);
    }

    assert_eq!(steps[0].value, "a user John");
    assert_eq!(
        steps[0].docstring.as_deref().map(str::trim),
        Some(r#"{"name": "John", "city": "Berlin"}"#),
    );
    let table = steps[1].table.as_ref().expect("table should be parsed");
    assert_eq!(table.rows[0], ["name", "city"]);
    assert_eq!(table.rows[1], ["John", "Berlin"]);
}

#[test]
fn config_limits_expansion_to_text() {
    let mut steps = parse_steps(
        r#"
Feature: Expansion

  Scenario: Text only
    Given a user $NAME
      """
      $NAME
      """
    And the following users:
      | $NAME |
"#,
    );
    let expander = StepExpander::builder()
        .source(Pairs::from([("NAME", "John")]))
        .config(cucumber_expandvars::Config::text_only())
        .build()
        .unwrap();

    for st in &mut steps {
        expander.expand_step(st);
    }

    assert_eq!(steps[0].value, "a user John");
    assert_eq!(steps[0].docstring.as_deref().map(str::trim), Some("$NAME"));
    assert_eq!(steps[1].table.as_ref().unwrap().rows[0], ["$NAME"]);
}

#[test]
fn transformer_producer_closes_over_shared_state() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let expander = StepExpander::new([Source::transformer_with({
        let seen = Rc::clone(&seen);
        move || {
            Transformer::new(move |s| {
                seen.borrow_mut().push(s.to_owned());
                s.to_owned()
            })
        }
    })])
    .unwrap();

    _ = expander.expand("first");
    _ = expander.expand("second");

    assert_eq!(*seen.borrow(), ["first", "second"]);
}

#[test]
fn unsupported_source_is_rejected_before_running() {
    let err = Source::from_any(2.5_f64).unwrap_err();

    assert!(err.is_unsupported_source_kind());
    assert_eq!(err.to_string(), "Unsupported source kind: f64");
}
