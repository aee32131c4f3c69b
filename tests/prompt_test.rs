use std::cell::RefCell;

use gpig::error::GpigResult;
use gpig::params::{ParameterId, ParameterSet};
use gpig::prompt::{collect_parameters, parse_parameters, Prompter};

struct ScriptedPrompter {
    asked: RefCell<Vec<ParameterId>>,
}

impl Prompter for ScriptedPrompter {
    fn ask(&self, id: ParameterId, default: &str) -> GpigResult<String> {
        self.asked.borrow_mut().push(id);
        Ok(format!("{}-answer", default))
    }
}

fn defaults() -> ParameterSet {
    ParameterSet::new()
        .with(ParameterId::PackageName, "com.author.default")
        .with(ParameterId::Version, "1.0.0")
        .with(ParameterId::DisplayName, "Default")
        .with(ParameterId::AuthorName, "Author")
}

#[test]
fn test_prompts_only_for_missing_parameters() {
    let prompter = ScriptedPrompter {
        asked: RefCell::new(Vec::new()),
    };
    let provided = ParameterSet::new()
        .with(ParameterId::PackageName, "com.author.tool")
        .with(ParameterId::Version, "2.0.0");

    let params = collect_parameters(Some(&prompter), provided, &defaults()).unwrap();

    assert_eq!(
        *prompter.asked.borrow(),
        vec![ParameterId::DisplayName, ParameterId::AuthorName]
    );
    assert_eq!(params.get(ParameterId::PackageName), Some("com.author.tool"));
    assert_eq!(params.get(ParameterId::DisplayName), Some("Default-answer"));
}

#[test]
fn test_defaults_without_prompter() {
    let params = collect_parameters(None, ParameterSet::new(), &defaults()).unwrap();
    assert_eq!(params, defaults());
}

#[test]
fn test_parse_parameters() {
    assert_eq!(parse_parameters("  \n").unwrap(), ParameterSet::new());

    let params = parse_parameters(r#"{"PkgAuthor": "Someone"}"#).unwrap();
    assert_eq!(params.get(ParameterId::AuthorName), Some("Someone"));

    assert!(parse_parameters("not json").is_err());
}
