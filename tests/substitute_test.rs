use gpig::error::GpigError;
use gpig::params::{MarkerSpec, ParameterId, ParameterSet};
use gpig::substitute::Substitutor;

fn params() -> ParameterSet {
    ParameterSet::new()
        .with(ParameterId::PackageName, "com.author.tool")
        .with(ParameterId::Version, "1.2.3")
        .with(ParameterId::DisplayName, "Tool Installer")
        .with(ParameterId::AuthorName, "Author")
}

#[test]
fn test_substitutes_all_markers() {
    let markers = MarkerSpec::default();
    let params = params();
    let substitutor = Substitutor::new(&markers, &params, "AuthorTool", &[]).unwrap();

    let text = concat!(
        r#"{"name": "\!<PkgName>", "version": "\!<PkgVer>", "#,
        r#""displayName": "\!<PkgDisplayName>", "author": "\!<PkgAuthor>"}"#,
        "\n",
        r"namespace \!<NameSpace> { } // \!<PkgName>"
    );
    let expected = concat!(
        r#"{"name": "com.author.tool", "version": "1.2.3", "#,
        r#""displayName": "Tool Installer", "author": "Author"}"#,
        "\n",
        "namespace AuthorTool { } // com.author.tool"
    );
    assert_eq!(substitutor.substitute(text), expected);
}

#[test]
fn test_values_containing_markers_are_not_rescanned() {
    let markers = MarkerSpec::default();
    let params = params()
        .with(ParameterId::DisplayName, r"\!<PkgAuthor>")
        .with(ParameterId::AuthorName, r"\!<NameSpace> \!<PkgName>");
    let substitutor = Substitutor::new(&markers, &params, "AuthorTool", &[]).unwrap();

    assert_eq!(
        substitutor.substitute(r"\!<PkgDisplayName>|\!<PkgAuthor>"),
        r"\!<PkgAuthor>|\!<NameSpace> \!<PkgName>"
    );
}

#[test]
fn test_sentinel_like_text_survives_resubstitution() {
    let markers = MarkerSpec::default();
    let params = params();
    let substitutor = Substitutor::new(&markers, &params, "AuthorTool", &[]).unwrap();

    let text = "a\0\u{0}\0b\0\u{1}\0c \\!<PkgVer>";
    let once = substitutor.substitute(text);
    assert_eq!(once, "a\0\u{0}\0b\0\u{1}\0c 1.2.3");
    assert_eq!(substitutor.substitute(&once), once);
}

#[test]
fn test_unknown_markers_are_kept() {
    let markers = MarkerSpec::default();
    let params = params();
    let substitutor = Substitutor::new(&markers, &params, "AuthorTool", &[]).unwrap();

    let text = r"guid: \!<RepoTblSrcGuid> other: \!<Unknown> open: \!<";
    assert_eq!(substitutor.substitute(text), text);
}

#[test]
fn test_missing_values() {
    let markers = MarkerSpec::default();
    let params = ParameterSet::new().with(ParameterId::PackageName, "com.author.tool");

    let substitutor = Substitutor::new(&markers, &params, "AuthorTool", &[]).unwrap();
    assert_eq!(substitutor.substitute(r"[\!<PkgAuthor>]"), "[]");

    let err = Substitutor::new(&markers, &params, "AuthorTool", &[ParameterId::Version]).unwrap_err();
    assert!(matches!(err, GpigError::MissingParameterError { parameter } if parameter == "PkgVer"));
}

#[test]
fn test_with_table_guid() {
    let markers = MarkerSpec::default();
    let params = params().with(ParameterId::DisplayName, r"My \!<RepoTblSrcGuid> pkg");
    let substitutor = Substitutor::new(&markers, &params, "AuthorTool", &[]).unwrap();
    let guid = "0123456789abcdef0123456789abcdef";

    let text = r"guid: \!<RepoTblSrcGuid>, name: \!<PkgName>, display: \!<PkgDisplayName>";
    assert_eq!(
        substitutor.with_table_guid(&markers, guid).substitute(text),
        r"guid: 0123456789abcdef0123456789abcdef, name: com.author.tool, display: My \!<RepoTblSrcGuid> pkg"
    );
    assert_eq!(
        substitutor.substitute(text),
        r"guid: \!<RepoTblSrcGuid>, name: com.author.tool, display: My \!<RepoTblSrcGuid> pkg"
    );
}
