//! Configuration text reader
//!
//! Reads lines of the form `key : type[N] as qualifier = values unit` into a
//! [`Properties`] store. Grammar details live in `config.pest`.

use std::fs;
use std::path::Path;
use pest::Parser;
use pest::error::LineColLocation;
use pest::iterators::Pair;
use pest_derive::Parser;
use tracing::debug;
use typedprops_units::{parse_unit, Dimension, UnitError};
use crate::{Datum, Properties, PropertyStore, Result, StoreError};

#[derive(Parser)]
#[grammar = "config.pest"]
struct ConfigParser;

/// Reader options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Reject dimensioned reals that carry no unit
    pub strict_units: bool,
    /// Let a later line replace an earlier one with the same key
    pub allow_overwrite: bool,
}

impl ReaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strict_units(mut self, strict: bool) -> Self {
        self.strict_units = strict;
        self
    }

    pub fn with_overwrite(mut self, allow: bool) -> Self {
        self.allow_overwrite = allow;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementType {
    Boolean,
    Integer,
    Real,
    String,
}

impl ElementType {
    fn from_name(name: &str) -> Self {
        match name {
            "boolean" | "bool" => ElementType::Boolean,
            "integer" | "int" => ElementType::Integer,
            "real" => ElementType::Real,
            _ => ElementType::String,
        }
    }
}

enum Qualifier {
    Path,
    Dimension(Dimension),
}

/// One parsed line, before it reaches the store
struct Line {
    number: usize,
    key: String,
    datum: Datum,
    path: bool,
    unit: Option<String>,
}

/// Configuration reader
#[derive(Debug, Clone, Default)]
pub struct Reader {
    config: ReaderConfig,
}

impl Reader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ReaderConfig) -> Self {
        Reader { config }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Parse text into a fresh store
    pub fn parse(&self, text: &str) -> Result<Properties> {
        let mut props = Properties::new();
        self.parse_into(text, &mut props)?;
        Ok(props)
    }

    /// Parse text and add its properties to an existing store
    pub fn parse_into(&self, text: &str, props: &mut Properties) -> Result<()> {
        let file = ConfigParser::parse(Rule::file, text)
            .map_err(syntax_error)?
            .next()
            .ok_or_else(|| StoreError::Parse { line: 1, message: "empty input".to_string() })?;

        for line in file.into_inner() {
            if line.as_rule() != Rule::line {
                continue;
            }
            if let Some(property) = line.into_inner().next() {
                let parsed = self.read_property(property)?;
                self.apply(parsed, props)?;
            }
        }
        Ok(())
    }

    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<Properties> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading properties");
        self.parse(&fs::read_to_string(path)?)
    }

    fn read_property(&self, pair: Pair<'_, Rule>) -> Result<Line> {
        let number = pair.as_span().start_pos().line_col().0;
        let fail = |message: String| StoreError::Parse { line: number, message };

        let mut key = String::new();
        let mut element = ElementType::String;
        let mut size = None;
        let mut qualifier = None;
        let mut tokens = Vec::new();
        let mut unit = None;

        for part in pair.into_inner() {
            match part.as_rule() {
                Rule::key => key = part.as_str().to_string(),
                Rule::type_name => element = ElementType::from_name(part.as_str()),
                Rule::size => {
                    let count = part.into_inner().as_str();
                    size = Some(
                        count
                            .parse::<usize>()
                            .map_err(|_| fail(format!("invalid vector size '{}'", count)))?,
                    );
                }
                Rule::qualifier => {
                    let name = part.into_inner().as_str();
                    qualifier = Some(if name == "path" {
                        Qualifier::Path
                    } else {
                        Dimension::from_label(name)
                            .map(Qualifier::Dimension)
                            .ok_or_else(|| fail(format!("unknown dimension '{}'", name)))?
                    });
                }
                Rule::values => {
                    for value in part.into_inner() {
                        match value.as_rule() {
                            Rule::unit => unit = Some(value.as_str().to_string()),
                            _ => tokens.push(value),
                        }
                    }
                }
                _ => {}
            }
        }

        match (&qualifier, element) {
            (Some(Qualifier::Path), ElementType::String) if size.is_none() => {}
            (Some(Qualifier::Path), _) => {
                return Err(fail(format!("'{}': only string scalars can be paths", key)));
            }
            (Some(Qualifier::Dimension(_)), ElementType::Real) => {}
            (Some(Qualifier::Dimension(d)), _) => {
                return Err(fail(format!("'{}': only reals can be '{}'", key, d)));
            }
            (None, _) => {}
        }

        if let Some(symbol) = &unit {
            if element != ElementType::Real || size.is_some() {
                return Err(fail(format!("'{}': unit '{}' on a non-real scalar", key, symbol)));
            }
            let resolved = parse_unit(symbol).map_err(|e| fail(e.to_string()))?;
            if let Some(Qualifier::Dimension(expected)) = &qualifier {
                if resolved.dimension != *expected {
                    let err = UnitError::WrongDimension {
                        expected: expected.label().to_string(),
                        found: resolved.dimension.label().to_string(),
                        context: format!("unit '{}'", symbol),
                    };
                    return Err(fail(err.to_string()));
                }
            }
        } else if let Some(Qualifier::Dimension(d)) = &qualifier {
            if self.config.strict_units {
                return Err(fail(format!("'{}': '{}' value requires a unit", key, d)));
            }
        }

        let datum = match size {
            None => {
                if tokens.len() != 1 {
                    return Err(fail(format!("'{}': expected one value, found {}", key, tokens.len())));
                }
                scalar_datum(element, &tokens[0]).map_err(&fail)?
            }
            Some(n) => {
                if tokens.len() != n {
                    return Err(fail(format!(
                        "'{}': expected {} values, found {}",
                        key,
                        n,
                        tokens.len()
                    )));
                }
                vector_datum(element, &tokens).map_err(&fail)?
            }
        };

        Ok(Line {
            number,
            key,
            datum,
            path: matches!(qualifier, Some(Qualifier::Path)),
            unit,
        })
    }

    fn apply(&self, line: Line, props: &mut Properties) -> Result<()> {
        let located = |e: StoreError| match e {
            StoreError::Parse { .. } => e,
            other => StoreError::Parse { line: line.number, message: other.to_string() },
        };

        if props.has_key(&line.key) {
            if !self.config.allow_overwrite {
                return Err(located(StoreError::ExistingKey(line.key.clone())));
            }
            props.erase(&line.key).map_err(&located)?;
        }

        debug!(line = line.number, key = %line.key, "read property");

        let stored = match (line.datum, line.path, line.unit.as_deref()) {
            (Datum::String(path), true, _) => props.store_path(&line.key, &path),
            (Datum::Real(value), _, Some(symbol)) => props
                .store_with_explicit_unit(&line.key, value)
                .and_then(|_| props.set_unit_symbol(&line.key, symbol)),
            (datum, _, _) => store_datum(props, &line.key, datum),
        };
        stored.map_err(located)
    }
}

fn store_datum(props: &mut Properties, key: &str, datum: Datum) -> Result<()> {
    match datum {
        Datum::Boolean(v) => props.store(key, v),
        Datum::Integer(v) => props.store(key, v),
        Datum::Real(v) => props.store(key, v),
        Datum::String(v) => props.store(key, v),
        Datum::BooleanVec(v) => props.store(key, v),
        Datum::IntegerVec(v) => props.store(key, v),
        Datum::RealVec(v) => props.store(key, v),
        Datum::StringVec(v) => props.store(key, v),
    }
}

fn syntax_error(e: pest::error::Error<Rule>) -> StoreError {
    let line = match e.line_col {
        LineColLocation::Pos((line, _)) | LineColLocation::Span((line, _), _) => line,
    };
    StoreError::Parse { line, message: e.variant.message().to_string() }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn parse_boolean(token: &Pair<'_, Rule>) -> std::result::Result<bool, String> {
    match token.as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(format!("invalid boolean '{}'", other)),
    }
}

fn parse_integer(token: &Pair<'_, Rule>) -> std::result::Result<i32, String> {
    let s = token.as_str();
    match token.as_rule() {
        Rule::number => s.parse::<i32>().map_err(|_| format!("invalid integer '{}'", s)),
        _ => Err(format!("invalid integer '{}'", s)),
    }
}

fn parse_real(token: &Pair<'_, Rule>) -> std::result::Result<f64, String> {
    let s = token.as_str();
    match token.as_rule() {
        Rule::number => s.parse::<f64>().map_err(|_| format!("invalid real '{}'", s)),
        _ => Err(format!("invalid real '{}'", s)),
    }
}

fn parse_string(token: &Pair<'_, Rule>) -> std::result::Result<String, String> {
    match token.as_rule() {
        Rule::string => Ok(unescape(token.clone().into_inner().as_str())),
        _ => Err(format!("expected a quoted string, found '{}'", token.as_str())),
    }
}

fn scalar_datum(element: ElementType, token: &Pair<'_, Rule>) -> std::result::Result<Datum, String> {
    Ok(match element {
        ElementType::Boolean => Datum::Boolean(parse_boolean(token)?),
        ElementType::Integer => Datum::Integer(parse_integer(token)?),
        ElementType::Real => Datum::Real(parse_real(token)?),
        ElementType::String => Datum::String(parse_string(token)?),
    })
}

fn collect<T>(
    tokens: &[Pair<'_, Rule>],
    parse: fn(&Pair<'_, Rule>) -> std::result::Result<T, String>,
) -> std::result::Result<Vec<T>, String> {
    tokens.iter().map(parse).collect()
}

fn vector_datum(element: ElementType, tokens: &[Pair<'_, Rule>]) -> std::result::Result<Datum, String> {
    Ok(match element {
        ElementType::Boolean => Datum::BooleanVec(collect(tokens, parse_boolean)?),
        ElementType::Integer => Datum::IntegerVec(collect(tokens, parse_integer)?),
        ElementType::Real => Datum::RealVec(collect(tokens, parse_real)?),
        ElementType::String => Datum::StringVec(collect(tokens, parse_string)?),
    })
}

impl Properties {
    /// Parse configuration text with default reader options
    pub fn parse(text: &str) -> Result<Self> {
        Reader::new().parse(text)
    }

    pub fn read_file(path: impl AsRef<Path>) -> Result<Self> {
        Reader::new().read_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"# detector settings
count : integer = 3
ratio : real = 0.5
speed : real as velocity = 3.14 m/s
width : real = 2 mm
enabled : boolean = true
label : string = "foo"   # trailing comment
input : string as path = "$HOME/data"
ids : integer[3] = 1 2 3
"#;

    #[test]
    fn test_parse_sample() {
        let props = Properties::parse(SAMPLE).unwrap();
        assert_eq!(props.len(), 8);
        assert_eq!(props.fetch::<i32>("count").unwrap(), 3);
        assert_eq!(props.fetch::<f64>("ratio").unwrap(), 0.5);
        assert!(props.fetch::<bool>("enabled").unwrap());
        assert_eq!(props.fetch::<String>("label").unwrap(), "foo");
        assert_eq!(props.fetch::<Vec<i32>>("ids").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_units_and_paths() {
        let props = Properties::parse(SAMPLE).unwrap();
        assert!(props.has_explicit_unit("speed"));
        assert_eq!(props.unit_symbol("speed").unwrap(), "m/s");
        assert_eq!(props.fetch_real_with_explicit_unit("speed").unwrap(), 3.14);
        assert_eq!(props.unit_symbol("width").unwrap(), "mm");
        assert!(!props.has_explicit_unit("ratio"));
        assert!(props.is_explicit_path("input"));
        assert!(!props.is_explicit_path("label"));
    }

    #[test]
    fn test_short_type_names_and_vectors() {
        let text = "a : int = -4\nb : bool[3] = true 0 1\nc : string[2] = \"x\" \"y z\"\nd : real[2] = 1 2.5e1\n";
        let props = Properties::parse(text).unwrap();
        assert_eq!(props.fetch::<i32>("a").unwrap(), -4);
        assert_eq!(props.fetch::<Vec<bool>>("b").unwrap(), vec![true, false, true]);
        assert_eq!(
            props.fetch::<Vec<String>>("c").unwrap(),
            vec!["x".to_string(), "y z".to_string()]
        );
        assert_eq!(props.fetch::<Vec<f64>>("d").unwrap(), vec![1.0, 25.0]);
    }

    #[test]
    fn test_string_escapes() {
        let props = Properties::parse(r#"s : string = "say \"hi\"""#).unwrap();
        assert_eq!(props.fetch::<String>("s").unwrap(), "say \"hi\"");
    }

    #[test]
    fn test_wrong_dimension_reports_line() {
        let err = Properties::parse("a : int = 1\nspeed : real as velocity = 2 kg\n").unwrap_err();
        match err {
            StoreError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("velocity"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_unknown_unit() {
        let err = Properties::parse("x : real = 2 furlongs\n").unwrap_err();
        assert!(err.to_string().contains("furlongs"));
    }

    #[test]
    fn test_unit_on_vector_rejected() {
        assert!(Properties::parse("x : real[2] = 1 2 mm\n").is_err());
        assert!(Properties::parse("x : integer = 1 mm\n").is_err());
    }

    #[test]
    fn test_qualifier_checks() {
        assert!(Properties::parse("x : integer as path = 1\n").is_err());
        let err = Properties::parse("a : int = 1\ndirs : string[2] as path = \"/a\" \"/b\"\n").unwrap_err();
        match err {
            StoreError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("only string scalars can be paths"));
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(Properties::parse("x : string as length = \"a\"\n").is_err());
        assert!(Properties::parse("x : real as warp_factor = 1 mm\n").is_err());
    }

    #[test]
    fn test_vector_size_mismatch() {
        let err = Properties::parse("ids : integer[3] = 1 2\n").unwrap_err();
        assert!(err.to_string().contains("expected 3 values"));
    }

    #[test]
    fn test_strict_units() {
        let text = "len : real as length = 5\n";
        let props = Properties::parse(text).unwrap();
        assert!(!props.has_explicit_unit("len"));

        let strict = Reader::with_config(ReaderConfig::new().with_strict_units(true));
        assert!(strict.parse(text).is_err());
    }

    #[test]
    fn test_duplicate_keys() {
        let text = "a : int = 1\na : int = 2\n";
        let err = Properties::parse(text).unwrap_err();
        assert!(matches!(err, StoreError::Parse { line: 2, .. }));

        let lenient = Reader::with_config(ReaderConfig::new().with_overwrite(true));
        assert_eq!(lenient.parse(text).unwrap().fetch::<i32>("a").unwrap(), 2);
    }

    #[test]
    fn test_syntax_error_line() {
        let err = Properties::parse("a : int = 1\nb = 2\n").unwrap_err();
        assert!(matches!(err, StoreError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_empty_and_comments() {
        assert!(Properties::parse("").unwrap().is_empty());
        assert!(Properties::parse("# nothing\n\n   \n").unwrap().is_empty());
    }
}
