//! A small template language for row formats.
//!
//! Text is copied verbatim; actions are written `{{ pipeline }}`:
//!
//! - `{{.Name}}` prints a field, `{{.}}` prints the whole row as JSON
//! - `{{json .}}`, `{{upper .Tag}}`, `{{lower .Name}}`, `{{title .Name}}`
//! - `{{truncate .Name 12}}`, `{{pad .Tag 1 2}}`
//! - `{{.Name | upper}}` passes the left value as the last argument
//! - `{{-` and `-}}` trim whitespace in the neighbouring text
//!
//! Strings are double-quoted and support `\"`, `\\`, `\n` and `\t`.

use crate::ManifestError;
use crate::Result;

/// Upper bound on the total padding `pad` may add.
const MAX_PAD_WIDTH: usize = 4096;

/// Data a template is executed against.
pub trait TemplateData {
    /// Value of the named field, or `None` if there is no such field.
    fn field(&self, name: &str) -> Option<String>;

    /// The whole value rendered as compact JSON.
    fn to_json(&self) -> Result<String>;
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Action(Vec<Stage>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Stage {
    Operand(Arg),
    Call { func: Func, args: Vec<Arg> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Arg {
    Dot,
    Field(String),
    Int(i64),
    Str(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Func {
    Json,
    Upper,
    Lower,
    Title,
    Truncate,
    Pad,
}

impl Func {
    fn lookup(name: &str) -> Option<Self> {
        match name {
            "json" => Some(Self::Json),
            "upper" => Some(Self::Upper),
            "lower" => Some(Self::Lower),
            "title" => Some(Self::Title),
            "truncate" => Some(Self::Truncate),
            "pad" => Some(Self::Pad),
            _ => None,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::Title => "title",
            Self::Truncate => "truncate",
            Self::Pad => "pad",
        }
    }

    const fn arity(self) -> usize {
        match self {
            Self::Json | Self::Upper | Self::Lower | Self::Title => 1,
            Self::Truncate => 2,
            Self::Pad => 3,
        }
    }

    fn call(self, args: &[Value], data: &dyn TemplateData) -> Result<Value> {
        match (self, args) {
            (Self::Json, [value]) => {
                let json = match value {
                    Value::Dot => data.to_json()?,
                    Value::Str(s) => {
                        serde_json::to_string(s).map_err(|e| ManifestError::template(e.to_string()))?
                    }
                    Value::Int(n) => n.to_string(),
                };
                Ok(Value::Str(json))
            }
            (Self::Upper, [value]) => Ok(Value::Str(expect_str(self, value)?.to_uppercase())),
            (Self::Lower, [value]) => Ok(Value::Str(expect_str(self, value)?.to_lowercase())),
            (Self::Title, [value]) => Ok(Value::Str(title_case(expect_str(self, value)?))),
            (Self::Truncate, [value, length]) => {
                let s = expect_str(self, value)?;
                let length = expect_len(self, length)?;
                Ok(Value::Str(s.chars().take(length).collect()))
            }
            (Self::Pad, [value, left, right]) => {
                let s = expect_str(self, value)?;
                let left = expect_len(self, left)?;
                let right = expect_len(self, right)?;
                if left.saturating_add(right) > MAX_PAD_WIDTH {
                    return Err(ManifestError::template("pad: length too large"));
                }
                Ok(Value::Str(format!(
                    "{}{s}{}",
                    " ".repeat(left),
                    " ".repeat(right)
                )))
            }
            _ => Err(ManifestError::template(format!(
                "wrong number of args for {}: want {} got {}",
                self.name(),
                self.arity(),
                args.len()
            ))),
        }
    }
}

#[derive(Debug, Clone)]
enum Value {
    Dot,
    Str(String),
    Int(i64),
}

impl Value {
    fn render(self, data: &dyn TemplateData) -> Result<String> {
        match self {
            Self::Dot => data.to_json(),
            Self::Str(s) => Ok(s),
            Self::Int(n) => Ok(n.to_string()),
        }
    }
}

fn expect_str(func: Func, value: &Value) -> Result<&str> {
    match value {
        Value::Str(s) => Ok(s),
        Value::Int(n) => Err(ManifestError::template(format!(
            "{}: expected string; found {n}",
            func.name()
        ))),
        Value::Dot => Err(ManifestError::template(format!(
            "{}: expected string; found the whole row",
            func.name()
        ))),
    }
}

fn expect_len(func: Func, value: &Value) -> Result<usize> {
    match value {
        Value::Int(n) => usize::try_from(*n).map_err(|_| {
            ManifestError::template(format!("{}: negative length {n}", func.name()))
        }),
        _ => Err(ManifestError::template(format!(
            "{}: expected integer",
            func.name()
        ))),
    }
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }
    out
}

impl Template {
    /// Parses a template source.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Template`] for unclosed actions, empty
    /// actions, unknown functions, or calls with the wrong number of
    /// arguments.
    pub fn parse(source: &str) -> Result<Self> {
        let mut nodes = Vec::new();
        let mut rest = source;
        let mut trim_next = false;

        while let Some(start) = rest.find("{{") {
            let mut text = &rest[..start];
            if trim_next {
                text = text.trim_start();
            }

            let mut body = &rest[start + 2..];
            if let Some(stripped) = body.strip_prefix('-')
                && stripped.starts_with(char::is_whitespace)
            {
                text = text.trim_end();
                body = stripped;
            }
            push_text(&mut nodes, text);

            let end = body
                .find("}}")
                .ok_or_else(|| ManifestError::template("unclosed action"))?;
            let mut action = &body[..end];
            rest = &body[end + 2..];

            trim_next = false;
            if let Some(stripped) = action.strip_suffix('-')
                && stripped.ends_with(char::is_whitespace)
            {
                action = stripped;
                trim_next = true;
            }

            nodes.push(Node::Action(parse_pipeline(action)?));
        }

        let text = if trim_next { rest.trim_start() } else { rest };
        push_text(&mut nodes, text);
        Ok(Self { nodes })
    }

    /// Executes the template against `data`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Template`] when a field does not exist or a
    /// function receives a value of the wrong type.
    pub fn execute(&self, data: &dyn TemplateData) -> Result<String> {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Action(stages) => out.push_str(&eval_pipeline(stages, data)?),
            }
        }
        Ok(out)
    }
}

fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if !text.is_empty() {
        nodes.push(Node::Text(text.to_string()));
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Token {
    Pipe,
    Word(String),
    Quoted(String),
}

fn tokenize(action: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = action.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '|' {
            chars.next();
            tokens.push(Token::Pipe);
        } else if c == '"' {
            chars.next();
            let mut s = String::new();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some('\\') => match chars.next() {
                        Some('n') => s.push('\n'),
                        Some('t') => s.push('\t'),
                        Some(other @ ('"' | '\\')) => s.push(other),
                        Some(other) => {
                            return Err(ManifestError::template(format!(
                                "unknown escape sequence \\{other}"
                            )));
                        }
                        None => return Err(ManifestError::template("unterminated quoted string")),
                    },
                    Some(other) => s.push(other),
                    None => return Err(ManifestError::template("unterminated quoted string")),
                }
            }
            tokens.push(Token::Quoted(s));
        } else {
            let mut word = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() || c == '|' || c == '"' {
                    break;
                }
                word.push(c);
                chars.next();
            }
            tokens.push(Token::Word(word));
        }
    }

    Ok(tokens)
}

fn parse_pipeline(action: &str) -> Result<Vec<Stage>> {
    let tokens = tokenize(action)?;
    if tokens.is_empty() {
        return Err(ManifestError::template("missing value for command"));
    }

    let mut stages = Vec::new();
    for (index, group) in tokens.split(|t| *t == Token::Pipe).enumerate() {
        let Some((first, rest)) = group.split_first() else {
            return Err(ManifestError::template("missing command in pipeline"));
        };

        let function = match first {
            Token::Word(word) => Func::lookup(word),
            _ => None,
        };

        let stage = if let Some(func) = function {
            let args = rest.iter().map(parse_arg).collect::<Result<Vec<_>>>()?;
            let given = args.len() + usize::from(index > 0);
            if given != func.arity() {
                return Err(ManifestError::template(format!(
                    "wrong number of args for {}: want {} got {given}",
                    func.name(),
                    func.arity()
                )));
            }
            Stage::Call { func, args }
        } else {
            let operand = parse_arg(first)?;
            if !rest.is_empty() {
                return Err(ManifestError::template(format!(
                    "can't give argument to non-function {action:?}"
                )));
            }
            if index > 0 {
                return Err(ManifestError::template(format!(
                    "non executable command in pipeline stage {}",
                    index + 1
                )));
            }
            Stage::Operand(operand)
        };
        stages.push(stage);
    }

    Ok(stages)
}

fn parse_arg(token: &Token) -> Result<Arg> {
    match token {
        Token::Quoted(s) => Ok(Arg::Str(s.clone())),
        Token::Word(word) if word == "." => Ok(Arg::Dot),
        Token::Word(word) => {
            if let Some(field) = word.strip_prefix('.') {
                return Ok(Arg::Field(field.to_string()));
            }
            if let Ok(n) = word.parse::<i64>() {
                return Ok(Arg::Int(n));
            }
            if Func::lookup(word).is_some() {
                return Err(ManifestError::template(format!(
                    "function {word:?} used as an argument"
                )));
            }
            Err(ManifestError::template(format!(
                "function {word:?} not defined"
            )))
        }
        Token::Pipe => Err(ManifestError::template("unexpected \"|\"")),
    }
}

fn eval_arg(arg: &Arg, data: &dyn TemplateData) -> Result<Value> {
    match arg {
        Arg::Dot => Ok(Value::Dot),
        Arg::Field(name) => data.field(name).map(Value::Str).ok_or_else(|| {
            ManifestError::template(format!("can't evaluate field {name}"))
        }),
        Arg::Int(n) => Ok(Value::Int(*n)),
        Arg::Str(s) => Ok(Value::Str(s.clone())),
    }
}

fn eval_pipeline(stages: &[Stage], data: &dyn TemplateData) -> Result<String> {
    let mut piped: Option<Value> = None;

    for stage in stages {
        let value = match stage {
            Stage::Operand(arg) => eval_arg(arg, data)?,
            Stage::Call { func, args } => {
                let mut values = args
                    .iter()
                    .map(|arg| eval_arg(arg, data))
                    .collect::<Result<Vec<_>>>()?;
                values.extend(piped.take());
                func.call(&values, data)?
            }
        };
        piped = Some(value);
    }

    piped
        .ok_or_else(|| ManifestError::template("missing value for command"))?
        .render(data)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct Data;

    impl TemplateData for Data {
        fn field(&self, name: &str) -> Option<String> {
            match name {
                "Name" => Some("example.com/app:v1".to_string()),
                "Tag" => Some("v1".to_string()),
                "Words" => Some("hello big_world-x".to_string()),
                _ => None,
            }
        }

        fn to_json(&self) -> Result<String> {
            Ok(r#"{"Name":"example.com/app:v1"}"#.to_string())
        }
    }

    fn render(source: &str) -> Result<String> {
        Template::parse(source)?.execute(&Data)
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(render("no actions").unwrap(), "no actions");
        assert_eq!(render("").unwrap(), "");
    }

    #[test]
    fn test_fields() {
        assert_eq!(render("{{.Name}}").unwrap(), "example.com/app:v1");
        assert_eq!(render("tag={{ .Tag }}!").unwrap(), "tag=v1!");
    }

    #[test]
    fn test_dot_is_json() {
        assert_eq!(render("{{.}}").unwrap(), r#"{"Name":"example.com/app:v1"}"#);
        assert_eq!(render("{{json .}}").unwrap(), r#"{"Name":"example.com/app:v1"}"#);
    }

    #[test]
    fn test_json_of_field_is_quoted() {
        assert_eq!(render("{{json .Tag}}").unwrap(), r#""v1""#);
    }

    #[test]
    fn test_string_functions() {
        assert_eq!(render("{{upper .Tag}}").unwrap(), "V1");
        assert_eq!(render("{{lower \"ABC\"}}").unwrap(), "abc");
        assert_eq!(render("{{title .Words}}").unwrap(), "Hello Big_world-X");
        assert_eq!(render("{{truncate .Name 7}}").unwrap(), "example");
        assert_eq!(render("{{truncate .Tag 10}}").unwrap(), "v1");
        assert_eq!(render("[{{pad .Tag 1 2}}]").unwrap(), "[ v1  ]");
    }

    #[test]
    fn test_pad_width_is_bounded() {
        let err = render("{{pad .Tag 9223372036854775807 0}}").unwrap_err();
        assert!(err.is_render_error());
        assert_eq!(err.to_string(), "template: pad: length too large");

        assert!(render("{{pad .Tag 2048 2049}}").is_err());
        assert_eq!(render("{{pad .Tag 2048 2048}}").unwrap().len(), 4098);
    }

    #[test]
    fn test_pipes() {
        assert_eq!(render("{{.Tag | upper}}").unwrap(), "V1");
        assert_eq!(render("{{.Tag | upper | json}}").unwrap(), r#""V1""#);
    }

    #[test]
    fn test_trim_markers() {
        assert_eq!(render("a  {{- .Tag -}}  b").unwrap(), "av1b");
        assert_eq!(render("a  {{.Tag -}}\n  b").unwrap(), "a  v1b");
    }

    #[test]
    fn test_quoted_string_escapes() {
        assert_eq!(render(r#"{{"a\tb"}}"#).unwrap(), "a\tb");
        assert_eq!(render(r#"{{"say \"hi\""}}"#).unwrap(), "say \"hi\"");
    }

    #[test]
    fn test_unknown_field() {
        let err = render("{{.ID}}").unwrap_err();
        assert!(err.to_string().contains("can't evaluate field ID"));
        assert!(err.is_render_error());
    }

    #[test]
    fn test_parse_errors() {
        let cases = [
            ("{{.Name", "unclosed action"),
            ("{{}}", "missing value for command"),
            ("{{nope .Name}}", "function \"nope\" not defined"),
            ("{{upper}}", "wrong number of args for upper: want 1 got 0"),
            ("{{truncate .Name}}", "wrong number of args for truncate"),
            ("{{.Name .Tag}}", "can't give argument to non-function"),
            ("{{.Name | .Tag}}", "non executable command in pipeline stage 2"),
            ("{{.Name | }}", "missing command in pipeline"),
            (r#"{{"open}}"#, "unterminated quoted string"),
        ];
        for (source, expected) in cases {
            let err = Template::parse(source).unwrap_err();
            assert!(
                err.to_string().contains(expected),
                "{source}: expected {expected:?}, got {err}"
            );
        }
    }

    #[test]
    fn test_type_errors() {
        let err = render("{{upper 3}}").unwrap_err();
        assert!(err.to_string().contains("expected string; found 3"));

        let err = render("{{truncate .Name .Tag}}").unwrap_err();
        assert!(err.to_string().contains("expected integer"));

        let err = render("{{truncate .Name -1}}").unwrap_err();
        assert!(err.to_string().contains("negative length"));

        let err = render("{{upper .}}").unwrap_err();
        assert!(err.to_string().contains("whole row"));
    }
}
