//! ROS 2 IDL parser built from nom combinators.
//!
//! The parser is line oriented, matching the layout `rosidl_adapter` emits:
//! one declaration or member per line. Annotations may precede a member on
//! the same line or span several lines of their own.
//!
//! # Supported
//!
//! - `module`, `struct` and `enum` declarations (nested modules)
//! - basic types under their rosidl names, including multi-word ones
//!   (`unsigned long long`, `long double`)
//! - `string` / `wstring`, optionally bounded (`string<N>`)
//! - `sequence<T>` / `sequence<T, N>`
//! - fixed arrays as `T name[N];` and `typedef T alias[N];`
//! - scoped names with `::` or `/` separators
//! - annotations, `#include` and `const` declarations (skipped)
//!
//! `union` and `bitmask` declarations are rejected.

use idlschema_core::DefinitionError;
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, char, digit1, space0},
    combinator::{map, map_res, opt, recognize, value},
    error::{Error, ErrorKind},
    multi::{many0, separated_list1},
    sequence::{pair, preceded, terminated, tuple},
};

use crate::{
    ast::{MemberDecl, ParsedIdl, StructDecl, TypeExpr, TypedefDecl},
    lex::{AnnotationSkipper, strip_line_comments},
};

pub fn parse_idl_text(idl_body: &str) -> Result<ParsedIdl, DefinitionError> {
    let mut parsed = ParsedIdl::default();
    let mut modules: Vec<String> = Vec::new();
    let mut current_struct: Option<(String, Vec<MemberDecl>)> = None;
    let mut current_enum: Option<(String, Vec<String>)> = None;

    let mut annotations = AnnotationSkipper::default();

    for (idx, raw) in idl_body.lines().enumerate() {
        let line_no = idx + 1;
        let line = annotations.strip(strip_line_comments(raw).trim());
        if line.is_empty() {
            continue;
        }

        if line.starts_with("#include") || line.starts_with("const ") {
            continue;
        }

        if line.starts_with("union ") || line.starts_with("bitmask ") {
            return Err(format!("unsupported IDL declaration at line {line_no}: {line}").into());
        }

        let in_body = current_struct.is_some() || current_enum.is_some();

        if line.starts_with("typedef ") {
            if in_body {
                return Err(format!("typedef inside a declaration at line {line_no}").into());
            }
            let target = parse_typedef(line)
                .map_err(|e| DefinitionError(format!("parse error at line {line_no}: {e}")))?;
            let mut full = modules.clone();
            full.push(target.name.clone());
            parsed
                .typedefs
                .insert(full.clone(), TypedefDecl { full_name: full, target });
            continue;
        }

        if let Some(name) = parse_module_open(line) {
            if in_body {
                return Err(format!("module inside a declaration at line {line_no}").into());
            }
            modules.push(name.to_string());
            continue;
        }

        if is_forward_declaration(line) {
            continue;
        }

        if let Some(name) = parse_struct_open(line) {
            if in_body {
                return Err(
                    format!("nested declaration unsupported at line {line_no}: {line}").into(),
                );
            }
            current_struct = Some((name.to_string(), Vec::new()));
            continue;
        }

        if let Some(name) = parse_enum_open(line) {
            if in_body {
                return Err(
                    format!("nested declaration unsupported at line {line_no}: {line}").into(),
                );
            }
            current_enum = Some((name.to_string(), Vec::new()));
            continue;
        }

        if line == "};" || line == "}" {
            if let Some((name, members)) = current_struct.take() {
                let mut full = modules.clone();
                full.push(name);
                parsed.structs.push(StructDecl {
                    full_name: full,
                    members,
                });
            } else if let Some((name, variants)) = current_enum.take() {
                let mut full = modules.clone();
                full.push(name);
                parsed.enums.insert(full, variants);
            } else if modules.pop().is_none() {
                return Err(format!("unmatched closing brace at line {line_no}").into());
            }
            continue;
        }

        if let Some((_, members)) = current_struct.as_mut() {
            members.push(
                parse_member(line)
                    .map_err(|e| DefinitionError(format!("parse error at line {line_no}: {e}")))?,
            );
            continue;
        }

        if let Some((_, variants)) = current_enum.as_mut() {
            let name = parse_enum_variant(line)
                .map_err(|e| DefinitionError(format!("parse error at line {line_no}: {e}")))?;
            if !name.is_empty() {
                variants.push(name);
            }
            continue;
        }

        return Err(format!("unexpected top-level statement at line {line_no}: {line}").into());
    }

    if current_struct.is_some() {
        return Err("unclosed struct declaration".into());
    }
    if current_enum.is_some() {
        return Err("unclosed enum declaration".into());
    }
    if !modules.is_empty() {
        return Err(format!("unclosed module '{}'", modules.join("::")).into());
    }
    Ok(parsed)
}

/// Parse module declaration: module Name {
fn module_decl(input: &str) -> IResult<&str, &str> {
    map(
        tuple((tag("module"), ws1, identifier, ws, char('{'))),
        |(_, _, name, _, _)| name,
    )(input)
}

/// Parse struct declaration: struct Name {
fn struct_decl(input: &str) -> IResult<&str, &str> {
    map(
        tuple((tag("struct"), ws1, identifier, ws, char('{'))),
        |(_, _, name, _, _)| name,
    )(input)
}

/// Parse enum declaration: enum Name {
fn enum_decl(input: &str) -> IResult<&str, &str> {
    map(
        tuple((tag("enum"), ws1, identifier, ws, char('{'))),
        |(_, _, name, _, _)| name,
    )(input)
}

fn parse_module_open(line: &str) -> Option<&str> {
    module_decl(line).ok().map(|(_, name)| name)
}

fn parse_struct_open(line: &str) -> Option<&str> {
    struct_decl(line).ok().map(|(_, name)| name)
}

fn parse_enum_open(line: &str) -> Option<&str> {
    enum_decl(line).ok().map(|(_, name)| name)
}

/// `struct Name;` declares a name without a body.
fn is_forward_declaration(line: &str) -> bool {
    let forward: IResult<&str, _> =
        tuple((tag("struct"), ws1, identifier, ws, char(';')))(line);
    matches!(forward, Ok((rest, _)) if rest.trim().is_empty())
}

fn parse_member(line: &str) -> Result<MemberDecl, DefinitionError> {
    let body = line
        .strip_suffix(';')
        .ok_or_else(|| DefinitionError("member declaration must end with ';'".to_string()))?
        .trim();

    match member_decl(body) {
        Ok((remaining, def)) if remaining.trim().is_empty() => Ok(def),
        Ok((remaining, _)) => {
            Err(format!("unexpected trailing characters in member: {remaining}").into())
        }
        Err(e) => Err(format!("failed to parse member declaration: {e}").into()),
    }
}

fn parse_typedef(line: &str) -> Result<MemberDecl, DefinitionError> {
    let body = line
        .strip_prefix("typedef")
        .and_then(|b| b.strip_suffix(';'))
        .ok_or_else(|| DefinitionError("typedef must be `typedef T name;`".to_string()))?
        .trim();

    match member_decl(body) {
        Ok((remaining, def)) if remaining.trim().is_empty() => Ok(def),
        Ok((remaining, _)) => {
            Err(format!("unexpected trailing characters in typedef: {remaining}").into())
        }
        Err(e) => Err(format!("failed to parse typedef: {e}").into()),
    }
}

/// Parse an identifier (alphanumeric + underscore, must start with alpha or _)
fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn ws(input: &str) -> IResult<&str, ()> {
    value((), space0)(input)
}

fn ws1(input: &str) -> IResult<&str, ()> {
    value((), take_while1(|c: char| c.is_whitespace()))(input)
}

/// Parse a scoped identifier (e.g., "foo::bar::Baz" or "foo/bar/Baz")
fn scoped_name(input: &str) -> IResult<&str, Vec<String>> {
    let sep = if input.contains("::") { "::" } else { "/" };
    separated_list1(tag(sep), map(identifier, String::from))(input)
}

/// Basic types, mapped to the names rosidl reports for them.
///
/// `alt` commits to the first alternative that matches a prefix, so longer
/// spellings sharing a prefix (`float64` vs `float`) must come first.
fn primitive_type(input: &str) -> IResult<&str, &'static str> {
    terminated(
        alt((
            value(
                "unsigned long long",
                tuple((tag("unsigned"), ws1, tag("long"), ws1, tag("long"))),
            ),
            value("unsigned long", tuple((tag("unsigned"), ws1, tag("long")))),
            value("unsigned short", tuple((tag("unsigned"), ws1, tag("short")))),
            value("long long", tuple((tag("long"), ws1, tag("long")))),
            value("long double", tuple((tag("long"), ws1, tag("double")))),
            value("boolean", alt((tag("boolean"), tag("bool")))),
            value("int8", tag("int8")),
            value("int16", tag("int16")),
            value("int32", tag("int32")),
            value("int64", tag("int64")),
            value("uint8", tag("uint8")),
            value("uint16", tag("uint16")),
            value("uint32", tag("uint32")),
            value("uint64", tag("uint64")),
            value("double", alt((tag("float64"), tag("double")))),
            value("float", alt((tag("float32"), tag("float")))),
            value("short", tag("short")),
            value("long", tag("long")),
            value("char", tag("char")),
            value("wchar", tag("wchar")),
            value("octet", tag("octet")),
        )),
        keyword_boundary,
    )(input)
}

fn keyword_boundary(input: &str) -> IResult<&str, ()> {
    if input.chars().next().is_some_and(is_ident_continue) {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Verify)));
    }
    Ok((input, ()))
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn number(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}

/// `<N>` after `string` / `wstring`.
fn string_bound(input: &str) -> IResult<&str, usize> {
    map(
        tuple((ws, char('<'), ws, number, ws, char('>'))),
        |(_, _, _, n, _, _)| n,
    )(input)
}

fn string_type(input: &str) -> IResult<&str, TypeExpr> {
    alt((
        map(preceded(tag("wstring"), string_bound), |n| {
            TypeExpr::WString(Some(n))
        }),
        value(
            TypeExpr::WString(None),
            terminated(tag("wstring"), keyword_boundary),
        ),
        map(preceded(tag("string"), string_bound), |n| {
            TypeExpr::String(Some(n))
        }),
        value(
            TypeExpr::String(None),
            terminated(tag("string"), keyword_boundary),
        ),
    ))(input)
}

/// Parse sequence<T> or sequence<T, N>
fn sequence_type(input: &str) -> IResult<&str, TypeExpr> {
    map(
        tuple((
            tag("sequence"),
            ws,
            char('<'),
            ws,
            type_expr,
            opt(preceded(tuple((ws, char(','), ws)), number)),
            ws,
            char('>'),
        )),
        |(_, _, _, _, elem, max_len, _, _)| TypeExpr::Sequence {
            elem: Box::new(elem),
            max_len,
        },
    )(input)
}

fn type_expr(input: &str) -> IResult<&str, TypeExpr> {
    alt((
        sequence_type,
        string_type,
        map(primitive_type, TypeExpr::Primitive),
        map(scoped_name, TypeExpr::Scoped),
    ))(input)
}

/// `name` or `name[N]`
fn declarator(input: &str) -> IResult<&str, (&str, Option<usize>)> {
    pair(
        identifier,
        opt(map(
            tuple((ws, char('['), ws, number, ws, char(']'))),
            |(_, _, _, n, _, _)| n,
        )),
    )(input)
}

/// `type_expr name` or `type_expr name[N]`, without the semicolon.
fn member_decl(input: &str) -> IResult<&str, MemberDecl> {
    map(
        tuple((type_expr, ws1, declarator)),
        |(ty, _, (name, fixed_len))| MemberDecl {
            name: name.to_string(),
            ty,
            fixed_len,
        },
    )(input)
}

/// Parse enum variant: VARIANT or VARIANT = value
fn enum_variant(input: &str) -> IResult<&str, Option<&str>> {
    let trimmed = input.trim().trim_end_matches(',').trim();
    if trimmed.is_empty() {
        return Ok((input, None));
    }
    map(identifier, Some)(trimmed)
}

fn parse_enum_variant(line: &str) -> Result<String, DefinitionError> {
    match enum_variant(line) {
        Ok((_, Some(name))) => Ok(name.to_string()),
        Ok((_, None)) => Ok(String::new()),
        Err(e) => Err(format!("failed to parse enum variant '{line}': {e}").into()),
    }
}
