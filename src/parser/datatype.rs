//! Declaration parsing: datatypes, modifiers and global variables.

use crate::ast::datatype::{
    primitive_size, Datatype, DatatypeKind, DATATYPE_FLAG_IGNORE_TYPECHECK,
    DATATYPE_FLAG_IS_CONST, DATATYPE_FLAG_IS_EXTERN, DATATYPE_FLAG_IS_POINTER,
    DATATYPE_FLAG_IS_SECONDARY, DATATYPE_FLAG_IS_SIGNED, DATATYPE_FLAG_IS_STATIC,
    DATATYPE_FLAG_STRUCT_UNION_NO_NAME,
};
use crate::ast::node::NodeKind;
use crate::errors::errors::{Error, ErrorKind};
use crate::lexer::tokens::TokenKind;
use crate::Pos;

use super::expr::parse_expressionable;
use super::parser::{History, Parser, HISTORY_FLAG_IN_DECLARATION};

fn is_keyword_variation_modifier(keyword: &str) -> bool {
    matches!(
        keyword,
        "const" | "static" | "__ignore_typecheck__" | "extern" | "unsigned" | "signed"
    )
}

fn keyword_is_datatype(keyword: &str) -> bool {
    matches!(
        keyword,
        "void" | "char" | "short" | "int" | "long" | "float" | "double" | "struct" | "union"
    )
}

fn kind_for_spelling(spelling: &str) -> DatatypeKind {
    match spelling {
        "void" => DatatypeKind::Void,
        "char" => DatatypeKind::Char,
        "short" => DatatypeKind::Short,
        "int" => DatatypeKind::Int,
        "long" => DatatypeKind::Long,
        "float" => DatatypeKind::Float,
        "double" => DatatypeKind::Double,
        "struct" => DatatypeKind::Struct,
        "union" => DatatypeKind::Union,
        _ => DatatypeKind::Unknown,
    }
}

/// Entry point for a top-level construct starting with a keyword. Only
/// declarations are accepted at global level.
pub fn parse_keyword_for_global(parser: &mut Parser) -> Result<(), Error> {
    let (keyword, pos) = match parser.peek_next() {
        Some(token) => match token.text() {
            Some(keyword) => (keyword.to_string(), token.pos.clone()),
            None => {
                return Err(Error::new(
                    ErrorKind::UnexpectedToken {
                        token: token.value.to_string(),
                    },
                    token.pos.clone(),
                ))
            }
        },
        None => {
            return Err(Error::new(
                ErrorKind::UnexpectedEndOfInput,
                parser.process.pos.clone(),
            ))
        }
    };

    if keyword_is_datatype(&keyword) || is_keyword_variation_modifier(&keyword) {
        return parse_variable_function_or_struct_union(parser, History::new(0));
    }

    Err(Error::new(ErrorKind::UnsupportedDeclaration { keyword }, pos))
}

fn parse_variable_function_or_struct_union(
    parser: &mut Parser,
    history: History,
) -> Result<(), Error> {
    let dtype = parse_datatype(parser)?;

    // Struct and union bodies are not handled yet, only uses of a
    // previously named type.
    if parser.next_is_symbol('{') {
        return Err(Error::new(
            ErrorKind::UnsupportedDeclaration {
                keyword: "{".to_string(),
            },
            parser.process.pos.clone(),
        ));
    }

    let name_token = match parser.next_token() {
        Some(token) => token,
        None => {
            return Err(Error::new(
                ErrorKind::UnexpectedEndOfInput,
                parser.process.pos.clone(),
            ))
        }
    };
    if name_token.kind != TokenKind::Identifier {
        return Err(Error::new(
            ErrorKind::UnexpectedToken {
                token: name_token.value.to_string(),
            },
            name_token.pos,
        ));
    }
    let name = match name_token.text() {
        Some(name) => name.to_string(),
        None => {
            return Err(Error::new(
                ErrorKind::UnexpectedToken {
                    token: name_token.value.to_string(),
                },
                name_token.pos,
            ))
        }
    };

    // Function declarations are not handled yet either.
    if parser.next_is_op("(") {
        return Err(Error::new(
            ErrorKind::UnsupportedDeclaration {
                keyword: "(".to_string(),
            },
            parser.process.pos.clone(),
        ));
    }

    parse_variable(parser, &dtype, name, name_token.pos.clone(), history)?;

    if parser.next_is_op(",") {
        let mut variables = Vec::new();
        if let Some(first) = parser.process.nodes.pop() {
            variables.push(first);
        }

        while parser.next_is_op(",") {
            parser.next_token();

            let next_name_token = match parser.next_token() {
                Some(token) => token,
                None => {
                    return Err(Error::new(
                        ErrorKind::UnexpectedEndOfInput,
                        parser.process.pos.clone(),
                    ))
                }
            };
            let next_name = match next_name_token.text() {
                Some(next_name) if next_name_token.kind == TokenKind::Identifier => {
                    next_name.to_string()
                }
                _ => {
                    return Err(Error::new(
                        ErrorKind::UnexpectedToken {
                            token: next_name_token.value.to_string(),
                        },
                        next_name_token.pos,
                    ))
                }
            };

            parse_variable(parser, &dtype, next_name, next_name_token.pos.clone(), history)?;
            if let Some(variable) = parser.process.nodes.pop() {
                variables.push(variable);
            }
        }

        parser
            .process
            .nodes
            .create(NodeKind::VariableList { variables }, name_token.pos);
    }

    parser.expect_sym(';')?;
    Ok(())
}

/// Parses the optional initializer and creates the variable node, adding
/// it to the current scope with its storage size.
fn parse_variable(
    parser: &mut Parser,
    dtype: &Datatype,
    name: String,
    pos: Pos,
    history: History,
) -> Result<(), Error> {
    let mut value = None;
    if parser.next_is_op("=") {
        parser.next_token();

        let depth = parser.process.nodes.working_len();
        parse_expressionable(parser, history.with(HISTORY_FLAG_IN_DECLARATION))?;
        if parser.process.nodes.working_len() <= depth {
            return Err(Error::new(
                ErrorKind::UnexpectedToken {
                    token: "=".to_string(),
                },
                parser.process.pos.clone(),
            ));
        }
        value = parser.process.nodes.pop();
    }

    let node = parser.process.nodes.create(
        NodeKind::Variable {
            datatype: dtype.clone(),
            name,
            value,
        },
        pos,
    );
    parser.process.scopes.push_entity(node, dtype.size);
    Ok(())
}

/// Parses a full datatype: leading modifiers, the type itself with an
/// optional secondary spelling and pointer depth, then trailing modifiers.
pub fn parse_datatype(parser: &mut Parser) -> Result<Datatype, Error> {
    let mut dtype = Datatype {
        flags: DATATYPE_FLAG_IS_SIGNED,
        ..Datatype::default()
    };

    parse_datatype_modifiers(parser, &mut dtype);
    parse_datatype_type(parser, &mut dtype)?;
    parse_datatype_modifiers(parser, &mut dtype);

    Ok(dtype)
}

fn parse_datatype_modifiers(parser: &mut Parser, dtype: &mut Datatype) {
    while let Some(token) = parser.peek_next() {
        if token.kind != TokenKind::Keyword {
            break;
        }
        let keyword = match token.text() {
            Some(keyword) => keyword,
            None => break,
        };

        match keyword {
            "const" => dtype.flags |= DATATYPE_FLAG_IS_CONST,
            "static" => dtype.flags |= DATATYPE_FLAG_IS_STATIC,
            "__ignore_typecheck__" => dtype.flags |= DATATYPE_FLAG_IGNORE_TYPECHECK,
            "extern" => dtype.flags |= DATATYPE_FLAG_IS_EXTERN,
            "unsigned" => dtype.flags &= !DATATYPE_FLAG_IS_SIGNED,
            "signed" => dtype.flags |= DATATYPE_FLAG_IS_SIGNED,
            _ => break,
        }
        parser.next_token();
    }
}

fn parse_datatype_type(parser: &mut Parser, dtype: &mut Datatype) -> Result<(), Error> {
    let primary = match parser.next_token() {
        Some(token) => token,
        None => {
            return Err(Error::new(
                ErrorKind::UnexpectedEndOfInput,
                parser.process.pos.clone(),
            ))
        }
    };
    let primary_spelling = match primary.text() {
        Some(spelling) => spelling.to_string(),
        None => {
            return Err(Error::new(
                ErrorKind::UnexpectedToken {
                    token: primary.value.to_string(),
                },
                primary.pos,
            ))
        }
    };

    let secondary_spelling = if parser
        .peek_next()
        .map_or(false, |token| token.is_primitive_keyword())
    {
        parser.next_token().and_then(|token| token.text().map(String::from))
    } else {
        None
    };

    let kind = kind_for_spelling(&primary_spelling);
    let type_name = if matches!(kind, DatatypeKind::Struct | DatatypeKind::Union) {
        let named = parser
            .peek_next()
            .map_or(false, |token| token.kind == TokenKind::Identifier);
        if named {
            match parser.next_token().and_then(|token| token.text().map(String::from)) {
                Some(name) => name,
                None => {
                    return Err(Error::new(
                        ErrorKind::UnexpectedEndOfInput,
                        parser.process.pos.clone(),
                    ))
                }
            }
        } else {
            dtype.flags |= DATATYPE_FLAG_STRUCT_UNION_NO_NAME;
            parser.process.next_type_name()
        }
    } else {
        primary_spelling.clone()
    };

    while parser.next_is_op("*") {
        parser.next_token();
        dtype.pointer_depth += 1;
    }

    init_datatype(parser, dtype, kind, type_name, secondary_spelling)?;
    Ok(())
}

fn init_datatype(
    parser: &mut Parser,
    dtype: &mut Datatype,
    kind: DatatypeKind,
    type_name: String,
    secondary_spelling: Option<String>,
) -> Result<(), Error> {
    dtype.kind = kind;
    dtype.type_str = type_name;

    match kind {
        DatatypeKind::Struct | DatatypeKind::Union => {
            if let Some(secondary) = secondary_spelling {
                return Err(Error::new(
                    ErrorKind::UnexpectedSecondaryDatatype {
                        datatype: secondary,
                    },
                    parser.process.pos.clone(),
                ));
            }
            dtype.size = 0;
        }
        _ => {
            dtype.size = primitive_size(kind);

            if let Some(secondary) = secondary_spelling {
                let allowed = matches!(
                    kind,
                    DatatypeKind::Float
                        | DatatypeKind::Double
                        | DatatypeKind::Short
                        | DatatypeKind::Long
                );
                if !allowed {
                    return Err(Error::new(
                        ErrorKind::UnexpectedSecondaryDatatype {
                            datatype: secondary,
                        },
                        parser.process.pos.clone(),
                    ));
                }

                let secondary_kind = kind_for_spelling(&secondary);
                dtype.size += primitive_size(secondary_kind);
                dtype.flags |= DATATYPE_FLAG_IS_SECONDARY;
                dtype.secondary = Some(Box::new(Datatype {
                    flags: dtype.flags,
                    kind: secondary_kind,
                    secondary: None,
                    type_str: secondary.clone(),
                    size: primitive_size(secondary_kind),
                    pointer_depth: 0,
                }));

                if kind == DatatypeKind::Long && secondary_kind == DatatypeKind::Long {
                    parser.process.warn(String::from(
                        "64 bit longs are not supported, `long long` is treated as 32 bits",
                    ));
                    dtype.size = 4;
                }
            }
        }
    }

    if dtype.pointer_depth > 0 {
        dtype.flags |= DATATYPE_FLAG_IS_POINTER;
    }

    Ok(())
}
