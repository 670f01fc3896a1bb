/// Parsing of numeric inputs and command scripts
use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{multispace0, one_of, space0, space1},
    combinator::{all_consuming, map, opt, value},
    multi::separated_list0,
    number::complete::float,
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

use crate::error::InputError;
use crate::transform::{Command, SCALE_DOWN, SCALE_UP};

/// Parse the text of a numeric input field.
///
/// An empty field reads as zero.
pub fn parse_number(field: &'static str, text: &str) -> Result<f32, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0.0);
    }

    let value = match all_consuming(float::<&str, nom::error::Error<&str>>)(text) {
        Ok((_, value)) => value,
        Err(_) => {
            return Err(InputError::InvalidNumber {
                field,
                text: text.to_string(),
            })
        }
    };

    if !value.is_finite() {
        return Err(InputError::NonFinite { field, value });
    }
    Ok(value)
}

/// Parse a command script such as `shift 2 0 0; scale 2; reset`.
///
/// Commands are separated by `;` or newlines. Keywords are case-insensitive.
pub fn parse_script(input: &str) -> Result<Vec<Command>, InputError> {
    let parsed = all_consuming(delimited(
        multispace0,
        separated_list0(separator, command),
        pair(opt(separator), multispace0),
    ))(input);

    let commands = match parsed {
        Ok((_, commands)) => commands,
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            return Err(InputError::Syntax {
                near: e.input.chars().take(24).collect(),
            })
        }
        Err(nom::Err::Incomplete(_)) => {
            return Err(InputError::Syntax {
                near: String::new(),
            })
        }
    };

    commands.into_iter().map(Command::validate).collect()
}

fn separator(input: &str) -> IResult<&str, char> {
    delimited(space0, one_of(";\r\n"), multispace0)(input)
}

fn command(input: &str) -> IResult<&str, Command> {
    alt((shift, scale, grow, shrink, reset))(input)
}

fn argument(input: &str) -> IResult<&str, f32> {
    preceded(space1, float)(input)
}

fn shift(input: &str) -> IResult<&str, Command> {
    map(
        preceded(tag_no_case("shift"), tuple((argument, argument, argument))),
        |(x, y, z)| Command::shift(x, y, z),
    )(input)
}

fn scale(input: &str) -> IResult<&str, Command> {
    map(preceded(tag_no_case("scale"), argument), Command::Scale)(input)
}

fn grow(input: &str) -> IResult<&str, Command> {
    value(Command::Scale(SCALE_UP), tag_no_case("grow"))(input)
}

fn shrink(input: &str) -> IResult<&str, Command> {
    value(Command::Scale(SCALE_DOWN), tag_no_case("shrink"))(input)
}

fn reset(input: &str) -> IResult<&str, Command> {
    value(Command::Reset, tag_no_case("reset"))(input)
}
