//! Map module - the line-oriented level file format
//!
//! ```text
//! line[0..H-1]   field rows; '#' = wall, anything else = empty; width = longest row
//! line[H]        direction word: up | down | left | right
//! line[H+1..H+3] snake body "X Y", head first
//! line[H+4]      integer max score
//! ```
//!
//! All three snake segments take the direction from line `H`.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{Error, MapError, Result};
use crate::field::Field;
use crate::snake::{Snake, SnakePart};
use crate::types::{Direction, Vector, EMPTY_SYMBOL, MAP_SNAKE_LENGTH, WALL_SYMBOL};

/// Lines after the field rows: direction, snake body, max score
const TRAILER_LINES: usize = MAP_SNAKE_LENGTH + 2;

/// Parse map text into a field and its max score
pub fn parse_map(text: &str) -> Result<(Field, i32)> {
    let mut lines: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    if lines.len() <= TRAILER_LINES {
        return Err(MapError::TooShort {
            expected: TRAILER_LINES + 1,
            found: lines.len(),
        }
        .into());
    }

    let height = lines.len() - TRAILER_LINES;
    let (rows, trailer) = lines.split_at(height);

    let mut walls = HashSet::new();
    let mut width = 0;
    for (y, row) in rows.iter().enumerate() {
        let mut row_width = 0;
        for (x, ch) in row.chars().enumerate() {
            row_width = x + 1;
            if ch == WALL_SYMBOL {
                walls.insert(Vector::new(x as i32, y as i32));
            }
        }
        width = width.max(row_width);
    }
    if width == 0 {
        return Err(MapError::EmptyField.into());
    }

    let direction_line = height + 1;
    let direction = Direction::from_word(trailer[0]).ok_or_else(|| MapError::UnknownDirection {
        line: direction_line,
        word: trailer[0].to_string(),
    })?;

    let parts = trailer[1..=MAP_SNAKE_LENGTH]
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let line = direction_line + 1 + i;
            let location = parse_coordinate(text, line)?;
            let inside = usize::try_from(location.x).is_ok_and(|x| x < width)
                && usize::try_from(location.y).is_ok_and(|y| y < height);
            if !inside {
                return Err(MapError::OutOfField {
                    line,
                    cell: location,
                    width,
                    height,
                });
            }
            Ok(SnakePart::new(location, direction))
        })
        .collect::<Result<Vec<_>, MapError>>()?;

    let score_line = direction_line + MAP_SNAKE_LENGTH + 1;
    let score_text = trailer[TRAILER_LINES - 1];
    let max_score = score_text.trim().parse().map_err(|_| MapError::BadScore {
        line: score_line,
        text: score_text.to_string(),
    })?;

    let field = Field::new(Snake::new(parts), walls, (width as i32, height as i32))?;
    Ok((field, max_score))
}

fn parse_coordinate(text: &str, line: usize) -> Result<Vector, MapError> {
    let bad = || MapError::BadCoordinate {
        line,
        text: text.to_string(),
    };
    let mut numbers = text.split_whitespace().map(str::parse::<i32>);
    match (numbers.next(), numbers.next(), numbers.next()) {
        (Some(Ok(x)), Some(Ok(y)), None) => Ok(Vector::new(x, y)),
        _ => Err(bad()),
    }
}

/// Render a field back into map lines. The snake must have exactly three segments.
pub fn anti_parse_map(field: &Field, max_score: i32) -> Result<Vec<String>> {
    let snake = field.snake();
    let head = match snake.head() {
        Some(head) if snake.len() == MAP_SNAKE_LENGTH => head,
        _ => {
            return Err(MapError::SnakeLength {
                expected: MAP_SNAKE_LENGTH,
                found: snake.len(),
            }
            .into())
        }
    };

    let mut lines = Vec::with_capacity(field.height() as usize + TRAILER_LINES);
    for y in 0..field.height() {
        let row: String = (0..field.width())
            .map(|x| {
                if field.walls().contains(&Vector::new(x, y)) {
                    WALL_SYMBOL
                } else {
                    EMPTY_SYMBOL
                }
            })
            .collect();
        lines.push(row);
    }

    lines.push(head.direction.as_word().to_string());
    lines.extend(
        snake
            .iter()
            .map(|part| format!("{} {}", part.location.x, part.location.y)),
    );
    lines.push(max_score.to_string());
    Ok(lines)
}

pub fn read_map(path: &Path) -> Result<(Field, i32)> {
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_map(&text)
}

pub fn write_map(path: &Path, field: &Field, max_score: i32) -> Result<()> {
    let mut text = anti_parse_map(field, max_score)?.join("\n");
    text.push('\n');
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| Error::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, text).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
