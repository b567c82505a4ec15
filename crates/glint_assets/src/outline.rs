use glam::Vec2;

use crate::AssetError;

/// Line segments per quadratic/cubic curve when flattening.
pub const CURVE_SEGMENTS: usize = 8;

/// Flattens a typeface outline string into closed contours.
///
/// Commands follow the three.js FontLoader convention: `m x y` starts a
/// contour, `l x y` adds a line, `q x y cx cy` and `b x y c1x c1y c2x c2y`
/// add curves with the end point first and control points after, `z` closes
/// the current contour. All coordinates are multiplied by `scale`.
pub fn flatten_outline(outline: &str, scale: f32) -> Result<Vec<Vec<Vec2>>, AssetError> {
    let mut tokens = outline.split_whitespace();
    let mut contours: Vec<Vec<Vec2>> = Vec::new();
    let mut current: Vec<Vec2> = Vec::new();

    while let Some(command) = tokens.next() {
        match command {
            "m" => {
                finish_contour(&mut contours, &mut current);
                current.push(read_point(&mut tokens, scale)?);
            }
            "l" => {
                current.push(read_point(&mut tokens, scale)?);
            }
            "q" => {
                let end = read_point(&mut tokens, scale)?;
                let ctrl = read_point(&mut tokens, scale)?;
                let start = last_point(&current, "q")?;
                for step in 1..=CURVE_SEGMENTS {
                    let t = step as f32 / CURVE_SEGMENTS as f32;
                    current.push(quadratic_point(start, ctrl, end, t));
                }
            }
            "b" => {
                let end = read_point(&mut tokens, scale)?;
                let ctrl1 = read_point(&mut tokens, scale)?;
                let ctrl2 = read_point(&mut tokens, scale)?;
                let start = last_point(&current, "b")?;
                for step in 1..=CURVE_SEGMENTS {
                    let t = step as f32 / CURVE_SEGMENTS as f32;
                    current.push(cubic_point(start, ctrl1, ctrl2, end, t));
                }
            }
            "z" | "Z" => {
                finish_contour(&mut contours, &mut current);
            }
            other => {
                return Err(AssetError::Outline(format!(
                    "unknown outline command {other:?}"
                )));
            }
        }
    }

    finish_contour(&mut contours, &mut current);
    Ok(contours)
}

/// Signed area of a closed contour; positive for counter-clockwise winding.
pub fn signed_area(contour: &[Vec2]) -> f32 {
    let mut area = 0.0;
    for i in 0..contour.len() {
        let a = contour[i];
        let b = contour[(i + 1) % contour.len()];
        area += a.x * b.y - b.x * a.y;
    }
    area * 0.5
}

fn finish_contour(contours: &mut Vec<Vec<Vec2>>, current: &mut Vec<Vec2>) {
    if current.is_empty() {
        return;
    }
    let mut contour = std::mem::take(current);
    // Drop an explicit closing point that repeats the start.
    if contour.len() > 1 && contour.first() == contour.last() {
        contour.pop();
    }
    // Fewer than 3 points cannot enclose anything.
    if contour.len() >= 3 {
        contours.push(contour);
    }
}

fn read_point<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    scale: f32,
) -> Result<Vec2, AssetError> {
    let x = read_number(tokens)?;
    let y = read_number(tokens)?;
    Ok(Vec2::new(x * scale, y * scale))
}

fn read_number<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<f32, AssetError> {
    let token = tokens
        .next()
        .ok_or_else(|| AssetError::Outline("truncated outline".to_string()))?;
    token
        .parse::<f32>()
        .map_err(|_| AssetError::Outline(format!("expected a number, found {token:?}")))
}

fn last_point(current: &[Vec2], command: &str) -> Result<Vec2, AssetError> {
    current
        .last()
        .copied()
        .ok_or_else(|| AssetError::Outline(format!("{command:?} with no current point")))
}

fn quadratic_point(start: Vec2, ctrl: Vec2, end: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    u * u * start + 2.0 * u * t * ctrl + t * t * end
}

fn cubic_point(start: Vec2, ctrl1: Vec2, ctrl2: Vec2, end: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    u * u * u * start + 3.0 * u * u * t * ctrl1 + 3.0 * u * t * t * ctrl2 + t * t * t * end
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lines_become_a_single_contour() {
        let contours = flatten_outline("m 0 0 l 10 0 l 10 10 l 0 10 z", 0.1).unwrap();
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].len(), 4);
        assert_relative_eq!(contours[0][2].x, 1.0);
        assert_relative_eq!(contours[0][2].y, 1.0);
    }

    #[test]
    fn quadratics_are_flattened_and_end_on_the_end_point() {
        let contours = flatten_outline("m 0 0 q 10 0 5 5 l 5 -1", 1.0).unwrap();
        let contour = &contours[0];
        // 1 move + CURVE_SEGMENTS curve samples + 1 line
        assert_eq!(contour.len(), CURVE_SEGMENTS + 2);
        let curve_end = contour[CURVE_SEGMENTS];
        assert_relative_eq!(curve_end.x, 10.0);
        assert_relative_eq!(curve_end.y, 0.0);
    }

    #[test]
    fn each_move_starts_a_new_contour() {
        let contours =
            flatten_outline("m 0 0 l 4 0 l 4 4 m 10 10 l 14 10 l 14 14", 1.0).unwrap();
        assert_eq!(contours.len(), 2);
    }

    #[test]
    fn winding_is_visible_in_the_signed_area() {
        let ccw = flatten_outline("m 0 0 l 10 0 l 10 10 l 0 10", 1.0).unwrap();
        let cw = flatten_outline("m 0 0 l 0 10 l 10 10 l 10 0", 1.0).unwrap();
        assert!(signed_area(&ccw[0]) > 0.0);
        assert!(signed_area(&cw[0]) < 0.0);
    }

    #[test]
    fn truncated_and_unknown_commands_error() {
        assert!(flatten_outline("m 0", 1.0).is_err());
        assert!(flatten_outline("m 0 0 l 1 x", 1.0).is_err());
        assert!(flatten_outline("m 0 0 v 1 2", 1.0).is_err());
    }
}
