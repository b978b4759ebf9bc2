use super::types::TextBlock;

// Approximate glyph advance as a fraction of the font size, grouped by
// visual weight. Close enough for axis and legend sizing without touching
// a font database.
pub(crate) fn char_width_factor(ch: char) -> f32 {
    match ch {
        'i' | 'j' | 'l' | '\'' | '!' | '|' => 0.28,
        'f' | 't' | 'r' | 'I' => 0.36,
        ' ' | '.' | ',' | ':' | ';' | '(' | ')' | '[' | ']' => 0.32,
        'm' | 'w' | 'M' | 'W' | '@' | '%' | '&' => 0.89,
        'A'..='Z' => 0.67,
        '0'..='9' => 0.60,
        _ => 0.55,
    }
}

pub(crate) fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width_factor).sum::<f32>() * font_size
}

pub(crate) fn measure_label(text: &str, font_size: f32, line_height: f32) -> TextBlock {
    let lines: Vec<String> = if text.is_empty() {
        vec![String::new()]
    } else {
        text.split('\n').map(|line| line.trim().to_string()).collect()
    };
    let width = lines
        .iter()
        .map(|line| text_width(line, font_size))
        .fold(0.0, f32::max);
    let height = lines.len() as f32 * font_size * line_height;
    TextBlock {
        lines,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_scales_with_font_size() {
        let narrow = text_width("Hello", 14.0);
        let wide = text_width("Hello", 28.0);
        assert!((wide - narrow * 2.0).abs() < 0.01);
    }

    #[test]
    fn wide_glyphs_measure_wider() {
        assert!(text_width("mmm", 14.0) > text_width("iii", 14.0));
    }

    #[test]
    fn empty_label_still_has_one_line() {
        let block = measure_label("", 14.0, 1.4);
        assert_eq!(block.lines.len(), 1);
        assert!(block.height > 0.0);
    }
}
