use crate::theme::LabelTheme;

/// Width of a label's background box. A per-character estimate, not a
/// measurement: wide glyphs overflow and narrow ones leave slack.
pub fn estimate_label_width(text: &str, label: &LabelTheme) -> f64 {
    text.chars().count() as f64 * label.char_width + label.padding
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_chars_times_constant_plus_padding() {
        let label = LabelTheme::default();
        assert_eq!(estimate_label_width("", &label), 16.0);
        assert_eq!(estimate_label_width("Circle", &label), 64.0);
        // counts characters, not bytes
        assert_eq!(estimate_label_width("Ištar", &label), 56.0);
    }
}
