// crates/pitchreel-ui/src/helpers/format.rs
//
// UI-layer string utilities. Time formatting lives in
// pitchreel_core::helpers::time — this module holds utilities that are purely
// about rendering strings in the UI and have no meaning outside a display
// context.

/// Truncates `text` to fit within `max_px` using a per-character width
/// heuristic (11px proportional ≈ 6.5 px/char average). Appends "…" when
/// truncated. Avoids egui font measurement, which requires `&mut Fonts`.
///
/// Used for the saved-file banner and the canvas caption, where long titles
/// or paths would otherwise overflow their fixed-width slots.
pub fn fit_label(text: &str, max_px: f32) -> String {
    const AVG_CHAR_PX: f32 = 6.5;
    const ELLIPSIS: &str = "…";
    let max_chars = (max_px / AVG_CHAR_PX).max(0.0) as usize;
    let char_count = text.chars().count();
    if char_count <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    // Reserve one slot for the ellipsis character itself.
    let keep = max_chars.saturating_sub(1);
    text.chars().take(keep).collect::<String>() + ELLIPSIS
}

#[cfg(test)]
mod fit_label_tests {
    use super::*;

    #[test]
    fn short_text_unchanged() {
        assert_eq!(fit_label("trailer", 200.0), "trailer");
    }

    #[test]
    fn zero_budget_returns_empty() {
        assert_eq!(fit_label("trailer", 0.0), "");
    }

    #[test]
    fn truncated_text_has_ellipsis() {
        let result = fit_label("a very long movie title indeed", 30.0);
        assert!(result.ends_with('…'));
        assert!(result.chars().count() < "a very long movie title indeed".chars().count());
    }
}
