//! Layout confidence penalties.

use comply_core::config::LayoutConfig;

/// Penalty proportional to the jump ratio, capped.
pub fn jump_penalty(ratio: f64, config: &LayoutConfig) -> f64 {
    ratio.min(config.effective_jump_penalty_cap())
}

/// Penalty for a gutter narrower than the ideal (a fraction of page width).
/// Zero when the gutter meets or exceeds the ideal.
pub fn sidebar_penalty(gutter_width: f64, page_width: f64, config: &LayoutConfig) -> f64 {
    let ideal = page_width * config.effective_ideal_gutter_ratio();
    if ideal <= 0.0 {
        return 0.0;
    }
    let shortfall = ((ideal - gutter_width) / ideal).clamp(0.0, 1.0);
    config.effective_sidebar_penalty_weight() * shortfall
}

/// `1 − penalties`, floored and capped at 1.0.
pub fn finalize(penalties: f64, config: &LayoutConfig) -> f64 {
    (1.0 - penalties).clamp(config.effective_confidence_floor(), 1.0)
}
