//! What-if scenario model and projection engine.
//!
//! A scenario bundles a baseline metric, SHAP-style key drivers (display
//! only) and a set of weighted slider controls. The projection arithmetic is
//! deliberately small and total: it is a pure function of the scenario
//! definition and the current slider values, recomputed on every request.
//!
//! Malformed scenario definitions are a data error, not a runtime condition:
//! `validate_book` runs at seed-load time and aborts loudly, so the engine
//! itself never guards arithmetic.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A named feature with its signed contribution to the baseline prediction.
/// Rendered as a waterfall bar; not consumed by the projection arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyDriver {
    pub name: String,
    pub shap: f64,
}

/// One adjustable slider: `name` keys the user input, `weight` scales the
/// control's contribution to the projected delta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatIfControl {
    pub name: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RcaDriver {
    pub driver: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelLineage {
    pub sources: Vec<String>,
    pub transforms: Vec<String>,
    pub version: String,
    pub trained_on: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernanceBadge {
    pub label: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub insight: String,
    pub key_drivers: Vec<KeyDriver>,
    pub rca: Vec<RcaDriver>,
    pub lineage: ModelLineage,
    pub governance: Vec<GovernanceBadge>,
    pub what_if_controls: Vec<WhatIfControl>,
}

impl Scenario {
    pub fn control(&self, name: &str) -> Option<&WhatIfControl> {
        self.what_if_controls.iter().find(|c| c.name == name)
    }
}

/// Per-industry scenario bundle: the model behind the sandbox, the decision
/// variable it predicts, its baseline value and the explorable scenarios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioBook {
    pub model: String,
    pub decision_label: String,
    pub baseline_value: f64,
    pub scenarios: Vec<Scenario>,
}

impl ScenarioBook {
    pub fn scenario(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }
}

// =============================================================================
// Slider state
// =============================================================================

/// User-adjusted slider values, keyed by control name.
///
/// Created empty when a scenario is selected and discarded on back
/// navigation. A control with no entry projects at its declared default, so
/// an empty map always reproduces the untouched selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SliderValues {
    values: HashMap<String, f64>,
}

impl SliderValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Raw sum of every value the user has touched. Note: intentionally NOT
    /// scoped to the active scenario's controls, and untouched controls do
    /// not contribute their defaults. This mirrors the observed dashboard
    /// behavior and feeds `secondary_metrics` as-is.
    pub fn impact_sum(&self) -> f64 {
        self.values.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// =============================================================================
// Projection
// =============================================================================

/// Projects the scenario's primary metric under the current slider values.
///
/// Each control contributes `(value / 100) * (weight * baseline)`; the result
/// is clamped at zero. Pure and total: out-of-range slider values pass
/// through untouched (range enforcement belongs to the input widget).
pub fn project(scenario: &Scenario, values: &SliderValues, baseline: f64) -> f64 {
    let mut delta = 0.0;
    for control in &scenario.what_if_controls {
        let value = values.get(&control.name).unwrap_or(control.default);
        delta += (value / 100.0) * (control.weight * baseline);
    }
    (baseline + delta).max(0.0)
}

/// One row of the simulated-impact panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricRow {
    pub name: String,
    pub baseline: f64,
    pub simulated: f64,
    pub unit: String,
    pub delta: String,
    pub good: bool,
}

fn row(name: &str, baseline: f64, simulated: f64, unit: &str, delta: String, good: bool) -> MetricRow {
    MetricRow {
        name: name.to_string(),
        baseline,
        simulated,
        unit: unit.to_string(),
        delta,
        good,
    }
}

/// Derives the secondary metric panel from the slider state and the already
/// projected primary value. The retention/NPS/ARPU formulas are fixed demo
/// arithmetic over the raw slider sum.
pub fn secondary_metrics(values: &SliderValues, baseline: f64, simulated: f64) -> Vec<MetricRow> {
    let slider_impact = values.impact_sum();
    let churn_impact = baseline - slider_impact * 0.05;
    let retention = (100.0 - churn_impact * 0.5).min(100.0);
    let nps = 45.0 + slider_impact * 0.2;
    let arpu = 950.0 + slider_impact * 1.5;

    vec![
        row(
            "Predicted Churn",
            baseline,
            simulated,
            "%",
            format!("{:.1} pts ↓", baseline - simulated),
            simulated < baseline,
        ),
        row(
            "Customer Retention",
            78.5,
            retention,
            "%",
            format!("{:.1} pts", retention - 78.5),
            retention > 78.5,
        ),
        row(
            "Average NPS",
            45.0,
            nps,
            "",
            format!("{:.1} pts", nps - 45.0),
            nps > 45.0,
        ),
        row(
            "Avg ARPU",
            950.0,
            arpu,
            "",
            format!("{:.0}", arpu - 950.0),
            arpu > 950.0,
        ),
    ]
}

// =============================================================================
// Load-time validation
// =============================================================================

fn validate_control(scenario: &str, c: &WhatIfControl) -> Result<(), String> {
    if c.name.is_empty() {
        return Err(format!("scenario '{}': control with empty name", scenario));
    }
    for (field, v) in [
        ("min", c.min),
        ("max", c.max),
        ("default", c.default),
        ("weight", c.weight),
    ] {
        if !v.is_finite() {
            return Err(format!(
                "scenario '{}': control '{}' has non-finite {}",
                scenario, c.name, field
            ));
        }
    }
    if c.min > c.max {
        return Err(format!(
            "scenario '{}': control '{}' has min {} > max {}",
            scenario, c.name, c.min, c.max
        ));
    }
    if c.default < c.min || c.default > c.max {
        return Err(format!(
            "scenario '{}': control '{}' default {} outside [{}, {}]",
            scenario, c.name, c.default, c.min, c.max
        ));
    }
    Ok(())
}

/// Fail-fast validation of a scenario book, run once at seed load.
pub fn validate_book(industry: &str, book: &ScenarioBook) -> Result<(), String> {
    if !book.baseline_value.is_finite() || book.baseline_value < 0.0 {
        return Err(format!(
            "book '{}': bad baseline {}",
            industry, book.baseline_value
        ));
    }
    let mut scenario_names = std::collections::HashSet::new();
    for s in &book.scenarios {
        if s.name.is_empty() {
            return Err(format!("book '{}': scenario with empty name", industry));
        }
        if !scenario_names.insert(s.name.as_str()) {
            return Err(format!("book '{}': duplicate scenario '{}'", industry, s.name));
        }
        let mut control_names = std::collections::HashSet::new();
        for c in &s.what_if_controls {
            validate_control(&s.name, c)?;
            if !control_names.insert(c.name.as_str()) {
                return Err(format!(
                    "scenario '{}': duplicate control '{}'",
                    s.name, c.name
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control(name: &str, min: f64, max: f64, default: f64, weight: f64) -> WhatIfControl {
        WhatIfControl {
            name: name.to_string(),
            label: name.to_string(),
            min,
            max,
            default,
            weight,
        }
    }

    fn scenario(controls: Vec<WhatIfControl>) -> Scenario {
        Scenario {
            name: "test".to_string(),
            insight: String::new(),
            key_drivers: Vec::new(),
            rca: Vec::new(),
            lineage: ModelLineage {
                sources: Vec::new(),
                transforms: Vec::new(),
                version: "v1".to_string(),
                trained_on: "2025-01-01".to_string(),
            },
            governance: Vec::new(),
            what_if_controls: controls,
        }
    }

    #[test]
    fn untouched_sliders_with_zero_defaults_return_baseline() {
        let s = scenario(vec![
            control("a", -30.0, 30.0, 0.0, -0.25),
            control("b", -50.0, 50.0, 0.0, -0.18),
        ]);
        assert_eq!(project(&s, &SliderValues::new(), 21.5), 21.5);
    }

    #[test]
    fn nonzero_default_contributes_when_untouched() {
        // discount_rate in the Telco book defaults to 5, so the untouched
        // projection already deviates from the baseline.
        let s = scenario(vec![control("discount_rate", 0.0, 20.0, 5.0, 0.1)]);
        let simulated = project(&s, &SliderValues::new(), 21.5);
        let expected = 21.5 + (5.0 / 100.0) * (0.1 * 21.5);
        assert!((simulated - expected).abs() < 1e-12);
    }

    #[test]
    fn worked_example_from_telco_book() {
        let s = scenario(vec![control("dropped_calls_delta", -30.0, 30.0, 0.0, -0.25)]);
        let mut values = SliderValues::new();
        values.set("dropped_calls_delta", -10.0);
        let simulated = project(&s, &values, 21.5);
        assert!((simulated - 22.0375).abs() < 1e-12);
    }

    #[test]
    fn zero_controls_returns_baseline() {
        let s = scenario(Vec::new());
        assert_eq!(project(&s, &SliderValues::new(), 87.2), 87.2);
    }

    #[test]
    fn positive_weight_is_monotone_in_slider_value() {
        let s = scenario(vec![
            control("up", -20.0, 20.0, 0.0, 0.2),
            control("other", -20.0, 20.0, 0.0, -0.1),
        ]);
        let mut prev = f64::NEG_INFINITY;
        for v in [-20.0, -5.0, 0.0, 5.0, 20.0] {
            let mut values = SliderValues::new();
            values.set("up", v);
            values.set("other", 3.0);
            let simulated = project(&s, &values, 50.0);
            assert!(simulated > prev, "not monotone at {}", v);
            prev = simulated;
        }
    }

    #[test]
    fn never_negative_at_slider_extremes() {
        let s = scenario(vec![control("crash", -100.0, 100.0, 0.0, -60.0)]);
        let mut values = SliderValues::new();
        values.set("crash", 100.0);
        assert_eq!(project(&s, &values, 10.0), 0.0);
    }

    #[test]
    fn deterministic_bit_identical() {
        let s = scenario(vec![
            control("a", -30.0, 30.0, 0.0, -0.25),
            control("b", 0.0, 20.0, 5.0, 0.1),
        ]);
        let mut values = SliderValues::new();
        values.set("a", 13.7);
        let one = project(&s, &values, 21.5);
        let two = project(&s, &values, 21.5);
        assert_eq!(one.to_bits(), two.to_bits());
    }

    #[test]
    fn out_of_range_slider_values_are_tolerated() {
        let s = scenario(vec![control("a", -10.0, 10.0, 0.0, 0.5)]);
        let mut values = SliderValues::new();
        values.set("a", 10_000.0);
        let simulated = project(&s, &values, 20.0);
        assert!(simulated.is_finite());
    }

    #[test]
    fn missing_entry_falls_back_to_default() {
        let s = scenario(vec![
            control("present", -10.0, 10.0, 0.0, 0.1),
            control("absent", 0.0, 20.0, 5.0, 0.2),
        ]);
        let mut values = SliderValues::new();
        values.set("present", 4.0);
        // "absent" projects at its default of 5.
        let expected = 20.0 + (4.0 / 100.0) * (0.1 * 20.0) + (5.0 / 100.0) * (0.2 * 20.0);
        assert!((project(&s, &values, 20.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn reselect_resets_to_defaults() {
        let s = scenario(vec![control("a", -30.0, 30.0, 0.0, -0.25)]);
        let first = project(&s, &SliderValues::new(), 21.5);

        let mut values = SliderValues::new();
        values.set("a", 25.0);
        let dragged = project(&s, &values, 21.5);
        assert_ne!(first, dragged);

        // Back navigation discards the map; re-selection starts fresh.
        let reselected = project(&s, &SliderValues::new(), 21.5);
        assert_eq!(first, reselected);
    }

    #[test]
    fn secondary_metrics_at_rest() {
        let baseline = 21.5;
        let rows = secondary_metrics(&SliderValues::new(), baseline, baseline);
        assert_eq!(rows.len(), 4);

        let retention = &rows[1];
        assert!((retention.simulated - (100.0 - baseline * 0.5)).abs() < 1e-12);
        assert_eq!(rows[2].simulated, 45.0);
        assert_eq!(rows[3].simulated, 950.0);
        // Nothing moved, so nothing is "good".
        assert!(rows.iter().all(|r| !r.good));
    }

    #[test]
    fn secondary_metrics_respond_to_slider_sum() {
        let mut values = SliderValues::new();
        values.set("x", 10.0);
        values.set("y", -4.0);
        // impact = 6
        let rows = secondary_metrics(&values, 21.5, 21.0);
        assert!((rows[2].simulated - 46.2).abs() < 1e-12);
        assert!((rows[3].simulated - 959.0).abs() < 1e-12);
        assert!(rows[0].good); // simulated below baseline
        assert!(rows[2].good);
        assert!(rows[3].good);
    }

    #[test]
    fn retention_is_capped_at_100() {
        let mut values = SliderValues::new();
        values.set("x", 10_000.0);
        let rows = secondary_metrics(&values, 21.5, 0.0);
        assert_eq!(rows[1].simulated, 100.0);
    }

    #[test]
    fn validate_rejects_inverted_range() {
        let mut book = ScenarioBook {
            model: "m".to_string(),
            decision_label: "d".to_string(),
            baseline_value: 10.0,
            scenarios: vec![scenario(vec![control("a", 5.0, -5.0, 0.0, 0.1)])],
        };
        assert!(validate_book("test", &book).is_err());

        book.scenarios = vec![scenario(vec![control("a", -5.0, 5.0, 9.0, 0.1)])];
        assert!(validate_book("test", &book).is_err());

        book.scenarios = vec![scenario(vec![control("a", -5.0, 5.0, 0.0, f64::NAN)])];
        assert!(validate_book("test", &book).is_err());

        book.scenarios = vec![scenario(vec![
            control("a", -5.0, 5.0, 0.0, 0.1),
            control("a", -5.0, 5.0, 0.0, 0.2),
        ])];
        assert!(validate_book("test", &book).is_err());

        book.scenarios = vec![scenario(vec![control("a", -5.0, 5.0, 0.0, 0.1)])];
        assert!(validate_book("test", &book).is_ok());
    }
}
