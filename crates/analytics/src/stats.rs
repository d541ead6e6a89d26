// In crates/analytics/src/stats.rs

//! Stateless numeric helpers shared by every metric.
//!
//! None of these functions return NaN or infinity: degenerate inputs
//! short-circuit to zero or to a clamped denominator.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// z-value for a two-sided 95% interval.
const Z_95: f64 = 1.96;

/// Letter grade shared by every composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Grade {
    A,
    B,
    C,
    D,
    #[default]
    F,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(letter)
    }
}

/// Maps a 0-100 score onto the A-F table.
pub fn score_to_grade(score: f64) -> Grade {
    if score >= 90.0 {
        Grade::A
    } else if score >= 80.0 {
        Grade::B
    } else if score >= 70.0 {
        Grade::C
    } else if score >= 60.0 {
        Grade::D
    } else {
        Grade::F
    }
}

pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Population variance (divides by n). Zero for fewer than two values.
pub fn variance(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        return 0.0;
    }
    let m = mean(xs);
    xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / xs.len() as f64
}

/// Population standard deviation. Zero for fewer than two values.
pub fn std_dev(xs: &[f64]) -> f64 {
    variance(xs).sqrt()
}

/// `std_dev / |mean|`. A zero mean is replaced by 1 so the ratio stays
/// finite; callers rely on this clamp.
pub fn coefficient_of_variation(xs: &[f64]) -> f64 {
    let m = mean(xs).abs();
    let denominator = if m == 0.0 { 1.0 } else { m };
    std_dev(xs) / denominator
}

/// Pearson correlation. Zero when the series are empty, of different
/// lengths, or either one is constant.
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len();
    if n == 0 || n != ys.len() {
        return 0.0;
    }
    let n_f = n as f64;

    let sum_x: f64 = xs.iter().sum();
    let sum_y: f64 = ys.iter().sum();
    let sum_xy: f64 = xs.iter().zip(ys).map(|(x, y)| x * y).sum();
    let sum_x2: f64 = xs.iter().map(|x| x * x).sum();
    let sum_y2: f64 = ys.iter().map(|y| y * y).sum();

    let numerator = n_f * sum_xy - sum_x * sum_y;
    let denominator = ((n_f * sum_x2 - sum_x * sum_x) * (n_f * sum_y2 - sum_y * sum_y)).sqrt();

    if denominator == 0.0 || !denominator.is_finite() {
        0.0
    } else {
        (numerator / denominator).clamp(-1.0, 1.0)
    }
}

/// Shannon entropy, in bits, of a frequency table.
pub fn shannon_entropy<K>(counts: &BTreeMap<K, usize>) -> f64 {
    let total: usize = counts.values().sum();
    if total == 0 {
        return 0.0;
    }
    counts
        .values()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total as f64;
            -p * p.log2()
        })
        .sum()
}

/// Entropy divided by its maximum `log2(k)`, in `[0, 1]`.
/// Zero when there are fewer than two categories.
pub fn normalized_entropy<K>(counts: &BTreeMap<K, usize>) -> f64 {
    let categories = counts.values().filter(|&&c| c > 0).count();
    if categories < 2 {
        return 0.0;
    }
    shannon_entropy(counts) / (categories as f64).log2()
}

/// `score ± 1.96·σ/√n`, clamped to `[lo, hi]`.
pub fn confidence_interval_95(score: f64, std_dev: f64, n: usize, lo: f64, hi: f64) -> (f64, f64) {
    if n == 0 {
        let s = score.clamp(lo, hi);
        return (s, s);
    }
    let margin = Z_95 * std_dev / (n as f64).sqrt();
    ((score - margin).clamp(lo, hi), (score + margin).clamp(lo, hi))
}

/// `part / whole · 100`, zero when `whole` is zero.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Clamps into `[0, 100]`, mapping NaN to zero.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() { 0.0 } else { score.clamp(0.0, 100.0) }
}

/// Gross profit over gross loss (absolute). When nothing was lost the
/// gross profit itself is returned.
pub fn profit_factor(gross_profit: f64, gross_loss: f64) -> f64 {
    if gross_loss == 0.0 {
        gross_profit
    } else {
        gross_profit / gross_loss
    }
}

/// Expectancy per trade from a percentage win rate and the win/loss
/// totals. Breakeven trades fall into the non-win share.
pub fn expectancy(win_rate: f64, gross_profit: f64, wins: usize, gross_loss: f64, losses: usize) -> f64 {
    let avg_win = gross_profit / wins.max(1) as f64;
    let avg_loss = gross_loss / losses.max(1) as f64;
    (win_rate / 100.0) * avg_win - ((100.0 - win_rate) / 100.0) * avg_loss
}
