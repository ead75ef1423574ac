//! Size estimation engine.
//!
//! Maps a snapshot of quiz answers to size recommendations:
//! - BMI bucketed ladders per gender and silhouette for tops and bottoms
//! - Height-driven shoe size with weight nudges, clamped per gender
//! - Fit recommendation from the two silhouette keys
//!
//! The engine is pure and total. It never validates measurement ranges;
//! degenerate measurements fall back to a BMI of zero.

use crate::{
    BellyShape, ChestShape, FitRecommendation, Gender, ProductRecommendation, QuizData,
    SizeResult, TopSize,
};
use TopSize::{ExtraLarge as XL, ExtraSmall as XS, Large as L, Medium as M, Small as S};

/// UK to EU shoe size offset (empirical approximation)
pub const EU_SHOE_OFFSET: f64 = 33.0;

/// A BMI threshold ladder: the first rung whose limit exceeds the BMI wins,
/// otherwise the top value applies.
struct Ladder<T: 'static> {
    rungs: &'static [(f64, T)],
    top: T,
}

impl<T: Copy> Ladder<T> {
    fn pick(&self, bmi: f64) -> T {
        self.rungs
            .iter()
            .find(|(limit, _)| bmi < *limit)
            .map(|(_, value)| *value)
            .unwrap_or(self.top)
    }
}

static MALE_TOP_SLIMMER: Ladder<TopSize> = Ladder { rungs: &[(22.0, S), (25.0, M)], top: L };
static MALE_TOP_BROADER: Ladder<TopSize> = Ladder { rungs: &[(20.0, M), (23.0, L)], top: XL };
static MALE_TOP_AVERAGE: Ladder<TopSize> = Ladder {
    rungs: &[(21.0, S), (24.0, M), (27.0, L)],
    top: XL,
};
static FEMALE_TOP_SLIMMER: Ladder<TopSize> = Ladder { rungs: &[(20.0, XS), (23.0, S)], top: M };
static FEMALE_TOP_BROADER: Ladder<TopSize> = Ladder { rungs: &[(19.0, S), (22.0, M)], top: L };
static FEMALE_TOP_AVERAGE: Ladder<TopSize> = Ladder {
    rungs: &[(20.0, XS), (23.0, S), (26.0, M)],
    top: L,
};

static MALE_BOTTOM_FLATTER: Ladder<&str> = Ladder {
    rungs: &[(22.0, "30-32"), (25.0, "32-34")],
    top: "34-36",
};
static MALE_BOTTOM_ROUNDED: Ladder<&str> = Ladder {
    rungs: &[(21.0, "32-34"), (24.0, "34-36")],
    top: "36-38",
};
static MALE_BOTTOM_AVERAGE: Ladder<&str> = Ladder {
    rungs: &[(22.0, "30-32"), (25.0, "32-34"), (28.0, "34-36")],
    top: "36-38",
};
static FEMALE_BOTTOM_FLATTER: Ladder<&str> = Ladder {
    rungs: &[(21.0, "UK 6-8"), (24.0, "UK 8-10")],
    top: "UK 10-12",
};
static FEMALE_BOTTOM_ROUNDED: Ladder<&str> = Ladder {
    rungs: &[(20.0, "UK 8-10"), (23.0, "UK 10-12")],
    top: "UK 12-14",
};
static FEMALE_BOTTOM_AVERAGE: Ladder<&str> = Ladder {
    rungs: &[(21.0, "UK 6-8"), (24.0, "UK 8-10"), (27.0, "UK 10-12")],
    top: "UK 12-14",
};

/// Parameters of the height-driven shoe size estimate
struct ShoeRule {
    height_offset: f64,
    heavy_above: f64,
    light_below: f64,
    min: f64,
    max: f64,
}

static MALE_SHOES: ShoeRule = ShoeRule {
    height_offset: 100.0,
    heavy_above: 80.0,
    light_below: 60.0,
    min: 6.0,
    max: 12.0,
};

static FEMALE_SHOES: ShoeRule = ShoeRule {
    height_offset: 105.0,
    heavy_above: 70.0,
    light_below: 50.0,
    min: 3.0,
    max: 9.0,
};

/// Body mass index, or 0 when either measurement is not positive
pub fn bmi(height_cm: f64, weight_kg: f64) -> f64 {
    if height_cm > 0.0 && weight_kg > 0.0 {
        let meters = height_cm / 100.0;
        weight_kg / (meters * meters)
    } else {
        0.0
    }
}

/// Compute size recommendations for a set of quiz answers
///
/// Unset silhouettes use the average ladder. An unset gender uses the
/// female tables.
pub fn compute_sizes(data: &QuizData) -> SizeResult {
    let bmi = bmi(data.height, data.weight);
    let gender = data.gender.unwrap_or(Gender::Female);

    let top_size = top_ladder(gender, data.chest_shape).pick(bmi);
    let bottom_size = bottom_ladder(gender, data.belly_shape).pick(bmi);

    let uk = shoe_size_uk(gender, data.height, data.weight);
    let eu = uk + EU_SHOE_OFFSET;

    let fit = fit_recommendation(data.belly_shape, data.chest_shape);

    tracing::debug!(
        "Computed sizes: bmi={:.2}, top={}, bottom={}, shoe_uk={}, fit={}",
        bmi,
        top_size,
        bottom_size,
        uk,
        fit
    );

    SizeResult {
        top_size,
        bottom_size: bottom_size.to_string(),
        shoe_size_uk: format_shoe_size(uk),
        shoe_size_eu: format_shoe_size(eu),
        fit_recommendation: fit,
        fit_description: fit.description().to_string(),
        product_type: data.product_type,
    }
}

fn top_ladder(gender: Gender, chest: Option<ChestShape>) -> &'static Ladder<TopSize> {
    match (gender, chest) {
        (Gender::Male, Some(ChestShape::Slimmer)) => &MALE_TOP_SLIMMER,
        (Gender::Male, Some(ChestShape::Broader)) => &MALE_TOP_BROADER,
        (Gender::Male, Some(ChestShape::Average) | None) => &MALE_TOP_AVERAGE,
        (Gender::Female, Some(ChestShape::Slimmer)) => &FEMALE_TOP_SLIMMER,
        (Gender::Female, Some(ChestShape::Broader)) => &FEMALE_TOP_BROADER,
        (Gender::Female, Some(ChestShape::Average) | None) => &FEMALE_TOP_AVERAGE,
    }
}

fn bottom_ladder(gender: Gender, belly: Option<BellyShape>) -> &'static Ladder<&'static str> {
    match (gender, belly) {
        (Gender::Male, Some(BellyShape::Flatter)) => &MALE_BOTTOM_FLATTER,
        (Gender::Male, Some(BellyShape::Rounded)) => &MALE_BOTTOM_ROUNDED,
        (Gender::Male, Some(BellyShape::Average) | None) => &MALE_BOTTOM_AVERAGE,
        (Gender::Female, Some(BellyShape::Flatter)) => &FEMALE_BOTTOM_FLATTER,
        (Gender::Female, Some(BellyShape::Rounded)) => &FEMALE_BOTTOM_ROUNDED,
        (Gender::Female, Some(BellyShape::Average) | None) => &FEMALE_BOTTOM_AVERAGE,
    }
}

/// UK shoe size estimate; may be a half size
pub fn shoe_size_uk(gender: Gender, height_cm: f64, weight_kg: f64) -> f64 {
    let rule = match gender {
        Gender::Male => &MALE_SHOES,
        Gender::Female => &FEMALE_SHOES,
    };

    // Halves round toward positive infinity
    let mut size = ((height_cm - rule.height_offset) / 10.0 + 0.5).floor();
    if weight_kg > rule.heavy_above {
        size += 0.5;
    }
    if weight_kg < rule.light_below {
        size -= 0.5;
    }

    // NaN heights collapse onto the lower bound
    if size.is_nan() {
        return rule.min;
    }
    size.clamp(rule.min, rule.max)
}

/// Whole sizes print without decimals, half sizes with one
pub fn format_shoe_size(size: f64) -> String {
    if size.fract() == 0.0 {
        format!("{:.0}", size)
    } else {
        format!("{:.1}", size)
    }
}

/// First match wins: fitted, then relaxed, then regular
pub fn fit_recommendation(
    belly: Option<BellyShape>,
    chest: Option<ChestShape>,
) -> FitRecommendation {
    if belly == Some(BellyShape::Flatter) && chest == Some(ChestShape::Slimmer) {
        FitRecommendation::Fitted
    } else if belly == Some(BellyShape::Rounded) || chest == Some(ChestShape::Broader) {
        FitRecommendation::Relaxed
    } else {
        FitRecommendation::Regular
    }
}

impl SizeResult {
    /// Product-specific wording, or `None` when no product was chosen
    ///
    /// Trousers quote the bottom size; every other product quotes the top
    /// size. The sizes themselves are unchanged.
    pub fn product_recommendation(&self) -> Option<ProductRecommendation> {
        let product = self.product_type?;
        let size = if product.is_bottomwear() {
            self.bottom_size.clone()
        } else {
            self.top_size.to_string()
        };

        Some(ProductRecommendation {
            product_type: product,
            message: format!("{} — Size {}: {}", product.label(), size, self.fit_description),
            size_label: size,
        })
    }
}
