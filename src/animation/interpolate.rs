use crate::{
    animation::ease::Ease,
    foundation::error::{ReeltimeError, ReeltimeResult},
};

/// What to return for inputs outside the first/last breakpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Continue along the slope of the outermost segment.
    #[default]
    Extend,
    /// Hold the outermost output value.
    Clamp,
    /// Return the input unchanged.
    Identity,
}

/// Extrapolation policy for both ends plus the in-segment easing.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InterpolateOptions {
    /// Policy below the first breakpoint.
    #[serde(default)]
    pub left: Extrapolate,
    /// Policy above the last breakpoint.
    #[serde(default)]
    pub right: Extrapolate,
    /// Easing applied to progress inside each segment. Extrapolation stays linear.
    #[serde(default)]
    pub ease: Ease,
}

impl InterpolateOptions {
    /// Extend on both sides.
    pub const EXTEND: Self = Self {
        left: Extrapolate::Extend,
        right: Extrapolate::Extend,
        ease: Ease::Linear,
    };

    /// Clamp on both sides.
    pub const CLAMP: Self = Self {
        left: Extrapolate::Clamp,
        right: Extrapolate::Clamp,
        ease: Ease::Linear,
    };

    /// Extend on the left, clamp on the right.
    pub const CLAMP_RIGHT: Self = Self {
        left: Extrapolate::Extend,
        right: Extrapolate::Clamp,
        ease: Ease::Linear,
    };

    /// Same policy with a different easing.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// Map `x` through the piecewise-linear curve `input_range -> output_range`.
///
/// `input_range` must be strictly increasing, finite, at least two entries long and the same
/// length as `output_range`.
pub fn interpolate(
    x: f64,
    input_range: &[f64],
    output_range: &[f64],
    opts: InterpolateOptions,
) -> ReeltimeResult<f64> {
    validate_ranges(input_range, output_range)?;
    Ok(sample_validated(x, input_range, output_range, opts))
}

/// A breakpoint curve validated once and sampled infallibly afterwards.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Curve {
    input: Vec<f64>,
    output: Vec<f64>,
    opts: InterpolateOptions,
}

impl Curve {
    /// Validate and capture the breakpoints.
    pub fn new(
        input: impl Into<Vec<f64>>,
        output: impl Into<Vec<f64>>,
        opts: InterpolateOptions,
    ) -> ReeltimeResult<Self> {
        let input = input.into();
        let output = output.into();
        validate_ranges(&input, &output)?;
        Ok(Self {
            input,
            output,
            opts,
        })
    }

    /// Two-breakpoint curve `[x0, x1] -> [y0, y1]`.
    pub fn linear(
        x0: f64,
        x1: f64,
        y0: f64,
        y1: f64,
        opts: InterpolateOptions,
    ) -> ReeltimeResult<Self> {
        Self::new(vec![x0, x1], vec![y0, y1], opts)
    }

    /// Evaluate the curve at `x`.
    pub fn sample(&self, x: f64) -> f64 {
        sample_validated(x, &self.input, &self.output, self.opts)
    }

    /// Input breakpoints.
    pub fn input_range(&self) -> &[f64] {
        &self.input
    }

    /// Output values.
    pub fn output_range(&self) -> &[f64] {
        &self.output
    }
}

fn validate_ranges(input: &[f64], output: &[f64]) -> ReeltimeResult<()> {
    if input.len() != output.len() {
        return Err(ReeltimeError::invalid_range(format!(
            "input range has {} breakpoints but output range has {}",
            input.len(),
            output.len()
        )));
    }
    if input.len() < 2 {
        return Err(ReeltimeError::invalid_range(
            "interpolation needs at least two breakpoints",
        ));
    }
    if let Some(i) = input
        .iter()
        .chain(output)
        .position(|v| !v.is_finite())
    {
        return Err(ReeltimeError::invalid_range(format!(
            "breakpoint value #{i} is not finite"
        )));
    }
    if let Some(i) = input.windows(2).position(|w| w[0] >= w[1]) {
        return Err(ReeltimeError::invalid_range(format!(
            "input range must be strictly increasing (index {} is {} then {})",
            i,
            input[i],
            input[i + 1]
        )));
    }
    Ok(())
}

fn sample_validated(x: f64, input: &[f64], output: &[f64], opts: InterpolateOptions) -> f64 {
    let n = input.len();
    if x < input[0] {
        match opts.left {
            Extrapolate::Clamp => return output[0],
            Extrapolate::Identity => return x,
            Extrapolate::Extend => {}
        }
    }
    if x > input[n - 1] {
        match opts.right {
            Extrapolate::Clamp => return output[n - 1],
            Extrapolate::Identity => return x,
            Extrapolate::Extend => {}
        }
    }

    // Segment whose left breakpoint is the last one <= x, clamped to the outer segments.
    let seg = input[1..n - 1].partition_point(|&b| b <= x);
    let (x0, x1) = (input[seg], input[seg + 1]);
    let (y0, y1) = (output[seg], output[seg + 1]);

    let t = (x - x0) / (x1 - x0);
    let t = if (0.0..=1.0).contains(&t) {
        opts.ease.apply(t)
    } else {
        t
    };
    // Weighted form is exact at both breakpoints.
    y0 * (1.0 - t) + y1 * t
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
