//! Sequential Minimal Optimization (SMO) solver
//!
//! Solves the soft-margin SVM dual in its minimization form
//!
//! ```text
//! min  1/2 sum_ij a_i a_j y_i y_j K(x_i, x_j) - sum(a_i)
//! s.t. 0 <= a_i <= C,  sum(a_i y_i) = 0
//! ```
//!
//! by repeatedly optimizing a pair of multipliers analytically. The solver
//! keeps the dual gradient `G_t = y_t f(x_t) - 1` (bias excluded) and works on
//! the maximal violating pair: `i` maximizes `-y_t G_t` over the multipliers
//! that may grow along `y_t`, and `j` is the partner with the largest
//! second-order decrease of the objective. Optimization stops once
//! `m(a) - M(a) < epsilon`, which bounds every KKT violation by epsilon.

use crate::cache::KernelCache;
use crate::core::{OptimizationResult, OptimizerConfig, PipelineError, Result, Sample};
use crate::kernel::Kernel;
use log::{debug, warn};
use std::sync::Arc;

/// Curvature floor for pairs with a flat or non-convex direction
const TAU: f64 = 1e-12;

/// SMO solver for the binary SVM dual
pub struct SMOSolver<K: Kernel> {
    kernel: Arc<K>,
    config: OptimizerConfig,
}

/// Mutable optimization state shared by the inner routines
struct SolverState<'a> {
    samples: &'a [Sample],
    alpha: Vec<f64>,
    gradient: Vec<f64>,
    cache: KernelCache,
}

impl SolverState<'_> {
    fn y(&self, t: usize) -> f64 {
        self.samples[t].label.sign()
    }

    /// `-y_t G_t`, the quantity compared against the bias at convergence
    fn score(&self, t: usize) -> f64 {
        -self.y(t) * self.gradient[t]
    }

    /// `a_t` can move in the direction of `y_t`
    fn in_up(&self, t: usize, c: f64) -> bool {
        let a = self.alpha[t];
        if self.y(t) > 0.0 {
            a < c
        } else {
            a > 0.0
        }
    }

    /// `a_t` can move against the direction of `y_t`
    fn in_low(&self, t: usize, c: f64) -> bool {
        let a = self.alpha[t];
        if self.y(t) > 0.0 {
            a > 0.0
        } else {
            a < c
        }
    }
}

impl<K: Kernel> SMOSolver<K> {
    pub fn new(kernel: Arc<K>, config: OptimizerConfig) -> Self {
        Self { kernel, config }
    }

    /// Solve the dual problem for the given training samples
    ///
    /// Labels must contain both classes; the caller is expected to have
    /// checked this, but a degenerate set is still reported as
    /// `TrainingFailed` rather than producing a meaningless model.
    pub fn solve(&self, samples: &[Sample]) -> Result<OptimizationResult> {
        if samples.is_empty() {
            return Err(PipelineError::TrainingFailed(
                "training set is empty".to_string(),
            ));
        }
        let first = samples[0].label;
        if samples.iter().all(|s| s.label == first) {
            return Err(PipelineError::TrainingFailed(format!(
                "training set contains only class {first}"
            )));
        }

        let n = samples.len();
        let mut state = SolverState {
            samples,
            alpha: vec![0.0; n],
            // All multipliers start at zero, so f(x_t) = 0 and G_t = -1
            gradient: vec![-1.0; n],
            cache: KernelCache::with_memory_limit(self.config.cache_size),
        };

        let mut iterations = 0;
        while let Some((i, j)) = self.select_working_set(&mut state) {
            if iterations >= self.config.max_iterations {
                warn!(
                    "SMO stopped at the iteration limit ({}) before full convergence",
                    self.config.max_iterations
                );
                break;
            }
            self.take_step(i, j, &mut state);
            iterations += 1;
            if iterations % 1000 == 0 {
                debug!("SMO iteration {iterations}");
            }
        }
        debug!("SMO finished after {iterations} iterations");

        let b = self.calculate_bias(&state);

        let support_vectors: Vec<usize> = state
            .alpha
            .iter()
            .enumerate()
            .filter(|(_, &a)| a > 0.0)
            .map(|(i, _)| i)
            .collect();

        let objective_value = self.calculate_objective(&mut state, &support_vectors);

        let stats = state.cache.stats();
        debug!(
            "Kernel cache: {} hits, {} misses ({:.1}% hit rate)",
            stats.hits,
            stats.misses,
            state.cache.hit_rate() * 100.0
        );

        Ok(OptimizationResult {
            alpha: state.alpha,
            b,
            support_vectors,
            iterations,
            objective_value,
        })
    }

    fn is_free(&self, alpha: f64) -> bool {
        alpha > 0.0 && alpha < self.config.c
    }

    fn kernel_at(&self, state: &mut SolverState<'_>, i: usize, j: usize) -> f64 {
        let samples = state.samples;
        let kernel = &self.kernel;
        state.cache.get_or_compute(i, j, || {
            kernel.compute(&samples[i].features, &samples[j].features)
        })
    }

    /// Curvature of the objective along the pair direction
    fn curvature(&self, state: &mut SolverState<'_>, i: usize, j: usize) -> f64 {
        let k_ii = self.kernel_at(state, i, i);
        let k_jj = self.kernel_at(state, j, j);
        let k_ij = self.kernel_at(state, i, j);
        let quad = k_ii + k_jj - 2.0 * k_ij;
        if quad > 0.0 {
            quad
        } else {
            TAU
        }
    }

    /// Pick the next pair, or `None` once the KKT gap is below epsilon
    ///
    /// Ties keep the lowest index, so the sequence of steps is deterministic.
    fn select_working_set(&self, state: &mut SolverState<'_>) -> Option<(usize, usize)> {
        let c = self.config.c;
        let n = state.samples.len();

        let mut i = None;
        let mut max_score = f64::NEG_INFINITY;
        for t in 0..n {
            if state.in_up(t, c) && state.score(t) > max_score {
                max_score = state.score(t);
                i = Some(t);
            }
        }
        let i = i?;

        let mut j = None;
        let mut min_score = f64::INFINITY;
        let mut best_decrease = f64::INFINITY;
        for t in 0..n {
            if !state.in_low(t, c) {
                continue;
            }
            let score = state.score(t);
            min_score = min_score.min(score);

            let gap = max_score - score;
            if gap > 0.0 {
                let decrease = -(gap * gap) / self.curvature(state, i, t);
                if decrease < best_decrease {
                    best_decrease = decrease;
                    j = Some(t);
                }
            }
        }

        if max_score - min_score < self.config.epsilon {
            return None;
        }
        j.map(|j| (i, j))
    }

    /// Move `a_i` along `y_i` and `a_j` against `y_j` by the same step
    ///
    /// The step keeps `sum(a_t y_t)` fixed and is clipped so both multipliers
    /// stay in `[0, C]`; a multiplier that reaches a bound is set to it exactly.
    fn take_step(&self, i: usize, j: usize, state: &mut SolverState<'_>) {
        let c = self.config.c;
        let y_i = state.y(i);
        let y_j = state.y(j);

        let gap = state.score(i) - state.score(j);
        let quad = self.curvature(state, i, j);

        let room_i = if y_i > 0.0 {
            c - state.alpha[i]
        } else {
            state.alpha[i]
        };
        let room_j = if y_j > 0.0 {
            state.alpha[j]
        } else {
            c - state.alpha[j]
        };
        let step = (gap / quad).min(room_i).min(room_j);

        state.alpha[i] = if step == room_i {
            if y_i > 0.0 {
                c
            } else {
                0.0
            }
        } else {
            state.alpha[i] + y_i * step
        };
        state.alpha[j] = if step == room_j {
            if y_j > 0.0 {
                0.0
            } else {
                c
            }
        } else {
            state.alpha[j] - y_j * step
        };

        for t in 0..state.samples.len() {
            let k_ti = self.kernel_at(state, t, i);
            let k_tj = self.kernel_at(state, t, j);
            let delta = state.y(t) * step * (k_ti - k_tj);
            state.gradient[t] += delta;
        }
    }

    /// Bias from the free support vectors
    ///
    /// With no free multiplier the bias is the midpoint of the feasible
    /// interval `[m(a), M(a)]`.
    fn calculate_bias(&self, state: &SolverState<'_>) -> f64 {
        let c = self.config.c;
        let mut free_sum = 0.0;
        let mut free_count = 0usize;
        let mut upper = f64::NEG_INFINITY;
        let mut lower = f64::INFINITY;

        for t in 0..state.samples.len() {
            let score = state.score(t);
            if self.is_free(state.alpha[t]) {
                free_sum += score;
                free_count += 1;
            }
            if state.in_up(t, c) {
                upper = upper.max(score);
            }
            if state.in_low(t, c) {
                lower = lower.min(score);
            }
        }

        if free_count > 0 {
            free_sum / free_count as f64
        } else if upper.is_finite() && lower.is_finite() {
            (upper + lower) / 2.0
        } else {
            0.0
        }
    }

    /// Dual objective (maximization form) restricted to the support vectors
    fn calculate_objective(&self, state: &mut SolverState<'_>, support: &[usize]) -> f64 {
        let linear: f64 = support.iter().map(|&i| state.alpha[i]).sum();

        let mut quadratic = 0.0;
        for &i in support {
            for &j in support {
                let k_ij = self.kernel_at(state, i, j);
                quadratic += state.alpha[i]
                    * state.alpha[j]
                    * state.samples[i].label.sign()
                    * state.samples[j].label.sign()
                    * k_ij;
            }
        }

        linear - 0.5 * quadratic
    }
}
