//! Ordinary least squares solver.
//!
//! Computes the coefficient vector β minimizing `‖Xβ − y‖₂` for a dense,
//! over-determined design matrix `X` (n × m, n > m).
//!
//! Two strategies are available (see `Strategy`):
//! - **Normal equations**: form `G = XᵗX` and `b = Xᵗy`, Cholesky-factor `G`.
//!   `O(nm² + m³)`, but `cond(G) = cond(X)²`, so collinear or badly scaled
//!   columns lose precision quickly.
//! - **Column-pivoted QR**: `X P = Q R`, then back-substitute `R z = Qᵗy` and
//!   undo the pivoting. Never forms `XᵗX`. Rank-deficient designs get the
//!   basic solution (dependent coefficients set to zero).
//!
//! Either way the result is only β: no residuals, no fit statistics.

use std::time::Instant;

use log::{info, warn};
use nalgebra::{DMatrix, DVector};

use crate::domain::{Shape, Strategy};
use crate::error::AppError;

/// Check that `(x, y)` describes a well-posed least-squares problem.
pub fn validate_shape(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<Shape, AppError> {
    let (n, m) = x.shape();

    if y.len() != n {
        return Err(AppError::invalid_shape(format!(
            "design matrix has {n} rows but the response has {} values",
            y.len()
        )));
    }
    if m == 0 {
        return Err(AppError::invalid_shape(
            "design matrix must have m > 0 columns (at least one coefficient to solve for)",
        ));
    }
    if n <= m {
        return Err(AppError::invalid_shape(format!(
            "design matrix must have more rows than columns (n > m), got n={n} m={m}"
        )));
    }

    Ok(Shape { n, m })
}

/// Validate the inputs and compute β with the selected strategy.
pub fn solve(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    strategy: Strategy,
) -> Result<DVector<f64>, AppError> {
    let shape = validate_shape(x, y)?;

    let start = Instant::now();
    let beta = match strategy {
        Strategy::NormalEquations => solve_normal_equations(x, y)?,
        Strategy::Qr => solve_qr(x, y)?,
    };
    info!(
        "{strategy} solve ({shape}): {:.6}s",
        start.elapsed().as_secs_f64()
    );

    ensure_finite(&beta, strategy)?;
    Ok(beta)
}

/// Solve `(XᵗX) β = Xᵗy` via Cholesky.
///
/// Shape is assumed valid; use [`solve`] for the checked entry point.
pub fn solve_normal_equations(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<DVector<f64>, AppError> {
    let gram = x.tr_mul(x);
    let rhs = x.tr_mul(y);

    let chol = gram.clone().cholesky().ok_or_else(|| {
        AppError::numerical(
            "Gram matrix XᵗX is not positive definite (collinear or zero columns); \
             retry with --strategy qr",
        )
    })?;

    // A successful factorization can still be numerically singular: rounding
    // in XᵗX turns an exact zero pivot into a tiny positive one.
    let l = chol.l();
    let m = gram.nrows();
    let tol = f64::EPSILON * m as f64;
    for i in 0..m {
        let ratio = l[(i, i)] * l[(i, i)] / gram[(i, i)];
        if ratio.is_nan() || ratio <= tol {
            return Err(AppError::numerical(format!(
                "Gram matrix XᵗX is numerically singular at column {} (pivot ratio {ratio:.3e}); \
                 retry with --strategy qr",
                i + 1
            )));
        }
    }

    Ok(chol.solve(&rhs))
}

/// Solve the least-squares problem with a column-pivoted Householder QR.
///
/// Shape is assumed valid; use [`solve`] for the checked entry point.
pub fn solve_qr(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<DVector<f64>, AppError> {
    let (n, m) = x.shape();
    let qr = x.clone().col_piv_qr();
    let r = qr.r();

    let mut qty = y.clone();
    qr.q_tr_mul(&mut qty);

    let rank = numerical_rank(&r, n.max(m));
    if rank == 0 {
        return Err(AppError::numerical(
            "design matrix is numerically zero; no coefficients can be estimated",
        ));
    }
    if rank < m {
        warn!(
            "design matrix is rank deficient (rank {rank} < m={m}); \
             {} dependent coefficient(s) set to zero",
            m - rank
        );
    }

    let r_head = r.view((0, 0), (rank, rank)).into_owned();
    let rhs = qty.rows(0, rank).into_owned();
    let head = r_head.solve_upper_triangular(&rhs).ok_or_else(|| {
        AppError::numerical("triangular factor R is singular; no finite solution")
    })?;

    let mut beta = DVector::zeros(m);
    beta.rows_mut(0, rank).copy_from(&head);
    qr.p().inv_permute_rows(&mut beta);
    Ok(beta)
}

/// Count leading diagonal entries of `R` that are significant relative to the
/// largest one.
fn numerical_rank(r: &DMatrix<f64>, max_dim: usize) -> usize {
    let diag_len = r.nrows().min(r.ncols());
    let max_pivot = (0..diag_len)
        .map(|i| r[(i, i)].abs())
        .fold(0.0_f64, f64::max);
    if max_pivot == 0.0 {
        return 0;
    }

    let threshold = max_pivot * f64::EPSILON * max_dim as f64;
    (0..diag_len)
        .take_while(|&i| r[(i, i)].abs() > threshold)
        .count()
}

fn ensure_finite(beta: &DVector<f64>, strategy: Strategy) -> Result<(), AppError> {
    if beta.iter().all(|v| v.is_finite()) {
        return Ok(());
    }
    let hint = match strategy {
        Strategy::NormalEquations => "; retry with --strategy qr",
        Strategy::Qr => "",
    };
    Err(AppError::numerical(format!(
        "{strategy} produced non-finite coefficients{hint}"
    )))
}
